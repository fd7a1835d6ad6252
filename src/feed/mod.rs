use tokio::sync::broadcast;
use tracing::warn;

use crate::models::{Room, RoomPatch};

const CHANNEL_CAPACITY: usize = 256;

/// One mutation against the room collection, as seen by the change feed.
/// Inserts carry the full new record, updates carry a partial patch,
/// deletes carry only the id.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    Insert(Room),
    Update(RoomPatch),
    Delete { id: String },
}

impl RoomEvent {
    pub fn room_id(&self) -> &str {
        match self {
            RoomEvent::Insert(room) => &room.id,
            RoomEvent::Update(patch) => &patch.id,
            RoomEvent::Delete { id } => id,
        }
    }
}

/// Broadcast hub for room mutations. Every successful write publishes
/// exactly one event here; views apply them to local state.
///
/// Subscriptions are owned handles, released when dropped. There is no
/// process-wide channel singleton.
#[derive(Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<RoomEvent>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Send an event. No-op if nobody is listening.
    pub fn publish(&self, event: RoomEvent) {
        let _ = self.tx.send(event);
    }

    /// Subscribe to every room mutation.
    pub fn subscribe(&self) -> FeedSubscription {
        FeedSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Narrow subscription for a single room: only `Update` events for that
    /// id are applied, to a local shadow of `status`.
    pub fn subscribe_room(&self, room_id: impl Into<String>, status: bool) -> RoomStatusFeed {
        RoomStatusFeed {
            room_id: room_id.into(),
            status,
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Owned handle on the full feed. Dropping it tears the subscription down.
pub struct FeedSubscription {
    rx: broadcast::Receiver<RoomEvent>,
}

impl FeedSubscription {
    /// Next event, or `None` once the feed is closed. A lagged receiver
    /// skips what it missed; callers may re-seed from the store if that
    /// matters to them.
    pub async fn next(&mut self) -> Option<RoomEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("feed subscription lagged, skipped {} events", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// Status shadow for one room, fed by its `Update` events only.
/// Used by the per-card status toggle.
pub struct RoomStatusFeed {
    room_id: String,
    status: bool,
    rx: broadcast::Receiver<RoomEvent>,
}

impl RoomStatusFeed {
    pub fn status(&self) -> bool {
        self.status
    }

    /// Wait for the next status change of the watched room, or `None` once
    /// the feed is closed. Events for other rooms, inserts and deletes are
    /// skipped, as are updates that do not touch `status`.
    pub async fn changed(&mut self) -> Option<bool> {
        loop {
            match self.rx.recv().await {
                Ok(RoomEvent::Update(patch)) if patch.id == self.room_id => {
                    if let Some(status) = patch.status {
                        self.status = status;
                        return Some(status);
                    }
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(
                        "status feed for room {} lagged, skipped {} events",
                        self.room_id, skipped
                    );
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
