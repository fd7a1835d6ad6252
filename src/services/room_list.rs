use crate::feed::RoomEvent;
use crate::models::Room;
use crate::services::filter::{self, FilterCriteria};
use crate::services::time_context::TimeContext;

/// In-memory room list plus active filter criteria.
///
/// Seeded once from the store, then kept current by applying change-feed
/// events one at a time. All mutation happens through `seed` and `apply`,
/// on a single logical execution context; the visible list is recomputed
/// as a pure projection on demand.
#[derive(Debug, Default)]
pub struct RoomListView {
    rooms: Vec<Room>,
    criteria: FilterCriteria,
    seeded: bool,
}

impl RoomListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list wholesale with a fresh fetch. Callers that failed
    /// to fetch simply never call this, leaving prior state untouched.
    pub fn seed(&mut self, rooms: Vec<Room>) {
        self.rooms = rooms;
        self.seeded = true;
    }

    /// Distinguishes "no rooms match" from "never loaded".
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Merge one feed event into the list:
    /// - insert appends at the end; display order is not re-derived
    /// - update shallow-merges the patch into the matching record
    /// - delete removes the matching record
    /// Updates and deletes for ids we have never seen are no-ops.
    pub fn apply(&mut self, event: RoomEvent) {
        match event {
            RoomEvent::Insert(room) => self.rooms.push(room),
            RoomEvent::Update(patch) => {
                if let Some(room) = self.rooms.iter_mut().find(|r| r.id == patch.id) {
                    patch.apply(room);
                }
            }
            RoomEvent::Delete { id } => self.rooms.retain(|r| r.id != id),
        }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    pub fn clear_criteria(&mut self) {
        self.criteria = FilterCriteria::default();
    }

    /// Default filters from wall-clock time: current shift and weekday.
    /// Applied once at mount and again on explicit user request.
    pub fn apply_time_defaults(&mut self, ctx: &TimeContext) {
        self.criteria.turno = ctx.turno.as_str().to_string();
        self.criteria.dia_semana = ctx.dia_semana.as_str().to_string();
    }

    /// The filtered projection, in list order.
    pub fn visible(&self) -> Vec<Room> {
        filter::visible(&self.rooms, &self.criteria)
    }
}
