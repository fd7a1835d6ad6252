use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::{Mutex, RwLock};

use crate::db::RoomStore;
use crate::feed::ChangeFeed;
use crate::services::{Ambient, RoomListView};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub store: Arc<dyn RoomStore>,
    pub feed: ChangeFeed,
    pub view: Arc<Mutex<RoomListView>>,
    pub ambient: Arc<RwLock<Ambient>>,
}
