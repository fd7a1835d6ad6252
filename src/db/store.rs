use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::db::repository;
use crate::error::AppError;
use crate::models::{Room, RoomDraft};

/// Data-access facade over the persisted room collection.
///
/// Used as `Arc<dyn RoomStore>` so the service layer can run against a stub.
#[async_trait]
pub trait RoomStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Room>, AppError>;
    async fn create(&self, draft: RoomDraft) -> Result<Room, AppError>;
    async fn update(&self, id: &str, draft: RoomDraft) -> Result<Room, AppError>;
    async fn update_status(&self, id: &str, status: bool) -> Result<DateTime<Utc>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

pub struct SqliteRoomStore {
    db: SqlitePool,
}

impl SqliteRoomStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoomStore for SqliteRoomStore {
    async fn list(&self) -> Result<Vec<Room>, AppError> {
        repository::fetch_rooms(&self.db).await
    }

    async fn create(&self, draft: RoomDraft) -> Result<Room, AppError> {
        repository::insert_room(&self.db, draft).await
    }

    async fn update(&self, id: &str, draft: RoomDraft) -> Result<Room, AppError> {
        repository::update_room(&self.db, id, draft).await
    }

    async fn update_status(&self, id: &str, status: bool) -> Result<DateTime<Utc>, AppError> {
        repository::update_room_status(&self.db, id, status).await
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        repository::delete_room(&self.db, id).await
    }
}
