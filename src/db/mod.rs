pub mod repository;
pub mod store;

pub use store::{RoomStore, SqliteRoomStore};
