pub mod ambient;
pub mod filter;
pub mod room_list;
pub mod time_context;

pub use ambient::AmbientMonitor;
pub use filter::{FilterCriteria, visible};
pub use room_list::RoomListView;
pub use time_context::{Ambient, TimeContext};
