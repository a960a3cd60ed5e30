pub mod board;
pub mod entity;
pub mod item;
pub mod lane;
pub mod path;

pub use board::Board;
pub use entity::{Entity, EntityId, EntityKind};
pub use item::{Item, ItemData};
pub use lane::{Lane, LaneData};
pub use path::Path;
