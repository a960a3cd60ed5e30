//! # Kanban Core
//!
//! Structural editing engine for a markdown kanban board: lanes holding
//! items, plus an archive of removed items.
//!
//! Boards are immutable values. The [`tree`] module edits them by path and
//! returns new boards that share every untouched lane and item with the
//! old one. [`BoardModifiers`] builds the board operations (add, update,
//! archive, delete, duplicate) on top of it, hands each resulting transform
//! to a [`StateManager`] and announces the change through a
//! [`NotificationSink`].

pub mod archive;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod ids;
pub mod modifiers;
pub mod state;
pub mod storage;
pub mod tree;

// Re-export commonly used types
pub use archive::{ArchiveSink, DateFormat, DateFormatter, FixedClock, LocalClock};
pub use config::ArchiveSettings;
pub use domain::{Board, Entity, EntityId, EntityKind, Item, ItemData, Lane, LaneData, Path};
pub use error::{KanbanError, Result};
pub use events::{BoardEvent, NotificationSink, RecordingSink, TracingSink};
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use modifiers::BoardModifiers;
pub use state::{BoardState, StateManager, Transform};
pub use storage::Storage;
