use crate::domain::{EntityId, EntityKind, Path};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, KanbanError>;

#[derive(Debug, Error)]
pub enum KanbanError {
    #[error("No entity at path {path}")]
    EntityNotFound { path: Path },

    #[error("Expected {expected} at path {path}, found {found}")]
    EntityKindMismatch {
        path: Path,
        expected: EntityKind,
        found: EntityKind,
    },

    #[error("Entity at path {path} has id {expected}, replacement has id {found}")]
    EntityIdMismatch {
        path: Path,
        expected: EntityId,
        found: EntityId,
    },

    #[error("Board not initialized")]
    BoardNotInitialized,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl KanbanError {
    pub(crate) fn not_found(path: &Path) -> Self {
        Self::EntityNotFound { path: path.clone() }
    }

    /// True for errors raised because a path did not resolve to the
    /// expected entity: missing, of the wrong kind, or carrying a different
    /// id. These never leave a committed transform behind.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            Self::EntityNotFound { .. }
                | Self::EntityKindMismatch { .. }
                | Self::EntityIdMismatch { .. }
        )
    }
}
