use crate::{config::ArchiveSettings, domain::Board, error::Result};
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;

/// Storage trait for persisting the board document and its settings
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Saves the board document
    async fn save_board(&self, board: &Board) -> Result<()>;

    /// Loads the board document
    async fn load_board(&self) -> Result<Board>;

    /// Saves the archive settings
    async fn save_settings(&self, settings: &ArchiveSettings) -> Result<()>;

    /// Loads the archive settings, falling back to defaults when none were saved
    async fn load_settings(&self) -> Result<ArchiveSettings>;

    /// Checks if the board storage is initialized
    async fn is_initialized(&self) -> bool;
}
