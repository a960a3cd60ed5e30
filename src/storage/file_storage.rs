use crate::{
    config::ArchiveSettings,
    domain::Board,
    error::{KanbanError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage implementation
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const KANBAN_DIR: &'static str = ".kanban";
    const BOARD_FILE: &'static str = "board.json";
    const SETTINGS_FILE: &'static str = "settings.json";

    /// Creates a new FileStorage instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::KANBAN_DIR),
        }
    }

    fn board_file(&self) -> PathBuf {
        self.root_path.join(Self::BOARD_FILE)
    }

    fn settings_file(&self) -> PathBuf {
        self.root_path.join(Self::SETTINGS_FILE)
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        // Create an empty board if it doesn't exist
        if !self.board_file().exists() {
            self.save_board(&Board::default()).await?;
        }

        Ok(())
    }

    async fn save_board(&self, board: &Board) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let board_file = self.board_file();
        let json = serde_json::to_string_pretty(board)?;
        fs::write(&board_file, json).await?;

        tracing::debug!(
            path = %board_file.display(),
            lanes = board.lanes.len(),
            "board saved"
        );
        Ok(())
    }

    async fn load_board(&self) -> Result<Board> {
        let board_file = self.board_file();

        if !board_file.exists() {
            return Err(KanbanError::BoardNotInitialized);
        }

        let contents = fs::read_to_string(&board_file).await?;
        let board: Board = serde_json::from_str(&contents)?;

        Ok(board)
    }

    async fn save_settings(&self, settings: &ArchiveSettings) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let json = serde_json::to_string_pretty(settings)?;
        fs::write(self.settings_file(), json).await?;
        Ok(())
    }

    async fn load_settings(&self) -> Result<ArchiveSettings> {
        let settings_file = self.settings_file();

        if !settings_file.exists() {
            return Ok(ArchiveSettings::default());
        }

        let contents = fs::read_to_string(&settings_file).await?;
        ArchiveSettings::from_json(&contents)
    }

    async fn is_initialized(&self) -> bool {
        self.root_path.exists() && self.board_file().exists()
    }
}
