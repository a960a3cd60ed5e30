use crate::domain::Board;
use crate::error::Result;
use std::sync::{Arc, Mutex, RwLock};

/// A pure board-to-board function handed to a [`StateManager`]
pub type Transform<'a> = Box<dyn FnOnce(&Board) -> Result<Board> + 'a>;

/// Owner of the current board value.
///
/// `set_state` runs `transform` against the current board and commits the
/// result. When the transform fails nothing is committed and the error is
/// returned to the caller.
pub trait StateManager: Send + Sync {
    fn set_state(&self, transform: Transform<'_>) -> Result<()>;
}

/// In-memory single-writer board state
#[derive(Debug, Default)]
pub struct BoardState {
    current: RwLock<Arc<Board>>,
    // Serializes read-transform-commit cycles. Plain reads never take it.
    writer: Mutex<()>,
}

impl BoardState {
    pub fn new(board: Board) -> Self {
        Self {
            current: RwLock::new(Arc::new(board)),
            writer: Mutex::new(()),
        }
    }

    /// The committed board
    pub fn current(&self) -> Arc<Board> {
        let current = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&current)
    }
}

impl StateManager for BoardState {
    fn set_state(&self, transform: Transform<'_>) -> Result<()> {
        let _writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Only the writer lock is held while the transform runs, so listeners
        // it notifies may read the (still unchanged) current board.
        let board = self.current();
        let next = transform(&board)?;

        let mut current = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = Arc::new(next);

        tracing::debug!(
            lanes = current.lanes.len(),
            archived = current.archive.len(),
            "board state committed"
        );
        Ok(())
    }
}
