use crate::domain::{entity::Entity, lane::Lane};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Board document: the live lanes plus the archive.
///
/// Values are never edited in place. Every operation builds a new board
/// that shares all untouched lanes and items with the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub lanes: Vec<Arc<Lane>>,
    /// Archived entities, oldest first. Not addressable by path. Shared
    /// between boards until an archive operation appends to it.
    #[serde(default)]
    pub archive: Arc<Vec<Entity>>,
}

impl Board {
    pub fn new(lanes: impl IntoIterator<Item = Lane>) -> Self {
        Self {
            lanes: lanes.into_iter().map(Arc::new).collect(),
            archive: Arc::new(Vec::new()),
        }
    }
}
