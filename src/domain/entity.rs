use crate::domain::{item::Item, lane::Lane, path::Path};
use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

/// Stable identifier of a lane or item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type tag of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Lane,
    Item,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lane => "lane",
            Self::Item => "item",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any node addressable by a [`Path`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entity {
    Lane(Arc<Lane>),
    Item(Arc<Item>),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Lane(_) => EntityKind::Lane,
            Self::Item(_) => EntityKind::Item,
        }
    }

    pub fn id(&self) -> &EntityId {
        match self {
            Self::Lane(lane) => &lane.id,
            Self::Item(item) => &item.id,
        }
    }

    pub fn as_lane(&self) -> Option<&Arc<Lane>> {
        match self {
            Self::Lane(lane) => Some(lane),
            Self::Item(_) => None,
        }
    }

    pub fn as_item(&self) -> Option<&Arc<Item>> {
        match self {
            Self::Item(item) => Some(item),
            Self::Lane(_) => None,
        }
    }

    /// Unwraps a lane, reporting `path` as the culprit otherwise
    pub fn into_lane(self, path: &Path) -> Result<Arc<Lane>> {
        match self {
            Self::Lane(lane) => Ok(lane),
            other => Err(other.mismatch(path, EntityKind::Lane)),
        }
    }

    /// Unwraps an item, reporting `path` as the culprit otherwise
    pub fn into_item(self, path: &Path) -> Result<Arc<Item>> {
        match self {
            Self::Item(item) => Ok(item),
            other => Err(other.mismatch(path, EntityKind::Item)),
        }
    }

    pub(crate) fn mismatch(&self, path: &Path, expected: EntityKind) -> KanbanError {
        KanbanError::EntityKindMismatch {
            path: path.clone(),
            expected,
            found: self.kind(),
        }
    }

    /// Same-kind check used before replacing one entity with another
    pub(crate) fn expect_kind(&self, path: &Path, expected: EntityKind) -> Result<()> {
        if self.kind() == expected {
            Ok(())
        } else {
            Err(self.mismatch(path, expected))
        }
    }
}

impl From<Lane> for Entity {
    fn from(lane: Lane) -> Self {
        Self::Lane(Arc::new(lane))
    }
}

impl From<Item> for Entity {
    fn from(item: Item) -> Self {
        Self::Item(Arc::new(item))
    }
}

impl From<Arc<Lane>> for Entity {
    fn from(lane: Arc<Lane>) -> Self {
        Self::Lane(lane)
    }
}

impl From<Arc<Item>> for Entity {
    fn from(item: Arc<Item>) -> Self {
        Self::Item(item)
    }
}
