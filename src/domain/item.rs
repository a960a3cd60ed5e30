use crate::domain::entity::EntityId;
use serde::{Deserialize, Serialize};

/// Display data derived from an item's raw markdown title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemData {
    pub title_raw: String,
    pub title: String,
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl ItemData {
    fn derive(title_raw: String, checked: bool) -> Self {
        let title = title_raw.trim().to_string();
        let tags = title
            .split_whitespace()
            .filter(|word| word.len() > 1 && word.starts_with('#'))
            .map(|word| word[1..].to_string())
            .collect();

        Self {
            title_raw,
            title,
            checked,
            tags,
        }
    }
}

/// A single card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: EntityId,
    pub data: ItemData,
}

impl Item {
    /// Creates an unchecked item from its raw title
    pub fn new(id: impl Into<EntityId>, title_raw: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: ItemData::derive(title_raw.into(), false),
        }
    }

    /// Returns a copy with a new raw title and re-derived display data
    pub fn with_title_raw(&self, title_raw: impl Into<String>) -> Self {
        Self {
            id: self.id.clone(),
            data: ItemData::derive(title_raw.into(), self.data.checked),
        }
    }

    pub fn title_raw(&self) -> &str {
        &self.data.title_raw
    }
}
