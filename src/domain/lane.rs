use crate::domain::{entity::EntityId, item::Item};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Lane settings and title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneData {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(default)]
    pub should_mark_items_complete: bool,
}

/// A column of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    pub id: EntityId,
    pub data: LaneData,
    #[serde(default)]
    pub children: Vec<Arc<Item>>,
}

impl Lane {
    pub fn new(id: impl Into<EntityId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: LaneData {
                title: title.into(),
                max_items: None,
                should_mark_items_complete: false,
            },
            children: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.children = items.into_iter().map(Arc::new).collect();
        self
    }

    /// Copy of this lane holding `children` instead of its current items.
    /// The lane's own data is cloned; the items are shared.
    pub fn with_children(&self, children: Vec<Arc<Item>>) -> Self {
        Self {
            id: self.id.clone(),
            data: self.data.clone(),
            children,
        }
    }
}
