//! Lifecycle notifications sent to the host application

use crate::domain::{Entity, EntityKind, Item, Lane, Path};
use std::sync::{Arc, Mutex};

pub const CARD_ADDED: &str = "kanban:card-added";
pub const CARD_UPDATED: &str = "kanban:card-updated";
pub const CARD_ARCHIVED: &str = "kanban:card-archived";
pub const LANE_ADDED: &str = "kanban:lane-added";
pub const LANE_UPDATED: &str = "kanban:lane-updated";
pub const LANE_ARCHIVED: &str = "kanban:lane-archived";
pub const LANE_CARDS_ARCHIVED: &str = "kanban:lane-cards-archived";
pub const LANE_DELETED: &str = "kanban:lane-deleted";
pub const ITEM_DELETED: &str = "kanban:item-deleted";
pub const LANE_DUPLICATED: &str = "kanban:lane-duplicated";
pub const ITEM_DUPLICATED: &str = "kanban:item-duplicated";

/// A board change, with the payload listeners receive
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    CardAdded {
        item: Arc<Item>,
    },
    LaneAdded {
        lane: Arc<Lane>,
    },
    LaneUpdated {
        lane: Arc<Lane>,
    },
    LaneArchived {
        lane: Arc<Lane>,
    },
    LaneCardsArchived {
        items: Vec<Arc<Item>>,
    },
    EntityDeleted {
        entity: Entity,
    },
    CardUpdated {
        old: Arc<Item>,
        new: Arc<Item>,
    },
    CardArchived {
        path: Path,
        item: Arc<Item>,
    },
    EntityDuplicated {
        path: Path,
        entity: Entity,
    },
}

impl BoardEvent {
    /// Event name on the host's event bus
    pub fn name(&self) -> &'static str {
        match self {
            Self::CardAdded { .. } => CARD_ADDED,
            Self::LaneAdded { .. } => LANE_ADDED,
            Self::LaneUpdated { .. } => LANE_UPDATED,
            Self::LaneArchived { .. } => LANE_ARCHIVED,
            Self::LaneCardsArchived { .. } => LANE_CARDS_ARCHIVED,
            Self::EntityDeleted { entity } => match entity.kind() {
                EntityKind::Lane => LANE_DELETED,
                EntityKind::Item => ITEM_DELETED,
            },
            Self::CardUpdated { .. } => CARD_UPDATED,
            Self::CardArchived { .. } => CARD_ARCHIVED,
            Self::EntityDuplicated { entity, .. } => match entity.kind() {
                EntityKind::Lane => LANE_DUPLICATED,
                EntityKind::Item => ITEM_DUPLICATED,
            },
        }
    }
}

/// Fire-and-forget channel for [`BoardEvent`]s
pub trait NotificationSink: Send + Sync {
    fn emit(&self, event: &BoardEvent);
}

/// Logs every event at debug level and otherwise drops it
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn emit(&self, event: &BoardEvent) {
        tracing::debug!(event = event.name(), "board event");
    }
}

/// Keeps every emitted event in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<BoardEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BoardEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events().iter().map(BoardEvent::name).collect()
    }
}

impl NotificationSink for RecordingSink {
    fn emit(&self, event: &BoardEvent) {
        let mut events = self
            .events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        events.push(event.clone());
    }
}
