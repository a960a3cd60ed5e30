use crate::domain::EntityId;
use std::sync::atomic::{AtomicU32, Ordering};
use uuid::Uuid;

/// Source of fresh entity ids, unique for the document's lifetime
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> EntityId;
}

/// Random v4 UUIDs in simple (unhyphenated) form
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> EntityId {
        EntityId::new(Uuid::new_v4().simple().to_string())
    }
}

/// Deterministic ids built from a prefix and a counter (e.g. `dup1`, `dup2`)
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU32,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU32::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> EntityId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        EntityId::new(format!("{}{}", self.prefix, n))
    }
}
