use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// A source of unique message and correlation identifiers
pub trait IdGenerator {
    /// Returns a fresh identifier
    fn next_id(&self) -> String;
}

/// Generates random (v4) UUIDs. This is the default generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Generates `<prefix>-1`, `<prefix>-2`, ... Deterministic, for tests and replay.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    value: AtomicU64,
}

impl SequentialIdGenerator {
    /// Creates a generator whose first identifier is `<prefix>-1`
    pub fn new(prefix: &str) -> SequentialIdGenerator {
        SequentialIdGenerator {
            prefix: prefix.to_owned(),
            value: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let value = self.value.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, value)
    }
}
