//! Identity generation for records that other collections reference.

use uuid::Uuid;

/// Source of fresh identifiers for duplicated records.
///
/// The only requirement is that a generated id differs from every id
/// already handed out; the format is up to the implementation.
pub trait IdGenerator {
    fn generate(&mut self) -> String;
}

/// Random v4 UUIDs, the format used in saved dwelling state.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Predictable ids (`prefix-1`, `prefix-2`, ...) for fixtures and tests.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
