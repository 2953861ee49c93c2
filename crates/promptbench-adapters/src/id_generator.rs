//! Identifier generators.

use std::sync::atomic::{AtomicU64, Ordering};

use promptbench_core::application::ports::IdGenerator;

/// Random v4 UUIDs. Used for editor variables and saved prompts.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic `<prefix>-1`, `<prefix>-2`, ... ids.
#[derive(Debug, Default)]
pub struct SequentialIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        if self.prefix.is_empty() {
            n.to_string()
        } else {
            format!("{}-{}", self.prefix, n)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uuids_are_unique_and_well_formed() {
        let ids: HashSet<String> = (0..100).map(|_| UuidGenerator.next_id()).collect();
        assert_eq!(ids.len(), 100);
        assert!(ids.iter().all(|id| uuid::Uuid::parse_str(id).is_ok()));
    }

    #[test]
    fn sequential_ids_count_from_one() {
        let ids = SequentialIds::new("var");
        assert_eq!(ids.next_id(), "var-1");
        assert_eq!(ids.next_id(), "var-2");
    }

    #[test]
    fn sequential_ids_without_prefix() {
        let ids = SequentialIds::default();
        assert_eq!(ids.next_id(), "1");
    }
}
