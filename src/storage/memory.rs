use rustc_hash::FxHashMap;

use super::KeyValueStore;
use crate::error::StorageError;

/// Non-durable store backed by a hash map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, i64>,
    flushes: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `flush` calls so far.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        self.flushes += 1;
        Ok(())
    }
}
