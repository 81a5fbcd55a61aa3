//! Local key/value persistence.
//!
//! The run core persists a handful of integer counters and flags between
//! app launches. Hosts plug in whatever backing store they have through
//! [`KeyValueStore`]; two implementations ship with the crate:
//!
//! - [`MemoryStore`]: in-process only, for tests and practice sandboxes
//! - [`JsonFileStore`]: a flat JSON object on disk, written on `flush`
//!
//! ## Values
//!
//! Every value is an `i64`. Booleans are stored as 0/1.

mod file;
pub mod keys;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;

/// Flat string-keyed integer store.
pub trait KeyValueStore {
    /// Read a value.
    fn get(&self, key: &str) -> Option<i64>;

    /// Write a value. Not durable until [`flush`](Self::flush).
    fn set(&mut self, key: &str, value: i64);

    /// Delete a key. Missing keys are ignored.
    fn remove(&mut self, key: &str);

    /// Make all writes durable.
    fn flush(&mut self) -> Result<(), StorageError>;

    /// Read a value with a fallback.
    fn get_or(&self, key: &str, default: i64) -> i64 {
        self.get(key).unwrap_or(default)
    }

    /// Read a 0/1 flag. Any non-zero value counts as set.
    fn get_flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| v != 0)
    }

    /// Write a 0/1 flag.
    fn set_flag(&mut self, key: &str, value: bool) {
        self.set(key, i64::from(value));
    }

    /// Flush, logging instead of failing. In-memory values stay authoritative.
    fn flush_or_log(&mut self) {
        if let Err(err) = self.flush() {
            log::error!("failed to persist run data: {err}");
        }
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<i64> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: i64) {
        (**self).set(key, value);
    }

    fn remove(&mut self, key: &str) {
        (**self).remove(key);
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        (**self).flush()
    }
}
