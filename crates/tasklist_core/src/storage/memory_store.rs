use crate::error::AppError;
use crate::storage::KeyValueStore;
use std::collections::HashMap;

/// Process-local store; nothing survives the value being dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry<K: Into<String>, V: Into<String>>(key: K, blob: V) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.into(), blob.into());
        store
    }

    /// Number of successful `set` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, blob: &str) -> Result<(), AppError> {
        self.entries.insert(key.to_string(), blob.to_string());
        self.writes += 1;
        Ok(())
    }
}
