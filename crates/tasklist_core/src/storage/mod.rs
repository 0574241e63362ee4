use crate::error::AppError;

pub mod file_store;
pub mod memory_store;
pub mod snapshot;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// Key under which the task collection snapshot is stored.
pub const TASKS_KEY: &str = "tasks";

/// String-keyed blob storage holding whole snapshots.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    fn set(&mut self, key: &str, blob: &str) -> Result<(), AppError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, blob: &str) -> Result<(), AppError> {
        (**self).set(key, blob)
    }
}
