//! Matrix Persistence
//!
//! Browser-local key-value storage for the quadrant assignment and the
//! cleared-completed set. Values are JSON; nothing is synced anywhere.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use crate::matrix::MatrixAssignment;

pub const MATRIX_KEY: &str = "taskMatrix";
pub const CLEARED_COMPLETED_KEY: &str = "clearedCompletedTasks";

/// Ids of completed tasks the user dismissed from view
pub type ClearedCompleted = BTreeSet<String>;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("storage access failed: {0}")]
    Access(String),
    #[error("stored value is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|e| StorageError::Access(format!("{:?}", e)))?
            .ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Access(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Access(format!("{:?}", e)))
    }
}

/// In-memory store; clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed access to the two persisted values
pub struct MatrixStore<S> {
    store: S,
}

impl MatrixStore<LocalStorage> {
    pub fn local() -> Self {
        Self::new(LocalStorage)
    }
}

impl<S: KeyValueStore> MatrixStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored assignment, or empty when nothing was stored yet
    pub fn read_assignment(&self) -> Result<MatrixAssignment, StorageError> {
        match self.store.get(MATRIX_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(MatrixAssignment::default()),
        }
    }

    /// Overwrite the stored assignment with `matrix`
    pub fn write_assignment(&self, matrix: &MatrixAssignment) -> Result<(), StorageError> {
        let raw = serde_json::to_string(matrix)?;
        self.store.set(MATRIX_KEY, &raw)
    }

    pub fn read_cleared_completed(&self) -> Result<ClearedCompleted, StorageError> {
        match self.store.get(CLEARED_COMPLETED_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(ClearedCompleted::new()),
        }
    }

    /// Union `ids` into the stored set; returns the merged set.
    pub fn add_cleared_completed<I>(&self, ids: I) -> Result<ClearedCompleted, StorageError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut cleared = self.read_cleared_completed()?;
        cleared.extend(ids);
        let raw = serde_json::to_string(&cleared)?;
        self.store.set(CLEARED_COMPLETED_KEY, &raw)?;
        Ok(cleared)
    }
}
