//! Optional key-value persistence for list snapshots.
//!
//! Storage is best-effort: every failure surfaces as a [`StorageError`] the
//! caller is expected to log and treat as "no data".

use std::collections::HashMap;
use std::fmt;

/// Key under which the list snapshot is stored.
pub const DEFAULT_STORAGE_KEY: &str = "list";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// No storage medium could be reached.
    Unavailable,
    /// The medium rejected the read or write.
    Backend(String),
    /// A stored value exists but is not a list snapshot.
    Corrupt(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage unavailable"),
            StorageError::Backend(reason) => write!(f, "storage backend error: {reason}"),
            StorageError::Corrupt(reason) => write!(f, "stored snapshot is corrupt: {reason}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// String key-value storage, modelled on the browser `Storage` interface.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn is_available(&self) -> bool {
        true
    }
}

/// In-process store used by tests and by hosts without a real medium.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    available: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            available: true,
        }
    }

    /// A store whose every call fails with [`StorageError::Unavailable`].
    pub fn unavailable() -> Self {
        Self {
            items: HashMap::new(),
            available: false,
        }
    }

    /// Seeds a raw value, bypassing snapshot encoding.
    pub fn with_raw(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

/// Saves and restores the list as a JSON array of strings under one key.
///
/// The backing store is optional; without one every operation reports
/// [`StorageError::Unavailable`].
#[derive(Debug)]
pub struct ListSnapshotStore<S> {
    store: Option<S>,
    key: String,
}

impl<S: KeyValueStore> ListSnapshotStore<S> {
    pub fn new(store: Option<S>) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: Option<S>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    pub fn is_available(&self) -> bool {
        self.store.as_ref().is_some_and(|store| store.is_available())
    }

    pub fn save(&mut self, items: &[String]) -> Result<(), StorageError> {
        let store = self.store.as_mut().ok_or(StorageError::Unavailable)?;
        let encoded =
            serde_json::to_string(items).map_err(|err| StorageError::Backend(err.to_string()))?;
        store.set_item(&self.key, &encoded)?;
        log::debug!("saved {} items under {:?}", items.len(), self.key);
        Ok(())
    }

    /// `Ok(None)` when nothing was ever saved under the key.
    pub fn load(&self) -> Result<Option<Vec<String>>, StorageError> {
        let store = self.store.as_ref().ok_or(StorageError::Unavailable)?;
        let Some(raw) = store.get_item(&self.key)? else {
            return Ok(None);
        };
        let items: Vec<String> =
            serde_json::from_str(&raw).map_err(|err| StorageError::Corrupt(err.to_string()))?;
        Ok(Some(items))
    }

    /// Whether [`load`](Self::load) would currently yield a list.
    pub fn has_snapshot(&self) -> bool {
        matches!(self.load(), Ok(Some(_)))
    }
}
