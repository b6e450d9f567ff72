//! `localStorage` as a [`KeyValueStore`].

use lorelist_core::{KeyValueStore, StorageError};
use wasm_bindgen::JsValue;

pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn new(storage: web_sys::Storage) -> Self {
        Self { storage }
    }

    /// `window.localStorage`, which may be missing or throw when the page
    /// runs with storage disabled.
    pub fn from_window() -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self::new(storage)),
            Ok(None) => Err(StorageError::Unavailable),
            Err(err) => Err(StorageError::Backend(describe(&err))),
        }
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|err| StorageError::Backend(describe(&err)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(|err| {
            log::warn!("localStorage rejected {} bytes under {:?}", value.len(), key);
            StorageError::Backend(describe(&err))
        })
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
