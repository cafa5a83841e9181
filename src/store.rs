//! Preference persistence
//!
//! A thin JSON envelope over a raw text key/value backend. Every persisted
//! value round-trips through `serde_json`; failures never escape to callers:
//! `save` reports them as `false`, `load` substitutes the caller's default.
//! Both paths leave a logged diagnostic behind.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Raw text storage. On web this is LocalStorage; tests and the native
/// smoke binary use [`MemoryBackend`].
pub trait Backend {
    /// Read the raw text stored under `key`, if any.
    fn read(&self, key: &str) -> Option<String>;
    /// Write raw text under `key`. The error is a human-readable diagnostic
    /// (quota exceeded, storage disabled, ...).
    fn write(&self, key: &str, text: &str) -> Result<(), String>;
}

/// JSON-serializing preference store over any [`Backend`].
pub struct PrefStore<B: Backend> {
    backend: B,
}

impl<B: Backend> PrefStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Serialize `value` and write it under `key`. Returns `false` on
    /// encode or storage failure instead of propagating.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> bool {
        let text = match serde_json::to_string(value) {
            Ok(text) => text,
            Err(e) => {
                log::error!("failed to encode value for key '{key}': {e}");
                return false;
            }
        };

        match self.backend.write(key, &text) {
            Ok(()) => true,
            Err(e) => {
                log::error!("failed to store key '{key}': {e}");
                false
            }
        }
    }

    /// Read and deserialize the value under `key`. An absent key returns
    /// `default` unchanged; malformed stored text also falls back to
    /// `default` after logging what was wrong.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(text) = self.backend.read(key) else {
            return default;
        };

        match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("malformed stored value under key '{key}': {e}");
                default
            }
        }
    }
}

/// In-memory backend with injectable write failure.
#[derive(Default)]
pub struct MemoryBackend {
    map: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail, simulating quota exhaustion or
    /// disabled storage.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Seed raw (pre-serialized) text, bypassing the JSON envelope.
    pub fn seed_raw(&self, key: &str, text: &str) {
        self.map.borrow_mut().insert(key.to_string(), text.to_string());
    }
}

impl Backend for MemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, text: &str) -> Result<(), String> {
        if self.fail_writes.get() {
            return Err("write failure injected".to_string());
        }
        self.map.borrow_mut().insert(key.to_string(), text.to_string());
        Ok(())
    }
}

/// LocalStorage backend (WASM only). Holds the storage handle resolved at
/// startup; a page with storage disabled degrades to an always-failing
/// backend rather than a crash.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn acquire() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable; preferences will not persist");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl Backend for LocalStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, text: &str) -> Result<(), String> {
        let Some(storage) = self.storage.as_ref() else {
            return Err("LocalStorage unavailable".to_string());
        };
        storage
            .set_item(key, text)
            .map_err(|e| format!("setItem failed: {e:?}"))
    }
}
