use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Keys persisted in the browser key-value store.
pub mod keys {
    pub const SESSION_ACTIVE: &str = "sesionIniciada";
    pub const CURRENT_EMAIL: &str = "usuarioActual";
    pub const CACHED_PROFILE: &str = "usuarioDTO";
    pub const TOKEN: &str = "token";
    pub const KNOWN_USERS: &str = "usuarios";
    pub const RECOVERY_MESSAGE: &str = "recoveryMessage";

    /// Keys whose mutation changes the derived session state.
    pub const SESSION_KEYS: [&str; 4] = [SESSION_ACTIVE, CURRENT_EMAIL, CACHED_PROFILE, TOKEN];
}

/// Persistent string storage.
///
/// Implementations swallow their own failures: a read that cannot be served is `None`
/// and a write that cannot be performed is dropped.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Decode a JSON value stored under `key`. Malformed content reads as absent.
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("ignoring malformed {key}: {err}");
            None
        }
    }
}

pub fn write_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, &raw),
        Err(err) => log::warn!("could not serialize {key}: {err}"),
    }
}

/// In-process store used off the browser and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        for (key, value) in entries {
            store.set(key, value);
        }
        store
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
