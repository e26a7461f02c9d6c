//! `localStorage`-backed [`KeyValueStore`].
//!
//! Values are stored as raw strings so the keys stay readable by anything else on the
//! page (`sesionIniciada` is `"true"`, not `"\"true\""`). Blocked storage reads as empty
//! and writes are dropped with a warning. Outside a browser the store keeps its entries in
//! memory.

use condor_core::KeyValueStore;
#[cfg(not(target_arch = "wasm32"))]
use condor_core::MemoryStore;

#[derive(Debug, Default)]
pub struct BrowserStore {
    #[cfg(not(target_arch = "wasm32"))]
    fallback: MemoryStore,
}

impl BrowserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// The `localStorage` handle, or `None` with a warning when the browser refuses access.
#[cfg(any(test, target_arch = "wasm32"))]
fn storage(op: &str, key: &str) -> Option<web_sys::Storage> {
    crate::dom::local_storage()
        .map_err(|err| log::warn!("skipping {op} {key}: {err}"))
        .ok()
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        storage("get", key)?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(handle) = storage("set", key) else {
            return;
        };
        if let Err(err) = handle.set_item(key, value) {
            log::warn!(
                "could not persist {key}: {}",
                crate::dom::js_error_message(&err)
            );
        }
    }

    fn remove(&self, key: &str) {
        if let Some(handle) = storage("remove", key) {
            let _ = handle.remove_item(key);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.fallback.get(key)
    }

    fn set(&self, key: &str, value: &str) {
        self.fallback.set(key, value);
    }

    fn remove(&self, key: &str) {
        self.fallback.remove(key);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn unavailable_storage_is_swallowed() {
        assert!(matches!(
            crate::dom::local_storage(),
            Err(crate::dom::StorageError::NoWindow)
        ));
        assert!(storage("get", "sesionIniciada").is_none());
    }

    #[test]
    fn native_store_round_trips_raw_strings() {
        let store = BrowserStore::new();
        store.set("sesionIniciada", "true");
        assert_eq!(store.get("sesionIniciada").as_deref(), Some("true"));
        store.remove("sesionIniciada");
        assert_eq!(store.get("sesionIniciada"), None);
    }
}
