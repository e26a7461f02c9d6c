use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Storage, Window};

/// The global `window`, when running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("no browser window")]
    NoWindow,
    #[error("localStorage is not provided")]
    Missing,
    #[error("localStorage access denied: {0}")]
    Denied(String),
}

/// Access the browser `localStorage` handle.
///
/// # Errors
/// Returns an error if there is no window or `localStorage` is unavailable (private
/// mode, disabled storage).
pub fn local_storage() -> Result<Storage, StorageError> {
    window()
        .ok_or(StorageError::NoWindow)?
        .local_storage()
        .map_err(|err| StorageError::Denied(js_error_message(&err)))?
        .ok_or(StorageError::Missing)
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Native confirmation dialog. Outside a browser nothing is confirmed.
#[must_use]
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|win| win.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Jump to the top of the page after a route change.
pub fn scroll_to_top() {
    if let Some(win) = window() {
        win.scroll_to_with_x_and_y(0.0, 0.0);
    }
}
