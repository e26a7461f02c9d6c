#![forbid(unsafe_code)]
//! Condor Web
//!
//! Yew front-end for the Condor trekking platform. Business rules live in `condor-core`;
//! this crate supplies the browser pieces (local storage, fetch, console logging) and
//! the screens built on top of them.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod app;
pub mod components;
pub mod dom;
pub mod i18n;
pub mod logging;
pub mod pages;
pub mod paths;
pub mod router;
pub mod storage;
pub mod transport;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init();
    // Apply <html lang, dir> for the saved locale before the first paint.
    crate::i18n::set_lang(&crate::i18n::current_lang());
    yew::Renderer::<app::App>::new().render();
}
