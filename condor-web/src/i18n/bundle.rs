use crate::i18n::locales::{is_supported, load_translations};
use serde_json::Value;
use std::cell::RefCell;

pub const DEFAULT_LANG: &str = "es";
const FALLBACK_LANG: &str = "en";

/// Storage key holding the chosen UI language.
pub const LOCALE_KEY: &str = "condor.locale";

pub struct I18nBundle {
    pub lang: String,
    pub translations: Value,
    pub fallback: Value,
}

fn empty() -> Value {
    Value::Object(serde_json::Map::new())
}

fn build_bundle(lang: &str) -> Option<I18nBundle> {
    let translations = load_translations(lang)?;
    let fallback = load_translations(FALLBACK_LANG).unwrap_or_else(empty);
    Some(I18nBundle {
        lang: lang.to_string(),
        translations,
        fallback,
    })
}

fn default_bundle() -> I18nBundle {
    build_bundle(DEFAULT_LANG).unwrap_or_else(|| I18nBundle {
        lang: DEFAULT_LANG.to_string(),
        translations: empty(),
        fallback: empty(),
    })
}

fn saved_lang() -> String {
    #[cfg(all(not(test), target_arch = "wasm32"))]
    {
        crate::dom::local_storage()
            .ok()
            .and_then(|storage| storage.get_item(LOCALE_KEY).ok().flatten())
            .filter(|lang| is_supported(lang))
            .unwrap_or_else(|| DEFAULT_LANG.to_string())
    }

    #[cfg(any(test, not(target_arch = "wasm32")))]
    {
        DEFAULT_LANG.to_string()
    }
}

thread_local! {
    pub(super) static CURRENT: RefCell<I18nBundle> = RefCell::new(
        build_bundle(&saved_lang()).unwrap_or_else(default_bundle)
    );
}

pub(super) fn with_bundle<R>(f: impl FnOnce(&I18nBundle) -> R) -> R {
    CURRENT.with(|cell| f(&cell.borrow()))
}

/// Switch the active language, update `<html lang>` and remember the choice.
///
/// Unsupported codes are ignored.
pub fn set_lang(lang: &str) {
    if !is_supported(lang) {
        log::warn!("ignoring unsupported language {lang}");
        return;
    }
    let Some(bundle) = build_bundle(lang) else {
        return;
    };
    CURRENT.with(|cell| cell.replace(bundle));
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(el) = crate::dom::document().and_then(|doc| doc.document_element()) {
            let _ = el.set_attribute("lang", lang);
        }
        match crate::dom::local_storage() {
            Ok(storage) => {
                if let Err(err) = storage.set_item(LOCALE_KEY, lang) {
                    log::warn!(
                        "could not persist language: {}",
                        crate::dom::js_error_message(&err)
                    );
                }
            }
            Err(err) => log::warn!("could not persist language: {err}"),
        }
    }
}

#[must_use]
pub fn current_lang() -> String {
    with_bundle(|bundle| bundle.lang.clone())
}
