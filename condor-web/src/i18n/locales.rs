use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocaleMeta {
    pub code: &'static str,
    pub name: &'static str,
}

pub const LOCALE_META: &[LocaleMeta] = &[
    LocaleMeta {
        code: "es",
        name: "Español",
    },
    LocaleMeta {
        code: "en",
        name: "English",
    },
];

const LOCALE_TABLE: &[(&str, &str)] = &[
    ("es", include_str!("../../i18n/es.json")),
    ("en", include_str!("../../i18n/en.json")),
];

/// Locales offered by the header selector, default first.
#[must_use]
pub const fn locales() -> &'static [LocaleMeta] {
    LOCALE_META
}

#[must_use]
pub fn is_supported(lang: &str) -> bool {
    LOCALE_META.iter().any(|meta| meta.code == lang)
}

/// Parsed bundle for `lang`; `None` for codes we do not ship.
pub fn load_translations(lang: &str) -> Option<Value> {
    let data = LOCALE_TABLE
        .iter()
        .find_map(|(code, data)| (*code == lang).then_some(*data))?;
    match serde_json::from_str(data) {
        Ok(value) => Some(value),
        Err(err) => {
            log::error!("translation bundle {lang} is malformed: {err}");
            None
        }
    }
}
