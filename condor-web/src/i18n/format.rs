#[cfg(target_arch = "wasm32")]
use crate::i18n::bundle::with_bundle;
#[cfg(target_arch = "wasm32")]
use js_sys::Date;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

/// Render an ISO 8601 date (or date-time) as a local date in the active language.
///
/// Outside the browser, and whenever the date cannot be parsed, the date part of the
/// input comes back unchanged.
#[must_use]
pub fn fmt_date_iso(date_iso: &str) -> String {
    let date_part = date_iso.split('T').next().unwrap_or(date_iso).trim();
    #[cfg(target_arch = "wasm32")]
    {
        with_bundle(|bundle| {
            let date = Date::new(&JsValue::from_str(date_iso));
            if date.get_time().is_nan() {
                return date_part.to_string();
            }
            date.to_locale_date_string(&bundle.lang, &JsValue::UNDEFINED)
                .as_string()
                .unwrap_or_else(|| date_part.to_string())
        })
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        date_part.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_dates_keep_the_day() {
        assert_eq!(fmt_date_iso("2024-03-01T10:15:00Z"), "2024-03-01");
        assert_eq!(fmt_date_iso("2024-03-01"), "2024-03-01");
    }
}
