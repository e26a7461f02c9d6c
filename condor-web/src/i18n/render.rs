use crate::i18n::bundle::with_bundle;
use serde_json::Value;

#[cfg(target_arch = "wasm32")]
use js_sys::{Array, Intl, Object};

fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(root, |node, part| node.get(part))
}

fn simple_category(count: f64) -> &'static str {
    if (count - 1.0).abs() < f64::EPSILON {
        "one"
    } else {
        "other"
    }
}

fn plural_category(lang: &str, count: f64) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        let locales = Array::of1(&wasm_bindgen::JsValue::from_str(lang));
        let rules = Intl::PluralRules::new(&locales, &Object::new());
        rules
            .select(count)
            .as_string()
            .unwrap_or_else(|| simple_category(count).to_string())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = lang;
        simple_category(count).to_string()
    }
}

/// Text for `value`. Plural objects pick a branch from the `count` argument and fall
/// back to `_`.
fn render_value(value: &Value, lang: &str, args: &[(&str, &str)]) -> Option<String> {
    let template = match value {
        Value::String(text) => text.clone(),
        Value::Object(forms) => {
            let count = args
                .iter()
                .find(|(name, _)| *name == "count")
                .and_then(|(_, raw)| raw.parse::<f64>().ok());
            count
                .and_then(|n| forms.get(&plural_category(lang, n)))
                .or_else(|| forms.get("_"))
                .and_then(Value::as_str)?
                .to_string()
        }
        _ => return None,
    };
    Some(
        args.iter()
            .fold(template, |text, (name, arg)| text.replace(&format!("{{{name}}}"), arg)),
    )
}

fn resolve(key: &str, args: &[(&str, &str)]) -> Option<String> {
    with_bundle(|bundle| {
        lookup(&bundle.translations, key)
            .and_then(|value| render_value(value, &bundle.lang, args))
            .or_else(|| {
                lookup(&bundle.fallback, key).and_then(|value| render_value(value, "en", args))
            })
    })
}

/// Translate `key` in the active language, falling back to English and then to the key.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, &[])
}

/// Translate `key`, replacing each `{name}` with its argument.
#[must_use]
pub fn tr(key: &str, args: &[(&str, &str)]) -> String {
    resolve(key, args).unwrap_or_else(|| {
        log::debug!("missing translation {key}");
        key.to_string()
    })
}
