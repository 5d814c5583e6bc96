//! Localized widget copy.
//!
//! Bundles are embedded at compile time. Lookups fall back to Spanish, the
//! storefront's default language, and finally echo the key.
use once_cell::sync::Lazy;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

const DEFAULT_LANG: &str = "es";

static BUNDLES: Lazy<HashMap<&'static str, Value>> = Lazy::new(|| {
    [
        ("es", include_str!("../static/i18n/es.json")),
        ("en", include_str!("../static/i18n/en.json")),
    ]
    .into_iter()
    .filter_map(|(lang, raw)| match serde_json::from_str::<Value>(raw) {
        Ok(value) => Some((lang, value)),
        Err(err) => {
            log::error!("Invalid {lang} translations: {err}");
            None
        }
    })
    .collect()
});

thread_local! {
    static CURRENT: RefCell<String> = RefCell::new(DEFAULT_LANG.to_string());
}

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(obj, |current, part| current.get(part))
}

fn lookup(lang: &str, key: &str) -> Option<String> {
    BUNDLES
        .get(lang)
        .and_then(|bundle| get_nested_value(bundle, key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Switch the active language. Unknown languages are ignored.
pub fn set_lang(lang: &str) {
    if BUNDLES.contains_key(lang) {
        CURRENT.with(|cell| *cell.borrow_mut() = lang.to_string());
    } else {
        log::warn!("No translations for {lang}; keeping {}", current_lang());
    }
}

#[must_use]
pub fn current_lang() -> String {
    CURRENT.with(|cell| cell.borrow().clone())
}

/// Translate `key` (dot-separated) in the active language.
#[must_use]
pub fn t(key: &str) -> String {
    let lang = current_lang();
    lookup(&lang, key)
        .or_else(|| lookup(DEFAULT_LANG, key))
        .unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanish_is_the_default() {
        assert_eq!(current_lang(), "es");
        assert_eq!(t("actions.continue"), "Continuar");
        assert_eq!(t("select.placeholder"), "Selecciona tu banco");
    }

    #[test]
    fn switching_language_and_fallbacks() {
        set_lang("en");
        assert_eq!(t("actions.continue"), "Continue");
        set_lang("xx");
        assert_eq!(current_lang(), "en");
        assert_eq!(t("missing.key"), "missing.key");
        set_lang("es");
    }

    #[test]
    fn every_key_exists_in_both_bundles() {
        fn leaves(prefix: &str, value: &Value, out: &mut Vec<String>) {
            match value {
                Value::Object(map) => {
                    for (k, v) in map {
                        let key = if prefix.is_empty() {
                            k.clone()
                        } else {
                            format!("{prefix}.{k}")
                        };
                        leaves(&key, v, out);
                    }
                }
                _ => out.push(prefix.to_string()),
            }
        }
        let mut keys = Vec::new();
        leaves("", &BUNDLES["es"], &mut keys);
        assert!(!keys.is_empty());
        for key in keys {
            assert!(lookup("en", &key).is_some(), "en is missing {key}");
        }
    }
}
