//! String catalog with an ordered fallback chain.
//!
//! # Invariants
//!
//! 1. **Fallback chain terminates**: a lookup tries the requested locale,
//!    then each fallback locale once, and returns `None` if none has the key.
//! 2. **Empty strings are misses**: an empty translation never shadows a
//!    fallback.
//! 3. **Immutable after construction**: `StringCatalog` is `Send + Sync`.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing key | Key not in any locale | Returns `None` |
//! | Missing locale | Locale not loaded | Falls through chain |
//! | Malformed table | JSON is not an object of strings | `I18nError` at load |

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

/// Errors from loading locale tables.
#[derive(Debug, Error)]
pub enum I18nError {
    #[error("locale table for '{locale}' is not valid JSON: {source}")]
    Parse {
        locale: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("locale table for '{locale}' must be a JSON object")]
    NotAnObject { locale: String },

    #[error("entry '{key}' in locale '{locale}' is not a string")]
    NonStringEntry { locale: String, key: String },
}

/// Strings for a single locale.
#[derive(Debug, Clone, Default)]
pub struct LocaleStrings {
    strings: HashMap<String, String>,
}

impl LocaleStrings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat `{ "key": "text" }` JSON table.
    pub fn from_json(locale: &str, raw: &str) -> Result<Self, I18nError> {
        let value: Value = serde_json::from_str(raw).map_err(|source| I18nError::Parse {
            locale: locale.to_string(),
            source,
        })?;
        let Value::Object(fields) = value else {
            return Err(I18nError::NotAnObject {
                locale: locale.to_string(),
            });
        };

        let mut strings = HashMap::with_capacity(fields.len());
        for (key, text) in fields {
            let Value::String(text) = text else {
                return Err(I18nError::NonStringEntry {
                    locale: locale.to_string(),
                    key,
                });
            };
            strings.insert(key, text);
        }
        Ok(Self { strings })
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings
            .get(key)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strings.keys().map(String::as_str)
    }
}

/// Central string catalog.
///
/// # Example
///
/// ```
/// use coretabs_i18n::{LocaleStrings, StringCatalog};
///
/// let mut en = LocaleStrings::new();
/// en.insert("download", "Download");
/// let mut id = LocaleStrings::new();
/// id.insert("download", "Unduh");
///
/// let mut catalog = StringCatalog::new();
/// catalog.add_locale("en", en);
/// catalog.add_locale("id", id);
/// catalog.set_fallback_chain(vec!["en".into()]);
///
/// assert_eq!(catalog.get("id", "download"), Some("Unduh"));
/// assert_eq!(catalog.get("fr", "download"), Some("Download"));
/// assert_eq!(catalog.get("id", "missing"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringCatalog {
    locales: HashMap<String, LocaleStrings>,
    fallback_chain: Vec<String>,
}

impl StringCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled English and Indonesian tables, falling back to English.
    pub fn bundled() -> Result<Self, I18nError> {
        let mut catalog = Self::new();
        catalog.add_locale("en", LocaleStrings::from_json("en", include_str!("../locales/en.json"))?);
        catalog.add_locale("id", LocaleStrings::from_json("id", include_str!("../locales/id.json"))?);
        catalog.set_fallback_chain(vec!["en".to_string()]);
        Ok(catalog)
    }

    pub fn add_locale(&mut self, locale: impl Into<String>, strings: LocaleStrings) {
        self.locales.insert(locale.into(), strings);
    }

    /// Locales tried, in order, after the requested one.
    pub fn set_fallback_chain(&mut self, chain: Vec<String>) {
        self.fallback_chain = chain;
    }

    #[must_use]
    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    #[must_use]
    pub fn locale(&self, locale: &str) -> Option<&LocaleStrings> {
        self.locales.get(locale)
    }

    /// Look up `key` in `locale`, then along the fallback chain.
    #[must_use]
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        std::iter::once(locale)
            .chain(self.fallback_chain.iter().map(String::as_str))
            .find_map(|loc| self.locales.get(loc).and_then(|strings| strings.get(key)))
    }

    /// Keys present in `reference` but missing from `locale`, sorted.
    #[must_use]
    pub fn missing_keys(&self, locale: &str, reference: &str) -> Vec<String> {
        let Some(reference) = self.locales.get(reference) else {
            return Vec::new();
        };
        let target = self.locales.get(locale);
        let mut missing: Vec<String> = reference
            .keys()
            .filter(|key| target.and_then(|t| t.get(key)).is_none())
            .map(str::to_string)
            .collect();
        missing.sort();
        missing
    }
}
