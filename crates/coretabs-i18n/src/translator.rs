//! Language-aware lookup over the bundled catalog.

use std::sync::Arc;

use crate::catalog::{I18nError, StringCatalog};
use crate::language::Language;

/// Translates keys for the current language.
///
/// Lookup order: current language, English, the caller's fallback, the key
/// itself. Cloning is cheap; clones share the catalog but each carries its
/// own current language.
#[derive(Debug, Clone)]
pub struct Translator {
    catalog: Arc<StringCatalog>,
    language: Language,
}

impl Translator {
    /// Translator over the bundled tables.
    pub fn bundled(language: Language) -> Result<Self, I18nError> {
        Ok(Self::with_catalog(StringCatalog::bundled()?, language))
    }

    #[must_use]
    pub fn with_catalog(catalog: StringCatalog, language: Language) -> Self {
        Self {
            catalog: Arc::new(catalog),
            language,
        }
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch language by code. Unsupported codes are rejected and leave the
    /// current language unchanged.
    pub fn set_language(&mut self, code: &str) -> bool {
        match Language::from_code(code) {
            Some(lang) => {
                if lang != self.language {
                    tracing::debug!(message = "i18n.language", from = %self.language, to = %lang);
                }
                self.language = lang;
                true
            }
            None => {
                tracing::warn!(message = "i18n.unsupported_language", code);
                false
            }
        }
    }

    /// Translation for `key`, or the key itself.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.lookup(key).unwrap_or(key).to_string()
    }

    /// Translation for `key`, or `fallback`.
    #[must_use]
    pub fn t_or(&self, key: &str, fallback: &str) -> String {
        self.lookup(key).unwrap_or(fallback).to_string()
    }

    /// Translate a status or role label coming from the portal
    /// (`"In Progress"` → key `in_progress`).
    ///
    /// Empty and `N/A` values pass through; unknown labels are returned
    /// unchanged.
    #[must_use]
    pub fn translate_status(&self, status: &str) -> String {
        if status.is_empty() || status == "N/A" {
            return status.to_string();
        }
        let key = status_key(status);
        self.lookup(&key).unwrap_or(status).to_string()
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        self.catalog.get(self.language.code(), key)
    }
}

/// Lower-case and join whitespace runs with `_`.
fn status_key(status: &str) -> String {
    status
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
