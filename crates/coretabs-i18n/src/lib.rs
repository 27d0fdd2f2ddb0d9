#![forbid(unsafe_code)]

//! Internationalization for CoreTabs.
//!
//! Provides the bundled English and Indonesian string tables, key lookup
//! with an English fallback, language detection, and the status-label
//! translation used by the case, document and user views.

pub mod catalog;
pub mod language;
pub mod translator;

pub use catalog::{I18nError, LocaleStrings, StringCatalog};
pub use language::{Language, detect_language, detect_language_from_env};
pub use translator::Translator;
