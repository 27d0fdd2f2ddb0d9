//! Supported languages and detection.

use serde::{Deserialize, Serialize};

/// Environment variable holding the preferred language code.
pub const LANGUAGE_ENV: &str = "CORETABS_LANG";

/// A language with a bundled string table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Id,
}

impl Language {
    pub const ALL: [Self; 2] = [Self::En, Self::Id];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Id => "id",
        }
    }

    /// Exact, case-insensitive code match (`"en"`, `"ID"`).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Label shown on the language toggle.
    #[must_use]
    pub const fn toggle_label(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Id => "ID",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Pick the session language.
///
/// A saved, supported choice wins; otherwise a locale starting with `id`
/// (`id`, `id-ID`, `id_ID.UTF-8`) selects Indonesian; everything else is
/// English.
#[must_use]
pub fn detect_language(saved: Option<&str>, locale: Option<&str>) -> Language {
    if let Some(lang) = saved.and_then(Language::from_code) {
        return lang;
    }
    match locale {
        Some(locale) if locale.trim().to_ascii_lowercase().starts_with("id") => Language::Id,
        _ => Language::En,
    }
}

/// [`detect_language`] using `CORETABS_LANG` as the saved choice and
/// `LC_ALL`/`LANG` as the locale, read through `get_env`.
pub fn detect_language_from_env<F>(get_env: F) -> Language
where
    F: Fn(&str) -> Option<String>,
{
    let saved = get_env(LANGUAGE_ENV);
    let locale = get_env("LC_ALL")
        .filter(|v| !v.is_empty())
        .or_else(|| get_env("LANG"));
    detect_language(saved.as_deref(), locale.as_deref())
}
