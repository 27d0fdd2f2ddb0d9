//! Turning payload keys into row labels.

/// Abbreviations kept upper-case by default, in the order they are restored.
pub const DEFAULT_ABBREVIATIONS: [&str; 6] = ["TIN", "NIK", "KLU", "URL", "ID", "API"];

/// Separator shown between the segments of a flattened key.
pub const PATH_SEPARATOR: &str = " → ";

/// Humanize a (possibly flattened) key.
///
/// `caseNumber` → `Case Number`, `taxpayer.TIN` → `Taxpayer → TIN`,
/// `UserID` → `User ID`.
///
/// ```
/// use coretabs_render::humanize_key;
/// use coretabs_render::humanize::DEFAULT_ABBREVIATIONS;
///
/// assert_eq!(humanize_key("CaseNumber", &DEFAULT_ABBREVIATIONS), "Case Number");
/// assert_eq!(humanize_key("meta.apiURL", &DEFAULT_ABBREVIATIONS), "Meta → api URL");
/// ```
#[must_use]
pub fn humanize_key<S: AsRef<str>>(key: &str, abbreviations: &[S]) -> String {
    let mut spaced = String::with_capacity(key.len() + 8);
    let mut prev: Option<char> = None;
    for ch in key.chars() {
        if ch == '.' {
            spaced.push_str(PATH_SEPARATOR);
            prev = Some(' ');
            continue;
        }
        if ch.is_ascii_uppercase() && prev.is_some_and(|p| !p.is_whitespace()) {
            spaced.push(' ');
        }
        spaced.push(ch);
        prev = Some(ch);
    }

    let mut label = crate::node::capitalize(spaced.trim());
    for abbr in abbreviations {
        let abbr = abbr.as_ref();
        if abbr.chars().count() < 2 {
            continue;
        }
        let split = spell_out(abbr);
        if label.contains(&split) {
            label = label.replace(&split, abbr);
        }
    }
    label
}

/// `"TIN"` → `"T I N"`, the shape capital-splitting leaves behind.
fn spell_out(abbr: &str) -> String {
    let mut out = String::with_capacity(abbr.len() * 2);
    for (i, ch) in abbr.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
