//! Renderer thresholds.

use serde::{Deserialize, Serialize};

use crate::humanize::DEFAULT_ABBREVIATIONS;
use crate::node::CellLabels;

/// Tuning constants for [`Renderer`](crate::Renderer).
///
/// The defaults reproduce the portal sidebar's behavior; tests and golden
/// output depend on them, so change them deliberately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Nested objects with at most this many keys are inlined under
    /// `parent.child` keys.
    pub flatten_max_keys: usize,
    /// Nested arrays (or objects) up to this size are shown in full.
    pub inline_max_items: usize,
    /// Items shown before the ellipsis in a truncated summary.
    pub preview_items: usize,
    /// Strings longer than this many characters become `LongText`.
    pub long_text_threshold: usize,
    /// Abbreviations restored after key humanizing, applied in order.
    pub abbreviations: Vec<String>,
    /// Words used when booleans and missing values are folded into text.
    pub labels: CellLabels,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            flatten_max_keys: 3,
            inline_max_items: 3,
            preview_items: 2,
            long_text_threshold: 50,
            abbreviations: DEFAULT_ABBREVIATIONS.iter().map(|a| (*a).to_string()).collect(),
            labels: CellLabels::default(),
        }
    }
}

impl RenderConfig {
    #[must_use]
    pub fn with_flatten_max_keys(mut self, n: usize) -> Self {
        self.flatten_max_keys = n;
        self
    }

    #[must_use]
    pub fn with_inline_max_items(mut self, n: usize) -> Self {
        self.inline_max_items = n;
        self
    }

    #[must_use]
    pub fn with_preview_items(mut self, n: usize) -> Self {
        self.preview_items = n;
        self
    }

    #[must_use]
    pub fn with_long_text_threshold(mut self, n: usize) -> Self {
        self.long_text_threshold = n;
        self
    }

    #[must_use]
    pub fn with_abbreviations<I, S>(mut self, abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abbreviations = abbreviations.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: CellLabels) -> Self {
        self.labels = labels;
        self
    }
}
