#![forbid(unsafe_code)]

//! The render tree.
//!
//! A [`RenderNode`] is a pure value describing *what* to show for a JSON
//! payload; how it is drawn (HTML, terminal, spreadsheet) is up to the
//! view layer. Nodes serialize with an explicit `kind` tag so hosts in any
//! language can walk them.

use serde::{Deserialize, Serialize};

/// Reason carried by an [`RenderNode::Empty`] produced for `[]`.
pub const EMPTY_ARRAY: &str = "empty array";
/// Reason carried by an [`RenderNode::Empty`] produced for `{}`.
pub const EMPTY_OBJECT: &str = "empty object";

/// Header pair used for key/value tables.
pub const PROPERTY_COLUMNS: [&str; 2] = ["Property", "Value"];

/// A node of the render tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderNode {
    /// A titled block.
    Section { title: String, body: Box<RenderNode> },
    /// Rows of cells; every row has exactly `columns.len()` cells.
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<Cell>>,
    },
    List { items: Vec<Cell> },
    Scalar { value: Cell },
    Empty { reason: String },
}

/// A single displayable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Cell {
    Text(String),
    /// Same as `Text`, with a hint that the view should word-wrap.
    LongText(String),
    Boolean(bool),
    /// Not available: null or missing.
    Na,
    /// Pretty-printed JSON, shown as a preformatted block.
    Json(String),
    Nested(Box<RenderNode>),
}

/// Words used when a cell is flattened to plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellLabels {
    pub yes: String,
    pub no: String,
    pub na: String,
}

impl Default for CellLabels {
    fn default() -> Self {
        Self {
            yes: "Yes".to_string(),
            no: "No".to_string(),
            na: "N/A".to_string(),
        }
    }
}

impl CellLabels {
    #[must_use]
    pub fn new(yes: impl Into<String>, no: impl Into<String>, na: impl Into<String>) -> Self {
        Self {
            yes: yes.into(),
            no: no.into(),
            na: na.into(),
        }
    }

    #[must_use]
    pub fn boolean(&self, value: bool) -> &str {
        if value { &self.yes } else { &self.no }
    }
}

impl RenderNode {
    #[must_use]
    pub fn section(title: impl Into<String>, body: RenderNode) -> Self {
        Self::Section {
            title: title.into(),
            body: Box::new(body),
        }
    }

    #[must_use]
    pub fn empty(reason: impl Into<String>) -> Self {
        Self::Empty {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn scalar(value: Cell) -> Self {
        Self::Scalar { value }
    }

    /// A two-column `Property`/`Value` table.
    #[must_use]
    pub fn properties(rows: Vec<[Cell; 2]>) -> Self {
        Self::Table {
            columns: PROPERTY_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
            rows: rows.into_iter().map(Vec::from).collect(),
        }
    }

    /// Stable name of the variant, used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Section { .. } => "section",
            Self::Table { .. } => "table",
            Self::List { .. } => "list",
            Self::Scalar { .. } => "scalar",
            Self::Empty { .. } => "empty",
        }
    }

    /// Title when this is a section.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Section { title, .. } => Some(title),
            _ => None,
        }
    }

    /// Body of a section, or the node itself.
    #[must_use]
    pub fn content(&self) -> &RenderNode {
        match self {
            Self::Section { body, .. } => body,
            other => other,
        }
    }

    /// One-line rendition used when a node is shown inside a cell.
    ///
    /// Key/value tables become `{k: v, ...}`, lists `[a, b]`, other tables
    /// a row count, empty nodes their capitalized reason.
    #[must_use]
    pub fn summary(&self, labels: &CellLabels) -> String {
        match self {
            Self::Section { title, body } => format!("{title}: {}", body.summary(labels)),
            Self::Table { columns, rows } if is_property_table(columns) => {
                let pairs: Vec<String> = rows
                    .iter()
                    .filter_map(|row| match row.as_slice() {
                        [key, value] => Some(format!(
                            "{}: {}",
                            key.plain_text(labels),
                            value.plain_text(labels)
                        )),
                        _ => None,
                    })
                    .collect();
                format!("{{{}}}", pairs.join(", "))
            }
            Self::Table { rows, .. } => match rows.len() {
                1 => "1 row".to_string(),
                n => format!("{n} rows"),
            },
            Self::List { items } => {
                let items: Vec<String> = items.iter().map(|c| c.plain_text(labels)).collect();
                format!("[{}]", items.join(", "))
            }
            Self::Scalar { value } => value.plain_text(labels),
            Self::Empty { reason } => capitalize(reason),
        }
    }
}

impl Cell {
    /// Text or long text depending on the character count.
    #[must_use]
    pub fn text(value: impl Into<String>, long_text_threshold: usize) -> Self {
        let value = value.into();
        if value.chars().count() > long_text_threshold {
            Self::LongText(value)
        } else {
            Self::Text(value)
        }
    }

    /// The cell as a single string.
    #[must_use]
    pub fn plain_text(&self, labels: &CellLabels) -> String {
        match self {
            Self::Text(s) | Self::LongText(s) | Self::Json(s) => s.clone(),
            Self::Boolean(b) => labels.boolean(*b).to_string(),
            Self::Na => labels.na.clone(),
            Self::Nested(node) => node.summary(labels),
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::LongText(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_na(&self) -> bool {
        matches!(self, Self::Na)
    }
}

fn is_property_table(columns: &[String]) -> bool {
    columns.len() == 2 && columns[0] == PROPERTY_COLUMNS[0] && columns[1] == PROPERTY_COLUMNS[1]
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_text_threshold_counts_chars() {
        assert_eq!(Cell::text("abc", 3), Cell::Text("abc".into()));
        assert_eq!(Cell::text("abcd", 3), Cell::LongText("abcd".into()));
        // Four chars, twelve bytes.
        assert_eq!(Cell::text("日本語だ", 4), Cell::Text("日本語だ".into()));
    }

    #[test]
    fn plain_text_uses_labels() {
        let en = CellLabels::default();
        assert_eq!(Cell::Boolean(true).plain_text(&en), "Yes");
        assert_eq!(Cell::Boolean(false).plain_text(&en), "No");
        assert_eq!(Cell::Na.plain_text(&en), "N/A");

        let id = CellLabels::new("Ya", "Tidak", "T/A");
        assert_eq!(Cell::Boolean(true).plain_text(&id), "Ya");
        assert_eq!(Cell::Na.plain_text(&id), "T/A");
    }

    #[test]
    fn summaries() {
        let labels = CellLabels::default();
        let props = RenderNode::properties(vec![
            [Cell::Text("a".into()), Cell::Text("1".into())],
            [Cell::Text("b".into()), Cell::Boolean(true)],
        ]);
        assert_eq!(props.summary(&labels), "{a: 1, b: Yes}");
        assert_eq!(RenderNode::empty(EMPTY_ARRAY).summary(&labels), "Empty array");
        let list = RenderNode::List {
            items: vec![Cell::Text("x".into()), Cell::Na],
        };
        assert_eq!(list.summary(&labels), "[x, N/A]");
        let table = RenderNode::Table {
            columns: vec!["a".into()],
            rows: vec![vec![Cell::Na], vec![Cell::Na]],
        };
        assert_eq!(table.summary(&labels), "2 rows");
    }

    #[test]
    fn section_accessors() {
        let node = RenderNode::section("Docs", RenderNode::empty(EMPTY_ARRAY));
        assert_eq!(node.title(), Some("Docs"));
        assert_eq!(node.content(), &RenderNode::empty(EMPTY_ARRAY));
        assert_eq!(node.kind(), "section");
        assert_eq!(node.content().kind(), "empty");
    }

    #[test]
    fn serializes_with_kind_tags() {
        let node = RenderNode::section(
            "T",
            RenderNode::List {
                items: vec![Cell::Boolean(true), Cell::Na],
            },
        );
        let json = serde_json::to_value(&node).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "section",
                "title": "T",
                "body": {
                    "kind": "list",
                    "items": [{"kind": "boolean", "value": true}, {"kind": "na"}]
                }
            })
        );
        let back: RenderNode = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, node);
    }
}
