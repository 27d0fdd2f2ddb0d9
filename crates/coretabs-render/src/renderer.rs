#![forbid(unsafe_code)]

//! JSON → [`RenderNode`] dispatch.
//!
//! # Invariants
//!
//! 1. **Totality**: every `serde_json::Value` renders; nothing here panics
//!    or performs I/O. JSON-looking strings that fail to parse fall back to
//!    plain text.
//! 2. **Rectangular tables**: every row has one cell per column.
//! 3. **Bounded cells**: nested arrays and objects above
//!    `inline_max_items` collapse into a summary naming the total count and
//!    exactly `preview_items` formatted entries followed by `...`.
//! 4. **Determinism**: the same value, title and config always produce the
//!    same tree.

use std::collections::HashSet;

use coretabs_format::{DateFormatter, ShortDate};
use serde_json::{Map, Number, Value};

use crate::config::RenderConfig;
use crate::flatten::flatten_object;
use crate::humanize::humanize_key;
use crate::node::{Cell, EMPTY_ARRAY, EMPTY_OBJECT, RenderNode};

/// Render `value` under `title` with the default configuration.
///
/// ```
/// use coretabs_render::{Cell, RenderNode, render};
/// use serde_json::json;
///
/// let node = render(&json!([]), "Documents");
/// assert_eq!(node, RenderNode::section("Documents", RenderNode::empty("empty array")));
/// assert_eq!(render(&json!(null), "x"), RenderNode::scalar(Cell::Na));
/// ```
#[must_use]
pub fn render(value: &Value, title: &str) -> RenderNode {
    Renderer::new().render(value, title)
}

/// Configured renderer.
///
/// `D` formats ISO timestamps found in string leaves; the default prints
/// `DD/MM/YYYY`.
#[derive(Debug, Clone)]
pub struct Renderer<D = ShortDate> {
    config: RenderConfig,
    dates: D,
}

impl Default for Renderer<ShortDate> {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer<ShortDate> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: RenderConfig::default(),
            dates: ShortDate::new(),
        }
    }
}

impl<D: DateFormatter> Renderer<D> {
    #[must_use]
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Swap the date formatter.
    #[must_use]
    pub fn with_date_formatter<E: DateFormatter>(self, dates: E) -> Renderer<E> {
        Renderer {
            config: self.config,
            dates,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render a top-level value.
    #[must_use]
    pub fn render(&self, value: &Value, title: &str) -> RenderNode {
        let span = tracing::debug_span!("render", title, kind = value_kind(value));
        let _guard = span.enter();

        let node = match value {
            Value::Null => RenderNode::scalar(Cell::Na),
            Value::Array(items) => self.render_array(items, title),
            Value::Object(map) => self.render_object(map, title),
            other => RenderNode::section(title, RenderNode::scalar(self.cell(other))),
        };
        tracing::trace!(message = "render.done", node = node.kind());
        node
    }

    /// Render a value that may be absent; `None` behaves like null.
    #[must_use]
    pub fn render_opt(&self, value: Option<&Value>, title: &str) -> RenderNode {
        match value {
            Some(value) => self.render(value, title),
            None => RenderNode::scalar(Cell::Na),
        }
    }

    /// Format a single leaf value.
    #[must_use]
    pub fn cell(&self, value: &Value) -> Cell {
        match value {
            Value::Null => Cell::Na,
            Value::Bool(b) => Cell::Boolean(*b),
            Value::Number(n) => self.text(number_text(n)),
            Value::String(s) => self.string_cell(s),
            Value::Array(items) => self.array_cell(items),
            Value::Object(map) => self.object_cell(map),
        }
    }

    fn render_array(&self, items: &[Value], title: &str) -> RenderNode {
        let Some(first) = items.first() else {
            return RenderNode::section(title, RenderNode::empty(EMPTY_ARRAY));
        };
        if !first.is_object() {
            tracing::trace!(message = "render.list", items = items.len());
            let items = items.iter().map(|item| self.cell(item)).collect();
            return RenderNode::section(title, RenderNode::List { items });
        }

        let columns = column_union(items);
        let rows = items
            .iter()
            .map(|item| match item {
                Value::Object(map) => columns
                    .iter()
                    .map(|col| map.get(col).map_or(Cell::Na, |v| self.cell(v)))
                    .collect(),
                _ => vec![Cell::Na; columns.len()],
            })
            .collect();
        tracing::trace!(
            message = "render.table",
            columns = columns.len(),
            rows = items.len()
        );
        RenderNode::section(title, RenderNode::Table { columns, rows })
    }

    fn render_object(&self, map: &Map<String, Value>, title: &str) -> RenderNode {
        let rows: Vec<[Cell; 2]> = flatten_object(map, self.config.flatten_max_keys)
            .into_iter()
            .filter(|(_, value)| !is_nullish(value))
            .map(|(key, value)| {
                [
                    Cell::Text(humanize_key(&key, self.config.abbreviations.as_slice())),
                    self.cell(value),
                ]
            })
            .collect();
        if rows.is_empty() {
            return RenderNode::section(title, RenderNode::empty(EMPTY_OBJECT));
        }
        tracing::trace!(message = "render.properties", rows = rows.len());
        RenderNode::section(title, RenderNode::properties(rows))
    }

    fn string_cell(&self, s: &str) -> Cell {
        if is_timestamp(s) {
            return Cell::Text(self.dates.format_date(s));
        }
        if looks_like_json(s) {
            match serde_json::from_str::<Value>(s) {
                Ok(parsed) => {
                    if let Ok(pretty) = serde_json::to_string_pretty(&parsed) {
                        return Cell::Json(pretty);
                    }
                }
                Err(err) => {
                    tracing::trace!(message = "render.json_fallback", error = %err);
                }
            }
        }
        self.text(s)
    }

    fn array_cell(&self, items: &[Value]) -> Cell {
        if items.is_empty() {
            return Cell::Nested(Box::new(RenderNode::empty(EMPTY_ARRAY)));
        }
        let labels = &self.config.labels;
        if items.len() <= self.config.inline_max_items {
            let parts: Vec<String> = items
                .iter()
                .map(|item| self.cell(item).plain_text(labels))
                .collect();
            return self.text(parts.join(", "));
        }
        let preview: Vec<String> = items
            .iter()
            .take(self.config.preview_items)
            .map(|item| self.cell(item).plain_text(labels))
            .collect();
        self.text(format!(
            "Array ({} items): {}...",
            items.len(),
            preview.join(", ")
        ))
    }

    fn object_cell(&self, map: &Map<String, Value>) -> Cell {
        let entries: Vec<(&String, &Value)> = map.iter().filter(|(_, v)| !v.is_null()).collect();
        if entries.is_empty() {
            return Cell::Nested(Box::new(RenderNode::empty(EMPTY_OBJECT)));
        }
        if entries.len() <= self.config.inline_max_items {
            let rows = entries
                .into_iter()
                .map(|(key, value)| [Cell::Text(key.clone()), self.cell(value)])
                .collect();
            return Cell::Nested(Box::new(RenderNode::properties(rows)));
        }
        let labels = &self.config.labels;
        let preview: Vec<String> = entries
            .iter()
            .take(self.config.preview_items)
            .map(|(key, value)| format!("{key}: {}", self.cell(value).plain_text(labels)))
            .collect();
        self.text(format!(
            "Object with {} properties: {}...",
            entries.len(),
            preview.join(", ")
        ))
    }

    fn text(&self, s: impl Into<String>) -> Cell {
        Cell::text(s, self.config.long_text_threshold)
    }
}

/// Keys of every object element, in first-seen order.
fn column_union(items: &[Value]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if seen.insert(key.as_str()) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

fn is_nullish(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s == "null",
        _ => false,
    }
}

/// `YYYY-MM-DDTHH:MM:SS` prefix.
fn is_timestamp(s: &str) -> bool {
    const PATTERN: &[u8; 19] = b"dddd-dd-ddTdd:dd:dd";
    let bytes = s.as_bytes();
    bytes.len() >= PATTERN.len()
        && PATTERN.iter().zip(bytes).all(|(p, b)| match *p {
            b'd' => b.is_ascii_digit(),
            other => other == *b,
        })
}

fn looks_like_json(s: &str) -> bool {
    (s.starts_with('{') && s.ends_with('}')) || (s.starts_with('[') && s.ends_with(']'))
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64()
            .map_or_else(|| n.to_string(), coretabs_format::format_number)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(node: &RenderNode) -> &RenderNode {
        node.content()
    }

    fn rows(node: &RenderNode) -> &[Vec<Cell>] {
        match body(node) {
            RenderNode::Table { rows, .. } => rows,
            other => panic!("expected table, got {other:?}"),
        }
    }

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn null_is_bare_na() {
        assert_eq!(render(&Value::Null, "T"), RenderNode::scalar(Cell::Na));
        assert_eq!(Renderer::new().render_opt(None, "T"), RenderNode::scalar(Cell::Na));
    }

    #[test]
    fn primitives_are_titled_scalars() {
        assert_eq!(
            render(&json!(42), "Answer"),
            RenderNode::section("Answer", RenderNode::scalar(text("42")))
        );
        assert_eq!(
            render(&json!(false), "Flag"),
            RenderNode::section("Flag", RenderNode::scalar(Cell::Boolean(false)))
        );
    }

    #[test]
    fn primitive_arrays_are_lists() {
        let node = render(&json!([1, "two", true, null]), "L");
        assert_eq!(
            body(&node),
            &RenderNode::List {
                items: vec![text("1"), text("two"), Cell::Boolean(true), Cell::Na]
            }
        );
    }

    #[test]
    fn non_object_rows_are_all_na() {
        let node = render(&json!([{"a": 1}, 7]), "T");
        assert_eq!(rows(&node)[1], vec![Cell::Na]);
    }

    #[test]
    fn null_and_literal_null_strings_are_dropped() {
        let node = render(&json!({"a": null, "b": "null", "c": "x"}), "T");
        assert_eq!(rows(&node), &[vec![text("C"), text("x")]]);
    }

    #[test]
    fn only_nulls_is_empty_object() {
        let node = render(&json!({"a": null, "b": "null"}), "T");
        assert_eq!(body(&node), &RenderNode::empty(EMPTY_OBJECT));
        let node = render(&json!({}), "T");
        assert_eq!(body(&node), &RenderNode::empty(EMPTY_OBJECT));
    }

    #[test]
    fn timestamps_use_the_date_formatter() {
        let r = Renderer::new();
        assert_eq!(r.cell(&json!("2024-01-15T10:30:00Z")), text("15/01/2024"));
        assert_eq!(r.cell(&json!("2024-13-45T10:30:00")), text("N/A"));
        // Date without time is not a timestamp.
        assert_eq!(r.cell(&json!("2024-01-15")), text("2024-01-15"));

        let r = Renderer::new().with_date_formatter(|s: &str| format!("<{s}>"));
        assert_eq!(
            r.cell(&json!("2024-01-15T10:30:00")),
            text("<2024-01-15T10:30:00>")
        );
    }

    #[test]
    fn json_strings_are_pretty_printed() {
        let r = Renderer::new();
        assert_eq!(r.cell(&json!(r#"{"a":1}"#)), Cell::Json("{\n  \"a\": 1\n}".into()));
        assert_eq!(r.cell(&json!("[1,2]")), Cell::Json("[\n  1,\n  2\n]".into()));
        assert_eq!(r.cell(&json!("{not json}")), text("{not json}"));
        assert_eq!(r.cell(&json!("[")), text("["));
    }

    #[test]
    fn long_strings_are_long_text() {
        let r = Renderer::new();
        let fifty = "x".repeat(50);
        let fifty_one = "x".repeat(51);
        assert_eq!(r.cell(&json!(fifty.clone())), Cell::Text(fifty));
        assert_eq!(r.cell(&json!(fifty_one.clone())), Cell::LongText(fifty_one));
    }

    #[test]
    fn numbers() {
        let r = Renderer::new();
        assert_eq!(r.cell(&json!(1_500_000)), text("1500000"));
        assert_eq!(r.cell(&json!(1_500_000.0)), text("1500000"));
        assert_eq!(r.cell(&json!(-2.5)), text("-2.5"));
        assert_eq!(r.cell(&json!(u64::MAX)), text("18446744073709551615"));
    }

    #[test]
    fn huge_floats_stay_short() {
        let r = Renderer::new();
        assert_eq!(r.cell(&json!(1.5e300)), text("1.5e+300"));

        let r = Renderer::new().with_config(RenderConfig::default().with_long_text_threshold(5));
        assert_eq!(r.cell(&json!(1_500_000)), Cell::LongText("1500000".into()));
        assert_eq!(r.cell(&json!(12)), text("12"));
    }

    #[test]
    fn nested_arrays() {
        let r = Renderer::new();
        assert_eq!(
            r.cell(&json!([])),
            Cell::Nested(Box::new(RenderNode::empty(EMPTY_ARRAY)))
        );
        assert_eq!(r.cell(&json!([1, true, null])), text("1, Yes, N/A"));
        assert_eq!(
            r.cell(&json!([1, 2, 3, 4, 5])),
            text("Array (5 items): 1, 2...")
        );
    }

    #[test]
    fn nested_objects() {
        let r = Renderer::new();
        assert_eq!(
            r.cell(&json!({"a": null})),
            Cell::Nested(Box::new(RenderNode::empty(EMPTY_OBJECT)))
        );
        assert_eq!(
            r.cell(&json!({"firstName": "A", "n": 1})),
            Cell::Nested(Box::new(RenderNode::properties(vec![
                [text("firstName"), text("A")],
                [text("n"), text("1")],
            ])))
        );
        assert_eq!(
            r.cell(&json!({"a": 1, "b": 2, "c": 3, "d": 4})),
            text("Object with 4 properties: a: 1, b: 2...")
        );
    }

    #[test]
    fn summaries_can_become_long_text() {
        let r = Renderer::new();
        let long = "y".repeat(40);
        let cell = r.cell(&Value::Array(vec![json!(long); 4]));
        assert!(matches!(cell, Cell::LongText(ref s) if s.starts_with("Array (4 items): ")));
    }

    #[test]
    fn configured_thresholds() {
        let config = RenderConfig::default()
            .with_inline_max_items(1)
            .with_preview_items(1)
            .with_flatten_max_keys(0);
        let r = Renderer::new().with_config(config);
        assert_eq!(r.cell(&json!([1, 2])), text("Array (2 items): 1..."));
        let node = r.render(&json!({"o": {"k": 1}}), "T");
        assert_eq!(
            rows(&node)[0][1],
            Cell::Nested(Box::new(RenderNode::properties(vec![[text("k"), text("1")]])))
        );
    }

    #[test]
    fn labels_localize_folded_booleans() {
        let config =
            RenderConfig::default().with_labels(crate::CellLabels::new("Ya", "Tidak", "T/A"));
        let r = Renderer::new().with_config(config);
        assert_eq!(r.cell(&json!([true, false, null])), text("Ya, Tidak, T/A"));
        assert_eq!(r.cell(&json!(true)), Cell::Boolean(true));
    }

    #[test]
    fn timestamp_prefix_detection() {
        assert!(is_timestamp("2024-01-15T10:30:00"));
        assert!(is_timestamp("2024-01-15T10:30:00.123+07:00"));
        assert!(!is_timestamp("2024-01-15 10:30:00"));
        assert!(!is_timestamp("2024-01-15T10:30"));
        assert!(!is_timestamp("２０２４-01-15T10:30:00"));
    }

    #[tracing_test::traced_test]
    #[test]
    fn render_logs_dispatch() {
        let _ = render(&json!([{"a": 1}]), "T");
        assert!(logs_contain("render.table"));
    }
}
