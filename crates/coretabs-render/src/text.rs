//! Plain-text rendition of a render tree.
//!
//! Used by the inspection CLI and in tests; columns are aligned by display
//! width so CJK and emoji cells line up in a terminal.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::node::{Cell, CellLabels, RenderNode};

const COLUMN_GAP: &str = " | ";
const ELLIPSIS: char = '…';

/// Text view settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextViewConfig {
    pub labels: CellLabels,
    /// Table cells wider than this are cut with `…`.
    pub max_cell_width: Option<usize>,
}

impl Default for TextViewConfig {
    fn default() -> Self {
        Self {
            labels: CellLabels::default(),
            max_cell_width: None,
        }
    }
}

impl TextViewConfig {
    #[must_use]
    pub fn with_labels(mut self, labels: CellLabels) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn with_max_cell_width(mut self, width: usize) -> Self {
        self.max_cell_width = Some(width);
        self
    }
}

/// Renders a [`RenderNode`] as plain text.
#[derive(Debug, Clone, Default)]
pub struct TextView {
    config: TextViewConfig,
}

impl TextView {
    #[must_use]
    pub fn new(config: TextViewConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn render(&self, node: &RenderNode) -> String {
        let mut out = String::new();
        self.write_node(node, 0, &mut out);
        out
    }

    fn write_node(&self, node: &RenderNode, depth: usize, out: &mut String) {
        match node {
            RenderNode::Section { title, body } => {
                let rule = if depth == 0 { '=' } else { '-' };
                out.push_str(title);
                out.push('\n');
                out.extend(std::iter::repeat_n(rule, title.width().max(1)));
                out.push('\n');
                self.write_node(body, depth + 1, out);
            }
            RenderNode::Table { columns, rows } => self.write_table(columns, rows, out),
            RenderNode::List { items } => {
                for (i, item) in items.iter().enumerate() {
                    out.push_str(&format!("{}: {}\n", i + 1, self.inline(item)));
                }
            }
            RenderNode::Scalar { value: Cell::Json(json) } => {
                out.push_str(json);
                out.push('\n');
            }
            RenderNode::Scalar { value } => {
                out.push_str(&self.inline(value));
                out.push('\n');
            }
            RenderNode::Empty { reason } => {
                out.push_str(&format!("({reason})\n"));
            }
        }
    }

    fn write_table(&self, columns: &[String], rows: &[Vec<Cell>], out: &mut String) {
        let body: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(|cell| self.table_cell(cell)).collect())
            .collect();
        let mut widths: Vec<usize> = columns.iter().map(|c| c.width()).collect();
        for row in &body {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }

        write_row(columns.iter().map(String::as_str), &widths, out);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_row(rule.iter().map(String::as_str), &widths, out);
        for row in &body {
            write_row(row.iter().map(String::as_str), &widths, out);
        }
    }

    /// Single-line text for a cell.
    fn inline(&self, cell: &Cell) -> String {
        let text = cell.plain_text(&self.config.labels);
        if text.contains('\n') {
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        } else {
            text
        }
    }

    fn table_cell(&self, cell: &Cell) -> String {
        let text = self.inline(cell);
        match self.config.max_cell_width {
            Some(max) => truncate_to_width(&text, max),
            None => text,
        }
    }
}

fn write_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize], out: &mut String) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        line.extend(std::iter::repeat_n(' ', width.saturating_sub(cell.width())));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Cut `text` to at most `max` columns, ending in `…` when cut.
fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let budget = max.saturating_sub(1);
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    if max > 0 {
        out.push(ELLIPSIS);
    }
    out
}
