#![forbid(unsafe_code)]

//! Dynamic rendering of arbitrary JSON payloads for CoreTabs.
//!
//! The portal's API returns loosely structured JSON. [`render`] turns any
//! such value plus a title into a [`RenderNode`] tree that a view layer can
//! draw without knowing the payload's shape:
//!
//! | Input | Output |
//! |-------|--------|
//! | `null` | `Scalar(Na)` |
//! | `[]` / `{}` | `Section(title, Empty(..))` |
//! | array of objects | `Section(title, Table)` with the union of keys as columns |
//! | array of primitives | `Section(title, List)` |
//! | object | `Section(title, Table(["Property", "Value"]))`, small nested objects flattened |
//! | other | `Section(title, Scalar)` |
//!
//! Leaves go through a single cell rule ([`Renderer::cell`]) that tags
//! booleans, formats ISO timestamps, pretty-prints embedded JSON and
//! summarizes wide nested values.
//!
//! The crate also filters and groups the sidebar's record tables
//! ([`group`]), shapes export sheets ([`sheet`]), and prints any tree as
//! aligned plain text ([`text`]).
//!
//! # Example
//!
//! ```
//! use coretabs_render::{Cell, RenderNode, render};
//! use serde_json::json;
//!
//! let node = render(&json!({"CaseNumber": "12345", "Status": null}), "Case");
//! assert_eq!(
//!     node,
//!     RenderNode::section(
//!         "Case",
//!         RenderNode::properties(vec![[
//!             Cell::Text("Case Number".into()),
//!             Cell::Text("12345".into()),
//!         ]]),
//!     )
//! );
//! ```

pub mod config;
pub mod flatten;
pub mod group;
pub mod humanize;
pub mod node;
pub mod renderer;
pub mod sheet;
pub mod text;

pub use config::RenderConfig;
pub use flatten::flatten_object;
pub use group::{
    CaseUser, GroupedTable, OfficeGroup, RecordGroup, SHOW_ALL, UserColumns, filter_values,
    group_case_users, group_cases, group_documents, group_refund_review, order_workflow_steps,
    users_table,
};
pub use humanize::humanize_key;
pub use node::{Cell, CellLabels, RenderNode};
pub use renderer::{Renderer, render};
pub use sheet::{ColumnFormat, SheetColumn, export_filename, records_to_sheet, sheet_records};
pub use text::{TextView, TextViewConfig};
