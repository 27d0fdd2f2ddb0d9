//! Shaping records into export sheets.
//!
//! A sheet is a [`RenderNode::Table`] whose header row is the column
//! headers and whose cells are already formatted for a spreadsheet writer.

use chrono::NaiveDateTime;
use coretabs_format::{
    DateOptions, DateStyle, format_currency, format_date, format_file_size, format_status,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::node::{Cell, CellLabels, RenderNode};

/// How a column's raw value is turned into a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnFormat {
    /// Strings and numbers verbatim, booleans as booleans.
    Text,
    /// `DD/MM/YYYY`.
    Date,
    /// Amount in the currency named by another field of the record
    /// (`USD` when that field is absent).
    Currency { currency_field: String },
    /// Byte count as `1.5 KB`.
    FileSize,
    /// Status label as `In progress`.
    Status,
    /// Truthiness as a boolean; missing and null read as `false`.
    YesNo,
}

/// One export column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetColumn {
    pub header: String,
    pub field: String,
    pub format: ColumnFormat,
}

impl SheetColumn {
    #[must_use]
    pub fn new(header: impl Into<String>, field: impl Into<String>, format: ColumnFormat) -> Self {
        Self {
            header: header.into(),
            field: field.into(),
            format,
        }
    }

    #[must_use]
    pub fn text(header: impl Into<String>, field: impl Into<String>) -> Self {
        Self::new(header, field, ColumnFormat::Text)
    }
}

/// Shape `records` into a sheet with one row per record.
///
/// Missing, null, empty and zero-valued size or currency fields become
/// empty text.
#[must_use]
pub fn records_to_sheet(records: &[Value], columns: &[SheetColumn]) -> RenderNode {
    let rows = records
        .iter()
        .map(|record| columns.iter().map(|col| sheet_cell(record, col)).collect())
        .collect();
    tracing::debug!(
        message = "sheet.shape",
        records = records.len(),
        columns = columns.len()
    );
    RenderNode::Table {
        columns: columns.iter().map(|c| c.header.clone()).collect(),
        rows,
    }
}

/// `<prefix>[_<case number>]_<YYYYMMDD>_<HHMM>.xlsx`, with characters
/// that are invalid in file names replaced by `_`.
#[must_use]
pub fn export_filename(prefix: &str, case_number: Option<&str>, at: &NaiveDateTime) -> String {
    let stamp = at.format("%Y%m%d_%H%M");
    match case_number.filter(|c| !c.is_empty()) {
        Some(case) => {
            let case: String = case
                .chars()
                .map(|c| if "\\/:\"*?<>|".contains(c) { '_' } else { c })
                .collect();
            format!("{prefix}_{case}_{stamp}.xlsx")
        }
        None => format!("{prefix}_{stamp}.xlsx"),
    }
}

/// Columns of the refund review export, keyed by the portal's field names.
///
/// Headers follow the tax office's spreadsheet template and are not
/// translated. `ReportedBySeller` prints as yes/no, other values verbatim.
#[must_use]
pub fn refund_columns() -> Vec<SheetColumn> {
    const DOCUMENT: &str = "Faktur Pajak/Dokumen yang Dipersamakan/Nota Retur/Nota Pembatalan";
    vec![
        SheetColumn::new(
            "Telah dilaporkan oleh Penjual?",
            "ReportedBySeller",
            ColumnFormat::YesNo,
        ),
        SheetColumn::text("NPWP Penjual", "Tin"),
        SheetColumn::text("Nama Penjual", "Name"),
        SheetColumn::text(format!("Nomor {DOCUMENT}"), "DocumentNumber"),
        SheetColumn::text(format!("Tanggal {DOCUMENT}"), "DocumentDate"),
        SheetColumn::text("Kode Transaksi", "TransactionCode"),
        SheetColumn::text(
            "Harga Jual/Dasar Pengenaan Pajak/Dasar Pengenaan Pajak Lainnya (Rp)",
            "SellingPrice",
        ),
        SheetColumn::text("PPN yang dikreditkan pada SPT yang Dilaporkan", "VatPaid"),
        SheetColumn::text("PPnBM yang dikreditkan pada SPT yang Dilaporkan", "StlgPaid"),
    ]
}

/// Columns of the refund review table. `label` maps a catalog key to
/// its header text.
#[must_use]
pub fn refund_review_columns<F>(label: F) -> Vec<SheetColumn>
where
    F: Fn(&str) -> String,
{
    vec![
        SheetColumn::text(label("doc_number"), "DocumentNumber"),
        SheetColumn::new(label("date"), "DocumentDate", ColumnFormat::Date),
        SheetColumn::text(label("selling_price"), "SellingPrice"),
        SheetColumn::text(label("vat_paid"), "VatPaid"),
        SheetColumn::text(label("stlg_paid"), "StlgPaid"),
        SheetColumn::text(label("trans_code"), "TransactionCode"),
        SheetColumn::new(label("reported"), "ReportedBySeller", ColumnFormat::YesNo),
    ]
}

/// Columns of the my-cases table.
#[must_use]
pub fn case_columns<F>(label: F) -> Vec<SheetColumn>
where
    F: Fn(&str) -> String,
{
    vec![
        SheetColumn::text(label("case_number"), "CaseNumber"),
        SheetColumn::text(label("taxpayer_name"), "MainTaxpayerName"),
        SheetColumn::text(label("tin"), "MainTaxpayerTIN"),
        SheetColumn::text(label("case_type"), "CaseTypeName"),
        SheetColumn::new(label("status"), "CaseStatus", ColumnFormat::Status),
        SheetColumn::new(label("created_date"), "CreatedDate", ColumnFormat::Date),
    ]
}

/// Columns of the case documents table.
#[must_use]
pub fn document_columns<F>(label: F) -> Vec<SheetColumn>
where
    F: Fn(&str) -> String,
{
    vec![
        SheetColumn::text(label("letter_number"), "LetterNumber"),
        SheetColumn::text(label("file_name"), "FileName"),
        SheetColumn::new(label("status"), "DocumentStatus", ColumnFormat::Status),
        SheetColumn::new(label("date"), "DocumentDate", ColumnFormat::Date),
    ]
}

/// Columns of a flat case-user export, one row per role assignment.
#[must_use]
pub fn case_user_columns<F>(label: F) -> Vec<SheetColumn>
where
    F: Fn(&str) -> String,
{
    vec![
        SheetColumn::text(label("full_name"), "FullName"),
        SheetColumn::text(label("nip"), "Nip"),
        SheetColumn::text(label("position"), "Jabatan"),
        SheetColumn::text(label("office_name"), "OfficeName"),
        SheetColumn::text(label("case_role"), "CaseRoleType"),
    ]
}

/// A sheet's rows as objects keyed by header, in column order: the shape a
/// spreadsheet writer takes. Cells are flattened to text with `labels`.
#[must_use]
pub fn sheet_records(sheet: &RenderNode, labels: &CellLabels) -> Vec<Map<String, Value>> {
    let RenderNode::Table { columns, rows } = sheet.content() else {
        return Vec::new();
    };
    rows.iter()
        .map(|row| {
            columns
                .iter()
                .zip(row)
                .map(|(header, cell)| (header.clone(), Value::String(cell.plain_text(labels))))
                .collect()
        })
        .collect()
}

fn sheet_cell(record: &Value, column: &SheetColumn) -> Cell {
    let blank = || Cell::Text(String::new());
    if column.format == ColumnFormat::YesNo {
        return Cell::Boolean(record.get(&column.field).is_some_and(truthy));
    }
    let value = match record.get(&column.field) {
        None | Some(Value::Null) => return blank(),
        Some(value) => value,
    };

    match &column.format {
        ColumnFormat::Text => match value {
            Value::String(s) => Cell::Text(s.clone()),
            Value::Bool(b) => Cell::Boolean(*b),
            Value::Number(n) => Cell::Text(n.to_string()),
            other => Cell::Text(other.to_string()),
        },
        ColumnFormat::Date => match value {
            Value::String(s) if !s.is_empty() => {
                Cell::Text(format_date(s, &DateStyle::Short, &DateOptions::default()))
            }
            _ => blank(),
        },
        ColumnFormat::Currency { currency_field } => {
            let currency = record
                .get(currency_field)
                .and_then(Value::as_str)
                .unwrap_or("USD");
            as_number(value)
                .and_then(|amount| format_currency(amount, currency))
                .map_or_else(blank, Cell::Text)
        }
        ColumnFormat::FileSize => value
            .as_u64()
            .or_else(|| as_number(value).filter(|n| *n >= 0.0).map(|n| n as u64))
            .and_then(format_file_size)
            .map_or_else(blank, Cell::Text),
        ColumnFormat::Status => match value {
            Value::String(s) => Cell::Text(format_status(s)),
            _ => blank(),
        },
        ColumnFormat::YesNo => Cell::Boolean(truthy(value)),
    }
}

/// Falsy values: null, `false`, zero, and the empty string.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Numbers, and strings holding a number.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
