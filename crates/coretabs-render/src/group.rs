//! Filtering, ordering and grouping of the sidebar's record tables.
//!
//! The portal returns flat lists. The views show them grouped:
//!
//! | Table | Filter field | Order | Group heading |
//! |-------|--------------|-------|---------------|
//! | my cases | `CaseStatus` | `CaseTypeName`, then `CaseNumber` descending | case type |
//! | case documents | `DocumentStatus` | `DocumentTypeCode` | document type |
//! | case users | `CaseRoleType` | office, then `Nip` | office |
//! | refund review | `ReportedBySeller` | `Tin` + `Name` | seller name and TIN |
//!
//! Case users are also deduplicated: the portal returns one record per
//! (user, role) assignment and the view wants one row per person.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;
use serde_json::Value;

use crate::node::{Cell, RenderNode};
use crate::sheet::{
    SheetColumn, case_columns, document_columns, records_to_sheet, refund_review_columns, truthy,
};

const MISSING: &str = "N/A";

/// Filter value that keeps every record.
pub const SHOW_ALL: &str = "all";

/// Heading of cases and documents without a type.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Status the my-cases filter starts on when any case has it.
pub const DEFAULT_CASES_FILTER: &str = "In Progress";

/// Column headers of the users table, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserColumns {
    pub full_name: String,
    pub nip: String,
    pub position: String,
    pub case_role: String,
}

impl Default for UserColumns {
    fn default() -> Self {
        Self {
            full_name: "Full Name".to_string(),
            nip: "NIP".to_string(),
            position: "Position".to_string(),
            case_role: "Case Role".to_string(),
        }
    }
}

/// One person on the case with every role they hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseUser {
    pub full_name: String,
    pub nip: String,
    pub position: String,
    pub office_name: String,
    pub roles: Vec<String>,
}

/// Users sharing an office, sorted by NIP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfficeGroup {
    pub office_name: String,
    pub users: Vec<CaseUser>,
}

impl OfficeGroup {
    /// This office as a titled table.
    #[must_use]
    pub fn to_table(&self, columns: &UserColumns) -> RenderNode {
        RenderNode::section(
            self.office_name.clone(),
            RenderNode::Table {
                columns: vec![
                    columns.full_name.clone(),
                    columns.nip.clone(),
                    columns.position.clone(),
                    columns.case_role.clone(),
                ],
                rows: self.users.iter().map(user_row).collect(),
            },
        )
    }
}

/// Group raw case-user records by office.
///
/// `role_filter` keeps only records whose `CaseRoleType` equals it
/// (`None` or `"all"` keeps everything). Records are deduplicated by
/// `(FullName, Nip)`, accumulating `role_label(CaseRoleType)` in encounter
/// order. Offices come out alphabetically, users within an office by NIP.
/// Missing or empty fields read `"N/A"`.
pub fn group_case_users<F>(
    users: &[Value],
    role_filter: Option<&str>,
    role_label: F,
) -> Vec<OfficeGroup>
where
    F: Fn(&str) -> String,
{
    let filter = role_filter.filter(|f| *f != SHOW_ALL);
    let mut merged: Vec<CaseUser> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for record in users {
        let role = record.get("CaseRoleType").and_then(field_text);
        if let Some(filter) = filter {
            if role.as_deref() != Some(filter) {
                continue;
            }
        }
        let role = role.map_or_else(|| MISSING.to_string(), |r| role_label(&r));

        let full_name = text_or_missing(record, "FullName");
        let nip = text_or_missing(record, "Nip");
        match index.get(&(full_name.clone(), nip.clone())) {
            Some(&i) => merged[i].roles.push(role),
            None => {
                index.insert((full_name.clone(), nip.clone()), merged.len());
                merged.push(CaseUser {
                    full_name,
                    nip,
                    position: text_or_missing(record, "Jabatan"),
                    office_name: text_or_missing(record, "OfficeName"),
                    roles: vec![role],
                });
            }
        }
    }

    let mut offices: BTreeMap<String, Vec<CaseUser>> = BTreeMap::new();
    for user in merged {
        offices.entry(user.office_name.clone()).or_default().push(user);
    }
    let groups: Vec<OfficeGroup> = offices
        .into_iter()
        .map(|(office_name, mut users)| {
            users.sort_by(|a, b| a.nip.cmp(&b.nip));
            OfficeGroup { office_name, users }
        })
        .collect();
    tracing::debug!(
        message = "group.case_users",
        records = users.len(),
        offices = groups.len()
    );
    groups
}

/// Every office as one table, with the office name as a leading column.
#[must_use]
pub fn users_table(
    groups: &[OfficeGroup],
    columns: &UserColumns,
    office_column: &str,
) -> RenderNode {
    let rows = groups
        .iter()
        .flat_map(|group| {
            group.users.iter().map(|user| {
                let mut row = vec![Cell::Text(group.office_name.clone())];
                row.extend(user_row(user));
                row
            })
        })
        .collect();
    RenderNode::Table {
        columns: vec![
            office_column.to_string(),
            columns.full_name.clone(),
            columns.nip.clone(),
            columns.position.clone(),
            columns.case_role.clone(),
        ],
        rows,
    }
}

/// The grouped record tables other than case users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupedTable {
    Cases,
    Documents,
    RefundReview,
}

impl GroupedTable {
    /// Record field the table's filter selects on.
    #[must_use]
    pub const fn filter_field(self) -> &'static str {
        match self {
            Self::Cases => "CaseStatus",
            Self::Documents => "DocumentStatus",
            Self::RefundReview => "ReportedBySeller",
        }
    }

    /// Catalog key of the message shown when nothing matches.
    #[must_use]
    pub const fn empty_message_key(self) -> &'static str {
        match self {
            Self::Cases => "no_cases_match",
            Self::Documents => "no_documents_found",
            Self::RefundReview => "no_refund_data",
        }
    }

    /// Table columns, with headers from `label(catalog key)`.
    #[must_use]
    pub fn columns<F>(self, label: F) -> Vec<SheetColumn>
    where
        F: Fn(&str) -> String,
    {
        match self {
            Self::Cases => case_columns(label),
            Self::Documents => document_columns(label),
            Self::RefundReview => refund_review_columns(label),
        }
    }

    /// Filter and group `records`. `filter` is a filter-field value,
    /// `"true"`/`"false"` for refund review, or `None`/`"all"`.
    #[must_use]
    pub fn group(self, records: &[Value], filter: Option<&str>) -> Vec<RecordGroup> {
        match self {
            Self::Cases => group_cases(records, filter),
            Self::Documents => group_documents(records, filter),
            Self::RefundReview => group_refund_review(records, filter.and_then(reported_filter)),
        }
    }
}

/// A run of records sharing a group key, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordGroup {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub records: Vec<Value>,
}

impl RecordGroup {
    /// `title`, or `title (subtitle)`.
    #[must_use]
    pub fn heading(&self) -> String {
        match &self.subtitle {
            Some(subtitle) => format!("{} ({subtitle})", self.title),
            None => self.title.clone(),
        }
    }

    /// This group as a titled table. Empty cells read as N/A.
    #[must_use]
    pub fn to_table(&self, columns: &[SheetColumn]) -> RenderNode {
        let mut table = records_to_sheet(&self.records, columns);
        if let RenderNode::Table { rows, .. } = &mut table {
            for cell in rows.iter_mut().flatten() {
                if cell.as_text() == Some("") {
                    *cell = Cell::Na;
                }
            }
        }
        RenderNode::section(self.heading(), table)
    }
}

/// Group the user's cases by case type.
///
/// Keeps cases whose `CaseStatus` equals `status_filter` (`None` or `"all"`
/// keeps everything). Types come out in ascending order and, within a type,
/// case numbers descend with digit runs compared numerically, so `C-10`
/// precedes `C-9`. Cases without a type group under [`UNCATEGORIZED`].
#[must_use]
pub fn group_cases(cases: &[Value], status_filter: Option<&str>) -> Vec<RecordGroup> {
    let mut selected = select(cases, "CaseStatus", status_filter);
    selected.sort_by(|a, b| {
        str_field(a, "CaseTypeName")
            .cmp(str_field(b, "CaseTypeName"))
            .then_with(|| natural_cmp(str_field(b, "CaseNumber"), str_field(a, "CaseNumber")))
    });
    let groups = runs(&selected, |r| str_field(r, "CaseTypeName").to_string(), |r| {
        (or_uncategorized(str_field(r, "CaseTypeName")), None)
    });
    tracing::debug!(
        message = "group.cases",
        records = cases.len(),
        groups = groups.len()
    );
    groups
}

/// Group case documents by `DocumentTypeCode`, keeping those whose
/// `DocumentStatus` equals `status_filter`. Documents keep their input
/// order within a type.
#[must_use]
pub fn group_documents(documents: &[Value], status_filter: Option<&str>) -> Vec<RecordGroup> {
    let mut selected = select(documents, "DocumentStatus", status_filter);
    selected.sort_by(|a, b| str_field(a, "DocumentTypeCode").cmp(str_field(b, "DocumentTypeCode")));
    let groups = runs(&selected, |r| str_field(r, "DocumentTypeCode").to_string(), |r| {
        (or_uncategorized(str_field(r, "DocumentTypeCode")), None)
    });
    tracing::debug!(
        message = "group.documents",
        records = documents.len(),
        groups = groups.len()
    );
    groups
}

/// Parse a refund-review filter value: `"all"` keeps everything, `"true"`
/// keeps reported rows, anything else keeps unreported rows.
#[must_use]
pub fn reported_filter(value: &str) -> Option<bool> {
    match value {
        SHOW_ALL => None,
        other => Some(other == "true"),
    }
}

/// Group refund review rows by seller.
///
/// With `reported` set, keeps rows whose `ReportedBySeller` is that boolean.
/// Rows are ordered and grouped by `Tin` followed by `Name`; each group is
/// titled with the seller name and subtitled with the TIN.
#[must_use]
pub fn group_refund_review(rows: &[Value], reported: Option<bool>) -> Vec<RecordGroup> {
    let seller = |r: &Value| format!("{}{}", str_field(r, "Tin"), str_field(r, "Name"));
    let mut selected: Vec<&Value> = rows
        .iter()
        .filter(|r| {
            reported.is_none_or(|want| r.get("ReportedBySeller").and_then(Value::as_bool) == Some(want))
        })
        .collect();
    selected.sort_by_cached_key(|r| seller(r));
    let groups = runs(&selected, seller, |r| {
        (
            non_empty(str_field(r, "Name"), "Unknown Name"),
            Some(non_empty(str_field(r, "Tin"), "Unknown TIN")),
        )
    });
    tracing::debug!(
        message = "group.refund_review",
        records = rows.len(),
        groups = groups.len()
    );
    groups
}

/// Distinct values of `field` for a filter control, sorted.
///
/// Empty strings, zero and non-scalar values are skipped. A bare string
/// element counts as its own value.
#[must_use]
pub fn filter_values(records: &[Value], field: &str) -> Vec<String> {
    let values: BTreeSet<String> = records
        .iter()
        .filter_map(|record| match record {
            Value::String(_) => Some(record),
            _ => record.get(field),
        })
        .filter(|value| truthy(value))
        .filter_map(field_text)
        .collect();
    values.into_iter().collect()
}

/// [`DEFAULT_CASES_FILTER`] when some case has that status.
#[must_use]
pub fn default_cases_filter(cases: &[Value]) -> Option<&'static str> {
    filter_values(cases, "CaseStatus")
        .iter()
        .any(|status| status == DEFAULT_CASES_FILTER)
        .then_some(DEFAULT_CASES_FILTER)
}

/// Routing workflow steps in process order: start actions first, final
/// actions last, otherwise by `Code`. Anything but an array yields no steps.
#[must_use]
pub fn order_workflow_steps(steps: &Value) -> Vec<Value> {
    let Some(steps) = steps.as_array() else {
        return Vec::new();
    };
    let flag = |step: &Value, field: &str| step.get(field).is_some_and(truthy);
    let mut ordered = steps.clone();
    ordered.sort_by(|a, b| {
        let rank = |s: &Value| (!flag(s, "IsStartAction"), flag(s, "IsFinalAction"));
        rank(a)
            .cmp(&rank(b))
            .then_with(|| str_field(a, "Code").cmp(str_field(b, "Code")))
    });
    ordered
}

fn select<'a>(records: &'a [Value], field: &str, filter: Option<&str>) -> Vec<&'a Value> {
    let filter = filter.filter(|f| *f != SHOW_ALL);
    records
        .iter()
        .filter(|r| filter.is_none_or(|f| r.get(field).and_then(Value::as_str) == Some(f)))
        .collect()
}

/// Split sorted records into runs of equal `key`.
fn runs<K, H>(records: &[&Value], key: K, heading: H) -> Vec<RecordGroup>
where
    K: Fn(&Value) -> String,
    H: Fn(&Value) -> (String, Option<String>),
{
    let mut groups: Vec<(String, RecordGroup)> = Vec::new();
    for &record in records {
        let k = key(record);
        match groups.last_mut() {
            Some((last, group)) if *last == k => group.records.push(record.clone()),
            _ => {
                let (title, subtitle) = heading(record);
                let group = RecordGroup {
                    title,
                    subtitle,
                    records: vec![record.clone()],
                };
                groups.push((k, group));
            }
        }
    }
    groups.into_iter().map(|(_, group)| group).collect()
}

fn str_field<'a>(record: &'a Value, field: &str) -> &'a str {
    record.get(field).and_then(Value::as_str).unwrap_or("")
}

fn non_empty(s: &str, fallback: &str) -> String {
    let s = if s.is_empty() { fallback } else { s };
    s.to_string()
}

fn or_uncategorized(s: &str) -> String {
    non_empty(s, UNCATEGORIZED)
}

/// Compare with runs of ASCII digits ordered by numeric value.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (mut a, mut b) = (a, b);
    loop {
        match (a.chars().next(), b.chars().next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let (da, rest_a) = split_digits(a);
                let (db, rest_b) = split_digits(b);
                let (da, db) = (da.trim_start_matches('0'), db.trim_start_matches('0'));
                let ord = da.len().cmp(&db.len()).then_with(|| da.cmp(db));
                if ord != Ordering::Equal {
                    return ord;
                }
                (a, b) = (rest_a, rest_b);
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                (a, b) = (&a[x.len_utf8()..], &b[y.len_utf8()..]);
            }
        }
    }
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn user_row(user: &CaseUser) -> Vec<Cell> {
    vec![
        Cell::Text(user.full_name.clone()),
        Cell::Text(user.nip.clone()),
        Cell::Text(user.position.clone()),
        Cell::Text(user.roles.join(", ")),
    ]
}

fn text_or_missing(record: &Value, field: &str) -> String {
    record
        .get(field)
        .and_then(field_text)
        .unwrap_or_else(|| MISSING.to_string())
}

/// Non-empty strings and numbers; anything else counts as missing.
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
