//! A sidebar session: shared state plus the active language.

use coretabs_i18n::{I18nError, Language, Translator, detect_language_from_env};
use coretabs_render::sheet::refund_columns;
use coretabs_render::{
    CellLabels, ColumnFormat, GroupedTable, OfficeGroup, RecordGroup, RenderConfig, RenderNode,
    Renderer, SheetColumn, TextView, TextViewConfig, UserColumns, filter_values, group_case_users,
    group_refund_review, order_workflow_steps, records_to_sheet,
};
use coretabs_state::StateStore;
use serde_json::Value;

/// Store key holding the active language code.
pub const LANGUAGE_KEY: &str = "language";

/// State and translation for one sidebar instance.
///
/// The active language is mirrored into the store under [`LANGUAGE_KEY`],
/// so views subscribed to that key re-render when the user switches.
///
/// # Example
///
/// ```
/// use coretabs::Session;
/// use coretabs::prelude::Language;
/// use serde_json::json;
///
/// let mut session = Session::new(Language::En).expect("bundled tables");
/// assert!(session.set_language("id"));
/// assert_eq!(session.store().get("language"), Some(json!("id")));
/// assert_eq!(session.t("download"), "Unduh");
/// ```
#[derive(Debug)]
pub struct Session {
    store: StateStore,
    translator: Translator,
    config: RenderConfig,
}

impl Session {
    /// Session over the bundled string tables.
    pub fn new(language: Language) -> Result<Self, I18nError> {
        Ok(Self::with_translator(Translator::bundled(language)?))
    }

    /// Session in the language picked from `CORETABS_LANG`, `LC_ALL` and
    /// `LANG`, read through `get_env`.
    pub fn from_env<F>(get_env: F) -> Result<Self, I18nError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::new(detect_language_from_env(get_env))
    }

    #[must_use]
    pub fn with_translator(translator: Translator) -> Self {
        let store = StateStore::new();
        store.set(LANGUAGE_KEY, translator.language().code());
        Self {
            store,
            translator,
            config: RenderConfig::default(),
        }
    }

    /// Base renderer thresholds; labels are always taken from the language.
    #[must_use]
    pub fn with_render_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    #[must_use]
    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.translator.language()
    }

    /// Switch language by code and publish it to the store.
    ///
    /// Unsupported codes are rejected without touching the store.
    pub fn set_language(&mut self, code: &str) -> bool {
        if !self.translator.set_language(code) {
            return false;
        }
        let code = self.translator.language().code();
        tracing::debug!(message = "session.language", code);
        self.store.set(LANGUAGE_KEY, code);
        true
    }

    /// Flip between English and Indonesian.
    pub fn toggle_language(&mut self) -> Language {
        let next = match self.language() {
            Language::En => Language::Id,
            Language::Id => Language::En,
        };
        self.set_language(next.code());
        next
    }

    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.translator.t(key)
    }

    /// Boolean and missing-value words in the active language.
    #[must_use]
    pub fn labels(&self) -> CellLabels {
        CellLabels::new(
            self.translator.t_or("yes", "Yes"),
            self.translator.t_or("no", "No"),
            "N/A",
        )
    }

    #[must_use]
    pub fn renderer(&self) -> Renderer {
        Renderer::new().with_config(self.config.clone().with_labels(self.labels()))
    }

    #[must_use]
    pub fn text_view(&self) -> TextView {
        TextView::new(TextViewConfig::default().with_labels(self.labels()))
    }

    #[must_use]
    pub fn render(&self, value: &Value, title: &str) -> RenderNode {
        self.renderer().render(value, title)
    }

    /// Render `value` and print it as text.
    #[must_use]
    pub fn render_text(&self, value: &Value, title: &str) -> String {
        self.text_view().render(&self.render(value, title))
    }

    /// Users-table headers in the active language.
    #[must_use]
    pub fn user_columns(&self) -> UserColumns {
        UserColumns {
            full_name: self.translator.t_or("full_name", "Full Name"),
            nip: self.translator.t_or("nip", "NIP"),
            position: self.translator.t_or("position", "Position"),
            case_role: self.translator.t_or("case_role", "Case Role"),
        }
    }

    /// Group case users with role names translated.
    #[must_use]
    pub fn group_users(&self, users: &[Value], role_filter: Option<&str>) -> Vec<OfficeGroup> {
        group_case_users(users, role_filter, |role| {
            self.translator.translate_status(role)
        })
    }

    /// Filter options for `field`: each distinct value with its label in
    /// the active language.
    #[must_use]
    pub fn filter_options(&self, records: &[Value], field: &str) -> Vec<(String, String)> {
        filter_values(records, field)
            .into_iter()
            .map(|value| {
                let label = self.translator.translate_status(&value);
                (value, label)
            })
            .collect()
    }

    /// Headers of `table` in the active language.
    #[must_use]
    pub fn table_columns(&self, table: GroupedTable) -> Vec<SheetColumn> {
        table.columns(|key| self.t(key))
    }

    /// One titled table per group, with headers and status values in the
    /// active language.
    #[must_use]
    pub fn group_tables(&self, table: GroupedTable, groups: &[RecordGroup]) -> Vec<RenderNode> {
        let columns = self.table_columns(table);
        let statuses: Vec<&str> = columns
            .iter()
            .filter(|c| c.format == ColumnFormat::Status)
            .map(|c| c.field.as_str())
            .collect();
        let plain: Vec<SheetColumn> = columns
            .iter()
            .map(|c| match c.format {
                ColumnFormat::Status => SheetColumn::text(c.header.clone(), c.field.clone()),
                _ => c.clone(),
            })
            .collect();
        groups
            .iter()
            .map(|group| {
                let records = group
                    .records
                    .iter()
                    .map(|record| self.translate_fields(record, &statuses))
                    .collect();
                RecordGroup {
                    records,
                    ..group.clone()
                }
                .to_table(&plain)
            })
            .collect()
    }

    /// Workflow steps in process order, rendered under the routing title.
    #[must_use]
    pub fn render_workflow(&self, steps: &Value) -> RenderNode {
        let ordered = Value::Array(order_workflow_steps(steps));
        self.render(&ordered, &self.translator.t_or("routing", "Routing"))
    }

    /// The refund review export sheet: rows kept by `reported`, in review
    /// order.
    #[must_use]
    pub fn refund_export(&self, rows: &[Value], reported: Option<bool>) -> RenderNode {
        let selected: Vec<Value> = group_refund_review(rows, reported)
            .into_iter()
            .flat_map(|group| group.records)
            .collect();
        records_to_sheet(&selected, &refund_columns())
    }

    fn translate_fields(&self, record: &Value, fields: &[&str]) -> Value {
        let mut record = record.clone();
        for field in fields {
            if let Some(Value::String(s)) = record.get_mut(*field) {
                *s = self.translator.translate_status(s);
            }
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use coretabs_render::Cell;
    use serde_json::json;

    fn session(language: Language) -> Session {
        Session::new(language).expect("bundled tables are valid")
    }

    #[test]
    #[tracing_test::traced_test]
    fn language_switch_is_logged() {
        let mut s = session(Language::En);
        assert!(s.set_language("id"));
        assert!(logs_contain("session.language"));
    }

    #[test]
    fn language_is_published_to_the_store() {
        let mut s = session(Language::En);
        assert_eq!(s.store().get(LANGUAGE_KEY), Some(json!("en")));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = s.store().subscribe(LANGUAGE_KEY, move |new, old| {
            sink.borrow_mut().push((new.clone(), old.cloned()));
        });

        assert!(s.set_language("id"));
        assert!(!s.set_language("fr"));
        assert_eq!(s.toggle_language(), Language::En);
        assert_eq!(
            *seen.borrow(),
            vec![
                (json!("id"), Some(json!("en"))),
                (json!("en"), Some(json!("id"))),
            ]
        );
    }

    #[test]
    fn labels_follow_language() {
        let s = session(Language::Id);
        let r = s.renderer();
        assert_eq!(r.cell(&json!([true, false])), Cell::Text("Ya, Tidak".into()));
        assert_eq!(
            s.render_text(&json!({"aktif": true}), "Kasus"),
            "Kasus\n=====\nProperty | Value\n-------- | -----\nAktif    | Ya\n"
        );
    }

    #[test]
    fn render_config_thresholds_are_kept() {
        let s = session(Language::En)
            .with_render_config(RenderConfig::default().with_preview_items(1));
        assert_eq!(
            s.renderer().cell(&json!([1, 2, 3, 4])),
            Cell::Text("Array (4 items): 1...".into())
        );
    }

    #[test]
    fn users_are_grouped_with_translated_roles() {
        let s = session(Language::Id);
        let users = [json!({
            "FullName": "Budi", "Nip": "1", "OfficeName": "KPP", "CaseRoleType": "Digital Forensic Team Leader"
        })];
        let groups = s.group_users(&users, None);
        assert_eq!(groups[0].users[0].roles, ["Ketua Tim Forensik Digital"]);
        assert_eq!(s.user_columns().full_name, "Nama Lengkap");
    }

    #[test]
    fn group_tables_are_localized() {
        let s = session(Language::Id);
        let cases = [
            json!({"CaseNumber": "C-1", "CaseTypeName": "Pemeriksaan", "CaseStatus": "Completed"}),
            json!({"CaseNumber": "C-2", "CaseTypeName": "Pemeriksaan", "CaseStatus": "In Progress"}),
        ];
        let groups = GroupedTable::Cases.group(&cases, None);
        let tables = s.group_tables(GroupedTable::Cases, &groups);
        assert_eq!(tables.len(), 1);
        let RenderNode::Table { columns, rows } = tables[0].content() else {
            panic!("expected table");
        };
        assert_eq!(columns[0], "Nomor Kasus");
        assert_eq!(rows[0][0], Cell::Text("C-2".into()));
        assert_eq!(rows[0][4], Cell::Text("Sedang Berlangsung".into()));
        assert_eq!(rows[0][2], Cell::Na);
    }

    #[test]
    fn filter_options_carry_labels() {
        let s = session(Language::Id);
        let options = s.filter_options(
            &[json!({"CaseStatus": "In Progress"}), json!({"CaseStatus": "Odd"})],
            "CaseStatus",
        );
        assert_eq!(
            options,
            [
                ("In Progress".to_string(), "Sedang Berlangsung".to_string()),
                ("Odd".to_string(), "Odd".to_string()),
            ]
        );
    }

    #[test]
    fn workflow_and_refund_export() {
        let s = session(Language::En);
        let node = s.render_workflow(&json!([
            {"Code": "END", "IsFinalAction": true},
            {"Code": "START", "IsStartAction": true},
        ]));
        assert_eq!(node.title(), Some("Routing"));
        let RenderNode::Table { columns, rows } = node.content() else {
            panic!("expected table");
        };
        let code = columns.iter().position(|c| c == "Code").expect("code column");
        assert_eq!(rows[0][code], Cell::Text("START".into()));

        let rows = [
            json!({"Tin": "2", "Name": "B", "ReportedBySeller": true}),
            json!({"Tin": "1", "Name": "A", "ReportedBySeller": false}),
        ];
        let RenderNode::Table { rows, .. } = s.refund_export(&rows, None) else {
            panic!("expected table");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], Cell::Boolean(false));
        assert_eq!(rows[0][1], Cell::Text("1".into()));
        let none = s.refund_export(&[json!({"ReportedBySeller": true})], Some(false));
        assert_eq!(
            none,
            RenderNode::Table {
                columns: refund_columns().into_iter().map(|c| c.header).collect(),
                rows: Vec::new(),
            }
        );
    }

    #[test]
    fn env_detection() {
        let s = Session::from_env(|key| (key == "LANG").then(|| "id_ID.UTF-8".to_string()))
            .expect("bundled tables are valid");
        assert_eq!(s.language(), Language::Id);
    }
}
