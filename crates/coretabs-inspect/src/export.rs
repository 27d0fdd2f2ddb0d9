use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use clap::{Args, ValueEnum};
use coretabs::Session;
use coretabs::prelude::render::group::reported_filter;
use coretabs::prelude::render::sheet::case_user_columns;
use coretabs::prelude::render::{
    GroupedTable, RenderNode, SHOW_ALL, export_filename, records_to_sheet, sheet_records,
};
use serde_json::{Value, json};

use crate::error::Result;
use crate::input::{read_json, records_of, session_for};
use crate::render::OutputFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    /// Refund review rows with the tax office's column headers.
    Refund,
    Cases,
    Documents,
    /// One row per case-user role assignment.
    Users,
}

impl ExportKind {
    const fn file_prefix(self) -> &'static str {
        match self {
            Self::Refund => "Refund_Review_Data",
            Self::Cases => "My_Cases_Data",
            Self::Documents => "Case_Documents_Data",
            Self::Users => "Case_Users_Data",
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    #[arg(value_enum)]
    pub kind: ExportKind,

    /// Records (an array or a portal response), or `-` for standard input.
    pub input: PathBuf,

    /// Same filter values as the matching table (`all` keeps everything).
    #[arg(long)]
    pub filter: Option<String>,

    /// Case number added to the suggested file name.
    #[arg(long)]
    pub case_number: Option<String>,

    #[arg(long)]
    pub lang: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn run_export<F>(args: &ExportArgs, get_env: F, out: &mut dyn Write) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let records = records_of(read_json(&args.input)?)?;
    let session = session_for(args.lang.as_deref(), get_env)?;
    let sheet = export_sheet(&session, args.kind, &records, args.filter.as_deref());
    let filename = export_filename(
        args.kind.file_prefix(),
        args.case_number.as_deref(),
        &Local::now().naive_local(),
    );

    match args.format {
        OutputFormat::Text => {
            let node = RenderNode::section(filename, sheet);
            out.write_all(session.text_view().render(&node).as_bytes())?;
        }
        OutputFormat::Json => {
            let rows = sheet_records(&sheet, &session.labels());
            serde_json::to_writer_pretty(&mut *out, &json!({"filename": filename, "rows": rows}))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn export_sheet(
    session: &Session,
    kind: ExportKind,
    records: &[Value],
    filter: Option<&str>,
) -> RenderNode {
    let grouped = |table: GroupedTable| {
        let selected: Vec<Value> = table
            .group(records, filter)
            .into_iter()
            .flat_map(|group| group.records)
            .collect();
        records_to_sheet(&selected, &session.table_columns(table))
    };
    match kind {
        ExportKind::Refund => session.refund_export(records, filter.and_then(reported_filter)),
        ExportKind::Cases => grouped(GroupedTable::Cases),
        ExportKind::Documents => grouped(GroupedTable::Documents),
        ExportKind::Users => {
            let filter = filter.filter(|f| *f != SHOW_ALL);
            let selected: Vec<Value> = records
                .iter()
                .filter(|r| {
                    filter.is_none_or(|f| r.get("CaseRoleType").and_then(Value::as_str) == Some(f))
                })
                .cloned()
                .collect();
            records_to_sheet(&selected, &case_user_columns(|key| session.t(key)))
        }
    }
}
