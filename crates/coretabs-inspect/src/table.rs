use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use coretabs::prelude::render::group::default_cases_filter;
use coretabs::prelude::render::GroupedTable;
use serde_json::{Value, json};

use crate::error::Result;
use crate::input::{read_json, records_of, session_for};
use crate::render::OutputFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableKind {
    /// The user's cases, grouped by case type.
    Cases,
    /// Case documents, grouped by document type.
    Documents,
    /// Refund review rows, grouped by seller.
    Refund,
    /// Routing workflow steps in process order.
    Routing,
}

impl TableKind {
    fn grouped(self) -> Option<GroupedTable> {
        match self {
            Self::Cases => Some(GroupedTable::Cases),
            Self::Documents => Some(GroupedTable::Documents),
            Self::Refund => Some(GroupedTable::RefundReview),
            Self::Routing => None,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct TableArgs {
    #[arg(value_enum)]
    pub kind: TableKind,

    /// Records (an array or a portal response), or `-` for standard input.
    pub input: PathBuf,

    /// Filter value for the table's status field, `true`/`false` for
    /// refund review, or `all`. Cases start on "In Progress" when present.
    #[arg(long)]
    pub filter: Option<String>,

    /// Print the available filter values instead of the table.
    #[arg(long)]
    pub list_filters: bool,

    #[arg(long)]
    pub lang: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn run_table<F>(args: &TableArgs, get_env: F, out: &mut dyn Write) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let value = read_json(&args.input)?;
    let session = session_for(args.lang.as_deref(), get_env)?;

    let Some(table) = args.kind.grouped() else {
        let steps = workflow_steps(value);
        let node = session.render_workflow(&steps);
        match args.format {
            OutputFormat::Text => out.write_all(session.text_view().render(&node).as_bytes())?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &node)?;
                writeln!(out)?;
            }
        }
        return Ok(());
    };
    let records = records_of(value)?;

    if args.list_filters {
        let options = session.filter_options(&records, table.filter_field());
        match args.format {
            OutputFormat::Text => {
                for (value, label) in options {
                    writeln!(out, "{value}\t{label}")?;
                }
            }
            OutputFormat::Json => {
                let options: Vec<Value> = options
                    .into_iter()
                    .map(|(value, label)| json!({"value": value, "label": label}))
                    .collect();
                serde_json::to_writer_pretty(&mut *out, &options)?;
                writeln!(out)?;
            }
        }
        return Ok(());
    }

    let filter = match (args.filter.as_deref(), table) {
        (Some(filter), _) => Some(filter),
        (None, GroupedTable::Cases) => default_cases_filter(&records),
        (None, _) => None,
    };
    let groups = table.group(&records, filter);
    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &groups)?;
            writeln!(out)?;
        }
        OutputFormat::Text if groups.is_empty() => {
            writeln!(out, "{}", session.t(table.empty_message_key()))?;
        }
        OutputFormat::Text => {
            let view = session.text_view();
            for (i, node) in session.group_tables(table, &groups).iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                out.write_all(view.render(node).as_bytes())?;
            }
        }
    }
    Ok(())
}

/// `WorkflowStepList` of a routing response (inside `Payload` or at the
/// top level), or the value itself.
fn workflow_steps(mut value: Value) -> Value {
    if let Some(payload) = value.get_mut("Payload").map(Value::take) {
        value = payload;
    }
    match value.get_mut("WorkflowStepList").map(Value::take) {
        Some(steps) => steps,
        None => value,
    }
}
