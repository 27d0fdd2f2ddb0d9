use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::input::{read_json, records_of, session_for};
use crate::render::OutputFormat;

#[derive(Debug, Clone, Args)]
pub struct UsersArgs {
    /// Case-user records (an array or a portal response), or `-` for
    /// standard input.
    pub input: PathBuf,

    /// Keep only this `CaseRoleType` (`all` keeps everything).
    #[arg(long)]
    pub role: Option<String>,

    #[arg(long)]
    pub lang: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn run_users<F>(args: &UsersArgs, get_env: F, out: &mut dyn Write) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let records = records_of(read_json(&args.input)?)?;
    let session = session_for(args.lang.as_deref(), get_env)?;
    let groups = session.group_users(&records, args.role.as_deref());

    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &groups)?;
            writeln!(out)?;
        }
        OutputFormat::Text if groups.is_empty() => {
            writeln!(out, "{}", session.t("no_users_found"))?;
        }
        OutputFormat::Text => {
            let columns = session.user_columns();
            let view = session.text_view();
            for (i, group) in groups.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                out.write_all(view.render(&group.to_table(&columns)).as_bytes())?;
            }
        }
    }
    Ok(())
}
