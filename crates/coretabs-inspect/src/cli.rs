use std::io::Write;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::export::{ExportArgs, run_export};
use crate::logging::init_tracing;
use crate::render::{RenderArgs, run_render};
use crate::table::{TableArgs, run_table};
use crate::translate::{TranslateArgs, run_translate};
use crate::users::{UsersArgs, run_users};

#[derive(Debug, Parser)]
#[command(
    name = "coretabs-inspect",
    about = "Render CoreTabs payloads, grouped tables, exports and translations as text or JSON",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render an arbitrary JSON payload.
    Render(RenderArgs),

    /// Group case-user records by office.
    Users(UsersArgs),

    /// Filter and group cases, documents or refund review rows, or order
    /// routing steps.
    Table(TableArgs),

    /// Shape records into export sheet rows.
    Export(ExportArgs),

    /// Look up a translation.
    Translate(TranslateArgs),
}

pub fn run_from_env() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, |key| std::env::var(key).ok(), &mut out)
}

/// Run `cli`, reading environment variables through `get_env` and writing
/// results to `out`.
pub fn run<F>(cli: Cli, get_env: F, out: &mut dyn Write) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    match cli.command {
        Commands::Render(args) => run_render(&args, get_env, out),
        Commands::Users(args) => run_users(&args, get_env, out),
        Commands::Table(args) => run_table(&args, get_env, out),
        Commands::Export(args) => run_export(&args, get_env, out),
        Commands::Translate(args) => run_translate(&args, get_env, out),
    }
}
