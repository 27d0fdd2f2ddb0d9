use std::io::Write;

use clap::Args;

use crate::error::Result;
use crate::input::session_for;

#[derive(Debug, Clone, Args)]
pub struct TranslateArgs {
    /// Catalog key, or a status label with `--status`.
    pub key: String,

    #[arg(long)]
    pub lang: Option<String>,

    /// Treat the argument as a portal status or role label.
    #[arg(long)]
    pub status: bool,
}

pub fn run_translate<F>(args: &TranslateArgs, get_env: F, out: &mut dyn Write) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let session = session_for(args.lang.as_deref(), get_env)?;
    let text = if args.status {
        session.translator().translate_status(&args.key)
    } else {
        session.t(&args.key)
    };
    writeln!(out, "{text}")?;
    Ok(())
}
