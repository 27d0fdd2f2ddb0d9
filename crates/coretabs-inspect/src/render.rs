use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use coretabs::prelude::RenderConfig;

use crate::error::Result;
use crate::input::{read_json, session_for};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain text.
    #[default]
    Text,
    /// The serialized render tree.
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// JSON file to render, or `-` for standard input.
    pub input: PathBuf,

    #[arg(long, default_value = "Payload")]
    pub title: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Inline nested objects with at most this many keys.
    #[arg(long = "flatten-max-keys")]
    pub flatten_max_keys: Option<usize>,

    /// Show nested arrays and objects in full up to this size.
    #[arg(long = "inline-max-items")]
    pub inline_max_items: Option<usize>,

    /// Items listed before the ellipsis in summaries.
    #[arg(long = "preview-items")]
    pub preview_items: Option<usize>,

    /// Character count above which strings are treated as long text.
    #[arg(long = "long-text")]
    pub long_text: Option<usize>,

    /// Language for boolean labels (`en` or `id`).
    #[arg(long)]
    pub lang: Option<String>,
}

impl RenderArgs {
    fn config(&self) -> RenderConfig {
        let mut config = RenderConfig::default();
        if let Some(n) = self.flatten_max_keys {
            config = config.with_flatten_max_keys(n);
        }
        if let Some(n) = self.inline_max_items {
            config = config.with_inline_max_items(n);
        }
        if let Some(n) = self.preview_items {
            config = config.with_preview_items(n);
        }
        if let Some(n) = self.long_text {
            config = config.with_long_text_threshold(n);
        }
        config
    }
}

pub fn run_render<F>(args: &RenderArgs, get_env: F, out: &mut dyn Write) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let value = read_json(&args.input)?;
    let session = session_for(args.lang.as_deref(), get_env)?.with_render_config(args.config());
    let node = session.render(&value, &args.title);
    match args.format {
        OutputFormat::Text => out.write_all(session.text_view().render(&node).as_bytes())?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &node)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
