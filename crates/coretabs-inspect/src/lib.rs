#![forbid(unsafe_code)]

//! Command-line inspection of CoreTabs payloads.
//!
//! ```text
//! coretabs-inspect render case.json --title Case
//! coretabs-inspect users users.json --role "Team Member" --lang id
//! coretabs-inspect table cases mycases.json --filter all
//! coretabs-inspect export refund refund.json --filter true --format json
//! coretabs-inspect translate "In Progress" --status --lang id
//! ```
//!
//! `CORETABS_LANG` picks the default language and `CORETABS_LOG` the log
//! filter; logs go to stderr.

pub mod cli;
pub mod error;
pub mod export;
pub mod input;
pub mod logging;
pub mod render;
pub mod table;
pub mod translate;
pub mod users;

pub use cli::{Cli, Commands, run, run_from_env};
pub use error::{InspectError, Result};
