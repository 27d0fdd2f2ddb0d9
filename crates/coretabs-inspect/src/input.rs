use std::fs;
use std::io::Read;
use std::path::Path;

use coretabs::Session;
use coretabs::prelude::Language;
use coretabs::prelude::i18n::detect_language_from_env;
use serde_json::Value;

use crate::error::{InspectError, Result};

/// Path argument meaning "read standard input".
pub const STDIN_PATH: &str = "-";

/// Read and parse a JSON document from `path` or standard input.
pub fn read_json(path: &Path) -> Result<Value> {
    let raw = if path.as_os_str() == STDIN_PATH {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;
        raw
    } else {
        fs::read_to_string(path).map_err(|source| InspectError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?
    };
    let value = serde_json::from_str(&raw)?;
    tracing::debug!(message = "inspect.input", path = %path.display(), bytes = raw.len());
    Ok(value)
}

/// Records of a portal list response: a bare array, or the `Payload.Data`
/// array of the response envelope.
pub fn records_of(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(records) => Ok(records),
        Value::Object(mut map) => match map.remove("Payload") {
            Some(Value::Object(mut payload)) => match payload.remove("Data") {
                Some(Value::Array(records)) => Ok(records),
                Some(Value::Null) | None => Ok(Vec::new()),
                Some(_) => Err(InspectError::invalid("Payload.Data must be an array")),
            },
            _ => Err(InspectError::invalid(
                "expected a JSON array of records or a response with Payload.Data",
            )),
        },
        _ => Err(InspectError::invalid(
            "expected a JSON array of records or a response with Payload.Data",
        )),
    }
}

/// Session in the requested language, or the one detected from the
/// environment when none is given.
pub fn session_for<F>(lang: Option<&str>, get_env: F) -> Result<Session>
where
    F: Fn(&str) -> Option<String>,
{
    let language = match lang {
        Some(code) => Language::from_code(code)
            .ok_or_else(|| InspectError::invalid(format!("unsupported language '{code}'")))?,
        None => detect_language_from_env(get_env),
    };
    Ok(Session::new(language)?)
}
