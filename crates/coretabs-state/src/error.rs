use thiserror::Error;

pub type Result<T> = std::result::Result<T, StateError>;

/// Errors from snapshot restore. The core store operations never fail.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("state snapshot must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

impl StateError {
    #[must_use]
    pub fn not_an_object(value: &serde_json::Value) -> Self {
        let found = match value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "boolean",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        };
        Self::NotAnObject { found }
    }
}
