use std::path::PathBuf;

use coretabs::prelude::i18n::I18nError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, InspectError>;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("string tables failed to load: {0}")]
    Catalog(#[from] I18nError),

    #[error("cannot read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl InspectError {
    /// Process exit status: 2 for usage errors, 1 for everything else.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(InspectError::invalid("bad").exit_code(), 2);
        let io = InspectError::from(std::io::Error::other("boom"));
        assert_eq!(io.exit_code(), 1);
        assert_eq!(InspectError::invalid("bad").to_string(), "invalid argument: bad");
    }
}
