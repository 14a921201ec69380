//! Error types for notebook
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (blank input, unknown note, bad args or config)
//! - 4: Operation failed (I/O error, unreadable data file)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the notebook CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for notebook operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("{0}")]
    Validation(String),

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed data file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Validation(_)
            | Error::NoteNotFound(_)
            | Error::InvalidConfig(_) => exit_codes::USER_ERROR,

            Error::Io(_)
            | Error::Parse { .. }
            | Error::Json(_)
            | Error::TomlParse(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured fields for the JSON error envelope
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::NoteNotFound(title) => Some(serde_json::json!({ "title": title })),
            Error::Parse { path, .. } => Some(serde_json::json!({ "path": path })),
            Error::Validation(message) | Error::InvalidConfig(message) => {
                Some(serde_json::json!({ "message": message }))
            }
            _ => None,
        }
    }
}

/// Result type alias for notebook operations
pub type Result<T> = std::result::Result<T, Error>;
