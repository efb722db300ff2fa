//! Draft Store Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Draft persistence errors
#[derive(Error, Debug)]
pub enum DraftError {
    /// Reading or writing the draft file failed
    #[error("Draft I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Stored draft could not be (de)serialized
    #[error("Draft serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No draft directory could be determined
    #[error("Cannot resolve draft directory: {0}")]
    DirectoryUnavailable(String),

    /// Configuration rejected by `BuilderConfig::validate`
    #[error("Invalid builder configuration: {0}")]
    InvalidConfig(String),
}

impl DraftError {
    /// Create an I/O error with the offending path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
