use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("io error during {op} ({path}): {source}")]
    IoPath {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("input is too large ({size_bytes} bytes; max {max_bytes} bytes)")]
    InputTooLarge { size_bytes: u64, max_bytes: u64 },

    #[error("invalid utf-8 in file: {0}")]
    InvalidUtf8(PathBuf),

    #[error("{op} failed: {path}")]
    OperationFailed { op: &'static str, path: PathBuf },
}

impl Error {
    pub fn io_path(op: &'static str, path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::IoPath {
            op,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn operation_failed(op: &'static str, path: impl AsRef<Path>) -> Self {
        Self::OperationFailed {
            op,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Stable, machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Error::IoPath { .. } => "io_path",
            Error::Json(_) => "json",
            Error::InvalidConfig(_) => "invalid_config",
            Error::InvalidPath(_) => "invalid_path",
            Error::InputTooLarge { .. } => "input_too_large",
            Error::InvalidUtf8(_) => "invalid_utf8",
            Error::OperationFailed { .. } => "operation_failed",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
