use std::path::PathBuf;

use swatch_style::PaletteError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Palette(#[from] PaletteError),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("profile not found: {name}")]
    ProfileNotFound { name: String },

    #[error("invalid profile line {line}: {message}")]
    InvalidProfile { line: usize, message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl CliError {
    /// 2 for rejected input, 1 for everything else.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Palette(_)
            | Self::ProfileNotFound { .. }
            | Self::InvalidProfile { .. }
            | Self::InvalidArgument { .. } => 2,
            Self::Io { .. } | Self::Json(_) => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
