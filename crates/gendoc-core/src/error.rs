//! Error types for the gendoc core library
//!
//! Two failure classes exist and both abort a generation run: configuration
//! errors (a sample or schema that cannot be introspected) and I/O errors
//! raised by an output sink. JSON errors come from serializing samples.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for gendoc operations
#[derive(Error, Debug)]
pub enum Error {
    /// A sample or schema description that cannot be turned into fields
    #[error("Configuration error: {message}{}", context.as_ref().map(|c| format!(" (in {})", c)).unwrap_or_default())]
    Configuration {
        message: String,
        context: Option<String>,
    },

    /// Output sink failures (directory reset, page writes)
    #[error("IO error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Sample serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error without context
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            context: None,
        }
    }

    /// Create an I/O error for the given path
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Attach context to a configuration error. Other variants are returned unchanged.
    pub fn with_context(self, ctx: impl Into<String>) -> Self {
        match self {
            Error::Configuration { message, context: None } => Error::Configuration {
                message,
                context: Some(ctx.into()),
            },
            other => other,
        }
    }

    /// True for bad schema/sample input
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration { .. })
    }

    /// True for environment failures
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
