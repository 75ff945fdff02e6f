//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! the failure modes of the gendoc command-line tool.

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (stdout, manifest reads)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from gendoc-core (bad samples, page names, sink failures)
    #[error("{0}")]
    Core(#[from] gendoc_core::Error),

    /// Manifest file missing
    #[error("Manifest not found: {}", path.display())]
    ManifestNotFound { path: PathBuf },

    /// Unsupported or unparsable manifest
    #[error("Invalid manifest {}: expected {} format", path.display(), expected)]
    InvalidFormat { path: PathBuf, expected: String },

    /// No endpoint matched a title or path
    #[error("No endpoint with title or path '{}'", query)]
    EndpointNotFound { query: String },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic error with context
    #[error("{message}")]
    Other {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl Error {
    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            source: None,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(e) if e.is_io() => 3,
            Self::Core(_) => 2,
            Self::ManifestNotFound { .. } => 4,
            Self::InvalidFormat { .. } => 5,
            Self::EndpointNotFound { .. } => 6,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Toml(_) => 14,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::EndpointNotFound { .. })
    }
}

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context with a closure (only evaluated on error)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other {
                message: format!("{}: {}", f(), inner),
                source: Some(anyhow::Error::new(inner)),
            }
        })
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let config = Error::from(gendoc_core::Error::configuration("bad sample"));
        assert_eq!(config.exit_code(), 2);

        let io = Error::from(gendoc_core::Error::io(
            "docs",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        ));
        assert_eq!(io.exit_code(), 3);

        let missing = Error::EndpointNotFound {
            query: "/nope".to_string(),
        };
        assert_eq!(missing.exit_code(), 6);
        assert!(missing.should_show_help());
    }

    #[test]
    fn test_with_context_keeps_source() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result.with_context(|| "reading manifest".to_string()).unwrap_err();

        assert!(err.to_string().starts_with("reading manifest: IO error: gone"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_format_error_plain() {
        let err = Error::other("boom");
        assert_eq!(format_error(&err, false), "Error: boom");
    }
}
