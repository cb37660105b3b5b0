//! Error types for configuration loading, composition and validation.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Fatal configuration failures.
///
/// Any of these aborts composition before the external bundler is started.
#[derive(Debug, Error)]
pub enum ConfigError {
    // Alias file errors
    #[error("alias file not found: {}", path.display())]
    AliasFileNotFound { path: PathBuf },

    #[error("malformed alias file {}: {message}", path.display())]
    MalformedAliasFile { path: PathBuf, message: String },

    #[error("invalid alias '{alias}': {message}")]
    InvalidAlias { alias: String, message: String },

    // Project settings (kiln.toml)
    #[error("invalid settings in {}: {message}", path.display())]
    InvalidSettings { path: PathBuf, message: String },

    // Environment variables that cannot be read as their flag type
    #[error("invalid environment: {0}")]
    Environment(String),

    // Schema validation errors (no filesystem checks)
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        hint: Option<String>,
    },

    // Filesystem validation errors (for CLI use)
    #[error("entry point not found: {}", path.display())]
    EntryNotFound { path: PathBuf },

    #[error("alias '{alias}' points to a missing path: {}", path.display())]
    AliasTargetNotFound { alias: String, path: PathBuf },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Environment(err.to_string())
    }
}

/// Non-fatal misconfiguration signals.
///
/// Warnings are logged when they are raised and handed back to the caller,
/// the build carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentWarning {
    /// The production overlay was applied while the environment is not production.
    ProductionOverlayOutsideProduction,
}

impl fmt::Display for EnvironmentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentWarning::ProductionOverlayOutsideProduction => {
                f.write_str("using the production build config outside of a production environment")
            }
        }
    }
}
