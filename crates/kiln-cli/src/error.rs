//! Error handling for the Kiln CLI.
//!
//! Library errors are wrapped in [`CliError`] and turned into miette reports
//! at the binary edge.

use std::path::PathBuf;

use miette::Report;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Settings, alias file, environment or validation failures
    #[error("Configuration error: {0}")]
    Config(#[from] kiln_config::ConfigError),

    /// Failed to write the composed configuration
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(kiln_config::ConfigError::AliasFileNotFound { path }) => {
            miette::miette!(
                help = "Create it or point `alias_file` in kiln.toml at the right place",
                "Alias file not found: {}",
                path.display()
            )
        }
        CliError::Config(kiln_config::ConfigError::Validation {
            message,
            hint: Some(hint),
        }) => miette::miette!(help = hint, "Invalid configuration: {}", message),
        _ => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_convert() {
        let err: CliError = kiln_config::ConfigError::Environment("bad".into()).into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("invalid environment: bad"));
    }

    #[test]
    fn alias_file_report_mentions_path() {
        let err = CliError::Config(kiln_config::ConfigError::AliasFileNotFound {
            path: PathBuf::from("/proj/config/alias.json"),
        });
        let report = cli_error_to_miette(err);
        assert!(report.to_string().contains("/proj/config/alias.json"));
    }
}
