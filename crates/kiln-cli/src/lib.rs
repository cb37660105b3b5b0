//! Kiln CLI - compose bundler configuration for front-end projects.
//!
//! The CLI reads a project's settings, alias file and environment flags,
//! composes the bundler configuration with [`kiln_config`] and hands it to
//! the external bundler as JSON.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`commands`] - `inspect` and `check`
//! - [`error`] - Error types and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - Status messages on stderr

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
