//! Command-line interface definition.
//!
//! - `kiln inspect` - Compose the configuration and print or write it
//! - `kiln check` - Validate the project layout against the composed configuration

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Kiln - build configuration composer
#[derive(Parser, Debug)]
#[command(
    name = "kiln",
    version,
    about = "Compose bundler configuration for front-end projects",
    long_about = "Kiln reads kiln.toml, the alias file and KILN_* environment variables\n\
                  and composes the configuration handed to the bundler."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the composed bundler configuration as JSON
    ///
    /// The production overlay is applied when KILN_PRODUCTION (or
    /// NODE_ENV=production) is set, or when --production is passed.
    Inspect(InspectArgs),

    /// Validate settings, aliases and the entry point
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Project root
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// Apply the production overlay regardless of the environment
    #[arg(long)]
    pub production: bool,

    /// Write the configuration to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Project root
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub root: PathBuf,
}
