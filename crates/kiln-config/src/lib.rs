//! Build configuration composer for front-end bundler pipelines.
//!
//! kiln turns a project root, its alias file and the process environment
//! into a single [`BuildConfig`] for an external bundler, optionally derives
//! a production variant from it, and drives console reporting through the
//! bundler's lifecycle hooks.
//!
//! ```no_run
//! use kiln_config::{Composer, EnvironmentFlags};
//!
//! let flags = EnvironmentFlags::from_env()?;
//! let composer = Composer::load(".", flags)?;
//! let config = if composer.flags().is_production {
//!     composer.compose_production().config
//! } else {
//!     composer.compose()
//! };
//! println!("{}", config.to_json_pretty()?);
//! # Ok::<(), kiln_config::ConfigError>(())
//! ```

pub mod alias;
pub mod build;
pub mod compose;
pub mod discovery;
pub mod env;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod overlay;
pub mod paths;
pub mod plugins;
pub mod settings;
pub mod validation;

// Re-export main types
pub use alias::{load_aliases, AliasMap};
pub use build::*;
pub use compose::{Composer, ServerUrls, DEV_SERVER_LOG_SOURCE, PRODUCTION_CONSTANT};
pub use env::EnvironmentFlags;
pub use error::*;
pub use lifecycle::{BuildStats, Hook, Hooks, LogType, Progress};
pub use overlay::{OverlayOutcome, ProductionOverlay};
pub use paths::{resolve, PathSet, ProjectRoot};
pub use plugins::{apply_plugins, instantiate, BuildPlugin};
pub use settings::*;

// Re-export discovery and validation
pub use discovery::ConfigDiscovery;
pub use validation::{validate_fs, validate_schema, ConfigValidator, FsValidator, SchemaValidator};
