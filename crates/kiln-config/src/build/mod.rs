//! Composed build configuration handed to the external bundler.

mod plugin;
mod types;

use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

use crate::alias::AliasMap;
use crate::error::{ConfigError, Result};

pub use plugin::{
    AnalyzerMode, AnalyzerOptions, DefineOptions, LinterOptions, LiveReloadOptions,
    LoggingOptions, MinifierOptions, PluginDescriptor,
};
pub use types::{ClientLogLevel, Devtool, HotMode, Mode};

/// Complete bundler configuration.
///
/// Built once per invocation by [`Composer`](crate::Composer) and never
/// mutated afterwards; overlays produce a new value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    pub mode: Mode,

    /// Base directory for resolving entry points
    pub context: PathBuf,

    pub entry: PathBuf,

    pub output: OutputOptions,

    pub resolve: ResolveOptions,

    pub cache: CacheStrategy,

    pub module: ModuleOptions,

    /// Plugins in registration order
    pub plugins: Vec<PluginDescriptor>,

    pub dev_server: DevServerOptions,

    pub devtool: Devtool,

    #[serde(skip_serializing_if = "Optimization::is_empty")]
    pub optimization: Optimization,
}

impl BuildConfig {
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name() == name)
    }

    pub fn find_plugin(&self, name: &str) -> Option<&PluginDescriptor> {
        self.plugins.iter().find(|p| p.name() == name)
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::Validation {
            message: format!("config is not serializable: {}", e),
            hint: None,
        })
    }

    /// Pretty JSON document for the bundler entry point
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Validation {
            message: format!("config is not serializable: {}", e),
            hint: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    /// Empty the output directory before emitting
    pub clean: bool,
    pub path: PathBuf,
    pub filename: String,
    pub public_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveOptions {
    pub alias: AliasMap,
    pub extensions: Vec<String>,
}

/// Cache strategy of the bundler
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum CacheStrategy {
    Memory,
    Filesystem {
        /// Cache partition, one per flag combination
        name: String,
        cache_directory: PathBuf,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModuleOptions {
    pub rules: Vec<TransformRule>,
}

/// Loader applied to every module whose path matches `test`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformRule {
    /// Regular expression source matched against module paths
    pub test: String,
    pub loader: String,
    pub options: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerOptions {
    pub host: String,
    pub port: u16,
    pub hot: HotMode,
    pub client: ClientOptions,
    pub dev_middleware: DevMiddlewareOptions,
    #[serde(rename = "static")]
    pub static_files: StaticOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClientOptions {
    pub logging: ClientLogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevMiddlewareOptions {
    pub write_to_disk: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticOptions {
    pub public_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Optimization {
    pub minimizer: Vec<PluginDescriptor>,
}

impl Optimization {
    pub fn is_empty(&self) -> bool {
        self.minimizer.is_empty()
    }

    pub fn has_minifier(&self) -> bool {
        self.minimizer
            .iter()
            .any(|p| matches!(p, PluginDescriptor::Minifier(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_cache_serializes_type_only() {
        assert_eq!(
            serde_json::to_value(CacheStrategy::Memory).unwrap(),
            json!({ "type": "memory" })
        );
    }

    #[test]
    fn filesystem_cache_serializes_camel_case_fields() {
        let cache = CacheStrategy::Filesystem {
            name: "development-nonFast-nonDebug".to_string(),
            cache_directory: PathBuf::from("/proj/node_modules/.cache/kiln"),
        };
        assert_eq!(
            serde_json::to_value(cache).unwrap(),
            json!({
                "type": "filesystem",
                "name": "development-nonFast-nonDebug",
                "cacheDirectory": "/proj/node_modules/.cache/kiln"
            })
        );
    }

    #[test]
    fn empty_optimization_has_no_minifier() {
        assert!(Optimization::default().is_empty());
        assert!(!Optimization::default().has_minifier());
    }
}
