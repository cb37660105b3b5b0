use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Plugin entry of a [`BuildConfig`](super::BuildConfig).
///
/// Descriptors are plain data. All variants except `LoggingAdapter` are
/// executed by the external bundler; see [`crate::plugins::instantiate`] for
/// the in-process side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "plugin", rename_all = "kebab-case")]
pub enum PluginDescriptor {
    BundleAnalyzer(AnalyzerOptions),
    DefineConstants(DefineOptions),
    Linter(LinterOptions),
    LiveReloadProxy(LiveReloadOptions),
    LoggingAdapter(LoggingOptions),
    Minifier(MinifierOptions),
}

impl PluginDescriptor {
    pub fn name(&self) -> &'static str {
        match self {
            PluginDescriptor::BundleAnalyzer(_) => "bundle-analyzer",
            PluginDescriptor::DefineConstants(_) => "define-constants",
            PluginDescriptor::Linter(_) => "linter",
            PluginDescriptor::LiveReloadProxy(_) => "live-reload-proxy",
            PluginDescriptor::LoggingAdapter(_) => "logging",
            PluginDescriptor::Minifier(_) => "minifier",
        }
    }

    pub fn is_bundle_analyzer(&self) -> bool {
        matches!(self, PluginDescriptor::BundleAnalyzer(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerMode {
    /// Serve the interactive report over HTTP
    #[default]
    Server,
    /// Write a static HTML report next to the bundle
    Static,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerOptions {
    pub analyzer_mode: AnalyzerMode,
}

/// Build-time constants replaced in application code
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DefineOptions {
    pub constants: IndexMap<String, Value>,
}

impl DefineOptions {
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constants.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinterOptions {
    pub extensions: Vec<String>,
    /// Only lint modules that changed since the last compilation
    pub lint_dirty_modules_only: bool,
    pub override_config_file: PathBuf,
}

/// Live-reload proxy sitting in front of the dev server
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveReloadOptions {
    pub host: String,
    pub port: u16,
    /// Upstream dev-server URL
    pub proxy: String,
    pub open: bool,
    pub log_level: String,
    pub ui_port: u16,
    pub plugins: Vec<PathBuf>,
    /// Let the bundler trigger reloads itself (the proxy plugins do it instead)
    pub reload: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingOptions {
    pub proxy_url: String,
    pub ui_url: String,
    pub dev_server_url: String,
    /// Infrastructure log source whose output is swallowed
    pub suppressed_log_source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinifierOptions {
    pub extract_comments: bool,
    /// Allow renaming of top-level bindings
    pub toplevel: bool,
    /// Compression passes
    pub passes: u32,
}

impl MinifierOptions {
    /// Settings used for production bundles.
    pub fn aggressive() -> Self {
        Self {
            extract_comments: false,
            toplevel: true,
            passes: 10,
        }
    }
}
