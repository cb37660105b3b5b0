use serde::{Serialize, Serializer};

/// Build mode handed to the bundler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Development,
    Production,
}

/// Source map policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Devtool {
    /// Fast per-module source maps (development default)
    #[default]
    Eval,
    /// Full external `.map` files
    SourceMap,
    /// No source maps at all
    Disabled,
}

impl Devtool {
    pub fn emits_source_maps(&self) -> bool {
        !matches!(self, Devtool::Disabled)
    }
}

// The bundler expects a literal `false` rather than a string for "off".
impl Serialize for Devtool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Devtool::Eval => serializer.serialize_str("eval"),
            Devtool::SourceMap => serializer.serialize_str("source-map"),
            Devtool::Disabled => serializer.serialize_bool(false),
        }
    }
}

/// Hot module replacement behavior of the dev server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HotMode {
    /// Hot replacement with full-reload fallback
    Enabled,
    /// Hot replacement only, never reload the page
    #[default]
    Only,
}

impl Serialize for HotMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HotMode::Enabled => serializer.serialize_bool(true),
            HotMode::Only => serializer.serialize_str("only"),
        }
    }
}

/// Log level of the in-browser dev-server client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientLogLevel {
    #[default]
    None,
    Error,
    Warn,
    Info,
    Log,
    Verbose,
}
