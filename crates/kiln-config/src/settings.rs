//! Project-level settings shared by every build mode.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Browser reload plugin looked up in the config directory.
pub const RELOAD_PLUGIN: &str = "reload-plugin.js";

/// Settings read from `kiln.toml` (or the `kiln` field of `package.json`).
///
/// Every field has a default, so a project without a settings file gets the
/// conventional layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectSettings {
    /// Directory holding the alias file, relative to the root
    pub config_dir: PathBuf,

    /// Alias file location; defaults to `<config_dir>/alias.json`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_file: Option<PathBuf>,

    /// Entry module, relative to the source directory
    pub entry: PathBuf,

    /// Extensions tried when resolving extensionless imports
    pub extensions: Vec<String>,

    /// Build cache strategy
    pub cache: CacheKind,

    pub ports: Ports,

    /// Modules loaded into the live-reload proxy. The proxy runs with its
    /// own reload disabled, so the default is the project's reload plugin
    /// at `<config_dir>/reload-plugin.js`; an empty list turns reloading off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_plugins: Option<Vec<PathBuf>>,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from("config"),
            alias_file: None,
            entry: PathBuf::from("index.ts"),
            extensions: vec![".ts".to_string(), ".js".to_string()],
            cache: CacheKind::default(),
            ports: Ports::default(),
            proxy_plugins: None,
        }
    }
}

impl ProjectSettings {
    /// Alias file path relative to the project root.
    pub fn alias_file(&self) -> PathBuf {
        match &self.alias_file {
            Some(path) => path.clone(),
            None => self.config_dir.join("alias.json"),
        }
    }

    pub fn with_cache(mut self, cache: CacheKind) -> Self {
        self.cache = cache;
        self
    }

    /// Modules loaded into the live-reload proxy, relative to the root.
    pub fn proxy_plugins(&self) -> Vec<PathBuf> {
        match &self.proxy_plugins {
            Some(plugins) => plugins.clone(),
            None => vec![self.config_dir.join(RELOAD_PLUGIN)],
        }
    }
}

/// Cache strategy selector.
///
/// `Memory` is the default. `Filesystem` persists between runs under the
/// cache directory and is keyed by the environment flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKind {
    #[default]
    Memory,
    Filesystem,
}

/// The three ports of the dev setup.
///
/// The live-reload proxy listens on `proxy` and forwards to the raw dev
/// server on `dev_server`; `ui` serves the proxy's status page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ports {
    pub proxy: u16,
    pub dev_server: u16,
    pub ui: u16,
}

impl Default for Ports {
    fn default() -> Self {
        Self {
            proxy: 8080,
            dev_server: 8081,
            ui: 8082,
        }
    }
}
