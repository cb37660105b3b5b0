//! Assembly of the common build configuration.

use std::path::Path;

use serde_json::json;

use crate::alias::{load_aliases, AliasMap};
use crate::build::{
    AnalyzerOptions, BuildConfig, CacheStrategy, ClientLogLevel, ClientOptions, DefineOptions,
    DevMiddlewareOptions, DevServerOptions, Devtool, HotMode, LinterOptions, LiveReloadOptions,
    LoggingOptions, Mode, ModuleOptions, Optimization, OutputOptions, PluginDescriptor,
    ResolveOptions, StaticOptions, TransformRule,
};
use crate::discovery::ConfigDiscovery;
use crate::env::EnvironmentFlags;
use crate::error::Result;
use crate::overlay::{OverlayOutcome, ProductionOverlay};
use crate::paths::{PathSet, ProjectRoot};
use crate::settings::{CacheKind, Ports, ProjectSettings};

/// Infrastructure log source of the dev server's startup banner.
pub const DEV_SERVER_LOG_SOURCE: &str = "dev-server";

/// Build-time constant carrying the production flag.
pub const PRODUCTION_CONSTANT: &str = "__IS_PRODUCTION__";

/// Public URLs of the dev setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerUrls {
    pub proxy: String,
    pub ui: String,
    pub dev_server: String,
}

impl ServerUrls {
    pub fn new(host: &str, ports: &Ports) -> Self {
        Self {
            proxy: format!("http://{}:{}/", host, ports.proxy),
            ui: format!("http://{}:{}/", host, ports.ui),
            dev_server: format!("http://{}:{}/", host, ports.dev_server),
        }
    }
}

/// Inputs of one composition, owned for the duration of a build run.
///
/// # Example
///
/// ```
/// use kiln_config::{AliasMap, Composer, EnvironmentFlags, ProjectRoot, ProjectSettings};
///
/// let root = ProjectRoot::new("/proj").unwrap();
/// let aliases = AliasMap::resolve(&root, [("@app", "src/app")]).unwrap();
/// let composer = Composer::new(root, aliases, EnvironmentFlags::default(), ProjectSettings::default());
///
/// let config = composer.compose();
/// assert_eq!(config.entry.to_str(), Some("/proj/src/index.ts"));
/// ```
#[derive(Debug, Clone)]
pub struct Composer {
    root: ProjectRoot,
    paths: PathSet,
    aliases: AliasMap,
    flags: EnvironmentFlags,
    settings: ProjectSettings,
}

impl Composer {
    pub fn new(
        root: ProjectRoot,
        aliases: AliasMap,
        flags: EnvironmentFlags,
        settings: ProjectSettings,
    ) -> Self {
        let paths = PathSet::from_root(&root);
        Self {
            root,
            paths,
            aliases,
            flags,
            settings,
        }
    }

    /// Discover settings under `root` and load its alias file.
    ///
    /// # Errors
    ///
    /// Fails when the settings file is malformed or the alias file is missing
    /// or malformed; nothing is composed in that case.
    pub fn load(root: impl AsRef<Path>, flags: EnvironmentFlags) -> Result<Self> {
        let root = ProjectRoot::new(root)?;
        let settings = ConfigDiscovery::new(root.path()).load()?;
        let aliases = load_aliases(&root, settings.alias_file())?;
        Ok(Self::new(root, aliases, flags, settings))
    }

    pub fn root(&self) -> &ProjectRoot {
        &self.root
    }

    pub fn paths(&self) -> &PathSet {
        &self.paths
    }

    pub fn aliases(&self) -> &AliasMap {
        &self.aliases
    }

    pub fn flags(&self) -> &EnvironmentFlags {
        &self.flags
    }

    pub fn settings(&self) -> &ProjectSettings {
        &self.settings
    }

    pub fn urls(&self) -> ServerUrls {
        ServerUrls::new(&self.flags.host, &self.settings.ports)
    }

    /// Compose the common (development) configuration.
    pub fn compose(&self) -> BuildConfig {
        let config = BuildConfig {
            mode: Mode::Development,
            context: self.root.path().to_path_buf(),
            entry: self.paths.source_dir.join(&self.settings.entry),
            output: OutputOptions {
                clean: true,
                path: self.paths.output_dir.clone(),
                filename: "[name].js".to_string(),
                public_path: "/".to_string(),
            },
            resolve: ResolveOptions {
                alias: self.aliases.clone(),
                extensions: self.settings.extensions.clone(),
            },
            cache: self.cache_strategy(),
            module: ModuleOptions {
                rules: vec![self.typescript_rule()],
            },
            plugins: self.plugins(),
            dev_server: self.dev_server(),
            devtool: Devtool::Eval,
            optimization: Optimization::default(),
        };

        tracing::debug!(
            plugins = config.plugins.len(),
            aliases = self.aliases.len(),
            "Composed common build config"
        );

        config
    }

    /// Compose the common configuration and apply the production overlay.
    pub fn compose_production(&self) -> OverlayOutcome {
        ProductionOverlay::new(&self.flags).apply(&self.compose())
    }

    fn cache_strategy(&self) -> CacheStrategy {
        match self.settings.cache {
            CacheKind::Memory => CacheStrategy::Memory,
            CacheKind::Filesystem => CacheStrategy::Filesystem {
                name: format!(
                    "{}-{}-{}",
                    self.flags.mode_name(),
                    if self.flags.is_fast { "fast" } else { "nonFast" },
                    if self.flags.is_debug { "debug" } else { "nonDebug" },
                ),
                cache_directory: self.paths.cache_dir.clone(),
            },
        }
    }

    fn typescript_rule(&self) -> TransformRule {
        TransformRule {
            test: r"\.ts$".to_string(),
            loader: "ts-loader".to_string(),
            options: json!({
                "useCaseSensitiveFileNames": true,
                "onlyCompileBundledFiles": true,
                "configFile": self.paths.type_config_path,
                "appendTsSuffixTo": [r"\.vue$"],
            }),
        }
    }

    fn plugins(&self) -> Vec<PluginDescriptor> {
        let urls = self.urls();
        let ports = &self.settings.ports;
        let mut plugins = Vec::with_capacity(5);

        if self.flags.is_analyze {
            plugins.push(PluginDescriptor::BundleAnalyzer(AnalyzerOptions::default()));
        }

        plugins.push(PluginDescriptor::DefineConstants(
            DefineOptions::default().with(PRODUCTION_CONSTANT, self.flags.is_production),
        ));

        plugins.push(PluginDescriptor::Linter(LinterOptions {
            extensions: vec!["js".into(), "ts".into(), "vue".into()],
            lint_dirty_modules_only: true,
            override_config_file: self.paths.lint_config_path.clone(),
        }));

        plugins.push(PluginDescriptor::LiveReloadProxy(LiveReloadOptions {
            host: self.flags.host.clone(),
            port: ports.proxy,
            proxy: urls.dev_server.clone(),
            open: false,
            log_level: "silent".to_string(),
            ui_port: ports.ui,
            plugins: self
                .settings
                .proxy_plugins()
                .iter()
                .map(|p| self.root.resolve(p))
                .collect(),
            reload: false,
        }));

        plugins.push(PluginDescriptor::LoggingAdapter(LoggingOptions {
            proxy_url: urls.proxy,
            ui_url: urls.ui,
            dev_server_url: urls.dev_server,
            suppressed_log_source: DEV_SERVER_LOG_SOURCE.to_string(),
        }));

        plugins
    }

    fn dev_server(&self) -> DevServerOptions {
        DevServerOptions {
            host: self.flags.host.clone(),
            port: self.settings.ports.dev_server,
            hot: HotMode::Only,
            client: ClientOptions {
                logging: ClientLogLevel::None,
            },
            dev_middleware: DevMiddlewareOptions {
                write_to_disk: self.flags.is_debug,
            },
            static_files: StaticOptions {
                public_path: "/".to_string(),
            },
        }
    }
}
