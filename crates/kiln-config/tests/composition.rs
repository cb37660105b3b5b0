//! Tests for composing the common build configuration.

use kiln_config::{
    AliasMap, CacheStrategy, Composer, ConfigError, Devtool, EnvironmentFlags, HotMode, Mode,
    PluginDescriptor, ProjectRoot, ProjectSettings, PRODUCTION_CONSTANT,
};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn composer(flags: EnvironmentFlags) -> Composer {
    let root = ProjectRoot::new("/proj").unwrap();
    let aliases = AliasMap::resolve(&root, [("@app", "src/app")]).unwrap();
    Composer::new(root, aliases, flags, ProjectSettings::default())
}

#[test]
fn analyzer_absent_without_analyze_flag() {
    for is_production in [false, true] {
        let flags = EnvironmentFlags {
            is_production,
            is_analyze: false,
            ..EnvironmentFlags::default()
        };
        let config = composer(flags).compose();
        assert!(!config.plugins.iter().any(PluginDescriptor::is_bundle_analyzer));
    }
}

#[test]
fn analyzer_present_with_analyze_flag() {
    for is_production in [false, true] {
        let flags = EnvironmentFlags {
            is_production,
            is_analyze: true,
            ..EnvironmentFlags::default()
        };
        let config = composer(flags).compose();
        assert!(config.plugins.iter().any(PluginDescriptor::is_bundle_analyzer));
    }
}

#[test]
fn analyze_in_development_keeps_dev_defaults() {
    let flags = EnvironmentFlags {
        is_production: false,
        is_analyze: true,
        ..EnvironmentFlags::default()
    };
    let config = composer(flags).compose();

    assert!(config.has_plugin("bundle-analyzer"));
    assert_eq!(config.mode, Mode::Development);
    assert!(config.devtool.emits_source_maps());
    assert_eq!(config.devtool, Devtool::Eval);
}

#[test]
fn fixed_paths_follow_root() {
    let config = composer(EnvironmentFlags::default()).compose();

    assert_eq!(config.context, PathBuf::from("/proj"));
    assert_eq!(config.entry, PathBuf::from("/proj/src/index.ts"));
    assert_eq!(config.output.path, PathBuf::from("/proj/out"));
    assert_eq!(config.output.filename, "[name].js");
    assert_eq!(config.output.public_path, "/");
    assert!(config.output.clean);
}

#[test]
fn resolution_includes_aliases_and_extensions() {
    let config = composer(EnvironmentFlags::default()).compose();

    assert_eq!(
        config.resolve.alias.get("@app"),
        Some(Path::new("/proj/src/app"))
    );
    assert_eq!(config.resolve.extensions, vec![".ts", ".js"]);
}

#[test]
fn memory_cache_is_the_default() {
    let config = composer(EnvironmentFlags::default()).compose();
    assert_eq!(config.cache, CacheStrategy::Memory);
}

#[test]
fn define_constants_carry_production_flag() {
    for is_production in [false, true] {
        let flags = EnvironmentFlags {
            is_production,
            ..EnvironmentFlags::default()
        };
        let config = composer(flags).compose();

        let Some(PluginDescriptor::DefineConstants(define)) =
            config.find_plugin("define-constants")
        else {
            panic!("define-constants plugin missing");
        };
        assert_eq!(define.constants[PRODUCTION_CONSTANT], json!(is_production));
    }
}

#[test]
fn dev_server_and_proxy_use_separate_ports() {
    let flags = EnvironmentFlags {
        host: "10.0.0.5".to_string(),
        is_debug: true,
        ..EnvironmentFlags::default()
    };
    let config = composer(flags).compose();

    assert_eq!(config.dev_server.host, "10.0.0.5");
    assert_eq!(config.dev_server.port, 8081);
    assert_eq!(config.dev_server.hot, HotMode::Only);
    assert!(config.dev_server.dev_middleware.write_to_disk);

    let Some(PluginDescriptor::LiveReloadProxy(proxy)) = config.find_plugin("live-reload-proxy")
    else {
        panic!("live-reload-proxy plugin missing");
    };
    assert_eq!(proxy.port, 8080);
    assert_eq!(proxy.ui_port, 8082);
    assert_eq!(proxy.proxy, "http://10.0.0.5:8081/");
    assert!(!proxy.open);
    assert!(!proxy.reload);
    assert_ne!(proxy.port, config.dev_server.port);
}

#[test]
fn proxy_loads_reload_plugin_by_default() {
    let config = composer(EnvironmentFlags::default()).compose();

    let Some(PluginDescriptor::LiveReloadProxy(proxy)) = config.find_plugin("live-reload-proxy")
    else {
        panic!("live-reload-proxy plugin missing");
    };
    assert_eq!(
        proxy.plugins,
        vec![PathBuf::from("/proj/config/reload-plugin.js")]
    );
}

#[test]
fn empty_proxy_plugin_list_disables_reload_plugin() {
    let root = ProjectRoot::new("/proj").unwrap();
    let settings = ProjectSettings {
        proxy_plugins: Some(Vec::new()),
        ..ProjectSettings::default()
    };
    let config =
        Composer::new(root, AliasMap::new(), EnvironmentFlags::default(), settings).compose();

    let Some(PluginDescriptor::LiveReloadProxy(proxy)) = config.find_plugin("live-reload-proxy")
    else {
        panic!("live-reload-proxy plugin missing");
    };
    assert!(proxy.plugins.is_empty());
}

#[test]
fn logging_adapter_knows_both_urls() {
    let config = composer(EnvironmentFlags::default()).compose();

    let Some(PluginDescriptor::LoggingAdapter(logging)) = config.find_plugin("logging") else {
        panic!("logging plugin missing");
    };
    assert_eq!(logging.proxy_url, "http://localhost:8080/");
    assert_eq!(logging.ui_url, "http://localhost:8082/");
    assert_eq!(logging.dev_server_url, "http://localhost:8081/");
    assert_eq!(logging.suppressed_log_source, "dev-server");
}

#[test]
fn composed_json_matches_bundler_shape() {
    let value = composer(EnvironmentFlags::default())
        .compose()
        .to_value()
        .unwrap();

    assert_eq!(value["mode"], json!("development"));
    assert_eq!(value["devtool"], json!("eval"));
    assert_eq!(value["cache"], json!({ "type": "memory" }));
    assert_eq!(value["devServer"]["hot"], json!("only"));
    assert_eq!(value["devServer"]["static"]["publicPath"], json!("/"));
    assert_eq!(value["devServer"]["client"]["logging"], json!("none"));
    assert_eq!(value["resolve"]["alias"]["@app"], json!("/proj/src/app"));
    assert_eq!(value["plugins"][0]["plugin"], json!("define-constants"));
    assert!(value.get("optimization").is_none());
}

#[test]
fn load_reads_settings_and_alias_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("kiln.toml"),
        r#"
alias_file = "build/aliases.json"
entry = "main.ts"
cache = "filesystem"

[ports]
proxy = 3000
dev_server = 3001
ui = 3002
"#,
    )
    .unwrap();
    fs::create_dir_all(dir.path().join("build")).unwrap();
    fs::write(
        dir.path().join("build/aliases.json"),
        r#"{ "@lib": "src/lib" }"#,
    )
    .unwrap();

    let composer = Composer::load(dir.path(), EnvironmentFlags::default()).unwrap();
    let config = composer.compose();

    assert_eq!(config.entry, dir.path().join("src/main.ts"));
    assert_eq!(config.dev_server.port, 3001);
    assert_eq!(
        config.resolve.alias.get("@lib"),
        Some(dir.path().join("src/lib").as_path())
    );
    assert!(matches!(config.cache, CacheStrategy::Filesystem { .. }));
}

#[test]
fn load_fails_fast_without_alias_file() {
    let dir = TempDir::new().unwrap();
    let err = Composer::load(dir.path(), EnvironmentFlags::default()).unwrap_err();
    assert!(matches!(err, ConfigError::AliasFileNotFound { .. }));
}
