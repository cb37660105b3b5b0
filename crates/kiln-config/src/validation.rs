//! Pluggable config validation strategies
//!
//! Separates filesystem validation (for CLI use) from schema validation.

use crate::build::{BuildConfig, PluginDescriptor};
use crate::error::{ConfigError, Result};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()> {
        for ext in &config.resolve.extensions {
            if ext.len() < 2 || !ext.starts_with('.') {
                return Err(ConfigError::Validation {
                    message: format!("invalid resolve extension '{}'", ext),
                    hint: Some("Extensions must start with a dot, e.g. \".ts\"".to_string()),
                });
            }
        }

        let dev_port = config.dev_server.port;
        let proxy = config.plugins.iter().find_map(|p| match p {
            PluginDescriptor::LiveReloadProxy(options) => Some(options),
            _ => None,
        });

        let mut ports = vec![("dev server", dev_port)];
        if let Some(proxy) = proxy {
            ports.push(("live reload proxy", proxy.port));
            ports.push(("proxy ui", proxy.ui_port));
        }

        for (i, (name, port)) in ports.iter().enumerate() {
            if *port == 0 {
                return Err(ConfigError::Validation {
                    message: format!("{} port cannot be 0", name),
                    hint: Some("Pick a fixed port in [ports] of kiln.toml".to_string()),
                });
            }
            if let Some((other, _)) = ports[..i].iter().find(|(_, p)| p == port) {
                return Err(ConfigError::Validation {
                    message: format!("{} and {} both use port {}", other, name, port),
                    hint: Some(
                        "The proxy, the dev server and the proxy ui need distinct ports"
                            .to_string(),
                    ),
                });
            }
        }

        Ok(())
    }
}

/// Filesystem validator (for CLI use)
///
/// Runs the schema checks, then verifies that the entry point and every
/// alias target exist on disk.
pub struct FsValidator;

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()> {
        SchemaValidator.validate(config)?;

        if !config.entry.exists() {
            return Err(ConfigError::EntryNotFound {
                path: config.entry.clone(),
            });
        }

        for (alias, path) in &config.resolve.alias {
            if !path.exists() {
                return Err(ConfigError::AliasTargetNotFound {
                    alias: alias.clone(),
                    path: path.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &BuildConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
pub fn validate_fs(config: &BuildConfig) -> Result<()> {
    FsValidator.validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Ports;
    use crate::{AliasMap, Composer, EnvironmentFlags, ProjectRoot, ProjectSettings};

    fn config_with(settings: ProjectSettings) -> BuildConfig {
        let root = ProjectRoot::new("/proj").unwrap();
        Composer::new(root, AliasMap::new(), EnvironmentFlags::default(), settings).compose()
    }

    #[test]
    fn default_config_passes_schema() {
        assert!(validate_schema(&config_with(ProjectSettings::default())).is_ok());
    }

    #[test]
    fn rejects_extension_without_dot() {
        let settings = ProjectSettings {
            extensions: vec!["ts".to_string()],
            ..ProjectSettings::default()
        };
        let err = validate_schema(&config_with(settings)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn rejects_shared_ports() {
        let settings = ProjectSettings {
            ports: Ports {
                proxy: 3000,
                dev_server: 3000,
                ui: 3001,
            },
            ..ProjectSettings::default()
        };
        let err = validate_schema(&config_with(settings)).unwrap_err();
        assert!(err.to_string().contains("port 3000"));
    }

    #[test]
    fn fs_validator_reports_missing_entry() {
        let err = validate_fs(&config_with(ProjectSettings::default())).unwrap_err();
        assert!(matches!(err, ConfigError::EntryNotFound { .. }));
    }
}
