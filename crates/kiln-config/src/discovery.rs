//! File-based settings discovery
//!
//! Handles finding and loading project settings from the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::settings::ProjectSettings;

pub const SETTINGS_FILE: &str = "kiln.toml";

/// File-based settings discovery
///
/// # Example
///
/// ```no_run
/// use kiln_config::ConfigDiscovery;
///
/// let settings = ConfigDiscovery::new(".").load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a settings file in the root directory
    ///
    /// Searches in this order:
    /// 1. kiln.toml
    /// 2. package.json (kiln field)
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(SETTINGS_FILE);
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        if pkg_path.exists() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed.get("kiln").is_some_and(|v| !v.is_null()) {
                        return Some(pkg_path);
                    }
                }
            }
        }

        None
    }

    /// Load settings, falling back to defaults when no file is present.
    pub fn load(&self) -> Result<ProjectSettings> {
        match self.find() {
            Some(path) => {
                tracing::debug!("Loading project settings from {}", path.display());
                self.load_from(&path)
            }
            None => {
                tracing::debug!(
                    "No settings file in {}, using defaults",
                    self.root.display()
                );
                Ok(ProjectSettings::default())
            }
        }
    }

    fn load_from(&self, path: &Path) -> Result<ProjectSettings> {
        if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            return self.load_from_package_json(path);
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ConfigError::InvalidSettings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn load_from_package_json(&self, path: &Path) -> Result<ProjectSettings> {
        let content = fs::read_to_string(path)?;

        let mut parsed: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidSettings {
                path: path.to_path_buf(),
                message: format!("Invalid JSON: {}", e),
            })?;

        let value = parsed
            .get_mut("kiln")
            .map(Value::take)
            .unwrap_or(Value::Null);

        serde_json::from_value(value).map_err(|e| ConfigError::InvalidSettings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_settings() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn load_defaults_when_no_settings() {
        let dir = TempDir::new().unwrap();
        let settings = ConfigDiscovery::new(dir.path()).load().unwrap();
        assert_eq!(settings, ProjectSettings::default());
    }

    #[test]
    fn package_json_without_kiln_field_is_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "name": "app" }"#).unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }
}
