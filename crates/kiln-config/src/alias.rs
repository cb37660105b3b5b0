//! Alias file loading.
//!
//! The alias file maps short module names to project-relative paths:
//!
//! ```json
//! { "@app": "src/app", "@ui": "src/ui" }
//! ```
//!
//! JSON is the default format; a `.toml` extension switches to TOML.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::paths::ProjectRoot;

/// Alias name to absolute path, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasMap(IndexMap<String, PathBuf>);

impl AliasMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, alias: &str) -> Option<&Path> {
        self.0.get(alias).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }

    /// Resolve raw `alias -> relative path` entries against `root`.
    pub fn resolve<I, K, V>(root: &ProjectRoot, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<Path>,
    {
        let mut map = IndexMap::new();
        for (alias, target) in entries {
            let alias = alias.into();
            let target = target.as_ref();
            if alias.trim().is_empty() {
                return Err(ConfigError::InvalidAlias {
                    alias,
                    message: "alias name cannot be empty".to_string(),
                });
            }
            if target.as_os_str().is_empty() {
                return Err(ConfigError::InvalidAlias {
                    alias,
                    message: "alias target cannot be empty".to_string(),
                });
            }
            map.insert(alias, root.resolve(target));
        }
        Ok(Self(map))
    }
}

impl<'a> IntoIterator for &'a AliasMap {
    type Item = (&'a String, &'a PathBuf);
    type IntoIter = indexmap::map::Iter<'a, String, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Load the alias file at `path` and resolve every entry against `root`.
///
/// # Errors
///
/// - [`ConfigError::AliasFileNotFound`] if the file does not exist
/// - [`ConfigError::MalformedAliasFile`] if it is not a flat string map
/// - [`ConfigError::InvalidAlias`] for empty names or targets
pub fn load_aliases(root: &ProjectRoot, path: impl AsRef<Path>) -> Result<AliasMap> {
    let path = root.resolve(path);

    let content = fs::read_to_string(&path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ConfigError::AliasFileNotFound { path: path.clone() },
        io::ErrorKind::InvalidData => ConfigError::MalformedAliasFile {
            path: path.clone(),
            message: format!("Not valid UTF-8: {}", err),
        },
        _ => ConfigError::Io(err),
    })?;

    let entries = parse_entries(&path, &content)?;
    let aliases = AliasMap::resolve(root, entries)?;

    tracing::debug!(
        "Loaded {} aliases from {}",
        aliases.len(),
        path.display()
    );

    Ok(aliases)
}

fn parse_entries(path: &Path, content: &str) -> Result<IndexMap<String, String>> {
    let is_toml = path.extension().is_some_and(|ext| ext == "toml");

    if is_toml {
        return toml::from_str(content).map_err(|e| ConfigError::MalformedAliasFile {
            path: path.to_path_buf(),
            message: format!("Invalid TOML: {}", e),
        });
    }

    serde_json::from_str(content).map_err(|e| ConfigError::MalformedAliasFile {
        path: path.to_path_buf(),
        message: format!("Invalid JSON: {}", e),
    })
}
