//! Lexical path resolution against the project root.
//!
//! Nothing in here touches the filesystem: paths are joined and normalized
//! (`.` and `..` collapsed) purely as strings.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::Serialize;

/// Resolve `segment` against `root` and normalize the result.
///
/// An absolute `segment` is returned normalized and otherwise unchanged, so
/// resolving an already resolved path is a no-op.
///
/// # Example
///
/// ```
/// use kiln_config::resolve;
/// use std::path::Path;
///
/// assert_eq!(resolve("/proj", "src/../lib"), Path::new("/proj/lib"));
/// assert_eq!(resolve("/proj", "/abs/dir"), Path::new("/abs/dir"));
/// ```
pub fn resolve(root: impl AsRef<Path>, segment: impl AsRef<Path>) -> PathBuf {
    let segment = segment.as_ref();
    if segment.is_absolute() {
        segment.clean()
    } else {
        root.as_ref().join(segment).clean()
    }
}

/// Absolute project root every other path is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRoot(PathBuf);

impl ProjectRoot {
    /// Make `root` absolute against the current directory.
    ///
    /// Fails only when the current directory cannot be determined.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref();
        if root.is_absolute() {
            return Ok(Self(root.clean()));
        }
        Ok(Self(std::path::absolute(root)?.clean()))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn resolve(&self, segment: impl AsRef<Path>) -> PathBuf {
        resolve(&self.0, segment)
    }
}

impl AsRef<Path> for ProjectRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Well-known project locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSet {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub lint_config_path: PathBuf,
    pub type_config_path: PathBuf,
}

impl PathSet {
    pub fn from_root(root: &ProjectRoot) -> Self {
        Self {
            source_dir: root.resolve("src"),
            output_dir: root.resolve("out"),
            cache_dir: root.resolve("node_modules/.cache/kiln"),
            lint_config_path: root.resolve(".eslintrc.js"),
            type_config_path: root.resolve("tsconfig.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_joins_relative_segments() {
        assert_eq!(resolve("/proj", "src/app"), PathBuf::from("/proj/src/app"));
    }

    #[test]
    fn resolve_collapses_dot_segments() {
        assert_eq!(
            resolve("/proj", "./src/../lib/./x"),
            PathBuf::from("/proj/lib/x")
        );
    }

    #[test]
    fn resolve_is_idempotent_on_absolute_paths() {
        let once = resolve("/proj", "src/app");
        assert_eq!(resolve("/elsewhere", &once), once);
    }

    #[test]
    fn project_root_absolutizes_relative_input() {
        let root = ProjectRoot::new("some/project").unwrap();
        assert!(root.path().is_absolute());
        assert!(root.path().ends_with("some/project"));
    }

    #[test]
    fn path_set_is_derived_from_root() {
        let root = ProjectRoot::new("/proj").unwrap();
        let paths = PathSet::from_root(&root);
        assert_eq!(paths.source_dir, PathBuf::from("/proj/src"));
        assert_eq!(paths.output_dir, PathBuf::from("/proj/out"));
        assert_eq!(
            paths.cache_dir,
            PathBuf::from("/proj/node_modules/.cache/kiln")
        );
        assert_eq!(paths.lint_config_path, PathBuf::from("/proj/.eslintrc.js"));
        assert_eq!(paths.type_config_path, PathBuf::from("/proj/tsconfig.json"));
    }
}
