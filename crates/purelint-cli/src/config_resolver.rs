//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `purelint.toml` or `.purelint.toml` in the analyzed directory or an
//!    ancestor, up to the nearest `package.json`
//! 3. `~/.purelint/config.toml` (global fallback)
//! 4. No config found → defaults

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.purelint/`).
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["purelint.toml", ".purelint.toml"];

/// A directory holding this file ends the upward search.
const PACKAGE_BOUNDARY: &str = "package.json";

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Testable core: accepts `global_dir` as parameter to avoid env var races.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    // 1. Explicit path from --config flag
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    // 2. Project-level config, nearest directory first
    if let Some(candidate) = find_project_config(project_dir) {
        tracing::debug!("Found project config: {}", candidate.display());
        return ConfigSource::Project(candidate);
    }

    // 3. Global fallback
    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.exists() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

/// Searches `start` and its ancestors for a project config file, stopping
/// after the first directory that contains `package.json`.
fn find_project_config(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let found = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file());
        if found.is_some() {
            return found;
        }
        if dir.join(PACKAGE_BOUNDARY).is_file() {
            break;
        }
    }
    None
}

/// Directory searched for project config: `path` itself, or its parent
/// when `path` is a single file.
#[must_use]
pub fn project_dir(path: &Path) -> &Path {
    if path.is_file() {
        path.parent().unwrap_or(path)
    } else {
        path
    }
}

/// Returns the global config directory path.
///
/// Resolution: `$PURELINT_CONFIG_DIR` > `~/.purelint/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("PURELINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".purelint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_takes_priority_over_project() {
        let tmp = TempDir::new().expect("test fixture");
        let explicit = tmp.path().join("custom.toml");
        fs::write(&explicit, "").expect("test fixture");

        // Even when project config exists, explicit wins
        let project = tmp.path().join("project");
        fs::create_dir(&project).expect("test fixture");
        fs::write(project.join("purelint.toml"), "").expect("test fixture");

        let result = resolve_inner(&project, Some(&explicit), None);
        assert_eq!(result, ConfigSource::Explicit(explicit));
    }

    #[test]
    fn explicit_does_not_check_existence() {
        // Explicit path is trusted as-is (caller handles missing file error)
        let result = resolve_inner(
            Path::new("/tmp"),
            Some(Path::new("/nonexistent.toml")),
            None,
        );
        assert_eq!(
            result,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
        );
    }

    #[test]
    fn project_purelint_toml_found() {
        let tmp = TempDir::new().expect("test fixture");
        fs::write(tmp.path().join("purelint.toml"), "").expect("test fixture");

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(tmp.path().join("purelint.toml"))
        );
    }

    #[test]
    fn project_dot_purelint_toml_found() {
        let tmp = TempDir::new().expect("test fixture");
        fs::write(tmp.path().join(".purelint.toml"), "").expect("test fixture");

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(tmp.path().join(".purelint.toml"))
        );
    }

    #[test]
    fn purelint_toml_preferred_over_dot_prefix() {
        let tmp = TempDir::new().expect("test fixture");
        fs::write(tmp.path().join("purelint.toml"), "").expect("test fixture");
        fs::write(tmp.path().join(".purelint.toml"), "").expect("test fixture");

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(tmp.path().join("purelint.toml"))
        );
    }

    #[test]
    fn global_fallback_when_no_project_config() {
        let project = TempDir::new().expect("test fixture");
        fs::write(project.path().join("package.json"), "{}").expect("test fixture");
        let global = TempDir::new().expect("test fixture");
        fs::write(global.path().join("config.toml"), "").expect("test fixture");

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(
            result,
            ConfigSource::Global(global.path().join("config.toml"))
        );
    }

    #[test]
    fn global_skipped_when_project_config_exists() {
        let project = TempDir::new().expect("test fixture");
        fs::write(project.path().join("package.json"), "{}").expect("test fixture");
        fs::write(project.path().join("purelint.toml"), "").expect("test fixture");

        let global = TempDir::new().expect("test fixture");
        fs::write(global.path().join("config.toml"), "").expect("test fixture");

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn global_dir_missing_config_file_returns_default() {
        let project = TempDir::new().expect("test fixture");
        fs::write(project.path().join("package.json"), "{}").expect("test fixture");
        let global = TempDir::new().expect("test fixture");
        // global dir exists but no config.toml inside

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Default);
    }

    #[test]
    fn no_config_anywhere_returns_default() {
        let project = TempDir::new().expect("test fixture");
        fs::write(project.path().join("package.json"), "{}").expect("test fixture");
        let result = resolve_inner(project.path(), None, None);
        assert_eq!(result, ConfigSource::Default);
    }

    #[test]
    fn project_config_found_in_ancestor() {
        let tmp = TempDir::new().expect("test fixture");
        fs::write(tmp.path().join("package.json"), "{}").expect("test fixture");
        fs::write(tmp.path().join("purelint.toml"), "").expect("test fixture");
        let nested = tmp.path().join("src").join("features");
        fs::create_dir_all(&nested).expect("test fixture");

        let result = resolve_inner(&nested, None, None);
        assert_eq!(result, ConfigSource::Project(tmp.path().join("purelint.toml")));
    }

    #[test]
    fn search_stops_at_package_boundary() {
        let tmp = TempDir::new().expect("test fixture");
        fs::write(tmp.path().join("purelint.toml"), "").expect("test fixture");
        let package = tmp.path().join("packages").join("web");
        fs::create_dir_all(&package).expect("test fixture");
        fs::write(package.join("package.json"), "{}").expect("test fixture");

        let result = resolve_inner(&package, None, None);
        assert_eq!(result, ConfigSource::Default);
    }

    #[test]
    fn project_dir_of_a_file_is_its_parent() {
        let tmp = TempDir::new().expect("test fixture");
        let file = tmp.path().join("App.tsx");
        fs::write(&file, "").expect("test fixture");

        assert_eq!(project_dir(&file), tmp.path());
        assert_eq!(project_dir(tmp.path()), tmp.path());
    }

    #[test]
    fn config_source_path_returns_none_for_default() {
        assert!(ConfigSource::Default.path().is_none());
    }

    #[test]
    fn config_source_path_returns_some_for_all_others() {
        let p = PathBuf::from("/tmp/test.toml");
        assert_eq!(ConfigSource::Explicit(p.clone()).path(), Some(p.as_path()));
        assert_eq!(ConfigSource::Project(p.clone()).path(), Some(p.as_path()));
        assert_eq!(ConfigSource::Global(p.clone()).path(), Some(p.as_path()));
    }

    #[test]
    fn is_global_only_true_for_global() {
        assert!(!ConfigSource::Explicit(PathBuf::new()).is_global());
        assert!(!ConfigSource::Project(PathBuf::new()).is_global());
        assert!(ConfigSource::Global(PathBuf::new()).is_global());
        assert!(!ConfigSource::Default.is_global());
    }
}
