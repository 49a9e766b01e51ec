//! Config resolution with a per-run cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::{Allowlist, ConfigError, ConfigFile, DesignLintConfig};

/// Where the config and allowlist files live, relative to the working
/// directory unless absolute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LintSettings {
    /// Rule config file.
    pub config_path: Option<PathBuf>,
    /// Allowlist file; falls back to the config's `allowlistPath`.
    pub allowlist_path: Option<PathBuf>,
}

impl LintSettings {
    /// Creates empty settings (defaults only).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the config file path.
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Sets the allowlist file path.
    #[must_use]
    pub fn with_allowlist_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.allowlist_path = Some(path.into());
        self
    }
}

type CacheKey = (PathBuf, Option<PathBuf>, Option<PathBuf>);

/// Loads and merges [`DesignLintConfig`]s, caching by
/// `(cwd, config path, allowlist path)`.
///
/// Construct one per run and share it; there is no global cache.
#[derive(Debug, Default)]
pub struct ConfigResolver {
    cache: Mutex<HashMap<CacheKey, Arc<DesignLintConfig>>>,
}

impl ConfigResolver {
    /// Creates a resolver with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the config for a working directory and settings.
    ///
    /// Missing files fall back to defaults. A failed resolution is not
    /// cached, so the next call reports the error again.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a file exists but is unreadable or
    /// malformed, or when a class pattern does not compile.
    pub fn resolve(
        &self,
        cwd: &Path,
        settings: &LintSettings,
    ) -> Result<Arc<DesignLintConfig>, ConfigError> {
        let config_path = settings.config_path.as_ref().map(|p| cwd.join(p));
        let allowlist_path = settings.allowlist_path.as_ref().map(|p| cwd.join(p));
        let key = (cwd.to_path_buf(), config_path.clone(), allowlist_path.clone());

        if let Some(hit) = self.lock().get(&key) {
            tracing::debug!("Config cache hit for {}", cwd.display());
            return Ok(Arc::clone(hit));
        }

        let file = match &config_path {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        let allowlist_path =
            allowlist_path.or_else(|| file.allowlist_path.as_ref().map(|p| cwd.join(p)));
        let allowlist = match &allowlist_path {
            Some(path) => Allowlist::load(path)?,
            None => Allowlist::default(),
        };

        tracing::debug!(
            "Resolved design lint config: {} allow paths, {} class patterns",
            allowlist.paths.len(),
            allowlist.class_patterns.len()
        );

        let config = Arc::new(
            DesignLintConfig::merge(file, allowlist)?.with_sources(config_path, allowlist_path),
        );
        self.lock().insert(key, Arc::clone(&config));
        Ok(config)
    }

    /// Number of cached entries.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, Arc<DesignLintConfig>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_settings_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = ConfigResolver::new();
        let config = resolver.resolve(dir.path(), &LintSettings::new()).unwrap();
        assert!(config.warn_line_height_and_tracking);
        assert!(config.allowlist.paths.is_empty());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn missing_files_are_not_errors() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LintSettings::new()
            .with_config_path("nope.json")
            .with_allowlist_path("also-nope.json");
        let config = ConfigResolver::new().resolve(dir.path(), &settings).unwrap();
        assert_eq!(config.class_merge_helpers, vec!["clsx", "classnames", "cn"]);
        assert_eq!(config.allowlist, Allowlist::default());
    }

    #[test]
    fn same_key_returns_cached_instance() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cfg.json"), r#"{ "classMergeHelpers": ["cx"] }"#).unwrap();
        let settings = LintSettings::new().with_config_path("cfg.json");
        let resolver = ConfigResolver::new();

        let first = resolver.resolve(dir.path(), &settings).unwrap();
        std::fs::write(dir.path().join("cfg.json"), r#"{ "classMergeHelpers": ["tw"] }"#).unwrap();
        let second = resolver.resolve(dir.path(), &settings).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.class_merge_helpers, vec!["cx"]);
        assert_eq!(resolver.cached(), 1);
    }

    #[test]
    fn resolvers_do_not_share_state() {
        let dir = tempfile::tempdir().unwrap();
        let a = ConfigResolver::new();
        let b = ConfigResolver::new();
        a.resolve(dir.path(), &LintSettings::new()).unwrap();
        assert_eq!(a.cached(), 1);
        assert_eq!(b.cached(), 0);
    }
}
