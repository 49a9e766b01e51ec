//! Configuration and allowlist file discovery.
//!
//! Each file is resolved independently using a deterministic priority order:
//!
//! 1. `--config` / `--allowlist` flag (explicit path)
//! 2. A well-known file name in the project directory
//! 3. Nothing found → defaults (an empty allowlist, or the config's own
//!    `allowlistPath`)

use design_lint_core::LintSettings;
use std::path::{Path, PathBuf};

/// Where a file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via a flag.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Nothing found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) => Some(p),
            Self::Default => None,
        }
    }
}

/// Resolved config and allowlist sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSources {
    /// Configuration file source.
    pub config: ConfigSource,
    /// Allowlist file source.
    pub allowlist: ConfigSource,
}

impl ResolvedSources {
    /// Settings handed to the analyzer.
    #[must_use]
    pub fn settings(&self) -> LintSettings {
        let mut settings = LintSettings::new();
        if let Some(p) = self.config.path() {
            settings = settings.with_config_path(p);
        }
        if let Some(p) = self.allowlist.path() {
            settings = settings.with_allowlist_path(p);
        }
        settings
    }
}

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["design-lint.config.json", "eslint-rules.config.json"];

/// Project-level allowlist file names, checked in order.
pub const PROJECT_ALLOWLIST_NAMES: &[&str] =
    &[".design-lint-allowlist.json", ".lint-rules-allowlist.json"];

/// Resolves both files for `project_dir`.
#[must_use]
pub fn resolve(
    project_dir: &Path,
    explicit_config: Option<&Path>,
    explicit_allowlist: Option<&Path>,
) -> ResolvedSources {
    ResolvedSources {
        config: resolve_one(project_dir, explicit_config, PROJECT_CONFIG_NAMES),
        allowlist: resolve_one(project_dir, explicit_allowlist, PROJECT_ALLOWLIST_NAMES),
    }
}

fn resolve_one(project_dir: &Path, explicit: Option<&Path>, names: &[&str]) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    for name in names {
        let candidate = project_dir.join(name);
        if candidate.exists() {
            tracing::debug!("Found project file: {}", candidate.display());
            return ConfigSource::Project(candidate);
        }
    }

    ConfigSource::Default
}
