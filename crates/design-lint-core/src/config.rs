//! Configuration types for design-lint.
//!
//! Both the rule config and the allowlist are JSON files that may carry
//! `#`, `//` and `/* */` comments.

use miette::Diagnostic;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::utils::paths::PathMatcher;

/// Class-merging helpers recognised when no config overrides them.
pub const DEFAULT_CLASS_MERGE_HELPERS: &[&str] = &["clsx", "classnames", "cn"];

static HASH_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(^|\s+)#.*$").expect("valid regex"));

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*[\s\S]*?\*/").expect("valid regex"));

static SLASH_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(^|[^:\\])//.*$").expect("valid regex"));

/// Removes comments from JSON text.
///
/// `//` preceded by `:` or `\` is kept so URLs survive. Comment markers
/// inside string values are not recognised as strings: a value holding
/// ` #...` or ` //...` loses its tail.
#[must_use]
pub fn strip_json_comments(content: &str) -> String {
    let without_hash = HASH_COMMENT.replace_all(content, "");
    let without_block = BLOCK_COMMENT.replace_all(&without_hash, "");
    SLASH_COMMENT.replace_all(&without_block, "${1}").into_owned()
}

/// Parses JSON-with-comments into a value.
///
/// # Errors
///
/// Returns the `serde_json` error when the stripped text is not valid JSON.
pub fn parse_json_with_comments(content: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(&strip_json_comments(content))
}

fn string_array(value: &Value, key: &str) -> Option<Vec<String>> {
    value.get(key).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect()
    })
}

/// Path and class exemptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Allowlist {
    /// Glob patterns for files that are never linted.
    pub paths: Vec<String>,
    /// Regex sources for class names that are never reported.
    pub class_patterns: Vec<String>,
}

impl Allowlist {
    /// Reads the allowlist keys from a parsed document.
    ///
    /// A key whose value is not an array counts as empty.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            paths: string_array(value, "paths").unwrap_or_default(),
            class_patterns: string_array(value, "classPatterns").unwrap_or_default(),
        }
    }

    /// Loads an allowlist file. A missing file is an empty allowlist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Allowlist`] if the file exists but cannot be
    /// read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No allowlist at {}", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Allowlist {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let value = parse_json_with_comments(&raw).map_err(|e| ConfigError::Allowlist {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self::from_value(&value))
    }
}

/// Settings read from the rule config file, before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    /// `warnLineHeightAndTracking`; anything but `false` counts as `true`.
    pub warn_line_height_and_tracking: Option<bool>,
    /// `classMergeHelpers`.
    pub class_merge_helpers: Option<Vec<String>>,
    /// `allowlistPath`, used when no allowlist setting is supplied.
    pub allowlist_path: Option<String>,
}

impl ConfigFile {
    /// Reads the recognised keys from a parsed document.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            warn_line_height_and_tracking: value
                .get("warnLineHeightAndTracking")
                .map(|v| v != &Value::Bool(false)),
            class_merge_helpers: string_array(value, "classMergeHelpers"),
            allowlist_path: value
                .get("allowlistPath")
                .and_then(Value::as_str)
                .map(String::from),
        }
    }

    /// Loads a config file. A missing file yields no overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] or [`ConfigError::Parse`] if the file
    /// exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No design lint config at {}", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&raw, path)
    }

    /// Parses config text; `path` is only used for error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid JSON.
    pub fn parse(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        let value = parse_json_with_comments(raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self::from_value(&value))
    }
}

/// Fully merged configuration: defaults, then the config file, plus the
/// allowlist. Immutable once built.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignLintConfig {
    /// Report typography arbitrary values as warnings instead of errors.
    pub warn_line_height_and_tracking: bool,
    /// Call names whose arguments are scanned for class strings, in order.
    pub class_merge_helpers: Vec<String>,
    /// Path and class exemptions.
    pub allowlist: Allowlist,
    /// Resolved config file path, if one was configured.
    pub config_path: Option<PathBuf>,
    /// Resolved allowlist file path, if one was configured.
    pub allowlist_path: Option<PathBuf>,
    #[serde(skip)]
    path_matcher: PathMatcher,
    #[serde(skip)]
    class_patterns: Vec<Regex>,
}

impl Default for DesignLintConfig {
    fn default() -> Self {
        Self {
            warn_line_height_and_tracking: true,
            class_merge_helpers: DEFAULT_CLASS_MERGE_HELPERS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            allowlist: Allowlist::default(),
            config_path: None,
            allowlist_path: None,
            path_matcher: PathMatcher::default(),
            class_patterns: Vec::new(),
        }
    }
}

impl DesignLintConfig {
    /// Merges a config file over the defaults and compiles the allowlist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if a class pattern is not a
    /// valid regex.
    pub fn merge(file: ConfigFile, allowlist: Allowlist) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut helpers = Vec::new();
        for helper in file
            .class_merge_helpers
            .unwrap_or(defaults.class_merge_helpers)
        {
            if !helpers.contains(&helper) {
                helpers.push(helper);
            }
        }

        let class_patterns = allowlist
            .class_patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| ConfigError::InvalidPattern {
                    pattern: p.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            warn_line_height_and_tracking: file
                .warn_line_height_and_tracking
                .unwrap_or(defaults.warn_line_height_and_tracking),
            class_merge_helpers: helpers,
            path_matcher: PathMatcher::new(&allowlist.paths),
            allowlist,
            class_patterns,
            config_path: None,
            allowlist_path: None,
        })
    }

    /// Records where the config came from.
    #[must_use]
    pub fn with_sources(
        mut self,
        config_path: Option<PathBuf>,
        allowlist_path: Option<PathBuf>,
    ) -> Self {
        self.config_path = config_path;
        self.allowlist_path = allowlist_path;
        self
    }

    /// Whether a normalised file path is exempt from all rules.
    #[must_use]
    pub fn is_file_allowlisted(&self, relative_path: &str) -> bool {
        self.path_matcher.is_allowlisted(relative_path)
    }

    /// Whether a class token matches an allowlisted class pattern.
    #[must_use]
    pub fn is_class_allowlisted(&self, class_name: &str) -> bool {
        self.class_patterns.iter().any(|re| re.is_match(class_name))
    }

    /// Whether a callee name is a class-merging helper.
    #[must_use]
    pub fn is_class_merge_helper(&self, name: &str) -> bool {
        self.class_merge_helpers.iter().any(|h| h == name)
    }
}

/// Configuration errors. All of them are fatal for a lint run.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ConfigError {
    /// IO error reading the config file.
    #[error("Failed to read design lint config {path}: {source}")]
    #[diagnostic(code(design_lint::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The config file is not valid JSON.
    #[error("Failed to parse design lint config at {path}: {message}")]
    #[diagnostic(
        code(design_lint::config::parse),
        help("Fix the JSON syntax or remove the file to fall back to defaults")
    )]
    Parse {
        /// Resolved path of the config file.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// The allowlist file exists but cannot be read or parsed.
    #[error("Failed to read class allowlist at {path}: {message}")]
    #[diagnostic(code(design_lint::config::allowlist))]
    Allowlist {
        /// Resolved path of the allowlist file.
        path: PathBuf,
        /// Read or parse error message.
        message: String,
    },

    /// A `classPatterns` entry is not a valid regex.
    #[error("Invalid class allowlist pattern '{pattern}': {message}")]
    #[diagnostic(code(design_lint::config::pattern))]
    InvalidPattern {
        /// The offending regex source.
        pattern: String,
        /// Regex compile error.
        message: String,
    },
}
