//! Core analyzer for orchestrating lint execution.

use crate::config::{ConfigError, DesignLintConfig};
use crate::context::FileContext;
use crate::resolver::{ConfigResolver, LintSettings};
use crate::rule::{Rule, RuleBox};
use crate::source::{ParseError, SourceFile, SOURCE_EXTENSIONS};
use crate::types::{LintResult, Violation};
use crate::utils::paths::{compile_glob, to_slash, GlobError, IGNORED_DIRS};

use globset::GlobMatcher;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk failed.
    #[error("Failed to walk {path}: {message}")]
    Walk {
        /// Directory being walked.
        path: PathBuf,
        /// Walker error message.
        message: String,
    },

    /// A source file could not be parsed.
    #[error("Parse error in {path}: {source}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Underlying parse error.
        source: ParseError,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] GlobError),

    /// Configuration error. Always aborts the run.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    cwd: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    settings: LintSettings,
    resolver: Option<Arc<ConfigResolver>>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file or directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the working directory used for path normalisation and config
    /// resolution. Defaults to the root directory.
    #[must_use]
    pub fn cwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.cwd = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Adds an exclude glob pattern, matched against root-relative paths.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the config and allowlist locations.
    #[must_use]
    pub fn settings(mut self, settings: LintSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Shares an existing resolver (and its cache) with this analyzer.
    #[must_use]
    pub fn resolver(mut self, resolver: Arc<ConfigResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be read or an
    /// exclude pattern is invalid.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let current = std::env::current_dir()?;
        let absolutize = |p: PathBuf| if p.is_absolute() { p } else { current.join(p) };

        let root = absolutize(self.root.unwrap_or_else(|| PathBuf::from(".")));
        let cwd = match self.cwd {
            Some(cwd) => absolutize(cwd),
            None if root.is_file() => root
                .parent()
                .map_or_else(|| current.clone(), Path::to_path_buf),
            None => root.clone(),
        };

        let mut exclude_patterns = self.exclude_patterns;
        if exclude_patterns.is_empty() {
            exclude_patterns.extend(["**/*.d.ts".to_string(), "**/*.min.js".to_string()]);
        }
        let excludes = exclude_patterns
            .iter()
            .map(|p| compile_glob(p, true))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            cwd,
            rules: self.rules,
            excludes,
            settings: self.settings,
            resolver: self.resolver.unwrap_or_default(),
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    cwd: PathBuf,
    rules: Vec<RuleBox>,
    excludes: Vec<GlobMatcher>,
    settings: LintSettings,
    resolver: Arc<ConfigResolver>,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the file or directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the working directory of the run.
    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Resolves the configuration for this run.
    ///
    /// # Errors
    ///
    /// Returns the fatal [`ConfigError`] if resolution fails.
    pub fn config(&self) -> Result<Arc<DesignLintConfig>, AnalyzerError> {
        Ok(self.resolver.resolve(&self.cwd, &self.settings)?)
    }

    /// Analyzes all files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid, file discovery fails, or a
    /// file cannot be read.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {}", self.root.display());

        let config = self.config()?;
        let files = self.discover_files()?;
        info!("Found {} files to analyze", files.len());

        let mut result = LintResult::new();
        for path in &files {
            let content = std::fs::read_to_string(path)?;
            match self.check_source(path, &content, &config) {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(AnalyzerError::Parse { path, source }) => {
                    warn!("Failed to parse {}: {}", path.display(), source);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, source });
                    }
                }
                Err(e) => return Err(e),
            }
        }

        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Runs every rule over one file's contents.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Parse`] if no syntax tree can be built.
    pub fn check_source(
        &self,
        path: &Path,
        content: &str,
        config: &DesignLintConfig,
    ) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let source = SourceFile::parse(content).map_err(|source| AnalyzerError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if source.root().has_error() {
            debug!("{} has syntax errors; checking recovered tree", path.display());
        }

        let ctx = FileContext::new(path, content, &self.cwd);
        let mut violations = Vec::new();
        for rule in &self.rules {
            violations.extend(rule.check(&ctx, &source, config));
        }
        Ok(violations)
    }

    /// Discovers source files under the root, honouring `.gitignore`.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let walker = ignore::WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .require_git(false)
            .filter_entry(|entry| {
                let name = entry.file_name().to_string_lossy();
                !(entry.file_type().is_some_and(|t| t.is_dir())
                    && IGNORED_DIRS.contains(&name.as_ref()))
            })
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| AnalyzerError::Walk {
                path: self.root.clone(),
                message: e.to_string(),
            })?;
            let path = entry.path();
            if !entry.file_type().is_some_and(|t| t.is_file()) || !is_source_file(path) {
                continue;
            }
            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let relative = to_slash(relative);
        self.excludes.iter().any(|p| p.is_match(&relative))
    }
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, Severity};

    struct EveryFile;

    impl Rule for EveryFile {
        fn name(&self) -> &'static str {
            "every-file"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn check(
            &self,
            ctx: &FileContext,
            _source: &SourceFile,
            _config: &DesignLintConfig,
        ) -> Vec<Violation> {
            vec![Violation::new(
                self.code(),
                self.name(),
                "seen",
                Severity::Warning,
                Location::new(ctx.report_path(), 1, 1),
                "seen",
            )]
        }
    }

    #[test]
    fn discovers_sources_and_prunes_ignored_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("components")).unwrap();
        std::fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        std::fs::write(root.join("components/b.tsx"), "export {}").unwrap();
        std::fs::write(root.join("components/a.ts"), "export {}").unwrap();
        std::fs::write(root.join("components/readme.md"), "# hi").unwrap();
        std::fs::write(root.join("node_modules/pkg/index.js"), "").unwrap();
        std::fs::write(root.join("types.d.ts"), "").unwrap();

        let analyzer = Analyzer::builder().root(root).rule(EveryFile).build().unwrap();
        let result = analyzer.analyze().unwrap();

        assert_eq!(result.files_checked, 2);
        let files: Vec<_> = result
            .violations
            .iter()
            .map(|v| to_slash(&v.location.file))
            .collect();
        assert_eq!(files, vec!["components/a.ts", "components/b.tsx"]);
    }

    #[test]
    fn custom_excludes_replace_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("legacy")).unwrap();
        std::fs::write(dir.path().join("legacy/old.tsx"), "").unwrap();
        std::fs::write(dir.path().join("page.tsx"), "").unwrap();

        let analyzer = Analyzer::builder()
            .root(dir.path())
            .exclude("legacy/**")
            .rule(EveryFile)
            .build()
            .unwrap();
        assert_eq!(analyzer.analyze().unwrap().files_checked, 1);
    }

    #[test]
    fn malformed_config_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cfg.json"), "{ broken").unwrap();
        std::fs::write(dir.path().join("page.tsx"), "").unwrap();

        let analyzer = Analyzer::builder()
            .root(dir.path())
            .settings(LintSettings::new().with_config_path("cfg.json"))
            .rule(EveryFile)
            .build()
            .unwrap();
        let err = analyzer.analyze().unwrap_err();
        assert!(matches!(err, AnalyzerError::Config(ConfigError::Parse { .. })));
    }
}
