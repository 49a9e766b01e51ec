//! # design-lint-core
//!
//! Core framework for design-token linting over TSX syntax trees.
//!
//! This crate provides the shared pieces both the lint rules and the
//! codemods build on:
//!
//! - [`SourceFile`] for parsing TS/TSX/JS/JSX with tree-sitter
//! - [`Rule`] trait for per-file rules
//! - [`ConfigResolver`] for loading and caching [`DesignLintConfig`]
//! - [`classify`] for raw-color and arbitrary-value classification
//! - [`Analyzer`] for orchestrating lint execution
//!
//! ## Example
//!
//! ```ignore
//! use design_lint_core::{Analyzer, LintSettings};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./components")
//!     .settings(LintSettings::new().with_config_path("design-lint.config.json"))
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod resolver;
mod rule;
mod source;
mod types;

/// Pure classification of color literals and arbitrary-value tokens.
pub mod classify;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{
    parse_json_with_comments, strip_json_comments, Allowlist, ConfigError, ConfigFile,
    DesignLintConfig, DEFAULT_CLASS_MERGE_HELPERS,
};
pub use context::FileContext;
pub use resolver::{ConfigResolver, LintSettings};
pub use rule::{Rule, RuleBox};
pub use source::{
    has_substitutions, string_content_range, template_quasis, unescape_string, unwrap_parens,
    ParseError, SourceFile, SOURCE_EXTENSIONS,
};
pub use types::{LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic};

/// Re-export of tree-sitter so dependents see the same node types.
pub use tree_sitter;
