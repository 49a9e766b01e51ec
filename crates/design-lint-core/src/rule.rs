//! Rule trait for defining lint rules.

use crate::config::DesignLintConfig;
use crate::context::FileContext;
use crate::source::SourceFile;
use crate::types::{Severity, Violation};

/// A per-file lint rule over a parsed TSX syntax tree.
///
/// Rules are invoked once per file. Any per-file state (such as the set of
/// nodes already reported) lives inside `check` and is dropped afterwards.
///
/// # Example
///
/// ```ignore
/// use design_lint_core::{DesignLintConfig, FileContext, Rule, SourceFile, Violation};
///
/// pub struct NoInlineStyles;
///
/// impl Rule for NoInlineStyles {
///     fn name(&self) -> &'static str { "no-inline-styles" }
///     fn code(&self) -> &'static str { "DL900" }
///
///     fn check(
///         &self,
///         ctx: &FileContext,
///         source: &SourceFile,
///         config: &DesignLintConfig,
///     ) -> Vec<Violation> {
///         Vec::new()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "no-raw-colors").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "DL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks a single file and returns any violations found.
    fn check(
        &self,
        ctx: &FileContext,
        source: &SourceFile,
        config: &DesignLintConfig,
    ) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
