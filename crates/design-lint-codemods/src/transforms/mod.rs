//! The five migration transforms and their shared contract.

mod badge_status;
mod button_variants;
mod container_section;
mod hex_to_token;
mod legacy_tokens;

pub use badge_status::BadgeStatus;
pub use button_variants::ButtonVariants;
pub use container_section::ContainerSection;
pub use hex_to_token::{HexToToken, HEX_TOKEN_TABLE};
pub use legacy_tokens::{LegacyTokens, LEGACY_TOKEN_TABLE};

use std::path::{Path, PathBuf};

use design_lint_core::SourceFile;

use crate::edit::RewritePlan;
use crate::error::CodemodError;

/// Message recorded when a target file cannot be loaded.
pub const MISSING_SOURCE: &str = "missing source";

/// Outcome of one transform on one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodemodResult {
    /// Forward-slash path relative to the project root.
    pub file: String,
    /// Whether the transform changed (or would change) the file.
    pub applied: bool,
    /// Extra detail for the log line.
    pub message: Option<String>,
}

impl CodemodResult {
    /// A result for a file the transform changed.
    #[must_use]
    pub fn applied(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            applied: true,
            message: None,
        }
    }

    /// A result for a file the transform left alone.
    #[must_use]
    pub fn skipped(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            applied: false,
            message: None,
        }
    }

    /// Attaches a message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// A source-to-source migration.
///
/// Implementations only detect: [`plan`](Codemod::plan) is pure and returns
/// the edits to make. Running a transform twice must find nothing the
/// second time, so every plan has to remove the shape it matched.
pub trait Codemod: Send + Sync {
    /// Returns the transform's name as printed in log lines.
    fn name(&self) -> &'static str;

    /// Returns a brief description of the migration.
    fn description(&self) -> &'static str {
        ""
    }

    /// Computes the edits for one file. An empty plan means no match.
    fn plan(&self, source: &SourceFile) -> RewritePlan;
}

/// Type alias for boxed Codemod trait objects.
pub type CodemodBox = Box<dyn Codemod>;

/// Returns the transforms in orchestration order.
#[must_use]
pub fn all_codemods() -> Vec<CodemodBox> {
    vec![
        Box::new(ContainerSection),
        Box::new(ButtonVariants),
        Box::new(BadgeStatus),
        Box::new(HexToToken),
        Box::new(LegacyTokens),
    ]
}

/// Looks up a transform by name.
#[must_use]
pub fn codemod_by_name(name: &str) -> Option<CodemodBox> {
    all_codemods().into_iter().find(|c| c.name() == name)
}

/// Rewrites source text in memory; `None` when nothing matched.
///
/// # Errors
///
/// Returns [`CodemodError::Parse`] if the text cannot be parsed.
pub fn rewrite_text(
    codemod: &dyn Codemod,
    path: &Path,
    text: &str,
) -> Result<Option<String>, CodemodError> {
    let source = SourceFile::parse(text).map_err(|source| CodemodError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let plan = codemod.plan(&source);
    if plan.is_empty() {
        return Ok(None);
    }
    let rewritten = plan.apply(text);
    Ok((rewritten != text).then_some(rewritten))
}

/// Loads a file, runs one transform, and saves the result unless `dry`.
///
/// An unreadable file becomes a skipped result with
/// [`MISSING_SOURCE`] rather than an error.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed or written back.
pub fn transform_file(
    codemod: &dyn Codemod,
    root: &Path,
    file: &str,
    dry: bool,
) -> Result<CodemodResult, CodemodError> {
    let path: PathBuf = root.join(file);
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("{}: cannot read {}: {}", codemod.name(), path.display(), e);
            return Ok(CodemodResult::skipped(file).with_message(MISSING_SOURCE));
        }
    };

    let Some(rewritten) = rewrite_text(codemod, &path, &text)? else {
        return Ok(CodemodResult::skipped(file));
    };

    if !dry {
        std::fs::write(&path, rewritten).map_err(|source| CodemodError::Write {
            path: path.clone(),
            source,
        })?;
    }
    Ok(CodemodResult::applied(file))
}
