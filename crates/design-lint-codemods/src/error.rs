//! Codemod errors.

use design_lint_core::utils::paths::GlobError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while collecting or rewriting files.
///
/// An unreadable target is not an error at the batch level; it becomes a
/// skipped result with a message.
#[derive(Debug, Error)]
pub enum CodemodError {
    /// A rewritten file could not be written back.
    #[error("failed to write {path}: {source}")]
    Write {
        /// File that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// No syntax tree could be produced.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying parse error.
        source: design_lint_core::ParseError,
    },

    /// The project tree could not be walked.
    #[error("failed to walk {path}: {source}")]
    Walk {
        /// Directory being walked.
        path: PathBuf,
        /// Underlying walker error.
        source: walkdir::Error,
    },

    /// An include or exclude glob is invalid.
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Glob compile error.
        source: GlobError,
    },

    /// No transform has the requested name.
    #[error("unknown codemod '{0}'")]
    UnknownCodemod(String),

    /// A transform aborted the batch.
    #[error("{name} failed: {source}")]
    Transform {
        /// Name of the failing transform.
        name: &'static str,
        /// What went wrong.
        source: Box<CodemodError>,
    },

    /// A report line could not be written.
    #[error("failed to write report: {0}")]
    Report(#[source] std::io::Error),
}
