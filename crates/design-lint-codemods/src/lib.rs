//! # design-lint-codemods
//!
//! Source-to-source migrations from hand-rolled styling to design-system
//! primitives.
//!
//! | Name | Rewrites |
//! |------|----------|
//! | `wrap-with-container-section` | max-width and padded blocks into `<Container>` / `<Section size>` |
//! | `button-to-ds-variants` | gradient/neutral `<button>` into `<Button variant tone size>` |
//! | `badge-and-status` | rounded-full status pills into `<Badge tone variant="soft">` |
//! | `hex-to-semantic` | known hex colors into `hsl(var(--token))` |
//! | `remove-local-designTokens` | `designTokens.*` accesses into utility classes |
//!
//! Each transform computes a [`RewritePlan`] against the parsed file and the
//! plan is applied in one pass. The [`Orchestrator`] runs them in the order
//! above, writing each result before the next transform reads the file.
//!
//! ## Example
//!
//! ```ignore
//! use design_lint_codemods::{CodemodOptions, Orchestrator};
//!
//! let options = CodemodOptions { dry: true, ..CodemodOptions::default() };
//! let summary = Orchestrator::new(".", options)?.run(&mut std::io::stdout())?;
//! println!("{}", summary.changed_files());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod collector;
mod edit;
mod error;
mod orchestrator;

/// JSX element and import helpers shared by the transforms.
pub mod jsx;

/// The transforms and their shared contract.
pub mod transforms;

pub use collector::{FileCollector, DEFAULT_EXCLUDE, DEFAULT_INCLUDE};
pub use edit::{RewritePlan, TextEdit};
pub use error::CodemodError;
pub use orchestrator::{CodemodOptions, Orchestrator, RunSummary, TransformOutcome};
pub use transforms::{
    all_codemods, codemod_by_name, rewrite_text, transform_file, Codemod, CodemodBox,
    CodemodResult, MISSING_SOURCE,
};
