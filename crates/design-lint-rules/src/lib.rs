//! # design-lint-rules
//!
//! Built-in design-token lint rules for design-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | DL001 | `no-raw-colors` | Forbids raw hex/rgb/hsl color literals |
//! | DL002 | `no-arbitrary-values` | Forbids Tailwind arbitrary values in class attributes |
//!
//! ## Usage
//!
//! ```ignore
//! use design_lint_core::Analyzer;
//! use design_lint_rules::{NoArbitraryValues, NoRawColors};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./components")
//!     .rule(NoRawColors::new())
//!     .rule(NoArbitraryValues::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod class_strings;
mod no_arbitrary_values;
mod no_raw_colors;
mod presets;

pub use class_strings::{ClassStringExtractor, ExprShape};
pub use no_arbitrary_values::{check_class_name, NoArbitraryValues, CLASS_ATTRIBUTES};
pub use no_raw_colors::NoRawColors;
pub use presets::{all_rules, migration_rules, rule_by_name, Preset};
