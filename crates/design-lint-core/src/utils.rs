//! Utility functions for rule implementations.

pub mod paths;
pub mod reported;

#[doc(inline)]
pub use paths::{normalize_filename, PathMatcher};
#[doc(inline)]
pub use reported::ReportedNodeSet;
