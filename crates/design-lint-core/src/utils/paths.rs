//! Path normalisation and glob matching.

use globset::GlobBuilder;
use std::path::{Component, Path};

pub use globset::{Error as GlobError, GlobMatcher};

/// Directory names that are never walked, whatever the include patterns say.
pub const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".next",
    ".git",
    "storybook-static",
    "dist",
    "build",
    "coverage",
];

/// Compiles one path glob. `*` stops at `/`, `{a,b}` alternates expand,
/// dotfiles match like any other name.
///
/// # Errors
///
/// Returns the compile error for a malformed pattern.
pub fn compile_glob(pattern: &str, case_insensitive: bool) -> Result<GlobMatcher, GlobError> {
    Ok(GlobBuilder::new(pattern)
        .literal_separator(true)
        .case_insensitive(case_insensitive)
        .build()?
        .compile_matcher())
}

/// Normalises a file name to a forward-slash path relative to the working
/// directory.
///
/// The process working directory is tried first, then `cwd`; when neither
/// is a prefix the file name itself is used. Leading `.`/`..` segments and
/// root prefixes are stripped.
#[must_use]
pub fn normalize_filename(filename: &Path, cwd: &Path) -> String {
    let process_cwd = std::env::current_dir().ok();
    normalize_with(filename, process_cwd.as_deref(), cwd)
}

fn normalize_with(filename: &Path, process_cwd: Option<&Path>, cwd: &Path) -> String {
    if filename.as_os_str().is_empty() {
        return String::new();
    }

    if filename.is_relative() {
        return to_slash(filename);
    }

    for base in [process_cwd, Some(cwd)].into_iter().flatten() {
        if let Ok(rel) = filename.strip_prefix(base) {
            return to_slash(rel);
        }
    }

    to_slash(filename)
}

/// Joins the normal components of a path with `/`, dropping traversal.
#[must_use]
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Compiled set of allowlisted path globs.
#[derive(Debug, Clone, Default)]
pub struct PathMatcher {
    patterns: Vec<GlobMatcher>,
}

impl PathMatcher {
    /// Compiles case-insensitive glob patterns; invalid patterns are
    /// skipped with a warning.
    #[must_use]
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|p| match compile_glob(p.as_ref(), true) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::warn!("Ignoring invalid allowlist glob '{}': {}", p.as_ref(), e);
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    /// Whether a normalised path matches any allow glob.
    #[must_use]
    pub fn is_allowlisted(&self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }
        self.patterns.iter().any(|p| p.is_match(path))
    }

    /// Number of compiled patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no patterns are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_process_cwd() {
        let rel = normalize_with(
            Path::new("/repo/app/components/x.tsx"),
            Some(Path::new("/repo")),
            Path::new("/repo/app"),
        );
        assert_eq!(rel, "app/components/x.tsx");
    }

    #[test]
    fn falls_back_to_rule_cwd() {
        let rel = normalize_with(
            Path::new("/repo/app/components/x.tsx"),
            Some(Path::new("/elsewhere")),
            Path::new("/repo/app"),
        );
        assert_eq!(rel, "components/x.tsx");
    }

    #[test]
    fn falls_back_to_raw_filename() {
        let rel = normalize_with(Path::new("/other/x.tsx"), None, Path::new("/repo"));
        assert_eq!(rel, "other/x.tsx");
    }

    #[test]
    fn strips_traversal_segments() {
        let rel = normalize_with(Path::new("../../lib/./x.ts"), None, Path::new("/repo"));
        assert_eq!(rel, "lib/x.ts");
    }

    #[test]
    fn empty_filename_is_empty() {
        assert_eq!(normalize_with(Path::new(""), None, Path::new("/repo")), "");
    }

    #[test]
    fn allowlist_globs_are_case_insensitive_and_match_dotfiles() {
        let matcher = PathMatcher::new(&["components/ui/**", "**/*.stories.tsx", ".storybook/**"]);
        assert!(matcher.is_allowlisted("components/ui/dialog.tsx"));
        assert!(matcher.is_allowlisted("Components/UI/Dialog.tsx"));
        assert!(matcher.is_allowlisted("stories/Button.stories.tsx"));
        assert!(matcher.is_allowlisted(".storybook/preview.tsx"));
        assert!(!matcher.is_allowlisted("components/card.tsx"));
        assert!(!matcher.is_allowlisted(""));
    }

    #[test]
    fn brace_alternates_expand() {
        let matcher = PathMatcher::new(&["components/ui/*.{ts,tsx}", "{app,lib}/legacy/**"]);
        assert!(matcher.is_allowlisted("components/ui/dialog.tsx"));
        assert!(matcher.is_allowlisted("components/ui/utils.ts"));
        assert!(matcher.is_allowlisted("lib/legacy/old.tsx"));
        assert!(matcher.is_allowlisted("app/legacy/deep/page.tsx"));
        assert!(!matcher.is_allowlisted("components/ui/dialog.css"));
        assert!(!matcher.is_allowlisted("components/ui/nested/dialog.tsx"));
    }

    #[test]
    fn invalid_globs_are_skipped() {
        let matcher = PathMatcher::new(&["[", "app/**"]);
        assert_eq!(matcher.len(), 1);
        assert!(matcher.is_allowlisted("app/page.tsx"));
    }
}
