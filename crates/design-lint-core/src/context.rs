//! Context types for rule execution.

use std::path::{Path, PathBuf};

use crate::utils::paths::normalize_filename;

/// Context provided to per-file rules.
///
/// This is the rule's view of the host runtime: the file being linted, the
/// working directory the run was started from, and the normalised path used
/// for allowlist matching and reporting.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path to the file as supplied by the caller.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Working directory of the lint run.
    pub cwd: &'a Path,
    /// Forward-slash path relative to the working directory.
    pub relative_path: String,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, cwd: &'a Path) -> Self {
        let relative_path = normalize_filename(path, cwd);
        Self {
            path,
            content,
            cwd,
            relative_path,
        }
    }

    /// Path used in reported locations.
    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        if self.relative_path.is_empty() {
            self.path.to_path_buf()
        } else {
            PathBuf::from(&self.relative_path)
        }
    }

    /// Whether this file is a Storybook story or MDX documentation page.
    #[must_use]
    pub fn is_story_file(&self) -> bool {
        let lower = self.relative_path.to_ascii_lowercase();
        lower.ends_with(".stories.tsx") || lower.ends_with(".stories.mdx")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_is_normalised() {
        let cwd = Path::new("/work/app");
        let ctx = FileContext::new(Path::new("/work/app/components/card.tsx"), "", cwd);
        assert_eq!(ctx.relative_path, "components/card.tsx");
        assert_eq!(ctx.report_path(), PathBuf::from("components/card.tsx"));
    }

    #[test]
    fn detects_story_files() {
        let cwd = Path::new("/work/app");
        let story = FileContext::new(Path::new("stories/Button.Stories.tsx"), "", cwd);
        let page = FileContext::new(Path::new("app/page.tsx"), "", cwd);
        assert!(story.is_story_file());
        assert!(!page.is_story_file());
    }
}
