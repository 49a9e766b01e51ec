//! Target file discovery for codemod runs.

use std::path::Path;

use design_lint_core::utils::paths::{compile_glob, to_slash, GlobMatcher, IGNORED_DIRS};
use walkdir::WalkDir;

use crate::error::CodemodError;

/// Include patterns every run starts from.
pub const DEFAULT_INCLUDE: &[&str] = &["components/**/*.tsx", "app/**/*.tsx", "lib/**/*.tsx"];

/// Exclude patterns every run starts from.
pub const DEFAULT_EXCLUDE: &[&str] = &["**/__tests__/**", "**/*.stories.tsx", "**/*.spec.tsx"];

/// Resolves include/exclude globs to a sorted list of project files.
#[derive(Debug, Clone)]
pub struct FileCollector {
    include: Vec<GlobMatcher>,
    exclude: Vec<GlobMatcher>,
}

impl FileCollector {
    /// Builds a collector from the default lists extended with `include`
    /// and `exclude`.
    ///
    /// # Errors
    ///
    /// Returns [`CodemodError::Pattern`] for an invalid glob.
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self, CodemodError> {
        let include = DEFAULT_INCLUDE
            .iter()
            .copied()
            .chain(include.iter().map(|s| s.as_ref()));
        let exclude = DEFAULT_EXCLUDE
            .iter()
            .copied()
            .chain(exclude.iter().map(|s| s.as_ref()));
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// Whether a forward-slash relative path is a target.
    #[must_use]
    pub fn matches(&self, relative: &str) -> bool {
        let hit = |p: &GlobMatcher| p.is_match(relative);
        self.include.iter().any(hit) && !self.exclude.iter().any(hit)
    }

    /// Walks `root` and returns matching files as forward-slash paths
    /// relative to it, sorted and unique.
    ///
    /// # Errors
    ///
    /// Returns [`CodemodError::Walk`] if a directory cannot be read.
    pub fn collect(&self, root: &Path) -> Result<Vec<String>, CodemodError> {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| IGNORED_DIRS.contains(&name))
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|source| CodemodError::Walk {
                path: root.to_path_buf(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let relative = to_slash(relative);
            if self.matches(&relative) {
                files.push(relative);
            }
        }

        files.sort();
        files.dedup();
        tracing::debug!("Collected {} codemod target(s) under {}", files.len(), root.display());
        Ok(files)
    }
}

/// Collection globs are case-sensitive.
fn compile<'a>(patterns: impl Iterator<Item = &'a str>) -> Result<Vec<GlobMatcher>, CodemodError> {
    patterns
        .map(|pattern| {
            compile_glob(pattern, false).map_err(|source| CodemodError::Pattern {
                pattern: pattern.to_string(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, file: &str) {
        let path = root.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "export {};\n").unwrap();
    }

    #[test]
    fn defaults_pick_component_sources() {
        let collector = FileCollector::new::<&str>(&[], &[]).unwrap();
        assert!(collector.matches("components/Hero.tsx"));
        assert!(collector.matches("app/(marketing)/page.tsx"));
        assert!(collector.matches("lib/ui/deep/Thing.tsx"));
        assert!(!collector.matches("components/Hero.stories.tsx"));
        assert!(!collector.matches("components/__tests__/Hero.tsx"));
        assert!(!collector.matches("components/Hero.ts"));
        assert!(!collector.matches("src/Hero.tsx"));
    }

    #[test]
    fn globs_are_case_sensitive() {
        let collector = FileCollector::new::<&str>(&[], &[]).unwrap();
        assert!(!collector.matches("Components/Hero.tsx"));
        assert!(!collector.matches("components/Hero.TSX"));
    }

    #[test]
    fn flags_extend_defaults() {
        let collector = FileCollector::new(&["src/**/*.tsx"], &["**/legacy/**"]).unwrap();
        assert!(collector.matches("src/App.tsx"));
        assert!(collector.matches("components/Hero.tsx"));
        assert!(!collector.matches("components/legacy/Old.tsx"));
        assert!(!collector.matches("src/App.spec.tsx"));
    }

    #[test]
    fn brace_globs_extend_defaults() {
        let collector =
            FileCollector::new(&["app/**/*.{ts,tsx}"], &["**/*.{test,fixture}.ts"]).unwrap();
        assert!(collector.matches("app/lib/format.ts"));
        assert!(collector.matches("app/page.tsx"));
        assert!(!collector.matches("app/lib/format.test.ts"));
        assert!(!collector.matches("app/lib/format.js"));
    }

    #[test]
    fn invalid_glob_is_reported() {
        let err = FileCollector::new(&["components/[.tsx"], &[]).unwrap_err();
        assert!(matches!(err, CodemodError::Pattern { .. }));
    }

    #[test]
    fn collect_walks_sorted_and_skips_ignored_dirs() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "components/b.tsx");
        touch(dir.path(), "components/a.tsx");
        touch(dir.path(), "app/page.tsx");
        touch(dir.path(), "components/node_modules/pkg/x.tsx");
        touch(dir.path(), "components/a.stories.tsx");

        let collector = FileCollector::new::<&str>(&[], &[]).unwrap();
        let files = collector.collect(dir.path()).unwrap();
        assert_eq!(files, vec!["app/page.tsx", "components/a.tsx", "components/b.tsx"]);
    }
}
