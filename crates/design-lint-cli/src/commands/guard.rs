//! Guard command implementation.
//!
//! A text-level sweep over the marketing-facing component directories. It
//! needs no parser, so it also covers stylesheets and MDX, and fails the
//! run on any raw hex value (other than black and white) or bracketed
//! value carrying a color or pixel size.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use design_lint_core::classify::{classify_color, RawColor};
use design_lint_core::utils::paths::{to_slash, IGNORED_DIRS};
use regex::Regex;
use walkdir::WalkDir;

/// Directories swept when no `--dir` is given.
pub const GUARD_DIRS: &[&str] = &[
    "components/sections",
    "components/pricing",
    "components/marketing",
    "components/diagnostic",
];

/// Path fragments whose files are never reported.
pub const IGNORED_FRAGMENTS: &[&str] =
    &["components/marketing/forms", "components/marketing/navigation"];

/// File extensions the guard reads.
pub const GUARD_EXTENSIONS: &[&str] = &["ts", "tsx", "css", "scss", "mdx", "jsx"];

const ALLOWED_HEXES: &[&str] = &["#000", "#fff"];

static HEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})\b")
        .expect("valid regex")
});

static ARBITRARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[[^\]]*(?:#[0-9a-fA-F]{3,8}|rgba?\(|hsla?\(|px)").expect("valid regex")
});

/// What a guard hit matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    /// A raw hex color.
    Hex,
    /// A bracketed value holding a color or pixel size.
    Arbitrary,
}

impl fmt::Display for GuardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex => f.write_str("hex"),
            Self::Arbitrary => f.write_str("arbitrary"),
        }
    }
}

/// One offending match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardHit {
    /// Forward-slash path relative to the project root.
    pub file: String,
    /// Kind of match.
    pub kind: GuardKind,
    /// Matched text.
    pub value: String,
}

impl fmt::Display for GuardHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- [{}] {} -> {}", self.kind, self.value, self.file)
    }
}

/// Finds every hit in one file's contents: all hex values first, then all
/// bracketed values, each in source order.
#[must_use]
pub fn scan_text(file: &str, contents: &str) -> Vec<GuardHit> {
    let hit = |kind, value: &str| GuardHit {
        file: file.to_string(),
        kind,
        value: value.to_string(),
    };

    let hexes = HEX.find_iter(contents).filter_map(|m| match classify_color(m.as_str()) {
        Some(RawColor::Hex(literal))
            if !ALLOWED_HEXES.contains(&literal.to_ascii_lowercase().as_str()) =>
        {
            Some(hit(GuardKind::Hex, &literal))
        }
        _ => None,
    });
    let arbitrary = ARBITRARY
        .find_iter(contents)
        .map(|m| hit(GuardKind::Arbitrary, m.as_str()));

    hexes.chain(arbitrary).collect()
}

/// Lists guarded files under `root`, directory by directory, each walk
/// sorted by file name. Missing directories are skipped.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn collect(root: &Path, dirs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for dir in dirs {
        let start = root.join(dir);
        if !start.is_dir() {
            tracing::debug!("Guard directory {} does not exist", start.display());
            continue;
        }
        let walker = WalkDir::new(&start)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| IGNORED_DIRS.contains(&name))
            });
        for entry in walker {
            let entry = entry.with_context(|| format!("Failed to walk {}", start.display()))?;
            let guarded = entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| GUARD_EXTENSIONS.contains(&ext));
            if guarded {
                files.push(entry.into_path());
            }
        }
    }
    Ok(files)
}

/// Sweeps `root` and returns every hit.
///
/// # Errors
///
/// Returns an error if a directory or file cannot be read.
pub fn sweep(root: &Path, dirs: &[String]) -> Result<Vec<GuardHit>> {
    let mut hits = Vec::new();
    for path in collect(root, dirs)? {
        let relative = to_slash(path.strip_prefix(root).unwrap_or(&path));
        if IGNORED_FRAGMENTS.iter().any(|f| relative.contains(f)) {
            continue;
        }
        let bytes =
            std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        hits.extend(scan_text(&relative, &String::from_utf8_lossy(&bytes)));
    }
    Ok(hits)
}

/// Runs the guard command. Any hit exits with code 1.
pub fn run(root: &Path, dirs: Vec<String>) -> Result<()> {
    let dirs = if dirs.is_empty() {
        GUARD_DIRS.iter().map(ToString::to_string).collect()
    } else {
        dirs
    };
    tracing::debug!("Guarding {}", dirs.join(", "));

    let hits = sweep(root, &dirs)?;
    if hits.is_empty() {
        println!("Design lint guard passed: no raw hex or arbitrary Tailwind values detected.");
        return Ok(());
    }

    eprintln!("Design lint violations detected:\n");
    for hit in &hits {
        eprintln!("{hit}");
    }
    eprintln!("\nResolve the violations above or update the guard allow list.");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, file: &str, content: &str) {
        let path = root.join(file);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn defaults() -> Vec<String> {
        GUARD_DIRS.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn black_and_white_are_allowed() {
        let hits = scan_text("a.css", ".a { color: #000; background: #FFF; border: #0ea5e9; }");
        assert_eq!(
            hits,
            vec![GuardHit {
                file: "a.css".into(),
                kind: GuardKind::Hex,
                value: "#0ea5e9".into(),
            }]
        );
    }

    #[test]
    fn hex_needs_a_valid_length_and_word_boundary() {
        assert!(scan_text("a.tsx", "#12345 #abcdefg").is_empty());
        assert_eq!(scan_text("a.tsx", "#abcd")[0].value, "#abcd");
    }

    #[test]
    fn bracketed_values_report_up_to_the_trigger() {
        let code = r#"<div className="w-[742px] grid-cols-[1fr_auto] shadow-[0_0_4px_rgba(0,0,0,.2)]" />"#;
        let hits = scan_text("a.tsx", code);
        let values: Vec<_> = hits
            .iter()
            .filter(|h| h.kind == GuardKind::Arbitrary)
            .map(|h| h.value.as_str())
            .collect();
        assert_eq!(values, vec!["[742px", "[0_0_4px_rgba("]);
    }

    #[test]
    fn sweep_covers_guarded_dirs_only() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "components/sections/Hero.tsx", r##"const c = "#0ea5e9";"##);
        write(tmp.path(), "components/pricing/table.scss", ".t { width: 10px; color: #fff; }");
        write(tmp.path(), "components/marketing/forms/Field.tsx", r##"const c = "#123456";"##);
        write(tmp.path(), "components/ui/Button.tsx", r##"const c = "#123456";"##);
        write(tmp.path(), "components/sections/notes.md", "#123456");
        write(tmp.path(), "components/sections/node_modules/x.tsx", "#123456");

        let hits = sweep(tmp.path(), &defaults()).unwrap();
        let lines: Vec<_> = hits.iter().map(ToString::to_string).collect();
        assert_eq!(lines, vec!["- [hex] #0ea5e9 -> components/sections/Hero.tsx"]);
    }

    #[test]
    fn missing_dirs_are_skipped() {
        let tmp = TempDir::new().unwrap();
        assert!(sweep(tmp.path(), &defaults()).unwrap().is_empty());
    }
}
