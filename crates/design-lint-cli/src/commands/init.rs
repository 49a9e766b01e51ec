//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"{
  // design-lint configuration (JSON with comments)

  // Report leading-[..] and tracking-[..] as warnings outside stories.
  // Set to false to make them errors like every other arbitrary value.
  "warnLineHeightAndTracking": true,

  // Call names whose string arguments are scanned as class lists.
  "classMergeHelpers": ["clsx", "classnames", "cn"]

  // Used when no --allowlist flag or project allowlist file is found.
  // "allowlistPath": ".design-lint-allowlist.json"
}
"#;

const DEFAULT_ALLOWLIST: &str = r#"{
  // Files exempt from both rules (globs, relative to the project root).
  "paths": [
    "app/globals.css",
    "**/*.stories.tsx"
  ],

  // Class names exempt from the arbitrary-value rule (regex sources).
  "classPatterns": [
    // "^translate-[xy]-\\[-50%\\]$"
  ]
}
"#;

/// File names written by `init`.
pub const CONFIG_FILE: &str = "design-lint.config.json";
/// Allowlist file name written by `init`.
pub const ALLOWLIST_FILE: &str = ".design-lint-allowlist.json";

/// Runs the init command.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let targets = [(CONFIG_FILE, DEFAULT_CONFIG), (ALLOWLIST_FILE, DEFAULT_ALLOWLIST)];

    if !force {
        for (name, _) in &targets {
            let path = dir.join(name);
            if path.exists() {
                bail!(
                    "{} already exists. Use --force to overwrite.",
                    path.display()
                );
            }
        }
    }

    for (name, content) in &targets {
        let path = dir.join(name);
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Created {name}");
    }

    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} and {ALLOWLIST_FILE}");
    println!("  2. Run: design-lint check");
    println!("  3. Preview migrations: design-lint codemod --dry");

    Ok(())
}
