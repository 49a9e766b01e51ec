//! Codemod command implementation.

use anyhow::Result;
use design_lint_codemods::{CodemodError, CodemodOptions, Orchestrator};
use std::path::Path;

/// Runs the codemod command.
///
/// A failing transform prints `<name> failed: <error>`; a run that cannot
/// start (bad glob, unknown `--only`) prints `codemod failed: <error>`.
/// Both exit with code 1.
pub fn run(root: &Path, options: CodemodOptions) -> Result<()> {
    let dry = options.dry;
    let outcome = Orchestrator::new(root, options).and_then(|orchestrator| {
        tracing::debug!("Codemods: {}", orchestrator.codemod_names().join(", "));
        orchestrator.run(&mut std::io::stdout().lock())
    });

    match outcome {
        Ok(summary) => {
            tracing::info!(
                "{} file(s) {}",
                summary.changed_files(),
                if dry { "would change" } else { "changed" }
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", failure_line(&e));
            std::process::exit(1);
        }
    }
}

fn failure_line(error: &CodemodError) -> String {
    match error {
        CodemodError::Transform { .. } => error.to_string(),
        _ => format!("codemod failed: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_carry_a_name_prefix() {
        let unknown = CodemodError::UnknownCodemod("nope".into());
        assert_eq!(failure_line(&unknown), "codemod failed: unknown codemod 'nope'");

        let transform = CodemodError::Transform {
            name: "hex-to-semantic",
            source: Box::new(CodemodError::UnknownCodemod("x".into())),
        };
        assert_eq!(failure_line(&transform), "hex-to-semantic failed: unknown codemod 'x'");
    }
}
