//! Shared output formatting for lint results.

use anyhow::Result;
use design_lint_core::{LintResult, Severity, Violation, ViolationDiagnostic};
use miette::{NamedSource, Report};

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Pretty => print_pretty(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    for violation in &result.violations {
        let severity_indicator = match violation.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        println!(
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        println!("  {}: {}", severity_indicator, violation.message);
        if let Some(suggestion) = &violation.suggestion {
            println!("  = help: {}", suggestion.message);
        }
        println!();
    }
    print_summary(result);
}

fn print_pretty(result: &LintResult) {
    for violation in &result.violations {
        println!("{:?}", pretty_report(violation));
    }
    print_summary(result);
}

/// Renders a violation with its source snippet; falls back to the bare
/// diagnostic when the file can no longer be read.
fn pretty_report(violation: &Violation) -> Report {
    let report = Report::new(ViolationDiagnostic::from(violation));
    let file = &violation.location.file;
    match std::fs::read_to_string(file) {
        Ok(content) => report.with_source_code(NamedSource::new(file.display().to_string(), content)),
        Err(e) => {
            tracing::debug!("No snippet for {}: {}", file.display(), e);
            report
        }
    }
}

fn print_summary(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{}", compact_line(violation));
    }
}

fn compact_line(violation: &Violation) -> String {
    format!(
        "{}:{}:{}: {} [{}] {}",
        violation.location.file.display(),
        violation.location.line,
        violation.location.column,
        violation.severity,
        violation.code,
        violation.message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use design_lint_core::Location;
    use std::path::PathBuf;

    fn violation() -> Violation {
        Violation::new(
            "DL001",
            "no-raw-colors",
            "useTokens",
            Severity::Error,
            Location::new(PathBuf::from("components/Hero.tsx"), 3, 15),
            "Use design tokens instead of raw color \"#0ea5e9\".",
        )
    }

    #[test]
    fn compact_line_layout() {
        assert_eq!(
            compact_line(&violation()),
            "components/Hero.tsx:3:15: error [DL001] Use design tokens instead of raw color \"#0ea5e9\"."
        );
    }

    #[test]
    fn pretty_report_survives_missing_file() {
        let report = pretty_report(&violation());
        assert!(report.to_string().contains("[DL001]"));
    }
}
