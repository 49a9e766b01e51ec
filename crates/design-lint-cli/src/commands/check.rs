//! Check command implementation.

use anyhow::{Context, Result};
use design_lint_core::{Analyzer, RuleBox};
use design_lint_rules::{rule_by_name, Preset};
use std::path::Path;

use crate::config_resolver::{ConfigSource, ResolvedSources};
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    preset: Preset,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    sources: &ResolvedSources,
) -> Result<()> {
    if let ConfigSource::Project(p) = &sources.config {
        tracing::info!("Using project config: {}", p.display());
    }

    let cwd = std::env::current_dir().context("Failed to read the working directory")?;

    let rules = match rules_filter {
        Some(filter) => filter_rules(&filter),
        None => preset.rules(),
    };

    let analyzer = Analyzer::builder()
        .root(path)
        .cwd(cwd)
        .settings(sources.settings())
        .excludes(exclude)
        .rules(rules)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format)?;

    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

fn filter_rules(filter: &str) -> Vec<RuleBox> {
    filter
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(|name| {
            let rule = rule_by_name(name);
            if rule.is_none() {
                tracing::warn!("Unknown rule: {}", name);
            }
            rule
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts_names_and_codes() {
        let rules = filter_rules("no-raw-colors, DL002");
        let codes: Vec<_> = rules.iter().map(|r| r.code()).collect();
        assert_eq!(codes, vec!["DL001", "DL002"]);
    }

    #[test]
    fn unknown_rules_are_dropped() {
        assert!(filter_rules("no-such-rule,").is_empty());
    }
}
