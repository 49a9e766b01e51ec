//! Rule to forbid Tailwind arbitrary values in class attributes.
//!
//! Tokens such as `bg-[#0ea5e9]`, `w-[742px]` or `z-[9999]` hard-code values
//! that belong in the design scale. Only `class`/`className` attributes are
//! inspected; see [`ClassStringExtractor`] for the expression shapes covered.
//!
//! Line-height and letter-spacing values are reported as warnings while
//! `warnLineHeightAndTracking` is on, except in story files. A token repeated
//! within one attribute, such as in both arms of a ternary, is reported once.

use std::collections::HashSet;

use design_lint_core::classify::{
    classify_arbitrary_token, has_arbitrary_value, parse_arbitrary_token, ArbitraryKind,
};
use design_lint_core::tree_sitter::Node;
use design_lint_core::{
    string_content_range, DesignLintConfig, FileContext, Location, Rule, Severity, SourceFile,
    Violation,
};

use crate::class_strings::ClassStringExtractor;
use crate::no_raw_colors::jsx_attribute_value;

/// Rule code for no-arbitrary-values.
pub const CODE: &str = "DL002";

/// Rule name for no-arbitrary-values.
pub const NAME: &str = "no-arbitrary-values";

/// Attribute names treated as class lists.
pub const CLASS_ATTRIBUTES: &[&str] = &["class", "className"];

/// Forbids Tailwind arbitrary values in class strings.
#[derive(Debug, Clone, Default)]
pub struct NoArbitraryValues;

impl NoArbitraryValues {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoArbitraryValues {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallow Tailwind arbitrary values in class strings"
    }

    fn check(
        &self,
        ctx: &FileContext,
        source: &SourceFile,
        config: &DesignLintConfig,
    ) -> Vec<Violation> {
        if config.is_file_allowlisted(&ctx.relative_path) {
            tracing::debug!("{} is allowlisted; skipping {}", ctx.relative_path, NAME);
            return Vec::new();
        }

        let typography_severity =
            if config.warn_line_height_and_tracking && !ctx.is_story_file() {
                Severity::Warning
            } else {
                Severity::Error
            };
        let extractor = ClassStringExtractor::new(source, &config.class_merge_helpers);

        let mut violations = Vec::new();
        for attribute in source.descendants() {
            if attribute.kind() != "jsx_attribute" || !is_class_attribute(source, attribute) {
                continue;
            }
            let Some(value) = jsx_attribute_value(attribute) else {
                continue;
            };

            let class_strings = match value.kind() {
                "string" => vec![source.slice(string_content_range(value))],
                "jsx_expression" => value
                    .named_child(0)
                    .map(|expr| extractor.extract(expr))
                    .unwrap_or_default(),
                _ => continue,
            };

            let mut seen = HashSet::new();
            for class_string in &class_strings {
                for class_name in class_string.split_whitespace() {
                    if !seen.insert(class_name) {
                        continue;
                    }
                    if let Some(kind) = check_class_name(class_name, config) {
                        let severity = match kind {
                            ArbitraryKind::Typography => typography_severity,
                            _ => Severity::Error,
                        };
                        violations.push(Violation::new(
                            CODE,
                            NAME,
                            kind.message_id(),
                            severity,
                            Location::from_node(ctx.report_path(), value),
                            message_for(kind, class_name),
                        ));
                    }
                }
            }
        }
        violations
    }
}

fn is_class_attribute(source: &SourceFile, attribute: Node<'_>) -> bool {
    attribute
        .named_child(0)
        .is_some_and(|name| CLASS_ATTRIBUTES.contains(&source.node_text(name)))
}

/// Classifies one whitespace-delimited class token, honouring the
/// allowlisted class patterns.
#[must_use]
pub fn check_class_name(class_name: &str, config: &DesignLintConfig) -> Option<ArbitraryKind> {
    if !has_arbitrary_value(class_name) || config.is_class_allowlisted(class_name) {
        return None;
    }
    let token = parse_arbitrary_token(class_name)?;
    classify_arbitrary_token(&token.prefix, &token.raw_value)
}

fn message_for(kind: ArbitraryKind, class_name: &str) -> String {
    match kind {
        ArbitraryKind::Color => format!(
            "Avoid Tailwind arbitrary color '{class_name}'. Use design tokens or CSS variables (e.g., text-fg, bg-accent, hsl(var(--token)))."
        ),
        ArbitraryKind::Dimension => format!(
            "Avoid Tailwind arbitrary size '{class_name}'. Map to spacing/sizing scale or design tokens."
        ),
        ArbitraryKind::ZIndex => format!(
            "Avoid arbitrary z-index '{class_name}'. Use semantic layering tokens (e.g., z-overlay, z-modal)."
        ),
        ArbitraryKind::Typography => format!(
            "Avoid arbitrary typography value '{class_name}'. Use the typography scale or update tokens."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use design_lint_core::{Allowlist, ConfigFile};
    use std::path::Path;

    fn check_with(code: &str, file: &str, config: &DesignLintConfig) -> Vec<Violation> {
        let source = SourceFile::parse(code).expect("Failed to parse");
        let ctx = FileContext::new(Path::new(file), code, Path::new("/repo"));
        NoArbitraryValues::new().check(&ctx, &source, config)
    }

    fn check_code(code: &str) -> Vec<Violation> {
        check_with(code, "components/hero.tsx", &DesignLintConfig::default())
    }

    #[test]
    fn typography_pair_reports_two_warnings() {
        let violations = check_code(r#"<h1 className="leading-[1.1] tracking-[-0.02em]">Hi</h1>"#);
        assert_eq!(violations.len(), 2);
        assert!(violations
            .iter()
            .all(|v| v.message_id == "disallowTypography" && v.severity == Severity::Warning));
        assert!(violations[0].message.contains("'leading-[1.1]'"));
        assert!(violations[1].message.contains("'tracking-[-0.02em]'"));
    }

    #[test]
    fn typography_is_error_in_stories_or_when_disabled() {
        let code = r#"<p className="leading-[1.1]" />"#;
        let story = check_with(code, "stories/Hero.stories.tsx", &DesignLintConfig::default());
        assert_eq!(story[0].severity, Severity::Error);

        let file = ConfigFile {
            warn_line_height_and_tracking: Some(false),
            ..ConfigFile::default()
        };
        let strict = DesignLintConfig::merge(file, Allowlist::default()).unwrap();
        let violations = check_with(code, "components/hero.tsx", &strict);
        assert_eq!(violations[0].severity, Severity::Error);
    }

    #[test]
    fn each_kind_has_its_message() {
        let violations =
            check_code(r#"<div className="bg-[#0ea5e9] w-[742px] z-[9999] md:hover:p-[3px]" />"#);
        let ids: Vec<_> = violations.iter().map(|v| v.message_id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["disallowColor", "disallowDimension", "disallowZIndex", "disallowDimension"]
        );
        assert!(violations.iter().all(|v| v.severity == Severity::Error));
    }

    #[test]
    fn only_class_attributes_are_checked() {
        assert!(check_code(r#"<div data-x="w-[742px]" title="z-[5]" />"#).is_empty());
        assert_eq!(check_code(r#"<div class="w-[742px]" />"#).len(), 1);
        assert!(check_code(r#"const cls = "w-[742px]";"#).is_empty());
    }

    #[test]
    fn expression_containers_use_extractor() {
        let violations = check_code(
            r#"<div className={cn("p-4", open ? "h-[10px]" : "h-0", { "z-[50]": true })} />"#,
        );
        let ids: Vec<_> = violations.iter().map(|v| v.message_id.as_str()).collect();
        assert_eq!(ids, vec!["disallowDimension", "disallowZIndex"]);
    }

    #[test]
    fn repeated_token_in_one_attribute_reports_once() {
        let violations =
            check_code(r#"<div className={open ? "w-[742px] p-2" : "w-[742px] p-4"} />"#);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("'w-[742px]'"));

        let twice = check_code(r#"<><i className="w-[742px]" /><b className="w-[742px]" /></>"#);
        assert_eq!(twice.len(), 2);
    }

    #[test]
    fn interpolated_values_are_not_resolved() {
        assert!(check_code("<div className={`w-[${size}px]`} />").is_empty());
    }

    #[test]
    fn allowlisted_class_patterns_are_skipped() {
        let allowlist = Allowlist {
            paths: vec![],
            class_patterns: vec![r"^translate-[xy]-\[-50%\]$".into()],
        };
        let config = DesignLintConfig::merge(ConfigFile::default(), allowlist).unwrap();
        let code = r#"<div className="translate-x-[-50%] translate-y-[-50%]" />"#;
        assert!(check_with(code, "components/modal.tsx", &config).is_empty());
        assert_eq!(check_code(code).len(), 2);
    }
}
