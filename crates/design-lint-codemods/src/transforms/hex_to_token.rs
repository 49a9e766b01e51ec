//! Replaces known hex colors with semantic token expressions.
//!
//! Unknown hexes stay in place behind a one-time TODO marker comment.

use std::sync::LazyLock;

use design_lint_core::tree_sitter::Node;
use design_lint_core::{has_substitutions, string_content_range, SourceFile};
use regex::Regex;

use super::Codemod;
use crate::edit::RewritePlan;

/// Known hex values and their token expressions.
pub const HEX_TOKEN_TABLE: &[(&str, &str)] = &[
    ("#22c55e", "hsl(var(--success))"),
    ("#16a34a", "hsl(var(--success))"),
    ("#15803d", "hsl(var(--success))"),
    ("#f59e0b", "hsl(var(--warning))"),
    ("#f97316", "hsl(var(--warning))"),
    ("#ef4444", "hsl(var(--destructive))"),
    ("#dc2626", "hsl(var(--destructive))"),
    ("#0ea5e9", "hsl(var(--info))"),
    ("#38bdf8", "hsl(var(--info))"),
    ("#3b82f6", "hsl(var(--accent))"),
    ("#2563eb", "hsl(var(--accent))"),
];

const MARKER_PREFIX: &str = "/* TODO(ds-migration): replace ";
const MARKER_SUFFIX: &str = " with semantic design tokens */";

static HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[0-9a-fA-F]{3,8}\b").expect("valid regex"));

fn token_for(hex: &str) -> Option<&'static str> {
    let lower = hex.to_ascii_lowercase();
    HEX_TOKEN_TABLE
        .iter()
        .find(|(known, _)| *known == lower)
        .map(|(_, token)| *token)
}

/// Result of scanning one literal's text.
#[derive(Debug, PartialEq, Eq)]
struct HexScan {
    rewritten: Option<String>,
    unknown: Vec<String>,
}

fn scan(text: &str) -> Option<HexScan> {
    if !HEX.is_match(text) {
        return None;
    }
    let mut unknown: Vec<String> = Vec::new();
    let mut changed = false;
    let rewritten = HEX.replace_all(text, |caps: &regex::Captures<'_>| {
        let hex = &caps[0];
        if let Some(token) = token_for(hex) {
            changed = true;
            token.to_string()
        } else {
            let lower = hex.to_ascii_lowercase();
            if !unknown.contains(&lower) {
                unknown.push(lower);
            }
            hex.to_string()
        }
    });
    Some(HexScan {
        rewritten: changed.then(|| rewritten.into_owned()),
        unknown,
    })
}

/// Replaces raw hex colors in string and template literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexToToken;

impl HexToToken {
    fn plan_literal(source: &SourceFile, node: Node<'_>, plan: &mut RewritePlan) {
        let content = match node.kind() {
            "string" => string_content_range(node),
            "template_string" if !has_substitutions(node) => string_content_range(node),
            _ => return,
        };
        let Some(found) = scan(source.slice(content.clone())) else {
            return;
        };

        if let Some(rewritten) = found.rewritten {
            plan.replace(content, rewritten);
        }
        if found.unknown.is_empty() || already_marked(source, node) {
            return;
        }

        let marker = format!("{MARKER_PREFIX}{}{MARKER_SUFFIX}", found.unknown.join(", "));
        let in_jsx_attribute = node.parent().is_some_and(|p| p.kind() == "jsx_attribute");
        if in_jsx_attribute {
            plan.insert(node.start_byte(), format!("{{{marker} "));
            plan.insert(node.end_byte(), "}");
        } else {
            plan.insert(node.start_byte(), format!("{marker} "));
        }
    }
}

/// Whether the literal is already preceded by a marker comment.
fn already_marked(source: &SourceFile, node: Node<'_>) -> bool {
    let before = source.slice(0..node.start_byte()).trim_end();
    before.ends_with(MARKER_SUFFIX)
}

impl Codemod for HexToToken {
    fn name(&self) -> &'static str {
        "hex-to-semantic"
    }

    fn description(&self) -> &'static str {
        "Replace known hex colors with hsl(var(--token)) and flag unknown ones"
    }

    fn plan(&self, source: &SourceFile) -> RewritePlan {
        let mut plan = RewritePlan::new();
        for node in source.descendants() {
            if node.kind() == "string" || node.kind() == "template_string" {
                Self::plan_literal(source, node, &mut plan);
            }
        }
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(code: &str) -> String {
        let source = SourceFile::parse(code).unwrap();
        HexToToken.plan(&source).apply(code)
    }

    #[test]
    fn known_hexes_map_case_insensitively() {
        assert_eq!(
            run(r##"const c = "#22C55E";"##),
            r#"const c = "hsl(var(--success))";"#
        );
        assert_eq!(
            run("const g = `linear-gradient(#3b82f6, #2563eb)`;"),
            "const g = `linear-gradient(hsl(var(--accent)), hsl(var(--accent)))`;"
        );
    }

    #[test]
    fn unknown_hexes_get_one_marker() {
        let once = run(r##"const c = { bg: "#abcdef", fg: "#abcdef #123" };"##);
        assert_eq!(
            once,
            r##"const c = { bg: /* TODO(ds-migration): replace #abcdef with semantic design tokens */ "#abcdef", fg: /* TODO(ds-migration): replace #abcdef, #123 with semantic design tokens */ "#abcdef #123" };"##
        );
        assert_eq!(run(&once), once);
    }

    #[test]
    fn mixed_literal_rewrites_known_and_marks_unknown() {
        let out = run(r##"const c = "#ef4444 #010203";"##);
        assert_eq!(
            out,
            r#"const c = /* TODO(ds-migration): replace #010203 with semantic design tokens */ "hsl(var(--destructive)) #010203";"#
        );
    }

    #[test]
    fn jsx_attribute_strings_are_wrapped() {
        let once = run(r##"const a = <Icon color="#777777" />;"##);
        assert_eq!(
            once,
            r##"const a = <Icon color={/* TODO(ds-migration): replace #777777 with semantic design tokens */ "#777777"} />;"##
        );
        assert_eq!(run(&once), once);
    }

    #[test]
    fn interpolated_templates_are_skipped() {
        let code = "const c = `${base} #22c55e`;";
        assert_eq!(run(code), code);
    }

    #[test]
    fn second_run_of_known_hexes_changes_nothing() {
        let once = run(r##"const c = ["#0ea5e9", '#f97316'];"##);
        assert_eq!(once, r#"const c = ["hsl(var(--info))", 'hsl(var(--warning))'];"#);
        let source = SourceFile::parse(&once).unwrap();
        assert!(HexToToken.plan(&source).is_empty());
    }
}
