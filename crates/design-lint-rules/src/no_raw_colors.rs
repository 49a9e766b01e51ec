//! Rule to forbid raw color literals in application code.
//!
//! # Rationale
//!
//! Hex, `rgb()` and `hsl()` literals bypass the design tokens, so theme
//! changes never reach them. Values that reference a token (`var(--...)`)
//! are fine.
//!
//! # Coverage
//!
//! Every string literal and every static part of a template literal is a
//! candidate, whether it appears in a JSX attribute, a `*color*` object
//! property, a variable initializer, an assignment or a call argument.
//! Each literal is reported at most once. Literals are classified by their
//! decoded value, so `"\x23fff"` counts as `#fff`.

use std::borrow::Cow;
use std::ops::Range;

use design_lint_core::classify::{classify_color, RawColor};
use design_lint_core::tree_sitter::Node;
use design_lint_core::utils::ReportedNodeSet;
use design_lint_core::{
    string_content_range, template_quasis, unescape_string, unwrap_parens, DesignLintConfig,
    FileContext, Location, Rule, Severity, SourceFile, Suggestion, Violation,
};

/// Rule code for no-raw-colors.
pub const CODE: &str = "DL001";

/// Rule name for no-raw-colors.
pub const NAME: &str = "no-raw-colors";

/// Forbids raw hex/rgb/hsl color literals.
#[derive(Debug, Clone)]
pub struct NoRawColors {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoRawColors {
    fn default() -> Self {
        Self::new()
    }
}

impl NoRawColors {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for NoRawColors {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallow raw color literals in application code"
    }

    fn default_severity(&self) -> Severity {
        self.severity
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

        let mut visitor = RawColorVisitor {
            ctx,
            rule: self,
            source,
            reported: ReportedNodeSet::new(),
            violations: Vec::new(),
        };
        for node in source.descendants() {
            visitor.visit(node);
        }
        visitor.violations
    }
}

struct RawColorVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a NoRawColors,
    source: &'a SourceFile,
    reported: ReportedNodeSet,
    violations: Vec<Violation>,
}

impl<'a> RawColorVisitor<'a> {
    fn visit(&mut self, node: Node<'a>) {
        match node.kind() {
            "string" | "template_string" => self.check_literal(node),
            "jsx_attribute" => {
                if let Some(value) = jsx_attribute_value(node) {
                    self.check_value(value);
                }
            }
            "jsx_expression" => {
                if let Some(expr) = node.named_child(0) {
                    self.check_value(expr);
                }
            }
            "pair" => {
                let key_is_color = node
                    .child_by_field_name("key")
                    .is_some_and(|key| self.key_name(key).to_ascii_lowercase().contains("color"));
                if key_is_color {
                    if let Some(value) = node.child_by_field_name("value") {
                        self.check_literal(value);
                    }
                }
            }
            "variable_declarator" => {
                if let Some(value) = node.child_by_field_name("value") {
                    self.check_literal(value);
                }
            }
            "assignment_expression" => {
                if let Some(right) = node.child_by_field_name("right") {
                    self.check_literal(right);
                }
            }
            "call_expression" | "new_expression" => {
                if let Some(args) = node.child_by_field_name("arguments") {
                    let mut cursor = args.walk();
                    let args: Vec<_> = args.named_children(&mut cursor).collect();
                    for arg in args {
                        self.check_literal(arg);
                    }
                }
            }
            _ => {}
        }
    }

    fn check_value(&mut self, value: Node<'a>) {
        if value.kind() == "jsx_expression" {
            if let Some(expr) = value.named_child(0) {
                self.check_literal(expr);
            }
        } else {
            self.check_literal(value);
        }
    }

    fn check_literal(&mut self, node: Node<'a>) {
        let node = unwrap_parens(node);
        match node.kind() {
            "string" => self.report_if_raw(node, string_content_range(node)),
            "template_string" => {
                for quasi in template_quasis(node) {
                    self.report_if_raw(node, quasi);
                }
            }
            _ => {}
        }
    }

    fn report_if_raw(&mut self, node: Node<'a>, content: Range<usize>) {
        let value = unescape_string(self.source.slice(content.clone()));
        let Some(color) = classify_color(&value) else {
            return;
        };
        if !self.reported.insert(content.clone()) {
            return;
        }

        let location = if node.kind() == "template_string" {
            Location::from_node(self.ctx.report_path(), node)
                .with_span(content.start, content.end - content.start)
        } else {
            Location::from_node(self.ctx.report_path(), node)
        };

        let (message_id, message, help) = match &color {
            RawColor::Hsl(literal) => (
                "useHslVar",
                format!(
                    "Wrap HSL colors with CSS variables: replace '{literal}' with hsl(var(--token-name))."
                ),
                "Define the color as a CSS variable and reference it with hsl(var(--token))",
            ),
            RawColor::Hex(literal) | RawColor::Rgb(literal) => (
                "useTokens",
                format!(
                    "Avoid raw color literal '{literal}'. Use design tokens or Tailwind utilities (e.g., text-fg, bg-accent, var(--token))."
                ),
                "Replace the literal with a semantic token utility such as text-fg or bg-accent",
            ),
        };

        self.violations.push(
            Violation::new(
                CODE,
                NAME,
                message_id,
                self.rule.severity,
                location,
                message,
            )
            .with_suggestion(Suggestion::new(help)),
        );
    }

    fn key_name(&self, key: Node<'a>) -> Cow<'a, str> {
        match key.kind() {
            "string" => unescape_string(self.source.slice(string_content_range(key))),
            "property_identifier" => unescape_string(self.source.node_text(key)),
            _ => Cow::Borrowed(""),
        }
    }
}

/// Returns the value node of a JSX attribute, if it has one.
pub(crate) fn jsx_attribute_value(attribute: Node<'_>) -> Option<Node<'_>> {
    if attribute.named_child_count() < 2 {
        return None;
    }
    attribute.named_child(u32::try_from(attribute.named_child_count() - 1).ok()?)
}
