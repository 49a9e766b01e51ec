//! Removes the component-local `designTokens` object.
//!
//! Property accesses against it are replaced with utility classes from a
//! fixed table; paths with no mapping keep working through the renamed
//! `legacyDesignTokens` object and carry a TODO marker.

use design_lint_core::tree_sitter::Node;
use design_lint_core::SourceFile;

use super::Codemod;
use crate::edit::RewritePlan;

/// Identifier of the local token object this transform removes.
const LEGACY_ROOT: &str = "designTokens";

/// Name the local object is kept under until every path is mapped.
const RENAMED_ROOT: &str = "legacyDesignTokens";

/// Known token paths and the utility classes replacing them.
pub const LEGACY_TOKEN_TABLE: &[(&str, &str)] = &[
    ("colors.text.primary", "text-foreground"),
    ("colors.text.secondary", "text-muted-foreground"),
    ("colors.text.muted", "text-muted-foreground"),
    ("colors.logo.container", "bg-surface-muted"),
    ("colors.logo.border", "border-border/60"),
    ("typography.sectionTitle", "text-3xl font-semibold tracking-tight"),
    ("typography.subtitle", "text-base text-muted-foreground"),
    ("spacing.logo", "h-12"),
    ("spacing.logoContainer", "h-24"),
    ("effects.logoHover", "transition-transform duration-200"),
];

fn replacement_for(path: &str) -> Option<&'static str> {
    LEGACY_TOKEN_TABLE
        .iter()
        .find(|(known, _)| *known == path)
        .map(|(_, classes)| *classes)
}

/// Dotted path of a `designTokens.a.b.c` chain, or `None` for any other
/// expression (computed access, other roots).
fn token_path(source: &SourceFile, node: Node<'_>) -> Option<String> {
    let mut parts = Vec::new();
    let mut current = node;
    while current.kind() == "member_expression" {
        let property = current.child_by_field_name("property")?;
        if property.kind() != "property_identifier" {
            return None;
        }
        parts.push(source.node_text(property));
        current = current.child_by_field_name("object")?;
    }
    let rooted = current.kind() == "identifier" && source.node_text(current) == LEGACY_ROOT;
    if !rooted || parts.is_empty() {
        return None;
    }
    parts.reverse();
    Some(parts.join("."))
}

/// Whether `node` is the object of an enclosing member access.
fn is_inner_link(node: Node<'_>) -> bool {
    node.parent().is_some_and(|parent| {
        parent.kind() == "member_expression"
            && parent
                .child_by_field_name("object")
                .is_some_and(|object| object.id() == node.id())
    })
}

/// Top-level `designTokens` declarators with their enclosing statement.
fn legacy_declarations<'t>(source: &'t SourceFile) -> Vec<(Node<'t>, Node<'t>, Node<'t>)> {
    let root = source.root();
    let mut found = Vec::new();
    let mut cursor = root.walk();
    for statement in root.named_children(&mut cursor) {
        let declaration = if statement.kind() == "export_statement" {
            match statement.child_by_field_name("declaration") {
                Some(declaration) => declaration,
                None => continue,
            }
        } else {
            statement
        };
        if !matches!(
            declaration.kind(),
            "lexical_declaration" | "variable_declaration"
        ) {
            continue;
        }
        let mut inner = declaration.walk();
        for declarator in declaration.named_children(&mut inner) {
            let Some(name) = declarator.child_by_field_name("name") else {
                continue;
            };
            if name.kind() == "identifier" && source.node_text(name) == LEGACY_ROOT {
                found.push((statement, declaration, name));
            }
        }
    }
    found
}

/// Replaces `designTokens.*` accesses and renames the local object.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyTokens;

impl Codemod for LegacyTokens {
    fn name(&self) -> &'static str {
        "remove-local-designTokens"
    }

    fn description(&self) -> &'static str {
        "Replace designTokens.* accesses with utility classes and retire the local object"
    }

    fn plan(&self, source: &SourceFile) -> RewritePlan {
        let mut plan = RewritePlan::new();

        for node in source.descendants() {
            if node.kind() != "member_expression" || is_inner_link(node) {
                continue;
            }
            let Some(path) = token_path(source, node) else {
                continue;
            };
            let replacement = match replacement_for(&path) {
                Some(classes) => format!("\"{classes}\""),
                None => {
                    tracing::debug!("{}: no mapping for {}", self.name(), path);
                    format!("/* TODO(ds-migration): map {path} */ {RENAMED_ROOT}.{path}")
                }
            };
            plan.replace(node.byte_range(), replacement);
        }

        for (statement, declaration, name) in legacy_declarations(source) {
            let start = statement.start_byte();
            let indent = source.line_indent(start);
            plan.insert(
                start,
                format!(
                    "// TODO(ds-migration): replace {RENAMED_ROOT} with design-system primitives\n{indent}"
                ),
            );
            if statement.id() != declaration.id() {
                plan.delete(start..declaration.start_byte());
            }
            plan.replace(name.byte_range(), RENAMED_ROOT);
        }

        plan
    }
}
