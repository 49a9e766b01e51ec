//! JSX element helpers shared by the element transforms.

use design_lint_core::tree_sitter::Node;
use design_lint_core::{string_content_range, SourceFile};

use crate::edit::RewritePlan;

/// Attribute names treated as class lists.
pub const CLASS_ATTRIBUTES: &[&str] = &["className", "class"];

/// A JSX element with an opening and (usually) a closing tag.
#[derive(Debug, Clone, Copy)]
pub struct JsxElement<'t> {
    /// The whole `jsx_element`.
    pub node: Node<'t>,
    /// The `jsx_opening_element`.
    pub open: Node<'t>,
    /// The `jsx_closing_element`, absent only in malformed trees.
    pub close: Option<Node<'t>>,
}

impl<'t> JsxElement<'t> {
    /// Wraps a `jsx_element` node.
    #[must_use]
    pub fn from_node(node: Node<'t>) -> Option<Self> {
        if node.kind() != "jsx_element" {
            return None;
        }
        let open = node.child_by_field_name("open_tag")?;
        Some(Self {
            node,
            open,
            close: node.child_by_field_name("close_tag"),
        })
    }

    /// Every `jsx_element` in the file, in document order.
    #[must_use]
    pub fn all(source: &'t SourceFile) -> Vec<Self> {
        source
            .descendants()
            .into_iter()
            .filter_map(Self::from_node)
            .collect()
    }

    /// The tag name as written (`button`, `Badge`, `motion.div`).
    #[must_use]
    pub fn tag_name(&self, source: &'t SourceFile) -> &'t str {
        self.open
            .child_by_field_name("name")
            .map_or("", |n| source.node_text(n))
    }

    /// The opening tag's attributes, including spreads.
    #[must_use]
    pub fn attributes(&self) -> Vec<Node<'t>> {
        let mut cursor = self.open.walk();
        let attrs = self
            .open
            .children_by_field_name("attribute", &mut cursor)
            .collect();
        attrs
    }

    /// Whether an attribute with the given name exists.
    #[must_use]
    pub fn has_attribute(&self, source: &SourceFile, name: &str) -> bool {
        self.attributes()
            .into_iter()
            .any(|a| attribute_name(source, a) == Some(name))
    }

    /// The first class attribute with a plain string value.
    ///
    /// An element whose class attribute holds an expression yields `None`.
    #[must_use]
    pub fn class_attribute(&self, source: &'t SourceFile) -> Option<ClassAttribute<'t>> {
        let attribute = self.attributes().into_iter().find(|a| {
            attribute_name(source, *a).is_some_and(|name| CLASS_ATTRIBUTES.contains(&name))
        })?;
        let value = attribute.named_child(1)?;
        if value.kind() != "string" {
            return None;
        }
        Some(ClassAttribute {
            attribute,
            value,
            classes: split_classes(source.slice(string_content_range(value))),
        })
    }

    /// Renames the opening and closing tags.
    pub fn rename(&self, plan: &mut RewritePlan, name: &str) {
        for tag in std::iter::once(self.open).chain(self.close) {
            if let Some(name_node) = tag.child_by_field_name("name") {
                plan.replace(name_node.byte_range(), name);
            }
        }
    }

    /// Appends props after the last attribute (or the tag name).
    ///
    /// Each prop is `name` or `name="value"` and gets a leading space.
    pub fn add_props(&self, plan: &mut RewritePlan, props: &[String]) {
        if props.is_empty() {
            return;
        }
        let anchor = self
            .attributes()
            .last()
            .copied()
            .or_else(|| self.open.child_by_field_name("name"));
        let Some(anchor) = anchor else {
            return;
        };
        let text: String = props.iter().map(|p| format!(" {p}")).collect();
        plan.insert(anchor.end_byte(), text);
    }
}

/// A class attribute with a string value, split into tokens.
#[derive(Debug, Clone)]
pub struct ClassAttribute<'t> {
    /// The `jsx_attribute` node.
    pub attribute: Node<'t>,
    /// Its `string` value.
    pub value: Node<'t>,
    /// Whitespace-delimited class tokens.
    pub classes: Vec<&'t str>,
}

impl ClassAttribute<'_> {
    /// Whether a token is present.
    #[must_use]
    pub fn has(&self, token: &str) -> bool {
        self.classes.contains(&token)
    }

    /// Whether every token is present.
    #[must_use]
    pub fn has_all(&self, tokens: &[&str]) -> bool {
        tokens.iter().all(|t| self.has(t))
    }

    /// Rewrites the value to the kept tokens, de-duplicated in order.
    /// Removes the attribute entirely when nothing is kept.
    pub fn retain(&self, plan: &mut RewritePlan, keep: impl Fn(&str) -> bool) {
        let mut remaining: Vec<&str> = Vec::new();
        for token in self.classes.iter().copied().filter(|t| keep(t)) {
            if !remaining.contains(&token) {
                remaining.push(token);
            }
        }

        if remaining.is_empty() {
            let start = self
                .attribute
                .prev_sibling()
                .map_or(self.attribute.start_byte(), |n| n.end_byte());
            plan.delete(start..self.attribute.end_byte());
        } else {
            plan.replace(string_content_range(self.value), remaining.join(" "));
        }
    }
}

/// Splits a class string on whitespace.
#[must_use]
pub fn split_classes(value: &str) -> Vec<&str> {
    value.split_whitespace().collect()
}

/// Name of a `jsx_attribute`, or `None` for spreads.
#[must_use]
pub fn attribute_name<'t>(source: &'t SourceFile, attribute: Node<'t>) -> Option<&'t str> {
    if attribute.kind() != "jsx_attribute" {
        return None;
    }
    attribute.named_child(0).map(|n| source.node_text(n))
}

/// Makes sure `names` are imported from `module`, editing an existing
/// import where possible. Each call adds at most one declaration.
pub fn ensure_named_imports(
    source: &SourceFile,
    plan: &mut RewritePlan,
    module: &str,
    names: &[&str],
) {
    let root = source.root();
    let mut cursor = root.walk();
    let statements: Vec<Node<'_>> = root.named_children(&mut cursor).collect();

    let imports: Vec<Node<'_>> = statements
        .iter()
        .copied()
        .filter(|n| n.kind() == "import_statement")
        .collect();

    for import in &imports {
        if import_source(source, *import) != Some(module) || is_type_only(*import) {
            continue;
        }
        let Some(clause) = child_of_kind(*import, "import_clause") else {
            continue;
        };
        if let Some(named) = child_of_kind(clause, "named_imports") {
            let existing = imported_names(source, named);
            let missing: Vec<&str> = names
                .iter()
                .copied()
                .filter(|n| !existing.contains(n))
                .collect();
            if missing.is_empty() {
                return;
            }
            let mut specifiers = named.walk();
            let last = named
                .named_children(&mut specifiers)
                .filter(|n| n.kind() == "import_specifier")
                .last();
            match last {
                Some(last) => plan.insert(last.end_byte(), format!(", {}", missing.join(", "))),
                None => plan.replace(named.byte_range(), format!("{{ {} }}", missing.join(", "))),
            }
            return;
        }
        if child_of_kind(clause, "namespace_import").is_some() {
            continue;
        }
        if let Some(default) = child_of_kind(clause, "identifier") {
            plan.insert(default.end_byte(), format!(", {{ {} }}", names.join(", ")));
            return;
        }
    }

    let semi = imports
        .last()
        .map_or(true, |i| source.node_text(*i).trim_end().ends_with(';'));
    let declaration = format!(
        "import {{ {} }} from \"{}\"{}",
        names.join(", "),
        module,
        if semi { ";" } else { "" }
    );

    if let Some(last) = imports.last() {
        plan.insert(last.end_byte(), format!("\n{declaration}"));
        return;
    }

    let prologue_end = statements
        .iter()
        .take_while(|n| is_directive(**n))
        .last()
        .map(|n| n.end_byte());
    match prologue_end {
        Some(end) => plan.insert(end, format!("\n\n{declaration}")),
        None => plan.insert(0, format!("{declaration}\n\n")),
    }
}

fn import_source<'t>(source: &'t SourceFile, import: Node<'t>) -> Option<&'t str> {
    import
        .child_by_field_name("source")
        .map(|s| source.slice(string_content_range(s)))
}

fn is_type_only(import: Node<'_>) -> bool {
    let mut cursor = import.walk();
    let found = import.children(&mut cursor).any(|c| c.kind() == "type");
    found
}

fn is_directive(statement: Node<'_>) -> bool {
    statement.kind() == "expression_statement"
        && statement.named_child(0).is_some_and(|n| n.kind() == "string")
}

fn imported_names<'t>(source: &'t SourceFile, named: Node<'t>) -> Vec<&'t str> {
    let mut cursor = named.walk();
    let names = named
        .named_children(&mut cursor)
        .filter(|n| n.kind() == "import_specifier")
        .filter_map(|specifier| {
            specifier.child_by_field_name("alias")
                .or_else(|| specifier.child_by_field_name("name"))
                .map(|n| source.node_text(n))
        })
        .collect();
    names
}

fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).find(|c| c.kind() == kind);
    found
}
