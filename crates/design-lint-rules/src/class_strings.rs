//! Enumerates the class-name strings an expression can render.
//!
//! Only statically visible text is returned. Interpolations inside template
//! literals are not resolved, so `` `w-[${size}px]` `` contributes only its
//! static parts.

use design_lint_core::tree_sitter::Node;
use design_lint_core::{string_content_range, template_quasis, unwrap_parens, SourceFile};

/// The expression shapes the extractor understands.
///
/// New cases are added here, never by inspecting node kinds elsewhere.
#[derive(Debug, Clone, Copy)]
pub enum ExprShape<'t> {
    /// `"text"` or `'text'`.
    StringLiteral(Node<'t>),
    /// `` `text ${x} text` ``.
    Template(Node<'t>),
    /// `[a, b]`.
    Array(Node<'t>),
    /// `{ "a": true, b: cond }`.
    Object(Node<'t>),
    /// `helper(a, b)` with a plain identifier callee.
    Call {
        /// Callee name.
        callee: Node<'t>,
        /// The `arguments` node.
        arguments: Node<'t>,
    },
    /// `cond ? a : b`.
    Ternary {
        /// Branch taken when the condition holds.
        consequence: Node<'t>,
        /// Branch taken otherwise.
        alternative: Node<'t>,
    },
    /// `a + b`.
    Concat(Node<'t>, Node<'t>),
    /// `a && b`, `a || b`, `a ?? b`.
    Logical(Node<'t>, Node<'t>),
    /// Anything else; contributes nothing.
    Other,
}

impl<'t> ExprShape<'t> {
    /// Classifies a node, looking through parentheses.
    #[must_use]
    pub fn of(node: Node<'t>) -> Self {
        let node = unwrap_parens(node);
        match node.kind() {
            "string" => Self::StringLiteral(node),
            "template_string" => Self::Template(node),
            "array" => Self::Array(node),
            "object" => Self::Object(node),
            "call_expression" => match (
                node.child_by_field_name("function"),
                node.child_by_field_name("arguments"),
            ) {
                (Some(callee), Some(arguments))
                    if callee.kind() == "identifier" && arguments.kind() == "arguments" =>
                {
                    Self::Call { callee, arguments }
                }
                _ => Self::Other,
            },
            "ternary_expression" => match (
                node.child_by_field_name("consequence"),
                node.child_by_field_name("alternative"),
            ) {
                (Some(consequence), Some(alternative)) => Self::Ternary {
                    consequence,
                    alternative,
                },
                _ => Self::Other,
            },
            "binary_expression" => {
                let (Some(left), Some(op), Some(right)) = (
                    node.child_by_field_name("left"),
                    node.child_by_field_name("operator"),
                    node.child_by_field_name("right"),
                ) else {
                    return Self::Other;
                };
                match op.kind() {
                    "+" => Self::Concat(left, right),
                    "&&" | "||" | "??" => Self::Logical(left, right),
                    _ => Self::Other,
                }
            }
            _ => Self::Other,
        }
    }
}

/// Walks class expressions and collects every candidate class string.
///
/// Stateless; calling [`extract`](Self::extract) twice on the same node
/// yields the same strings.
#[derive(Debug, Clone, Copy)]
pub struct ClassStringExtractor<'a> {
    source: &'a SourceFile,
    merge_helpers: &'a [String],
}

impl<'a> ClassStringExtractor<'a> {
    /// Creates an extractor recognising the given class-merging helpers.
    #[must_use]
    pub fn new(source: &'a SourceFile, merge_helpers: &'a [String]) -> Self {
        Self {
            source,
            merge_helpers,
        }
    }

    /// Returns every string that may end up in the rendered class list.
    #[must_use]
    pub fn extract(&self, node: Node<'a>) -> Vec<&'a str> {
        let mut out = Vec::new();
        self.collect(node, &mut out);
        out
    }

    fn collect(&self, node: Node<'a>, out: &mut Vec<&'a str>) {
        match ExprShape::of(node) {
            ExprShape::StringLiteral(n) => out.push(self.source.slice(string_content_range(n))),
            ExprShape::Template(n) => {
                out.extend(template_quasis(n).into_iter().map(|r| self.source.slice(r)));
            }
            ExprShape::Array(n) => {
                let mut cursor = n.walk();
                for element in n.named_children(&mut cursor) {
                    self.collect(element, out);
                }
            }
            ExprShape::Object(n) => self.collect_object_keys(n, out),
            ExprShape::Call { callee, arguments } => {
                let name = self.source.node_text(callee);
                if self.merge_helpers.iter().any(|h| h == name) {
                    let mut cursor = arguments.walk();
                    for arg in arguments.named_children(&mut cursor) {
                        self.collect(arg, out);
                    }
                }
            }
            ExprShape::Ternary {
                consequence,
                alternative,
            } => {
                self.collect(consequence, out);
                self.collect(alternative, out);
            }
            ExprShape::Concat(left, right) | ExprShape::Logical(left, right) => {
                self.collect(left, out);
                self.collect(right, out);
            }
            ExprShape::Other => {}
        }
    }

    /// Keys whose value is literally `true` are always-active classes.
    fn collect_object_keys(&self, object: Node<'a>, out: &mut Vec<&'a str>) {
        let mut cursor = object.walk();
        for pair in object.named_children(&mut cursor) {
            if pair.kind() != "pair" {
                continue;
            }
            let (Some(key), Some(value)) = (
                pair.child_by_field_name("key"),
                pair.child_by_field_name("value"),
            ) else {
                continue;
            };
            if value.kind() != "true" {
                continue;
            }
            match key.kind() {
                "string" => out.push(self.source.slice(string_content_range(key))),
                "property_identifier" => out.push(self.source.node_text(key)),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_from(code: &str) -> Vec<String> {
        let source = SourceFile::parse(code).unwrap();
        let helpers: Vec<String> = vec!["clsx".into(), "cn".into()];
        let expr = source
            .descendants()
            .into_iter()
            .find(|n| n.kind() == "jsx_expression")
            .and_then(|n| n.named_child(0))
            .expect("jsx expression");
        ClassStringExtractor::new(&source, &helpers)
            .extract(expr)
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn string_and_template() {
        assert_eq!(extract_from(r#"<a className={"p-4 w-[3px]"} />"#), vec!["p-4 w-[3px]"]);
        assert_eq!(
            extract_from("<a className={`p-4 ${x} z-[5]`} />"),
            vec!["p-4 ", " z-[5]"]
        );
    }

    #[test]
    fn merge_helper_arguments() {
        let got = extract_from(
            r#"<a className={cn("p-4", active && "bg-[#fff]", ["m-1"], { "z-[9]": true, hidden: cond, flex: true })} />"#,
        );
        assert_eq!(got, vec!["p-4", "bg-[#fff]", "m-1", "z-[9]", "flex"]);
    }

    #[test]
    fn unknown_helpers_and_member_callees_yield_nothing() {
        assert!(extract_from(r#"<a className={twMerge("w-[3px]")} />"#).is_empty());
        assert!(extract_from(r#"<a className={utils.cn("w-[3px]")} />"#).is_empty());
    }

    #[test]
    fn conditionals_and_concatenation() {
        let got = extract_from(r#"<a className={(open ? "h-[10px]" : "h-0") + " " + (x ?? "w-1")} />"#);
        assert_eq!(got, vec!["h-[10px]", "h-0", " ", "w-1"]);
    }

    #[test]
    fn other_shapes_are_ignored() {
        assert!(extract_from("<a className={styles.root} />").is_empty());
        assert!(extract_from(r#"<a className={a - "w-[1px]"} />"#).is_empty());
    }

    #[test]
    fn repeated_extraction_is_stable() {
        let source = SourceFile::parse(r#"<a className={clsx("p-[3px]")} />"#).unwrap();
        let helpers = vec!["clsx".to_string()];
        let expr = source
            .descendants()
            .into_iter()
            .find(|n| n.kind() == "call_expression")
            .unwrap();
        let extractor = ClassStringExtractor::new(&source, &helpers);
        assert_eq!(extractor.extract(expr), extractor.extract(expr));
    }
}
