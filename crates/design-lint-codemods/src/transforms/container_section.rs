//! Wraps layout elements in `<Container>` or `<Section size>`.

use design_lint_core::SourceFile;

use super::Codemod;
use crate::edit::RewritePlan;
use crate::jsx::{ensure_named_imports, JsxElement};

/// Module exporting the layout primitives.
pub const PATTERNS_MODULE: &str = "@/components/patterns";

/// Tokens that together mark a page-width container.
const CONTAINER_TOKENS: &[&str] = &["max-w-7xl", "mx-auto"];

/// Gutter tokens consumed along with a container.
const GUTTER_TOKENS: &[&str] = &["px-4", "sm:px-6", "lg:px-8"];

/// Vertical-rhythm patterns, first match wins.
const SECTION_PATTERNS: &[(&[&str], &str)] = &[
    (&["py-12", "md:py-16"], "md"),
    (&["py-16", "md:py-20"], "lg"),
    (&["py-20", "lg:py-24"], "xl"),
    (&["py-8"], "sm"),
];

/// Wraps page-width containers and padded sections in layout primitives.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerSection;

impl Codemod for ContainerSection {
    fn name(&self) -> &'static str {
        "wrap-with-container-section"
    }

    fn description(&self) -> &'static str {
        "Wrap max-width containers in <Container> and padded blocks in <Section size>"
    }

    fn plan(&self, source: &SourceFile) -> RewritePlan {
        let mut plan = RewritePlan::new();
        let mut imports: Vec<&str> = Vec::new();
        let unit = source.indent_unit();

        for element in JsxElement::all(source) {
            if matches!(element.tag_name(source), "Container" | "Section") {
                continue;
            }
            let Some(class) = element.class_attribute(source) else {
                continue;
            };

            let (consumed, open_tag, close_tag, import): (Vec<&str>, String, &str, &str) =
                if class.has_all(CONTAINER_TOKENS) {
                    let consumed = CONTAINER_TOKENS
                        .iter()
                        .chain(GUTTER_TOKENS)
                        .copied()
                        .collect();
                    (consumed, "<Container>".to_string(), "</Container>", "Container")
                } else if let Some((tokens, size)) = SECTION_PATTERNS
                    .iter()
                    .find(|(tokens, _)| class.has_all(tokens))
                {
                    (
                        tokens.to_vec(),
                        format!("<Section size=\"{size}\">"),
                        "</Section>",
                        "Section",
                    )
                } else {
                    continue;
                };

            tracing::debug!(
                "{}: wrapping <{}> in {}",
                self.name(),
                element.tag_name(source),
                open_tag
            );

            class.retain(&mut plan, |t| !consumed.contains(&t));

            let start = element.node.start_byte();
            let indent = source.line_indent(start);
            plan.insert(start, format!("{open_tag}\n{indent}{unit}"));
            plan.insert(element.node.end_byte(), format!("\n{indent}{close_tag}"));

            if !imports.contains(&import) {
                imports.push(import);
            }
        }

        if !imports.is_empty() {
            ensure_named_imports(source, &mut plan, PATTERNS_MODULE, &imports);
        }
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(code: &str) -> String {
        let source = SourceFile::parse(code).unwrap();
        ContainerSection.plan(&source).apply(code)
    }

    #[test]
    fn wraps_container_and_consumes_gutters() {
        let code = r#"export function Page() {
  return (
    <div className="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 grid gap-6">
      <p>Hi</p>
    </div>
  );
}
"#;
        let expected = r#"import { Container } from "@/components/patterns";

export function Page() {
  return (
    <Container>
      <div className="grid gap-6">
      <p>Hi</p>
    </div>
    </Container>
  );
}
"#;
        assert_eq!(run(code), expected);
    }

    #[test]
    fn wraps_section_with_size() {
        let code = "import { cn } from \"@/lib/utils\";\n\nconst A = () => <section className=\"py-16 md:py-20\">x</section>;\n";
        let out = run(code);
        assert!(out.contains("import { Section } from \"@/components/patterns\";"));
        assert!(out.contains("<Section size=\"lg\">\n  <section>x</section>\n</Section>"));
    }

    #[test]
    fn partial_container_is_left_alone() {
        let code = r#"const A = () => <div className="mx-auto px-4">x</div>;"#;
        assert_eq!(run(code), code);
    }

    #[test]
    fn section_tokens_match_whole_tokens_only() {
        let code = r#"const A = () => <div className="md:py-8">x</div>;"#;
        assert_eq!(run(code), code);
    }

    #[test]
    fn second_run_finds_nothing() {
        let code = r#"const A = () => <div className="max-w-7xl mx-auto">x</div>;"#;
        let once = run(code);
        assert_ne!(once, code);
        assert_eq!(run(&once), once);
    }
}
