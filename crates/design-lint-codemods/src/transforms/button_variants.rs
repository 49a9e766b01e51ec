//! Migrates hand-styled `<button>` elements to `<Button variant tone size>`.

use design_lint_core::SourceFile;

use super::Codemod;
use crate::edit::RewritePlan;
use crate::jsx::{ensure_named_imports, ClassAttribute, JsxElement};

/// Module exporting the button component.
pub const BUTTON_MODULE: &str = "@/components/ui/button";

const ACCENT_TOKENS: &[&str] = &[
    "bg-gradient-to-r",
    "from-blue-600",
    "to-cyan-600",
    "hover:from-blue-700",
    "hover:to-cyan-700",
];

const ACCENT_EXTRAS: &[&str] = &["text-white", "shadow-md", "hover:shadow-lg"];

const NEUTRAL_TOKENS: &[&str] = &["bg-gray-900", "hover:bg-gray-800", "text-white"];

const SPACING_TOKENS: &[&str] = &[
    "px-6",
    "py-3",
    "px-5",
    "py-2",
    "py-2.5",
    "h-12",
    "rounded-lg",
    "rounded-2xl",
    "transition-all",
    "duration-200",
];

/// What a `<button>` class list maps to.
#[derive(Debug, Default, PartialEq, Eq)]
struct ButtonShape {
    tone: Option<&'static str>,
    size: Option<&'static str>,
    full_width: bool,
    consumed: Vec<&'static str>,
}

impl ButtonShape {
    fn detect(class: &ClassAttribute<'_>) -> Option<Self> {
        let mut shape = Self::default();

        if class.has_all(ACCENT_TOKENS) {
            shape.tone = Some("accent");
            shape.consumed.extend(ACCENT_TOKENS.iter().chain(ACCENT_EXTRAS));
        } else if class.has_all(NEUTRAL_TOKENS) {
            shape.tone = Some("neutral");
            shape.consumed.extend(NEUTRAL_TOKENS);
        }

        shape.size = if class.has("py-3") || class.has("h-12") {
            Some("lg")
        } else if class.has("py-2.5") || class.has("py-2") {
            Some("md")
        } else {
            None
        };
        if shape.size.is_some() {
            shape.consumed.extend(SPACING_TOKENS);
        }

        if class.has("w-full") {
            shape.full_width = true;
            shape.consumed.push("w-full");
        }

        (shape.tone.is_some() || shape.size.is_some() || shape.full_width).then_some(shape)
    }

    fn props(&self) -> Vec<String> {
        let mut props = Vec::new();
        if let Some(tone) = self.tone {
            props.push("variant=\"solid\"".to_string());
            props.push(format!("tone=\"{tone}\""));
        }
        if let Some(size) = self.size {
            props.push(format!("size=\"{size}\""));
        }
        if self.full_width {
            props.push("fullWidth".to_string());
        }
        props
    }
}

/// Replaces gradient and neutral `<button>` styling with `<Button>` props.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonVariants;

impl Codemod for ButtonVariants {
    fn name(&self) -> &'static str {
        "button-to-ds-variants"
    }

    fn description(&self) -> &'static str {
        "Turn gradient/neutral <button> styling into <Button variant tone size fullWidth>"
    }

    fn plan(&self, source: &SourceFile) -> RewritePlan {
        let mut plan = RewritePlan::new();
        let mut matched = 0usize;

        for element in JsxElement::all(source) {
            if element.tag_name(source) != "button" {
                continue;
            }
            let Some(class) = element.class_attribute(source) else {
                continue;
            };
            let Some(shape) = ButtonShape::detect(&class) else {
                continue;
            };

            class.retain(&mut plan, |t| !shape.consumed.contains(&t));
            element.rename(&mut plan, "Button");

            let mut props = shape.props();
            if !element.has_attribute(source, "type") {
                props.push("type=\"button\"".to_string());
            }
            element.add_props(&mut plan, &props);
            matched += 1;
        }

        if matched > 0 {
            tracing::debug!("{}: {} button(s) migrated", self.name(), matched);
            ensure_named_imports(source, &mut plan, BUTTON_MODULE, &["Button"]);
        }
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(code: &str) -> String {
        let source = SourceFile::parse(code).unwrap();
        ButtonVariants.plan(&source).apply(code)
    }

    #[test]
    fn gradient_full_width_button() {
        let code = r#"import { Button } from "@/components/ui/button";

const A = () => (
  <button className="bg-gradient-to-r from-blue-600 to-cyan-600 hover:from-blue-700 hover:to-cyan-700 text-white w-full font-medium" onClick={go}>
    Go
  </button>
);
"#;
        let expected = r#"import { Button } from "@/components/ui/button";

const A = () => (
  <Button className="font-medium" onClick={go} variant="solid" tone="accent" fullWidth type="button">
    Go
  </Button>
);
"#;
        assert_eq!(run(code), expected);
    }

    #[test]
    fn sized_neutral_button_drops_class_attribute() {
        let code = r#"const A = () => <button type="submit" className="bg-gray-900 hover:bg-gray-800 text-white px-6 py-3 rounded-lg">Save</button>;"#;
        assert_eq!(
            run(code),
            "import { Button } from \"@/components/ui/button\";\n\nconst A = () => <Button type=\"submit\" variant=\"solid\" tone=\"neutral\" size=\"lg\">Save</Button>;"
        );
    }

    #[test]
    fn partial_neutral_set_is_not_a_tone() {
        let code = r#"const A = () => <button className="bg-gray-900 text-white">x</button>;"#;
        assert_eq!(run(code), code);
    }

    #[test]
    fn other_tags_and_expression_classes_are_skipped() {
        let code = r#"const A = () => <><a className="w-full">x</a><button className={cn("w-full")}>y</button></>;"#;
        assert_eq!(run(code), code);
    }

    #[test]
    fn second_run_finds_nothing() {
        let code = r#"const A = () => <button className="w-full">x</button>;"#;
        let once = run(code);
        assert!(once.contains("<Button fullWidth type=\"button\">x</Button>"));
        assert_eq!(run(&once), once);
    }
}
