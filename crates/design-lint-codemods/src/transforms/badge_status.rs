//! Migrates pill-shaped status labels to `<Badge tone variant="soft">`.

use std::sync::LazyLock;

use design_lint_core::SourceFile;
use regex::Regex;

use super::Codemod;
use crate::edit::RewritePlan;
use crate::jsx::{ensure_named_imports, JsxElement};

/// Module exporting the badge component.
pub const BADGE_MODULE: &str = "@/components/ui/badge";

/// Background families mapped to tones, first match wins.
static TONES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"bg-(green|emerald|success)", "success"),
        (r"bg-(yellow|amber|warning)", "warning"),
        (r"bg-(red|rose|destructive|error)", "danger"),
        (r"bg-(blue|cyan|accent)", "accent"),
        (r"bg-(gray|slate|neutral)", "neutral"),
    ]
    .into_iter()
    .map(|(pattern, tone)| (Regex::new(pattern).expect("valid regex"), tone))
    .collect()
});

/// Token prefixes the badge component takes over.
const CONSUMED_PREFIXES: &[&str] = &[
    "bg-",
    "text-",
    "shadow",
    "hover:",
    "px-",
    "py-",
    "uppercase",
    "tracking-",
    "font-bold",
    "font-semibold",
];

const BADGE_TAGS: &[&str] = &["div", "span"];

fn tone_for(classes: &[&str]) -> Option<&'static str> {
    let joined = classes.join(" ");
    TONES
        .iter()
        .find(|(re, _)| re.is_match(&joined))
        .map(|(_, tone)| *tone)
}

fn is_consumed(token: &str) -> bool {
    token == "rounded-full" || CONSUMED_PREFIXES.iter().any(|p| token.starts_with(p))
}

/// Replaces rounded-full status pills with `<Badge>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BadgeStatus;

impl Codemod for BadgeStatus {
    fn name(&self) -> &'static str {
        "badge-and-status"
    }

    fn description(&self) -> &'static str {
        "Turn rounded-full status pills into <Badge tone variant=\"soft\">"
    }

    fn plan(&self, source: &SourceFile) -> RewritePlan {
        let mut plan = RewritePlan::new();
        let mut matched = false;

        for element in JsxElement::all(source) {
            if !BADGE_TAGS.contains(&element.tag_name(source)) {
                continue;
            }
            let Some(class) = element.class_attribute(source) else {
                continue;
            };
            let looks_like_badge =
                class.has("rounded-full") && class.classes.iter().any(|t| t.starts_with("px-"));
            if !looks_like_badge {
                continue;
            }

            let tone = tone_for(&class.classes);
            class.retain(&mut plan, |t| !is_consumed(t));
            element.rename(&mut plan, "Badge");

            let mut props = Vec::new();
            if let Some(tone) = tone {
                props.push(format!("tone=\"{tone}\""));
            }
            props.push("variant=\"soft\"".to_string());
            element.add_props(&mut plan, &props);
            matched = true;
        }

        if matched {
            ensure_named_imports(source, &mut plan, BADGE_MODULE, &["Badge"]);
        }
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(code: &str) -> String {
        let source = SourceFile::parse(code).unwrap();
        BadgeStatus.plan(&source).apply(code)
    }

    #[test]
    fn success_pill_becomes_badge() {
        let code = r#"import { Badge } from "@/components/ui/badge";
const S = () => <span className="inline-flex rounded-full bg-emerald-100 px-3 py-1 text-xs font-semibold text-emerald-700">Live</span>;
"#;
        let expected = r#"import { Badge } from "@/components/ui/badge";
const S = () => <Badge className="inline-flex" tone="success" variant="soft">Live</Badge>;
"#;
        assert_eq!(run(code), expected);
    }

    #[test]
    fn unknown_tone_still_gets_soft_variant() {
        let code = r#"const S = () => <div className="rounded-full px-2 bg-purple-100">x</div>;"#;
        let out = run(code);
        assert!(out.contains(r#"<Badge variant="soft">x</Badge>"#), "{out}");
        assert!(out.starts_with("import { Badge } from \"@/components/ui/badge\";"));
    }

    #[test]
    fn needs_both_pill_and_padding() {
        let code = r#"const S = () => <span className="rounded-full bg-red-500">x</span>;"#;
        assert_eq!(run(code), code);
        let code = r#"const S = () => <p className="rounded-full px-2 bg-red-500">x</p>;"#;
        assert_eq!(run(code), code);
    }

    #[test]
    fn second_run_finds_nothing() {
        let code = r#"const S = () => <span className="rounded-full px-2 bg-red-100">x</span>;"#;
        let once = run(code);
        assert!(once.contains(r#"tone="danger""#));
        assert_eq!(run(&once), once);
    }
}
