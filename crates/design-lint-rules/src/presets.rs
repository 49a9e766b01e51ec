//! Rule presets and lookup by name or code.

use crate::{NoArbitraryValues, NoRawColors};
use design_lint_core::{RuleBox, Severity};

/// Preset configurations for design-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Both rules at their default severities.
    Recommended,
    /// Raw colors reported as warnings, for gradual adoption.
    Migration,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => all_rules(),
            Self::Migration => migration_rules(),
        }
    }
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(NoRawColors::new()), Box::new(NoArbitraryValues::new())]
}

/// Returns the migration set: raw colors only warn.
#[must_use]
pub fn migration_rules() -> Vec<RuleBox> {
    vec![
        Box::new(NoRawColors::new().severity(Severity::Warning)),
        Box::new(NoArbitraryValues::new()),
    ]
}

/// Looks up a rule by name (`no-raw-colors`) or code (`DL001`).
#[must_use]
pub fn rule_by_name(name_or_code: &str) -> Option<RuleBox> {
    all_rules()
        .into_iter()
        .find(|r| r.name() == name_or_code || r.code().eq_ignore_ascii_case(name_or_code))
}
