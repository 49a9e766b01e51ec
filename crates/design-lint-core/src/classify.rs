//! Literal classification: raw colors and Tailwind arbitrary values.
//!
//! Everything here is a pure function of its input. Classification results
//! are derived on demand and never stored.

use regex::Regex;
use std::sync::LazyLock;

/// Substring that marks a value as a token reference (`var(--token)`).
pub const TOKEN_REFERENCE: &str = "var(--";

/// Utility prefixes whose arbitrary value may carry a color.
pub const COLOR_PREFIXES: &[&str] = &[
    "bg", "text", "from", "via", "to", "border", "outline", "shadow", "stroke", "fill",
];

/// Utility prefix for z-index.
pub const Z_INDEX_PREFIX: &str = "z";

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^#(?:[0-9a-f]{3}|[0-9a-f]{4}|[0-9a-f]{6}|[0-9a-f]{8})$").expect("valid regex")
});

static RGB_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^rgba?\([^)]*\)$").expect("valid regex"));

static HSL_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^hsla?\([^)]*\)$").expect("valid regex"));

static SPACING_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:-?(?:m|p)(?:[trblxy])?",
        r"|(?:inset|top|right|bottom|left)(?:-[xy])?",
        r"|(?:w|h|min-w|max-w|min-h|max-h)",
        r"|(?:gap|space-[xy])",
        r"|(?:rounded(?:-[trbl](?:[lr])?)?)",
        r"|(?:translate-[xy])",
        r"|(?:border(?:-[trbl](?:[lr])?)?)",
        r"|outline|basis|size)$",
    ))
    .expect("valid regex")
});

static TYPOGRAPHY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:leading|tracking)$").expect("valid regex"));

static NUMBER_WITH_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d+(?:\.\d+)?(?:px|rem|em|vh|vw|%)?$").expect("valid regex")
});

static Z_INDEX_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid regex"));

static ARBITRARY_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\[[^\]]+\]").expect("valid regex"));

/// A raw color literal found in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawColor {
    /// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    Hex(String),
    /// `rgb(...)` or `rgba(...)`.
    Rgb(String),
    /// `hsl(...)` or `hsla(...)`.
    Hsl(String),
}

impl RawColor {
    /// The trimmed literal that matched.
    #[must_use]
    pub fn literal(&self) -> &str {
        match self {
            Self::Hex(s) | Self::Rgb(s) | Self::Hsl(s) => s,
        }
    }
}

/// Classifies a string as a raw color literal.
///
/// A string containing a token reference is never a raw color, even when
/// another part of it looks like one.
#[must_use]
pub fn classify_color(value: &str) -> Option<RawColor> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.contains(TOKEN_REFERENCE) {
        return None;
    }

    if HEX_COLOR.is_match(trimmed) {
        return Some(RawColor::Hex(trimmed.to_owned()));
    }
    if RGB_COLOR.is_match(trimmed) {
        return Some(RawColor::Rgb(trimmed.to_owned()));
    }
    if HSL_COLOR.is_match(trimmed) {
        return Some(RawColor::Hsl(trimmed.to_owned()));
    }
    None
}

/// A utility class split into prefix and bracketed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArbitraryValueToken {
    /// Utility prefix, e.g. `bg` or `translate-x`.
    pub prefix: String,
    /// Text between the brackets.
    pub raw_value: String,
}

/// Whether a class token contains a non-empty `-[...]` segment.
#[must_use]
pub fn has_arbitrary_value(class_name: &str) -> bool {
    ARBITRARY_SHAPE.is_match(class_name)
}

/// Parses `variant:prefix-[value]` into prefix and value.
///
/// Variants (everything up to the last `:`) are dropped first.
#[must_use]
pub fn parse_arbitrary_token(class_name: &str) -> Option<ArbitraryValueToken> {
    let segment = match class_name.rsplit(':').next() {
        Some(s) if !s.is_empty() => s,
        _ => class_name,
    };

    let bracket = segment.find("-[")?;
    if !segment.ends_with(']') {
        return None;
    }

    let prefix = &segment[..bracket];
    let raw_value = segment.get(bracket + 2..segment.len() - 1)?;
    if prefix.is_empty() {
        return None;
    }

    Some(ArbitraryValueToken {
        prefix: prefix.to_owned(),
        raw_value: raw_value.to_owned(),
    })
}

/// Kind of arbitrary-value violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArbitraryKind {
    /// Inline color on a color-bearing utility.
    Color,
    /// Inline size, spacing, radius or offset.
    Dimension,
    /// Inline z-index.
    ZIndex,
    /// Inline line-height or letter-spacing.
    Typography,
}

impl ArbitraryKind {
    /// Stable message identifier.
    #[must_use]
    pub fn message_id(self) -> &'static str {
        match self {
            Self::Color => "disallowColor",
            Self::Dimension => "disallowDimension",
            Self::ZIndex => "disallowZIndex",
            Self::Typography => "disallowTypography",
        }
    }
}

/// Classifies a parsed arbitrary value.
///
/// Checks run in precedence order color, z-index, typography, dimension;
/// the first hit wins.
#[must_use]
pub fn classify_arbitrary_token(prefix: &str, raw_value: &str) -> Option<ArbitraryKind> {
    let trimmed = raw_value.trim();

    if COLOR_PREFIXES.contains(&prefix) && classify_color(raw_value).is_some() {
        return Some(ArbitraryKind::Color);
    }
    if prefix == Z_INDEX_PREFIX && Z_INDEX_VALUE.is_match(trimmed) {
        return Some(ArbitraryKind::ZIndex);
    }
    if TYPOGRAPHY_PREFIX.is_match(prefix) && !trimmed.is_empty() {
        return Some(ArbitraryKind::Typography);
    }
    if SPACING_PREFIX.is_match(prefix) && NUMBER_WITH_UNIT.is_match(trimmed) {
        return Some(ArbitraryKind::Dimension);
    }
    None
}

/// Parses and classifies a class token in one step.
#[must_use]
pub fn classify_class_token(class_name: &str) -> Option<ArbitraryKind> {
    let token = parse_arbitrary_token(class_name)?;
    classify_arbitrary_token(&token.prefix, &token.raw_value)
}
