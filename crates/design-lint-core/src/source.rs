//! Tree-sitter backed source files.
//!
//! Every file is parsed with the TSX grammar, which accepts plain
//! TypeScript and JavaScript as well as JSX markup.

use std::borrow::Cow;
use std::ops::Range;
use tree_sitter::{Language, Node, Parser, Tree};

/// Errors raised while parsing a source file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load TSX grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The parser produced no tree.
    #[error("parser returned no syntax tree")]
    NoTree,
}

/// File extensions handled by the TSX grammar.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs"];

/// A parsed source file: the text plus its syntax tree.
pub struct SourceFile {
    text: String,
    tree: Tree,
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("len", &self.text.len())
            .field("has_error", &self.tree.root_node().has_error())
            .finish()
    }
}

impl SourceFile {
    /// Parses source text.
    ///
    /// Tree-sitter recovers from syntax errors, so malformed input still
    /// yields a tree; only grammar loading failures are errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or no tree is produced.
    pub fn parse(text: impl Into<String>) -> Result<Self, ParseError> {
        let text = text.into();
        let language: Language = tree_sitter_typescript::LANGUAGE_TSX.into();
        let mut parser = Parser::new();
        parser.set_language(&language)?;
        let tree = parser.parse(&text, None).ok_or(ParseError::NoTree)?;
        Ok(Self { text, tree })
    }

    /// Returns the full source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the file and returns its text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    /// Returns the root `program` node.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Returns the source text covered by a node.
    #[must_use]
    pub fn node_text(&self, node: Node<'_>) -> &str {
        self.slice(node.byte_range())
    }

    /// Returns the source text in a byte range, or `""` when out of bounds.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> &str {
        self.text.get(range).unwrap_or("")
    }

    /// Returns every node of the tree in pre-order (document order).
    #[must_use]
    pub fn descendants(&self) -> Vec<Node<'_>> {
        let mut nodes = Vec::new();
        let mut cursor = self.tree.walk();
        loop {
            nodes.push(cursor.node());
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return nodes;
                }
            }
        }
    }

    /// Returns the leading whitespace of the line a byte offset sits on.
    #[must_use]
    pub fn line_indent(&self, offset: usize) -> &str {
        let line_start = self.text[..offset.min(self.text.len())]
            .rfind('\n')
            .map_or(0, |i| i + 1);
        let rest = &self.text[line_start..];
        let width = rest
            .find(|c: char| c != ' ' && c != '\t')
            .unwrap_or(rest.len());
        &rest[..width]
    }

    /// Guesses the indentation unit of the file (two spaces when unknown).
    #[must_use]
    pub fn indent_unit(&self) -> &'static str {
        let mut smallest: Option<usize> = None;
        for line in self.text.lines() {
            if line.starts_with('\t') {
                return "\t";
            }
            let width = line.len() - line.trim_start_matches(' ').len();
            if width > 0 && line.len() > width {
                smallest = Some(smallest.map_or(width, |s| s.min(width)));
            }
        }
        match smallest {
            Some(4) => "    ",
            _ => "  ",
        }
    }
}

/// Returns the byte range of a string literal's contents (inside the quotes).
#[must_use]
pub fn string_content_range(node: Node<'_>) -> Range<usize> {
    let (start, end) = (node.start_byte(), node.end_byte());
    if end - start < 2 {
        return start..start;
    }
    start + 1..end - 1
}

/// Decodes the escape sequences of a string or template literal body.
///
/// Handles `\xNN`, `\uNNNN` (surrogate pairs included), `\u{...}`, the
/// single-character escapes and line continuations. Any other escaped
/// character stands for itself; malformed numeric escapes are kept
/// verbatim.
#[must_use]
pub fn unescape_string(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let escaped = &rest[pos + 1..];
        let Some(c) = escaped.chars().next() else {
            out.push('\\');
            rest = escaped;
            break;
        };
        let mut consumed = c.len_utf8();
        match c {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !escaped[1..].starts_with(|d: char| d.is_ascii_digit()) => out.push('\0'),
            '\r' => {
                if escaped[1..].starts_with('\n') {
                    consumed += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            'x' => match hex_value(escaped.get(1..3)) {
                Some(ch) => {
                    out.push(ch);
                    consumed = 3;
                }
                None => out.push_str("\\x"),
            },
            'u' => match unicode_escape(&escaped[1..]) {
                Some((ch, len)) => {
                    out.push(ch);
                    consumed = 1 + len;
                }
                None => out.push_str("\\u"),
            },
            other => out.push(other),
        }
        rest = &escaped[consumed..];
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn hex_value(digits: Option<&str>) -> Option<char> {
    let digits = digits?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    char::from_u32(u32::from_str_radix(digits, 16).ok()?)
}

fn code_unit(digits: Option<&str>) -> Option<u32> {
    let digits = digits?;
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Decodes the text after `\u`, returning the character and the number of
/// bytes it spans.
fn unicode_escape(after: &str) -> Option<(char, usize)> {
    if let Some(braced) = after.strip_prefix('{') {
        let close = braced.find('}')?;
        let digits = &braced[..close];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let ch = char::from_u32(u32::from_str_radix(digits, 16).ok()?)?;
        return Some((ch, close + 2));
    }

    let unit = code_unit(after.get(..4))?;
    if (0xD800..0xDC00).contains(&unit) {
        let low = after
            .get(4..6)
            .filter(|marker| *marker == "\\u")
            .and_then(|_| code_unit(after.get(6..10)))
            .filter(|low| (0xDC00..0xE000).contains(low));
        if let Some(low) = low {
            let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(combined).map(|ch| (ch, 10));
        }
    }
    Some((char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER), 4))
}

/// Returns the byte ranges of a template literal's static parts.
///
/// Interpolated `${...}` expressions are skipped; a template with `n`
/// substitutions yields `n + 1` ranges, some possibly empty.
#[must_use]
pub fn template_quasis(node: Node<'_>) -> Vec<Range<usize>> {
    let mut parts = Vec::new();
    let mut start = node.start_byte() + 1;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "template_substitution" {
            parts.push(start..child.start_byte().max(start));
            start = child.end_byte();
        }
    }
    let end = node.end_byte().saturating_sub(1).max(start);
    parts.push(start..end);
    parts
}

/// Whether a template literal contains `${...}` substitutions.
#[must_use]
pub fn has_substitutions(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|c| c.kind() == "template_substitution");
    found
}

/// Strips `parenthesized_expression` wrappers.
#[must_use]
pub fn unwrap_parens(mut node: Node<'_>) -> Node<'_> {
    while node.kind() == "parenthesized_expression" {
        match node.named_child(0) {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}
