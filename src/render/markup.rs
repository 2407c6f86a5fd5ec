//! Pleco flat-text markup primitives.
//!
//! Pleco user dictionaries reserve a private-use-area control character for
//! entry-internal newlines and bracket-style toggles for bold, italic, and
//! cross-reference links. Everything here must reproduce byte-for-byte.

/// Entry-internal newline; the whole entry occupies one physical line.
pub const NEWLINE: char = '\u{EAB1}';

/// Bold toggle pair.
pub const BOLD_OPEN: char = '\u{EAB2}';
pub const BOLD_CLOSE: char = '\u{EAB3}';

/// Italic toggle pair.
pub const ITALIC_OPEN: char = '\u{EAB4}';
pub const ITALIC_CLOSE: char = '\u{EAB5}';

/// Cross-reference link pair.
pub const LINK_OPEN: char = '\u{EAB8}';
pub const LINK_CLOSE: char = '\u{EABB}';

/// Constant group-line marker used at low density.
pub const GROUP_MARKER: &str = "»";

/// Token separator at mid/high density.
pub const SEPARATOR_SPACE: &str = " ";

/// Token separator at low density.
pub const SEPARATOR_IDEOGRAPHIC: &str = "、";

/// Separator between definitions inside one definition block.
pub const DEF_SEPARATOR: char = '/';

/// Wrap `text` in bold toggles.
pub fn bold(text: &str) -> String {
    format!("{BOLD_OPEN}{text}{BOLD_CLOSE}")
}

/// Wrap `text` in italic toggles.
pub fn italic(text: &str) -> String {
    format!("{ITALIC_OPEN}{text}{ITALIC_CLOSE}")
}

/// Wrap `text` in link toggles.
pub fn link(text: &str) -> String {
    format!("{LINK_OPEN}{text}{LINK_CLOSE}")
}

/// Circled sequence number for group lines.
///
/// 1 through 20 use the circled-digit block starting at U+2460; 21 through 35
/// continue into the circled range at U+3251 (one code point past, matching
/// the upstream offset); anything larger falls back to plain decimal.
pub fn circled_number(n: usize) -> String {
    match n {
        1..=20 => char::from_u32(9311 + n as u32).unwrap().to_string(),
        21..=35 => char::from_u32(12881 + n as u32 - 20).unwrap().to_string(),
        _ => n.to_string(),
    }
}
