//! Terminals shared by the Turtle and N-Quads grammars.
//!
//! https://www.w3.org/TR/turtle/#sec-grammar-grammar

pub const STRING_LITERAL_QUOTE: char = '"';
pub const STRING_LITERAL_SINGLE_QUOTE: char = '\'';
pub const STRING_LITERAL_LONG_QUOTE: &str = r#"""""#;
pub const STRING_LITERAL_LONG_SINGLE_QUOTE: &str = "'''";
pub const LANGTAG: &str = "@";
pub const DATATYPE_MARKER: &str = "^^";
pub const BLANK_NODE_LABEL: &str = "_:";

/// Characters allowed in a prefix label, besides alphanumerics.
pub fn is_pn_prefix_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// Characters allowed in a local name or blank node label, besides
/// alphanumerics. A '.' is allowed too, but never as the last character.
pub fn is_pn_local_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == ':' || c == '%'
}

pub fn is_lang_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-'
}
