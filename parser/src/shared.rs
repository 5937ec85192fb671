use std::borrow::Cow;
use std::fmt::{Display, Formatter};

pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
pub const LANG_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
pub const NS_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
pub const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
pub const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";

/// A resolved RDF term as emitted by the readers of this crate.
///
/// IRIs are absolute whenever a base was available, blank node labels carry
/// no `_:` prefix and a literal without datatype nor language is a plain
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node<'a> {
    Iri(Cow<'a, str>),
    BlankNode(Cow<'a, str>),
    Literal {
        value: Cow<'a, str>,
        datatype: Option<Cow<'a, str>>,
        lang: Option<Cow<'a, str>>,
    },
}

impl Node<'_> {
    pub fn into_owned(self) -> Node<'static> {
        match self {
            Node::Iri(iri) => Node::Iri(Cow::Owned(iri.into_owned())),
            Node::BlankNode(label) => Node::BlankNode(Cow::Owned(label.into_owned())),
            Node::Literal {
                value,
                datatype,
                lang,
            } => Node::Literal {
                value: Cow::Owned(value.into_owned()),
                datatype: datatype.map(|d| Cow::Owned(d.into_owned())),
                lang: lang.map(|l| Cow::Owned(l.into_owned())),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement<'a> {
    pub subject: Node<'a>,
    pub predicate: Node<'a>,
    pub object: Node<'a>,
}

impl Statement<'_> {
    pub fn into_owned(self) -> Statement<'static> {
        Statement {
            subject: self.subject.into_owned(),
            predicate: self.predicate.into_owned(),
            object: self.object.into_owned(),
        }
    }
}

impl Display for Node<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Iri(iri) => write!(f, "<{iri}>"),
            Node::BlankNode(label) => write!(f, "_:{label}"),
            Node::Literal {
                value,
                datatype,
                lang,
            } => {
                write!(f, r#""{}""#, escape_literal(value))?;
                if let Some(lang) = lang {
                    write!(f, "@{lang}")
                } else if let Some(datatype) = datatype {
                    write!(f, "^^<{datatype}>")
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl Display for Statement<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Statement {
            subject,
            predicate,
            object,
        } = self;
        write!(f, "{subject} {predicate} {object} .")
    }
}

/// Escapes a lexical form so it can be written between double quotes.
pub fn escape_literal(value: &str) -> Cow<'_, str> {
    if !value.contains(|c: char| matches!(c, '"' | '\\' | '\n' | '\r' | '\t')) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '"' => escaped.push_str(r#"\""#),
            '\\' => escaped.push_str(r"\\"),
            '\n' => escaped.push_str(r"\n"),
            '\r' => escaped.push_str(r"\r"),
            '\t' => escaped.push_str(r"\t"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Reverses ECHAR and UCHAR escapes. Unknown escapes are kept verbatim.
pub fn unescape_literal(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{8}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some(c @ ('"' | '\'' | '\\')) => out.push(c),
            Some(u @ ('u' | 'U')) => {
                let len = if u == 'u' { 4 } else { 8 };
                let hex: String = chars.by_ref().take(len).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('\\');
                        out.push(u);
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}

/// True when `iri` starts with a scheme (`ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"`).
pub fn is_absolute_iri(iri: &str) -> bool {
    match iri.split_once(':') {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Resolves `iri` against `base`. Absolute IRIs, and every IRI when no
/// base is known, come back untouched.
pub fn resolve_iri<'a>(base: Option<&str>, iri: &'a str) -> Cow<'a, str> {
    match base {
        Some(base) if !base.is_empty() && !is_absolute_iri(iri) => Cow::Owned(join_iri(base, iri)),
        _ => Cow::Borrowed(iri),
    }
}

fn join_iri(base: &str, reference: &str) -> String {
    let without_fragment = base.split_once('#').map_or(base, |(b, _)| b);
    if reference.is_empty() {
        return without_fragment.to_owned();
    }
    if reference.starts_with('#') {
        return format!("{without_fragment}{reference}");
    }
    let without_query = without_fragment
        .split_once('?')
        .map_or(without_fragment, |(b, _)| b);
    if reference.starts_with('?') {
        return format!("{without_query}{reference}");
    }
    let (scheme, rest) = without_query
        .split_once(':')
        .unwrap_or(("", without_query));
    if reference.starts_with("//") {
        return format!("{scheme}:{reference}");
    }
    // authority ends at the first '/' after the leading "//"
    let authority_len = rest
        .strip_prefix("//")
        .map(|after| 2 + after.find('/').unwrap_or(after.len()))
        .unwrap_or(0);
    let (authority, path) = rest.split_at(authority_len);
    if reference.starts_with('/') {
        return format!("{scheme}:{authority}{reference}");
    }
    let directory = path.rfind('/').map_or("/", |idx| &path[..=idx]);
    format!("{scheme}:{authority}{directory}{reference}")
}
