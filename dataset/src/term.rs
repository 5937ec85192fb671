//! RDF terms: resources, literals and blank nodes.
//!
//! Terms are immutable and cheap to clone; the same term value is shared by
//! every triple and quad that mentions it. Equality and hashing are
//! structural and variant-tagged, so a resource and a blank node never
//! collide even when their text happens to match.

use std::fmt;
use std::sync::Arc;

use ld_parser::shared::escape_literal;
use ld_parser::Node;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Resource(Arc<str>),
    Literal(Literal),
    BlankNode(Arc<str>),
}

/// A literal value with either a language tag, a datatype or neither.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    value: Arc<str>,
    language: Option<Arc<str>>,
    datatype: Option<Box<Term>>,
}

impl Literal {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn datatype(&self) -> Option<&Term> {
        self.datatype.as_deref()
    }
}

impl Term {
    pub fn resource(uri: impl AsRef<str>) -> Self {
        Term::Resource(Arc::from(uri.as_ref()))
    }

    /// A plain literal, without language nor datatype.
    pub fn literal(value: impl AsRef<str>) -> Self {
        Term::Literal(Literal {
            value: Arc::from(value.as_ref()),
            language: None,
            datatype: None,
        })
    }

    pub fn lang_literal(value: impl AsRef<str>, language: impl AsRef<str>) -> Self {
        Term::Literal(Literal {
            value: Arc::from(value.as_ref()),
            language: Some(Arc::from(language.as_ref())),
            datatype: None,
        })
    }

    pub fn typed_literal(value: impl AsRef<str>, datatype: Term) -> Self {
        Term::Literal(Literal {
            value: Arc::from(value.as_ref()),
            language: None,
            datatype: Some(Box::new(datatype)),
        })
    }

    /// A blank node. `id` is the label without the `_:` prefix.
    pub fn blank(id: impl AsRef<str>) -> Self {
        Term::BlankNode(Arc::from(id.as_ref()))
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, Term::Resource(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    /// The URI of a resource.
    pub fn uri(&self) -> Option<&str> {
        match self {
            Term::Resource(uri) => Some(uri),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(literal) => Some(literal),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Resource(uri) => write!(f, "<{uri}>"),
            Term::BlankNode(id) => write!(f, "_:{id}"),
            Term::Literal(literal) => literal.fmt(f),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", escape_literal(&self.value))?;
        if let Some(language) = &self.language {
            write!(f, "@{language}")
        } else if let Some(datatype) = &self.datatype {
            write!(f, "^^{datatype}")
        } else {
            Ok(())
        }
    }
}

impl From<&Node<'_>> for Term {
    fn from(node: &Node<'_>) -> Self {
        match node {
            Node::Iri(iri) => Term::resource(iri),
            Node::BlankNode(label) => Term::blank(label),
            Node::Literal {
                value,
                lang: Some(lang),
                ..
            } => Term::lang_literal(value, lang),
            Node::Literal {
                value,
                datatype: Some(datatype),
                ..
            } => Term::typed_literal(value, Term::resource(datatype)),
            Node::Literal { value, .. } => Term::literal(value),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Term;
    use ld_parser::Node;
    use std::borrow::Cow;

    const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    #[test]
    fn equality_test() {
        let a = Term::resource("http://example.org/a");
        assert_eq!(a, a.clone());
        assert_eq!(Term::resource("http://example.org/a"), a);
        assert_ne!(Term::resource("http://example.org/b"), a);
        assert_ne!(Term::blank("a"), Term::resource("a"));

        assert_eq!(Term::literal("x"), Term::literal("x"));
        assert_ne!(Term::literal("x"), Term::lang_literal("x", "en"));
        assert_ne!(Term::lang_literal("x", "en"), Term::lang_literal("x", "fr"));
        assert_ne!(
            Term::literal("1"),
            Term::typed_literal("1", Term::resource(XSD_INTEGER))
        );
        assert_eq!(
            Term::typed_literal("1", Term::resource(XSD_INTEGER)),
            Term::typed_literal("1", Term::resource(XSD_INTEGER))
        );
    }

    #[test]
    fn display_test() {
        assert_eq!("<a>", Term::resource("a").to_string());
        assert_eq!("_:b0", Term::blank("b0").to_string());
        assert_eq!(r#""chat"@fr"#, Term::lang_literal("chat", "fr").to_string());
        assert_eq!(
            format!(r#""1"^^<{XSD_INTEGER}>"#),
            Term::typed_literal("1", Term::resource(XSD_INTEGER)).to_string()
        );
        assert_eq!(r#""say \"hi\"""#, Term::literal(r#"say "hi""#).to_string());
    }

    #[test]
    fn from_node_test() {
        let node = Node::Literal {
            value: Cow::Borrowed("42"),
            datatype: Some(Cow::Borrowed(XSD_INTEGER)),
            lang: None,
        };
        let term = Term::from(&node);
        let literal = term.as_literal().unwrap();
        assert_eq!("42", literal.value());
        assert_eq!(None, literal.language());
        assert_eq!(Some(&Term::resource(XSD_INTEGER)), literal.datatype());

        assert!(Term::from(&Node::BlankNode(Cow::Borrowed("x"))).is_blank());
        assert_eq!(
            Some("http://example.org/"),
            Term::from(&Node::Iri(Cow::Borrowed("http://example.org/"))).uri()
        );
    }
}
