//! https://www.w3.org/TR/n-quads/
use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use crate::prelude::*;
use crate::shared::{unescape_literal, Node, Statement};
use crate::triple_common_parser::literal::{lang, quoted_string};
use crate::triple_common_parser::triple::labeled_bnode;
use crate::triple_common_parser::{comments, BlankNode};

/// A statement and the graph it belongs to. `graph` is `None` for the
/// default graph.
#[derive(Debug, Clone, PartialEq)]
pub struct NQuad<'a> {
    pub statement: Statement<'a>,
    pub graph: Option<Node<'a>>,
}

impl NQuad<'_> {
    pub fn into_owned(self) -> NQuad<'static> {
        NQuad {
            statement: self.statement.into_owned(),
            graph: self.graph.map(Node::into_owned),
        }
    }
}

impl Display for NQuad<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Statement {
            subject,
            predicate,
            object,
        } = &self.statement;
        match &self.graph {
            Some(graph) => write!(f, "{subject} {predicate} {object} {graph} ."),
            None => write!(f, "{subject} {predicate} {object} ."),
        }
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("n-quads error: {message}")]
pub struct NQuadsError {
    pub message: String,
}

fn iri(s: &str) -> ParserResult<Node<'_>> {
    preceded(
        multispace0,
        map(
            delimited(char('<'), take_while(|s: char| s != '>'), char('>')),
            |iri| Node::Iri(unescape_literal(iri)),
        ),
    )(s)
}

fn bnode(s: &str) -> ParserResult<Node<'_>> {
    match labeled_bnode(s)? {
        (remaining, BlankNode::Labeled(label)) => {
            Ok((remaining, Node::BlankNode(Cow::Borrowed(label))))
        }
        (_, BlankNode::Unlabeled) => parse_error(s, ErrorKind::IsNot),
    }
}

fn literal(s: &str) -> ParserResult<Node<'_>> {
    let (no_white_space, _) = multispace0(s)?;
    let (remaining, value) = quoted_string('"')(no_white_space)?;

    if let Ok((remaining, datatype)) = preceded(tag("^^"), iri)(remaining) {
        let datatype = match datatype {
            Node::Iri(datatype) => Some(datatype),
            _ => None,
        };
        Ok((
            remaining,
            Node::Literal {
                value,
                datatype,
                lang: None,
            },
        ))
    } else if let Ok((remaining, lang)) = lang(remaining) {
        Ok((
            remaining,
            Node::Literal {
                value,
                datatype: None,
                lang: Some(Cow::Borrowed(lang)),
            },
        ))
    } else {
        Ok((
            remaining,
            Node::Literal {
                value,
                datatype: None,
                lang: None,
            },
        ))
    }
}

fn parse_one_quad(s: &str) -> ParserResult<NQuad<'_>> {
    let (remaining, _) = comments(s)?;
    map(
        tuple((
            alt((iri, bnode)),
            cut(iri),
            cut(alt((iri, bnode, literal))),
            opt(alt((iri, bnode))),
        )),
        |(subject, predicate, object, graph)| NQuad {
            statement: Statement {
                subject,
                predicate,
                object,
            },
            graph,
        },
    )(remaining)
}

pub fn parse(s: &str) -> ParserResult<Vec<NQuad<'_>>> {
    terminated(
        many0(terminated(
            parse_one_quad,
            preceded(multispace0, cut(char('.'))),
        )),
        preceded(comments, multispace0),
    )(s)
}

/// Parses a whole document, failing on the first malformed line.
pub fn parse_document(s: &str) -> Result<Vec<NQuad<'_>>, NQuadsError> {
    let (remaining, quads) = parse(s).map_err(|err| NQuadsError {
        message: err.to_string(),
    })?;
    if !remaining.is_empty() {
        let near: String = remaining.chars().take(40).collect();
        return Err(NQuadsError {
            message: format!("unexpected input near `{near}`"),
        });
    }
    Ok(quads)
}
