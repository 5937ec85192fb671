use crate::shared::{
    resolve_iri, Node, Statement, RDF_FIRST, RDF_NIL, RDF_REST, XSD_BOOLEAN, XSD_DECIMAL,
    XSD_DOUBLE, XSD_INTEGER,
};
use crate::turtle::ast_parser::statements;
use crate::turtle::ast_struct::{BlankNode, Iri, Literal, TurtleValue};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use uuid::Uuid;

struct Context<'a> {
    base: Option<String>,
    prefixes: HashMap<&'a str, String>,
}

/// A parsed Turtle document: every statement with prefixes expanded and
/// relative IRIs resolved.
#[derive(PartialEq, Debug, Default)]
pub struct TurtleDoc<'a> {
    statements: Vec<Statement<'a>>,
}

impl<'a> TurtleDoc<'a> {
    pub fn from_str(s: &'a str) -> Result<Self, TurtleDocError> {
        Self::parse(None, s)
    }
    /// Parses `s` with `base` as the initial base IRI. An empty base is the
    /// same as no base at all.
    pub fn with_base(base: &str, s: &'a str) -> Result<Self, TurtleDocError> {
        let base = Some(base.to_owned()).filter(|b| !b.is_empty());
        Self::parse(base, s)
    }
    pub fn from_file(path: &'a Path, buf: &'a mut String) -> Result<Self, TurtleDocError> {
        let mut file = File::open(path).map_err(|err| TurtleDocError {
            message: format!("cannot open file: {err}"),
        })?;
        file.read_to_string(buf).map_err(|err| TurtleDocError {
            message: format!("cannot read file: {err}"),
        })?;
        Self::from_str(buf)
    }

    pub fn statements(&self) -> &[Statement<'a>] {
        &self.statements
    }
    pub fn into_statements(self) -> Vec<Statement<'a>> {
        self.statements
    }
    pub fn len(&self) -> usize {
        self.statements.len()
    }
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    fn parse(base: Option<String>, s: &'a str) -> Result<Self, TurtleDocError> {
        let (remaining, turtle_values) = statements(s).map_err(|err| TurtleDocError {
            message: format!("parsing error: {err}"),
        })?;
        if !remaining.trim().is_empty() {
            let near: String = remaining.trim_start().chars().take(40).collect();
            return Err(TurtleDocError {
                message: format!("unexpected input near `{near}`"),
            });
        }
        let mut context = Context {
            base,
            prefixes: HashMap::new(),
        };
        let mut turtle_doc = TurtleDoc::default();

        for turtle_value in turtle_values {
            match turtle_value {
                TurtleValue::Base(base) => {
                    let iri = TurtleDoc::extract_iri(base)?;
                    let resolved = resolve_iri(context.base.as_deref(), iri).into_owned();
                    context.base = Some(resolved);
                }
                TurtleValue::Prefix((prefix, iri)) => {
                    let iri = TurtleDoc::extract_iri(iri)?;
                    let resolved = resolve_iri(context.base.as_deref(), iri).into_owned();
                    context.prefixes.insert(prefix, resolved);
                }
                statement @ TurtleValue::Statement { .. } => {
                    Self::add_statement(statement, &context, &mut turtle_doc)?;
                }
                _ => {
                    return Err(TurtleDocError {
                        message: "incorrect turtle value".into(),
                    });
                }
            }
        }
        Ok(turtle_doc)
    }

    fn extract_iri(value: Box<TurtleValue<'a>>) -> Result<&'a str, TurtleDocError> {
        if let TurtleValue::Iri(Iri::Enclosed(iri)) = *value {
            Ok(iri)
        } else {
            Err(TurtleDocError {
                message: "Not enclosed iri".into(),
            })
        }
    }

    fn resolve(iri: Iri<'a>, ctx: &Context) -> Result<Cow<'a, str>, TurtleDocError> {
        match iri {
            Iri::Enclosed(iri) => Ok(resolve_iri(ctx.base.as_deref(), iri)),
            Iri::Prefixed { prefix, local_name } => {
                let namespace = ctx.prefixes.get(prefix).ok_or_else(|| TurtleDocError {
                    message: format!("prefix not found: {prefix}"),
                })?;
                Ok(Cow::Owned(format!("{namespace}{local_name}")))
            }
        }
    }

    /// Pushes every triple of `stmt` and returns its subject, so nested
    /// property lists can be used as objects.
    fn add_statement(
        stmt: TurtleValue<'a>,
        ctx: &Context,
        turtle_doc: &mut TurtleDoc<'a>,
    ) -> Result<Node<'a>, TurtleDocError> {
        if let TurtleValue::Statement {
            subject,
            predicate_objects,
        } = stmt
        {
            let subject = Self::get_node(*subject, ctx, turtle_doc)?;
            for predicate_object in predicate_objects {
                if let TurtleValue::PredicateObject { predicate, object } = predicate_object {
                    let predicate = Self::get_node(*predicate, ctx, turtle_doc)?;
                    let objects = match *object {
                        TurtleValue::ObjectList(values) => values,
                        single => vec![single],
                    };
                    for object in objects {
                        let object = Self::get_node(object, ctx, turtle_doc)?;
                        turtle_doc.statements.push(Statement {
                            subject: subject.clone(),
                            predicate: predicate.clone(),
                            object,
                        });
                    }
                } else {
                    return Err(TurtleDocError {
                        message: "at this point it should be a predicate_object".into(),
                    });
                }
            }
            Ok(subject)
        } else {
            Err(TurtleDocError {
                message: "not a statement".into(),
            })
        }
    }

    fn get_node(
        value: TurtleValue<'a>,
        ctx: &Context,
        turtle_doc: &mut TurtleDoc<'a>,
    ) -> Result<Node<'a>, TurtleDocError> {
        match value {
            TurtleValue::Iri(iri) => Ok(Node::Iri(Self::resolve(iri, ctx)?)),
            TurtleValue::Literal(literal) => {
                let typed = |value: &'a str, datatype: &'static str| Node::Literal {
                    value: Cow::Borrowed(value),
                    datatype: Some(Cow::Borrowed(datatype)),
                    lang: None,
                };
                let literal = match literal {
                    Literal::Boolean(true) => typed("true", XSD_BOOLEAN),
                    Literal::Boolean(false) => typed("false", XSD_BOOLEAN),
                    Literal::Double(d) => typed(d, XSD_DOUBLE),
                    Literal::Decimal(d) => typed(d, XSD_DECIMAL),
                    Literal::Integer(i) => typed(i, XSD_INTEGER),
                    Literal::Quoted {
                        datatype,
                        lang,
                        value,
                    } => {
                        let datatype = match datatype {
                            Some(datatype) if lang.is_none() => {
                                Some(Self::resolve(datatype, ctx)?)
                            }
                            _ => None,
                        };
                        Node::Literal {
                            value,
                            datatype,
                            lang: lang.map(Cow::Borrowed),
                        }
                    }
                };
                Ok(literal)
            }
            TurtleValue::BNode(BlankNode::Labeled(label)) => {
                Ok(Node::BlankNode(Cow::Borrowed(label)))
            }
            TurtleValue::BNode(BlankNode::Unlabeled) => {
                Ok(Node::BlankNode(Cow::Owned(Uuid::new_v4().to_string())))
            }
            statement @ TurtleValue::Statement { .. } => {
                Self::add_statement(statement, ctx, turtle_doc)
            }
            TurtleValue::Collection(mut nodes) => {
                let first = match nodes.pop_front() {
                    Some(first) => first,
                    None => return Ok(Node::Iri(Cow::Borrowed(RDF_NIL))),
                };
                let rest = if nodes.is_empty() {
                    TurtleValue::Iri(Iri::Enclosed(RDF_NIL))
                } else {
                    TurtleValue::Collection(nodes)
                };
                Self::add_statement(
                    TurtleValue::Statement {
                        subject: Box::new(TurtleValue::BNode(BlankNode::Unlabeled)),
                        predicate_objects: vec![
                            TurtleValue::PredicateObject {
                                predicate: Box::new(TurtleValue::Iri(Iri::Enclosed(RDF_FIRST))),
                                object: Box::new(first),
                            },
                            TurtleValue::PredicateObject {
                                predicate: Box::new(TurtleValue::Iri(Iri::Enclosed(RDF_REST))),
                                object: Box::new(rest),
                            },
                        ],
                    },
                    ctx,
                    turtle_doc,
                )
            }
            _ => Err(TurtleDocError {
                message: "unexpected turtle value".into(),
            }),
        }
    }
}

impl Display for TurtleDoc<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(
            &self
                .statements
                .iter()
                .map(Statement::to_string)
                .collect::<Vec<String>>()
                .join("\n"),
        )
    }
}

#[derive(PartialEq, Debug, thiserror::Error)]
#[error("error: {message}")]
pub struct TurtleDocError {
    pub message: String,
}
