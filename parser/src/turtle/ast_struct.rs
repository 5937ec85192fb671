use std::collections::VecDeque;

pub use crate::triple_common_parser::{BlankNode, Iri, Literal};

#[derive(PartialEq, Debug)]
pub enum TurtleValue<'a> {
    Base(Box<TurtleValue<'a>>),
    Prefix((&'a str, Box<TurtleValue<'a>>)),
    Iri(Iri<'a>),
    Literal(Literal<'a>),
    BNode(BlankNode<'a>),
    ObjectList(Vec<TurtleValue<'a>>),
    Collection(VecDeque<TurtleValue<'a>>),
    PredicateObject {
        predicate: Box<TurtleValue<'a>>,
        object: Box<TurtleValue<'a>>,
    },
    Statement {
        subject: Box<TurtleValue<'a>>,
        predicate_objects: Vec<TurtleValue<'a>>,
    },
}
