use crate::prelude::*;
use crate::triple_common_parser::iri::iri as common_iri;
use crate::triple_common_parser::literal::literal as common_literal;
use crate::triple_common_parser::prologue::{
    base_sparql, base_turtle, prefix_sparql, prefix_turtle,
};
use crate::triple_common_parser::triple::{
    anon_bnode, collection as common_collection, labeled_bnode as common_labeled_bnode,
    ns_type as common_ns_type, object_list, predicate_list,
};
use crate::triple_common_parser::{comments, BlankNode};
use crate::turtle::ast_struct::TurtleValue;

fn base(s: &str) -> ParserResult<TurtleValue> {
    map(alt((base_turtle, base_sparql)), |iri| {
        TurtleValue::Base(Box::new(TurtleValue::Iri(iri)))
    })(s)
}
fn prefix(s: &str) -> ParserResult<TurtleValue> {
    map(alt((prefix_turtle, prefix_sparql)), |(prefix, iri)| {
        TurtleValue::Prefix((prefix, Box::new(TurtleValue::Iri(iri))))
    })(s)
}
fn directive(s: &str) -> ParserResult<TurtleValue> {
    alt((base, prefix))(s)
}

fn iri(s: &str) -> ParserResult<TurtleValue> {
    map(common_iri, TurtleValue::Iri)(s)
}
fn literal(s: &str) -> ParserResult<TurtleValue> {
    map(common_literal, TurtleValue::Literal)(s)
}
fn labeled_bnode(s: &str) -> ParserResult<TurtleValue> {
    map(common_labeled_bnode, TurtleValue::BNode)(s)
}
fn ns_type(s: &str) -> ParserResult<TurtleValue> {
    map(common_ns_type, TurtleValue::Iri)(s)
}
fn collection(s: &str) -> ParserResult<TurtleValue> {
    map(common_collection(object), TurtleValue::Collection)(s)
}

fn subject(s: &str) -> ParserResult<TurtleValue> {
    alt((labeled_bnode, iri, collection))(s)
}
fn predicate(s: &str) -> ParserResult<TurtleValue> {
    alt((ns_type, iri))(s)
}
fn object(s: &str) -> ParserResult<TurtleValue> {
    alt((labeled_bnode, iri, literal, collection, anon))(s)
}
fn object_lists(s: &str) -> ParserResult<TurtleValue> {
    object_list(object, TurtleValue::ObjectList)(s)
}

fn map_predicate_object<'a>(
    (predicate, object): (TurtleValue<'a>, TurtleValue<'a>),
) -> TurtleValue<'a> {
    TurtleValue::PredicateObject {
        predicate: Box::new(predicate),
        object: Box::new(object),
    }
}
fn map_statement<'a>(
    subject: TurtleValue<'a>,
    predicate_objects: Vec<TurtleValue<'a>>,
) -> TurtleValue<'a> {
    TurtleValue::Statement {
        subject: Box::new(subject),
        predicate_objects,
    }
}

fn unlabeled_subject(s: &str) -> ParserResult<TurtleValue> {
    Ok((s, TurtleValue::BNode(BlankNode::Unlabeled)))
}
fn anon_property_list(s: &str) -> ParserResult<TurtleValue> {
    predicate_list(
        unlabeled_subject,
        predicate,
        object_lists,
        map_predicate_object,
        map_statement,
    )(s)
}
fn anon_body(s: &str) -> ParserResult<TurtleValue> {
    alt((anon_property_list, unlabeled_subject))(s)
}
fn anon(s: &str) -> ParserResult<TurtleValue> {
    anon_bnode(anon_body)(s)
}

fn triples(s: &str) -> ParserResult<TurtleValue> {
    alt((
        predicate_list(
            subject,
            predicate,
            object_lists,
            map_predicate_object,
            map_statement,
        ),
        predicate_list(
            anon,
            predicate,
            object_lists,
            map_predicate_object,
            map_statement,
        ),
        anon,
    ))(s)
}

fn statement(s: &str) -> ParserResult<TurtleValue> {
    preceded(
        comments,
        alt((
            directive,
            terminated(triples, preceded(multispace0, char('.'))),
        )),
    )(s)
}

pub(crate) fn statements(s: &str) -> ParserResult<Vec<TurtleValue>> {
    terminated(many0(statement), preceded(comments, multispace0))(s)
}

#[cfg(test)]
mod test {
    use super::{anon, statements, triples};
    use crate::turtle::ast_struct::{BlankNode, Iri, Literal, TurtleValue};
    use std::borrow::Cow;
    use std::collections::VecDeque;

    #[test]
    fn triples_test() {
        let s = r#"
            <http://en.wikipedia.org/wiki/Helium>
            <http://example.org/elements/atomicNumber>  2 ;
            <http://example.org/elements/isOk> true ;
            <http://example.org/elements/specificGravity> 1.663E-4 .
        "#;
        let (remaining, res) = triples(s).unwrap();
        assert!(remaining.trim_start().starts_with('.'));
        if let TurtleValue::Statement {
            subject,
            predicate_objects,
        } = res
        {
            assert_eq!(
                TurtleValue::Iri(Iri::Enclosed("http://en.wikipedia.org/wiki/Helium")),
                *subject
            );
            assert_eq!(3, predicate_objects.len());
            assert_eq!(
                TurtleValue::PredicateObject {
                    predicate: Box::new(TurtleValue::Iri(Iri::Enclosed(
                        "http://example.org/elements/isOk"
                    ))),
                    object: Box::new(TurtleValue::Literal(Literal::Boolean(true))),
                },
                predicate_objects[1]
            );
        } else {
            panic!("expected a statement, got {res:?}");
        }
    }

    #[test]
    fn object_list_test() {
        let s = r#"<http://example.org/#spiderman> <http://xmlns.com/foaf/0.1/name> "Spiderman", "Человек-паук"@ru ."#;
        let (_, res) = triples(s).unwrap();
        let TurtleValue::Statement {
            predicate_objects, ..
        } = res
        else {
            panic!("expected a statement");
        };
        let TurtleValue::PredicateObject { object, .. } = &predicate_objects[0] else {
            panic!("expected a predicate object");
        };
        assert_eq!(
            TurtleValue::ObjectList(vec![
                TurtleValue::Literal(Literal::Quoted {
                    datatype: None,
                    value: Cow::Borrowed("Spiderman"),
                    lang: None,
                }),
                TurtleValue::Literal(Literal::Quoted {
                    datatype: None,
                    value: Cow::Borrowed("Человек-паук"),
                    lang: Some("ru"),
                }),
            ]),
            **object
        );
    }

    #[test]
    fn anon_test() {
        let (remaining, res) = anon("[]").unwrap();
        assert_eq!("", remaining);
        assert_eq!(TurtleValue::BNode(BlankNode::Unlabeled), res);

        let (_, res) = anon(r#"[ <http://xmlns.com/foaf/0.1/name> "Bob" ]"#).unwrap();
        assert!(matches!(res, TurtleValue::Statement { .. }));
    }

    #[test]
    fn statements_test() {
        let s = r#"
        # a comment
        @prefix foaf: <http://xmlns.com/foaf/0.1/> .
        PREFIX ex: <http://example.org/>
        @base <http://example.org/base/> .

        ex:a a foaf:Person ; # trailing comment
            foaf:knows ( ex:b ex:c ) ;
            .
        [ foaf:name "Alice" ] .
        "#;
        let (remaining, res) = statements(s).unwrap();
        assert_eq!("", remaining);
        assert_eq!(5, res.len());
        assert!(matches!(res[0], TurtleValue::Prefix(("foaf", _))));
        assert!(matches!(res[1], TurtleValue::Prefix(("ex", _))));
        assert!(matches!(res[2], TurtleValue::Base(_)));

        let TurtleValue::Statement {
            predicate_objects, ..
        } = &res[3]
        else {
            panic!("expected a statement");
        };
        let TurtleValue::PredicateObject { object, .. } = &predicate_objects[1] else {
            panic!("expected a predicate object");
        };
        assert_eq!(
            TurtleValue::Collection(VecDeque::from(vec![
                TurtleValue::Iri(Iri::Prefixed {
                    prefix: "ex",
                    local_name: "b",
                }),
                TurtleValue::Iri(Iri::Prefixed {
                    prefix: "ex",
                    local_name: "c",
                }),
            ])),
            **object
        );
    }

    #[test]
    fn unterminated_statement_test() {
        let (remaining, res) = statements("<a> <b> <c>").unwrap();
        assert!(res.is_empty());
        assert_eq!("<a> <b> <c>", remaining);
    }
}
