use std::collections::HashSet;

use ld_dataset::{Dataset, Error, Term, Triple};
use serde_json::json;

const PEOPLE_TRIG: &str = include_str!("fixtures/people.trig");
const BASE: &str = "http://example.org/";

fn r(uri: &str) -> Term {
    Term::resource(uri)
}

fn people() -> Dataset {
    let mut dataset = Dataset::new(BASE);
    let report = dataset.parse(PEOPLE_TRIG.as_bytes(), "application/trig").unwrap();
    assert_eq!(9, report.added);
    assert_eq!(1, report.dropped.len());
    assert_eq!(19, report.dropped[0].line);
    dataset
}

fn serialize(dataset: &Dataset, mime: &str) -> Vec<u8> {
    let mut out = Vec::new();
    dataset.serialize(&mut out, mime).unwrap();
    out
}

fn triples(dataset: &Dataset, graph: Option<&Term>) -> HashSet<Triple> {
    dataset.get_graph(graph).iter().cloned().collect()
}

fn all_triples(dataset: &Dataset) -> HashSet<Triple> {
    dataset.iter().map(|q| q.to_triple()).collect()
}

#[test]
fn trig_fixture_test() {
    let dataset = people();
    let people_graph = r("http://example.org/people");
    let quotes = r("http://example.org/quotes");
    assert_eq!(vec![people_graph.clone(), quotes.clone()], dataset.named_graphs());
    assert_eq!(5, dataset.get_graph(Some(&people_graph)).len());
    assert_eq!(2, dataset.get_graph(Some(&quotes)).len());
    assert_eq!(2, dataset.default_graph().len());

    let age = dataset
        .one(None, Some(&r("http://xmlns.com/foaf/0.1/age")), None, Some(&people_graph))
        .unwrap();
    let literal = age.object.as_literal().unwrap();
    assert_eq!("42", literal.value());
    assert_eq!(
        Some(&r("http://www.w3.org/2001/XMLSchema#integer")),
        literal.datatype()
    );
    assert!(dataset
        .one(
            Some(&r("http://example.org/alice")),
            None,
            Some(&Term::literal("a \"quoted\" {brace}")),
            Some(&quotes)
        )
        .is_some());
}

#[test]
fn trig_round_trip_test() {
    let original = people();
    let trig = serialize(&original, "application/trig");

    let mut copy = Dataset::new(BASE);
    let report = copy.parse(trig.as_slice(), "application/trig").unwrap();
    assert!(report.is_lossless());
    assert_eq!(original.len(), copy.len());
    assert_eq!(original.named_graphs(), copy.named_graphs());
    for graph in original.named_graphs() {
        assert_eq!(triples(&original, Some(&graph)), triples(&copy, Some(&graph)));
    }
    assert_eq!(triples(&original, None), triples(&copy, None));
}

#[test]
fn nquads_round_trip_test() {
    let original = people();
    let nquads = serialize(&original, "application/n-quads");
    assert_eq!(original.to_string().as_bytes(), nquads.as_slice());

    let mut copy = Dataset::new(BASE);
    copy.parse(nquads.as_slice(), "application/n-quads").unwrap();
    assert_eq!(original.to_string(), copy.to_string());
}

#[test]
fn trig_jsonld_trig_test() {
    let original = people();
    let jsonld = serialize(&original, "application/ld+json");

    let mut from_jsonld = Dataset::new(BASE);
    from_jsonld
        .parse(jsonld.as_slice(), "application/ld+json")
        .unwrap();
    let trig = serialize(&from_jsonld, "application/trig");
    let mut copy = Dataset::new(BASE);
    copy.parse(trig.as_slice(), "application/trig").unwrap();

    // every statement survives
    assert_eq!(original.len(), copy.len());
    assert_eq!(all_triples(&original), all_triples(&copy));

    // named graph membership does not: JSON-LD input lands in the default graph
    assert!(copy.named_graphs().is_empty());
    assert_eq!(original.len(), copy.default_graph().len());
}

#[test]
fn jsonld_shape_test() {
    let mut dataset = Dataset::new(BASE);
    let graph = r("http://example.org/g");
    dataset.add_triple(r("http://example.org/a"), r("http://example.org/p"), Term::literal("x"));
    dataset.add_quad(
        r("http://example.org/b"),
        r("http://example.org/p"),
        Term::blank("c"),
        Some(graph.clone()),
    );
    dataset.add_quad(
        r("http://example.org/b"),
        r("http://example.org/p"),
        Term::lang_literal("y", "en"),
        Some(graph),
    );

    let out = serialize(&dataset, "application/ld+json");
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(
        json!({
            "@graph": [
                {"@id": "http://example.org/a", "http://example.org/p": {"@value": "x"}}
            ],
            "http://example.org/g": {
                "@graph": [
                    {
                        "@id": "http://example.org/b",
                        "http://example.org/p": [
                            {"@id": "_:c"},
                            {"@value": "y", "@language": "en"}
                        ]
                    }
                ]
            }
        }),
        value
    );
}

#[test]
fn jsonld_input_test() {
    let doc = json!({
        "@context": {
            "foaf": "http://xmlns.com/foaf/0.1/",
            "knows": {"@id": "foaf:knows", "@type": "@id"}
        },
        "@id": "http://example.org/alice",
        "@type": "foaf:Person",
        "foaf:name": "Alice",
        "knows": "http://example.org/bob"
    });
    let mut dataset = Dataset::new(BASE);
    let report = dataset
        .parse(doc.to_string().as_bytes(), "application/ld+json")
        .unwrap();
    assert_eq!(3, report.added);
    assert!(dataset
        .one(
            Some(&r("http://example.org/alice")),
            Some(&r("http://xmlns.com/foaf/0.1/knows")),
            Some(&r("http://example.org/bob")),
            None
        )
        .is_some());

    let remote = json!({"@context": "http://schema.org/", "name": "x"});
    let err = dataset
        .parse(remote.to_string().as_bytes(), "application/ld+json")
        .unwrap_err();
    assert!(matches!(err, Error::JsonLd(_)));
    assert_eq!(3, dataset.len());
}
