//! JSON-LD in and out of a dataset.
//!
//! Output is one tree per graph: subjects of the default graph go in a
//! top-level `@graph` array, each named graph becomes a top-level key
//! holding `{"@graph": [...]}`. Subjects, predicates and graph keys keep
//! the order they were first inserted in.
//!
//! Input goes through the JSON-LD processor of `ld-parser`, which reports
//! triples only: everything read lands in the default graph.

use std::io::Write;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use ld_parser::jsonld::{read_json, to_rdf, JsonLdOptions};

use crate::error::Result;
use crate::quad::{Quad, Triple};
use crate::term::Term;

/// Key a term is known by: its IRI, `_:id` or its canonical text.
fn json_id(term: &Term) -> String {
    match term {
        Term::Resource(uri) => uri.to_string(),
        Term::BlankNode(id) => format!("_:{id}"),
        Term::Literal(_) => term.to_string(),
    }
}

fn json_object(term: &Term) -> Value {
    let mut object = Map::new();
    match term {
        Term::Literal(literal) => {
            object.insert("@value".into(), Value::from(literal.value()));
            if let Some(language) = literal.language() {
                object.insert("@language".into(), Value::from(language));
            }
            if let Some(datatype) = literal.datatype() {
                object.insert("@type".into(), Value::from(json_id(datatype)));
            }
        }
        _ => {
            object.insert("@id".into(), Value::from(json_id(term)));
        }
    }
    Value::Object(object)
}

/// Groups triples by subject, a predicate seen twice turns into an array.
fn subjects<'a>(triples: impl IntoIterator<Item = &'a Triple>) -> Vec<Value> {
    let mut nodes: IndexMap<String, Map<String, Value>> = IndexMap::new();
    for triple in triples {
        let id = json_id(&triple.subject);
        let node = nodes.entry(id.clone()).or_insert_with(|| {
            let mut node = Map::new();
            node.insert("@id".into(), Value::String(id));
            node
        });
        let object = json_object(&triple.object);
        match node.get_mut(&json_id(&triple.predicate)) {
            Some(Value::Array(values)) => values.push(object),
            Some(single) => {
                let first = single.take();
                *single = Value::Array(vec![first, object]);
            }
            None => {
                node.insert(json_id(&triple.predicate), object);
            }
        }
    }
    nodes.into_values().map(Value::Object).collect()
}

pub(crate) fn to_value<'q>(quads: impl IntoIterator<Item = &'q Quad>) -> Value {
    let mut graphs: IndexMap<Option<&Term>, Vec<Triple>> = IndexMap::new();
    for quad in quads {
        graphs
            .entry(quad.graph.as_ref())
            .or_default()
            .push(quad.to_triple());
    }

    let mut root = Map::new();
    if let Some(default) = graphs.get(&None) {
        root.insert("@graph".into(), Value::Array(subjects(default)));
    }
    for (graph, triples) in graphs.iter() {
        if let Some(graph) = graph {
            let mut wrapper = Map::new();
            wrapper.insert("@graph".into(), Value::Array(subjects(triples)));
            root.insert(json_id(graph), Value::Object(wrapper));
        }
    }
    Value::Object(root)
}

pub(crate) fn write<'q, W: Write>(
    quads: impl IntoIterator<Item = &'q Quad>,
    mut writer: W,
    pretty: bool,
) -> Result<()> {
    let value = to_value(quads);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, &value)?;
    } else {
        serde_json::to_writer(&mut writer, &value)?;
    }
    writeln!(writer)?;
    Ok(())
}

pub(crate) fn read(bytes: &[u8]) -> Result<Vec<Quad>> {
    let document = read_json(bytes)?;
    let options = JsonLdOptions {
        base: None,
        produce_generalized_rdf: false,
    };
    let statements = to_rdf(&document, &options)?;
    Ok(statements
        .iter()
        .map(|statement| {
            Quad::from_triple(Triple::new(
                Term::from(&statement.subject),
                Term::from(&statement.predicate),
                Term::from(&statement.object),
            ))
        })
        .collect())
}

#[cfg(test)]
mod test {
    use super::{read, to_value, write};
    use crate::quad::Quad;
    use crate::term::Term;
    use serde_json::json;

    const EX: &str = "http://example.org/";

    fn ex(local: &str) -> Term {
        Term::resource(format!("{EX}{local}"))
    }

    #[test]
    fn fold_test() {
        let xsd_int = Term::resource("http://www.w3.org/2001/XMLSchema#integer");
        let quads = vec![
            Quad::new(ex("bob"), ex("name"), Term::literal("Bob"), Some(ex("g"))),
            Quad::new(ex("alice"), ex("knows"), ex("bob"), None),
            Quad::new(ex("alice"), ex("knows"), Term::blank("c"), None),
            Quad::new(ex("alice"), ex("age"), Term::typed_literal("42", xsd_int), None),
            Quad::new(Term::blank("c"), ex("name"), Term::lang_literal("Carol", "en"), None),
        ];
        assert_eq!(
            json!({
                "@graph": [
                    {
                        "@id": "http://example.org/alice",
                        "http://example.org/knows": [
                            {"@id": "http://example.org/bob"},
                            {"@id": "_:c"}
                        ],
                        "http://example.org/age": {
                            "@value": "42",
                            "@type": "http://www.w3.org/2001/XMLSchema#integer"
                        }
                    },
                    {
                        "@id": "_:c",
                        "http://example.org/name": {"@value": "Carol", "@language": "en"}
                    }
                ],
                "http://example.org/g": {
                    "@graph": [
                        {
                            "@id": "http://example.org/bob",
                            "http://example.org/name": {"@value": "Bob"}
                        }
                    ]
                }
            }),
            to_value(&quads)
        );
    }

    #[test]
    fn key_order_test() {
        let quads = vec![
            Quad::new(ex("s"), ex("z"), Term::literal("1"), Some(ex("g2"))),
            Quad::new(ex("s"), ex("a"), Term::literal("2"), Some(ex("g1"))),
            Quad::new(ex("s"), ex("z"), Term::literal("3"), None),
            Quad::new(ex("s"), ex("a"), Term::literal("4"), None),
        ];
        let value = to_value(&quads);
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(
            vec!["@graph", "http://example.org/g2", "http://example.org/g1"],
            keys
        );
        let node = value["@graph"][0].as_object().unwrap();
        let predicates: Vec<&String> = node.keys().collect();
        assert_eq!(
            vec!["@id", "http://example.org/z", "http://example.org/a"],
            predicates
        );
    }

    #[test]
    fn write_test() {
        let quads = vec![Quad::new(ex("a"), ex("b"), ex("c"), None)];
        let mut out = Vec::new();
        write(&quads, &mut out, false).unwrap();
        assert_eq!(
            "{\"@graph\":[{\"@id\":\"http://example.org/a\",\"http://example.org/b\":{\"@id\":\"http://example.org/c\"}}]}\n",
            String::from_utf8(out).unwrap()
        );

        let mut out = Vec::new();
        write(&quads, &mut out, true).unwrap();
        let pretty = String::from_utf8(out).unwrap();
        assert!(pretty.starts_with("{\n  \"@graph\": [\n    {\n"));
    }

    #[test]
    fn read_test() {
        let quads = read(
            br#"{
                "@context": {"ex": "http://example.org/"},
                "@id": "ex:alice",
                "ex:name": "Alice",
                "ex:knows": {"@id": "_:b", "ex:name": {"@value": "Bob", "@language": "en"}},
                "ex:relative": {"@id": "not-absolute"}
            }"#,
        )
        .unwrap();
        assert_eq!(3, quads.len());
        assert!(quads.iter().all(Quad::in_default_graph));
        assert!(quads.contains(&Quad::new(
            ex("alice"),
            ex("name"),
            Term::literal("Alice"),
            None
        )));
        assert!(quads.contains(&Quad::new(
            Term::blank("b"),
            ex("name"),
            Term::lang_literal("Bob", "en"),
            None
        )));

        assert!(read(b"{ nope").is_err());
    }

    #[test]
    fn read_own_output_test() {
        let quads = vec![
            Quad::new(ex("a"), ex("p"), Term::literal("1"), None),
            Quad::new(ex("a"), ex("p"), Term::literal("2"), None),
            Quad::new(ex("b"), ex("p"), ex("a"), Some(ex("g"))),
        ];
        let mut out = Vec::new();
        write(&quads, &mut out, true).unwrap();
        let back = read(&out).unwrap();
        assert_eq!(3, back.len());
        // graph membership does not survive the trip
        for quad in &quads {
            assert!(back.contains(&Quad::from_triple(quad.to_triple())));
        }
    }
}
