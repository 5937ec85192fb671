use ld_parser::{TurtleDoc, TurtleDocError};

use crate::quad::Quad;
use crate::term::Term;

/// Parses a Turtle document, tagging every statement with `graph`.
pub(crate) fn read(
    base: &str,
    text: &str,
    graph: Option<&Term>,
) -> Result<Vec<Quad>, TurtleDocError> {
    let doc = TurtleDoc::with_base(base, text)?;
    Ok(doc
        .into_statements()
        .into_iter()
        .map(|statement| {
            Quad::new(
                Term::from(&statement.subject),
                Term::from(&statement.predicate),
                Term::from(&statement.object),
                graph.cloned(),
            )
        })
        .collect())
}

#[cfg(test)]
mod test {
    use super::read;
    use crate::term::Term;

    #[test]
    fn read_test() {
        let graph = Term::resource("http://example.org/g");
        let quads = read(
            "http://example.org/",
            r#"@prefix foaf: <http://xmlns.com/foaf/0.1/> .
            <alice> foaf:name "Alice"@en ; foaf:knows [ foaf:name "Bob" ] ."#,
            Some(&graph),
        )
        .unwrap();
        assert_eq!(3, quads.len());
        assert!(quads.iter().all(|q| q.graph.as_ref() == Some(&graph)));
        assert_eq!(Term::resource("http://example.org/alice"), quads[0].subject);
        assert_eq!(Term::lang_literal("Alice", "en"), quads[0].object);

        assert!(read("", "<a> <b> .", None).is_err());
    }
}
