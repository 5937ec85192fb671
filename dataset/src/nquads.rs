use std::io::Write;

use ld_parser::nquads::parse_document;

use crate::error::{Error, Result};
use crate::quad::Quad;
use crate::term::Term;

pub(crate) fn read(text: &str) -> Result<Vec<Quad>> {
    let quads = parse_document(text).map_err(|err| Error::NQuads(err.message))?;
    Ok(quads
        .iter()
        .map(|quad| {
            Quad::new(
                Term::from(&quad.statement.subject),
                Term::from(&quad.statement.predicate),
                Term::from(&quad.statement.object),
                quad.graph.as_ref().map(Term::from),
            )
        })
        .collect())
}

/// One `S P O [G] .` line per quad.
pub(crate) fn write<'q, W: Write>(
    quads: impl IntoIterator<Item = &'q Quad>,
    mut writer: W,
) -> std::io::Result<()> {
    for quad in quads {
        writeln!(writer, "{quad}")?;
    }
    Ok(())
}
