use std::fmt;
use std::io::{Read, Write};

use indexmap::IndexSet;

use crate::config::DatasetConfig;
use crate::error::{Error, Result};
use crate::format::Format;
use crate::graph::Graph;
use crate::loader::{defrag, DocumentLoader, ACCEPT};
use crate::quad::{Quad, Triple};
use crate::term::Term;
use crate::trig::{DroppedGroup, TrigReader};
use crate::{jsonld, nquads, trig, turtle};

/// Outcome of [`Dataset::parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Quads that were not in the dataset yet.
    pub added: usize,
    /// TriG statement groups skipped because they did not parse.
    pub dropped: Vec<DroppedGroup>,
}

impl ParseReport {
    pub fn is_lossless(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// An in-memory RDF dataset: a set of quads over the default graph and any
/// number of named graphs.
///
/// Quads are deduplicated by value and kept in insertion order, which is
/// also the order queries and serializers report them in. In patterns,
/// `None` for subject, predicate or object matches anything, whereas `None`
/// for the graph only matches the default graph.
#[derive(Debug, Clone)]
pub struct Dataset {
    quads: IndexSet<Quad>,
    uri: String,
    term: Term,
    config: DatasetConfig,
}

impl Default for Dataset {
    fn default() -> Self {
        Dataset::new("")
    }
}

impl Dataset {
    pub fn new(uri: impl Into<String>) -> Self {
        Dataset::with_config(uri, DatasetConfig::default())
    }

    pub fn with_config(uri: impl Into<String>, config: DatasetConfig) -> Self {
        let uri = uri.into();
        Dataset {
            term: Term::resource(&uri),
            quads: IndexSet::new(),
            uri,
            config,
        }
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DatasetConfig) {
        self.config = config;
    }

    /// Base IRI, used to resolve relative references of parsed documents.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The resource denoting the dataset itself.
    pub fn term(&self) -> &Term {
        &self.term
    }

    fn set_uri(&mut self, uri: &str) {
        self.uri = uri.to_string();
        self.term = Term::resource(uri);
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Returns `false` when an equal quad was already stored.
    pub fn add(&mut self, quad: Quad) -> bool {
        self.quads.insert(quad)
    }

    pub fn add_quad(
        &mut self,
        subject: Term,
        predicate: Term,
        object: Term,
        graph: Option<Term>,
    ) -> bool {
        self.add(Quad::new(subject, predicate, object, graph))
    }

    /// Adds a statement to the default graph.
    pub fn add_triple(&mut self, subject: Term, predicate: Term, object: Term) -> bool {
        self.add(Quad::from_triple(Triple::new(subject, predicate, object)))
    }

    pub fn remove(&mut self, quad: &Quad) -> bool {
        self.quads.shift_remove(quad)
    }

    pub fn contains(&self, quad: &Quad) -> bool {
        self.quads.contains(quad)
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, Quad> {
        self.quads.iter()
    }

    pub fn one(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        graph: Option<&Term>,
    ) -> Option<Quad> {
        self.quads
            .iter()
            .find(|q| matches(q, subject, predicate, object, graph))
            .cloned()
    }

    pub fn all(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        graph: Option<&Term>,
    ) -> Vec<Quad> {
        self.quads
            .iter()
            .filter(|q| matches(q, subject, predicate, object, graph))
            .cloned()
            .collect()
    }

    /// The triples of graph `graph`, `None` being the default graph.
    pub fn get_graph(&self, graph: Option<&Term>) -> Graph {
        let mut result = Graph::new(self.uri.clone());
        result.extend(
            self.quads
                .iter()
                .filter(|q| q.graph.as_ref() == graph)
                .map(Quad::to_triple),
        );
        result
    }

    pub fn default_graph(&self) -> Graph {
        self.get_graph(None)
    }

    /// Distinct graph names, in the order they first appear.
    pub fn named_graphs(&self) -> Vec<Term> {
        let names: IndexSet<&Term> = self.quads.iter().filter_map(|q| q.graph.as_ref()).collect();
        names.into_iter().cloned().collect()
    }

    /// Adds every quad of `other`.
    pub fn merge(&mut self, other: &Dataset) {
        self.quads.extend(other.quads.iter().cloned());
    }

    /// Reads a document of type `mime` into the dataset.
    ///
    /// Turtle, N-Quads and JSON-LD documents are added entirely or not at
    /// all. TriG statement groups that do not parse are skipped and listed
    /// in the report, unless [`DatasetConfig::strict_trig`] is set.
    pub fn parse<R: Read>(&mut self, mut reader: R, mime: &str) -> Result<ParseReport> {
        let format = Format::for_parsing(mime)?;
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        let (quads, dropped) = match format {
            Format::JsonLd => (jsonld::read(&bytes)?, vec![]),
            Format::Turtle => (turtle::read(&self.uri, as_text(&bytes)?, None)?, vec![]),
            Format::NQuads => (nquads::read(as_text(&bytes)?)?, vec![]),
            Format::TriG => {
                TrigReader::new(&self.uri, self.config.strict_trig).read(as_text(&bytes)?)?
            }
        };

        let before = self.len();
        let read = quads.len();
        self.quads.extend(quads);
        let report = ParseReport {
            added: self.len() - before,
            dropped,
        };
        tracing::debug!(
            format = %format,
            read,
            added = report.added,
            dropped = report.dropped.len(),
            "parsed document"
        );
        Ok(report)
    }

    /// Writes the dataset as `mime`: TriG, JSON-LD or N-Quads.
    pub fn serialize<W: Write>(&self, writer: W, mime: &str) -> Result<()> {
        match Format::for_serializing(mime)? {
            Format::TriG => trig::write(&self.quads, writer)?,
            Format::JsonLd => jsonld::write(&self.quads, writer, self.config.pretty_json)?,
            Format::NQuads => nquads::write(&self.quads, writer)?,
            Format::Turtle => return Err(Error::UnsupportedFormat(mime.to_string())),
        }
        Ok(())
    }

    /// Fetches `uri` with `loader` and parses the response. The document
    /// becomes the dataset base when none was set.
    pub fn load_uri<L: DocumentLoader + ?Sized>(
        &mut self,
        uri: &str,
        loader: &L,
    ) -> Result<ParseReport> {
        let document = defrag(uri);
        if self.uri.is_empty() {
            self.set_uri(document);
        }
        let remote = loader.fetch(document, ACCEPT)?;
        tracing::debug!(
            uri = document,
            content_type = %remote.content_type,
            size = remote.body.len(),
            "fetched remote document"
        );
        self.parse(remote.body.as_slice(), &remote.content_type)
    }
}

fn matches(
    quad: &Quad,
    subject: Option<&Term>,
    predicate: Option<&Term>,
    object: Option<&Term>,
    graph: Option<&Term>,
) -> bool {
    subject.map_or(true, |s| &quad.subject == s)
        && predicate.map_or(true, |p| &quad.predicate == p)
        && object.map_or(true, |o| &quad.object == o)
        && quad.graph.as_ref() == graph
}

fn as_text(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes)
        .map_err(|err| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Quad;
    type IntoIter = indexmap::set::Iter<'a, Quad>;

    fn into_iter(self) -> Self::IntoIter {
        self.quads.iter()
    }
}

impl Extend<Quad> for Dataset {
    fn extend<I: IntoIterator<Item = Quad>>(&mut self, iter: I) {
        self.quads.extend(iter)
    }
}

/// Flat dump, one `S P O [G] .` line per quad.
impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for quad in &self.quads {
            writeln!(f, "{quad}")?;
        }
        Ok(())
    }
}
