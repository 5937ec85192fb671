use std::fmt;

use indexmap::IndexSet;

use crate::quad::Triple;
use crate::term::Term;

/// A set of triples, as materialized from one graph of a dataset.
///
/// Triples keep the order they were first added in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    base: String,
    triples: IndexSet<Triple>,
}

impl Graph {
    pub fn new(base: impl Into<String>) -> Self {
        Graph {
            base: base.into(),
            triples: IndexSet::new(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Returns `false` when the triple was already present.
    pub fn add(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    pub fn remove(&mut self, triple: &Triple) -> bool {
        self.triples.shift_remove(triple)
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// First triple matching the pattern, `None` positions match anything.
    pub fn one(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> Option<Triple> {
        self.triples
            .iter()
            .find(|t| matches(t, subject, predicate, object))
            .cloned()
    }

    pub fn all(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> Vec<Triple> {
        self.triples
            .iter()
            .filter(|t| matches(t, subject, predicate, object))
            .cloned()
            .collect()
    }
}

fn matches(
    triple: &Triple,
    subject: Option<&Term>,
    predicate: Option<&Term>,
    object: Option<&Term>,
) -> bool {
    subject.map_or(true, |s| &triple.subject == s)
        && predicate.map_or(true, |p| &triple.predicate == p)
        && object.map_or(true, |o| &triple.object == o)
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = indexmap::set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.triples.extend(iter)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for triple in &self.triples {
            writeln!(f, "{triple}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::Graph;
    use crate::quad::Triple;
    use crate::term::Term;

    fn triple(s: &str, p: &str, o: &str) -> Triple {
        Triple::new(Term::resource(s), Term::resource(p), Term::resource(o))
    }

    #[test]
    fn add_remove_test() {
        let mut graph = Graph::new("http://example.org/");
        assert!(graph.is_empty());
        assert!(graph.add(triple("a", "b", "c")));
        assert!(!graph.add(triple("a", "b", "c")));
        assert!(graph.add(triple("a", "b", "d")));
        assert_eq!(2, graph.len());
        assert_eq!("http://example.org/", graph.base());

        assert!(graph.remove(&triple("a", "b", "c")));
        assert!(!graph.remove(&triple("a", "b", "c")));
        assert!(!graph.contains(&triple("a", "b", "c")));
        assert_eq!("<a> <b> <d> .\n", graph.to_string());
    }

    #[test]
    fn pattern_test() {
        let mut graph = Graph::default();
        graph.extend([
            triple("a", "b", "c"),
            triple("a", "b", "d"),
            triple("x", "b", "c"),
        ]);
        let a = Term::resource("a");
        let c = Term::resource("c");
        assert_eq!(Some(triple("a", "b", "c")), graph.one(Some(&a), None, None));
        assert_eq!(2, graph.all(Some(&a), None, None).len());
        assert_eq!(2, graph.all(None, None, Some(&c)).len());
        assert_eq!(3, graph.all(None, None, None).len());
        assert_eq!(None, graph.one(Some(&c), None, None));
    }
}
