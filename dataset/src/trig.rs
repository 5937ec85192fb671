//! TriG, https://www.w3.org/TR/trig/
//!
//! The reader is a line scanner that cuts the document into graph blocks
//! and hands each statement group to the Turtle grammar. It covers:
//!
//! - statements outside any block, which land in the default graph
//! - `{ ... }` for the default graph
//! - `<iri> { ... }` and `GRAPH <iri> { ... }` for named graphs
//! - braces in the middle of a line, e.g. `<g> { <a> <b> <c> . }`
//!
//! Directives are skipped up to their end, so statements may follow them on
//! the same line. Prefixed names inside blocks are not expanded.
//! Unterminated directives, blank node or prefixed graph labels, nested
//! blocks and unbalanced braces are rejected with [`Error::Trig`].

use std::io::Write;

use indexmap::IndexMap;

use ld_parser::shared::resolve_iri;

use crate::error::{Error, Result};
use crate::quad::Quad;
use crate::term::Term;
use crate::turtle;

/// A statement group the Turtle grammar rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedGroup {
    /// Line the group starts on, 1-based.
    pub line: usize,
    pub graph: Option<Term>,
    pub text: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Text(&'a str),
    Open,
    Close,
}

/// Splits a line on structural braces, dropping a trailing comment.
/// Braces and `#` inside IRIs and string literals are left alone.
fn pieces(line: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut end = line.len();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut in_iri = false;

    for (idx, c) in line.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        if in_iri {
            in_iri = c != '>';
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '<' => in_iri = true,
            '#' => {
                end = idx;
                break;
            }
            '{' | '}' => {
                push_text(&mut pieces, &line[start..idx]);
                pieces.push(if c == '{' { Piece::Open } else { Piece::Close });
                start = idx + 1;
            }
            _ => {}
        }
    }
    if start < end {
        push_text(&mut pieces, &line[start..end]);
    }
    pieces
}

fn push_text<'a>(pieces: &mut Vec<Piece<'a>>, text: &'a str) {
    if !text.trim().is_empty() {
        pieces.push(Piece::Text(text));
    }
}

fn is_directive(line: &str) -> bool {
    let keyword = line.split_whitespace().next().unwrap_or_default();
    keyword == "@prefix"
        || keyword == "@base"
        || keyword.eq_ignore_ascii_case("PREFIX")
        || keyword.eq_ignore_ascii_case("BASE")
}

/// Length of the directive `line` starts with: up to the closing `>` for
/// `PREFIX`/`BASE`, up to the following `.` for `@prefix`/`@base`.
/// `None` when the directive does not end on this line.
fn directive_len(line: &str) -> Option<usize> {
    let iri_end = line.find('>')? + 1;
    if !line.starts_with('@') {
        return Some(iri_end);
    }
    let rest = &line[iri_end..];
    let spaces = rest.len() - rest.trim_start().len();
    rest[spaces..]
        .starts_with('.')
        .then_some(iri_end + spaces + 1)
}

pub(crate) struct TrigReader<'a> {
    base: &'a str,
    strict: bool,
    graph: Option<Term>,
    in_block: bool,
    block_line: usize,
    pending: Vec<&'a str>,
    pending_line: usize,
    quads: Vec<Quad>,
    dropped: Vec<DroppedGroup>,
}

impl<'a> TrigReader<'a> {
    pub(crate) fn new(base: &'a str, strict: bool) -> Self {
        TrigReader {
            base,
            strict,
            graph: None,
            in_block: false,
            block_line: 0,
            pending: Vec::new(),
            pending_line: 0,
            quads: Vec::new(),
            dropped: Vec::new(),
        }
    }

    /// Reads `text`, returning the quads found and the groups dropped.
    /// Nothing is returned when the document is out of the supported subset.
    pub(crate) fn read(mut self, text: &'a str) -> Result<(Vec<Quad>, Vec<DroppedGroup>)> {
        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let mut line = raw.trim();
            while is_directive(line) {
                let len = directive_len(line).ok_or_else(|| Error::Trig {
                    line: line_no,
                    message: format!("unterminated directive `{line}`"),
                })?;
                tracing::debug!(
                    line = line_no,
                    directive = &line[..len],
                    "skipping TriG directive"
                );
                line = line[len..].trim_start();
            }
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            for piece in pieces(line) {
                match piece {
                    Piece::Text(text) => self.push(text.trim(), line_no)?,
                    Piece::Open => self.open(line_no)?,
                    Piece::Close => self.close(line_no)?,
                }
            }
        }
        if self.in_block {
            return Err(Error::Trig {
                line: self.block_line,
                message: "graph block is never closed".into(),
            });
        }
        self.flush()?;
        Ok((self.quads, self.dropped))
    }

    fn push(&mut self, text: &'a str, line: usize) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if self.pending.is_empty() {
            self.pending_line = line;
        }
        self.pending.push(text);
        if text.ends_with('.') {
            self.flush()?;
        }
        Ok(())
    }

    fn open(&mut self, line: usize) -> Result<()> {
        if self.in_block {
            return Err(Error::Trig {
                line,
                message: "nested graph blocks are not supported".into(),
            });
        }
        // whatever is pending and unterminated is the graph label
        let label = self.pending.join(" ");
        self.pending.clear();
        self.graph = self.graph_label(&label, line)?;
        self.in_block = true;
        self.block_line = line;
        Ok(())
    }

    fn close(&mut self, line: usize) -> Result<()> {
        if !self.in_block {
            return Err(Error::Trig {
                line,
                message: "`}` without an open graph block".into(),
            });
        }
        // the last statement of a block may omit its dot
        if let Some(last) = self.pending.last() {
            if !last.ends_with('.') {
                self.pending.push(".");
            }
        }
        self.flush()?;
        self.in_block = false;
        self.graph = None;
        Ok(())
    }

    fn graph_label(&self, label: &str, line: usize) -> Result<Option<Term>> {
        let label = label.trim();
        let label = match label.split_once(char::is_whitespace) {
            Some((keyword, rest)) if keyword.eq_ignore_ascii_case("GRAPH") => rest.trim(),
            _ => label,
        };
        if label.is_empty() {
            return Ok(None);
        }
        match label.strip_prefix('<').and_then(|l| l.strip_suffix('>')) {
            Some(iri) if !iri.contains(['<', '>', ' ']) => Ok(Some(Term::resource(
                resolve_iri(Some(self.base), iri),
            ))),
            _ => Err(Error::Trig {
                line,
                message: format!("unsupported graph label `{label}`"),
            }),
        }
    }

    fn flush(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let text = self.pending.join("\n");
        self.pending.clear();
        match turtle::read(self.base, &text, self.graph.as_ref()) {
            Ok(quads) => self.quads.extend(quads),
            Err(err) if self.strict => {
                return Err(Error::Trig {
                    line: self.pending_line,
                    message: err.message,
                })
            }
            Err(err) => {
                tracing::warn!(
                    line = self.pending_line,
                    graph = ?self.graph,
                    error = %err,
                    "dropping malformed TriG statement group"
                );
                self.dropped.push(DroppedGroup {
                    line: self.pending_line,
                    graph: self.graph.clone(),
                    text,
                    reason: err.message,
                });
            }
        }
        Ok(())
    }
}

/// Writes `quads` as graph blocks: the default graph first, then named
/// graphs in the order they were first seen.
pub(crate) fn write<'q, W: Write>(
    quads: impl IntoIterator<Item = &'q Quad>,
    mut writer: W,
) -> std::io::Result<()> {
    let mut buckets: IndexMap<Option<&Term>, Vec<&Quad>> = IndexMap::new();
    for quad in quads {
        buckets.entry(quad.graph.as_ref()).or_default().push(quad);
    }

    let mut first = true;
    if let Some(default) = buckets.get(&None) {
        write_block(&mut writer, None, default)?;
        first = false;
    }
    for (graph, quads) in buckets.iter() {
        if let Some(graph) = graph {
            if !first {
                writeln!(writer)?;
            }
            write_block(&mut writer, Some(graph), quads)?;
            first = false;
        }
    }
    Ok(())
}

fn write_block<W: Write>(
    writer: &mut W,
    graph: Option<&Term>,
    quads: &[&Quad],
) -> std::io::Result<()> {
    match graph {
        Some(graph) => writeln!(writer, "{graph} {{")?,
        None => writeln!(writer, "{{")?,
    }
    for quad in quads {
        writeln!(writer, "  {} {} {} .", quad.subject, quad.predicate, quad.object)?;
    }
    writeln!(writer, "}}")
}
