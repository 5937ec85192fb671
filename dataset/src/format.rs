//! Format identifiers (MIME types) and the file extensions they go with.

use std::fmt;

use crate::error::{Error, Result};

pub const TURTLE: &str = "text/turtle";
pub const TRIG: &str = "application/trig";
pub const JSON_LD: &str = "application/ld+json";
pub const N_QUADS: &str = "application/n-quads";
pub const N3: &str = "text/n3";
pub const RDF_XML: &str = "application/rdf+xml";

/// Extensions of documents that usually hold RDF.
pub const RDF_EXTENSIONS: &[&str] = &[".ttl", ".trig", ".n3", ".rdf", ".jsonld", ".nq"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Turtle,
    TriG,
    JsonLd,
    NQuads,
}

impl Format {
    pub fn mime(&self) -> &'static str {
        match self {
            Format::Turtle => TURTLE,
            Format::TriG => TRIG,
            Format::JsonLd => JSON_LD,
            Format::NQuads => N_QUADS,
        }
    }

    /// The format a document of type `mime` is read with.
    pub fn for_parsing(mime: &str) -> Result<Format> {
        match essence(mime).as_str() {
            TURTLE => Ok(Format::Turtle),
            TRIG => Ok(Format::TriG),
            JSON_LD => Ok(Format::JsonLd),
            N_QUADS => Ok(Format::NQuads),
            _ => Err(Error::UnsupportedFormat(mime.to_string())),
        }
    }

    /// The format a dataset is written as. Turtle cannot carry named
    /// graphs, so it is not offered.
    pub fn for_serializing(mime: &str) -> Result<Format> {
        match essence(mime).as_str() {
            TRIG => Ok(Format::TriG),
            JSON_LD => Ok(Format::JsonLd),
            N_QUADS => Ok(Format::NQuads),
            _ => Err(Error::UnsupportedFormat(mime.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Turtle => "turtle",
            Format::TriG => "trig",
            Format::JsonLd => "json-ld",
            Format::NQuads => "n-quads",
        })
    }
}

/// `text/turtle; charset=utf-8` -> `text/turtle`
fn essence(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// MIME type of a file extension, with or without the leading dot.
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    let extension = extension.trim_start_matches('.').to_ascii_lowercase();
    match extension.as_str() {
        "ttl" => Some(TURTLE),
        "trig" => Some(TRIG),
        "n3" => Some(N3),
        "rdf" => Some(RDF_XML),
        "jsonld" => Some(JSON_LD),
        "nq" => Some(N_QUADS),
        _ => None,
    }
}
