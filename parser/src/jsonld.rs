//! JSON-LD to RDF.
//!
//! A compact processor covering what linked data documents found in the wild
//! mostly use: inline contexts, compact IRIs, `@vocab`, `@base`, type and
//! language coercion, value objects, `@list` / `@set` and `@graph`.
//! Graph membership is not reported: every statement comes out as a triple.
//!
//! # Limitations
//!
//! - remote contexts are rejected with [`JsonLdError::RemoteContext`]
//! - `@reverse`, `@index`, `@nest`, `@included` and keyword aliases are ignored
//!
//! ```
//! use ld_parser::jsonld::{to_rdf, JsonLdOptions};
//! use serde_json::json;
//!
//! let doc = json!({
//!     "@context": {"foaf": "http://xmlns.com/foaf/0.1/"},
//!     "@id": "http://example.org/alice",
//!     "foaf:name": "Alice"
//! });
//! let statements = to_rdf(&doc, &JsonLdOptions::default()).unwrap();
//! assert_eq!(1, statements.len());
//! ```

use serde_json::Value;
use thiserror::Error;

pub mod context;
mod to_rdf;

pub use context::{Context, TermDefinition, TypeMapping};
pub use to_rdf::to_rdf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonLdOptions {
    /// Base IRI of the document, used for relative `@id`s.
    pub base: Option<String>,
    /// Keep statements with blank node predicates or relative IRIs.
    pub produce_generalized_rdf: bool,
}

#[derive(Error, Debug)]
pub enum JsonLdError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Remote context not supported: {url}")]
    RemoteContext { url: String },

    #[error("Invalid context: {message}")]
    InvalidContext { message: String },

    #[error("Invalid @id: {value}")]
    InvalidId { value: Value },

    #[error("@language cannot be used for values with a specified @type")]
    LanguageWithType,

    #[error("Invalid value object: {message}")]
    InvalidValue { message: String },

    #[error("Invalid document: {message}")]
    InvalidDocument { message: String },
}

pub type Result<T> = std::result::Result<T, JsonLdError>;

/// Reads raw bytes as a JSON document.
pub fn read_json(bytes: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(bytes)?)
}
