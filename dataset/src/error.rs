use thiserror::Error;

use ld_parser::jsonld::JsonLdError;
use ld_parser::TurtleDocError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} is not supported")]
    UnsupportedFormat(String),

    #[error("Turtle parse error: {0}")]
    Turtle(#[from] TurtleDocError),

    #[error("N-Quads parse error: {0}")]
    NQuads(String),

    #[error("JSON-LD parse error: {0}")]
    JsonLd(#[from] JsonLdError),

    #[error("TriG error at line {line}: {message}")]
    Trig { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl Error {
    /// Whether the input document itself was malformed.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::Turtle(_) | Error::NQuads(_) | Error::JsonLd(_) | Error::Trig { .. }
        )
    }
}

/// Failure reported by a [`crate::DocumentLoader`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("could not fetch {uri}: HTTP status {status}")]
    Status { uri: String, status: u16 },

    #[error("could not fetch {uri}: {message}")]
    Transport { uri: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
