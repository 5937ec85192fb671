//! In-memory RDF datasets, read from and written to TriG, JSON-LD and
//! N-Quads.
//!
//! ```
//! use ld_dataset::{Dataset, Term};
//!
//! let mut dataset = Dataset::new("http://example.org/");
//! dataset
//!     .parse("<g> { <a> <b> <c> . }".as_bytes(), "application/trig")
//!     .unwrap();
//! let graph = Term::resource("http://example.org/g");
//! assert_eq!(1, dataset.get_graph(Some(&graph)).len());
//! assert_eq!(
//!     "<http://example.org/a> <http://example.org/b> <http://example.org/c> <http://example.org/g> .\n",
//!     dataset.to_string()
//! );
//! ```

mod config;
mod dataset;
mod error;
pub mod format;
mod graph;
mod jsonld;
pub mod loader;
mod nquads;
mod quad;
mod term;
mod trig;
mod turtle;

pub use config::DatasetConfig;
pub use dataset::{Dataset, ParseReport};
pub use error::{Error, FetchError, Result};
pub use format::{mime_for_extension, Format, RDF_EXTENSIONS};
pub use graph::Graph;
pub use loader::{DocumentLoader, RemoteDocument};
pub use quad::{Quad, Triple};
pub use term::{Literal, Term};
pub use trig::DroppedGroup;
