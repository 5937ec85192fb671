//! Linked data related stuff: the grammar-level readers used by the dataset.
//!
//! - [`turtle`]: Turtle documents, resolved into owned [`Statement`]s.
//! - [`nquads`]: line based N-Quads.
//! - [`jsonld`]: a JSON-LD to RDF processor.
//!
//! ```
//! use ld_parser::TurtleDoc;
//!
//! let doc = TurtleDoc::with_base(
//!     "http://example.org/",
//!     r#"@prefix foaf: <http://xmlns.com/foaf/0.1/> .
//!     <#me> foaf:name "Test" ."#,
//! )
//! .unwrap();
//! assert_eq!(1, doc.len());
//! ```

pub mod grammar;
pub mod jsonld;
pub mod nquads;
mod prelude;
pub mod shared;
mod triple_common_parser;
pub mod turtle;

pub use shared::{Node, Statement};
pub use turtle::turtle_doc::{TurtleDoc, TurtleDocError};
