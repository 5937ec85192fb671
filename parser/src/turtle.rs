//! https://www.w3.org/TR/turtle

pub mod ast_struct;
pub(crate) mod ast_parser;
pub mod turtle_doc;
