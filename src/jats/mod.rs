//! JATS article parsing and the document tree model.

mod document;
mod parser;

pub use document::{Descendants, Document, Node, NodeId};
pub use parser::{parse_document, parse_file};
