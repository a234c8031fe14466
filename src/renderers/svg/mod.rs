//! SVG markup output
//!
//! The serializer turns a `Document` back into a generic node tree, and the
//! writer turns any node tree into markup text.

pub mod document;
pub mod elements;
pub mod writer;

pub use document::document_to_node;
pub use elements::{format_length, ToNode};
pub use writer::to_markup;

use crate::config::MarkupSettings;
use crate::errors::Result;
use crate::models::Document;

/// Serialize a document to SVG markup text
pub fn render_document(doc: &Document, settings: Option<MarkupSettings>) -> Result<String> {
    to_markup(&document_to_node(doc), settings)
}
