//! Renderers module
//!
//! Output formats for a document. Markup (SVG/XML) is the only one; the
//! compact JSON form lives in `converters::interchange`.

pub mod svg;

pub use svg::{document_to_node, render_document, to_markup, ToNode};
