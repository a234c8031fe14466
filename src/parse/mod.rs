//! Parsing module for the SVG document editor
//!
//! Markup text is read into a generic node tree, and the node tree is
//! built into the document model:
//!
//! ```text
//! SVG markup
//!   ↓ [roxmltree]
//! XmlNode tree
//!   ↓ [builder]
//! Document
//! ```

pub mod builder;
pub mod markup;
pub mod node;

pub use builder::build_document;
pub use markup::parse_markup;
pub use node::XmlNode;

use crate::errors::Result;
use crate::models::Document;

/// Parse SVG markup straight into a document
pub fn parse_svg(markup: &str) -> Result<Document> {
    let root = parse_markup(markup)?;
    build_document(&root)
}
