//! Format converters
//!
//! Conversions between the document model and the compact JSON form used
//! by the JavaScript front end.

pub mod interchange;

pub use interchange::{
    circle_from_json, document_from_json, list_to_json, rect_from_json, shape_from_json,
    top_level_attributes_json, ToRecord,
};
