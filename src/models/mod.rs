//! Models module for the SVG document editor
//!
//! This module contains the document tree (document, groups, shapes,
//! attributes) and the unit handling shared by every numeric field.

pub mod core;
pub mod elements;
pub mod units;

// Re-export commonly used types
pub use self::core::*;
pub use self::elements::*;
pub use self::units::{extract_magnitude, extract_unit, Measurement, Unit};
