//! Error types for SVG document operations
//!
//! One error hierarchy covers the whole pipeline: input checks, markup parsing,
//! schema validation, mutation bounds, unit validation and structural checks.

use thiserror::Error;

use crate::models::ElementKind;

/// Top-level error type for every fallible operation in the crate
#[derive(Debug, Error)]
pub enum SvgError {
    /// Missing/empty file path or wrong file extension
    #[error("Invalid input: {0}")]
    Input(String),

    /// Markup is malformed or does not describe an SVG document
    #[error("SVG parsing failed: {0}")]
    Parse(String),

    /// Node tree rejected by the schema validator
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Mutation index outside the addressed top-level list
    #[error("{kind} index {index} out of bounds (length {len})")]
    Bounds {
        kind: ElementKind,
        index: usize,
        len: usize,
    },

    /// Numeric value carries an unrecognized unit suffix
    #[error("Unrecognized unit in value '{0}'")]
    Unit(String),

    /// An entity violates a structural invariant of the model
    #[error("Structural error: {0}")]
    Structural(String),

    /// Operation is not defined for the requested element kind
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Node tree could not be written as markup
    #[error("Markup writing failed: {0}")]
    Write(String),

    /// Interchange text could not be decoded
    #[error("Interchange decoding failed: {0}")]
    Interchange(#[from] serde_json::Error),

    /// File access failed in the workflow wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SvgError>;
