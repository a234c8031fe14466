//! Validation
//!
//! Two layers guard a document before it is written:
//!
//! - `Document::validate`: in-memory invariants of the model
//! - `SchemaValidator`: checks the markup node tree against a schema file
//!
//! Schema validation sits behind a trait so a full XSD engine can be
//! plugged in; `BuiltinSchema` covers the SVG subset this crate models.

pub mod schema;

pub use schema::BuiltinSchema;

use std::path::Path;

use crate::errors::{Result, SvgError};
use crate::models::{Circle, Component, Document, Rectangle, MAX_DEPTH};
use crate::parse::XmlNode;

/// Validates a markup node tree against a schema
pub trait SchemaValidator {
    /// # Errors
    /// * `SvgError::Input` - the schema path is unusable
    /// * `SvgError::SchemaViolation` - the tree does not conform
    fn validate(&self, root: &XmlNode, schema_path: &Path) -> Result<()>;
}

/// `true` when `path` ends in `.<extension>`, ignoring case
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case(extension))
}

fn check_attribute_names<C: Component>(component: &C) -> Result<()> {
    if component.attributes().iter().any(|attr| attr.name.is_empty()) {
        return Err(SvgError::Structural(format!("{} has an attribute without a name", C::KIND)));
    }
    Ok(())
}

pub(crate) fn check_rectangle(rect: &Rectangle) -> Result<()> {
    check_attribute_names(rect)?;
    if [rect.x, rect.y, rect.width, rect.height].iter().any(|v| !v.is_finite()) {
        return Err(SvgError::Structural(format!(
            "rectangle has non-finite geometry ({}, {}, {}x{})",
            rect.x, rect.y, rect.width, rect.height
        )));
    }
    if rect.units.is_invalid() {
        return Err(SvgError::Unit(format!("rectangle at ({}, {})", rect.x, rect.y)));
    }
    if rect.width < 0.0 || rect.height < 0.0 {
        return Err(SvgError::Structural(format!(
            "rectangle has negative size {}x{}",
            rect.width, rect.height
        )));
    }
    Ok(())
}

pub(crate) fn check_circle(circle: &Circle) -> Result<()> {
    check_attribute_names(circle)?;
    if [circle.cx, circle.cy, circle.r].iter().any(|v| !v.is_finite()) {
        return Err(SvgError::Structural(format!(
            "circle has non-finite geometry ({}, {}, r={})",
            circle.cx, circle.cy, circle.r
        )));
    }
    if circle.units.is_invalid() {
        return Err(SvgError::Unit(format!("circle at ({}, {})", circle.cx, circle.cy)));
    }
    if circle.r < 0.0 {
        return Err(SvgError::Structural(format!("circle has negative radius {}", circle.r)));
    }
    Ok(())
}

impl Document {
    /// Check the model invariants over the whole tree.
    ///
    /// Fails on an empty namespace, an attribute with an empty name, a shape
    /// with an unrecognized unit, non-finite geometry, a negative width,
    /// height or radius, or groups nested past `MAX_DEPTH`.
    pub fn validate(&self) -> Result<()> {
        if self.namespace.is_empty() {
            return Err(SvgError::Structural("document has no namespace".into()));
        }
        let depth = self.markup_depth();
        if depth > MAX_DEPTH {
            return Err(SvgError::Structural(format!(
                "markup would nest {} levels deep (limit {})",
                depth, MAX_DEPTH
            )));
        }
        if self.attributes.iter().any(|attr| attr.name.is_empty()) {
            return Err(SvgError::Structural("svg has an attribute without a name".into()));
        }

        self.rectangles.iter().try_for_each(check_rectangle)?;
        self.circles.iter().try_for_each(check_circle)?;
        self.paths.iter().try_for_each(check_attribute_names)?;

        for group in self.all_groups() {
            check_attribute_names(group)?;
            group.rectangles.iter().try_for_each(check_rectangle)?;
            group.circles.iter().try_for_each(check_circle)?;
            group.paths.iter().try_for_each(check_attribute_names)?;
        }

        log::debug!("document passed structural validation");
        Ok(())
    }
}
