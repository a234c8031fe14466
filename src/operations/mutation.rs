//! In-place mutation of a document
//!
//! Every operation either applies completely or leaves the document
//! untouched: all checks run before the first write.

use crate::errors::{Result, SvgError};
use crate::models::{
    Attribute, Circle, Component, Document, ElementKind, Group, Measurement, Rectangle, Shape, Unit,
};
use crate::validation;

/// Geometric field of a rectangle or circle addressed by name
enum NumericField {
    X,
    Y,
    Width,
    Height,
    Cx,
    Cy,
    R,
}

impl NumericField {
    fn of_rectangle(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "x" => Some(NumericField::X),
            "y" => Some(NumericField::Y),
            "width" => Some(NumericField::Width),
            "height" => Some(NumericField::Height),
            _ => None,
        }
    }

    fn of_circle(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "cx" => Some(NumericField::Cx),
            "cy" => Some(NumericField::Cy),
            "r" => Some(NumericField::R),
            _ => None,
        }
    }
}

/// Split a new numeric value, refusing unrecognized unit suffixes
fn checked_measurement(value: &str) -> Result<Measurement> {
    let measurement = Measurement::parse(value);
    if measurement.unit.is_invalid() {
        return Err(SvgError::Unit(value.to_string()));
    }
    Ok(measurement)
}

/// A value written into an existing shape keeps the shape's unit unless it
/// has none yet.
fn adopt_unit(current: &mut Unit, found: Unit) {
    if current.is_none() {
        *current = found;
    }
}

impl Document {
    /// Set or update one attribute of the document or of a top-level entity.
    ///
    /// `index` addresses the top-level list of `kind` and is ignored for
    /// `ElementKind::Svg`. Geometric names overwrite the dedicated field;
    /// any other name is upserted into the entity's attribute set.
    pub fn set_attribute(&mut self, kind: ElementKind, index: usize, attribute: Attribute) -> Result<()> {
        if attribute.name.is_empty() {
            return Err(SvgError::Structural("attribute name must not be empty".into()));
        }

        let len = self.top_level_len(kind);
        if kind != ElementKind::Svg && index >= len {
            return Err(SvgError::Bounds { kind, index, len });
        }

        match kind {
            ElementKind::Svg => self.set_own_attribute(attribute),
            ElementKind::Rectangle => set_rectangle_attribute(&mut self.rectangles[index], attribute)?,
            ElementKind::Circle => set_circle_attribute(&mut self.circles[index], attribute)?,
            ElementKind::Path => {
                let path = &mut self.paths[index];
                if attribute.name.eq_ignore_ascii_case("d") {
                    path.data = attribute.value;
                } else {
                    upsert(path, attribute);
                }
            }
            ElementKind::Group => upsert(&mut self.groups[index], attribute),
        }

        log::info!("set attribute on {} {}", kind, index);
        Ok(())
    }

    fn set_own_attribute(&mut self, attribute: Attribute) {
        match attribute.name.to_ascii_lowercase().as_str() {
            "namespace" | "xmlns" => self.namespace = attribute.value,
            "title" => self.title = attribute.value,
            "description" | "desc" => self.description = attribute.value,
            _ => {
                self.attributes.upsert(attribute);
            }
        }
    }

    /// Multiply every rectangle's width and height, or every circle's
    /// radius, at every depth.
    ///
    /// Any factor is accepted, including zero and negative values. Returns
    /// the number of shapes scaled.
    pub fn scale(&mut self, kind: ElementKind, factor: f64) -> Result<usize> {
        let scaled = match kind {
            ElementKind::Rectangle => {
                let rects = self.all_rectangles_mut();
                let count = rects.len();
                for rect in rects {
                    rect.width *= factor;
                    rect.height *= factor;
                }
                count
            }
            ElementKind::Circle => {
                let circles = self.all_circles_mut();
                let count = circles.len();
                for circle in circles {
                    circle.r *= factor;
                }
                count
            }
            other => {
                return Err(SvgError::Unsupported(format!("cannot scale {} elements", other)));
            }
        };

        log::info!("scaled {} {} element(s) by {}", scaled, kind, factor);
        Ok(scaled)
    }

    /// Append a shape to the document's own top-level list.
    ///
    /// Groups are never touched. The shape is checked first: an invalid
    /// unit, non-finite geometry or a negative size is refused.
    pub fn add_component(&mut self, shape: impl Into<Shape>) -> Result<()> {
        let shape = shape.into();
        check_shape(&shape)?;

        let kind = shape.kind();
        match shape {
            Shape::Rectangle(rect) => self.rectangles.push(rect),
            Shape::Circle(circle) => self.circles.push(circle),
            Shape::Path(path) => self.paths.push(path),
        }

        log::info!("added {} at top level", kind);
        Ok(())
    }

    /// Mutable handles on every rectangle, top level first, then groups in
    /// pre-order.
    pub fn all_rectangles_mut(&mut self) -> Vec<&mut Rectangle> {
        let mut found: Vec<&mut Rectangle> = self.rectangles.iter_mut().collect();
        let mut stack: Vec<&mut Group> = self.groups.iter_mut().rev().collect();
        while let Some(Group { rectangles, groups, .. }) = stack.pop() {
            found.extend(rectangles.iter_mut());
            stack.extend(groups.iter_mut().rev());
        }
        found
    }

    pub fn all_circles_mut(&mut self) -> Vec<&mut Circle> {
        let mut found: Vec<&mut Circle> = self.circles.iter_mut().collect();
        let mut stack: Vec<&mut Group> = self.groups.iter_mut().rev().collect();
        while let Some(Group { circles, groups, .. }) = stack.pop() {
            found.extend(circles.iter_mut());
            stack.extend(groups.iter_mut().rev());
        }
        found
    }
}

fn upsert<C: Component>(target: &mut C, attribute: Attribute) {
    if target.attributes_mut().upsert(attribute) {
        log::debug!("updated existing {} attribute", C::KIND);
    }
}

fn set_rectangle_attribute(rect: &mut Rectangle, attribute: Attribute) -> Result<()> {
    let Some(field) = NumericField::of_rectangle(&attribute.name) else {
        upsert(rect, attribute);
        return Ok(());
    };

    let measurement = checked_measurement(&attribute.value)?;
    let slot = match field {
        NumericField::X => &mut rect.x,
        NumericField::Y => &mut rect.y,
        NumericField::Width => &mut rect.width,
        _ => &mut rect.height,
    };
    *slot = measurement.magnitude;
    adopt_unit(&mut rect.units, measurement.unit);
    Ok(())
}

fn set_circle_attribute(circle: &mut Circle, attribute: Attribute) -> Result<()> {
    let Some(field) = NumericField::of_circle(&attribute.name) else {
        upsert(circle, attribute);
        return Ok(());
    };

    let measurement = checked_measurement(&attribute.value)?;
    let slot = match field {
        NumericField::Cx => &mut circle.cx,
        NumericField::Cy => &mut circle.cy,
        _ => &mut circle.r,
    };
    *slot = measurement.magnitude;
    adopt_unit(&mut circle.units, measurement.unit);
    Ok(())
}

fn check_shape(shape: &Shape) -> Result<()> {
    match shape {
        Shape::Rectangle(rect) => validation::check_rectangle(rect),
        Shape::Circle(circle) => validation::check_circle(circle),
        Shape::Path(_) => Ok(()),
    }
}

#[cfg(test)]
#[path = "mutation_tests.rs"]
mod tests;
