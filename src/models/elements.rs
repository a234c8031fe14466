//! Element types for the SVG document model
//!
//! This module defines the shape leaves (rectangle, circle, path), the
//! attribute set every entity carries, and the element kind enumeration
//! used to address entities from the API.

use serde::{Deserialize, Serialize};
use std::fmt;
use wasm_bindgen::prelude::*;

use super::units::Unit;

/// Enumeration of addressable element kinds
///
/// The numeric values match the kind codes used by the JavaScript front end.
#[wasm_bindgen]
#[repr(u8)]
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// The document root itself
    Svg = 0,
    Circle = 1,
    Rectangle = 2,
    Path = 3,
    Group = 4,
}

impl ElementKind {
    pub fn from_u8(value: u8) -> Option<ElementKind> {
        match value {
            0 => Some(ElementKind::Svg),
            1 => Some(ElementKind::Circle),
            2 => Some(ElementKind::Rectangle),
            3 => Some(ElementKind::Path),
            4 => Some(ElementKind::Group),
            _ => None,
        }
    }

    /// Element name used in markup
    pub fn tag_name(&self) -> &'static str {
        match self {
            ElementKind::Svg => "svg",
            ElementKind::Circle => "circle",
            ElementKind::Rectangle => "rect",
            ElementKind::Path => "path",
            ElementKind::Group => "g",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Svg => "svg",
            ElementKind::Circle => "circle",
            ElementKind::Rectangle => "rectangle",
            ElementKind::Path => "path",
            ElementKind::Group => "group",
        };
        f.write_str(name)
    }
}

/// A name/value pair not covered by an entity's dedicated fields
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// `xmlns:prefix` declaration
    pub fn is_namespace_declaration(&self) -> bool {
        self.name.starts_with("xmlns:")
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}, ", self.name, self.value)
    }
}

/// Ordered attribute list; insertion order is preserved
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct AttributeSet(Vec<Attribute>);

impl AttributeSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Append without checking for an existing name
    pub fn push(&mut self, attribute: Attribute) {
        self.0.push(attribute);
    }

    /// Insert a namespace declaration after the declarations already leading
    /// the set, ahead of the ordinary attributes.
    pub fn insert_declaration(&mut self, declaration: Attribute) {
        let at = self
            .0
            .iter()
            .take_while(|attr| attr.is_namespace_declaration())
            .count();
        self.0.insert(at, declaration);
    }

    /// Update the value in place if the name exists, else append.
    ///
    /// Returns `true` when an existing attribute was updated.
    pub fn upsert(&mut self, attribute: Attribute) -> bool {
        match self.0.iter_mut().find(|attr| attr.name == attribute.name) {
            Some(existing) => {
                existing.value = attribute.value;
                true
            }
            None => {
                self.0.push(attribute);
                false
            }
        }
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        for attr in &self.0 {
            write!(f, "{}", attr)?;
        }
        Ok(())
    }
}

/// `<rect>` leaf
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Shared by all four numeric fields
    pub units: Unit,
    pub attributes: AttributeSet,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64, units: Unit) -> Self {
        Self {
            x,
            y,
            width,
            height,
            units,
            attributes: AttributeSet::new(),
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "x: {:.2}", self.x)?;
        writeln!(f, "y: {:.2}", self.y)?;
        writeln!(f, "width: {:.2}", self.width)?;
        writeln!(f, "height: {:.2}", self.height)?;
        writeln!(f, "units: {}", self.units)?;
        writeln!(f, "Attributes: {}", self.attributes)
    }
}

/// `<circle>` leaf
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    /// Shared by all three numeric fields
    pub units: Unit,
    pub attributes: AttributeSet,
}

impl Circle {
    pub fn new(cx: f64, cy: f64, r: f64, units: Unit) -> Self {
        Self {
            cx,
            cy,
            r,
            units,
            attributes: AttributeSet::new(),
        }
    }

    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.r * self.r
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cx: {:.2}", self.cx)?;
        writeln!(f, "cy: {:.2}", self.cy)?;
        writeln!(f, "r: {:.2}", self.r)?;
        writeln!(f, "units: {}", self.units)?;
        writeln!(f, "Attributes: {}", self.attributes)
    }
}

/// `<path>` leaf; the `d` data is kept opaque
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Path {
    pub data: String,
    pub attributes: AttributeSet,
}

impl Path {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            attributes: AttributeSet::new(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "data: {}", self.data)?;
        writeln!(f, "attributes: {}", self.attributes)
    }
}

/// Capabilities shared by every entity kind in the tree
pub trait Component {
    const KIND: ElementKind;

    fn attributes(&self) -> &AttributeSet;
    fn attributes_mut(&mut self) -> &mut AttributeSet;
}

macro_rules! impl_component {
    ($ty:ty, $kind:expr) => {
        impl Component for $ty {
            const KIND: ElementKind = $kind;

            fn attributes(&self) -> &AttributeSet {
                &self.attributes
            }

            fn attributes_mut(&mut self) -> &mut AttributeSet {
                &mut self.attributes
            }
        }
    };
}

impl_component!(Rectangle, ElementKind::Rectangle);
impl_component!(Circle, ElementKind::Circle);
impl_component!(Path, ElementKind::Path);

/// A shape that can be appended to a document with `add_component`
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
    Path(Path),
}

impl Shape {
    pub fn kind(&self) -> ElementKind {
        match self {
            Shape::Rectangle(_) => ElementKind::Rectangle,
            Shape::Circle(_) => ElementKind::Circle,
            Shape::Path(_) => ElementKind::Path,
        }
    }
}

impl From<Rectangle> for Shape {
    fn from(rect: Rectangle) -> Self {
        Shape::Rectangle(rect)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Path> for Shape {
    fn from(path: Path) -> Self {
        Shape::Path(path)
    }
}
