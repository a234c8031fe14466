//! Core data structures for the SVG document model
//!
//! A `Document` owns ordered lists of shapes and groups; a `Group` owns
//! the same four lists recursively. Ownership is strictly hierarchical:
//! there are no shared or back references anywhere in the tree.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::elements::{AttributeSet, Circle, Component, ElementKind, Path, Rectangle};

/// Namespace written for documents created from scratch
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Deepest element nesting accepted in markup, counting `<svg>` as 1.
///
/// The reader refuses deeper markup and `Document::validate` refuses trees
/// whose markup would be deeper, so the derived `Clone`, `PartialEq`, serde
/// impls, `Drop` and `Display`, which recurse per group level, stay shallow.
pub const MAX_DEPTH: usize = 128;

/// `<g>` container; owns its children exclusively
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Group {
    pub attributes: AttributeSet,
    pub rectangles: Vec<Rectangle>,
    pub circles: Vec<Circle>,
    pub paths: Vec<Path>,
    pub groups: Vec<Group>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of direct children of any kind
    pub fn len(&self) -> usize {
        self.rectangles.len() + self.circles.len() + self.paths.len() + self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Component for Group {
    const KIND: ElementKind = ElementKind::Group;

    fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut AttributeSet {
        &mut self.attributes
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nGroup start\n")?;
        writeln!(f, "Attributes: {}", self.attributes)?;
        write!(f, "Rectangles: ")?;
        for rect in &self.rectangles {
            write!(f, "{}", rect)?;
        }
        write!(f, "\n\nCircles: ")?;
        for circle in &self.circles {
            write!(f, "{}", circle)?;
        }
        write!(f, "\n\nPaths: ")?;
        for path in &self.paths {
            write!(f, "{}", path)?;
        }
        write!(f, "\n\nGroups: ")?;
        for group in &self.groups {
            write!(f, "{}", group)?;
        }
        writeln!(f, "\n\nGroup end")
    }
}

/// Root aggregate for an entire SVG file
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub namespace: String,
    pub title: String,
    pub description: String,
    pub attributes: AttributeSet,
    pub rectangles: Vec<Rectangle>,
    pub circles: Vec<Circle>,
    pub paths: Vec<Path>,
    pub groups: Vec<Group>,
}

impl Document {
    /// Create an empty document in the given namespace
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Length of the top-level list addressed by `kind`
    ///
    /// `ElementKind::Svg` addresses the document itself and always has length 1.
    pub fn top_level_len(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Svg => 1,
            ElementKind::Rectangle => self.rectangles.len(),
            ElementKind::Circle => self.circles.len(),
            ElementKind::Path => self.paths.len(),
            ElementKind::Group => self.groups.len(),
        }
    }

    /// All groups at any depth, pre-order, in document order
    pub fn all_groups(&self) -> GroupWalk<'_> {
        GroupWalk::new(&self.groups)
    }

    /// Element nesting of the markup this document serializes to,
    /// counting `<svg>` as 1
    pub fn markup_depth(&self) -> usize {
        let has_leaves = !self.title.is_empty()
            || !self.description.is_empty()
            || !self.rectangles.is_empty()
            || !self.circles.is_empty()
            || !self.paths.is_empty();
        let mut deepest = if has_leaves || !self.groups.is_empty() { 2 } else { 1 };

        let mut stack: Vec<(&Group, usize)> = self.groups.iter().map(|g| (g, 2)).collect();
        while let Some((group, depth)) = stack.pop() {
            let shapes = group.rectangles.len() + group.circles.len() + group.paths.len();
            deepest = deepest.max(if shapes > 0 { depth + 1 } else { depth });
            stack.extend(group.groups.iter().map(|g| (g, depth + 1)));
        }
        deepest
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn or_none(s: &str) -> &str {
            if s.is_empty() {
                "none"
            } else {
                s
            }
        }

        writeln!(f, "namespace: {}", or_none(&self.namespace))?;
        writeln!(f, "title: {}", or_none(&self.title))?;
        writeln!(f, "description: {}", or_none(&self.description))?;
        writeln!(f, "\nsvg attributes: {}", self.attributes)?;

        writeln!(f, "\nrectangles: ")?;
        if self.rectangles.is_empty() {
            write!(f, "none")?;
        }
        for rect in &self.rectangles {
            write!(f, "{}", rect)?;
        }

        writeln!(f, "\n\ncircles: ")?;
        if self.circles.is_empty() {
            write!(f, "none")?;
        }
        for circle in &self.circles {
            write!(f, "{}", circle)?;
        }

        writeln!(f, "\n\npaths: ")?;
        if self.paths.is_empty() {
            write!(f, "none")?;
        }
        for path in &self.paths {
            write!(f, "{}", path)?;
        }

        writeln!(f, "\n\n-------\nGroups: ")?;
        if self.groups.is_empty() {
            write!(f, "none")?;
        }
        for group in &self.groups {
            write!(f, "{}", group)?;
        }
        writeln!(f)
    }
}

/// Shared shape lists of the document root and of every group
pub trait ShapeContainer {
    fn rectangles(&self) -> &[Rectangle];
    fn circles(&self) -> &[Circle];
    fn paths(&self) -> &[Path];
    fn groups(&self) -> &[Group];

    fn rectangles_mut(&mut self) -> &mut Vec<Rectangle>;
    fn circles_mut(&mut self) -> &mut Vec<Circle>;
    fn paths_mut(&mut self) -> &mut Vec<Path>;
    fn groups_mut(&mut self) -> &mut Vec<Group>;
}

macro_rules! impl_shape_container {
    ($ty:ty) => {
        impl ShapeContainer for $ty {
            fn rectangles(&self) -> &[Rectangle] {
                &self.rectangles
            }
            fn circles(&self) -> &[Circle] {
                &self.circles
            }
            fn paths(&self) -> &[Path] {
                &self.paths
            }
            fn groups(&self) -> &[Group] {
                &self.groups
            }
            fn rectangles_mut(&mut self) -> &mut Vec<Rectangle> {
                &mut self.rectangles
            }
            fn circles_mut(&mut self) -> &mut Vec<Circle> {
                &mut self.circles
            }
            fn paths_mut(&mut self) -> &mut Vec<Path> {
                &mut self.paths
            }
            fn groups_mut(&mut self) -> &mut Vec<Group> {
                &mut self.groups
            }
        }
    };
}

impl_shape_container!(Document);
impl_shape_container!(Group);

/// Pre-order iterator over a forest of groups, driven by an explicit stack
pub struct GroupWalk<'a> {
    stack: Vec<&'a Group>,
}

impl<'a> GroupWalk<'a> {
    pub fn new(roots: &'a [Group]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for GroupWalk<'a> {
    type Item = &'a Group;

    fn next(&mut self) -> Option<Self::Item> {
        let group = self.stack.pop()?;
        self.stack.extend(group.groups.iter().rev());
        Some(group)
    }
}

/// Borrowed view of any entity in the tree
///
/// Gives traversal and serialization one uniform handle over the four
/// element kinds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ElementRef<'a> {
    Rectangle(&'a Rectangle),
    Circle(&'a Circle),
    Path(&'a Path),
    Group(&'a Group),
}

impl<'a> ElementRef<'a> {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementRef::Rectangle(_) => ElementKind::Rectangle,
            ElementRef::Circle(_) => ElementKind::Circle,
            ElementRef::Path(_) => ElementKind::Path,
            ElementRef::Group(_) => ElementKind::Group,
        }
    }

    pub fn attributes(&self) -> &'a AttributeSet {
        match self {
            ElementRef::Rectangle(rect) => &rect.attributes,
            ElementRef::Circle(circle) => &circle.attributes,
            ElementRef::Path(path) => &path.attributes,
            ElementRef::Group(group) => &group.attributes,
        }
    }

    pub fn as_rectangle(&self) -> Option<&'a Rectangle> {
        match self {
            ElementRef::Rectangle(rect) => Some(rect),
            _ => None,
        }
    }

    pub fn as_circle(&self) -> Option<&'a Circle> {
        match self {
            ElementRef::Circle(circle) => Some(circle),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&'a Path> {
        match self {
            ElementRef::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&'a Group> {
        match self {
            ElementRef::Group(group) => Some(group),
            _ => None,
        }
    }
}
