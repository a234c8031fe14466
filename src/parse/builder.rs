//! Document builder
//!
//! Converts a generic `XmlNode` tree into the SVG document model.
//!
//! # Recognized elements
//!
//! Names are matched case-insensitively:
//! - `svg` (root only): namespace, attributes
//! - `title` / `desc`: document metadata, outside of any group
//! - `g`: group, children collected recursively
//! - `rect` / `circle` / `path`: shape leaves
//!
//! Every other element is dropped, but its children are still visited and
//! land in the nearest enclosing group (or the document). Namespace
//! declarations of a dropped element move to that same group or document
//! so prefixed attributes below it stay resolvable.

use crate::errors::{Result, SvgError};
use crate::models::{
    Attribute, AttributeSet, Circle, Document, Group, Measurement, Path, Rectangle, ShapeContainer,
    Unit,
};
use super::node::XmlNode;

/// One level of the traversal: remaining siblings, plus the group this
/// level opened (if it was a `<g>`).
struct Frame<'a> {
    pending: std::slice::Iter<'a, XmlNode>,
    group: Option<Group>,
}

/// Build a document from a parsed node tree.
///
/// Fails if the root element is not `svg`.
pub fn build_document(root: &XmlNode) -> Result<Document> {
    if !root.is("svg") {
        return Err(SvgError::Parse(format!(
            "Expected <svg> root element, found <{}>",
            root.name
        )));
    }

    let mut doc = Document::new(root.namespace.clone().unwrap_or_default());
    doc.attributes = root.attributes.iter().cloned().collect();

    let mut stack = vec![Frame {
        pending: root.children.iter(),
        group: None,
    }];

    loop {
        let Some(frame) = stack.last_mut() else { break };

        let Some(node) = frame.pending.next() else {
            if let Some(group) = stack.pop().and_then(|f| f.group) {
                container(&mut doc, &mut stack).groups_mut().push(group);
            }
            continue;
        };

        let group = if node.is("g") {
            Some(Group {
                attributes: node.attributes.iter().cloned().collect(),
                ..Group::default()
            })
        } else {
            visit_leaf(node, &mut doc, &mut stack);
            None
        };

        stack.push(Frame {
            pending: node.children.iter(),
            group,
        });
    }

    log::debug!(
        "built document: {} rects, {} circles, {} paths, {} groups at top level",
        doc.rectangles.len(),
        doc.circles.len(),
        doc.paths.len(),
        doc.groups.len()
    );

    Ok(doc)
}

/// Handle any non-group element; its children are visited by the caller.
fn visit_leaf(node: &XmlNode, doc: &mut Document, stack: &mut [Frame<'_>]) {
    let in_group = stack.iter().any(|f| f.group.is_some());

    if node.is("rect") {
        container(doc, stack).rectangles_mut().push(build_rectangle(node));
    } else if node.is("circle") {
        container(doc, stack).circles_mut().push(build_circle(node));
    } else if node.is("path") {
        container(doc, stack).paths_mut().push(build_path(node));
    } else {
        hoist_namespaces(node, doc, stack);
        visit_dropped(node, doc, in_group);
    }
}

/// Metadata elements are read into the document; anything else is skipped.
fn visit_dropped(node: &XmlNode, doc: &mut Document, in_group: bool) {
    if node.is("title") && !in_group {
        doc.title = node.text.clone().unwrap_or_default();
    } else if node.is("desc") && !in_group {
        doc.description = node.text.clone().unwrap_or_default();
    } else {
        log::debug!("skipping <{}>, descending into its children", node.name);
    }
}

/// Re-declare the namespaces of a dropped element on the innermost open
/// group, or the document, unless that scope already resolves them.
fn hoist_namespaces(node: &XmlNode, doc: &mut Document, stack: &mut [Frame<'_>]) {
    let pending: Vec<Attribute> = node
        .attributes
        .iter()
        .filter(|decl| decl.is_namespace_declaration())
        .filter(|decl| {
            let in_scope = stack
                .iter()
                .rev()
                .filter_map(|f| f.group.as_ref())
                .map(|g| &g.attributes)
                .chain(std::iter::once(&doc.attributes))
                .find_map(|attrs| attrs.get(&decl.name));
            in_scope != Some(decl.value.as_str())
        })
        .cloned()
        .collect();

    if pending.is_empty() {
        return;
    }

    let target = match stack.iter_mut().rev().find_map(|f| f.group.as_mut()) {
        Some(group) => &mut group.attributes,
        None => &mut doc.attributes,
    };
    for decl in pending {
        if let Some(existing) = target.get(&decl.name) {
            log::warn!(
                "<{}> redeclares {}='{}' inside a scope bound to '{}'",
                node.name,
                decl.name,
                decl.value,
                existing
            );
            continue;
        }
        target.insert_declaration(decl);
    }
}

/// Innermost open group, or the document when no group is open
fn container<'s>(doc: &'s mut Document, stack: &'s mut [Frame<'_>]) -> &'s mut dyn ShapeContainer {
    match stack.iter_mut().rev().find_map(|f| f.group.as_mut()) {
        Some(group) => group as &mut dyn ShapeContainer,
        None => doc as &mut dyn ShapeContainer,
    }
}

/// Record the first non-empty unit seen on a shape
fn adopt_unit(current: &mut Unit, found: Unit, raw: &str) {
    if found.is_invalid() {
        log::warn!("unrecognized unit in numeric value '{}'", raw);
    }
    if current.is_none() && !found.is_none() {
        *current = found;
    }
}

fn build_rectangle(node: &XmlNode) -> Rectangle {
    let mut rect = Rectangle::default();
    let mut others = AttributeSet::new();

    for attr in &node.attributes {
        let field = match attr.name.to_ascii_lowercase().as_str() {
            "x" => &mut rect.x,
            "y" => &mut rect.y,
            "width" => &mut rect.width,
            "height" => &mut rect.height,
            _ => {
                others.push(attr.clone());
                continue;
            }
        };
        let measurement = Measurement::parse(&attr.value);
        *field = measurement.magnitude;
        adopt_unit(&mut rect.units, measurement.unit, &attr.value);
    }

    rect.attributes = others;
    rect
}

fn build_circle(node: &XmlNode) -> Circle {
    let mut circle = Circle::default();
    let mut others = AttributeSet::new();

    for attr in &node.attributes {
        let field = match attr.name.to_ascii_lowercase().as_str() {
            "cx" => &mut circle.cx,
            "cy" => &mut circle.cy,
            "r" => &mut circle.r,
            _ => {
                others.push(attr.clone());
                continue;
            }
        };
        let measurement = Measurement::parse(&attr.value);
        *field = measurement.magnitude;
        adopt_unit(&mut circle.units, measurement.unit, &attr.value);
    }

    circle.attributes = others;
    circle
}

fn build_path(node: &XmlNode) -> Path {
    let mut path = Path::default();

    for attr in &node.attributes {
        if attr.name.eq_ignore_ascii_case("d") {
            path.data = attr.value.clone();
        } else {
            path.attributes.push(Attribute::new(attr.name.clone(), attr.value.clone()));
        }
    }

    path
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
