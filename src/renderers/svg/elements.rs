//! Shape and group elements → markup nodes

use crate::models::{AttributeSet, Circle, ElementRef, Group, Path, Rectangle, Unit};
use crate::parse::XmlNode;

/// Conversion of a model entity into a markup node
pub trait ToNode {
    fn to_node(&self) -> XmlNode;
}

/// Fixed-point value with six fractional digits, then the unit suffix
pub fn format_length(value: f64, unit: Unit) -> String {
    format!("{:.6}{}", value, unit)
}

fn with_own_attributes(mut node: XmlNode, attributes: &AttributeSet) -> XmlNode {
    node.attributes.extend(attributes.iter().cloned());
    node
}

impl ToNode for Rectangle {
    fn to_node(&self) -> XmlNode {
        let node = XmlNode::new("rect")
            .with_attribute("x", format_length(self.x, self.units))
            .with_attribute("y", format_length(self.y, self.units))
            .with_attribute("width", format_length(self.width, self.units))
            .with_attribute("height", format_length(self.height, self.units));
        with_own_attributes(node, &self.attributes)
    }
}

impl ToNode for Circle {
    fn to_node(&self) -> XmlNode {
        let node = XmlNode::new("circle")
            .with_attribute("cx", format_length(self.cx, self.units))
            .with_attribute("cy", format_length(self.cy, self.units))
            .with_attribute("r", format_length(self.r, self.units));
        with_own_attributes(node, &self.attributes)
    }
}

impl ToNode for Path {
    fn to_node(&self) -> XmlNode {
        let node = XmlNode::new("path").with_attribute("d", self.data.clone());
        with_own_attributes(node, &self.attributes)
    }
}

impl ToNode for Group {
    fn to_node(&self) -> XmlNode {
        assemble(group_shell(self), &self.groups)
    }
}

impl<'a> ToNode for ElementRef<'a> {
    fn to_node(&self) -> XmlNode {
        match self {
            ElementRef::Rectangle(rect) => rect.to_node(),
            ElementRef::Circle(circle) => circle.to_node(),
            ElementRef::Path(path) => path.to_node(),
            ElementRef::Group(group) => group.to_node(),
        }
    }
}

/// `<g>` node with attributes and shape children, but without subgroups
fn group_shell(group: &Group) -> XmlNode {
    let mut node = with_own_attributes(XmlNode::new("g"), &group.attributes);
    push_shapes(&mut node, &group.rectangles, &group.circles, &group.paths);
    node
}

pub(super) fn push_shapes(node: &mut XmlNode, rectangles: &[Rectangle], circles: &[Circle], paths: &[Path]) {
    node.children.extend(rectangles.iter().map(ToNode::to_node));
    node.children.extend(circles.iter().map(ToNode::to_node));
    node.children.extend(paths.iter().map(ToNode::to_node));
}

struct Frame<'a> {
    pending: std::slice::Iter<'a, Group>,
    node: XmlNode,
}

/// Append `groups` (recursively) to `shell` after its existing children.
///
/// Uses an explicit stack of open ancestors; a group node is folded into
/// its parent once its own subgroups are exhausted.
pub(super) fn assemble(shell: XmlNode, groups: &[Group]) -> XmlNode {
    let mut ancestors: Vec<Frame<'_>> = Vec::new();
    let mut current = Frame {
        pending: groups.iter(),
        node: shell,
    };

    loop {
        if let Some(group) = current.pending.next() {
            let child = Frame {
                pending: group.groups.iter(),
                node: group_shell(group),
            };
            ancestors.push(std::mem::replace(&mut current, child));
            continue;
        }

        match ancestors.pop() {
            Some(mut parent) => {
                parent.node.children.push(current.node);
                current = parent;
            }
            None => return current.node,
        }
    }
}
