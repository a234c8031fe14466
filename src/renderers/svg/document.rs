//! Document → `<svg>` node tree
//!
//! Inverse of the document builder. Child order on the root is fixed:
//! `title`, `desc`, rectangles, circles, paths, groups. The document's own
//! attributes go on the `<svg>` element itself.

use crate::models::Document;
use crate::parse::XmlNode;

use super::elements::{assemble, push_shapes};

/// Rebuild the markup node tree for `doc`
pub fn document_to_node(doc: &Document) -> XmlNode {
    let mut root = XmlNode::new("svg");
    if !doc.namespace.is_empty() {
        root.namespace = Some(doc.namespace.clone());
    }

    if !doc.title.is_empty() {
        root.push_child(XmlNode::new("title").with_text(doc.title.clone()));
    }
    if !doc.description.is_empty() {
        root.push_child(XmlNode::new("desc").with_text(doc.description.clone()));
    }

    root.attributes.extend(doc.attributes.iter().cloned());
    push_shapes(&mut root, &doc.rectangles, &doc.circles, &doc.paths);

    assemble(root, &doc.groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attribute, Circle, Group, Path, Rectangle, Unit, SVG_NAMESPACE};
    use crate::renderers::svg::ToNode;

    #[test]
    fn test_root_layout() {
        let mut doc = Document::new(SVG_NAMESPACE);
        doc.title = "T".into();
        doc.attributes.push(Attribute::new("width", "10"));
        let mut group = Group::new();
        group.paths.push(Path::new("M0"));
        doc.groups.push(group);
        doc.circles.push(Circle::new(1.0, 2.0, 3.0, Unit::Px));
        doc.rectangles.push(Rectangle::new(0.0, 0.0, 1.0, 1.0, Unit::None));

        let node = document_to_node(&doc);
        assert_eq!(node.namespace.as_deref(), Some(SVG_NAMESPACE));
        assert_eq!(node.attribute("width"), Some("10"));

        let names: Vec<&str> = node.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["title", "rect", "circle", "g"]);
        assert_eq!(node.children[0].text.as_deref(), Some("T"));
        assert_eq!(node.children[2].attribute("r"), Some("3.000000px"));
        assert_eq!(node.children[3].children[0].attribute("d"), Some("M0"));
    }

    #[test]
    fn test_geometry_precedes_own_attributes() {
        let mut rect = Rectangle::new(1.5, 0.0, 2.0, 3.0, Unit::Cm);
        rect.attributes.push(Attribute::new("fill", "red"));
        let node = rect.to_node();

        let names: Vec<&str> = node.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y", "width", "height", "fill"]);
        assert_eq!(node.attribute("x"), Some("1.500000cm"));
    }

    #[test]
    fn test_nested_groups_keep_order() {
        let mut inner = Group::new();
        inner.attributes.push(Attribute::new("id", "inner"));
        let mut outer = Group::new();
        outer.attributes.push(Attribute::new("id", "outer"));
        outer.groups.push(inner);
        outer.circles.push(Circle::default());
        let mut doc = Document::new("");
        doc.groups.push(outer);
        doc.groups.push(Group::new());

        let node = document_to_node(&doc);
        assert!(node.namespace.is_none());
        assert_eq!(node.children.len(), 2);
        let outer = &node.children[0];
        assert_eq!(outer.attribute("id"), Some("outer"));
        assert_eq!(outer.children[0].name, "circle");
        assert_eq!(outer.children[1].attribute("id"), Some("inner"));
        assert!(node.children[1].children.is_empty());
    }
}
