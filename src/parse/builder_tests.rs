//! Unit tests for node tree → document building

use super::*;
use crate::parse::parse_markup;
use crate::models::MAX_DEPTH;

fn build(xml: &str) -> Document {
    let root = parse_markup(xml).expect("well-formed markup");
    build_document(&root).expect("svg root")
}

#[test]
fn test_build_metadata_and_root_attributes() {
    let doc = build(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50">
  <title>Example</title>
  <desc>A small drawing</desc>
</svg>"#,
    );

    assert_eq!(doc.namespace, "http://www.w3.org/2000/svg");
    assert_eq!(doc.title, "Example");
    assert_eq!(doc.description, "A small drawing");
    assert_eq!(doc.attributes.len(), 2);
    assert_eq!(doc.attributes.get("width"), Some("100"));
    assert_eq!(doc.attributes.get("height"), Some("50"));
}

#[test]
fn test_build_shapes_with_units() {
    let doc = build(
        r##"<svg xmlns="http://www.w3.org/2000/svg">
  <rect x="1cm" y="2" width="4.5cm" height="3cm" fill="red"/>
  <circle cx="10" cy="20" r="5" stroke="#000" stroke-width="2"/>
  <path d="M 0 0 L 10 10" fill="none"/>
</svg>"##,
    );

    let rect = &doc.rectangles[0];
    assert_eq!((rect.x, rect.y, rect.width, rect.height), (1.0, 2.0, 4.5, 3.0));
    assert_eq!(rect.units, Unit::Cm);
    assert_eq!(rect.attributes.len(), 1);
    assert_eq!(rect.attributes.get("fill"), Some("red"));

    let circle = &doc.circles[0];
    assert_eq!((circle.cx, circle.cy, circle.r), (10.0, 20.0, 5.0));
    assert_eq!(circle.units, Unit::None);
    assert_eq!(circle.attributes.len(), 2);

    let path = &doc.paths[0];
    assert_eq!(path.data, "M 0 0 L 10 10");
    assert_eq!(path.attributes.get("fill"), Some("none"));
}

#[test]
fn test_first_unit_wins() {
    let doc = build(r#"<svg><rect x="1" y="2mm" width="3px" height="4"/></svg>"#);
    assert_eq!(doc.rectangles[0].units, Unit::Mm);
    assert_eq!(doc.rectangles[0].width, 3.0);
}

#[test]
fn test_invalid_unit_is_recorded() {
    let doc = build(r#"<svg><circle cx="1" cy="1" r="2furlongs"/></svg>"#);
    assert_eq!(doc.circles[0].units, Unit::Invalid);
    assert_eq!(doc.circles[0].r, 2.0);
}

#[test]
fn test_element_names_are_case_insensitive() {
    let doc = build(r#"<SVG><RECT WIDTH="2" Height="3"/><G><Circle R="1"/></G></SVG>"#);
    assert_eq!(doc.rectangles.len(), 1);
    assert_eq!(doc.rectangles[0].width, 2.0);
    assert_eq!(doc.rectangles[0].height, 3.0);
    assert!(doc.rectangles[0].attributes.is_empty());
    assert_eq!(doc.groups[0].circles[0].r, 1.0);
}

#[test]
fn test_nested_groups_keep_document_order() {
    let doc = build(
        r#"<svg>
  <g id="outer">
    <rect width="1" height="1"/>
    <g id="inner"><circle r="1"/><path d="M1"/></g>
    <rect width="2" height="2"/>
  </g>
  <g id="second"/>
</svg>"#,
    );

    assert_eq!(doc.groups.len(), 2);
    let outer = &doc.groups[0];
    assert_eq!(outer.attributes.get("id"), Some("outer"));
    assert_eq!(outer.rectangles.len(), 2);
    assert_eq!(outer.rectangles[1].width, 2.0);
    assert_eq!(outer.groups.len(), 1);
    assert_eq!(outer.groups[0].attributes.get("id"), Some("inner"));
    assert_eq!(outer.groups[0].circles.len(), 1);
    assert_eq!(outer.groups[0].paths[0].data, "M1");
    assert_eq!(doc.groups[1].attributes.get("id"), Some("second"));
}

#[test]
fn test_unrecognized_elements_are_transparent() {
    let doc = build(
        r#"<svg>
  <defs><rect width="7" height="7"/></defs>
  <g><a href="x"><circle r="3"/></a></g>
  <text>ignored</text>
</svg>"#,
    );

    assert_eq!(doc.rectangles.len(), 1);
    assert_eq!(doc.rectangles[0].width, 7.0);
    assert_eq!(doc.groups[0].circles.len(), 1);
    assert!(doc.groups[0].attributes.is_empty());
}

#[test]
fn test_title_inside_group_is_ignored() {
    let doc = build(r#"<svg><g><title>inner</title></g><title>outer</title></svg>"#);
    assert_eq!(doc.title, "outer");
}

#[test]
fn test_non_svg_root_fails() {
    let root = parse_markup("<html><rect/></html>").expect("well-formed markup");
    assert!(matches!(build_document(&root), Err(SvgError::Parse(_))));
}

#[test]
fn test_deep_groups_are_built() {
    // svg, the groups and the rect together fill MAX_DEPTH
    let depth = MAX_DEPTH - 2;
    let xml = format!(
        "<svg>{}<rect width=\"1\" height=\"1\"/>{}</svg>",
        "<g>".repeat(depth),
        "</g>".repeat(depth)
    );
    let doc = build(&xml);

    let mut group = &doc.groups[0];
    let mut levels = 1;
    while let Some(child) = group.groups.first() {
        group = child;
        levels += 1;
    }
    assert_eq!(levels, depth);
    assert_eq!(group.rectangles.len(), 1);
}

#[test]
fn test_dropped_element_declarations_move_to_document() {
    let doc = build(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="5">
  <defs xmlns:foo="urn:foo"><rect width="1" height="1" foo:bar="x"/></defs>
</svg>"#,
    );

    let names: Vec<&str> = doc.attributes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["xmlns:foo", "width"]);
    assert_eq!(doc.attributes.get("xmlns:foo"), Some("urn:foo"));
    assert_eq!(doc.rectangles[0].attributes.get("foo:bar"), Some("x"));
}

#[test]
fn test_dropped_element_declarations_move_to_group() {
    let doc = build(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:foo="urn:foo">
  <g id="outer">
    <defs xmlns:foo="urn:foo" xmlns:bar="urn:bar">
      <circle r="1" bar:tag="y"/>
    </defs>
  </g>
</svg>"#,
    );

    let group: Vec<&str> = doc.groups[0].attributes.iter().map(|a| a.name.as_str()).collect();
    // foo is already bound by the root
    assert_eq!(group, vec!["xmlns:bar", "id"]);
    assert_eq!(doc.groups[0].circles[0].attributes.get("bar:tag"), Some("y"));
}
