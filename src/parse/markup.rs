//! XML reading layer
//!
//! Wraps roxmltree to turn SVG markup into an owned `XmlNode` tree.
//! roxmltree descends recursively, so the nesting depth is first measured
//! with quick-xml's streaming reader and markup deeper than `MAX_DEPTH` is
//! refused. The conversion then walks roxmltree's pre-order descendants
//! with an explicit stack.
//!
//! Namespace declarations an element introduces come first in its
//! attribute list, in declaration order, followed by its other attributes
//! in document order.

use quick_xml::events::Event;
use quick_xml::Reader;
use roxmltree::{Document, Node, NodeId, ParsingOptions};

use crate::errors::{Result, SvgError};
use crate::models::{Attribute, MAX_DEPTH};
use super::node::XmlNode;

/// Parse markup text into a generic node tree.
///
/// DOCTYPE declarations are accepted (SVG files frequently carry one).
pub fn parse_markup(markup: &str) -> Result<XmlNode> {
    if markup.trim().is_empty() {
        return Err(SvgError::Parse("document is empty".to_string()));
    }

    check_depth(markup)?;

    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };

    let doc = Document::parse_with_options(markup, options)
        .map_err(|e| SvgError::Parse(format!("XML parse error: {}", e)))?;

    let root = doc.root_element();
    log::debug!("parsed markup with root <{}>", root.tag_name().name());

    let mut stack: Vec<(NodeId, XmlNode)> = Vec::new();
    for node in root.descendants().filter(|n| n.is_element()) {
        let parent = node.parent_element().map(|p| p.id());
        collapse_until(&mut stack, parent);
        stack.push((node.id(), element_to_node(node)));
    }

    collapse_until(&mut stack, None)
        .ok_or_else(|| SvgError::Parse("document has no root element".to_string()))
}

/// Stream through the markup and fail once an element sits deeper than
/// `MAX_DEPTH`.
fn check_depth(markup: &str) -> Result<()> {
    let too_deep = || SvgError::Parse(format!("elements nested deeper than {} levels", MAX_DEPTH));

    let mut reader = Reader::from_str(markup);
    let mut depth = 0usize;
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                depth += 1;
                if depth > MAX_DEPTH {
                    return Err(too_deep());
                }
            }
            Ok(Event::Empty(_)) if depth + 1 > MAX_DEPTH => return Err(too_deep()),
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Eof) => return Ok(()),
            Ok(_) => {}
            Err(e) => {
                return Err(SvgError::Parse(format!(
                    "XML parse error at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        }
    }
}

/// Pop finished elements into their parents until `parent` is on top.
///
/// Returns the root element once the whole stack has been folded.
fn collapse_until(stack: &mut Vec<(NodeId, XmlNode)>, parent: Option<NodeId>) -> Option<XmlNode> {
    while let Some(top) = stack.last().map(|(id, _)| *id) {
        if Some(top) == parent {
            break;
        }
        let (_, finished) = stack.pop()?;
        match stack.last_mut() {
            Some((_, parent_node)) => parent_node.children.push(finished),
            None => return Some(finished),
        }
    }
    None
}

fn element_to_node(node: Node<'_, '_>) -> XmlNode {
    let tag = node.tag_name();
    let mut out = XmlNode::new(tag.name());
    out.namespace = tag.namespace().map(str::to_string);
    out.text = node.text().map(str::to_string);

    // Prefixed namespace declarations introduced on this element
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();
    for ns in node.namespaces() {
        let Some(prefix) = ns.name() else { continue };
        if prefix == "xml" || inherited.contains(&(Some(prefix), ns.uri())) {
            continue;
        }
        out.push_attribute(Attribute::new(format!("xmlns:{}", prefix), ns.uri()));
    }

    for attr in node.attributes() {
        let name = match attr.namespace().and_then(|uri| node.lookup_prefix(uri)) {
            Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, attr.name()),
            _ => attr.name().to_string(),
        };
        out.push_attribute(Attribute::new(name, attr.value()));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order_and_nesting() {
        let xml = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10">
            <rect x="1"/>
            <g id="a"><circle r="2"/><g id="b"/></g>
            <path d="M0 0"/>
        </svg>"#;

        let root = parse_markup(xml).expect("well-formed markup");
        assert_eq!(root.name, "svg");
        assert_eq!(root.namespace.as_deref(), Some("http://www.w3.org/2000/svg"));
        assert_eq!(root.attribute("width"), Some("10"));

        let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["rect", "g", "path"]);
        assert_eq!(root.children[1].children.len(), 2);
        assert_eq!(root.children[1].children[1].attribute("id"), Some("b"));
    }

    #[test]
    fn test_parse_keeps_prefixes() {
        let xml = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
            <path d="M0 0" xlink:href="#p"/>
        </svg>"##;

        let root = parse_markup(xml).expect("well-formed markup");
        assert_eq!(root.attribute("xmlns:xlink"), Some("http://www.w3.org/1999/xlink"));
        assert_eq!(root.children[0].attribute("xlink:href"), Some("#p"));
        assert!(root.children[0].attribute("xmlns:xlink").is_none());
    }

    #[test]
    fn test_parse_title_text() {
        let root = parse_markup("<svg><title>Hello</title></svg>").expect("well-formed markup");
        assert_eq!(root.children[0].text.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(parse_markup("<svg><rect></svg>"), Err(SvgError::Parse(_))));
        assert!(matches!(parse_markup("   "), Err(SvgError::Parse(_))));
    }

    #[test]
    fn test_parse_accepts_doctype() {
        let xml = r#"<?xml version="1.0"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg"/>"#;
        assert!(parse_markup(xml).is_ok());
    }

    #[test]
    fn test_parse_nesting_up_to_max_depth() {
        let depth = MAX_DEPTH - 1;
        let xml = format!("<svg>{}{}</svg>", "<g>".repeat(depth), "</g>".repeat(depth));
        let mut node = &parse_markup(&xml).expect("deep markup");
        let mut seen = 0;
        while let Some(child) = node.children.first() {
            node = child;
            seen += 1;
        }
        assert_eq!(seen, depth);
    }

    #[test]
    fn test_parse_refuses_nesting_beyond_max_depth() {
        let open = format!("<svg>{}{}</svg>", "<g>".repeat(MAX_DEPTH), "</g>".repeat(MAX_DEPTH));
        assert!(matches!(parse_markup(&open), Err(SvgError::Parse(_))));

        let depth = MAX_DEPTH - 1;
        let empty = format!("<svg>{}<g/>{}</svg>", "<g>".repeat(depth), "</g>".repeat(depth));
        assert!(matches!(parse_markup(&empty), Err(SvgError::Parse(_))));

        let far = 5000;
        let runaway = format!("<svg>{}{}</svg>", "<g>".repeat(far), "</g>".repeat(far));
        assert!(matches!(parse_markup(&runaway), Err(SvgError::Parse(_))));
    }

    #[test]
    fn test_declarations_lead_attribute_order() {
        let xml = r#"<svg width="1" xmlns:x="urn:x" height="2" xmlns:y="urn:y"/>"#;
        let root = parse_markup(xml).expect("well-formed markup");
        let names: Vec<&str> = root.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["xmlns:x", "xmlns:y", "width", "height"]);
    }
}
