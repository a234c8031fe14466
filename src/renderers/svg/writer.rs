//! Node tree → markup text, written with quick-xml
//!
//! Text and attribute values are escaped by quick-xml. A default namespace
//! is declared with `xmlns` only where it differs from the parent's.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::config::MarkupSettings;
use crate::errors::{Result, SvgError};
use crate::parse::XmlNode;

enum Step<'a> {
    Open {
        node: &'a XmlNode,
        inherited: Option<&'a str>,
    },
    Close(&'a str),
}

fn write_error(err: impl std::fmt::Display) -> SvgError {
    SvgError::Write(err.to_string())
}

/// Write `root` and its descendants as UTF-8 markup text
pub fn to_markup(root: &XmlNode, settings: Option<MarkupSettings>) -> Result<String> {
    let settings = settings.unwrap_or_default();

    let mut writer = if settings.indent > 0 {
        Writer::new_with_indent(Vec::new(), b' ', settings.indent)
    } else {
        Writer::new(Vec::new())
    };

    if settings.xml_declaration {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(write_error)?;
    }

    let mut steps = vec![Step::Open {
        node: root,
        inherited: None,
    }];

    while let Some(step) = steps.pop() {
        match step {
            Step::Close(name) => {
                writer
                    .write_event(Event::End(BytesEnd::new(name)))
                    .map_err(write_error)?;
            }
            Step::Open { node, inherited } => {
                let mut start = BytesStart::new(node.name.as_str());
                let namespace = node.namespace.as_deref().or(inherited);
                if let Some(uri) = namespace.filter(|uri| Some(*uri) != inherited) {
                    start.push_attribute(("xmlns", uri));
                }
                for attr in &node.attributes {
                    start.push_attribute((attr.name.as_str(), attr.value.as_str()));
                }

                let text = node.text.as_deref().filter(|t| !t.is_empty());
                if text.is_none() && node.children.is_empty() {
                    writer.write_event(Event::Empty(start)).map_err(write_error)?;
                    continue;
                }

                writer.write_event(Event::Start(start)).map_err(write_error)?;
                if let Some(text) = text {
                    writer
                        .write_event(Event::Text(BytesText::new(text)))
                        .map_err(write_error)?;
                }

                steps.push(Step::Close(node.name.as_str()));
                steps.extend(node.children.iter().rev().map(|child| Step::Open {
                    node: child,
                    inherited: namespace,
                }));
            }
        }
    }

    let bytes = writer.into_inner();
    String::from_utf8(bytes).map_err(write_error)
}
