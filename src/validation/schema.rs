//! Built-in schema check for the modelled SVG subset

use std::path::Path;

use crate::errors::{Result, SvgError};
use crate::models::{Measurement, SVG_NAMESPACE};
use crate::parse::XmlNode;

use super::{has_extension, SchemaValidator};

/// Structural schema for `svg`, `g`, `rect`, `circle`, `path`, `title`
/// and `desc`. Other elements are allowed and not inspected.
///
/// The schema path is checked for a `.xsd` extension but never read.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSchema;

/// Attributes each element must carry
fn required_attributes(name: &str) -> &'static [&'static str] {
    match name {
        "rect" => &["width", "height"],
        "circle" => &["r"],
        "path" => &["d"],
        _ => &[],
    }
}

/// Numeric attributes that must carry a recognized unit; `true` marks
/// those that must not be negative.
fn length_attributes(name: &str) -> &'static [(&'static str, bool)] {
    match name {
        "rect" => &[("x", false), ("y", false), ("width", true), ("height", true)],
        "circle" => &[("cx", false), ("cy", false), ("r", true)],
        _ => &[],
    }
}

fn violation(message: String) -> SvgError {
    SvgError::SchemaViolation(message)
}

fn check_element(node: &XmlNode) -> Result<()> {
    let name = node.name.to_ascii_lowercase();

    if node.attributes.iter().any(|attr| attr.name.is_empty()) {
        return Err(violation(format!("<{}> has an attribute without a name", node.name)));
    }

    for required in required_attributes(&name) {
        if node.attribute(required).is_none() {
            return Err(violation(format!("<{}> is missing required attribute '{}'", node.name, required)));
        }
    }

    for (attr_name, non_negative) in length_attributes(&name) {
        let Some(raw) = node.attribute(attr_name) else { continue };
        let measurement = Measurement::parse(raw);
        if measurement.unit.is_invalid() {
            return Err(violation(format!("<{}> {}='{}' is not a length", node.name, attr_name, raw)));
        }
        if *non_negative && measurement.magnitude < 0.0 {
            return Err(violation(format!("<{}> {}='{}' must not be negative", node.name, attr_name, raw)));
        }
    }

    if (name == "title" || name == "desc") && !node.children.is_empty() {
        return Err(violation(format!("<{}> must contain text only", node.name)));
    }

    Ok(())
}

impl SchemaValidator for BuiltinSchema {
    fn validate(&self, root: &XmlNode, schema_path: &Path) -> Result<()> {
        if !has_extension(schema_path, "xsd") {
            return Err(SvgError::Input(format!(
                "schema file '{}' must have a .xsd extension",
                schema_path.display()
            )));
        }

        if !root.is("svg") {
            return Err(violation(format!("root element is <{}>, expected <svg>", root.name)));
        }
        if root.namespace.as_deref() != Some(SVG_NAMESPACE) {
            return Err(violation(format!(
                "root element is not in the {} namespace",
                SVG_NAMESPACE
            )));
        }

        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            check_element(node)?;
            stack.extend(node.children.iter().rev());
        }

        log::debug!("node tree conforms to {}", schema_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_markup;

    fn check(xml: &str) -> Result<()> {
        let root = parse_markup(xml).expect("well-formed markup");
        BuiltinSchema.validate(&root, Path::new("svg.xsd"))
    }

    #[test]
    fn test_conforming_tree() {
        let xml = r#"<svg xmlns="http://www.w3.org/2000/svg">
  <title>t</title>
  <g><rect width="1cm" height="2cm"/><circle r="3"/></g>
  <path d="M0 0"/>
</svg>"#;
        assert!(check(xml).is_ok());
    }

    #[test]
    fn test_wrong_namespace() {
        assert!(matches!(
            check(r#"<svg xmlns="urn:other"/>"#),
            Err(SvgError::SchemaViolation(_))
        ));
        assert!(matches!(check("<svg/>"), Err(SvgError::SchemaViolation(_))));
    }

    #[test]
    fn test_missing_required_attribute() {
        let xml = r#"<svg xmlns="http://www.w3.org/2000/svg"><g><circle cx="1"/></g></svg>"#;
        assert!(matches!(check(xml), Err(SvgError::SchemaViolation(_))));
    }

    #[test]
    fn test_bad_lengths() {
        let unit = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="1zz" height="1"/></svg>"#;
        assert!(matches!(check(unit), Err(SvgError::SchemaViolation(_))));

        let negative = r#"<svg xmlns="http://www.w3.org/2000/svg"><circle r="-2"/></svg>"#;
        assert!(matches!(check(negative), Err(SvgError::SchemaViolation(_))));

        let negative_x = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect x="-2" width="1" height="1"/></svg>"#;
        assert!(check(negative_x).is_ok());
    }

    #[test]
    fn test_schema_path_extension() {
        let root = XmlNode::new("svg").with_namespace(SVG_NAMESPACE);
        assert!(matches!(
            BuiltinSchema.validate(&root, Path::new("schema.txt")),
            Err(SvgError::Input(_))
        ));
        assert!(BuiltinSchema.validate(&root, Path::new("SCHEMA.XSD")).is_ok());
    }
}
