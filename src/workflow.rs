//! File workflow
//!
//! Every file operation runs the same pipeline and stops at the first
//! failure:
//!
//! ```text
//! read → parse → schema check → build → validate
//!      → mutate → validate → schema check → write → read back → validate
//! ```
//!
//! The file on disk is only replaced after the pre-write checks pass.

use std::fs;
use std::path::Path;

use crate::config::WorkflowConfig;
use crate::converters::interchange::{self, ToRecord};
use crate::errors::{Result, SvgError};
use crate::models::{Attribute, Document, ElementKind};
use crate::parse::{build_document, parse_markup};
use crate::renderers::svg::{document_to_node, to_markup};
use crate::validation::{has_extension, BuiltinSchema, SchemaValidator};

/// File-level operations over SVG documents
pub struct Workflow<V: SchemaValidator = BuiltinSchema> {
    validator: V,
    config: WorkflowConfig,
}

impl Workflow<BuiltinSchema> {
    pub fn new(config: WorkflowConfig) -> Self {
        Self::with_validator(BuiltinSchema, config)
    }
}

impl<V: SchemaValidator> Workflow<V> {
    pub fn with_validator(validator: V, config: WorkflowConfig) -> Self {
        Self { validator, config }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    fn check_paths(&self, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(SvgError::Input("file path is empty".into()));
        }
        if !has_extension(path, "svg") {
            return Err(SvgError::Input(format!(
                "'{}' must have a .svg extension",
                path.display()
            )));
        }
        if !has_extension(&self.config.schema_path, "xsd") {
            return Err(SvgError::Input(format!(
                "schema file '{}' must have a .xsd extension",
                self.config.schema_path.display()
            )));
        }
        Ok(())
    }

    /// Read, schema-check, build and validate a document
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Document> {
        let path = path.as_ref();
        self.check_paths(path)?;

        let markup = fs::read_to_string(path)?;
        let root = parse_markup(&markup)?;
        self.validator.validate(&root, &self.config.schema_path)?;

        let doc = build_document(&root)?;
        doc.validate()?;
        log::debug!("loaded {}", path.display());
        Ok(doc)
    }

    /// Validate `doc`, write it to `path`, then read it back and validate again
    pub fn save(&self, doc: &Document, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.check_paths(path)?;

        doc.validate()?;
        let root = document_to_node(doc);
        self.validator.validate(&root, &self.config.schema_path)?;

        let markup = to_markup(&root, Some(self.config.markup.clone()))?;
        fs::write(path, markup)?;
        log::info!("wrote {}", path.display());

        self.load(path).map(|_| ())
    }

    fn modify<F>(&self, path: &Path, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut Document) -> Result<()>,
    {
        let mut doc = self.load(path)?;
        mutate(&mut doc)?;
        self.save(&doc, path)
    }

    /// Whole-tree counts as a summary record
    pub fn summary(&self, path: impl AsRef<Path>) -> Result<String> {
        self.load(path)?.to_json()
    }

    pub fn rects_json(&self, path: impl AsRef<Path>) -> Result<String> {
        interchange::list_to_json(&self.load(path)?.rectangles)
    }

    pub fn circles_json(&self, path: impl AsRef<Path>) -> Result<String> {
        interchange::list_to_json(&self.load(path)?.circles)
    }

    pub fn paths_json(&self, path: impl AsRef<Path>) -> Result<String> {
        interchange::list_to_json(&self.load(path)?.paths)
    }

    pub fn groups_json(&self, path: impl AsRef<Path>) -> Result<String> {
        interchange::list_to_json(&self.load(path)?.groups)
    }

    /// `"title:description"`
    pub fn title_and_description(&self, path: impl AsRef<Path>) -> Result<String> {
        let doc = self.load(path)?;
        Ok(format!("{}:{}", doc.title, doc.description))
    }

    /// Attribute lists of the top-level entities of `kind`, `|`-terminated
    pub fn attributes_json(&self, path: impl AsRef<Path>, kind: ElementKind) -> Result<String> {
        interchange::top_level_attributes_json(&self.load(path)?, kind)
    }

    pub fn set_attribute(
        &self,
        path: impl AsRef<Path>,
        kind: ElementKind,
        index: usize,
        name: &str,
        value: &str,
    ) -> Result<()> {
        self.modify(path.as_ref(), |doc| {
            doc.set_attribute(kind, index, Attribute::new(name, value))
        })
    }

    /// Append a shape decoded from its interchange record
    pub fn add_component(&self, path: impl AsRef<Path>, kind: ElementKind, json: &str) -> Result<()> {
        let shape = interchange::shape_from_json(kind, json)?;
        self.modify(path.as_ref(), |doc| doc.add_component(shape))
    }

    pub fn scale(&self, path: impl AsRef<Path>, kind: ElementKind, factor: f64) -> Result<()> {
        self.modify(path.as_ref(), |doc| doc.scale(kind, factor).map(|_| ()))
    }

    /// Create a new file from `{"title":..,"descr":..}`
    pub fn create(&self, path: impl AsRef<Path>, json: &str) -> Result<()> {
        let doc = interchange::document_from_json(json)?;
        self.save(&doc, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100">
  <title>Sample</title>
  <desc>Test file</desc>
  <rect x="1cm" y="1cm" width="4cm" height="2cm" fill="blue"/>
  <g id="layer">
    <circle cx="5" cy="5" r="5"/>
  </g>
</svg>"#;

    fn setup() -> (TempDir, Workflow, std::path::PathBuf) {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("sample.svg");
        fs::write(&path, SAMPLE).expect("write sample");
        (dir, Workflow::new(WorkflowConfig::default()), path)
    }

    #[test]
    fn test_load_rejects_bad_paths() {
        let workflow = Workflow::new(WorkflowConfig::default());
        assert!(matches!(workflow.load(""), Err(SvgError::Input(_))));
        assert!(matches!(workflow.load("drawing.png"), Err(SvgError::Input(_))));

        let bad_schema = Workflow::new(WorkflowConfig::new("schema.dtd"));
        assert!(matches!(bad_schema.load("drawing.svg"), Err(SvgError::Input(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().expect("temp dir");
        let workflow = Workflow::new(WorkflowConfig::default());
        assert!(matches!(workflow.load(dir.path().join("none.svg")), Err(SvgError::Io(_))));
    }

    #[test]
    fn test_queries() {
        let (_dir, workflow, path) = setup();
        assert_eq!(
            workflow.summary(&path).expect("summary"),
            r#"{"numRect":1,"numCirc":1,"numPaths":0,"numGroups":1}"#
        );
        assert_eq!(workflow.title_and_description(&path).expect("title"), "Sample:Test file");
        assert_eq!(
            workflow.attributes_json(&path, ElementKind::Rectangle).expect("attributes"),
            r#"[{"name":"fill","value":"blue"}]|"#
        );
        assert_eq!(
            workflow.groups_json(&path).expect("groups"),
            r#"[{"children":1,"numAttr":1}]"#
        );
        assert_eq!(workflow.circles_json(&path).expect("circles"), "[]");
    }

    #[test]
    fn test_set_attribute_persists() {
        let (_dir, workflow, path) = setup();
        workflow
            .set_attribute(&path, ElementKind::Rectangle, 0, "width", "6cm")
            .expect("set width");
        let doc = workflow.load(&path).expect("reload");
        assert_eq!(doc.rectangles[0].width, 6.0);
        assert_eq!(doc.title, "Sample");
    }

    #[test]
    fn test_failed_mutation_leaves_file_untouched() {
        let (_dir, workflow, path) = setup();
        let before = fs::read_to_string(&path).expect("read");

        let result = workflow.set_attribute(&path, ElementKind::Rectangle, 0, "width", "6parsecs");
        assert!(matches!(result, Err(SvgError::Unit(_))));

        let result = workflow.set_attribute(&path, ElementKind::Rectangle, 0, "width", "-6");
        assert!(matches!(result, Err(SvgError::Structural(_))));

        assert_eq!(fs::read_to_string(&path).expect("read"), before);
    }

    #[test]
    fn test_add_component_and_scale() {
        let (_dir, workflow, path) = setup();
        workflow
            .add_component(&path, ElementKind::Circle, r#"{"cx":1,"cy":1,"r":2,"units":""}"#)
            .expect("add circle");
        workflow.scale(&path, ElementKind::Circle, 3.0).expect("scale circles");

        let doc = workflow.load(&path).expect("reload");
        assert_eq!(doc.circles.len(), 1);
        assert_eq!(doc.circles[0].r, 6.0);
        assert_eq!(doc.groups[0].circles[0].r, 15.0);
    }

    #[test]
    fn test_create() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("new.svg");
        let workflow = Workflow::new(WorkflowConfig::default());

        workflow
            .create(&path, r#"{"title":"Fresh","descr":"Empty drawing"}"#)
            .expect("create");
        assert_eq!(
            workflow.title_and_description(&path).expect("title"),
            "Fresh:Empty drawing"
        );
    }
}
