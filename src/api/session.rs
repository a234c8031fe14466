//! The document held by the WASM module between calls
//!
//! `Session` holds the logic behind every exported function as plain Rust,
//! so it can be exercised natively. Mutations run on a copy that must pass
//! validation before it replaces the held document.

use crate::config::MarkupSettings;
use crate::converters::interchange::{self, SummaryRecord, ToRecord};
use crate::errors::{Result, SvgError};
use crate::models::{Attribute, Document, ElementKind};
use crate::parse::parse_svg;
use crate::renderers::svg::render_document;

#[derive(Debug, Default)]
pub struct Session {
    document: Option<Document>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| SvgError::Input("No document loaded".into()))
    }

    /// Parse and validate markup, then hold it as the current document
    pub fn load(&mut self, markup: &str) -> Result<SummaryRecord> {
        let doc = parse_svg(markup)?;
        doc.validate()?;
        let summary = doc.to_record();
        self.document = Some(doc);
        Ok(summary)
    }

    /// Start a new empty document from `{"title":..,"descr":..}`
    pub fn create(&mut self, json: &str) -> Result<SummaryRecord> {
        let doc = interchange::document_from_json(json)?;
        doc.validate()?;
        let summary = doc.to_record();
        self.document = Some(doc);
        Ok(summary)
    }

    pub fn export(&self, settings: Option<MarkupSettings>) -> Result<String> {
        let doc = self.document()?;
        doc.validate()?;
        render_document(doc, settings)
    }

    pub fn summary(&self) -> Result<String> {
        self.document()?.to_json()
    }

    /// Records of the top-level entities of `kind`
    pub fn list_json(&self, kind: ElementKind) -> Result<String> {
        let doc = self.document()?;
        match kind {
            ElementKind::Svg => doc.to_json(),
            ElementKind::Rectangle => interchange::list_to_json(&doc.rectangles),
            ElementKind::Circle => interchange::list_to_json(&doc.circles),
            ElementKind::Path => interchange::list_to_json(&doc.paths),
            ElementKind::Group => interchange::list_to_json(&doc.groups),
        }
    }

    pub fn title_and_description(&self) -> Result<String> {
        let doc = self.document()?;
        Ok(format!("{}:{}", doc.title, doc.description))
    }

    pub fn attributes_json(&self, kind: ElementKind) -> Result<String> {
        interchange::top_level_attributes_json(self.document()?, kind)
    }

    /// Apply `mutate` to a copy and commit it only if it still validates
    fn commit<T, F>(&mut self, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut Document) -> Result<T>,
    {
        let mut draft = self.document()?.clone();
        let outcome = mutate(&mut draft)?;
        draft.validate()?;
        self.document = Some(draft);
        Ok(outcome)
    }

    pub fn set_attribute(&mut self, kind: ElementKind, index: usize, name: &str, value: &str) -> Result<()> {
        self.commit(|doc| doc.set_attribute(kind, index, Attribute::new(name, value)))
    }

    pub fn add_component(&mut self, kind: ElementKind, json: &str) -> Result<()> {
        let shape = interchange::shape_from_json(kind, json)?;
        self.commit(|doc| doc.add_component(shape))
    }

    pub fn scale(&mut self, kind: ElementKind, factor: f64) -> Result<usize> {
        self.commit(|doc| doc.scale(kind, factor))
    }

    pub fn rects_with_area(&self, area: f64) -> Result<usize> {
        Ok(self.document()?.rects_with_area(area))
    }

    pub fn circles_with_area(&self, area: f64) -> Result<usize> {
        Ok(self.document()?.circles_with_area(area))
    }

    pub fn paths_with_data(&self, data: &str) -> Result<usize> {
        Ok(self.document()?.paths_with_data(data))
    }

    pub fn groups_with_len(&self, len: usize) -> Result<usize> {
        Ok(self.document()?.groups_with_len(len))
    }
}
