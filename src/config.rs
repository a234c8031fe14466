//! Configuration for markup output and the file workflow

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options for writing a node tree as markup text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkupSettings {
    /// Spaces per nesting level; 0 writes everything on one line
    pub indent: usize,

    /// Whether to start with `<?xml version="1.0" encoding="UTF-8"?>`
    pub xml_declaration: bool,
}

impl Default for MarkupSettings {
    fn default() -> Self {
        Self {
            indent: 2,
            xml_declaration: true,
        }
    }
}

/// Settings for the load/validate/write workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkflowConfig {
    /// Schema file handed to the validator; must end in `.xsd`
    pub schema_path: PathBuf,

    pub markup: MarkupSettings,
}

impl WorkflowConfig {
    pub fn new(schema_path: impl Into<PathBuf>) -> Self {
        Self {
            schema_path: schema_path.into(),
            markup: MarkupSettings::default(),
        }
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self::new("svg.xsd")
    }
}
