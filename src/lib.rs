//! SVG Editor WASM Module
//!
//! Hierarchical SVG document model with recursive queries, in-place
//! mutation, and conversion to and from SVG markup and a compact JSON form.

pub mod api;
pub mod config;
pub mod converters;
pub mod errors;
pub mod models;
pub mod operations;
pub mod parse;
pub mod renderers;
pub mod validation;
pub mod workflow;

// Re-export commonly used types
pub use config::{MarkupSettings, WorkflowConfig};
pub use errors::{Result, SvgError};
pub use models::core::*;
pub use models::elements::*;
pub use models::units::{Measurement, Unit};
pub use parse::parse_svg;
pub use renderers::svg::render_document;
pub use workflow::Workflow;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        wasm_warn!("logger already initialized: {}", e);
    }

    log::info!("SVG Editor WASM module initialized");
}
