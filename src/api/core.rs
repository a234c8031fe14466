//! Exported JavaScript functions
//!
//! Every function locks the WASM-owned session, delegates to `Session`,
//! and turns errors into `JsValue` strings after logging them.

use std::sync::{Mutex, MutexGuard, PoisonError};

use lazy_static::lazy_static;
use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize_optional, element_kind_from_u8, serialize, svg_error};
use crate::api::session::Session;
use crate::config::MarkupSettings;
use crate::models::ElementKind;
use crate::{wasm_info, wasm_warn};

// WASM-owned document storage
lazy_static! {
    static ref SESSION: Mutex<Session> = Mutex::new(Session::new());
}

fn session() -> MutexGuard<'static, Session> {
    SESSION.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Parse SVG markup and make it the current document
///
/// # Returns
/// Summary record `{"numRect","numCirc","numPaths","numGroups"}`
#[wasm_bindgen(js_name = loadSvg)]
pub fn load_svg(markup: &str) -> Result<JsValue, JsValue> {
    wasm_info!("loadSvg called ({} bytes)", markup.len());
    let summary = session().load(markup).map_err(|e| svg_error("loadSvg", e))?;
    serialize(&summary, "Summary serialization error")
}

/// Start a new empty document from `{"title":..,"descr":..}`
#[wasm_bindgen(js_name = createSvg)]
pub fn create_svg(json: &str) -> Result<JsValue, JsValue> {
    wasm_info!("createSvg called");
    let summary = session().create(json).map_err(|e| svg_error("createSvg", e))?;
    serialize(&summary, "Summary serialization error")
}

/// Write the current document as markup text
///
/// `settings` is an optional `{indent, xmlDeclaration}` object.
#[wasm_bindgen(js_name = exportSvg)]
pub fn export_svg(settings: JsValue) -> Result<String, JsValue> {
    let settings: Option<MarkupSettings> = deserialize_optional(settings, "Invalid markup settings")?;
    session().export(settings).map_err(|e| svg_error("exportSvg", e))
}

/// Current document as a plain JavaScript object
#[wasm_bindgen(js_name = getSvgDocument)]
pub fn get_svg_document() -> Result<JsValue, JsValue> {
    let guard = session();
    let doc = guard.document().map_err(|e| svg_error("getSvgDocument", e))?;
    serialize(doc, "Document serialization error")
}

#[wasm_bindgen(js_name = svgSummary)]
pub fn svg_summary() -> Result<String, JsValue> {
    session().summary().map_err(|e| svg_error("svgSummary", e))
}

#[wasm_bindgen(js_name = svgRects)]
pub fn svg_rects() -> Result<String, JsValue> {
    session().list_json(ElementKind::Rectangle).map_err(|e| svg_error("svgRects", e))
}

#[wasm_bindgen(js_name = svgCircles)]
pub fn svg_circles() -> Result<String, JsValue> {
    session()
        .list_json(ElementKind::Circle)
        .map_err(|e| svg_error("svgCircles", e))
}

#[wasm_bindgen(js_name = svgPaths)]
pub fn svg_paths() -> Result<String, JsValue> {
    session()
        .list_json(ElementKind::Path)
        .map_err(|e| svg_error("svgPaths", e))
}

#[wasm_bindgen(js_name = svgGroups)]
pub fn svg_groups() -> Result<String, JsValue> {
    session()
        .list_json(ElementKind::Group)
        .map_err(|e| svg_error("svgGroups", e))
}

/// `"title:description"`
#[wasm_bindgen(js_name = svgTitleAndDesc)]
pub fn svg_title_and_desc() -> Result<String, JsValue> {
    session()
        .title_and_description()
        .map_err(|e| svg_error("svgTitleAndDesc", e))
}

/// Attribute lists of the top-level entities of `kind`, each followed by `|`
#[wasm_bindgen(js_name = svgAttributes)]
pub fn svg_attributes(kind: u8) -> Result<String, JsValue> {
    let kind = element_kind_from_u8(kind).map_err(|e| svg_error("svgAttributes", e))?;
    session().attributes_json(kind).map_err(|e| svg_error("svgAttributes", e))
}

#[wasm_bindgen(js_name = setSvgAttribute)]
pub fn set_svg_attribute(kind: u8, index: usize, name: &str, value: &str) -> Result<(), JsValue> {
    wasm_info!("setSvgAttribute called: kind={}, index={}, name={}", kind, index, name);
    let kind = element_kind_from_u8(kind).map_err(|e| svg_error("setSvgAttribute", e))?;
    session()
        .set_attribute(kind, index, name, value)
        .map_err(|e| svg_error("setSvgAttribute", e))
}

/// Append a shape decoded from its interchange record
#[wasm_bindgen(js_name = addSvgComponent)]
pub fn add_svg_component(kind: u8, json: &str) -> Result<(), JsValue> {
    wasm_info!("addSvgComponent called: kind={}", kind);
    let kind = element_kind_from_u8(kind).map_err(|e| svg_error("addSvgComponent", e))?;
    session()
        .add_component(kind, json)
        .map_err(|e| svg_error("addSvgComponent", e))
}

/// Scale every rectangle or circle; returns how many were scaled
#[wasm_bindgen(js_name = scaleSvgShapes)]
pub fn scale_svg_shapes(kind: u8, factor: f64) -> Result<usize, JsValue> {
    wasm_info!("scaleSvgShapes called: kind={}, factor={}", kind, factor);
    let kind = element_kind_from_u8(kind).map_err(|e| svg_error("scaleSvgShapes", e))?;
    let scaled = session().scale(kind, factor).map_err(|e| svg_error("scaleSvgShapes", e))?;
    if scaled == 0 {
        wasm_warn!("scaleSvgShapes matched no shapes");
    }
    Ok(scaled)
}

#[wasm_bindgen(js_name = countRectsWithArea)]
pub fn count_rects_with_area(area: f64) -> Result<usize, JsValue> {
    session()
        .rects_with_area(area)
        .map_err(|e| svg_error("countRectsWithArea", e))
}

#[wasm_bindgen(js_name = countCirclesWithArea)]
pub fn count_circles_with_area(area: f64) -> Result<usize, JsValue> {
    session()
        .circles_with_area(area)
        .map_err(|e| svg_error("countCirclesWithArea", e))
}

#[wasm_bindgen(js_name = countPathsWithData)]
pub fn count_paths_with_data(data: &str) -> Result<usize, JsValue> {
    session()
        .paths_with_data(data)
        .map_err(|e| svg_error("countPathsWithData", e))
}

#[wasm_bindgen(js_name = countGroupsWithLength)]
pub fn count_groups_with_length(len: usize) -> Result<usize, JsValue> {
    session()
        .groups_with_len(len)
        .map_err(|e| svg_error("countGroupsWithLength", e))
}
