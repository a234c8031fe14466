//! WASM build test
//!
//! Exercises the exported functions in a browser. Native test runs skip
//! this file; the same logic is covered through `Session`.

#![cfg(target_arch = "wasm32")]

use svg_editor_wasm::api::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const MARKUP: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">
  <rect x="0" y="0" width="2" height="3"/>
  <g><circle cx="0" cy="0" r="5"/></g>
</svg>"#;

#[wasm_bindgen_test]
fn test_load_and_query() {
    assert!(load_svg(MARKUP).is_ok());
    assert_eq!(
        svg_summary().expect("summary"),
        r#"{"numRect":1,"numCirc":1,"numPaths":0,"numGroups":1}"#
    );
    assert_eq!(count_circles_with_area(79.0).expect("count"), 1);
}

#[wasm_bindgen_test]
fn test_edit_and_export() {
    assert!(load_svg(MARKUP).is_ok());
    assert!(set_svg_attribute(2, 0, "fill", "red").is_ok());
    assert_eq!(scale_svg_shapes(1, 2.0).expect("scale"), 1);

    let markup = export_svg(JsValue::UNDEFINED).expect("export");
    assert!(markup.contains(r#"fill="red""#));
    assert!(markup.contains(r#"r="10.000000""#));
}

#[wasm_bindgen_test]
fn test_bad_kind_is_rejected() {
    assert!(load_svg(MARKUP).is_ok());
    assert!(svg_attributes(9).is_err());
    assert!(scale_svg_shapes(3, 2.0).is_err());
}
