//! Shared helpers for WASM API operations
//!
//! Console logging, serde-wasm-bindgen conversion, and mapping of crate
//! errors onto `JsValue`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::errors::SvgError;
use crate::models::ElementKind;

// ============================================================================
// Console Logging Functions
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn info(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn warn(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);
}

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log an info message with [WASM] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

/// Log a warning message with [WASM] ⚠️ prefix
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

/// Log an error message with [WASM] ❌ prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

// ============================================================================
// Logging Helper Functions (called by macros)
// ============================================================================
//
// Console imports only exist in the browser; native builds go through `log`.

#[cfg(target_arch = "wasm32")]
pub fn log_debug(msg: &str) {
    log(&format!("[WASM] {}", msg));
}

#[cfg(target_arch = "wasm32")]
pub fn log_info(msg: &str) {
    info(&format!("[WASM] {}", msg));
}

#[cfg(target_arch = "wasm32")]
pub fn log_warn(msg: &str) {
    warn(&format!("[WASM] ⚠️ {}", msg));
}

#[cfg(target_arch = "wasm32")]
pub fn log_error(msg: &str) {
    error(&format!("[WASM] ❌ {}", msg));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_debug(msg: &str) {
    log::debug!("[WASM] {}", msg);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_info(msg: &str) {
    log::info!("[WASM] {}", msg);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_warn(msg: &str) {
    log::warn!("[WASM] ⚠️ {}", msg);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_error(msg: &str) {
    log::error!("[WASM] ❌ {}", msg);
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

/// Deserialize an optional settings object; `undefined` and `null` give `None`
pub fn deserialize_optional<T: DeserializeOwned>(
    value: JsValue,
    error_context: &str,
) -> Result<Option<T>, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    deserialize(value, error_context).map(Some)
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

// ============================================================================
// Result Conversion Helpers
// ============================================================================

/// Log a crate error and convert it to a JsValue
pub fn svg_error(context: &str, err: SvgError) -> JsValue {
    let msg = format!("{}: {}", context, err);
    log_error(&msg);
    JsValue::from_str(&msg)
}

/// Map a numeric kind code from JavaScript onto an element kind
pub fn element_kind_from_u8(code: u8) -> Result<ElementKind, SvgError> {
    ElementKind::from_u8(code)
        .ok_or_else(|| SvgError::Input(format!("Invalid element kind {} (must be 0-4)", code)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_kind_codes() {
        assert_eq!(element_kind_from_u8(0).ok(), Some(ElementKind::Svg));
        assert_eq!(element_kind_from_u8(1).ok(), Some(ElementKind::Circle));
        assert_eq!(element_kind_from_u8(2).ok(), Some(ElementKind::Rectangle));
        assert!(matches!(element_kind_from_u8(5), Err(SvgError::Input(_))));
    }
}
