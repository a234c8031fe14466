//! SVG Editor WASM API
//!
//! # Module Structure
//!
//! - `helpers`: console logging, serde-wasm-bindgen conversion, error mapping
//! - `session`: the held document and the logic behind each exported function
//! - `core`: the `#[wasm_bindgen]` exports themselves

pub mod helpers;
pub mod session;
pub mod core;

pub use self::core::*;
pub use self::session::Session;
