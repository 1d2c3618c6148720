//! Crate error type
//!
//! The simulation itself never fails; everything here comes from the host
//! (missing DOM pieces, JS exceptions) or from loading settings.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("canvas element #{0} not found")]
    MissingCanvas(String),
    #[error("canvas has no 2d rendering context")]
    NoContext2d,
    #[error("javascript error: {0}")]
    Js(String),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("invalid color {0:?}, expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for Error {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Error::Js(format!("{:?}", value))
    }
}
