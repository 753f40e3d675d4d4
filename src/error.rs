//! Error type shared by the controller, the DOM host and the batch helpers.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing element: #{0}")]
    MissingElement(String),
    #[error("DOM error: {0}")]
    Dom(String),
    #[error("Writer error: {0}")]
    Widget(String),
    #[error("Config error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Wrap a JS exception raised by a DOM call.
    pub fn dom(err: JsValue) -> Self {
        AppError::Dom(describe_js(&err))
    }

    /// Wrap a JS exception raised by the HanziWriter library.
    pub fn widget(err: JsValue) -> Self {
        AppError::Widget(describe_js(&err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<AppError> for JsValue {
    fn from(err: AppError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn describe_js(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    format!("{err:?}")
}
