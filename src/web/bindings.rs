//! `wasm-bindgen` imports for the global `HanziWriter` object
//! (hanzi-writer loaded through a `<script>` tag).

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::{AppError, AppResult};

#[wasm_bindgen]
extern "C" {
    #[derive(Clone, Debug)]
    pub type HanziWriter;

    /// `element` may be an element or an element id.
    #[wasm_bindgen(static_method_of = HanziWriter, catch)]
    pub fn create(
        element: &JsValue,
        character: &str,
        options: &JsValue,
    ) -> Result<HanziWriter, JsValue>;

    #[wasm_bindgen(method, js_name = animateCharacter)]
    pub fn animate_character(this: &HanziWriter, options: &JsValue) -> JsValue;

    #[wasm_bindgen(method, js_name = hideCharacter)]
    pub fn hide_character(this: &HanziWriter) -> JsValue;

    #[wasm_bindgen(method, js_name = showCharacter)]
    pub fn show_character(this: &HanziWriter) -> JsValue;

    #[wasm_bindgen(method)]
    pub fn quiz(this: &HanziWriter, options: &JsValue) -> JsValue;

    #[wasm_bindgen(method, js_name = cancelQuiz)]
    pub fn cancel_quiz(this: &HanziWriter);

    #[wasm_bindgen(method, js_name = updateOptions)]
    pub fn update_options(this: &HanziWriter, options: &JsValue);

    /// Not every hanzi-writer build exposes `on`; callers treat errors as
    /// "stroke events unavailable".
    #[wasm_bindgen(method, catch)]
    pub fn on(this: &HanziWriter, event: &str, callback: &js_sys::Function) -> Result<(), JsValue>;
}

/// Serialize `value` into a plain JS object.
pub fn to_js<T: Serialize>(value: &T) -> AppResult<JsValue> {
    let json = serde_json::to_string(value)?;
    js_sys::JSON::parse(&json).map_err(AppError::dom)
}

pub fn set_prop(target: &JsValue, key: &str, value: &JsValue) -> AppResult<()> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(AppError::dom)
}

/// Read a numeric field from a callback payload, 0 when absent.
pub fn read_u32(data: &JsValue, key: &str) -> u32 {
    js_sys::Reflect::get(data, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
        .map(|n| n as u32)
        .unwrap_or(0)
}
