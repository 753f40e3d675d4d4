use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::window;

use crate::error::{AppError, AppResult};

/// One-shot `setTimeout`. The callback is owned by JS once scheduled.
pub fn set_timeout(delay_ms: u32, f: impl FnOnce() + 'static) -> AppResult<i32> {
    let win = window().ok_or_else(|| AppError::Dom("no window".into()))?;
    let cb = Closure::once_into_js(f);
    win.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.unchecked_ref(),
        delay_ms.min(i32::MAX as u32) as i32,
    )
    .map_err(AppError::dom)
}
