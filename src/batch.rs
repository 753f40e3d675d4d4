//! Fire-and-forget helpers for demo pages that want many writers at once.
//! Writers created here are not tracked by the controller and never torn down.

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::config::{BATCH_STAGGER_MS, WriterOptions};
use crate::error::{AppError, AppResult};
use crate::web::bindings::{HanziWriter, to_js};
use crate::web::timer::set_timeout;

pub const DEFAULT_BATCH_CONTAINER: &str = "character-target-div";
pub const GRID_CELL_CLASS: &str = "character-cell";
const GRID_CELL_STYLE: &str = "display:inline-block; width:100px; height:100px; margin:5px; \
     border:1px solid #ddd; vertical-align:top;";

/// Characters of `chars` paired with their start delay. Whitespace is skipped
/// and does not take a slot.
pub fn stagger_plan(chars: &str) -> Vec<(char, u32)> {
    chars
        .chars()
        .filter(|c| !c.is_whitespace())
        .enumerate()
        .map(|(i, c)| (c, (i as u32).saturating_mul(BATCH_STAGGER_MS)))
        .collect()
}

/// Animate every character of `chars` in its own writer inside
/// `container_id`, one second apart.
#[wasm_bindgen]
pub fn load_multiple_chars(chars: &str, container_id: Option<String>) -> Result<(), JsValue> {
    let container = container_id.unwrap_or_else(|| DEFAULT_BATCH_CONTAINER.to_string());
    for (ch, delay) in stagger_plan(chars) {
        let container = container.clone();
        set_timeout(delay, move || {
            if let Err(err) = spawn_animated(&container, ch) {
                warn!("batch writer for {ch} failed: {err}");
            }
        })?;
    }
    Ok(())
}

fn spawn_animated(container_id: &str, ch: char) -> AppResult<()> {
    let options = to_js(&WriterOptions::batch())?;
    let writer = HanziWriter::create(&JsValue::from_str(container_id), &ch.to_string(), &options)
        .map_err(AppError::widget)?;
    writer.animate_character(&JsValue::UNDEFINED);
    Ok(())
}

/// Replace the contents of `grid_id` with one small static writer per
/// character. Does nothing when the grid element is missing.
#[wasm_bindgen]
pub fn create_character_grid(chars: &str, grid_id: &str) -> Result<(), JsValue> {
    let doc = window()
        .and_then(|w| w.document())
        .ok_or_else(|| AppError::Dom("no document".into()))?;
    let Some(grid) = doc.get_element_by_id(grid_id) else {
        debug!("grid #{grid_id} not found");
        return Ok(());
    };
    grid.set_inner_html("");

    let options = to_js(&WriterOptions::grid_cell())?;
    for (ch, _) in stagger_plan(chars) {
        let cell = doc.create_element("div")?;
        cell.set_class_name(GRID_CELL_CLASS);
        cell.set_attribute("style", GRID_CELL_STYLE)?;
        if let Err(err) = HanziWriter::create(cell.as_ref(), &ch.to_string(), &options) {
            warn!("grid writer for {ch} failed: {}", AppError::widget(err));
            continue;
        }
        grid.append_child(&cell)?;
    }
    Ok(())
}
