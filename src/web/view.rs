//! DOM-backed [`View`]: info panel, quiz button, text input, example tiles and toasts.

use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use super::timer::set_timeout;
use crate::config::{ElementIds, TOAST_TIMEOUT_MS};
use crate::controller::{QUIZ_LABEL_ACTIVE, QUIZ_LABEL_IDLE, Toast, ToastKind, View};
use crate::error::{AppError, AppResult};
use crate::lexicon::CharInfo;

const QUIZ_IDLE_BACKGROUND: &str = "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)";
const QUIZ_ACTIVE_BACKGROUND: &str = "linear-gradient(135deg, #ff6b6b 0%, #feca57 100%)";

const TOAST_KEYFRAMES_ID: &str = "hs-toast-keyframes";
const TOAST_KEYFRAMES: &str = "@keyframes slideIn { \
     from { transform: translateX(100%); opacity: 0; } \
     to { transform: translateX(0); opacity: 1; } }";

pub struct DomView {
    document: Document,
    input: HtmlInputElement,
    quiz_button: HtmlElement,
    info: Element,
    tiles: Vec<Element>,
}

impl DomView {
    pub fn new(document: &Document, ids: &ElementIds) -> AppResult<Self> {
        Ok(Self {
            document: document.clone(),
            input: element_by_id(document, &ids.character_input)?,
            quiz_button: element_by_id(document, &ids.quiz_button)?,
            info: element_by_id(document, &ids.stroke_info)?,
            tiles: query_all(document, &ids.example_selector)?,
        })
    }

    pub fn tiles(&self) -> &[Element] {
        &self.tiles
    }
}

impl View for DomView {
    fn render_info(&mut self, info: &CharInfo) {
        self.info.set_inner_html(&info.to_panel_html());
    }

    fn set_quiz_button(&mut self, quiz_mode: bool) {
        let (label, background) = if quiz_mode {
            (QUIZ_LABEL_ACTIVE, QUIZ_ACTIVE_BACKGROUND)
        } else {
            (QUIZ_LABEL_IDLE, QUIZ_IDLE_BACKGROUND)
        };
        self.quiz_button.set_text_content(Some(label));
        if let Err(err) = self.quiz_button.style().set_property("background", background) {
            warn!("could not style quiz button: {err:?}");
        }
    }

    fn set_input_value(&mut self, character: char) {
        self.input.set_value(&character.to_string());
    }

    fn mark_active_tile(&mut self, character: char) {
        let wanted = character.to_string();
        for tile in &self.tiles {
            let is_active = tile.get_attribute("data-char").as_deref() == Some(wanted.as_str());
            if let Err(err) = tile.class_list().toggle_with_force("active", is_active) {
                warn!("could not mark tile: {err:?}");
            }
        }
    }

    fn show_toast(&mut self, toast: Toast) {
        if let Err(err) = show_toast(&self.document, &toast) {
            warn!("could not show toast {:?}: {err}", toast.message);
        }
    }
}

/// Insert a toast and remove it after [`TOAST_TIMEOUT_MS`]. Toasts are
/// independent of each other; a new one never cancels an older one.
pub fn show_toast(document: &Document, toast: &Toast) -> AppResult<Element> {
    ensure_toast_keyframes(document)?;
    let body = document.body().ok_or_else(|| AppError::Dom("no body".into()))?;

    let div = document.create_element("div").map_err(AppError::dom)?;
    div.set_class_name(&format!("message {}", toast.kind.class_name()));
    div.set_text_content(Some(&toast.message));
    div.set_attribute("style", &toast_style(toast.kind)).map_err(AppError::dom)?;
    body.append_child(&div).map_err(AppError::dom)?;

    let expiring = div.clone();
    set_timeout(TOAST_TIMEOUT_MS, move || expiring.remove())?;
    Ok(div)
}

fn toast_style(kind: ToastKind) -> String {
    let background = match kind {
        ToastKind::Error => "linear-gradient(135deg, #ff6b6b, #feca57)",
        ToastKind::Info => "linear-gradient(135deg, #667eea, #764ba2)",
    };
    format!(
        "position:fixed; top:20px; right:20px; padding:15px 20px; border-radius:5px; color:white; \
         font-weight:bold; z-index:1000; max-width:300px; box-shadow:0 5px 15px rgba(0,0,0,0.3); \
         background:{background}; animation:slideIn 0.3s ease;"
    )
}

fn ensure_toast_keyframes(document: &Document) -> AppResult<()> {
    if document.get_element_by_id(TOAST_KEYFRAMES_ID).is_some() {
        return Ok(());
    }
    let Some(head) = document.head() else {
        return Ok(());
    };
    let style = document.create_element("style").map_err(AppError::dom)?;
    style.set_id(TOAST_KEYFRAMES_ID);
    style.set_text_content(Some(TOAST_KEYFRAMES));
    head.append_child(&style).map_err(AppError::dom)?;
    Ok(())
}

pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> AppResult<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| AppError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| AppError::Dom(format!("#{id} has an unexpected element type")))
}

fn query_all(document: &Document, selector: &str) -> AppResult<Vec<Element>> {
    let nodes = document.query_selector_all(selector).map_err(AppError::dom)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect())
}
