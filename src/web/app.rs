//! Browser wiring: builds the controller, binds page listeners and turns
//! queued controller work into timers.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlInputElement, window};

use super::hanzi_writer::{EventSink, JsWriterFactory};
use super::timer::set_timeout;
use super::view::{DomView, element_by_id};
use crate::config::{AppConfig, DisplayOptions};
use crate::controller::{Controller, Deferred};
use crate::error::{AppError, AppResult};
use crate::writer::{Generation, WriterEvent};

pub type AppController = Controller<JsWriterFactory, DomView>;
pub type SharedController = Rc<RefCell<AppController>>;

/// Build the controller for the page described by `config`, mount the
/// default character and bind every listener. Listeners hold the controller
/// for the lifetime of the page.
pub fn launch(config: AppConfig) -> AppResult<SharedController> {
    let doc = window()
        .and_then(|w| w.document())
        .ok_or_else(|| AppError::Dom("no document".into()))?;
    let ids = &config.ids;

    let target: Element = element_by_id(&doc, &ids.target)?;
    let show_outline: HtmlInputElement = element_by_id(&doc, &ids.show_outline)?;
    let show_character: HtmlInputElement = element_by_id(&doc, &ids.show_character)?;
    let view = DomView::new(&doc, ids)?;
    let tiles = view.tiles().to_vec();
    let display = read_display(&show_outline, &show_character);

    let app: SharedController = Rc::new_cyclic(|weak| {
        let factory = JsWriterFactory::new(target, event_sink(weak.clone()));
        RefCell::new(Controller::new(factory, view, config.writer.clone(), display))
    });
    dispatch(&app, |c| {
        c.start();
    });

    {
        let app = app.clone();
        let input: HtmlInputElement = element_by_id(&doc, &ids.character_input)?;
        let source = input.clone();
        listen(&input, "input", move |_| {
            let value = source.value();
            dispatch(&app, |c| {
                c.select_character(&value);
            });
        })?;
    }
    bind_click(&doc, &ids.animate_button, &app, |c| c.animate())?;
    bind_click(&doc, &ids.quiz_button, &app, |c| {
        c.toggle_quiz();
    })?;
    bind_click(&doc, &ids.reset_button, &app, |c| c.reset())?;

    for checkbox in [&show_outline, &show_character] {
        let app = app.clone();
        let (outline, character) = (show_outline.clone(), show_character.clone());
        listen(checkbox, "change", move |_| {
            let display = read_display(&outline, &character);
            dispatch(&app, |c| c.update_display_options(display));
        })?;
    }

    for tile in &tiles {
        let app = app.clone();
        let source = tile.clone();
        listen(tile, "click", move |_| {
            let data_char = source.get_attribute("data-char").unwrap_or_default();
            dispatch(&app, |c| {
                c.on_example_tile_click(&data_char);
            });
        })?;
    }

    {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            let key = evt.key();
            dispatch(&app, |c| {
                c.handle_key(&key);
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .map_err(AppError::dom)?;
        closure.forget();
    }

    info!("hanzi-stroke ready with {} example tiles", tiles.len());
    Ok(app)
}

/// Run `f` against the controller, then schedule whatever delayed work it queued.
pub fn dispatch(app: &SharedController, f: impl FnOnce(&mut AppController)) {
    let tasks = match app.try_borrow_mut() {
        Ok(mut controller) => {
            f(&mut *controller);
            controller.take_deferred()
        }
        Err(_) => {
            warn!("controller busy; dropping re-entrant call");
            return;
        }
    };
    schedule_tasks(app, tasks);
}

// Timer callbacks go through these non-generic helpers; re-entering the
// generic `dispatch` from a closure would instantiate it without bound.
fn schedule_tasks(app: &SharedController, tasks: Vec<Deferred>) {
    for task in tasks {
        let weak = Rc::downgrade(app);
        let scheduled = set_timeout(task.delay_ms, move || run_task(&weak, task));
        if let Err(err) = scheduled {
            warn!("could not schedule {:?}: {err}", task.action);
        }
    }
}

fn run_task(app: &Weak<RefCell<AppController>>, task: Deferred) {
    if let Some(app) = app.upgrade() {
        dispatch(&app, |c| c.run_deferred(task));
    }
}

fn deliver_event(app: &Weak<RefCell<AppController>>, generation: Generation, event: WriterEvent) {
    if let Some(app) = app.upgrade() {
        dispatch(&app, |c| c.on_writer_event(generation, event));
    }
}

// Library callbacks can fire while the controller is mid-command, so they are
// delivered on a fresh tick.
fn event_sink(app: Weak<RefCell<AppController>>) -> EventSink {
    Rc::new(move |generation: Generation, event: WriterEvent| {
        let app = app.clone();
        let scheduled = set_timeout(0, move || deliver_event(&app, generation, event));
        if let Err(err) = scheduled {
            warn!("could not deliver writer event: {err}");
        }
    })
}

fn read_display(outline: &HtmlInputElement, character: &HtmlInputElement) -> DisplayOptions {
    DisplayOptions { show_outline: outline.checked(), show_character: character.checked() }
}

fn bind_click(
    doc: &Document,
    id: &str,
    app: &SharedController,
    action: fn(&mut AppController),
) -> AppResult<()> {
    let button: Element = element_by_id(doc, id)?;
    let app = app.clone();
    listen(&button, "click", move |_| dispatch(&app, action))
}

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> AppResult<()> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(AppError::dom)?;
    closure.forget();
    Ok(())
}
