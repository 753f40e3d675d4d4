//! [`StrokeWriter`] backed by a live HanziWriter instance.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use super::bindings::{HanziWriter, read_u32, set_prop, to_js};
use crate::config::{DisplayOptions, WriterOptions};
use crate::error::{AppError, AppResult};
use crate::writer::{Generation, StrokeWriter, WriterEvent, WriterFactory};

/// Where writer callbacks are delivered, tagged with the writer's generation.
pub type EventSink = Rc<dyn Fn(Generation, WriterEvent)>;

type Callback = Closure<dyn FnMut(JsValue)>;

/// Callback sets of torn-down writers that are still held back.
const RETIRED_WRITERS: usize = 4;

/// Keeps the last `limit` retired items alive and hands back the oldest once
/// full.
pub struct RetiredRing<T> {
    limit: usize,
    items: VecDeque<T>,
}

impl<T> RetiredRing<T> {
    pub fn new(limit: usize) -> Self {
        Self { limit, items: VecDeque::with_capacity(limit + 1) }
    }

    pub fn retire(&mut self, item: T) -> Option<T> {
        self.items.push_back(item);
        if self.items.len() > self.limit {
            self.items.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

type Retired = Rc<RefCell<RetiredRing<Vec<Callback>>>>;

pub struct JsWriterFactory {
    target: Element,
    sink: EventSink,
    retired: Retired,
}

impl JsWriterFactory {
    pub fn new(target: Element, sink: EventSink) -> Self {
        let retired = Rc::new(RefCell::new(RetiredRing::new(RETIRED_WRITERS)));
        Self { target, sink, retired }
    }
}

impl WriterFactory for JsWriterFactory {
    type Writer = JsWriter;

    fn create(
        &mut self,
        character: char,
        options: &WriterOptions,
        generation: Generation,
    ) -> AppResult<JsWriter> {
        let mut callbacks = Callbacks { sink: self.sink.clone(), generation, kept: Vec::new() };

        let create_opts = to_js(options)?;
        let on_load_error = callbacks.make(|_| WriterEvent::LoadFailed);
        set_prop(&create_opts, "onLoadCharDataError", &on_load_error)?;

        let inner = HanziWriter::create(self.target.as_ref(), &character.to_string(), &create_opts)
            .map_err(AppError::widget)?;

        let stroke_start = callbacks.make(|d| WriterEvent::StrokeStart {
            stroke_num: read_u32(&d, "strokeNum"),
        });
        let stroke_end = callbacks.make(|d| WriterEvent::StrokeEnd {
            stroke_num: read_u32(&d, "strokeNum"),
        });
        let stroke_hooks = [
            ("animateStrokeStart", &stroke_start),
            ("animateStrokeEnd", &stroke_end),
        ];
        for (event, cb) in stroke_hooks {
            if let Err(err) = inner.on(event, cb.unchecked_ref()) {
                debug!("{event} not supported by this HanziWriter build: {err:?}");
            }
        }

        let animate_opts: JsValue = js_sys::Object::new().into();
        let on_animated = callbacks.make(|_| WriterEvent::AnimationComplete);
        set_prop(&animate_opts, "onComplete", &on_animated)?;

        let quiz_opts: JsValue = js_sys::Object::new().into();
        let on_correct = callbacks.make(|d| WriterEvent::QuizCorrectStroke {
            stroke_num: read_u32(&d, "strokeNum"),
        });
        let on_mistake = callbacks.make(|d| WriterEvent::QuizMistake {
            stroke_num: read_u32(&d, "strokeNum"),
            mistakes: read_u32(&d, "totalMistakes"),
        });
        let on_quizzed = callbacks.make(|d| WriterEvent::QuizComplete {
            total_mistakes: read_u32(&d, "totalMistakes"),
        });
        set_prop(&quiz_opts, "onCorrectStroke", &on_correct)?;
        set_prop(&quiz_opts, "onMistake", &on_mistake)?;
        set_prop(&quiz_opts, "onComplete", &on_quizzed)?;

        Ok(JsWriter {
            inner,
            target: self.target.clone(),
            animate_opts,
            quiz_opts,
            callbacks: callbacks.kept,
            retired: self.retired.clone(),
        })
    }
}

/// Builds JS callbacks that forward into the sink and keeps them alive.
struct Callbacks {
    sink: EventSink,
    generation: Generation,
    kept: Vec<Callback>,
}

impl Callbacks {
    fn make(&mut self, to_event: impl Fn(JsValue) -> WriterEvent + 'static) -> JsValue {
        let sink = self.sink.clone();
        let generation = self.generation;
        let cb: Callback = Closure::new(move |data: JsValue| sink(generation, to_event(data)));
        let js = cb.as_ref().clone();
        self.kept.push(cb);
        js
    }
}

pub struct JsWriter {
    inner: HanziWriter,
    target: Element,
    animate_opts: JsValue,
    quiz_opts: JsValue,
    callbacks: Vec<Callback>,
    retired: Retired,
}

impl StrokeWriter for JsWriter {
    fn animate(&mut self) {
        self.inner.animate_character(&self.animate_opts);
    }

    fn hide_character(&mut self) {
        self.inner.hide_character();
    }

    fn show_character(&mut self) {
        self.inner.show_character();
    }

    fn start_quiz(&mut self) {
        self.inner.quiz(&self.quiz_opts);
    }

    fn cancel_quiz(&mut self) {
        self.inner.cancel_quiz();
    }

    fn set_display(&mut self, display: DisplayOptions) {
        match to_js(&display) {
            Ok(opts) => self.inner.update_options(&opts),
            Err(err) => warn!("could not update writer options: {err}"),
        }
    }

    fn teardown(&mut self) {
        self.inner.hide_character();
        self.target.set_inner_html("");
        // Pending animations may still call back shortly after teardown with
        // a stale generation, so the closures stay valid for a few remounts.
        let callbacks = std::mem::take(&mut self.callbacks);
        if let Some(evicted) = self.retired.borrow_mut().retire(callbacks) {
            debug!("dropping {} callbacks of an old writer", evicted.len());
        }
    }
}
