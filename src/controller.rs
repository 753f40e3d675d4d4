//! Page controller: owns the active writer and maps UI events onto it.
//!
//! The controller never touches the DOM or timers directly. UI output goes
//! through [`View`]; delayed work is queued as [`Deferred`] tasks that the host
//! drains with [`Controller::take_deferred`] and feeds back through
//! [`Controller::run_deferred`] once the delay has elapsed.

use std::collections::VecDeque;

use log::{debug, info, warn};

use crate::config::{
    DEFAULT_CHARACTER, DisplayOptions, QUIZ_COMPLETE_DELAY_MS, RESET_REVEAL_DELAY_MS,
    WriterOptions,
};
use crate::lexicon::{self, CharInfo};
use crate::writer::{Generation, StrokeWriter, WriterEvent, WriterFactory};

pub const INVALID_CHARACTER_MESSAGE: &str = "无法加载汉字，请输入有效的汉字";
pub const QUIZ_COMPLETE_MESSAGE: &str = "测试完成！做得很好！";
pub const QUIZ_LABEL_IDLE: &str = "测试模式";
pub const QUIZ_LABEL_ACTIVE: &str = "退出测试";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

impl ToastKind {
    pub fn class_name(self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: ToastKind::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: ToastKind::Error, message: message.into() }
    }
}

/// Output surface the controller renders into.
pub trait View {
    fn render_info(&mut self, info: &CharInfo);
    fn set_quiz_button(&mut self, quiz_mode: bool);
    fn set_input_value(&mut self, character: char);
    /// Mark exactly one example tile as active.
    fn mark_active_tile(&mut self, character: char);
    fn show_toast(&mut self, toast: Toast);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredAction {
    /// Second half of `reset()`: bring the character back.
    Reveal,
    QuizCompleteMessage,
}

/// Work to run after `delay_ms`, only if `generation` is still mounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deferred {
    pub delay_ms: u32,
    pub generation: Generation,
    pub action: DeferredAction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Input was not exactly one character; nothing changed.
    Ignored,
    Mounted(Generation),
    /// Writer construction failed; no writer is mounted and the previous
    /// character was restored.
    Failed,
}

/// How many earlier mounts are remembered as rollback targets.
const ROLLBACK_DEPTH: usize = 16;

struct Mounted<W> {
    writer: W,
    generation: Generation,
}

pub struct Controller<F: WriterFactory, V: View> {
    factory: F,
    view: V,
    base_options: WriterOptions,
    display: DisplayOptions,
    current: char,
    quiz_mode: bool,
    active: Option<Mounted<F::Writer>>,
    last_generation: Generation,
    /// Mounted characters, newest last, minus those whose data failed to load.
    mount_history: VecDeque<(Generation, char)>,
    pending: Vec<Deferred>,
}

impl<F: WriterFactory, V: View> Controller<F, V> {
    pub fn new(factory: F, view: V, base_options: WriterOptions, display: DisplayOptions) -> Self {
        Self {
            factory,
            view,
            base_options,
            display,
            current: DEFAULT_CHARACTER,
            quiz_mode: false,
            active: None,
            last_generation: Generation::default(),
            mount_history: VecDeque::with_capacity(ROLLBACK_DEPTH),
            pending: Vec::new(),
        }
    }

    /// Mount the default character and paint the initial UI.
    pub fn start(&mut self) -> Selection {
        self.view.set_quiz_button(self.quiz_mode);
        let outcome = self.mount();
        self.view.render_info(&lexicon::lookup(self.current));
        outcome
    }

    pub fn current_character(&self) -> char {
        self.current
    }

    pub fn is_quiz_mode(&self) -> bool {
        self.quiz_mode
    }

    pub fn active_generation(&self) -> Option<Generation> {
        self.active.as_ref().map(|m| m.generation)
    }

    pub fn has_writer(&self) -> bool {
        self.active.is_some()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn select_character(&mut self, input: &str) -> Selection {
        let Some(ch) = single_char(input.trim()) else {
            return Selection::Ignored;
        };
        self.current = ch;
        let outcome = self.mount();
        if outcome == Selection::Failed {
            self.current = self.rollback_target();
        }
        self.view.render_info(&lexicon::lookup(self.current));
        outcome
    }

    pub fn on_example_tile_click(&mut self, data_char: &str) -> Selection {
        let outcome = self.select_character(data_char);
        if let Selection::Mounted(_) = outcome {
            self.view.set_input_value(self.current);
            self.view.mark_active_tile(self.current);
        }
        outcome
    }

    pub fn animate(&mut self) {
        if let Some(m) = self.active.as_mut() {
            m.writer.animate();
        }
    }

    pub fn toggle_quiz(&mut self) -> bool {
        self.quiz_mode = !self.quiz_mode;
        self.view.set_quiz_button(self.quiz_mode);
        if let Some(m) = self.active.as_mut() {
            if self.quiz_mode {
                m.writer.hide_character();
                m.writer.start_quiz();
            } else {
                m.writer.cancel_quiz();
                m.writer.hide_character();
                m.writer.show_character();
            }
        }
        info!("quiz mode {}", if self.quiz_mode { "on" } else { "off" });
        self.quiz_mode
    }

    pub fn reset(&mut self) {
        if let Some(m) = self.active.as_mut() {
            m.writer.hide_character();
            self.pending.push(Deferred {
                delay_ms: RESET_REVEAL_DELAY_MS,
                generation: m.generation,
                action: DeferredAction::Reveal,
            });
        }
    }

    pub fn update_display_options(&mut self, display: DisplayOptions) {
        self.display = display;
        if let Some(m) = self.active.as_mut() {
            m.writer.set_display(display);
        }
    }

    /// Global keyboard shortcuts. Returns whether the key was handled.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match key {
            "Enter" => self.animate(),
            "Escape" => self.reset(),
            _ => return false,
        }
        true
    }

    pub fn on_writer_event(&mut self, generation: Generation, event: WriterEvent) {
        // A failed load disqualifies that character as a rollback target even
        // when its writer has already been replaced.
        if event == WriterEvent::LoadFailed {
            self.forget_mount(generation);
        }
        if self.active_generation() != Some(generation) {
            debug!("ignoring {event:?} from stale writer {generation:?}");
            return;
        }
        match event {
            WriterEvent::StrokeStart { stroke_num } => {
                debug!("stroke {} started", stroke_num + 1)
            }
            WriterEvent::StrokeEnd { stroke_num } => {
                debug!("stroke {} finished", stroke_num + 1)
            }
            WriterEvent::AnimationComplete => {
                info!("animation of {} complete", self.current);
                if self.quiz_mode {
                    self.schedule_quiz_message(generation);
                }
            }
            WriterEvent::QuizCorrectStroke { stroke_num } => {
                debug!("quiz: stroke {} correct", stroke_num + 1)
            }
            WriterEvent::QuizMistake { stroke_num, mistakes } => {
                debug!("quiz: mistake on stroke {} ({mistakes} so far)", stroke_num + 1)
            }
            WriterEvent::QuizComplete { total_mistakes } => {
                info!("quiz of {} complete with {total_mistakes} mistakes", self.current);
                if self.quiz_mode {
                    self.schedule_quiz_message(generation);
                }
            }
            WriterEvent::LoadFailed => {
                warn!("no stroke data for {}", self.current);
                if let Some(mut m) = self.active.take() {
                    m.writer.teardown();
                }
                self.current = self.rollback_target();
                self.view.show_toast(Toast::error(INVALID_CHARACTER_MESSAGE));
                self.view.render_info(&lexicon::lookup(self.current));
            }
        }
    }

    pub fn take_deferred(&mut self) -> Vec<Deferred> {
        std::mem::take(&mut self.pending)
    }

    pub fn run_deferred(&mut self, task: Deferred) {
        let quiz_mode = self.quiz_mode;
        let Some(m) = self.active.as_mut().filter(|m| m.generation == task.generation) else {
            debug!("dropping {:?} for replaced writer {:?}", task.action, task.generation);
            return;
        };
        match task.action {
            DeferredAction::Reveal => {
                if quiz_mode {
                    m.writer.start_quiz();
                } else {
                    m.writer.show_character();
                }
            }
            DeferredAction::QuizCompleteMessage => {
                self.view.show_toast(Toast::info(QUIZ_COMPLETE_MESSAGE));
            }
        }
    }

    fn schedule_quiz_message(&mut self, generation: Generation) {
        self.pending.push(Deferred {
            delay_ms: QUIZ_COMPLETE_DELAY_MS,
            generation,
            action: DeferredAction::QuizCompleteMessage,
        });
    }

    fn forget_mount(&mut self, generation: Generation) {
        let Some(idx) = self.mount_history.iter().position(|&(g, _)| g == generation) else {
            return;
        };
        let Some((_, ch)) = self.mount_history.remove(idx) else {
            return;
        };
        // Already rolled back onto this character with nothing mounted.
        if self.active.is_none() && self.current == ch {
            self.current = self.rollback_target();
            self.view.render_info(&lexicon::lookup(self.current));
        }
    }

    /// Most recent mounted character not known to have failed.
    fn rollback_target(&self) -> char {
        self.mount_history
            .back()
            .map(|&(_, ch)| ch)
            .unwrap_or(DEFAULT_CHARACTER)
    }

    fn mount(&mut self) -> Selection {
        if let Some(mut old) = self.active.take() {
            old.writer.teardown();
        }
        let generation = self.last_generation.next();
        self.last_generation = generation;
        let options = self.base_options.clone().with_display(self.display);
        match self.factory.create(self.current, &options, generation) {
            Ok(mut writer) => {
                if self.quiz_mode {
                    writer.start_quiz();
                }
                self.active = Some(Mounted { writer, generation });
                if self.mount_history.len() == ROLLBACK_DEPTH {
                    self.mount_history.pop_front();
                }
                self.mount_history.push_back((generation, self.current));
                info!("mounted writer {generation:?} for {}", self.current);
                Selection::Mounted(generation)
            }
            Err(err) => {
                warn!("failed to create writer for {}: {err}", self.current);
                self.view.show_toast(Toast::error(INVALID_CHARACTER_MESSAGE));
                Selection::Failed
            }
        }
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}
