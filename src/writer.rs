//! Seam between the controller and the stroke-drawing widget.
//!
//! In the browser this is HanziWriter (see `web::bindings`); tests plug in a
//! recording fake.

use crate::config::{DisplayOptions, WriterOptions};
use crate::error::AppResult;

/// Identifies one mounted writer. Bumped on every successful mount so delayed
/// work and late library callbacks can tell whether they still target the
/// active writer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

/// Notifications emitted by a writer. Stroke numbers are zero based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriterEvent {
    StrokeStart { stroke_num: u32 },
    StrokeEnd { stroke_num: u32 },
    AnimationComplete,
    QuizCorrectStroke { stroke_num: u32 },
    QuizMistake { stroke_num: u32, mistakes: u32 },
    QuizComplete { total_mistakes: u32 },
    /// Character data could not be loaded after construction succeeded.
    LoadFailed,
}

/// Commands the controller issues to a live writer.
pub trait StrokeWriter {
    fn animate(&mut self);
    fn hide_character(&mut self);
    fn show_character(&mut self);
    fn start_quiz(&mut self);
    fn cancel_quiz(&mut self);
    fn set_display(&mut self, display: DisplayOptions);
    /// Called right before the writer is replaced.
    fn teardown(&mut self);
}

/// Builds writers bound to the page's target container.
pub trait WriterFactory {
    type Writer: StrokeWriter;

    fn create(
        &mut self,
        character: char,
        options: &WriterOptions,
        generation: Generation,
    ) -> AppResult<Self::Writer>;
}
