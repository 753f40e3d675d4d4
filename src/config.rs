//! Page configuration: element ids, HanziWriter options and timing constants.
//!
//! `AppConfig` deserializes from a (possibly partial) JSON object so the page
//! can override ids or colours through `start_app_with_config`.

use serde::{Deserialize, Serialize};

use crate::error::AppResult;

// Timing (ms)
pub const RESET_REVEAL_DELAY_MS: u32 = 100;
pub const QUIZ_COMPLETE_DELAY_MS: u32 = 500;
pub const TOAST_TIMEOUT_MS: u32 = 3000;
pub const BATCH_STAGGER_MS: u32 = 1000;

pub const DEFAULT_CHARACTER: char = '永';

/// Ids / selectors of the page elements the controller binds to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    pub character_input: String,
    pub animate_button: String,
    pub quiz_button: String,
    pub reset_button: String,
    pub show_outline: String,
    pub show_character: String,
    pub stroke_info: String,
    pub target: String,
    /// CSS selector for the example tiles; each carries `data-char`.
    pub example_selector: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            character_input: "character-input".into(),
            animate_button: "animate-btn".into(),
            quiz_button: "quiz-btn".into(),
            reset_button: "reset-btn".into(),
            show_outline: "show-outline".into(),
            show_character: "show-character".into(),
            stroke_info: "stroke-info".into(),
            target: "character-target-div".into(),
            example_selector: ".example-char".into(),
        }
    }
}

/// The two checkbox-driven options that can be changed on a live writer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOptions {
    pub show_outline: bool,
    pub show_character: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self { show_outline: true, show_character: true }
    }
}

/// Construction options passed to `HanziWriter.create`. Field names follow
/// the library's camelCase option keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WriterOptions {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub stroke_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radical_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_animation_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_between_strokes: Option<u32>,
    pub show_outline: bool,
    pub show_character: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renderer: Option<String>,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
            padding: 5,
            stroke_color: "#333333".into(),
            radical_color: Some("#ff6b6b".into()),
            stroke_animation_speed: Some(1.0),
            delay_between_strokes: Some(100),
            show_outline: true,
            show_character: true,
            renderer: Some("svg".into()),
        }
    }
}

impl WriterOptions {
    /// Options used by `load_multiple_chars`.
    pub fn batch() -> Self {
        Self::thumbnail(200, 5)
    }

    /// Options used for `create_character_grid` cells.
    pub fn grid_cell() -> Self {
        Self::thumbnail(100, 2)
    }

    fn thumbnail(size: u32, padding: u32) -> Self {
        Self {
            width: size,
            height: size,
            padding,
            stroke_color: "#333333".into(),
            radical_color: None,
            stroke_animation_speed: None,
            delay_between_strokes: None,
            show_outline: true,
            show_character: true,
            renderer: None,
        }
    }

    pub fn with_display(mut self, display: DisplayOptions) -> Self {
        self.show_outline = display.show_outline;
        self.show_character = display.show_character;
        self
    }

    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub ids: ElementIds,
    pub writer: WriterOptions,
    /// `log` level name: error, warn, info, debug or trace.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ids: ElementIds::default(),
            writer: WriterOptions::default(),
            log_level: "info".into(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
