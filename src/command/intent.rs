//! Structured commands produced by the parser
//!
//! Every recognized utterance becomes a [`Command`] whose [`Action`] carries a
//! typed parameter record for its intent. Parameters are optional because a
//! fuzzy keyword match yields an action with nothing filled in; the validator
//! decides which absences are fatal.

use crate::core::types::{ChartType, LayoutIndex, Rgb, SlideIndex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Confidence reported for a full pattern match
pub const PATTERN_CONFIDENCE: f32 = 0.8;

/// Confidence reported for a keyword fallback match
pub const FUZZY_CONFIDENCE: f32 = 0.3;

/// Canonical actions a command can represent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    AddSlide,
    DeleteSlide,
    UpdateText,
    InsertChart,
    InsertImage,
    ChangeBackground,
    ModifyLayout,
    Save,
    GoToSlide,
    Help,
    StopListening,
    GeneratePresentation,
    AiEnhanceSlide,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::AddSlide => "add_slide",
            Intent::DeleteSlide => "delete_slide",
            Intent::UpdateText => "update_text",
            Intent::InsertChart => "insert_chart",
            Intent::InsertImage => "insert_image",
            Intent::ChangeBackground => "change_background",
            Intent::ModifyLayout => "modify_layout",
            Intent::Save => "save",
            Intent::GoToSlide => "go_to_slide",
            Intent::Help => "help",
            Intent::StopListening => "stop_listening",
            Intent::GeneratePresentation => "generate_presentation",
            Intent::AiEnhanceSlide => "ai_enhance_slide",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameter value after resolution
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Zero-based slide index
    Slide(SlideIndex),
    /// Plain positive count
    Count(usize),
    Color(Rgb),
    Layout(LayoutIndex),
    Chart(ChartType),
    Text(String),
}

impl ParamValue {
    fn into_text(self) -> Option<String> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Intent plus the typed parameters it carries
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    AddSlide {
        title: Option<String>,
        layout: Option<LayoutIndex>,
    },
    DeleteSlide {
        slide_number: Option<SlideIndex>,
    },
    UpdateText {
        title: Option<String>,
        content: Option<String>,
    },
    InsertChart {
        chart_type: Option<ChartType>,
    },
    InsertImage {
        image_path: Option<PathBuf>,
    },
    ChangeBackground {
        color: Option<Rgb>,
    },
    ModifyLayout {
        layout: Option<LayoutIndex>,
    },
    Save {
        filename: Option<String>,
    },
    GoToSlide {
        slide_number: Option<SlideIndex>,
    },
    Help,
    StopListening,
    GeneratePresentation {
        topic: Option<String>,
        slide_count: Option<usize>,
    },
    AiEnhanceSlide,
}

impl Action {
    /// An action for `intent` with no parameters bound
    pub fn empty(intent: Intent) -> Self {
        match intent {
            Intent::AddSlide => Action::AddSlide {
                title: None,
                layout: None,
            },
            Intent::DeleteSlide => Action::DeleteSlide { slide_number: None },
            Intent::UpdateText => Action::UpdateText {
                title: None,
                content: None,
            },
            Intent::InsertChart => Action::InsertChart { chart_type: None },
            Intent::InsertImage => Action::InsertImage { image_path: None },
            Intent::ChangeBackground => Action::ChangeBackground { color: None },
            Intent::ModifyLayout => Action::ModifyLayout { layout: None },
            Intent::Save => Action::Save { filename: None },
            Intent::GoToSlide => Action::GoToSlide { slide_number: None },
            Intent::Help => Action::Help,
            Intent::StopListening => Action::StopListening,
            Intent::GeneratePresentation => Action::GeneratePresentation {
                topic: None,
                slide_count: None,
            },
            Intent::AiEnhanceSlide => Action::AiEnhanceSlide,
        }
    }

    pub fn intent(&self) -> Intent {
        match self {
            Action::AddSlide { .. } => Intent::AddSlide,
            Action::DeleteSlide { .. } => Intent::DeleteSlide,
            Action::UpdateText { .. } => Intent::UpdateText,
            Action::InsertChart { .. } => Intent::InsertChart,
            Action::InsertImage { .. } => Intent::InsertImage,
            Action::ChangeBackground { .. } => Intent::ChangeBackground,
            Action::ModifyLayout { .. } => Intent::ModifyLayout,
            Action::Save { .. } => Intent::Save,
            Action::GoToSlide { .. } => Intent::GoToSlide,
            Action::Help => Intent::Help,
            Action::StopListening => Intent::StopListening,
            Action::GeneratePresentation { .. } => Intent::GeneratePresentation,
            Action::AiEnhanceSlide => Intent::AiEnhanceSlide,
        }
    }

    /// Store a resolved value under its parameter name
    ///
    /// Returns false when the name or value kind does not belong to this
    /// action; the value is dropped in that case.
    pub fn bind(&mut self, name: &str, value: ParamValue) -> bool {
        match (self, name, value) {
            (Action::AddSlide { title, .. }, "title", v) => set(title, v.into_text()),
            (Action::AddSlide { layout, .. }, "layout", ParamValue::Layout(l)) => {
                set(layout, Some(l))
            }
            (Action::DeleteSlide { slide_number }, "slide_number", ParamValue::Slide(n))
            | (Action::GoToSlide { slide_number }, "slide_number", ParamValue::Slide(n)) => {
                set(slide_number, Some(n))
            }
            (Action::UpdateText { title, .. }, "title", v) => set(title, v.into_text()),
            (Action::UpdateText { content, .. }, "content", v) => set(content, v.into_text()),
            (Action::InsertChart { chart_type }, "chart_type", ParamValue::Chart(c)) => {
                set(chart_type, Some(c))
            }
            (Action::InsertImage { image_path }, "image_path", v) => {
                set(image_path, v.into_text().map(PathBuf::from))
            }
            (Action::ChangeBackground { color }, "color", ParamValue::Color(c)) => {
                set(color, Some(c))
            }
            (Action::ModifyLayout { layout }, "layout", ParamValue::Layout(l)) => {
                set(layout, Some(l))
            }
            (Action::Save { filename }, "filename", v) => set(filename, v.into_text()),
            (Action::GeneratePresentation { topic, .. }, "topic", v) => {
                set(topic, v.into_text())
            }
            (
                Action::GeneratePresentation { slide_count, .. },
                "slide_count",
                ParamValue::Count(n),
            ) => set(slide_count, Some(n)),
            _ => false,
        }
    }

    /// Names of the parameters currently present, in declaration order
    pub fn parameter_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut push = |present: bool, name: &'static str| {
            if present {
                names.push(name);
            }
        };

        match self {
            Action::AddSlide { title, layout } => {
                push(title.is_some(), "title");
                push(layout.is_some(), "layout");
            }
            Action::DeleteSlide { slide_number } | Action::GoToSlide { slide_number } => {
                push(slide_number.is_some(), "slide_number");
            }
            Action::UpdateText { title, content } => {
                push(title.is_some(), "title");
                push(content.is_some(), "content");
            }
            Action::InsertChart { chart_type } => push(chart_type.is_some(), "chart_type"),
            Action::InsertImage { image_path } => push(image_path.is_some(), "image_path"),
            Action::ChangeBackground { color } => push(color.is_some(), "color"),
            Action::ModifyLayout { layout } => push(layout.is_some(), "layout"),
            Action::Save { filename } => push(filename.is_some(), "filename"),
            Action::GeneratePresentation { topic, slide_count } => {
                push(topic.is_some(), "topic");
                push(slide_count.is_some(), "slide_count");
            }
            Action::Help | Action::StopListening | Action::AiEnhanceSlide => {}
        }

        names
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameter_names().contains(&name)
    }
}

fn set<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *slot = Some(v);
            true
        }
        None => false,
    }
}

/// A parsed, immutable command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Command {
    pub action: Action,
    /// Informational only, nothing gates on it
    pub confidence: f32,
    /// The text the command was parsed from
    pub raw_text: String,
}

impl Command {
    pub fn new(action: Action, confidence: f32, raw_text: impl Into<String>) -> Self {
        Self {
            action,
            confidence,
            raw_text: raw_text.into(),
        }
    }

    pub fn intent(&self) -> Intent {
        self.action.intent()
    }
}
