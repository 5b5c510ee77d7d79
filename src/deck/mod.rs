//! Document mutation contract
//!
//! The session drives a deck exclusively through [`SlideDeck`]. Operations
//! mutate in place and are order-dependent; callers serialize access.

pub mod layout;
pub mod presentation;

pub use layout::{Layout, LAYOUTS};
pub use presentation::{Presentation, Slide};

use crate::core::error::Result;
use crate::core::types::{ChartType, Inches, LayoutIndex, Rgb, SlideIndex};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Extension appended to saved decks that lack one
pub const DECK_EXTENSION: &str = "json";

/// Category chart data: one value per category in every series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
}

impl ChartData {
    /// Four quarters of sales and profit, used when nothing better exists
    pub fn sample() -> Self {
        Self {
            categories: ["Q1", "Q2", "Q3", "Q4"].map(String::from).to_vec(),
            series: vec![
                ChartSeries {
                    name: "Sales".into(),
                    values: vec![100.0, 120.0, 110.0, 140.0],
                },
                ChartSeries {
                    name: "Profit".into(),
                    values: vec![20.0, 25.0, 22.0, 30.0],
                },
            ],
        }
    }
}

/// Text to write into a slide's placeholders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl TextUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: None,
        }
    }

    pub fn body(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: Some(body.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Optional formatting applied to updated text
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: Option<u32>,
    pub color: Option<Rgb>,
    pub bold: Option<bool>,
    pub alignment: Option<Alignment>,
}

impl TextStyle {
    /// 16pt bold, applied to text written by voice commands
    pub fn emphasis() -> Self {
        Self {
            font_size: Some(16),
            bold: Some(true),
            ..Self::default()
        }
    }
}

/// Slide background fill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum BackgroundFill {
    Solid(Rgb),
    Image(PathBuf),
}

impl Default for BackgroundFill {
    fn default() -> Self {
        Self::Solid(Rgb::WHITE)
    }
}

/// Mutation operations the session needs from a document
pub trait SlideDeck {
    /// Append a slide, returning its index
    fn add_slide(
        &mut self,
        layout: LayoutIndex,
        title: &str,
        subtitle: Option<&str>,
    ) -> Result<SlideIndex>;

    /// Remove a slide; the last remaining slide is never removed
    fn delete_slide(&mut self, index: SlideIndex) -> Result<()>;

    fn update_text(&mut self, index: SlideIndex, update: &TextUpdate, style: TextStyle)
        -> Result<()>;

    fn insert_chart(
        &mut self,
        index: SlideIndex,
        chart_type: ChartType,
        data: &ChartData,
        position: Option<Inches>,
        size: Option<Inches>,
    ) -> Result<()>;

    /// Place a picture; the file must exist
    fn insert_image(
        &mut self,
        index: SlideIndex,
        path: &Path,
        position: Option<Inches>,
        size: Option<Inches>,
    ) -> Result<()>;

    fn change_background(&mut self, index: SlideIndex, fill: &BackgroundFill) -> Result<()>;

    /// Switch layouts, keeping title and body text where the new layout allows
    fn modify_layout(&mut self, index: SlideIndex, layout: LayoutIndex) -> Result<()>;

    fn slide_count(&self) -> usize;

    fn slide_title(&self, index: SlideIndex) -> Option<String>;

    /// Persist the deck, returning the path actually written
    fn save(&self, path: &Path) -> Result<PathBuf>;
}

/// Append the deck extension when `filename` lacks it
pub fn with_deck_extension(filename: &str) -> String {
    let suffix = format!(".{}", DECK_EXTENSION);
    if filename.to_lowercase().ends_with(&suffix) {
        filename.to_string()
    } else {
        format!("{}{}", filename, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_appended_once() {
        assert_eq!(with_deck_extension("report"), "report.json");
        assert_eq!(with_deck_extension("report.json"), "report.json");
        assert_eq!(with_deck_extension("Report.JSON"), "Report.JSON");
    }

    #[test]
    fn test_sample_chart_shape() {
        let data = ChartData::sample();
        assert_eq!(data.categories.len(), 4);
        assert_eq!(data.series.len(), 2);
        assert!(data.series.iter().all(|s| s.values.len() == 4));
    }
}
