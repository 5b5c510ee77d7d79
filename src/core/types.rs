//! Shared domain value types

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB color triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({}, {}, {})", self.0, self.1, self.2)
    }
}

/// Canonical chart kinds a slide can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    #[default]
    Column,
    Line,
    Pie,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Column => "column",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index into the deck's layout table
pub type LayoutIndex = usize;

/// Zero-based slide position
pub type SlideIndex = usize;

/// Title slide layout
pub const LAYOUT_TITLE: LayoutIndex = 0;
/// "Title and Content" layout, used whenever nothing else is asked for
pub const LAYOUT_CONTENT: LayoutIndex = 1;
/// Two-column content layout
pub const LAYOUT_TWO_CONTENT: LayoutIndex = 3;

/// Position or size on a slide, in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Inches {
    pub x: f32,
    pub y: f32,
}

impl Inches {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_type_serialization() {
        let json = serde_json::to_string(&ChartType::Pie).unwrap();
        assert_eq!(json, "\"pie\"");
        let parsed: ChartType = serde_json::from_str("\"bar\"").unwrap();
        assert_eq!(parsed, ChartType::Bar);
    }

    #[test]
    fn test_rgb_display() {
        assert_eq!(Rgb(0, 0, 255).to_string(), "RGB(0, 0, 255)");
        assert_eq!(Rgb::default(), Rgb::WHITE);
    }
}
