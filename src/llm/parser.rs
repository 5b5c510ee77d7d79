//! Parse free-form LLM replies into slide content
//!
//! Models answer in loosely labelled plain text (`Title: ...`, bullet lines,
//! numbered lists). These parsers are lenient: markdown emphasis and
//! heading markers are stripped, unknown lines are ignored, and a reply with
//! nothing usable yields an empty result rather than an error.

use crate::core::types::{LayoutIndex, LAYOUT_CONTENT, LAYOUT_TITLE, LAYOUT_TWO_CONTENT};
use crate::deck::{ChartData, ChartSeries};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence attached to every generated slide
pub const CONTENT_CONFIDENCE: f32 = 0.8;

/// Bullet count above which a two-column layout is suggested
const TWO_COLUMN_BULLETS: usize = 5;

const BULLET_MARKERS: [char; 3] = ['•', '-', '*'];

/// What kind of slide content is being requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    Title,
    #[default]
    Content,
    Conclusion,
    /// Anything else, e.g. an agenda or a quote slide
    Other,
}

impl SlideKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlideKind::Title => "title",
            SlideKind::Content => "content",
            SlideKind::Conclusion => "conclusion",
            SlideKind::Other => "other",
        }
    }
}

impl fmt::Display for SlideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slide text produced by the AI, consumed immediately by the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub title: String,
    pub body: String,
    pub bullet_points: Vec<String>,
    pub suggested_layout: LayoutIndex,
    pub confidence: f32,
    pub kind: SlideKind,
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Title,
    Body,
}

/// Strip markdown decoration a model may add around labels
fn clean_line(line: &str) -> String {
    line.replace("**", "")
        .trim()
        .trim_start_matches('#')
        .trim()
        .to_string()
}

/// Value after a case-insensitive `label:` prefix
fn labelled<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let prefix = line.get(..label.len())?;
    if prefix.eq_ignore_ascii_case(label) {
        line[label.len()..].trim_start().strip_prefix(':').map(str::trim)
    } else {
        None
    }
}

fn bullet_text(line: &str) -> Option<&str> {
    let mut chars = line.chars();
    let first = chars.next()?;
    if BULLET_MARKERS.contains(&first) {
        Some(chars.as_str().trim())
    } else {
        None
    }
}

/// Parse a slide-content reply
///
/// Recognizes `Title:`, `Subtitle:` and `Content:` labels plus bullet lines.
/// Unlabelled lines following `Content:` extend the body.
pub fn parse_content_response(text: &str, kind: SlideKind) -> GeneratedContent {
    let mut title = String::new();
    let mut body = String::new();
    let mut bullet_points = Vec::new();
    let mut section = None;

    let lines: Vec<String> = text
        .lines()
        .map(clean_line)
        .filter(|l| !l.is_empty())
        .collect();

    for line in &lines {
        if let Some(value) = labelled(line, "title") {
            title = value.to_string();
            section = Some(Section::Title);
        } else if let Some(value) = labelled(line, "subtitle") {
            if body.is_empty() {
                body = value.to_string();
            }
            section = Some(Section::Body);
        } else if let Some(value) = labelled(line, "content") {
            body = value.to_string();
            section = Some(Section::Body);
        } else if let Some(point) = bullet_text(line) {
            if !point.is_empty() {
                bullet_points.push(point.to_string());
            }
        } else if section == Some(Section::Body) {
            if !body.is_empty() {
                body.push('\n');
            }
            body.push_str(line);
        }
    }

    if title.is_empty() {
        if let Some(first) = lines.first() {
            title = bullet_text(first).unwrap_or(first).to_string();
        }
    }

    if body.is_empty() && !bullet_points.is_empty() {
        body = bullet_points
            .iter()
            .map(|p| format!("• {}", p))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let suggested_layout = if kind == SlideKind::Title {
        LAYOUT_TITLE
    } else if bullet_points.len() > TWO_COLUMN_BULLETS {
        LAYOUT_TWO_CONTENT
    } else {
        LAYOUT_CONTENT
    };

    GeneratedContent {
        title,
        body,
        bullet_points,
        suggested_layout,
        confidence: CONTENT_CONFIDENCE,
        kind,
    }
}

/// Parse an outline reply into slide titles
///
/// Accepts `1. Title`, `1) Title` and bullet lines; everything else is
/// treated as commentary and skipped.
pub fn parse_outline_response(text: &str) -> Vec<String> {
    text.lines()
        .map(clean_line)
        .filter_map(|line| {
            let title = if line.starts_with(|c: char| c.is_ascii_digit()) {
                let digits_end = line
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(line.len());
                let rest = &line[digits_end..];
                rest.strip_prefix('.')
                    .or_else(|| rest.strip_prefix(')'))?
                    .trim()
                    .to_string()
            } else {
                bullet_text(&line)?.to_string()
            };
            let title = title.trim_matches('"').trim().to_string();
            (!title.is_empty()).then_some(title)
        })
        .collect()
}

fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(str::trim)
}

fn parse_values(text: &str) -> Option<Vec<f64>> {
    split_list(text)
        .map(|v| {
            v.trim_start_matches('$')
                .trim_end_matches('%')
                .trim()
                .parse::<f64>()
                .ok()
        })
        .collect()
}

/// Parse a chart-data reply
///
/// Expects `Categories: [..]` and pairs of `Series N Name:` /
/// `Series N Values: [..]` lines. A series whose values do not parse is
/// skipped. Series with a value count that does not match the categories are
/// dropped, since the deck cannot chart them.
pub fn parse_chart_data_response(text: &str) -> Option<ChartData> {
    let mut categories: Vec<String> = Vec::new();
    let mut series: Vec<ChartSeries> = Vec::new();
    let mut pending_name: Option<String> = None;

    for line in text.lines().map(clean_line).filter(|l| !l.is_empty()) {
        let lower = line.to_lowercase();

        if let Some(value) = labelled(&line, "categories") {
            categories = split_list(value)
                .filter(|c| !c.is_empty())
                .map(String::from)
                .collect();
        } else if lower.starts_with("series") && lower.contains("name:") {
            pending_name = line.split_once(':').map(|(_, n)| n.trim().to_string());
        } else if lower.starts_with("series") && lower.contains("values:") {
            let Some(name) = pending_name.as_ref() else {
                continue;
            };
            let Some(values) = line.split_once(':').and_then(|(_, v)| parse_values(v)) else {
                continue;
            };
            series.push(ChartSeries {
                name: name.clone(),
                values,
            });
            pending_name = None;
        }
    }

    series.retain(|s| s.values.len() == categories.len());

    if categories.is_empty() || series.is_empty() {
        None
    } else {
        Some(ChartData { categories, series })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_with_labels() {
        let reply = "Title: Market Trends\nContent: Growth is steady\nDemand rose in Q3";
        let content = parse_content_response(reply, SlideKind::Content);
        assert_eq!(content.title, "Market Trends");
        assert_eq!(content.body, "Growth is steady\nDemand rose in Q3");
        assert_eq!(content.suggested_layout, LAYOUT_CONTENT);
        assert!((content.confidence - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_content_bullets_become_body() {
        let reply = "**Title:** Key Takeaways\n- Ship faster\n• Measure more\n* Listen to users";
        let content = parse_content_response(reply, SlideKind::Conclusion);
        assert_eq!(content.title, "Key Takeaways");
        assert_eq!(content.bullet_points.len(), 3);
        assert_eq!(
            content.body,
            "• Ship faster\n• Measure more\n• Listen to users"
        );
    }

    #[test]
    fn test_title_slide_subtitle() {
        let reply = "Title: Solar Power\nSubtitle: Energy for everyone";
        let content = parse_content_response(reply, SlideKind::Title);
        assert_eq!(content.title, "Solar Power");
        assert_eq!(content.body, "Energy for everyone");
        assert_eq!(content.suggested_layout, LAYOUT_TITLE);
    }

    #[test]
    fn test_missing_title_uses_first_line() {
        let reply = "\n  Ocean Currents\nThey move heat around the planet";
        let content = parse_content_response(reply, SlideKind::Content);
        assert_eq!(content.title, "Ocean Currents");
    }

    #[test]
    fn test_many_bullets_suggest_two_columns() {
        let reply = "Title: Features\n- a\n- b\n- c\n- d\n- e\n- f";
        let content = parse_content_response(reply, SlideKind::Content);
        assert_eq!(content.suggested_layout, LAYOUT_TWO_CONTENT);
    }

    #[test]
    fn test_outline_numbered_and_bullets() {
        let reply = "Here is your outline:\n1. Introduction\n2) Market Size\n- Competition\n10. Summary";
        let outline = parse_outline_response(reply);
        assert_eq!(
            outline,
            vec!["Introduction", "Market Size", "Competition", "Summary"]
        );
    }

    #[test]
    fn test_outline_empty() {
        assert!(parse_outline_response("Sorry, I cannot help with that.").is_empty());
    }

    #[test]
    fn test_chart_data() {
        let reply = "Categories: [2021, 2022, 2023, 2024]\n\
                     Series 1 Name: Revenue\n\
                     Series 1 Values: [10, 12.5, 15, 18]\n\
                     Series 2 Name: Costs\n\
                     Series 2 Values: [$8, $9, $9.5, $11]";
        let data = parse_chart_data_response(reply).unwrap();
        assert_eq!(data.categories, vec!["2021", "2022", "2023", "2024"]);
        assert_eq!(data.series.len(), 2);
        assert_eq!(data.series[0].name, "Revenue");
        assert_eq!(data.series[1].values, vec![8.0, 9.0, 9.5, 11.0]);
    }

    #[test]
    fn test_chart_data_skips_bad_series() {
        let reply = "Categories: A, B\n\
                     Series 1 Name: Good\n\
                     Series 1 Values: 1, 2\n\
                     Series 2 Name: Words\n\
                     Series 2 Values: high, low\n\
                     Series 3 Name: Short\n\
                     Series 3 Values: 5";
        let data = parse_chart_data_response(reply).unwrap();
        assert_eq!(data.series.len(), 1);
        assert_eq!(data.series[0].name, "Good");
    }

    #[test]
    fn test_chart_data_requires_categories() {
        let reply = "Series 1 Name: Revenue\nSeries 1 Values: 1, 2, 3";
        assert!(parse_chart_data_response(reply).is_none());
    }
}
