//! Parameter resolution - converts raw captured text to domain values
//!
//! Every resolver is total: unrecognized input maps to a documented default
//! rather than an error, so a half-heard parameter still produces a command.

use crate::command::intent::ParamValue;
use crate::core::types::{ChartType, LayoutIndex, Rgb, SlideIndex, LAYOUT_CONTENT};

/// Slide count used when a presentation request does not name one
pub const DEFAULT_SLIDE_COUNT: usize = 5;

/// Upper bound on a spoken slide count
const MAX_SLIDE_COUNT: usize = 20;

const PALETTE: &[(&str, Rgb)] = &[
    ("red", Rgb(255, 0, 0)),
    ("green", Rgb(0, 255, 0)),
    ("blue", Rgb(0, 0, 255)),
    ("yellow", Rgb(255, 255, 0)),
    ("orange", Rgb(255, 165, 0)),
    ("purple", Rgb(128, 0, 128)),
    ("pink", Rgb(255, 192, 203)),
    ("black", Rgb(0, 0, 0)),
    ("white", Rgb(255, 255, 255)),
    ("gray", Rgb(128, 128, 128)),
    ("grey", Rgb(128, 128, 128)),
    ("light blue", Rgb(173, 216, 230)),
    ("dark blue", Rgb(0, 0, 139)),
    ("light green", Rgb(144, 238, 144)),
    ("dark green", Rgb(0, 100, 0)),
];

const LAYOUTS: &[(&str, LayoutIndex)] = &[
    ("title", 0),
    ("title slide", 0),
    ("content", 1),
    ("title and content", 1),
    ("section", 2),
    ("section header", 2),
    ("two content", 3),
    ("comparison", 4),
    ("title only", 5),
    ("blank", 6),
    ("caption", 7),
    ("content with caption", 7),
    ("picture", 8),
    ("picture with caption", 8),
];

const CHART_SYNONYMS: &[(&str, ChartType)] = &[
    ("bar", ChartType::Bar),
    ("column", ChartType::Column),
    ("line", ChartType::Line),
    ("pie", ChartType::Pie),
    ("graph", ChartType::Column),
    ("chart", ChartType::Column),
];

/// Spoken number words accepted wherever a slide ordinal is expected
const NUMBER_WORDS: &[(&str, usize)] = &[
    ("one", 1),
    ("first", 1),
    ("two", 2),
    ("second", 2),
    ("three", 3),
    ("third", 3),
    ("four", 4),
    ("fourth", 4),
    ("five", 5),
    ("fifth", 5),
    ("six", 6),
    ("sixth", 6),
    ("seven", 7),
    ("seventh", 7),
    ("eight", 8),
    ("eighth", 8),
    ("nine", 9),
    ("ninth", 9),
    ("ten", 10),
    ("tenth", 10),
];

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    let key = key.trim().to_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
}

/// Color name to RGB; unknown names are white
pub fn resolve_color(name: &str) -> Rgb {
    lookup(PALETTE, name).unwrap_or(Rgb::WHITE)
}

/// Layout name to layout index; unknown names get the content layout
pub fn resolve_layout(name: &str) -> LayoutIndex {
    lookup(LAYOUTS, name).unwrap_or(LAYOUT_CONTENT)
}

/// Chart synonym to canonical chart type; unknown words are column charts
pub fn resolve_chart_type(name: &str) -> ChartType {
    lookup(CHART_SYNONYMS, name).unwrap_or_default()
}

fn parse_number(text: &str) -> Option<usize> {
    let text = text.trim();
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        // Too many digits for usize is still a number, just out of any range
        return Some(text.parse::<usize>().unwrap_or(usize::MAX));
    }
    lookup(NUMBER_WORDS, text)
}

/// Spoken 1-based ordinal to 0-based slide index
///
/// Unparsable text resolves to the first slide. "0" has no 1-based meaning
/// and also lands on the first slide.
pub fn resolve_slide_ordinal(text: &str) -> SlideIndex {
    parse_number(text)
        .map(|n| n.saturating_sub(1))
        .unwrap_or(0)
}

/// Requested slide count, clamped to 1..=20
pub fn resolve_count(text: &str) -> usize {
    parse_number(text)
        .unwrap_or(DEFAULT_SLIDE_COUNT)
        .clamp(1, MAX_SLIDE_COUNT)
}

/// Resolve a captured value by parameter name
///
/// Names without a registered resolver pass through as trimmed text.
pub fn resolve_parameter(name: &str, raw: &str) -> ParamValue {
    match name {
        "slide_number" => ParamValue::Slide(resolve_slide_ordinal(raw)),
        "slide_count" => ParamValue::Count(resolve_count(raw)),
        "color" => ParamValue::Color(resolve_color(raw)),
        "layout" => ParamValue::Layout(resolve_layout(raw)),
        "chart_type" => ParamValue::Chart(resolve_chart_type(raw)),
        _ => ParamValue::Text(raw.trim().to_string()),
    }
}

/// Pattern fragment matching any ordinal `resolve_slide_ordinal` understands
pub(crate) fn ordinal_pattern() -> String {
    let words: Vec<&str> = NUMBER_WORDS.iter().map(|(w, _)| *w).collect();
    format!(r"(\d+|{})", words.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_case_insensitive() {
        assert_eq!(resolve_color("Blue"), Rgb(0, 0, 255));
        assert_eq!(resolve_color("blue"), Rgb(0, 0, 255));
        assert_eq!(resolve_color("  Dark Green "), Rgb(0, 100, 0));
    }

    #[test]
    fn test_unknown_color_is_white() {
        assert_eq!(resolve_color("mauve"), Rgb(255, 255, 255));
    }

    #[test]
    fn test_layout_lookup() {
        assert_eq!(resolve_layout("Title Only"), 5);
        assert_eq!(resolve_layout("blank"), 6);
        assert_eq!(resolve_layout("spiral"), LAYOUT_CONTENT);
    }

    #[test]
    fn test_chart_synonyms() {
        assert_eq!(resolve_chart_type("graph"), ChartType::Column);
        assert_eq!(resolve_chart_type("PIE"), ChartType::Pie);
        assert_eq!(resolve_chart_type("radar"), ChartType::Column);
    }

    #[test]
    fn test_slide_ordinal() {
        assert_eq!(resolve_slide_ordinal("3"), 2);
        assert_eq!(resolve_slide_ordinal("abc"), 0);
        assert_eq!(resolve_slide_ordinal("second"), 1);
        assert_eq!(resolve_slide_ordinal("0"), 0);
    }

    #[test]
    fn test_count_is_clamped() {
        assert_eq!(resolve_count("3"), 3);
        assert_eq!(resolve_count("many"), DEFAULT_SLIDE_COUNT);
        assert_eq!(resolve_count("500"), 20);
        assert_eq!(resolve_count("0"), 1);
    }

    #[test]
    fn test_oversized_number_saturates() {
        let digits = "99999999999999999999999";
        assert_eq!(resolve_slide_ordinal(digits), usize::MAX - 1);
        assert_eq!(resolve_count(digits), 20);
    }

    #[test]
    fn test_unregistered_name_passes_through() {
        assert_eq!(
            resolve_parameter("filename", " quarterly "),
            ParamValue::Text("quarterly".into())
        );
        assert_eq!(resolve_parameter("slide_number", "4"), ParamValue::Slide(3));
    }
}
