//! Parse recognized speech into structured commands
//!
//! Matching is deterministic: the pattern table is walked in declaration
//! order and the first hit wins. When nothing matches, a keyword scan
//! produces a low-confidence command with no parameters. Failing both,
//! the parser reports no match, which is an ordinary outcome.

use crate::command::intent::{Action, Command, FUZZY_CONFIDENCE, PATTERN_CONFIDENCE};
use crate::command::patterns::{pattern_table, PatternRule, FUZZY_KEYWORDS};
use crate::command::resolver::resolve_parameter;
use regex::Captures;

/// Parser over the static pattern table
#[derive(Debug, Clone, Copy)]
pub struct CommandParser {
    rules: &'static [PatternRule],
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandParser {
    pub fn new() -> Self {
        Self {
            rules: pattern_table(),
        }
    }

    /// Parse `text` into a command, or `None` when nothing matches
    pub fn parse(&self, text: &str) -> Option<Command> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return None;
        }

        for rule in self.rules {
            for pattern in &rule.patterns {
                if let Some(caps) = pattern.captures(normalized) {
                    let action = extract_parameters(rule, &caps);
                    tracing::debug!(
                        rule = rule.name,
                        pattern = pattern.as_str(),
                        "Matched command pattern"
                    );
                    return Some(Command::new(action, PATTERN_CONFIDENCE, text));
                }
            }
        }

        self.fuzzy_match(normalized, text)
    }

    fn fuzzy_match(&self, normalized: &str, raw: &str) -> Option<Command> {
        let lowered = normalized.to_lowercase();
        FUZZY_KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map(|(keyword, intent)| {
                tracing::debug!(keyword, intent = %intent, "Fuzzy keyword match");
                Command::new(Action::empty(*intent), FUZZY_CONFIDENCE, raw)
            })
    }
}

/// Trim whitespace and trailing sentence punctuation added by recognizers
fn normalize(text: &str) -> &str {
    text.trim()
        .trim_end_matches(['.', '!', '?'])
        .trim_end()
}

fn extract_parameters(rule: &PatternRule, caps: &Captures<'_>) -> Action {
    let mut action = Action::empty(rule.intent);

    for (i, name) in rule.parameter_names.iter().enumerate() {
        let Some(group) = caps.get(i + 1) else {
            continue;
        };
        let raw = group.as_str().trim();
        if raw.is_empty() {
            continue;
        }

        let value = resolve_parameter(name, raw);
        if !action.bind(name, value) {
            tracing::debug!(parameter = name, intent = %rule.intent, "Dropped unbindable parameter");
        }
    }

    action
}

/// User-facing list of supported phrasings
pub fn help_text() -> &'static str {
    r#"Available Voice Commands:

Slide Management:
  "Create new slide" / "Add slide"
  "Create slide with title [your title]"
  "Delete slide number [n]"
  "Go to slide [n]"
  "Change layout to [layout name]"

Content:
  "Change title to [your title]"
  "Add content [your text]"
  "Update text [your text]"

Charts:
  "Add column chart" / "Insert bar chart"
  "Create line chart" / "Add pie chart"

Images:
  "Add image from [path]"
  "Insert picture [path]"

Styling:
  "Change background to [color]"
  "Set background [color name]"

File Operations:
  "Save presentation as [filename]"
  "Save as [filename]"

AI:
  "Generate a 5 slide presentation about [topic]"
  "Enhance this slide"

System:
  "Help" - Show this help
  "Stop listening" - Stop voice recognition

Example: "Create new slide with title My Presentation"
Example: "Add column chart"
Example: "Change background to blue""#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::intent::Intent;
    use crate::core::types::{ChartType, Rgb};

    fn parse(text: &str) -> Command {
        CommandParser::new()
            .parse(text)
            .unwrap_or_else(|| panic!("no match for {:?}", text))
    }

    #[test]
    fn test_title_keeps_original_casing() {
        let cmd = parse("create new slide with title Quarterly Review");
        assert_eq!(
            cmd.action,
            Action::AddSlide {
                title: Some("Quarterly Review".into()),
                layout: None,
            }
        );
        assert_eq!(cmd.confidence, PATTERN_CONFIDENCE);
        assert_eq!(cmd.raw_text, "create new slide with title Quarterly Review");
    }

    #[test]
    fn test_bare_add_slide_has_no_parameters() {
        let cmd = parse("Add a new slide.");
        assert_eq!(cmd.intent(), Intent::AddSlide);
        assert!(cmd.action.parameter_names().is_empty());
    }

    #[test]
    fn test_delete_converts_to_zero_based() {
        let cmd = parse("delete slide number 2");
        assert_eq!(cmd.action, Action::DeleteSlide { slide_number: Some(1) });

        let cmd = parse("remove the 3rd slide");
        assert_eq!(cmd.action, Action::DeleteSlide { slide_number: Some(2) });
    }

    #[test]
    fn test_spoken_ordinals() {
        let cmd = parse("go to the second slide");
        assert_eq!(cmd.action, Action::GoToSlide { slide_number: Some(1) });
    }

    #[test]
    fn test_background_two_word_color() {
        let cmd = parse("change background to light blue");
        assert_eq!(
            cmd.action,
            Action::ChangeBackground {
                color: Some(Rgb(173, 216, 230))
            }
        );
    }

    #[test]
    fn test_chart_type_resolution() {
        let cmd = parse("insert a pie chart");
        assert_eq!(
            cmd.action,
            Action::InsertChart {
                chart_type: Some(ChartType::Pie)
            }
        );
    }

    #[test]
    fn test_make_slide_is_layout_change() {
        let cmd = parse("make this a section slide");
        assert_eq!(cmd.action, Action::ModifyLayout { layout: Some(2) });
    }

    #[test]
    fn test_bare_save() {
        let cmd = parse("save the presentation");
        assert_eq!(cmd.action, Action::Save { filename: None });

        let cmd = parse("save presentation as Board Update");
        assert_eq!(
            cmd.action,
            Action::Save {
                filename: Some("Board Update".into())
            }
        );
    }

    #[test]
    fn test_fuzzy_fallback() {
        let cmd = parse("the chart thing please");
        assert_eq!(cmd.intent(), Intent::InsertChart);
        assert_eq!(cmd.confidence, FUZZY_CONFIDENCE);
        assert!(cmd.action.parameter_names().is_empty());
    }

    #[test]
    fn test_fuzzy_keyword_order() {
        // "slide" is declared before "delete"
        let cmd = parse("uh delete that slide");
        assert_eq!(cmd.intent(), Intent::AddSlide);
        assert_eq!(cmd.confidence, FUZZY_CONFIDENCE);
    }

    #[test]
    fn test_no_match() {
        let parser = CommandParser::new();
        assert!(parser.parse("the weather is nice today").is_none());
        assert!(parser.parse("   ").is_none());
    }

    #[test]
    fn test_generate_presentation() {
        let cmd = parse("generate a 4 slide presentation about Renewable Energy");
        assert_eq!(
            cmd.action,
            Action::GeneratePresentation {
                topic: Some("Renewable Energy".into()),
                slide_count: Some(4),
            }
        );
    }

    #[test]
    fn test_help_text_mentions_core_commands() {
        let help = help_text();
        assert!(help.contains("Delete slide number"));
        assert!(help.contains("Stop listening"));
    }
}
