//! Static pattern table for command recognition
//!
//! Rules are tried in declaration order and, within a rule, patterns in
//! listed order. The first pattern that matches anywhere in the input wins,
//! so more specific phrasings must be declared before general ones.
//! Capture groups bind positionally to the rule's `parameter_names`.

use crate::command::intent::Intent;
use crate::command::resolver::ordinal_pattern;
use regex::Regex;
use std::sync::OnceLock;

/// Placeholder substituted with the spoken-ordinal alternation
const ORDINAL: &str = "{ordinal}";

/// Placeholder substituted with a one- or two-word color name
const COLOR: &str = "{color}";

const COLOR_PATTERN: &str = r"((?:light|dark)\s+\w+|\w+)";

struct RuleSpec {
    name: &'static str,
    intent: Intent,
    patterns: &'static [&'static str],
    parameter_names: &'static [&'static str],
}

const RULES: &[RuleSpec] = &[
    RuleSpec {
        name: "generate_presentation",
        intent: Intent::GeneratePresentation,
        patterns: &[
            r"\b(?:generate|create|make|build)\s+(?:an?\s+)?(?:(\d+)[\s-]+slides?\s+)?presentation\s+(?:about|on|for)\s+(.+)",
            r"\bgenerate\s+(?:an?\s+)?(?:(\d+)[\s-]+)?(?:slides|deck)\s+(?:about|on|for)\s+(.+)",
        ],
        parameter_names: &["slide_count", "topic"],
    },
    RuleSpec {
        name: "ai_enhance_slide",
        intent: Intent::AiEnhanceSlide,
        patterns: &[
            r"\b(?:enhance|improve)\s+(?:this\s+|the\s+|current\s+)?slide\b",
            r"\bai\s+enhance\b",
        ],
        parameter_names: &[],
    },
    RuleSpec {
        name: "add_slide",
        intent: Intent::AddSlide,
        patterns: &[
            r"\b(?:create|add|make)\s+(?:an?\s+)?(?:new\s+)?slide\s+(?:with\s+(?:the\s+)?title|titled|called)\s+(.+)",
            r"\b(?:create|add|make)\s+(?:an?\s+)?(?:new\s+)?slide\s+(?:about|on)\s+(.+)",
            r"\b(?:create|add|make|new)\s+(?:an?\s+)?(?:new\s+)?slide\b",
            r"\b(?:create|add)\s+(?:an?\s+)?(.+?)\s+slide\b",
        ],
        parameter_names: &["title", "layout"],
    },
    RuleSpec {
        name: "delete_slide",
        intent: Intent::DeleteSlide,
        patterns: &[
            r"\b(?:delete|remove)\s+slide\s+(?:number\s+)?{ordinal}",
            r"\b(?:delete|remove)\s+(?:the\s+)?{ordinal}(?:st|nd|rd|th)?\s+slide",
        ],
        parameter_names: &["slide_number"],
    },
    RuleSpec {
        name: "update_title",
        intent: Intent::UpdateText,
        patterns: &[
            r"\b(?:change|update|set)\s+(?:the\s+)?title\s+to\s+(.+)",
            r"\b(?:make|set)\s+(?:the\s+)?title\s+(.+)",
            r"\btitle\s+should\s+be\s+(.+)",
        ],
        parameter_names: &["title"],
    },
    RuleSpec {
        name: "update_content",
        intent: Intent::UpdateText,
        patterns: &[
            r"\b(?:add|set|change)\s+(?:the\s+)?content\s+(?:to\s+)?(.+)",
            r"\b(?:add|set|change|update)\s+(?:the\s+)?text\s+(?:to\s+)?(.+)",
            r"^(?:write|type)\s+(.+)",
        ],
        parameter_names: &["content"],
    },
    RuleSpec {
        name: "insert_chart",
        intent: Intent::InsertChart,
        patterns: &[
            r"\b(?:add|insert|create)\s+(?:an?\s+)?(\w+)\s+chart\b",
            r"\b(?:add|insert|create)\s+(?:an?\s+)?chart\s+(?:of\s+type\s+)?(\w+)",
            r"\b(?:make|create|add|insert)\s+(?:an?\s+)?(?:chart|graph)\b",
        ],
        parameter_names: &["chart_type"],
    },
    RuleSpec {
        name: "insert_image",
        intent: Intent::InsertImage,
        patterns: &[
            r"\b(?:add|insert)\s+(?:an?\s+)?image\s+(?:from\s+)?(.+)",
            r"\b(?:add|insert)\s+(?:a\s+)?picture\s+(?:from\s+)?(.+)",
            r"\b(?:load|open)\s+image\s+(.+)",
        ],
        parameter_names: &["image_path"],
    },
    RuleSpec {
        name: "change_background",
        intent: Intent::ChangeBackground,
        patterns: &[
            r"\b(?:change|set)\s+(?:the\s+)?background\s+(?:colou?r\s+)?(?:to\s+)?{color}",
            r"\b(?:make|set)\s+(?:the\s+)?background\s+{color}",
            r"\bbackground\s+(?:should\s+be\s+)?{color}",
        ],
        parameter_names: &["color"],
    },
    RuleSpec {
        name: "change_layout",
        intent: Intent::ModifyLayout,
        patterns: &[
            r"\b(?:change|set)\s+(?:the\s+)?layout\s+to\s+(.+)",
            r"\b(?:use|apply)\s+(?:the\s+|an?\s+)?(.+?)\s+layout\b",
            r"\b(?:make|set)\s+(?:this\s+)?(?:an?\s+)?(.+?)\s+slide\b",
        ],
        parameter_names: &["layout"],
    },
    RuleSpec {
        name: "save_presentation",
        intent: Intent::Save,
        patterns: &[
            r"\b(?:save|export)\s+(?:the\s+)?(?:presentation|file|deck)\s+(?:as\s+)?(.+)",
            r"^(?:save|export)(?:\s+(?:the\s+)?(?:presentation|file|deck))?$",
            r"\b(?:save|export)\s+(?:as\s+)?(.+)",
        ],
        parameter_names: &["filename"],
    },
    RuleSpec {
        name: "go_to_slide",
        intent: Intent::GoToSlide,
        patterns: &[
            r"\b(?:go\s+to|jump\s+to|open|show)\s+slide\s+(?:number\s+)?{ordinal}",
            r"\b(?:go\s+to|jump\s+to|open|show)\s+(?:the\s+)?{ordinal}(?:st|nd|rd|th)?\s+slide",
        ],
        parameter_names: &["slide_number"],
    },
    RuleSpec {
        name: "help",
        intent: Intent::Help,
        patterns: &[
            r"\b(?:help|what\s+can\s+you\s+do)\b",
            r"\b(?:show|list)\s+(?:the\s+)?(?:available\s+)?commands\b",
        ],
        parameter_names: &[],
    },
    RuleSpec {
        name: "stop_listening",
        intent: Intent::StopListening,
        patterns: &[
            r"\b(?:stop|quit|exit)\s+(?:listening|recognition)\b",
            r"^(?:stop|quit|exit)$",
        ],
        parameter_names: &[],
    },
];

/// Keyword fallback table, scanned in order against the lowercased input
pub const FUZZY_KEYWORDS: &[(&str, Intent)] = &[
    ("slide", Intent::AddSlide),
    ("delete", Intent::DeleteSlide),
    ("title", Intent::UpdateText),
    ("chart", Intent::InsertChart),
    ("image", Intent::InsertImage),
    ("picture", Intent::InsertImage),
    ("background", Intent::ChangeBackground),
    ("save", Intent::Save),
    ("help", Intent::Help),
];

/// One recognition rule: an intent and the patterns that express it
#[derive(Debug)]
pub struct PatternRule {
    pub name: &'static str,
    pub intent: Intent,
    pub patterns: Vec<Regex>,
    pub parameter_names: &'static [&'static str],
}

fn compile(pattern: &str) -> Regex {
    let expanded = pattern
        .replace(ORDINAL, &ordinal_pattern())
        .replace(COLOR, COLOR_PATTERN);
    // Patterns are compile-time constants; the table test exercises them all
    Regex::new(&format!("(?i){}", expanded))
        .unwrap_or_else(|e| panic!("invalid command pattern {:?}: {}", pattern, e))
}

/// The process-wide pattern table, compiled on first use
pub fn pattern_table() -> &'static [PatternRule] {
    static TABLE: OnceLock<Vec<PatternRule>> = OnceLock::new();
    TABLE.get_or_init(|| {
        RULES
            .iter()
            .map(|rule| PatternRule {
                name: rule.name,
                intent: rule.intent,
                patterns: rule.patterns.iter().map(|p| compile(p)).collect(),
                parameter_names: rule.parameter_names,
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::intent::Action;

    #[test]
    fn test_table_compiles_in_declared_order() {
        let table = pattern_table();
        assert_eq!(table.len(), RULES.len());
        assert_eq!(table[0].name, "generate_presentation");
        assert_eq!(table.last().unwrap().intent, Intent::StopListening);
    }

    #[test]
    fn test_capture_groups_fit_parameter_names() {
        for rule in pattern_table() {
            for pattern in &rule.patterns {
                assert!(
                    pattern.captures_len() - 1 <= rule.parameter_names.len(),
                    "{} has more groups than parameter names: {}",
                    rule.name,
                    pattern.as_str()
                );
            }
        }
    }

    #[test]
    fn test_parameter_names_belong_to_intent() {
        use crate::command::resolver::resolve_parameter;

        for rule in pattern_table() {
            for name in rule.parameter_names {
                let mut action = Action::empty(rule.intent);
                let value = resolve_parameter(name, "2");
                assert!(
                    action.bind(name, value),
                    "{} cannot bind {}",
                    rule.intent,
                    name
                );
            }
        }
    }
}
