//! Fail-open access to the AI capability
//!
//! Every method degrades instead of failing: with no generator configured,
//! or when a request errors, times out, or returns nothing usable, callers
//! get the original text back or `None`.

use crate::core::types::ChartType;
use crate::deck::ChartData;
use crate::llm::generator::TextGenerator;
use crate::llm::parser::{
    parse_chart_data_response, parse_content_response, parse_outline_response,
    GeneratedContent, SlideKind,
};
use crate::llm::prompts;
use std::sync::Arc;

pub struct AiGateway {
    generator: Option<Arc<dyn TextGenerator>>,
    language: String,
}

impl AiGateway {
    pub fn new(generator: Arc<dyn TextGenerator>, language: impl Into<String>) -> Self {
        Self {
            generator: Some(generator),
            language: language.into(),
        }
    }

    /// A gateway with no AI behind it
    pub fn unavailable() -> Self {
        Self {
            generator: None,
            language: "english".into(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.generator.is_some()
    }

    /// Run one request; errors and blank replies become `None`
    fn request(&self, purpose: &str, prompt: &str) -> Option<String> {
        let generator = self.generator.as_ref()?;
        match generator.generate(prompt) {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                tracing::warn!("Empty AI response for {}", purpose);
                None
            }
            Err(e) => {
                tracing::warn!("AI request for {} failed: {}", purpose, e);
                None
            }
        }
    }

    /// Suggest a clearer phrasing of a recognized command
    ///
    /// Returns `text` unchanged whenever no usable suggestion comes back.
    pub fn enhance(&self, text: &str) -> String {
        let Some(reply) = self.request("command enhancement", &prompts::enhance_prompt(text))
        else {
            return text.to_string();
        };

        let enhanced = clean_enhancement(&reply);
        if enhanced.is_empty() {
            return text.to_string();
        }
        if enhanced != text {
            tracing::info!("Enhanced voice command: '{}' -> '{}'", text, enhanced);
        }
        enhanced
    }

    pub fn generate_slide_content(
        &self,
        topic: &str,
        kind: SlideKind,
        context: Option<&str>,
    ) -> Option<GeneratedContent> {
        let prompt = prompts::content_prompt(topic, kind, context, &self.language);
        let reply = self.request("slide content", &prompt)?;
        let content = parse_content_response(&reply, kind);
        if content.title.is_empty() && content.body.is_empty() {
            tracing::warn!("AI slide content for '{}' had no title or body", topic);
            return None;
        }
        tracing::info!("Generated {} content for: {}", kind, topic);
        Some(content)
    }

    /// Ordered slide titles for `topic`; an empty outline counts as no outline
    pub fn generate_outline(&self, topic: &str, slide_count: usize) -> Option<Vec<String>> {
        let reply = self.request("outline", &prompts::outline_prompt(topic, slide_count))?;
        let outline = parse_outline_response(&reply);
        if outline.is_empty() {
            tracing::warn!("AI outline for '{}' contained no slide titles", topic);
            return None;
        }
        tracing::info!("Generated outline with {} slides for: {}", outline.len(), topic);
        Some(outline)
    }

    pub fn suggest_chart_data(&self, topic: &str, chart_type: ChartType) -> Option<ChartData> {
        let reply = self.request("chart data", &prompts::chart_prompt(topic, chart_type))?;
        let data = parse_chart_data_response(&reply);
        if data.is_none() {
            tracing::warn!("Failed to parse chart data from AI response");
        }
        data
    }
}

/// First line of the reply, without a label or surrounding quotes
fn clean_enhancement(reply: &str) -> String {
    let line = reply
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default();
    let line = match line.split_once(':') {
        Some((label, rest)) if label.eq_ignore_ascii_case("enhanced command") => rest.trim(),
        _ => line,
    };
    line.trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{DeckError, Result};

    struct Canned(&'static str);

    impl TextGenerator for Canned {
        fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Broken;

    impl TextGenerator for Broken {
        fn generate(&self, _prompt: &str) -> Result<String> {
            Err(DeckError::LlmTimeout(20))
        }
    }

    fn gateway(reply: &'static str) -> AiGateway {
        AiGateway::new(Arc::new(Canned(reply)), "english")
    }

    #[test]
    fn test_unavailable_passes_text_through() {
        let ai = AiGateway::unavailable();
        assert!(!ai.is_available());
        assert_eq!(ai.enhance("make chart"), "make chart");
        assert!(ai.generate_outline("Rust", 3).is_none());
        assert!(ai.suggest_chart_data("Rust", ChartType::Bar).is_none());
    }

    #[test]
    fn test_enhance_trims_reply() {
        let ai = gateway("  add column chart \n");
        assert_eq!(ai.enhance("make chart"), "add column chart");
    }

    #[test]
    fn test_enhance_strips_label_and_quotes() {
        let ai = gateway("Enhanced command: \"change background to blue\"");
        assert_eq!(ai.enhance("change color blue"), "change background to blue");
    }

    #[test]
    fn test_enhance_fails_open() {
        let ai = AiGateway::new(Arc::new(Broken), "english");
        assert!(ai.is_available());
        assert_eq!(ai.enhance("next slide"), "next slide");

        let blank = gateway("   \n ");
        assert_eq!(blank.enhance("help"), "help");
    }

    #[test]
    fn test_slide_content() {
        let ai = gateway("Title: Why Rust\nContent: Memory safety without GC");
        let content = ai
            .generate_slide_content("Rust", SlideKind::Content, None)
            .unwrap();
        assert_eq!(content.title, "Why Rust");
        assert_eq!(content.body, "Memory safety without GC");
    }

    #[test]
    fn test_empty_outline_is_none() {
        let ai = gateway("I can't do that.");
        assert!(ai.generate_outline("Rust", 3).is_none());
    }

    #[test]
    fn test_outline() {
        let ai = gateway("1. Intro\n2. Ownership\n3. Wrap-up");
        assert_eq!(
            ai.generate_outline("Rust", 3).unwrap(),
            vec!["Intro", "Ownership", "Wrap-up"]
        );
    }
}
