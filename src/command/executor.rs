//! Command execution - applies validated commands to a deck

use crate::command::intent::{Action, Command};
use crate::command::parser::help_text;
use crate::core::config::AppConfig;
use crate::core::error::{DeckError, Result};
use crate::core::types::{
    ChartType, LayoutIndex, Rgb, SlideIndex, LAYOUT_CONTENT, LAYOUT_TITLE,
};
use crate::deck::{
    with_deck_extension, BackgroundFill, ChartData, SlideDeck, TextStyle, TextUpdate,
};
use crate::llm::{AiGateway, DeckContext, SlideKind};
use std::path::Path;

/// Title used when `add_slide` names none and no AI title is available
pub const PLACEHOLDER_TITLE: &str = "New Slide";

const DEFAULT_TOPIC: &str = "presentation";
const CHART_TOPIC: &str = "sample data visualization";
const ENHANCE_TOPIC: &str = "slide content";

/// Result of executing a command
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionResult {
    pub success: bool,
    /// Confirmation or failure notice for the user
    pub message: String,
    /// Longer text to show alongside the notice (help listing)
    pub output: Option<String>,
    /// New cursor position, when the command moved it
    pub current_slide: Option<SlideIndex>,
    /// AI generations whose output was used
    pub ai_generations: u32,
    /// The command asked the session to stop
    pub stop: bool,
}

impl ExecutionResult {
    fn done(&mut self, message: impl Into<String>) -> Result<()> {
        self.message = message.into();
        Ok(())
    }
}

/// Executes commands against a deck, filling gaps with AI content
pub struct CommandExecutor<'a> {
    ai: &'a AiGateway,
    config: &'a AppConfig,
}

impl<'a> CommandExecutor<'a> {
    pub fn new(ai: &'a AiGateway, config: &'a AppConfig) -> Self {
        Self { ai, config }
    }

    /// Execute a validated command with the cursor at `current`
    ///
    /// Deck and AI failures are reported in the result, never returned.
    pub fn execute<D: SlideDeck + ?Sized>(
        &self,
        deck: &mut D,
        command: &Command,
        current: SlideIndex,
    ) -> ExecutionResult {
        let mut result = ExecutionResult::default();
        match self.dispatch(deck, &command.action, current, &mut result) {
            Ok(()) => result.success = true,
            Err(e) => {
                tracing::warn!("{} failed: {}", command.intent(), e);
                result.success = false;
                result.current_slide = None;
                result.message = failure_notice(&e);
            }
        }
        result
    }

    fn dispatch<D: SlideDeck + ?Sized>(
        &self,
        deck: &mut D,
        action: &Action,
        current: SlideIndex,
        result: &mut ExecutionResult,
    ) -> Result<()> {
        match action {
            Action::AddSlide { title, layout } => {
                self.add_slide(deck, title.as_deref(), *layout, current, result)
            }
            Action::DeleteSlide { slide_number } => {
                let index = slide_number.unwrap_or(0);
                deck.delete_slide(index)?;
                // keep the cursor on the slide the user was on
                let cursor = if index < current { current - 1 } else { current };
                let last = deck.slide_count().saturating_sub(1);
                result.current_slide = Some(cursor.min(last));
                result.done(format!("Deleted slide {}", index + 1))
            }
            Action::UpdateText { title, content } => {
                self.update_text(deck, title.as_deref(), content.as_deref(), current, result)
            }
            Action::InsertChart { chart_type } => {
                self.insert_chart(deck, chart_type.unwrap_or_default(), current, result)
            }
            Action::InsertImage { image_path } => {
                let path = image_path.as_deref().unwrap_or(Path::new(""));
                if !path.exists() {
                    return Err(DeckError::FileNotFound(path.to_path_buf()));
                }
                deck.insert_image(current, path, None, None)?;
                result.done("Added image to slide")
            }
            Action::ChangeBackground { color } => {
                let color = color.unwrap_or(Rgb::WHITE);
                deck.change_background(current, &BackgroundFill::Solid(color))?;
                result.done(format!("Changed background to {}", color))
            }
            Action::ModifyLayout { layout } => {
                deck.modify_layout(current, layout.unwrap_or(LAYOUT_CONTENT))?;
                result.done("Changed slide layout")
            }
            Action::Save { filename } => {
                let name = filename
                    .as_deref()
                    .unwrap_or(&self.config.presentation_name);
                let path = self.config.output_dir.join(with_deck_extension(name));
                let written = deck.save(&path)?;
                result.done(format!("Presentation saved as {}", written.display()))
            }
            Action::GoToSlide { slide_number } => {
                let index = slide_number.unwrap_or(0);
                let count = deck.slide_count();
                if index >= count {
                    return Err(DeckError::SlideOutOfRange { index, count });
                }
                result.current_slide = Some(index);
                result.done(format!("Moved to slide {}", index + 1))
            }
            Action::Help => {
                result.output = Some(help_text().to_string());
                result.done("Available commands printed to console")
            }
            Action::StopListening => {
                result.stop = true;
                result.done("Stopping voice control")
            }
            Action::GeneratePresentation { topic, slide_count } => self.generate_presentation(
                deck,
                topic.as_deref().unwrap_or(DEFAULT_TOPIC),
                slide_count.unwrap_or(crate::command::resolver::DEFAULT_SLIDE_COUNT),
                result,
            ),
            Action::AiEnhanceSlide => self.enhance_slide(deck, current, result),
        }
    }

    fn context<D: SlideDeck + ?Sized>(&self, deck: &D, current: SlideIndex) -> String {
        DeckContext::from_deck(deck, &self.config.presentation_name, current).summary()
    }

    fn add_slide<D: SlideDeck + ?Sized>(
        &self,
        deck: &mut D,
        title: Option<&str>,
        layout: Option<LayoutIndex>,
        current: SlideIndex,
        result: &mut ExecutionResult,
    ) -> Result<()> {
        let mut slide_title = title.unwrap_or(PLACEHOLDER_TITLE).to_string();
        let mut slide_layout = layout.unwrap_or(LAYOUT_CONTENT);
        let mut body = None;

        if title.is_none() && self.ai.is_available() {
            let context = self.context(deck, current);
            let generated =
                self.ai
                    .generate_slide_content("presentation slide", SlideKind::Content, Some(&context));
            if let Some(content) = generated {
                tracing::info!("AI generated slide title: {}", content.title);
                if !content.title.is_empty() {
                    slide_title = content.title;
                }
                if layout.is_none() {
                    slide_layout = content.suggested_layout;
                }
                body = Some(content.body).filter(|b| !b.is_empty());
                result.ai_generations += 1;
            }
        }

        let index = deck.add_slide(slide_layout, &slide_title, body.as_deref())?;
        result.current_slide = Some(index);
        result.done(format!("Added slide: {}", slide_title))
    }

    fn update_text<D: SlideDeck + ?Sized>(
        &self,
        deck: &mut D,
        title: Option<&str>,
        content: Option<&str>,
        current: SlideIndex,
        result: &mut ExecutionResult,
    ) -> Result<()> {
        let mut update = TextUpdate {
            title: title.map(String::from),
            body: content.map(String::from),
        };

        if let (Some(title), None) = (title, content) {
            if self.ai.is_available() {
                let context = self.context(deck, current);
                let generated =
                    self.ai
                        .generate_slide_content(title, SlideKind::Content, Some(&context));
                if let Some(generated) = generated {
                    update.body = Some(generated.body).filter(|b| !b.is_empty());
                    result.ai_generations += 1;
                    tracing::info!("AI generated slide content");
                }
            }
        }

        deck.update_text(current, &update, TextStyle::emphasis())?;
        result.done("Updated slide text")
    }

    fn insert_chart<D: SlideDeck + ?Sized>(
        &self,
        deck: &mut D,
        chart_type: ChartType,
        current: SlideIndex,
        result: &mut ExecutionResult,
    ) -> Result<()> {
        let topic = deck
            .slide_title(current)
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| CHART_TOPIC.to_string());

        let data = match self.ai.suggest_chart_data(&topic, chart_type) {
            Some(data) => {
                result.ai_generations += 1;
                tracing::info!("AI generated chart data");
                data
            }
            None => ChartData::sample(),
        };

        deck.insert_chart(current, chart_type, &data, None, None)?;
        result.done(format!("Added {} chart", chart_type))
    }

    /// Rebuild the deck from an AI outline
    ///
    /// Nothing is touched until an outline exists. Afterwards the work is
    /// best-effort: an outline entry whose content cannot be generated or
    /// added is skipped, and slides already added stay.
    fn generate_presentation<D: SlideDeck + ?Sized>(
        &self,
        deck: &mut D,
        topic: &str,
        slide_count: usize,
        result: &mut ExecutionResult,
    ) -> Result<()> {
        if !self.ai.is_available() {
            return Err(DeckError::AiUnavailable("presentation generation"));
        }
        let outline = self
            .ai
            .generate_outline(topic, slide_count)
            .ok_or_else(|| DeckError::LlmError(format!("no outline generated for {}", topic)))?;
        result.ai_generations += 1;

        for index in (1..deck.slide_count()).rev() {
            deck.delete_slide(index)?;
        }

        let title_slide = self.ai.generate_slide_content(topic, SlideKind::Title, None);
        if title_slide.is_some() {
            result.ai_generations += 1;
        }
        let (title, subtitle) = match title_slide {
            Some(content) => (content.title, Some(content.body).filter(|b| !b.is_empty())),
            None => (outline[0].clone(), None),
        };

        if deck.slide_count() == 0 {
            deck.add_slide(LAYOUT_TITLE, &title, subtitle.as_deref())?;
        } else {
            deck.modify_layout(0, LAYOUT_TITLE)?;
            let update = TextUpdate {
                title: Some(title),
                body: subtitle,
            };
            deck.update_text(0, &update, TextStyle::default())?;
        }

        let context = format!("Part of a presentation about {}", topic);
        let last = outline.len().saturating_sub(1);
        for (position, entry) in outline.iter().enumerate().skip(1) {
            let kind = if position == last && outline.len() > 2 {
                SlideKind::Conclusion
            } else {
                SlideKind::Content
            };
            let Some(content) = self.ai.generate_slide_content(entry, kind, Some(&context)) else {
                tracing::warn!("Skipping outline entry '{}': no content generated", entry);
                continue;
            };
            result.ai_generations += 1;

            let title = if content.title.is_empty() {
                entry.as_str()
            } else {
                content.title.as_str()
            };
            let body = Some(content.body.as_str()).filter(|b| !b.is_empty());
            if let Err(e) = deck.add_slide(content.suggested_layout, title, body) {
                tracing::warn!("Skipping outline entry '{}': {}", entry, e);
            }
        }

        tracing::info!("Created AI presentation with {} slides", deck.slide_count());
        result.current_slide = Some(0);
        result.done(format!(
            "Generated {} slide presentation about {}",
            deck.slide_count(),
            topic
        ))
    }

    fn enhance_slide<D: SlideDeck + ?Sized>(
        &self,
        deck: &mut D,
        current: SlideIndex,
        result: &mut ExecutionResult,
    ) -> Result<()> {
        if !self.ai.is_available() {
            return Err(DeckError::AiUnavailable("slide enhancement"));
        }
        let count = deck.slide_count();
        if current >= count {
            return Err(DeckError::SlideOutOfRange {
                index: current,
                count,
            });
        }

        let topic = deck
            .slide_title(current)
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| ENHANCE_TOPIC.to_string());
        let context = self.context(deck, current);
        let content = self
            .ai
            .generate_slide_content(&topic, SlideKind::Content, Some(&context))
            .ok_or_else(|| DeckError::LlmError(format!("no content generated for {}", topic)))?;

        let update = TextUpdate {
            title: Some(content.title).filter(|t| !t.is_empty()),
            body: Some(content.body).filter(|b| !b.is_empty()),
        };
        deck.update_text(current, &update, TextStyle::emphasis())?;
        result.ai_generations += 1;
        result.done("Enhanced slide with AI content")
    }
}

/// User-facing notice for a failed command
fn failure_notice(error: &DeckError) -> String {
    match error {
        DeckError::FileNotFound(path) => format!("Image file not found: {}", path.display()),
        DeckError::SlideOutOfRange { .. } => "Invalid slide number".to_string(),
        DeckError::AiUnavailable(what) => format!("AI {} not available", what),
        other => format!("Command failed: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Intent;
    use crate::deck::Presentation;
    use crate::llm::TextGenerator;
    use std::sync::Arc;

    struct Scripted(&'static str);

    impl TextGenerator for Scripted {
        fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn deck_with(titles: &[&str]) -> Presentation {
        let mut deck = Presentation::default();
        for title in titles {
            deck.add_slide(LAYOUT_CONTENT, title, None).unwrap();
        }
        deck
    }

    fn cmd(action: Action) -> Command {
        Command::new(action, 0.8, "test")
    }

    #[test]
    fn test_add_slide_moves_cursor() {
        let ai = AiGateway::unavailable();
        let config = AppConfig::default();
        let executor = CommandExecutor::new(&ai, &config);
        let mut deck = deck_with(&["Intro"]);

        let result = executor.execute(
            &mut deck,
            &cmd(Action::AddSlide {
                title: Some("Budget".into()),
                layout: None,
            }),
            0,
        );

        assert!(result.success);
        assert_eq!(result.current_slide, Some(1));
        assert_eq!(deck.slide_title(1).as_deref(), Some("Budget"));
        assert_eq!(result.message, "Added slide: Budget");
    }

    #[test]
    fn test_add_slide_without_ai_uses_placeholder() {
        let ai = AiGateway::unavailable();
        let config = AppConfig::default();
        let executor = CommandExecutor::new(&ai, &config);
        let mut deck = Presentation::default();

        let result = executor.execute(&mut deck, &cmd(Action::empty(Intent::AddSlide)), 0);
        assert!(result.success);
        assert_eq!(deck.slide_title(0).as_deref(), Some(PLACEHOLDER_TITLE));
        assert_eq!(result.ai_generations, 0);
    }

    #[test]
    fn test_add_slide_ai_title() {
        let ai = AiGateway::new(
            Arc::new(Scripted("Title: Market Outlook\nContent: Demand keeps rising")),
            "english",
        );
        let config = AppConfig::default();
        let executor = CommandExecutor::new(&ai, &config);
        let mut deck = Presentation::default();

        let result = executor.execute(&mut deck, &cmd(Action::empty(Intent::AddSlide)), 0);
        assert!(result.success);
        assert_eq!(result.ai_generations, 1);
        assert_eq!(deck.slide_title(0).as_deref(), Some("Market Outlook"));
        assert_eq!(
            deck.slide(0).unwrap().body.as_deref(),
            Some("Demand keeps rising")
        );
    }

    #[test]
    fn test_delete_clamps_cursor() {
        let ai = AiGateway::unavailable();
        let config = AppConfig::default();
        let executor = CommandExecutor::new(&ai, &config);
        let mut deck = deck_with(&["a", "b", "c"]);

        let result = executor.execute(
            &mut deck,
            &cmd(Action::DeleteSlide {
                slide_number: Some(2),
            }),
            2,
        );
        assert!(result.success);
        assert_eq!(deck.slide_count(), 2);
        assert_eq!(result.current_slide, Some(1));
    }

    #[test]
    fn test_delete_before_cursor_follows_slide() {
        let ai = AiGateway::unavailable();
        let config = AppConfig::default();
        let executor = CommandExecutor::new(&ai, &config);
        let mut deck = deck_with(&["a", "b", "c"]);

        let result = executor.execute(
            &mut deck,
            &cmd(Action::DeleteSlide {
                slide_number: Some(0),
            }),
            2,
        );
        assert!(result.success);
        assert_eq!(result.current_slide, Some(1));
        assert_eq!(deck.slide_title(1).as_deref(), Some("c"));
    }

    #[test]
    fn test_delete_after_cursor_keeps_it() {
        let ai = AiGateway::unavailable();
        let config = AppConfig::default();
        let executor = CommandExecutor::new(&ai, &config);
        let mut deck = deck_with(&["a", "b", "c"]);

        let result = executor.execute(
            &mut deck,
            &cmd(Action::DeleteSlide {
                slide_number: Some(2),
            }),
            0,
        );
        assert!(result.success);
        assert_eq!(result.current_slide, Some(0));
    }

    #[test]
    fn test_generate_presentation_retitles_blank_first_slide() {
        let ai = AiGateway::new(
            Arc::new(Scripted("1. Oceans\n2. Tides\n3. Reefs")),
            "english",
        );
        let config = AppConfig::default();
        let executor = CommandExecutor::new(&ai, &config);
        let mut deck = Presentation::default();
        // blank layout: no title placeholder
        deck.add_slide(6, "", None).unwrap();

        let result = executor.execute(
            &mut deck,
            &cmd(Action::GeneratePresentation {
                topic: Some("Oceans".into()),
                slide_count: Some(3),
            }),
            0,
        );
        assert!(result.success);
        let first = deck.slide(0).unwrap();
        assert_eq!(first.layout, LAYOUT_TITLE);
        assert!(first.title.is_some());
    }

    #[test]
    fn test_go_to_slide_out_of_range() {
        let ai = AiGateway::unavailable();
        let config = AppConfig::default();
        let executor = CommandExecutor::new(&ai, &config);
        let mut deck = deck_with(&["a", "b"]);

        let result = executor.execute(
            &mut deck,
            &cmd(Action::GoToSlide {
                slide_number: Some(5),
            }),
            0,
        );
        assert!(!result.success);
        assert_eq!(result.current_slide, None);
        assert_eq!(result.message, "Invalid slide number");
    }

    #[test]
    fn test_missing_image_fails_before_deck() {
        let ai = AiGateway::unavailable();
        let config = AppConfig::default();
        let executor = CommandExecutor::new(&ai, &config);
        let mut deck = deck_with(&["a"]);

        let result = executor.execute(
            &mut deck,
            &cmd(Action::InsertImage {
                image_path: Some("/definitely/not/here.png".into()),
            }),
            0,
        );
        assert!(!result.success);
        assert!(result.message.starts_with("Image file not found"));
        assert!(deck.slide(0).unwrap().pictures.is_empty());
    }

    #[test]
    fn test_chart_falls_back_to_sample() {
        let ai = AiGateway::new(Arc::new(Scripted("no data today")), "english");
        let config = AppConfig::default();
        let executor = CommandExecutor::new(&ai, &config);
        let mut deck = deck_with(&["Sales"]);

        let result = executor.execute(
            &mut deck,
            &cmd(Action::InsertChart {
                chart_type: Some(ChartType::Line),
            }),
            0,
        );
        assert!(result.success);
        assert_eq!(result.ai_generations, 0);
        assert_eq!(deck.slide(0).unwrap().charts[0].data, ChartData::sample());
    }

    #[test]
    fn test_help_and_stop() {
        let ai = AiGateway::unavailable();
        let config = AppConfig::default();
        let executor = CommandExecutor::new(&ai, &config);
        let mut deck = deck_with(&["a"]);

        let help = executor.execute(&mut deck, &cmd(Action::Help), 0);
        assert!(help.success);
        assert!(help.output.is_some());

        let stop = executor.execute(&mut deck, &cmd(Action::StopListening), 0);
        assert!(stop.success && stop.stop);
    }

    #[test]
    fn test_enhance_requires_ai() {
        let ai = AiGateway::unavailable();
        let config = AppConfig::default();
        let executor = CommandExecutor::new(&ai, &config);
        let mut deck = deck_with(&["a"]);

        let result = executor.execute(&mut deck, &cmd(Action::AiEnhanceSlide), 0);
        assert!(!result.success);
        assert_eq!(result.message, "AI slide enhancement not available");
    }
}
