//! Gather deck context for LLM prompts
//!
//! This module builds a short summary of the presentation being edited so
//! generated slides stay on topic with their neighbours.

use crate::core::types::SlideIndex;
use crate::deck::SlideDeck;

/// Titles included in a prompt, at most
const MAX_TITLES: usize = 10;

/// Presentation context for LLM prompts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeckContext {
    /// Name the presentation will be saved under
    pub presentation_name: String,
    /// Total number of slides
    pub slide_count: usize,
    /// Zero-based cursor position
    pub current_slide: SlideIndex,
    /// Titles of the leading slides, in order
    pub slide_titles: Vec<String>,
}

impl DeckContext {
    /// Build a context from the deck being edited
    pub fn from_deck<D: SlideDeck + ?Sized>(
        deck: &D,
        presentation_name: &str,
        current_slide: SlideIndex,
    ) -> Self {
        let slide_count = deck.slide_count();
        let slide_titles = (0..slide_count)
            .take(MAX_TITLES)
            .filter_map(|i| deck.slide_title(i))
            .filter(|t| !t.trim().is_empty())
            .collect();

        Self {
            presentation_name: presentation_name.to_string(),
            slide_count,
            current_slide,
            slide_titles,
        }
    }

    /// Create an empty context for testing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slide_count == 0
    }

    /// Generate a text summary of the context for LLM prompts
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str(&format!("Presentation: {}\n", self.presentation_name));
        s.push_str(&format!(
            "Slides: {} (editing slide {})\n",
            self.slide_count,
            self.current_slide + 1
        ));

        if !self.slide_titles.is_empty() {
            s.push_str("\nExisting slides:\n");
            for (i, title) in self.slide_titles.iter().enumerate() {
                s.push_str(&format!("{}. {}\n", i + 1, title));
            }
        }

        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{LAYOUT_CONTENT, LAYOUT_TITLE};
    use crate::deck::Presentation;

    #[test]
    fn test_empty_context() {
        let ctx = DeckContext::empty();
        assert!(ctx.is_empty());
        assert!(ctx.slide_titles.is_empty());
    }

    #[test]
    fn test_context_from_deck() {
        let mut deck = Presentation::default();
        deck.add_slide(LAYOUT_TITLE, "Welcome", Some("Intro")).unwrap();
        deck.add_slide(LAYOUT_CONTENT, "Roadmap", None).unwrap();

        let ctx = DeckContext::from_deck(&deck, "demo", 1);
        assert_eq!(ctx.slide_count, 2);
        assert_eq!(ctx.slide_titles, vec!["Welcome", "Roadmap"]);

        let summary = ctx.summary();
        assert!(summary.contains("Presentation: demo"));
        assert!(summary.contains("editing slide 2"));
        assert!(summary.contains("2. Roadmap"));
    }

    #[test]
    fn test_title_limit() {
        let mut deck = Presentation::default();
        for i in 0..15 {
            deck.add_slide(LAYOUT_CONTENT, &format!("Slide {}", i), None)
                .unwrap();
        }

        let ctx = DeckContext::from_deck(&deck, "long", 0);
        assert_eq!(ctx.slide_count, 15);
        assert_eq!(ctx.slide_titles.len(), MAX_TITLES);
    }

    #[test]
    fn test_blank_titles_skipped() {
        let mut deck = Presentation::default();
        deck.add_slide(LAYOUT_CONTENT, "", None).unwrap();
        deck.add_slide(LAYOUT_CONTENT, "Results", None).unwrap();

        let ctx = DeckContext::from_deck(&deck, "x", 0);
        assert_eq!(ctx.slide_titles, vec!["Results"]);
    }
}
