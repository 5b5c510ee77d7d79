//! Prompt construction for the AI services

use crate::core::types::ChartType;
use crate::llm::parser::SlideKind;

/// System prompt shared by every request
pub const SYSTEM_PROMPT: &str = "You are an assistant embedded in a voice-controlled \
presentation editor. Answer in plain text using exactly the format requested. \
Do not add explanations, greetings or markdown code fences.";

/// Ask for a clearer phrasing of a recognized voice command
pub fn enhance_prompt(text: &str) -> String {
    format!(
        r#"Rewrite this recognized voice command for a presentation editor so it is clear and complete.
Voice input: "{text}"

If it is a presentation command, restate it in the editor's command phrasing.
If it is unclear, give the most likely intended command.
If it is not a presentation command, return it unchanged.

Examples:
"add slide about sales" -> "create new slide with title Sales Report"
"make chart" -> "add column chart"
"change color blue" -> "change background to blue"

Reply with the command only.
Enhanced command:"#
    )
}

/// Ask for the text of one slide
pub fn content_prompt(topic: &str, kind: SlideKind, context: Option<&str>, language: &str) -> String {
    let mut prompt = format!(
        "Write the content of a presentation slide about: \"{topic}\"\n\n\
         Slide type: {kind}\n\
         Language: {language}\n"
    );

    if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
        prompt.push_str(&format!("Previous context:\n{}\n", context.trim_end()));
    }

    prompt.push_str(match kind {
        SlideKind::Title => {
            "\nProduce a title slide as:\n\
             Title: [main presentation title]\n\
             Subtitle: [short tagline]\n"
        }
        SlideKind::Content => {
            "\nProduce a content slide as:\n\
             Title: [slide title]\n\
             Content: [3-5 bullet points or a short paragraph]\n"
        }
        SlideKind::Conclusion => {
            "\nProduce a closing slide as:\n\
             Title: [closing title such as \"Key Takeaways\"]\n\
             Content: [3-4 concluding points]\n"
        }
        SlideKind::Other => {
            "\nProduce a slide as:\n\
             Title: [fitting slide title]\n\
             Content: [content that suits the slide]\n"
        }
    });

    prompt.push_str(
        "\nKeep the wording concise and suitable for projection. \
         Prefer bullet points starting with \"- \" for lists.\n",
    );

    prompt
}

/// Ask for an ordered list of slide titles
pub fn outline_prompt(topic: &str, slide_count: usize) -> String {
    format!(
        r#"Plan a presentation about: "{topic}"

List exactly {slide_count} slide titles as a numbered list:
1. [first slide title]
2. [second slide title]
...

Open with an introduction, cover the main points, and close with a conclusion when it fits.
Keep each title short."#
    )
}

/// Ask for plausible sample data for a chart
pub fn chart_prompt(topic: &str, chart_type: ChartType) -> String {
    format!(
        r#"Invent realistic sample data for a {chart_type} chart about: "{topic}"

Use 4-6 categories and 2-3 data series. Every series needs one numeric value per category.

Reply in this format:
Categories: [category, category, ...]
Series 1 Name: [name]
Series 1 Values: [number, number, ...]
Series 2 Name: [name]
Series 2 Values: [number, number, ...]"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhance_prompt_embeds_text_and_examples() {
        let prompt = enhance_prompt("make chart");
        assert!(prompt.contains("Voice input: \"make chart\""));
        assert!(prompt.contains("create new slide with title Sales Report"));
    }

    #[test]
    fn test_content_prompt_language_and_context() {
        let prompt = content_prompt("Rust", SlideKind::Conclusion, Some("Slides: 3"), "german");
        assert!(prompt.contains("Language: german"));
        assert!(prompt.contains("Slide type: conclusion"));
        assert!(prompt.contains("Previous context:\nSlides: 3"));
        assert!(prompt.contains("Key Takeaways"));
    }

    #[test]
    fn test_content_prompt_without_context() {
        let prompt = content_prompt("Rust", SlideKind::Title, Some("   "), "english");
        assert!(!prompt.contains("Previous context"));
        assert!(prompt.contains("Subtitle:"));
    }

    #[test]
    fn test_outline_and_chart_prompts() {
        assert!(outline_prompt("Oceans", 4).contains("exactly 4 slide titles"));
        assert!(chart_prompt("Sales", ChartType::Pie).contains("pie chart"));
    }
}
