//! Prompts sent with every generation request

use chrono::NaiveDate;
use velara_core::{VisualColor, ARTICLES_PER_DECK};

/// System and user instructions for a deck generation run
#[derive(Debug, Clone)]
pub struct PromptSet {
    pub system: String,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self {
            system: default_system_prompt(),
        }
    }
}

impl PromptSet {
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
        }
    }

    /// User instruction for the deck of `date`, e.g. "Generate the Velara Deck for Sun Oct 18 2026."
    pub fn user_prompt(&self, date: NaiveDate) -> String {
        format!("Generate the Velara Deck for {}.", date.format("%a %b %d %Y"))
    }
}

fn default_system_prompt() -> String {
    let palette = VisualColor::ALL
        .iter()
        .map(|c| format!("{} ({})", c.token(), c.display_name()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are Velara, a curator of AI news for discerning readers.

Search the web for REAL AI news published in the last 24 hours. Look for:
- New model releases and research breakthroughs
- Significant papers or announcements
- Major AI company news
- AI policy, regulation and societal impact
- Shifts in how people think and talk about AI

Pick the {count} MOST SIGNIFICANT real stories.
Rank them: philosophical shifts first, then model breakthroughs, then societal impact.
Cite the source URL inside each story's content.

Respond with a JSON object holding an array of exactly {count} articles under the key "news":
{{
  "news": [
    {{
      "id": 1,
      "headline": "Short headline grounded in the real story",
      "tag": "CAT.001",
      "sub": "Subtitle giving the event context",
      "readTime": "04:00",
      "summary": "Direct impact on the reader. At most 2 sentences, grounded in facts.",
      "content": "Analysis of the event with its source URL. At most 150 words, paragraphs separated by a blank line.",
      "visualColor": "{first}"
    }}
  ]
}}

Number the articles 1 to {count} in order of significance.
Allowed visualColor values: {palette}. Use each color once."#,
        count = ARTICLES_PER_DECK,
        first = VisualColor::AcidLime.token(),
        palette = palette,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_carries_date() {
        let prompts = PromptSet::default();
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(prompts.user_prompt(date), "Generate the Velara Deck for Sun Oct 18 2026.");
    }

    #[test]
    fn test_system_prompt_lists_palette() {
        let prompts = PromptSet::default();
        for color in VisualColor::ALL {
            assert!(prompts.system.contains(color.token()));
        }
        assert!(prompts.system.contains("exactly 3 articles"));
    }
}
