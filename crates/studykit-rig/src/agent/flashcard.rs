//! Flashcard generation agent.

use studykit_core::study::Flashcard;

use super::parse::parse_items;
use crate::Result;
use crate::provider::CompletionProvider;

const NAME: &str = "FlashcardAgent";

const PREAMBLE: &str = "\
You are a study assistant that writes concise, accurate flashcards.
Each flashcard tests a single fact, term or concept from the provided material.
The front is a question or term; the back is a short, self-contained answer.
Always output valid JSON, no explanations or markdown formatting.";

const PROMPT_FLASHCARDS: &str = "\
Create exactly {count} flashcards from the following study material.
Return a JSON array where each element has the fields \"front\" and \"back\".
Only output the JSON array, no explanation.";

/// Agent that turns study material into flashcards.
#[derive(Debug, Clone)]
pub struct FlashcardAgent {
    provider: CompletionProvider,
}

impl FlashcardAgent {
    /// Creates a new flashcard agent with the given completion provider.
    pub fn new(provider: CompletionProvider) -> Self {
        Self { provider }
    }

    /// Generates up to `count` flashcards from `text`.
    #[tracing::instrument(skip(self, text), fields(agent = NAME, model = %self.provider.model_name(), text_len = text.len()))]
    pub async fn generate(&self, text: &str, count: usize) -> Result<Vec<Flashcard>> {
        let response = self.provider.complete(PREAMBLE, &prompt(text, count)).await?;
        let cards: Vec<Flashcard> = parse_items(&response, &["flashcards", "cards"])?;

        tracing::debug!(
            response_len = response.len(),
            cards = cards.len(),
            "generate flashcards completed"
        );
        Ok(cards)
    }
}

fn prompt(text: &str, count: usize) -> String {
    let instructions = PROMPT_FLASHCARDS.replace("{count}", &count.to_string());
    format!("{instructions}\n\nMaterial:\n{text}")
}
