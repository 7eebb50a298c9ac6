//! Review notes agent.

use super::parse::strip_code_fence;
use crate::Result;
use crate::provider::CompletionProvider;

const NAME: &str = "NotesAgent";

const PREAMBLE: &str = "\
You are a study assistant that writes clear, well-organized review notes.
Cover the key concepts, definitions and relationships in the material.
Use Markdown headings and bullet points. Do not invent facts.";

const PROMPT_NOTES: &str = "\
Write structured review notes for the following study material.
Only output the notes in Markdown.";

/// Agent that writes review notes.
#[derive(Debug, Clone)]
pub struct NotesAgent {
    provider: CompletionProvider,
}

impl NotesAgent {
    /// Creates a new notes agent with the given completion provider.
    pub fn new(provider: CompletionProvider) -> Self {
        Self { provider }
    }

    /// Writes Markdown review notes for `text`.
    #[tracing::instrument(skip(self, text), fields(agent = NAME, model = %self.provider.model_name(), text_len = text.len()))]
    pub async fn generate(&self, text: &str) -> Result<String> {
        let prompt = format!("{PROMPT_NOTES}\n\nMaterial:\n{text}");
        let response = self.provider.complete(PREAMBLE, &prompt).await?;
        let notes = strip_code_fence(&response).to_owned();

        tracing::debug!(response_len = response.len(), "generate notes completed");
        Ok(notes)
    }
}
