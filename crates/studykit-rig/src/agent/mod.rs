//! Task agents that prompt the model and interpret its output.

mod exam;
mod flashcard;
mod notes;
mod parse;

use async_trait::async_trait;
use studykit_core::study::{ExamQuestion, ExamQuota, Flashcard};

pub use self::exam::ExamAgent;
pub use self::flashcard::FlashcardAgent;
pub use self::notes::NotesAgent;

use crate::Result;
use crate::generation::StudyGenerator;
use crate::provider::CompletionProvider;

/// The three study agents sharing one completion provider.
#[derive(Debug, Clone)]
pub struct StudyAgents {
    provider: CompletionProvider,
    flashcards: FlashcardAgent,
    exam: ExamAgent,
    notes: NotesAgent,
}

impl StudyAgents {
    /// Creates all agents on top of `provider`.
    pub fn new(provider: CompletionProvider) -> Self {
        Self {
            flashcards: FlashcardAgent::new(provider.clone()),
            exam: ExamAgent::new(provider.clone()),
            notes: NotesAgent::new(provider.clone()),
            provider,
        }
    }
}

#[async_trait]
impl StudyGenerator for StudyAgents {
    async fn flashcards(&self, text: &str, count: usize) -> Result<Vec<Flashcard>> {
        self.flashcards.generate(text, count).await
    }

    async fn exam_questions(&self, text: &str, quota: ExamQuota) -> Result<Vec<ExamQuestion>> {
        self.exam.generate(text, quota).await
    }

    async fn notes(&self, text: &str) -> Result<String> {
        self.notes.generate(text).await
    }

    fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    fn model_name(&self) -> &str {
        self.provider.model_name()
    }
}
