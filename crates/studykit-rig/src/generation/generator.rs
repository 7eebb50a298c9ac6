//! The seam between orchestration and the model.

use async_trait::async_trait;
use studykit_core::study::{ExamQuestion, ExamQuota, Flashcard};

use crate::Result;

/// Generates study material from a single piece of text.
///
/// Implementations make exactly one model call per method invocation. Chunking,
/// pacing and truncation are handled by [`StudyService`].
///
/// [`StudyService`]: super::StudyService
#[async_trait]
pub trait StudyGenerator: Send + Sync {
    /// Generates up to `count` flashcards from `text`.
    async fn flashcards(&self, text: &str, count: usize) -> Result<Vec<Flashcard>>;

    /// Generates exam questions from `text`, following the per-kind `quota`.
    async fn exam_questions(&self, text: &str, quota: ExamQuota) -> Result<Vec<ExamQuestion>>;

    /// Writes review notes for `text`.
    async fn notes(&self, text: &str) -> Result<String>;

    /// Name of the backing provider.
    fn provider_name(&self) -> &str;

    /// Name of the backing model.
    fn model_name(&self) -> &str;
}
