//! Generation response types.

use serde::{Deserialize, Serialize};
use studykit_core::study::{ExamQuestion, Flashcard};

/// Flashcards generated from the submitted content.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcards {
    /// Generated cards, at most the requested count.
    pub flashcards: Vec<Flashcard>,
}

/// Exam questions generated from the submitted content.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamQuestions {
    /// Generated questions, grouped by kind.
    pub exam_questions: Vec<ExamQuestion>,
}

/// Study notes generated from the submitted content.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notes {
    /// Markdown notes, one section per chunk.
    pub notes: String,
}
