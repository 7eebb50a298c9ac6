use serde::{Deserialize, Serialize};

use super::ExamStage;
use crate::study::QuestionKind;

/// Grading state of a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedAnswer {
    /// Question index within the exam.
    pub index: usize,
    /// Question kind.
    pub kind: QuestionKind,
    /// Answer given, if any.
    pub given: Option<String>,
    /// Expected answer.
    pub expected: String,
    /// Whether the answer was correct; `None` until scored.
    pub correct: Option<bool>,
}

/// Aggregate results of an exam session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamReport {
    /// Current stage of the session.
    pub stage: ExamStage,
    /// Number of questions in the exam.
    pub total: usize,
    /// Number of questions scored so far.
    pub scored: usize,
    /// Number of questions answered correctly.
    pub correct: usize,
    /// `correct / total` as a percentage rounded to one decimal.
    pub percentage: f64,
    /// Indices of short answers still waiting for a reviewer.
    pub pending: Vec<usize>,
    /// Per-question breakdown.
    pub answers: Vec<GradedAnswer>,
}

impl ExamReport {
    /// Returns true once every question has been scored.
    pub fn is_complete(&self) -> bool {
        self.stage == ExamStage::Completed
    }
}
