//! Grading request types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use studykit_core::study::ExamQuestion;
use validator::Validate;

use super::validations::complete_questions;

/// Request payload for grading an exam attempt.
///
/// `answers` is positional: entry `i` answers question `i`, and `null` or a
/// missing trailing entry means the question was left blank. `manualScores`
/// holds reviewer verdicts for short answer questions, keyed by index.
///
/// # Example
///
/// ```json
/// {
///   "questions": [
///     { "type": "fillInBlank", "question": "The sky is ___.", "answer": "blue" },
///     { "type": "shortAnswer", "question": "Why?", "answer": "Scattering" }
///   ],
///   "answers": ["Blue", "Rayleigh scattering"],
///   "manualScores": { "1": true }
/// }
/// ```
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GradeExam {
    /// Questions of the exam being graded (1-150).
    #[validate(length(min = 1, max = 150), custom(function = "complete_questions"))]
    pub questions: Vec<ExamQuestion>,

    /// Answers given, by question position.
    #[serde(default)]
    #[validate(length(max = 150))]
    pub answers: Vec<Option<String>>,

    /// Reviewer verdicts for short answer questions.
    #[serde(default)]
    pub manual_scores: HashMap<usize, bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_scores_default_to_empty() {
        let request: GradeExam = serde_json::from_str(
            r#"{ "questions": [{ "type": "fillInBlank", "question": "a", "answer": "a" }] }"#,
        )
        .unwrap();

        assert!(request.validate().is_ok());
        assert!(request.answers.is_empty());
        assert!(request.manual_scores.is_empty());
    }

    #[test]
    fn empty_exam_is_rejected() {
        let request: GradeExam = serde_json::from_str(r#"{ "questions": [] }"#).unwrap();
        assert!(request.validate().is_err());
    }
}
