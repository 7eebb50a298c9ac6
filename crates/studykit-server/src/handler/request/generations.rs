//! Generation request types.
//!
//! Every request carries the study material as `content`. Counts are bounded
//! so a single request cannot ask for an unbounded number of model calls.

use serde::{Deserialize, Serialize};
use studykit_core::study::ExamQuota;
use validator::{Validate, ValidationError};

use super::validations::{not_blank, validation_error};

/// Request payload for generating flashcards.
///
/// # Example
///
/// ```json
/// {
///   "content": "Photosynthesis converts light energy into chemical energy...",
///   "count": 20
/// }
/// ```
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFlashcards {
    /// Study material (1-500000 characters).
    #[validate(length(min = 1, max = 500_000), custom(function = "not_blank"))]
    pub content: String,

    /// Number of flashcards to generate (1-100).
    #[validate(range(min = 1, max = 100))]
    pub count: usize,
}

/// Request payload for generating an exam.
///
/// At least one of the per-kind counts must be non-zero.
///
/// # Example
///
/// ```json
/// {
///   "content": "The French Revolution began in 1789...",
///   "multipleChoice": 5,
///   "fillInBlank": 3,
///   "shortAnswer": 2
/// }
/// ```
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_exam_quota"))]
pub struct GenerateExam {
    /// Study material (1-500000 characters).
    #[validate(length(min = 1, max = 500_000), custom(function = "not_blank"))]
    pub content: String,

    /// Number of multiple choice questions (0-50).
    #[serde(default)]
    #[validate(range(max = 50))]
    pub multiple_choice: usize,

    /// Number of fill-in-the-blank questions (0-50).
    #[serde(default)]
    #[validate(range(max = 50))]
    pub fill_in_blank: usize,

    /// Number of short answer questions (0-50).
    #[serde(default)]
    #[validate(range(max = 50))]
    pub short_answer: usize,
}

impl GenerateExam {
    /// Returns the requested per-kind question counts.
    #[inline]
    pub fn quota(&self) -> ExamQuota {
        ExamQuota::new(self.multiple_choice, self.fill_in_blank, self.short_answer)
    }
}

fn validate_exam_quota(request: &GenerateExam) -> Result<(), ValidationError> {
    if request.quota().is_empty() {
        return Err(validation_error(
            "exam_quota",
            "Request at least one question of any type",
        ));
    }

    Ok(())
}

/// Request payload for generating study notes.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateNotes {
    /// Study material (1-500000 characters).
    #[validate(length(min = 1, max = 500_000), custom(function = "not_blank"))]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flashcard_count_is_bounded() {
        let request = GenerateFlashcards {
            content: "Cells divide by mitosis.".into(),
            count: 101,
        };
        assert!(request.validate().is_err());

        let request = GenerateFlashcards { count: 100, ..request };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn exam_needs_one_question() {
        let request: GenerateExam =
            serde_json::from_str(r#"{ "content": "Cells divide by mitosis." }"#).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.errors().contains_key("__all__"));

        let request: GenerateExam = serde_json::from_str(
            r#"{ "content": "Cells divide by mitosis.", "shortAnswer": 2 }"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.quota(), ExamQuota::new(0, 0, 2));
    }

    #[test]
    fn exam_counts_are_bounded() {
        let request: GenerateExam = serde_json::from_str(
            r#"{ "content": "Cells divide by mitosis.", "multipleChoice": 51 }"#,
        )
        .unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("multiple_choice"));
    }

    #[test]
    fn blank_notes_content_is_rejected() {
        let request = GenerateNotes {
            content: "   ".into(),
        };
        assert!(request.validate().is_err());
    }
}
