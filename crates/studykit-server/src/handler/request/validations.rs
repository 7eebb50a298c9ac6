//! Request validation utilities.

use studykit_core::study::ExamQuestion;
use validator::ValidationError;

pub fn validation_error(code: &'static str, message: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.to_string().into());
    error
}

/// Rejects content made only of whitespace.
pub fn not_blank(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(validation_error(
            "blank",
            "Content must contain some non-whitespace text",
        ));
    }

    Ok(())
}

/// Rejects questions without text or expected answer.
pub fn complete_questions(questions: &[ExamQuestion]) -> Result<(), ValidationError> {
    for (index, question) in questions.iter().enumerate() {
        if question.question.trim().is_empty() || question.answer.trim().is_empty() {
            return Err(validation_error(
                "question_incomplete",
                &format!("Question #{} needs both question text and an answer", index + 1),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use studykit_core::study::QuestionKind;

    use super::*;

    #[test]
    fn blank_content_is_rejected() {
        assert!(not_blank(" \n\t").is_err());
        assert!(not_blank("photosynthesis").is_ok());
    }

    #[test]
    fn incomplete_question_is_reported_by_position() {
        let questions = vec![
            ExamQuestion::new(QuestionKind::FillInBlank, "The sky is ___.", "blue"),
            ExamQuestion::new(QuestionKind::ShortAnswer, "Why?", " "),
        ];

        let error = complete_questions(&questions).unwrap_err();
        assert!(error.message.unwrap().contains("#2"));
    }
}
