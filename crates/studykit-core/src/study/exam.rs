use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Kind of exam question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumIter, EnumString)]
#[serde(rename_all = "camelCase")]
pub enum QuestionKind {
    /// Pick one of several options.
    #[serde(alias = "multiple_choice", alias = "multiple-choice")]
    #[strum(serialize = "multipleChoice")]
    MultipleChoice,
    /// Supply the missing word or phrase.
    #[serde(alias = "fill_in_blank", alias = "fill-in-blank", alias = "fillInTheBlank")]
    #[strum(serialize = "fillInBlank")]
    FillInBlank,
    /// Free-text answer, graded manually.
    #[serde(alias = "short_answer", alias = "short-answer")]
    #[strum(serialize = "shortAnswer")]
    ShortAnswer,
}

impl QuestionKind {
    /// Returns true if answers to this kind can be scored without a reviewer.
    pub fn is_auto_scored(self) -> bool {
        !matches!(self, Self::ShortAnswer)
    }
}

/// A single exam question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamQuestion {
    /// Question kind.
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Question text.
    pub question: String,
    /// Answer options, only used by multiple choice questions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Correct answer, or a model answer for short answer questions.
    #[serde(alias = "correctAnswer")]
    pub answer: String,
    /// Optional explanation of the correct answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl ExamQuestion {
    /// Creates a question without options or explanation.
    pub fn new(kind: QuestionKind, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            kind,
            question: question.into(),
            options: Vec::new(),
            answer: answer.into(),
            explanation: None,
        }
    }

    /// Sets the answer options.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }
}

/// Number of questions requested per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamQuota {
    /// Multiple choice questions.
    pub multiple_choice: usize,
    /// Fill-in-the-blank questions.
    pub fill_in_blank: usize,
    /// Short answer questions.
    pub short_answer: usize,
}

impl ExamQuota {
    /// Creates a quota from per-kind counts.
    pub fn new(multiple_choice: usize, fill_in_blank: usize, short_answer: usize) -> Self {
        Self {
            multiple_choice,
            fill_in_blank,
            short_answer,
        }
    }

    /// Returns the count requested for `kind`.
    pub fn get(&self, kind: QuestionKind) -> usize {
        match kind {
            QuestionKind::MultipleChoice => self.multiple_choice,
            QuestionKind::FillInBlank => self.fill_in_blank,
            QuestionKind::ShortAnswer => self.short_answer,
        }
    }

    /// Returns a mutable reference to the count for `kind`.
    pub fn get_mut(&mut self, kind: QuestionKind) -> &mut usize {
        match kind {
            QuestionKind::MultipleChoice => &mut self.multiple_choice,
            QuestionKind::FillInBlank => &mut self.fill_in_blank,
            QuestionKind::ShortAnswer => &mut self.short_answer,
        }
    }

    /// Total number of questions across all kinds.
    pub fn total(&self) -> usize {
        self.multiple_choice + self.fill_in_blank + self.short_answer
    }

    /// Returns true if no questions are requested.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_serializes_with_type_tag() {
        let question = ExamQuestion::new(QuestionKind::FillInBlank, "The sky is ___.", "blue");
        let json = serde_json::to_value(&question).unwrap();

        assert_eq!(json["type"], "fillInBlank");
        assert_eq!(json["answer"], "blue");
        assert!(json.get("options").is_none());
        assert!(json.get("explanation").is_none());
    }

    #[test]
    fn question_deserializes_without_optional_fields() {
        let question: ExamQuestion = serde_json::from_str(
            r#"{ "type": "shortAnswer", "question": "Why?", "answer": "Because." }"#,
        )
        .unwrap();

        assert_eq!(question.kind, QuestionKind::ShortAnswer);
        assert!(question.options.is_empty());
    }

    #[test]
    fn question_accepts_snake_case_kind() {
        let question: ExamQuestion = serde_json::from_str(
            r#"{ "type": "multiple_choice", "question": "2+2?", "options": ["3", "4"], "correctAnswer": "4" }"#,
        )
        .unwrap();

        assert_eq!(question.kind, QuestionKind::MultipleChoice);
        assert_eq!(question.answer, "4");
    }

    #[test]
    fn quota_totals() {
        let mut quota = ExamQuota::new(3, 0, 2);
        assert_eq!(quota.total(), 5);
        assert_eq!(quota.get(QuestionKind::ShortAnswer), 2);

        *quota.get_mut(QuestionKind::MultipleChoice) = 0;
        *quota.get_mut(QuestionKind::ShortAnswer) = 0;
        assert!(quota.is_empty());
    }

    #[test]
    fn kind_names_are_camel_case() {
        assert_eq!(QuestionKind::MultipleChoice.as_ref(), "multipleChoice");
        assert_eq!("shortAnswer".parse::<QuestionKind>().unwrap(), QuestionKind::ShortAnswer);
    }
}
