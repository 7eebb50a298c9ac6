//! Exam session state machine.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use tracing::debug;

use super::{ExamReport, GradedAnswer, score_answer};
use crate::study::{ExamQuestion, QuestionKind};
use crate::{Error, Result, TRACING_TARGET_GRADING};

/// Lifecycle stage of an [`ExamSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExamStage {
    /// Answers can be recorded.
    Answering,
    /// Auto-scored; short answers wait for a reviewer.
    Review,
    /// Every question is scored.
    Completed,
}

/// A single attempt at an exam.
#[derive(Debug, Clone)]
pub struct ExamSession {
    questions: Vec<ExamQuestion>,
    answers: Vec<Option<String>>,
    scores: Vec<Option<bool>>,
    stage: ExamStage,
}

impl ExamSession {
    /// Starts a session for `questions`.
    pub fn new(questions: Vec<ExamQuestion>) -> Result<Self> {
        if questions.is_empty() {
            return Err(Error::invalid_input().with_message("an exam needs at least one question"));
        }

        let count = questions.len();
        Ok(Self {
            questions,
            answers: vec![None; count],
            scores: vec![None; count],
            stage: ExamStage::Answering,
        })
    }

    /// Returns the current stage.
    pub fn stage(&self) -> ExamStage {
        self.stage
    }

    /// Returns the exam questions.
    pub fn questions(&self) -> &[ExamQuestion] {
        &self.questions
    }

    /// Records (or replaces) the answer to question `index`.
    pub fn answer(&mut self, index: usize, answer: impl Into<String>) -> Result<()> {
        self.expect_stage(ExamStage::Answering, "answer")?;
        self.check_index(index)?;
        self.answers[index] = Some(answer.into());
        Ok(())
    }

    /// Ends answering and scores every auto-scored question.
    ///
    /// Unanswered questions score as incorrect. Moves to [`ExamStage::Review`]
    /// when short answers remain, otherwise straight to [`ExamStage::Completed`].
    pub fn submit(&mut self) -> Result<ExamStage> {
        self.expect_stage(ExamStage::Answering, "submit")?;

        for (index, question) in self.questions.iter().enumerate() {
            if !question.kind.is_auto_scored() {
                continue;
            }
            let given = self.answers[index].as_deref().unwrap_or_default();
            self.scores[index] = score_answer(question, given);
        }

        self.stage = if self.pending().is_empty() {
            ExamStage::Completed
        } else {
            ExamStage::Review
        };

        debug!(
            target: TRACING_TARGET_GRADING,
            stage = %self.stage,
            pending = self.pending().len(),
            "exam submitted"
        );

        Ok(self.stage)
    }

    /// Records a reviewer's verdict on short answer `index`.
    pub fn mark(&mut self, index: usize, correct: bool) -> Result<()> {
        self.expect_stage(ExamStage::Review, "mark")?;
        self.check_index(index)?;

        if self.questions[index].kind != QuestionKind::ShortAnswer {
            return Err(Error::invalid_input()
                .with_message(format!("question {index} is scored automatically")));
        }

        self.scores[index] = Some(correct);
        Ok(())
    }

    /// Completes the review once every short answer is marked.
    pub fn finish(&mut self) -> Result<ExamReport> {
        match self.stage {
            ExamStage::Completed => return Ok(self.report()),
            ExamStage::Answering => {
                return Err(Error::invalid_state().with_message("cannot finish before submit"));
            }
            ExamStage::Review => {}
        }

        let pending = self.pending();
        if !pending.is_empty() {
            return Err(Error::invalid_state()
                .with_message(format!("short answers still unmarked: {pending:?}")));
        }

        self.stage = ExamStage::Completed;
        Ok(self.report())
    }

    /// Summarizes the session at its current stage.
    pub fn report(&self) -> ExamReport {
        let total = self.questions.len();
        let scored = self.scores.iter().filter(|score| score.is_some()).count();
        let correct = self.scores.iter().filter(|score| **score == Some(true)).count();
        let percentage = (correct as f64 * 1000.0 / total as f64).round() / 10.0;

        let answers = self
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| GradedAnswer {
                index,
                kind: question.kind,
                given: self.answers[index].clone(),
                expected: question.answer.clone(),
                correct: self.scores[index],
            })
            .collect();

        ExamReport {
            stage: self.stage,
            total,
            scored,
            correct,
            percentage,
            pending: self.pending(),
            answers,
        }
    }

    /// Short answer indices without a verdict.
    fn pending(&self) -> Vec<usize> {
        self.questions
            .iter()
            .enumerate()
            .filter(|(index, question)| {
                question.kind == QuestionKind::ShortAnswer && self.scores[*index].is_none()
            })
            .map(|(index, _)| index)
            .collect()
    }

    fn expect_stage(&self, expected: ExamStage, operation: &str) -> Result<()> {
        if self.stage == expected {
            return Ok(());
        }

        Err(Error::invalid_state().with_message(format!(
            "cannot {operation} while the exam is {}",
            self.stage
        )))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.questions.len() {
            return Ok(());
        }

        Err(Error::not_found().with_message(format!(
            "question {index} does not exist (exam has {})",
            self.questions.len()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn exam() -> Vec<ExamQuestion> {
        vec![
            ExamQuestion::new(QuestionKind::MultipleChoice, "2 + 2?", "4")
                .with_options(["3", "4", "5"]),
            ExamQuestion::new(QuestionKind::FillInBlank, "The sky is ___.", "blue"),
            ExamQuestion::new(QuestionKind::ShortAnswer, "Why is the sky blue?", "Scattering"),
        ]
    }

    #[test]
    fn empty_exam_is_rejected() {
        let error = ExamSession::new(Vec::new()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn full_lifecycle() {
        let mut session = ExamSession::new(exam()).unwrap();
        assert_eq!(session.stage(), ExamStage::Answering);

        session.answer(0, "B").unwrap();
        session.answer(1, "Blue").unwrap();
        session.answer(2, "Rayleigh scattering").unwrap();

        assert_eq!(session.submit().unwrap(), ExamStage::Review);
        let report = session.report();
        assert_eq!(report.scored, 2);
        assert_eq!(report.correct, 2);
        assert_eq!(report.pending, vec![2]);
        assert!(!report.is_complete());

        session.mark(2, true).unwrap();
        let report = session.finish().unwrap();
        assert!(report.is_complete());
        assert_eq!(report.correct, 3);
        assert_eq!(report.percentage, 100.0);
    }

    #[test]
    fn unanswered_questions_score_incorrect() {
        let questions = exam().into_iter().take(2).collect();
        let mut session = ExamSession::new(questions).unwrap();
        session.answer(0, "4").unwrap();

        assert_eq!(session.submit().unwrap(), ExamStage::Completed);
        let report = session.report();
        assert_eq!(report.correct, 1);
        assert_eq!(report.percentage, 50.0);
        assert_eq!(report.answers[1].correct, Some(false));
        assert_eq!(report.answers[1].given, None);
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        let questions = vec![
            ExamQuestion::new(QuestionKind::FillInBlank, "a", "a"),
            ExamQuestion::new(QuestionKind::FillInBlank, "b", "b"),
            ExamQuestion::new(QuestionKind::FillInBlank, "c", "c"),
        ];
        let mut session = ExamSession::new(questions).unwrap();
        session.answer(0, "a").unwrap();
        session.submit().unwrap();

        assert_eq!(session.report().percentage, 33.3);
    }

    #[test]
    fn stage_rules_are_enforced() {
        let mut session = ExamSession::new(exam()).unwrap();

        let error = session.mark(2, true).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidState);
        let error = session.finish().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidState);

        session.submit().unwrap();

        let error = session.answer(0, "4").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidState);
        let error = session.submit().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidState);
        let error = session.finish().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn only_short_answers_can_be_marked() {
        let mut session = ExamSession::new(exam()).unwrap();
        session.submit().unwrap();

        let error = session.mark(0, true).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
        let error = session.mark(9, true).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn out_of_range_answer_is_not_found() {
        let mut session = ExamSession::new(exam()).unwrap();
        let error = session.answer(3, "x").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }
}
