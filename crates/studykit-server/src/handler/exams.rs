//! Exam generation and grading handlers.
//!
//! Grading runs a whole [`ExamSession`] per request: answers are recorded,
//! the exam is submitted, and any reviewer verdicts in `manualScores` are
//! applied. The report is returned at whatever stage the session reached, so
//! an exam with unmarked short answers comes back in the `review` stage.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use studykit_core::grading::{ExamSession, ExamStage};
use studykit_core::study::QuestionKind;
use studykit_rig::StudyService;
use tokio_util::sync::CancellationToken;

use super::request::{GenerateExam, GradeExam};
use super::response::{ExamQuestions, ExamReport};
use crate::extract::{Json, ValidateJson};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for exam operations.
const TRACING_TARGET: &str = "studykit_server::handler::exams";

/// Generates exam questions from the submitted content.
#[tracing::instrument(skip_all, fields(content_len = request.content.len()))]
async fn generate_exam(
    State(study): State<StudyService>,
    State(shutdown): State<CancellationToken>,
    ValidateJson(request): ValidateJson<GenerateExam>,
) -> Result<(StatusCode, Json<ExamQuestions>)> {
    let quota = request.quota();

    tracing::debug!(
        target: TRACING_TARGET,
        multiple_choice = quota.multiple_choice,
        fill_in_blank = quota.fill_in_blank,
        short_answer = quota.short_answer,
        "Generating exam"
    );

    let cancel = shutdown.child_token();
    let exam_questions = study.generate_exam(&request.content, quota, &cancel).await?;

    tracing::info!(
        target: TRACING_TARGET,
        requested = quota.total(),
        generated = exam_questions.len(),
        "Exam generated",
    );

    Ok((StatusCode::OK, Json(ExamQuestions { exam_questions })))
}

/// Grades an exam attempt.
#[tracing::instrument(skip_all, fields(questions = request.questions.len()))]
async fn grade_exam(
    ValidateJson(request): ValidateJson<GradeExam>,
) -> Result<(StatusCode, Json<ExamReport>)> {
    let GradeExam {
        questions,
        answers,
        manual_scores,
    } = request;

    for &index in manual_scores.keys() {
        match questions.get(index) {
            Some(question) if question.kind == QuestionKind::ShortAnswer => {}
            Some(_) => {
                return Err(ErrorKind::BadRequest
                    .with_message(format!("Question {index} is scored automatically"))
                    .with_resource("manualScores"));
            }
            None => {
                return Err(ErrorKind::BadRequest
                    .with_message(format!("Question {index} does not exist"))
                    .with_resource("manualScores"));
            }
        }
    }

    let mut session = ExamSession::new(questions)?;
    for (index, answer) in answers.into_iter().enumerate() {
        if let Some(answer) = answer {
            session.answer(index, answer)?;
        }
    }

    if session.submit()? == ExamStage::Review && !manual_scores.is_empty() {
        for (index, correct) in manual_scores {
            session.mark(index, correct)?;
        }

        if session.report().pending.is_empty() {
            session.finish()?;
        }
    }

    let report = session.report();

    tracing::info!(
        target: TRACING_TARGET,
        stage = %report.stage,
        correct = report.correct,
        percentage = report.percentage,
        pending = report.pending.len(),
        "Exam graded",
    );

    Ok((StatusCode::OK, Json(report)))
}

/// Returns a [`Router`] with all exam routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/generate-exam", post(generate_exam))
        .route("/grade-exam", post(grade_exam))
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::handler::test::{MockGenerator, create_test_server_with_generator};

    fn questions() -> Value {
        json!([
            { "type": "multipleChoice", "question": "2 + 2?", "options": ["3", "4", "5"], "answer": "4" },
            { "type": "fillInBlank", "question": "The sky is ___.", "answer": "blue" },
            { "type": "shortAnswer", "question": "Why is the sky blue?", "answer": "Scattering" }
        ])
    }

    #[tokio::test]
    async fn generates_requested_kinds() -> anyhow::Result<()> {
        let server = create_test_server_with_generator(MockGenerator::default())?;

        let response = server
            .post("/api/generate-exam")
            .json(&json!({
                "content": "Water boils at 100 degrees Celsius at sea level.",
                "multipleChoice": 2,
                "shortAnswer": 1
            }))
            .await;
        response.assert_status_ok();

        let body = response.json::<ExamQuestions>();
        let kinds: Vec<_> = body.exam_questions.iter().map(|q| q.kind).collect();
        assert_eq!(
            kinds,
            vec![
                QuestionKind::MultipleChoice,
                QuestionKind::MultipleChoice,
                QuestionKind::ShortAnswer,
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn all_zero_counts_are_bad_request() -> anyhow::Result<()> {
        let server = create_test_server_with_generator(MockGenerator::default())?;

        let response = server
            .post("/api/generate-exam")
            .json(&json!({ "content": "Water boils at 100 degrees Celsius." }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn grading_waits_for_review() -> anyhow::Result<()> {
        let server = create_test_server_with_generator(MockGenerator::default())?;

        let response = server
            .post("/api/grade-exam")
            .json(&json!({ "questions": questions(), "answers": ["B", "Blue", "Light scattering"] }))
            .await;
        response.assert_status_ok();

        let report = response.json::<ExamReport>();
        assert_eq!(report.stage, ExamStage::Review);
        assert_eq!(report.correct, 2);
        assert_eq!(report.pending, vec![2]);
        Ok(())
    }

    #[tokio::test]
    async fn grading_with_manual_scores_completes() -> anyhow::Result<()> {
        let server = create_test_server_with_generator(MockGenerator::default())?;

        let response = server
            .post("/api/grade-exam")
            .json(&json!({
                "questions": questions(),
                "answers": ["4", null, "Light scattering"],
                "manualScores": { "2": true }
            }))
            .await;
        response.assert_status_ok();

        let report = response.json::<ExamReport>();
        assert_eq!(report.stage, ExamStage::Completed);
        assert_eq!(report.correct, 2);
        assert_eq!(report.percentage, 66.7);
        Ok(())
    }

    #[tokio::test]
    async fn manual_score_for_auto_scored_question_is_bad_request() -> anyhow::Result<()> {
        let server = create_test_server_with_generator(MockGenerator::default())?;

        let response = server
            .post("/api/grade-exam")
            .json(&json!({ "questions": questions(), "manualScores": { "0": true } }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn extra_answers_are_bad_request() -> anyhow::Result<()> {
        let server = create_test_server_with_generator(MockGenerator::default())?;

        let response = server
            .post("/api/grade-exam")
            .json(&json!({ "questions": questions(), "answers": ["4", "blue", "x", "y"] }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }
}
