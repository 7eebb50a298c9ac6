//! Study notes generation handler.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use studykit_rig::StudyService;
use tokio_util::sync::CancellationToken;

use super::request::GenerateNotes;
use super::response::Notes;
use crate::extract::{Json, ValidateJson};
use crate::handler::Result;
use crate::service::ServiceState;

/// Tracing target for notes operations.
const TRACING_TARGET: &str = "studykit_server::handler::notes";

#[tracing::instrument(skip_all, fields(content_len = request.content.len()))]
async fn generate_notes(
    State(study): State<StudyService>,
    State(shutdown): State<CancellationToken>,
    ValidateJson(request): ValidateJson<GenerateNotes>,
) -> Result<(StatusCode, Json<Notes>)> {
    let cancel = shutdown.child_token();
    let notes = study.generate_notes(&request.content, &cancel).await?;

    tracing::info!(
        target: TRACING_TARGET,
        notes_len = notes.len(),
        "Notes generated",
    );

    Ok((StatusCode::OK, Json(Notes { notes })))
}

/// Returns a [`Router`] with all notes routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/generate-notes", post(generate_notes))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::handler::test::{MockGenerator, create_test_server_with_generator};

    #[tokio::test]
    async fn generates_notes() -> anyhow::Result<()> {
        let server = create_test_server_with_generator(MockGenerator::default())?;

        let response = server
            .post("/api/generate-notes")
            .json(&json!({ "content": "The Krebs cycle runs in the mitochondria." }))
            .await;
        response.assert_status_ok();

        let body = response.json::<Notes>();
        assert!(body.notes.starts_with("## "));
        Ok(())
    }

    #[tokio::test]
    async fn blank_content_is_bad_request() -> anyhow::Result<()> {
        let server = create_test_server_with_generator(MockGenerator::default())?;

        let response = server
            .post("/api/generate-notes")
            .json(&json!({ "content": "   " }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn oversized_content_is_bad_request() -> anyhow::Result<()> {
        let server = create_test_server_with_generator(MockGenerator::default())?;

        let content = "a".repeat(500_001);
        let response = server
            .post("/api/generate-notes")
            .json(&json!({ "content": content }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }
}
