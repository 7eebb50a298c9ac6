//! Flashcard generation handler.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use studykit_rig::StudyService;
use tokio_util::sync::CancellationToken;

use super::request::GenerateFlashcards;
use super::response::Flashcards;
use crate::extract::{Json, ValidateJson};
use crate::handler::Result;
use crate::service::ServiceState;

/// Tracing target for flashcard operations.
const TRACING_TARGET: &str = "studykit_server::handler::flashcards";

/// Generates flashcards from the submitted content.
#[tracing::instrument(skip_all, fields(count = request.count, content_len = request.content.len()))]
async fn generate_flashcards(
    State(study): State<StudyService>,
    State(shutdown): State<CancellationToken>,
    ValidateJson(request): ValidateJson<GenerateFlashcards>,
) -> Result<(StatusCode, Json<Flashcards>)> {
    tracing::debug!(
        target: TRACING_TARGET,
        chunked = study.needs_chunking(&request.content),
        "Generating flashcards"
    );

    let cancel = shutdown.child_token();
    let flashcards = study
        .generate_flashcards(&request.content, request.count, &cancel)
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        requested = request.count,
        generated = flashcards.len(),
        "Flashcards generated",
    );

    Ok((StatusCode::OK, Json(Flashcards { flashcards })))
}

/// Returns a [`Router`] with all flashcard routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/generate-flashcards", post(generate_flashcards))
}
