//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! Generation and grading routes live under `/api`; the health check is
//! served at the root. Unknown paths answer with a JSON `404`.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use studykit_server::handler::routes;
//! use studykit_server::service::{ServiceConfig, ServiceState};
//! use tokio_util::sync::CancellationToken;
//!
//! # fn example(config: ServiceConfig) -> anyhow::Result<()> {
//! let state = ServiceState::from_config(&config, CancellationToken::new())?;
//! let app: axum::Router = routes().with_state(state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod error;
mod exams;
mod flashcards;
mod monitors;
mod notes;
pub mod request;
pub mod response;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all generation and grading routes.
fn api_routes() -> Router<ServiceState> {
    Router::new()
        .merge(flashcards::routes())
        .merge(exams::routes())
        .merge(notes::routes())
}

/// Returns a [`Router`] with all routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .nest("/api", api_routes())
        .merge(monitors::routes())
        .fallback(handler)
}

#[cfg(test)]
pub(crate) mod test {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use studykit_core::study::{ExamQuestion, ExamQuota, Flashcard, QuestionKind};
    use studykit_rig::provider::{ProviderConfig, ProviderKind};
    use studykit_rig::{GenerationConfig, StudyGenerator};
    use strum::IntoEnumIterator;
    use tokio_util::sync::CancellationToken;

    use crate::handler::routes;
    use crate::service::{ServiceConfig, ServiceState};

    /// Answers every call with exactly what was asked for.
    #[derive(Debug, Default)]
    pub struct MockGenerator {
        empty: bool,
        failing: bool,
    }

    impl MockGenerator {
        /// Returns nothing usable from every call.
        pub fn empty() -> Self {
            Self {
                empty: true,
                ..Self::default()
            }
        }

        /// Fails every call with a provider error.
        pub fn failing() -> Self {
            Self {
                failing: true,
                ..Self::default()
            }
        }

        fn check(&self) -> studykit_rig::Result<()> {
            if self.failing {
                return Err(studykit_rig::Error::provider("mock", "upstream unavailable"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl StudyGenerator for MockGenerator {
        async fn flashcards(&self, _text: &str, count: usize) -> studykit_rig::Result<Vec<Flashcard>> {
            self.check()?;
            if self.empty {
                return Ok(Vec::new());
            }
            Ok((0..count)
                .map(|i| Flashcard::new(format!("term {i}"), format!("definition {i}")))
                .collect())
        }

        async fn exam_questions(
            &self,
            _text: &str,
            quota: ExamQuota,
        ) -> studykit_rig::Result<Vec<ExamQuestion>> {
            self.check()?;
            if self.empty {
                return Ok(Vec::new());
            }
            let mut questions = Vec::new();
            for kind in QuestionKind::iter() {
                for i in 0..quota.get(kind) {
                    questions.push(ExamQuestion::new(kind, format!("{kind} {i}"), "answer"));
                }
            }
            Ok(questions)
        }

        async fn notes(&self, _text: &str) -> studykit_rig::Result<String> {
            self.check()?;
            if self.empty {
                return Ok(String::new());
            }
            Ok("## Summary\n\n- key point".to_owned())
        }

        fn provider_name(&self) -> &str {
            "mock"
        }

        fn model_name(&self) -> &str {
            "mock-model"
        }
    }

    /// Returns a configuration that never waits between calls.
    pub fn test_config() -> ServiceConfig {
        let generation = GenerationConfig {
            call_delay_ms: 0,
            ..GenerationConfig::default()
        };

        ServiceConfig::new(ProviderConfig::new(ProviderKind::OpenAi, "test-key"))
            .with_generation(generation)
    }

    /// Returns a new [`TestServer`] backed by `generator` and `shutdown`.
    pub fn create_test_server_with_state(
        generator: MockGenerator,
        shutdown: CancellationToken,
    ) -> anyhow::Result<TestServer> {
        let state = ServiceState::new(Arc::new(generator), &test_config(), shutdown)?;
        let app = routes().with_state(state);
        let server = TestServer::new(app)?;
        Ok(server)
    }

    /// Returns a new [`TestServer`] backed by `generator`.
    pub fn create_test_server_with_generator(
        generator: MockGenerator,
    ) -> anyhow::Result<TestServer> {
        create_test_server_with_state(generator, CancellationToken::new())
    }

    /// Returns a new [`TestServer`] with the default mock generator.
    pub fn create_test_server() -> anyhow::Result<TestServer> {
        create_test_server_with_generator(MockGenerator::default())
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let server = create_test_server()?;
        assert!(server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/api/unknown").await;
        response.assert_status_not_found();

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["name"], "not_found");
        Ok(())
    }

    #[tokio::test]
    async fn cancelled_requests_are_unavailable() -> anyhow::Result<()> {
        let shutdown = CancellationToken::new();
        let server = create_test_server_with_state(MockGenerator::default(), shutdown.clone())?;
        shutdown.cancel();

        let response = server
            .post("/api/generate-notes")
            .json(&serde_json::json!({ "content": "Enzymes lower activation energy." }))
            .await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        Ok(())
    }
}
