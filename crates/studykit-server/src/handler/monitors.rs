//! Health check handler.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use jiff::Timestamp;
use studykit_rig::StudyService;
use tokio_util::sync::CancellationToken;

use super::response::HealthStatus;
use crate::extract::Json;
use crate::handler::Result;
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "studykit_server::handler::monitors";

/// Reports whether the server accepts generation requests.
///
/// The server turns unhealthy once shutdown has begun.
#[tracing::instrument(skip_all)]
async fn health_status(
    State(study): State<StudyService>,
    State(shutdown): State<CancellationToken>,
) -> Result<(StatusCode, Json<HealthStatus>)> {
    let is_healthy = !shutdown.is_cancelled();

    let response = HealthStatus {
        is_healthy,
        provider: study.provider_name().to_owned(),
        model: study.model_name().to_owned(),
        checked_at: Timestamp::now(),
    };

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(
        target: TRACING_TARGET,
        is_healthy,
        status_code = status_code.as_u16(),
        "Health status response prepared"
    );

    Ok((status_code, Json(response)))
}

/// Returns a [`Router`] with all health monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test::{MockGenerator, create_test_server, create_test_server_with_state};

    #[tokio::test]
    async fn healthy_while_running() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/health").await;
        response.assert_status_ok();

        let status = response.json::<HealthStatus>();
        assert!(status.is_healthy);
        assert_eq!(status.provider, "mock");
        assert_eq!(status.model, "mock-model");

        let age = Timestamp::now().duration_since(status.checked_at);
        assert!(age.as_secs() < 60, "timestamp should be recent");
        Ok(())
    }

    #[tokio::test]
    async fn unhealthy_after_shutdown() -> anyhow::Result<()> {
        let shutdown = CancellationToken::new();
        let server = create_test_server_with_state(MockGenerator::default(), shutdown.clone())?;
        shutdown.cancel();

        let response = server.get("/health").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert!(!response.json::<HealthStatus>().is_healthy);
        Ok(())
    }
}
