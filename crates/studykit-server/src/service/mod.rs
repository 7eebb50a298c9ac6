//! Application state and dependency injection.

mod config;

use std::sync::Arc;

use studykit_rig::agent::StudyAgents;
use studykit_rig::{Result, StudyGenerator, StudyService};
use tokio_util::sync::CancellationToken;

pub use crate::service::config::ServiceConfig;

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    /// Chunked generation over the configured model.
    pub study: StudyService,
    /// Root token cancelled on shutdown; requests derive child tokens from it.
    pub shutdown: CancellationToken,
}

impl ServiceState {
    /// Creates application state around an existing generator.
    pub fn new(
        generator: Arc<dyn StudyGenerator>,
        service_config: &ServiceConfig,
        shutdown: CancellationToken,
    ) -> Result<Self> {
        let study = StudyService::new(generator, service_config.generation.clone())?;
        Ok(Self { study, shutdown })
    }

    /// Initializes application state from configuration.
    ///
    /// Connects to the configured completion provider.
    pub fn from_config(service_config: &ServiceConfig, shutdown: CancellationToken) -> Result<Self> {
        let provider = service_config.provider.connect()?;
        let agents = StudyAgents::new(provider);
        Self::new(Arc::new(agents), service_config, shutdown)
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(study: StudyService);
impl_di!(shutdown: CancellationToken);
