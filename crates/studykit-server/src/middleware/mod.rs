//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Recovery: request timeouts, handler panics and tower service errors
//! - Observability: request IDs, tracing spans and request timing
//! - Security: CORS, security headers, compression and body limits
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use axum::Router;
//! use studykit_server::middleware::{
//!     RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt,
//! };
//!
//! let app: Router = Router::new()
//!     .with_default_security()
//!     .with_metrics()
//!     .with_observability()
//!     .with_recovery(&RecoveryConfig::default());
//! ```

mod observability;
mod recovery;
mod security;

pub use observability::{RouterObservabilityExt, track_request_timing};
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{
    CorsConfig, DEFAULT_MAX_BODY_SIZE, FrameOptions, ReferrerPolicy, RouterSecurityExt,
    SecurityHeadersConfig,
};
