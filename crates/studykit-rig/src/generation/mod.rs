//! Chunked, rate-limited generation of study material.
//!
//! [`StudyService`] decides whether content needs chunking, computes per-chunk
//! quotas, and drives one [`StudyGenerator`] call per chunk through a
//! [`SequentialRunner`]. Results come back in chunk order and are truncated to
//! the requested totals.

mod config;
mod generator;
mod outcome;
mod runner;
mod service;

pub use config::{FailurePolicy, GenerationConfig, GenerationConfigBuilder};
pub use generator::StudyGenerator;
pub use outcome::{BatchReport, ChunkOutcome};
pub use runner::{ChunkJob, Pacing, SequentialRunner};
pub use service::StudyService;
