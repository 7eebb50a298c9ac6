#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod agent;
mod error;
pub mod generation;
pub mod provider;

pub use error::{Error, Result};
pub use generation::{GenerationConfig, StudyGenerator, StudyService};

/// Tracing target for the main library.
pub const TRACING_TARGET: &str = "studykit_rig";

/// Tracing target for generation orchestration.
pub const TRACING_TARGET_GENERATION: &str = "studykit_rig::generation";
