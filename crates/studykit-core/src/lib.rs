#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

//! # Studykit Core
//!
//! Pure, synchronous building blocks shared by the generation and server
//! crates: token estimation, chunk splitting, item distribution, the study
//! item types and the exam grading state machine.

/// Tracing target for chunking operations.
pub const TRACING_TARGET_CHUNKING: &str = "studykit_core::chunking";

/// Tracing target for grading operations.
pub const TRACING_TARGET_GRADING: &str = "studykit_core::grading";

mod error;

pub mod chunking;
pub mod grading;
pub mod study;

pub use error::{BoxedError, Error, ErrorKind, Result};
