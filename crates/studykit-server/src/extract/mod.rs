//! Request extractors with improved error handling and validation.
//!
//! - [`Json`] - JSON deserialization with API-shaped error responses
//! - [`ValidateJson`] - JSON extraction followed by `validator` checks

pub mod reject;

pub use crate::extract::reject::{Json, ValidateJson};
