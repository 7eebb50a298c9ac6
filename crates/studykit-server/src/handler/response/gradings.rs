//! Grading response types.

pub use studykit_core::grading::{ExamReport, GradedAnswer};
