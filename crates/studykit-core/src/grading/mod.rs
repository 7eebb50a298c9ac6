//! Exam grading.
//!
//! An [`ExamSession`] walks an exam through three stages:
//!
//! ```text
//! Answering --submit--> Review --finish--> Completed
//!     \                                      ^
//!      `---submit (no short answers)---------'
//! ```
//!
//! Multiple choice and fill-in-the-blank answers are scored automatically on
//! submit. Short answers wait in `Review` until a reviewer marks them.

mod report;
mod scoring;
mod session;

pub use report::{ExamReport, GradedAnswer};
pub use scoring::{normalize_answer, score_answer};
pub use session::{ExamSession, ExamStage};
