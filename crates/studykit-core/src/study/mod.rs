//! Study items produced by the generators.

mod exam;
mod flashcard;

pub use exam::{ExamQuestion, ExamQuota, QuestionKind};
pub use flashcard::Flashcard;
