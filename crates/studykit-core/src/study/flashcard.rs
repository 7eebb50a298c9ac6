use serde::{Deserialize, Serialize};

/// A two-sided flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    /// Prompt shown first, usually a term or question.
    pub front: String,
    /// Answer revealed on flip.
    pub back: String,
}

impl Flashcard {
    /// Creates a new flashcard.
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }

    /// Returns true if either side is blank.
    pub fn is_blank(&self) -> bool {
        self.front.trim().is_empty() || self.back.trim().is_empty()
    }
}
