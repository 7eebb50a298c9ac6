//! Split chunk type.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::estimate_tokens;

/// A contiguous piece of the source text produced by the splitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextChunk {
    /// The chunk text content.
    pub content: String,
    /// Chunk index within the source (0-based).
    pub index: usize,
    /// Estimated token count of `content`.
    pub estimated_tokens: usize,
    /// Whitespace-delimited words of the source covered by this chunk.
    pub word_range: Range<usize>,
}

impl TextChunk {
    /// Creates a chunk and computes its token estimate.
    pub fn new(content: String, index: usize, word_range: Range<usize>) -> Self {
        let estimated_tokens = estimate_tokens(&content);
        Self {
            content,
            index,
            estimated_tokens,
            word_range,
        }
    }

    /// Returns the number of source words in this chunk.
    pub fn word_count(&self) -> usize {
        self.word_range.len()
    }

    /// Returns true if the chunk carries no text.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
