//! Chunk splitter configuration.

use serde::{Deserialize, Serialize};

/// Default maximum estimated tokens per chunk.
const DEFAULT_MAX_TOKENS_PER_CHUNK: usize = 15_000;

/// Default number of words repeated between adjacent chunks.
const DEFAULT_OVERLAP_SIZE: usize = 100;

/// Options controlling how text is split into chunks.
///
/// Built fresh for every call: start from [`ChunkingOptions::default`] and
/// override individual fields with the `with_*` setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChunkingOptions {
    /// Upper bound on the estimated tokens of a single chunk.
    pub max_tokens_per_chunk: usize,
    /// Number of words shared between the end of one chunk and the start of the next.
    pub overlap_size: usize,
    /// Whether to pull chunk boundaries back to the last sentence end.
    pub preserve_sentences: bool,
}

impl Default for ChunkingOptions {
    fn default() -> Self {
        Self {
            max_tokens_per_chunk: DEFAULT_MAX_TOKENS_PER_CHUNK,
            overlap_size: DEFAULT_OVERLAP_SIZE,
            preserve_sentences: true,
        }
    }
}

impl ChunkingOptions {
    /// Sets the maximum estimated tokens per chunk.
    pub fn with_max_tokens_per_chunk(mut self, max_tokens_per_chunk: usize) -> Self {
        self.max_tokens_per_chunk = max_tokens_per_chunk;
        self
    }

    /// Sets the overlap between adjacent chunks, in words.
    pub fn with_overlap_size(mut self, overlap_size: usize) -> Self {
        self.overlap_size = overlap_size;
        self
    }

    /// Enables or disables sentence-aligned boundaries.
    pub fn with_preserve_sentences(mut self, preserve_sentences: bool) -> Self {
        self.preserve_sentences = preserve_sentences;
        self
    }
}
