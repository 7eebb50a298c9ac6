//! Token estimation, chunk splitting and per-chunk item distribution.
//!
//! Large documents are split into overlapping, sentence-aligned chunks so each
//! generation call stays under a token budget, and the number of items to
//! produce is spread across chunks in proportion to their size.

mod chunk;
mod distributor;
mod estimate;
mod options;
mod splitter;

pub use chunk::TextChunk;
pub use distributor::{MAX_ITEMS_PER_CHUNK, distribute_items, distribute_items_with_cap};
pub use estimate::estimate_tokens;
pub use options::ChunkingOptions;
pub use splitter::{ChunkSplitter, split_text};
