//! Proportional distribution of requested items across chunks.

use tracing::debug;

use super::TextChunk;
use crate::TRACING_TARGET_CHUNKING;

/// Upper bound on items requested from a single chunk.
pub const MAX_ITEMS_PER_CHUNK: usize = 15;

/// Distributes `total_items` across `chunks` using [`MAX_ITEMS_PER_CHUNK`].
///
/// See [`distribute_items_with_cap`].
pub fn distribute_items(chunks: &[TextChunk], total_items: usize) -> Vec<usize> {
    distribute_items_with_cap(chunks, total_items, MAX_ITEMS_PER_CHUNK)
}

/// Computes a per-chunk item quota proportional to each chunk's token share.
///
/// Every chunk gets `min(cap, max(1, round(total_items * tokens / total_tokens)))`.
/// The quotas only approximate `total_items`; callers truncate the collected
/// results. When `total_items` is zero every quota is zero, and when no chunk
/// carries any tokens the items are split evenly.
pub fn distribute_items_with_cap(
    chunks: &[TextChunk],
    total_items: usize,
    cap: usize,
) -> Vec<usize> {
    if total_items == 0 || chunks.is_empty() {
        return vec![0; chunks.len()];
    }

    let cap = cap.max(1);
    let total_tokens: usize = chunks.iter().map(|chunk| chunk.estimated_tokens).sum();

    let quotas: Vec<usize> = if total_tokens == 0 {
        let even = (total_items as f64 / chunks.len() as f64).round() as usize;
        vec![even.clamp(1, cap); chunks.len()]
    } else {
        chunks
            .iter()
            .map(|chunk| {
                let ratio = chunk.estimated_tokens as f64 / total_tokens as f64;
                let quota = (total_items as f64 * ratio).round() as usize;
                quota.clamp(1, cap)
            })
            .collect()
    };

    debug!(
        target: TRACING_TARGET_CHUNKING,
        chunk_count = chunks.len(),
        total_items,
        total_tokens,
        assigned = quotas.iter().sum::<usize>(),
        "distributed items across chunks"
    );

    quotas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::{ChunkingOptions, split_text};

    fn chunk_with_tokens(index: usize, tokens: usize) -> TextChunk {
        TextChunk {
            content: "x".repeat(tokens),
            index,
            estimated_tokens: tokens,
            word_range: index..index + 1,
        }
    }

    #[test]
    fn proportional_to_token_share() {
        let chunks = vec![chunk_with_tokens(0, 300), chunk_with_tokens(1, 100)];
        assert_eq!(distribute_items(&chunks, 8), vec![6, 2]);
    }

    #[test]
    fn small_chunks_get_at_least_one() {
        let chunks = vec![chunk_with_tokens(0, 10_000), chunk_with_tokens(1, 10)];
        assert_eq!(distribute_items(&chunks, 10), vec![10, 1]);
    }

    #[test]
    fn quotas_are_capped() {
        let chunks = vec![chunk_with_tokens(0, 900), chunk_with_tokens(1, 100)];
        assert_eq!(distribute_items(&chunks, 100), vec![15, 10]);
        assert_eq!(distribute_items_with_cap(&chunks, 100, 5), vec![5, 5]);
    }

    #[test]
    fn zero_items_means_zero_quotas() {
        let chunks = vec![chunk_with_tokens(0, 50), chunk_with_tokens(1, 50)];
        assert_eq!(distribute_items(&chunks, 0), vec![0, 0]);
    }

    #[test]
    fn no_chunks_means_no_quotas() {
        assert!(distribute_items(&[], 10).is_empty());
    }

    #[test]
    fn zero_token_chunks_split_evenly() {
        let chunks = vec![
            chunk_with_tokens(0, 0),
            chunk_with_tokens(1, 0),
            chunk_with_tokens(2, 0),
        ];
        assert_eq!(distribute_items(&chunks, 9), vec![3, 3, 3]);
        assert_eq!(distribute_items(&chunks, 1), vec![1, 1, 1]);
    }

    #[test]
    fn large_document_scenario() {
        let text = (0..10_000)
            .map(|i| format!("Topic {i} covers key ideas."))
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(text.split_whitespace().count(), 50_000);

        let options = ChunkingOptions::default()
            .with_max_tokens_per_chunk(10_000)
            .with_overlap_size(200);
        let chunks = split_text(&text, &options).unwrap();
        assert!(chunks.len() > 1);

        let quotas = distribute_items(&chunks, 30);
        assert_eq!(quotas.len(), chunks.len());
        assert!(quotas.iter().all(|quota| (1..=15).contains(quota)));

        let assigned: usize = quotas.iter().sum();
        assert!((25..=38).contains(&assigned), "assigned {assigned}");
    }

    #[test]
    fn distribution_is_deterministic() {
        let chunks = vec![
            chunk_with_tokens(0, 123),
            chunk_with_tokens(1, 456),
            chunk_with_tokens(2, 789),
        ];
        assert_eq!(distribute_items(&chunks, 20), distribute_items(&chunks, 20));
    }
}
