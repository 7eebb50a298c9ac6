//! Word-based chunk splitting with sentence alignment and overlap.

use regex::Regex;
use tracing::{debug, instrument, trace};

use super::estimate::estimate_tokens_for_chars;
use super::{ChunkingOptions, TextChunk, estimate_tokens};
use crate::{Error, Result, TRACING_TARGET_CHUNKING};

/// Pattern matching a run of sentence-ending punctuation.
const SENTENCE_END_PATTERN: &str = r"[.!?]+";

/// A sentence end is only used as a boundary past this share (in tenths) of the chunk.
const SENTENCE_BOUNDARY_TENTHS: usize = 7;

/// Splits text into overlapping chunks that fit a token budget.
#[derive(Debug, Clone)]
pub struct ChunkSplitter {
    options: ChunkingOptions,
    sentence_end: Regex,
}

impl ChunkSplitter {
    /// Creates a splitter, rejecting options that cannot produce chunks.
    pub fn new(options: ChunkingOptions) -> Result<Self> {
        if options.max_tokens_per_chunk == 0 {
            return Err(Error::invalid_input().with_message("max_tokens_per_chunk must be positive"));
        }

        let sentence_end = Regex::new(SENTENCE_END_PATTERN).map_err(|e| {
            Error::invalid_input()
                .with_message("invalid sentence pattern")
                .with_source(e)
        })?;

        debug!(
            target: TRACING_TARGET_CHUNKING,
            max_tokens_per_chunk = options.max_tokens_per_chunk,
            overlap_size = options.overlap_size,
            preserve_sentences = options.preserve_sentences,
            "created chunk splitter"
        );

        Ok(Self {
            options,
            sentence_end,
        })
    }

    /// Splits `text` into ordered chunks.
    ///
    /// Text that already fits the budget is returned as a single chunk equal
    /// to the input. Otherwise chunks hold whole words joined by single
    /// spaces, and consecutive chunks share up to `overlap_size` words.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn split(&self, text: &str) -> Result<Vec<TextChunk>> {
        let max_tokens = self.options.max_tokens_per_chunk;
        let total_tokens = estimate_tokens(text);
        let words: Vec<&str> = text.split_whitespace().collect();

        if total_tokens <= max_tokens {
            debug!(
                target: TRACING_TARGET_CHUNKING,
                total_tokens,
                "text fits in a single chunk"
            );
            return Ok(vec![TextChunk::new(text.to_owned(), 0, 0..words.len())]);
        }

        // Whitespace-only input: nothing to spread across chunks.
        if words.is_empty() {
            return Ok(vec![TextChunk::new(String::new(), 0, 0..0)]);
        }

        let total_words = words.len();
        let words_per_token = total_words as f64 / total_tokens as f64;
        let words_per_chunk = ((max_tokens as f64 * words_per_token).floor() as usize).max(1);

        trace!(
            target: TRACING_TARGET_CHUNKING,
            total_words,
            total_tokens,
            words_per_chunk,
            "computed chunk span"
        );

        let mut chunks = Vec::new();
        let mut start = 0;

        while start < total_words {
            if chunks.len() > total_words {
                return Err(Error::chunking_failure().with_message(format!(
                    "splitter stopped advancing at word {start} of {total_words}"
                )));
            }

            let mut end = (start + words_per_chunk).min(total_words);
            end = self.fit_to_budget(&words, start, end);

            if self.options.preserve_sentences && end < total_words {
                end = self.align_to_sentence(&words, start, end);
            }

            let content = words[start..end].join(" ");
            chunks.push(TextChunk::new(content, chunks.len(), start..end));

            if end >= total_words {
                break;
            }

            let span = end - start;
            let overlap = self.options.overlap_size.min(span - 1);
            start = end - overlap;
        }

        debug!(
            target: TRACING_TARGET_CHUNKING,
            chunk_count = chunks.len(),
            total_words,
            "split text into chunks"
        );

        Ok(chunks)
    }

    /// Shrinks `end` until the joined words fit the token budget or only one word remains.
    fn fit_to_budget(&self, words: &[&str], start: usize, mut end: usize) -> usize {
        let max_tokens = self.options.max_tokens_per_chunk;

        loop {
            let span = end - start;
            if span <= 1 {
                return end;
            }

            let tokens = estimate_tokens_for_chars(joined_chars(&words[start..end]));
            if tokens <= max_tokens {
                return end;
            }

            let scaled = span * max_tokens / tokens;
            end = start + scaled.clamp(1, span - 1);
        }
    }

    /// Moves `end` back to the last sentence end if it lies late enough in the chunk.
    fn align_to_sentence(&self, words: &[&str], start: usize, end: usize) -> usize {
        let candidate = words[start..end].join(" ");
        let Some(last) = self.sentence_end.find_iter(&candidate).last() else {
            return end;
        };

        let head = &candidate[..last.end()];
        if head.chars().count() * 10 <= candidate.chars().count() * SENTENCE_BOUNDARY_TENTHS {
            return end;
        }

        let kept = head.split_whitespace().count();
        start + kept.max(1)
    }
}

/// Splits `text` with a splitter built from `options`.
pub fn split_text(text: &str, options: &ChunkingOptions) -> Result<Vec<TextChunk>> {
    ChunkSplitter::new(*options)?.split(text)
}

/// Character count of `words` joined by single spaces.
fn joined_chars(words: &[&str]) -> usize {
    let chars: usize = words.iter().map(|word| word.chars().count()).sum();
    chars + words.len().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn sentences(count: usize) -> String {
        (0..count)
            .map(|i| format!("Sentence number {i} is here."))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Rebuilds the source word sequence by dropping each chunk's overlap.
    fn reconstruct(chunks: &[TextChunk]) -> Vec<String> {
        let mut words = Vec::new();
        let mut covered = 0;
        for chunk in chunks {
            let skip = covered - chunk.word_range.start;
            words.extend(chunk.content.split_whitespace().skip(skip).map(str::to_owned));
            covered = chunk.word_range.end;
        }
        words
    }

    #[test]
    fn short_text_is_single_chunk() {
        let text = "Hello world. This is short.";
        let chunks = split_text(text, &ChunkingOptions::default()).unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, text);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].estimated_tokens, estimate_tokens(text));
    }

    #[test]
    fn empty_text_is_single_empty_chunk() {
        let chunks = split_text("", &ChunkingOptions::default()).unwrap();

        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].is_empty());
        assert_eq!(chunks[0].estimated_tokens, 0);
    }

    #[test]
    fn whitespace_only_text_over_budget() {
        let text = " ".repeat(1000);
        let options = ChunkingOptions::default().with_max_tokens_per_chunk(10);
        let chunks = split_text(&text, &options).unwrap();

        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].is_empty());
    }

    #[test]
    fn zero_budget_is_rejected() {
        let options = ChunkingOptions::default().with_max_tokens_per_chunk(0);
        let error = ChunkSplitter::new(options).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn long_text_is_split_in_order() {
        let text = sentences(2000);
        let options = ChunkingOptions::default()
            .with_max_tokens_per_chunk(200)
            .with_overlap_size(10);
        let chunks = split_text(&text, &options).unwrap();

        assert!(chunks.len() > 1);
        for (position, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, position);
            assert!(chunk.estimated_tokens <= 200);
            assert_eq!(chunk.estimated_tokens, estimate_tokens(&chunk.content));
        }

        let original: Vec<String> = text.split_whitespace().map(str::to_owned).collect();
        assert_eq!(reconstruct(&chunks), original);
    }

    #[test]
    fn consecutive_chunks_overlap() {
        let text = sentences(500);
        let options = ChunkingOptions::default()
            .with_max_tokens_per_chunk(150)
            .with_overlap_size(10);
        let chunks = split_text(&text, &options).unwrap();

        for pair in chunks.windows(2) {
            let shared = pair[0].word_range.end - pair[1].word_range.start;
            assert!(shared > 0);
            assert!(shared <= 10);
        }
    }

    #[test]
    fn boundaries_follow_sentence_ends() {
        let text = sentences(1000);
        let options = ChunkingOptions::default()
            .with_max_tokens_per_chunk(200)
            .with_overlap_size(0);
        let chunks = split_text(&text, &options).unwrap();

        let (last, rest) = chunks.split_last().unwrap();
        assert!(!rest.is_empty());
        for chunk in rest {
            assert!(chunk.content.ends_with('.'), "{:?}", chunk.content);
        }
        assert_eq!(last.word_range.end, text.split_whitespace().count());
    }

    #[test]
    fn early_sentence_end_is_ignored() {
        let text = format!("Intro. {}", vec!["alpha"; 3000].join(" "));
        let options = ChunkingOptions::default()
            .with_max_tokens_per_chunk(100)
            .with_overlap_size(0);
        let chunks = split_text(&text, &options).unwrap();

        assert!(chunks.len() > 1);
        assert!(chunks[0].word_count() > 1);
        assert_ne!(chunks[0].content, "Intro.");
    }

    #[test]
    fn sentence_share_counts_characters() {
        let splitter = ChunkSplitter::new(ChunkingOptions::default()).unwrap();

        // 100 characters and 148 bytes; the sentence ends at character 60 (byte 108).
        let mut words = vec!["éééé"; 11];
        words.push("éééé.");
        words.extend(vec!["aaaa"; 8]);
        assert_eq!(splitter.align_to_sentence(&words, 0, words.len()), words.len());

        // Sentence end at character 80 lies past the 70% mark.
        let mut words = vec!["éééé"; 15];
        words.push("éééé.");
        words.extend(vec!["aaaa"; 4]);
        assert_eq!(splitter.align_to_sentence(&words, 0, words.len()), 16);
    }

    #[test]
    fn oversized_overlap_still_advances() {
        let text = vec!["word"; 500].join(" ");
        let options = ChunkingOptions::default()
            .with_max_tokens_per_chunk(20)
            .with_overlap_size(1000);
        let chunks = split_text(&text, &options).unwrap();

        assert!(chunks.len() <= 500);
        assert_eq!(chunks.last().unwrap().word_range.end, 500);
        for pair in chunks.windows(2) {
            assert!(pair[1].word_range.start > pair[0].word_range.start);
        }
    }

    #[test]
    fn single_word_over_budget_is_kept_whole() {
        let long_word = "x".repeat(2000);
        let text = format!("{long_word} tail");
        let options = ChunkingOptions::default().with_max_tokens_per_chunk(100);
        let chunks = split_text(&text, &options).unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content, long_word);
        assert!(chunks[0].estimated_tokens > 100);
        assert_eq!(chunks[1].content, "tail");
    }

    #[test]
    fn splitting_is_deterministic() {
        let text = sentences(800);
        let options = ChunkingOptions::default().with_max_tokens_per_chunk(300);
        let first = split_text(&text, &options).unwrap();
        let second = split_text(&text, &options).unwrap();
        assert_eq!(first, second);
    }
}
