//! Character-based token estimation.

/// Average number of characters per token.
const CHARS_PER_TOKEN: usize = 4;

/// Safety margin applied on top of the raw estimate, in tenths (1.1).
const MARGIN_TENTHS: usize = 11;

/// Estimates the number of LLM tokens in `text`.
///
/// Computes `ceil(chars / 4 * 1.1)` where `chars` counts Unicode scalar
/// values. The arithmetic is done on integers (`ceil(chars * 11 / 40)`) so the
/// result never drifts at exact multiples. This is a heuristic, not a
/// tokenizer.
pub fn estimate_tokens(text: &str) -> usize {
    estimate_tokens_for_chars(text.chars().count())
}

/// Estimates tokens for a text of `chars` Unicode scalar values.
pub(crate) fn estimate_tokens_for_chars(chars: usize) -> usize {
    (chars * MARGIN_TENTHS).div_ceil(CHARS_PER_TOKEN * 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_tokens() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn rounds_up_partial_tokens() {
        // 1 char: 0.275 -> 1
        assert_eq!(estimate_tokens("a"), 1);
        // 4 chars: 1.1 -> 2
        assert_eq!(estimate_tokens("abcd"), 2);
    }

    #[test]
    fn exact_multiples_do_not_overshoot() {
        // 40 chars: exactly 11 tokens
        assert_eq!(estimate_tokens(&"x".repeat(40)), 11);
        assert_eq!(estimate_tokens(&"x".repeat(400)), 110);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "é".repeat(40);
        assert_eq!(text.len(), 80);
        assert_eq!(estimate_tokens(&text), 11);
    }
}
