//! Automatic answer scoring rules.

use crate::study::{ExamQuestion, QuestionKind};

/// Normalizes free text for comparison.
///
/// Lower-cases, collapses runs of whitespace into single spaces and strips
/// surrounding whitespace and trailing punctuation.
pub fn normalize_answer(answer: &str) -> String {
    let collapsed = answer
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    collapsed
        .trim_end_matches(|c: char| c.is_ascii_punctuation())
        .trim_end()
        .to_owned()
}

/// Scores `given` against `question`.
///
/// Returns `None` for short answer questions, which need a reviewer.
/// A multiple choice answer is correct if it matches the answer text, or if it
/// is an option letter (`A`, `b)`, ...) naming the option that matches.
pub fn score_answer(question: &ExamQuestion, given: &str) -> Option<bool> {
    let expected = normalize_answer(&question.answer);
    let given = normalize_answer(given);

    match question.kind {
        QuestionKind::ShortAnswer => None,
        QuestionKind::FillInBlank => Some(!given.is_empty() && given == expected),
        QuestionKind::MultipleChoice => {
            if given.is_empty() {
                return Some(false);
            }
            if given == expected {
                return Some(true);
            }

            let selected = option_by_letter(&question.options, &given);
            let expected_option = option_by_letter(&question.options, &expected);
            let correct = match (selected, expected_option) {
                (Some(selected), Some(expected_option)) => selected == expected_option,
                (Some(selected), None) => normalize_answer(selected) == expected,
                (None, Some(expected_option)) => normalize_answer(expected_option) == given,
                (None, None) => false,
            };
            Some(correct)
        }
    }
}

/// Resolves an option letter like `a` or `c)` to the option it names.
fn option_by_letter<'a>(options: &'a [String], letter: &str) -> Option<&'a str> {
    let letter = letter.trim_end_matches(')');
    let mut chars = letter.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return None;
    };
    if !c.is_ascii_lowercase() {
        return None;
    }

    let position = (c as u8 - b'a') as usize;
    options.get(position).map(String::as_str)
}
