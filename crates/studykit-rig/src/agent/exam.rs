//! Exam question generation agent.

use studykit_core::study::{ExamQuestion, ExamQuota, QuestionKind};

use super::parse::parse_items;
use crate::Result;
use crate::provider::CompletionProvider;

const NAME: &str = "ExamAgent";

const PREAMBLE: &str = "\
You are an experienced teacher writing practice exams.
Questions must be answerable from the provided material alone.
Multiple choice questions have four options and exactly one correct option.
Fill-in-the-blank questions mark the blank with ___ and have a short exact answer.
Short answer questions include a model answer suitable for manual grading.
Always output valid JSON, no explanations or markdown formatting.";

const PROMPT_EXAM: &str = "\
Write practice exam questions from the following study material:
{counts}

Return a JSON array where each element has the fields:
- \"type\": one of \"multipleChoice\", \"fillInBlank\", \"shortAnswer\"
- \"question\": the question text
- \"options\": an array of answer options (multiple choice only)
- \"answer\": the correct answer (for multiple choice, the text of the correct option)
- \"explanation\": a one-sentence explanation
Only output the JSON array, no explanation.";

/// Agent that writes exam questions.
#[derive(Debug, Clone)]
pub struct ExamAgent {
    provider: CompletionProvider,
}

impl ExamAgent {
    /// Creates a new exam agent with the given completion provider.
    pub fn new(provider: CompletionProvider) -> Self {
        Self { provider }
    }

    /// Generates questions from `text` following the per-kind `quota`.
    #[tracing::instrument(skip(self, text), fields(agent = NAME, model = %self.provider.model_name(), text_len = text.len()))]
    pub async fn generate(&self, text: &str, quota: ExamQuota) -> Result<Vec<ExamQuestion>> {
        let response = self.provider.complete(PREAMBLE, &prompt(text, quota)).await?;
        let questions: Vec<ExamQuestion> =
            parse_items::<ExamQuestion>(&response, &["examQuestions", "questions"])?
                .into_iter()
                .filter(|question| quota.get(question.kind) > 0)
                .collect();

        tracing::debug!(
            response_len = response.len(),
            questions = questions.len(),
            "generate exam completed"
        );
        Ok(questions)
    }
}

fn prompt(text: &str, quota: ExamQuota) -> String {
    let counts = [
        (QuestionKind::MultipleChoice, "multiple choice"),
        (QuestionKind::FillInBlank, "fill-in-the-blank"),
        (QuestionKind::ShortAnswer, "short answer"),
    ]
    .into_iter()
    .filter(|(kind, _)| quota.get(*kind) > 0)
    .map(|(kind, label)| format!("- exactly {} {label} questions", quota.get(kind)))
    .collect::<Vec<_>>()
    .join("\n");

    let instructions = PROMPT_EXAM.replace("{counts}", &counts);
    format!("{instructions}\n\nMaterial:\n{text}")
}
