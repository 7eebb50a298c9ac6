//! Orchestration of chunked generation requests.

use std::collections::HashMap;
use std::sync::Arc;

use studykit_core::chunking::{ChunkSplitter, TextChunk, distribute_items_with_cap};
use studykit_core::study::{ExamQuestion, ExamQuota, Flashcard, QuestionKind};
use strum::IntoEnumIterator;
use tokio_util::sync::CancellationToken;

use super::config::GenerationConfig;
use super::generator::StudyGenerator;
use super::runner::{ChunkJob, SequentialRunner};
use crate::{Error, Result, TRACING_TARGET_GENERATION};

/// Separator placed between notes generated for consecutive chunks.
const NOTES_SEPARATOR: &str = "\n\n";

struct StudyServiceInner {
    generator: Arc<dyn StudyGenerator>,
    config: GenerationConfig,
    splitter: ChunkSplitter,
}

/// Generates flashcards, exams and notes from arbitrarily long content.
///
/// This is a cheaply cloneable handle; clones share the generator and
/// configuration.
#[derive(Clone)]
pub struct StudyService {
    inner: Arc<StudyServiceInner>,
}

impl StudyService {
    /// Creates a service that issues its model calls through `generator`.
    pub fn new(generator: Arc<dyn StudyGenerator>, config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        let splitter = ChunkSplitter::new(config.chunking_options())?;

        tracing::debug!(
            target: TRACING_TARGET_GENERATION,
            provider = generator.provider_name(),
            model = generator.model_name(),
            chunking_threshold_chars = config.chunking_threshold_chars,
            failure_policy = %config.failure_policy,
            "Study service created"
        );

        Ok(Self {
            inner: Arc::new(StudyServiceInner {
                generator,
                config,
                splitter,
            }),
        })
    }

    /// Returns the generation configuration.
    pub fn config(&self) -> &GenerationConfig {
        &self.inner.config
    }

    /// Name of the backing provider.
    pub fn provider_name(&self) -> &str {
        self.inner.generator.provider_name()
    }

    /// Name of the backing model.
    pub fn model_name(&self) -> &str {
        self.inner.generator.model_name()
    }

    /// Returns true if `content` is long enough to be split before generation.
    pub fn needs_chunking(&self, content: &str) -> bool {
        content.chars().count() > self.inner.config.chunking_threshold_chars
    }

    /// Generates `count` flashcards from `content`.
    ///
    /// Returns at most `count` cards in chunk order. A zero `count` returns an
    /// empty list without calling the model.
    #[tracing::instrument(skip(self, content, cancel), fields(content_len = content.len()))]
    pub async fn generate_flashcards(
        &self,
        content: &str,
        count: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<Flashcard>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let plan = self.plan(content)?;
        let quotas = self.quotas(&plan, count);
        let jobs = jobs_with_quota(plan.chunks, quotas, |&quota| quota > 0);

        let generator = &self.inner.generator;
        let report = self
            .runner()
            .run(jobs, cancel, |job| async move {
                generator.flashcards(&job.chunk.content, job.quota).await
            })
            .await?;

        let flashcards: Vec<Flashcard> = report
            .into_values(self.inner.config.failure_policy)?
            .into_iter()
            .flatten()
            .filter(|card| !card.is_blank())
            .take(count)
            .collect();

        if flashcards.is_empty() {
            return Err(Error::EmptyResult);
        }

        tracing::info!(
            target: TRACING_TARGET_GENERATION,
            requested = count,
            generated = flashcards.len(),
            "Flashcards generated"
        );

        Ok(flashcards)
    }

    /// Generates an exam from `content` with the per-kind counts in `quota`.
    ///
    /// Each kind is distributed across chunks independently, and the collected
    /// questions are truncated per kind to the requested counts.
    #[tracing::instrument(
        skip(self, content, cancel),
        fields(content_len = content.len(), total = quota.total())
    )]
    pub async fn generate_exam(
        &self,
        content: &str,
        quota: ExamQuota,
        cancel: &CancellationToken,
    ) -> Result<Vec<ExamQuestion>> {
        if quota.is_empty() {
            return Ok(Vec::new());
        }

        let plan = self.plan(content)?;
        let mut chunk_quotas = vec![ExamQuota::default(); plan.chunks.len()];
        for kind in QuestionKind::iter() {
            let counts = self.quotas(&plan, quota.get(kind));
            for (chunk_quota, count) in chunk_quotas.iter_mut().zip(counts) {
                *chunk_quota.get_mut(kind) = count;
            }
        }
        let jobs = jobs_with_quota(plan.chunks, chunk_quotas, |quota| !quota.is_empty());

        let generator = &self.inner.generator;
        let report = self
            .runner()
            .run(jobs, cancel, |job| async move {
                generator.exam_questions(&job.chunk.content, job.quota).await
            })
            .await?;

        let mut taken: HashMap<QuestionKind, usize> = HashMap::new();
        let questions: Vec<ExamQuestion> = report
            .into_values(self.inner.config.failure_policy)?
            .into_iter()
            .flatten()
            .filter(|question| !question.question.trim().is_empty())
            .filter(|question| {
                let taken = taken.entry(question.kind).or_default();
                if *taken < quota.get(question.kind) {
                    *taken += 1;
                    true
                } else {
                    false
                }
            })
            .collect();

        if questions.is_empty() {
            return Err(Error::EmptyResult);
        }

        tracing::info!(
            target: TRACING_TARGET_GENERATION,
            requested = quota.total(),
            generated = questions.len(),
            "Exam generated"
        );

        Ok(questions)
    }

    /// Writes review notes for `content`, one section per chunk.
    #[tracing::instrument(skip(self, content, cancel), fields(content_len = content.len()))]
    pub async fn generate_notes(
        &self,
        content: &str,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let plan = self.plan(content)?;
        let jobs = plan.chunks.into_iter().map(|chunk| ChunkJob::new(chunk, ())).collect();

        let generator = &self.inner.generator;
        let report = self
            .runner()
            .run(jobs, cancel, |job| async move {
                generator.notes(&job.chunk.content).await
            })
            .await?;

        let sections: Vec<String> = report
            .into_values(self.inner.config.failure_policy)?
            .into_iter()
            .map(|section| section.trim().to_owned())
            .filter(|section| !section.is_empty())
            .collect();

        if sections.is_empty() {
            return Err(Error::EmptyResult);
        }

        tracing::info!(
            target: TRACING_TARGET_GENERATION,
            sections = sections.len(),
            "Notes generated"
        );

        Ok(sections.join(NOTES_SEPARATOR))
    }

    /// Splits `content` into the chunks that will each receive one call.
    fn plan(&self, content: &str) -> Result<ChunkPlan> {
        if content.trim().is_empty() {
            return Err(Error::invalid_input("content must not be empty"));
        }

        if !self.needs_chunking(content) {
            let words = content.split_whitespace().count();
            let chunk = TextChunk::new(content.to_owned(), 0, 0..words);
            return Ok(ChunkPlan {
                chunks: vec![chunk],
                split: false,
            });
        }

        let chunks = self.inner.splitter.split(content)?;
        tracing::debug!(
            target: TRACING_TARGET_GENERATION,
            chunks = chunks.len(),
            content_chars = content.chars().count(),
            "Content split into chunks"
        );

        Ok(ChunkPlan {
            chunks,
            split: true,
        })
    }

    /// Per-chunk quotas for `total` items.
    ///
    /// Unsplit content carries the whole request. Split content is spread in
    /// proportion to chunk size and capped per chunk, even if the splitter
    /// returned a single chunk.
    fn quotas(&self, plan: &ChunkPlan, total: usize) -> Vec<usize> {
        if !plan.split {
            return vec![total];
        }

        distribute_items_with_cap(&plan.chunks, total, self.inner.config.max_items_per_chunk)
    }

    fn runner(&self) -> SequentialRunner {
        let config = &self.inner.config;
        SequentialRunner::new(config.pacing(), config.failure_policy)
    }
}

/// Chunks for one request.
struct ChunkPlan {
    chunks: Vec<TextChunk>,
    /// Whether the content passed the chunking threshold.
    split: bool,
}

fn jobs_with_quota<Q>(
    chunks: Vec<TextChunk>,
    quotas: Vec<Q>,
    keep: impl Fn(&Q) -> bool,
) -> Vec<ChunkJob<Q>> {
    chunks
        .into_iter()
        .zip(quotas)
        .filter(|(_, quota)| keep(quota))
        .map(|(chunk, quota)| ChunkJob::new(chunk, quota))
        .collect()
}

impl std::fmt::Debug for StudyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudyService")
            .field("provider", &self.provider_name())
            .field("model", &self.model_name())
            .field("config", &self.inner.config)
            .finish()
    }
}
