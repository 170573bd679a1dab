//! The harvesting pipeline: pagination over a chapter's verses and the
//! canto/chapter sweep across the whole corpus.

pub mod extract;
pub mod prompts;
mod sweep;

pub use extract::{extract_batch, merge_rounds};
pub use sweep::SweepReport;

use std::path::PathBuf;

use tracing::{info, warn};

use crate::corpus::{find_chapter, write_catalog, Corpus, VerseUnit};
use crate::error::Result;
use crate::store::NameStore;
use crate::traits::NameMiner;

/// Verse units submitted per extraction round.
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Highest canto of the corpus.
pub const MAX_CANTO: u32 = 12;

/// Result of processing one (canto, chapter) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterOutcome {
    /// The content tree has no such chapter; the sweep rolls to the next
    /// canto
    NotFound,

    /// The chapter was harvested
    Harvested(ChapterReport),
}

/// Counters for one harvested chapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChapterReport {
    pub canto: u32,
    pub chapter: u32,
    pub verses: usize,
    pub batches: usize,
    pub appended: usize,
    pub skipped: usize,
}

/// Drives extraction for whole chapters: locate, segment, batch, extract,
/// accumulate.
///
/// Owns the corpus handle, the name store, and the extraction capability;
/// the capability is injected so callers choose the provider.
pub struct HarvestPipeline<M> {
    corpus: Corpus,
    store: NameStore,
    miner: M,
    batch_size: usize,
    catalog_path: Option<PathBuf>,
}

impl<M: NameMiner> HarvestPipeline<M> {
    /// Create a pipeline with the default batch size.
    pub fn new(corpus: Corpus, store: NameStore, miner: M) -> Self {
        Self {
            corpus,
            store,
            miner,
            batch_size: DEFAULT_BATCH_SIZE,
            catalog_path: None,
        }
    }

    /// Override the batch size (verse units per extraction round).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        assert!(batch_size > 0, "batch size must be positive");
        self.batch_size = batch_size;
        self
    }

    /// Also persist the chapter catalog to this path while processing.
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// Harvest one chapter: every batch in order, each appended to the
    /// store as soon as it completes.
    ///
    /// Exclusions are loaded once at the start, so names found by earlier
    /// batches of this same run are not excluded from later ones; the
    /// store-side dedup still keeps the file free of duplicates.
    pub async fn process_chapter(&self, canto: u32, chapter: u32) -> Result<ChapterOutcome> {
        let catalog = self.corpus.chapter_catalog().await?;

        if let Some(path) = &self.catalog_path {
            if let Err(e) = write_catalog(path, &catalog) {
                warn!(path = %path.display(), error = %e, "failed to save chapter catalog");
            }
        }

        let Some(span) = find_chapter(&catalog, canto, chapter) else {
            info!(canto, chapter, "chapter not found in content tree");
            return Ok(ChapterOutcome::NotFound);
        };

        let verses = self.corpus.chapter_verses(&span).await?;
        info!(
            canto,
            chapter,
            first_record = span.first_record,
            last_record = span.last_record,
            verses = verses.len(),
            "harvesting chapter"
        );

        let source_ref = format!("Srimad Bhagavatam, Canto {}, Chapter {}", canto, chapter);
        let exclusions = self.store.load_exclusions(canto, chapter);

        let batches = verses.len().div_ceil(self.batch_size);
        let mut report = ChapterReport {
            canto,
            chapter,
            verses: verses.len(),
            batches,
            ..Default::default()
        };

        for (index, batch) in verses.chunks(self.batch_size).enumerate() {
            info!(
                batch = index + 1,
                of = batches,
                verses = batch.len(),
                "extracting names from batch"
            );

            let batch_text = batch
                .iter()
                .map(VerseUnit::text)
                .collect::<Vec<_>>()
                .join(" ");

            let records =
                extract_batch(&self.miner, &batch_text, &source_ref, &exclusions).await?;

            let outcome = self.store.append(canto, chapter, records)?;
            report.appended += outcome.appended;
            report.skipped += outcome.skipped;
        }

        info!(
            canto,
            chapter,
            appended = report.appended,
            skipped = report.skipped,
            "chapter harvest complete"
        );

        Ok(ChapterOutcome::Harvested(report))
    }
}
