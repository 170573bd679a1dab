//! The canto/chapter sweep: a two-state machine over the whole corpus.

use tracing::info;

use crate::error::Result;
use crate::pipeline::{ChapterOutcome, HarvestPipeline};
use crate::traits::NameMiner;

/// Counters for a whole sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Chapters harvested
    pub chapters: usize,

    /// Records appended across all chapters
    pub appended: usize,
}

impl<M: NameMiner> HarvestPipeline<M> {
    /// Walk the corpus chapter by chapter.
    ///
    /// Starting from `(start_canto, 1)`: a harvested chapter advances the
    /// chapter counter; a chapter absent from the content tree advances
    /// the canto and resets the chapter to 1. The sweep ends once the
    /// canto counter passes `max_canto`. Any error other than an absent
    /// chapter aborts the whole sweep.
    pub async fn sweep(&self, start_canto: u32, max_canto: u32) -> Result<SweepReport> {
        let mut canto = start_canto;
        let mut chapter = 1;
        let mut report = SweepReport::default();

        while canto <= max_canto {
            match self.process_chapter(canto, chapter).await? {
                ChapterOutcome::Harvested(chapter_report) => {
                    report.chapters += 1;
                    report.appended += chapter_report.appended;
                    chapter += 1;
                }
                ChapterOutcome::NotFound => {
                    info!(canto, chapters_seen = chapter - 1, "canto exhausted");
                    canto += 1;
                    chapter = 1;
                }
            }
        }

        info!(
            chapters = report.chapters,
            appended = report.appended,
            "sweep complete"
        );

        Ok(report)
    }
}
