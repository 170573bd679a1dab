//! Corpus access: the vedabase SQLite file.
//!
//! The vedabase stores the whole work as a generic content tree
//! (`contents`: title, record id, hierarchy level, parent, next sibling)
//! plus a `texts` table of markup-laden rows addressed by record id.
//! Chapter nodes live at hierarchy level 6 with titles like
//! `"SB 1.2: Divinity and Divine Service"`; a chapter's rows span from its
//! own record id up to (and including) its next sibling's record id.

pub mod segment;

pub use segment::{segment_verses, split_verses, strip_markup, VerseUnit};

use std::path::Path;

use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use tracing::debug;

use crate::error::{HarvestError, Result};

/// Catalog query: every chapter node at level 6 whose title carries a
/// `SB <canto>.<chapter>:` label (one- or two-digit components), paired
/// with its parent canto title.
const CHAPTER_CATALOG_SQL: &str = "\
    SELECT parent.title AS canto_title, child.title AS chapter_title, \
           child.record AS first_record, child.next_sibling AS last_record \
    FROM contents AS child \
    JOIN contents AS parent ON child.parent = parent.record \
    WHERE child.level = 6 AND ( \
        child.title LIKE 'SB _._:%' OR child.title LIKE 'SB _.__:%' OR \
        child.title LIKE 'SB __._:%' OR child.title LIKE 'SB __.__:%' ) \
    ORDER BY child.record";

const CHAPTER_ROWS_SQL: &str =
    "SELECT plain FROM texts WHERE recid >= ? AND recid <= ? ORDER BY recid";

/// One chapter of the catalog, as stored in the content tree.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ChapterEntry {
    /// Parent canto title
    pub canto_title: String,

    /// Chapter title, containing the `SB <canto>.<chapter>:` label
    pub chapter_title: String,

    /// Record id of the chapter's first text row
    pub first_record: i64,

    /// Record id of the next sibling node, the chapter's last text row
    pub last_record: i64,
}

/// A located chapter's record-id span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterSpan {
    pub canto: u32,
    pub chapter: u32,
    pub first_record: i64,
    pub last_record: i64,
}

/// Read-only handle on the vedabase file.
pub struct Corpus {
    pool: SqlitePool,
}

impl Corpus {
    /// Open a vedabase file read-only.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Create an in-memory corpus (for testing).
    ///
    /// Uses a single connection so fixture inserts and queries share one
    /// database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        Ok(Self { pool })
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// List every chapter of the work, in record order.
    pub async fn chapter_catalog(&self) -> Result<Vec<ChapterEntry>> {
        let entries = sqlx::query_as::<_, ChapterEntry>(CHAPTER_CATALOG_SQL)
            .fetch_all(&self.pool)
            .await?;

        debug!(chapters = entries.len(), "loaded chapter catalog");
        Ok(entries)
    }

    /// Resolve a (canto, chapter) pair to its record-id span.
    ///
    /// Returns `None` when the content tree has no matching chapter node;
    /// the driver consumes that as the canto-rollover signal. The catalog
    /// is recomputed per lookup.
    pub async fn locate(&self, canto: u32, chapter: u32) -> Result<Option<ChapterSpan>> {
        let catalog = self.chapter_catalog().await?;
        Ok(find_chapter(&catalog, canto, chapter))
    }

    /// Fetch a chapter's raw markup rows, in ascending record order.
    pub async fn chapter_rows(&self, span: &ChapterSpan) -> Result<Vec<String>> {
        let rows = sqlx::query_scalar::<_, String>(CHAPTER_ROWS_SQL)
            .bind(span.first_record)
            .bind(span.last_record)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Fetch and segment a chapter into verse units.
    pub async fn chapter_verses(&self, span: &ChapterSpan) -> Result<Vec<VerseUnit>> {
        let rows = self.chapter_rows(span).await?;
        Ok(segment_verses(&rows))
    }
}

/// Find the catalog entry whose title carries the `SB <canto>.<chapter>:`
/// label.
pub fn find_chapter(catalog: &[ChapterEntry], canto: u32, chapter: u32) -> Option<ChapterSpan> {
    let label = format!("SB {}.{}:", canto, chapter);

    catalog
        .iter()
        .find(|entry| entry.chapter_title.contains(&label))
        .map(|entry| ChapterSpan {
            canto,
            chapter,
            first_record: entry.first_record,
            last_record: entry.last_record,
        })
}

/// Catalog artifact written next to the name stores, for inspection.
#[derive(Serialize)]
struct CatalogArtifact<'a> {
    generated_at: String,
    chapters: &'a [ChapterEntry],
}

/// Persist the chapter catalog as a JSON side artifact.
///
/// Incidental output; callers treat failures as a warning, never as a
/// pipeline error.
pub fn write_catalog(path: &Path, entries: &[ChapterEntry]) -> Result<()> {
    let artifact = CatalogArtifact {
        generated_at: chrono::Utc::now().to_rfc3339(),
        chapters: entries,
    };

    let json = serde_json::to_string_pretty(&artifact).map_err(HarvestError::store)?;
    std::fs::write(path, json).map_err(HarvestError::store)?;

    debug!(path = %path.display(), chapters = entries.len(), "chapter catalog saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(canto_title: &str, chapter_title: &str, first: i64, last: i64) -> ChapterEntry {
        ChapterEntry {
            canto_title: canto_title.to_string(),
            chapter_title: chapter_title.to_string(),
            first_record: first,
            last_record: last,
        }
    }

    fn sample_catalog() -> Vec<ChapterEntry> {
        vec![
            entry("Canto 1: Creation", "SB 1.1: Questions by the Sages", 100, 130),
            entry("Canto 1: Creation", "SB 1.2: Divinity and Divine Service", 130, 165),
            entry("Canto 11: General History", "SB 11.1: The Curse upon the Yadu Dynasty", 900, 950),
        ]
    }

    #[test]
    fn test_find_chapter_returns_span() {
        let span = find_chapter(&sample_catalog(), 1, 2).unwrap();

        assert_eq!(span.first_record, 130);
        assert_eq!(span.last_record, 165);
        assert!(span.first_record <= span.last_record);
    }

    #[test]
    fn test_find_chapter_label_does_not_cross_match() {
        // "SB 1.1:" must not match the "SB 11.1:" chapter
        let span = find_chapter(&sample_catalog(), 11, 1).unwrap();
        assert_eq!(span.first_record, 900);

        let span = find_chapter(&sample_catalog(), 1, 1).unwrap();
        assert_eq!(span.first_record, 100);
    }

    #[test]
    fn test_find_chapter_absent_canto_is_none() {
        assert!(find_chapter(&sample_catalog(), 13, 1).is_none());
        assert!(find_chapter(&sample_catalog(), 1, 99).is_none());
    }

    #[tokio::test]
    async fn test_catalog_and_locate_against_fixture() {
        let corpus = Corpus::in_memory().await.unwrap();
        crate::testing::fixtures::seed_corpus(
            corpus.pool(),
            &[(1, vec![3, 2]), (2, vec![1])],
        )
        .await;

        let catalog = corpus.chapter_catalog().await.unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog[0].chapter_title.contains("SB 1.1:"));

        let span = corpus.locate(1, 2).await.unwrap().unwrap();
        assert!(span.first_record <= span.last_record);

        assert!(corpus.locate(13, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_chapter_verses_against_fixture() {
        let corpus = Corpus::in_memory().await.unwrap();
        crate::testing::fixtures::seed_corpus(corpus.pool(), &[(1, vec![4])]).await;

        let span = corpus.locate(1, 1).await.unwrap().unwrap();
        let verses = corpus.chapter_verses(&span).await.unwrap();

        assert_eq!(verses.len(), 4);
        assert_eq!(verses[0].marker, "TEXT 1");
        assert!(verses.iter().all(|v| v.text().starts_with("TEXT")));
    }
}
