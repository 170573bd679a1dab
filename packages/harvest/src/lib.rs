//! Name harvesting over the vedabase corpus.
//!
//! Mines the Śrīmad-Bhāgavatam (a "vedabase" SQLite file) for beautiful
//! Sanskrit names with a generative language service and accumulates
//! schema-validated records into per-chapter JSON stores.
//!
//! # Design
//!
//! - Chapter location and verse segmentation work on the vedabase's
//!   generic content tree; chapters are addressed by (canto, chapter) and
//!   resolved to record-id spans.
//! - Extraction runs a two-round conversation per 20-verse batch: find
//!   names, then replay the exchange and ask for more. Both rounds'
//!   records are kept, deduplicated by normalized name.
//! - The per-chapter store is the dedup boundary: names already on file
//!   are passed to the service as an exclusion hint and enforced again at
//!   write time.
//! - The generative capability is a trait ([`NameMiner`]), injected into
//!   the pipeline; the Gemini implementation lives behind the `gemini`
//!   feature and a deterministic mock ships in [`testing`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use harvest::{Corpus, HarvestPipeline, NameStore};
//! use harvest::testing::MockMiner;
//!
//! let corpus = Corpus::open("vedabase.ivd").await?;
//! let pipeline = HarvestPipeline::new(corpus, NameStore::new("."), MockMiner::new());
//!
//! // One chapter
//! pipeline.process_chapter(5, 2).await?;
//!
//! // The whole corpus
//! pipeline.sweep(1, 12).await?;
//! ```

pub mod ai;
pub mod corpus;
pub mod error;
pub mod pipeline;
pub mod store;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use corpus::{
    find_chapter, segment_verses, split_verses, strip_markup, write_catalog, ChapterEntry,
    ChapterSpan, Corpus, VerseUnit,
};
pub use error::{HarvestError, Result};
pub use pipeline::{
    extract_batch, merge_rounds, ChapterOutcome, ChapterReport, HarvestPipeline, SweepReport,
    DEFAULT_BATCH_SIZE, MAX_CANTO,
};
pub use store::{normalize_name, AppendOutcome, NameStore};
pub use traits::{NameMiner, Role, Turn};
pub use types::NameRecord;

#[cfg(feature = "gemini")]
pub use ai::GeminiMiner;
