//! Testing utilities including a mock extraction capability.
//!
//! These are useful for testing the pipeline without a live generative
//! service or a real vedabase file.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{HarvestError, Result};
use crate::traits::{NameMiner, Turn};
use crate::types::NameRecord;

enum Scripted {
    Records(Vec<NameRecord>),
    Failure(String),
}

/// A mock extraction capability with scripted responses.
///
/// Each `find_names` call consumes the next scripted response; once the
/// script runs dry, further calls return an empty record list. Every call's
/// transcript is captured for assertions. Clones share the same script and
/// call log, so a clone kept outside the pipeline can inspect calls made
/// through it.
#[derive(Clone, Default)]
pub struct MockMiner {
    script: Arc<RwLock<VecDeque<Scripted>>>,
    calls: Arc<RwLock<Vec<Vec<Turn>>>>,
}

impl MockMiner {
    /// Create a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn with_response(self, records: Vec<NameRecord>) -> Self {
        self.script
            .write()
            .unwrap()
            .push_back(Scripted::Records(records));
        self
    }

    /// Queue a service failure.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.script
            .write()
            .unwrap()
            .push_back(Scripted::Failure(message.into()));
        self
    }

    /// Transcripts of every call made so far.
    pub fn calls(&self) -> Vec<Vec<Turn>> {
        self.calls.read().unwrap().clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl NameMiner for MockMiner {
    async fn find_names(&self, transcript: &[Turn]) -> Result<Vec<NameRecord>> {
        self.calls.write().unwrap().push(transcript.to_vec());

        match self.script.write().unwrap().pop_front() {
            Some(Scripted::Records(records)) => Ok(records),
            Some(Scripted::Failure(message)) => Err(HarvestError::miner(io::Error::new(
                io::ErrorKind::Other,
                message,
            ))),
            None => Ok(Vec::new()),
        }
    }
}

/// A fully populated record for tests.
pub fn record(name: &str) -> NameRecord {
    NameRecord {
        name: name.to_string(),
        definition: format!("Definition of {}", name),
        context: format!("Context for {}", name),
        references: vec!["SB 1.1.1".to_string()],
        category: "Names of Krishna".to_string(),
        gender: "Male".to_string(),
    }
}

/// In-memory vedabase fixtures.
pub mod fixtures {
    use sqlx::sqlite::SqlitePool;

    /// Seed `contents` and `texts` with a miniature corpus.
    ///
    /// `cantos` maps a canto number to the verse count of each of its
    /// chapters, e.g. `&[(1, vec![3, 2]), (2, vec![1])]`. Record ids are
    /// allocated sequentially the way the real vedabase chains them: each
    /// chapter node's record is its header row's id, and its next sibling
    /// is the following chapter's record.
    pub async fn seed_corpus(pool: &SqlitePool, cantos: &[(u32, Vec<usize>)]) {
        sqlx::query(
            "CREATE TABLE contents ( \
                record INTEGER PRIMARY KEY, \
                title TEXT NOT NULL, \
                level INTEGER NOT NULL, \
                parent INTEGER NOT NULL, \
                next_sibling INTEGER NOT NULL \
            )",
        )
        .execute(pool)
        .await
        .unwrap();

        sqlx::query("CREATE TABLE texts (recid INTEGER PRIMARY KEY, plain TEXT NOT NULL)")
            .execute(pool)
            .await
            .unwrap();

        // Canto nodes sit outside the text record range
        let mut canto_record = 100_000_i64;
        let mut record = 100_i64;

        for (canto, chapters) in cantos {
            canto_record += 1;
            sqlx::query("INSERT INTO contents VALUES (?, ?, 5, 0, 0)")
                .bind(canto_record)
                .bind(format!("Canto {}", canto))
                .execute(pool)
                .await
                .unwrap();

            for (index, verse_count) in chapters.iter().enumerate() {
                let chapter = index as u32 + 1;
                let first = record;
                let next_sibling = first + *verse_count as i64 + 1;

                sqlx::query("INSERT INTO contents VALUES (?, ?, 6, ?, ?)")
                    .bind(first)
                    .bind(format!("SB {}.{}: Chapter {}", canto, chapter, chapter))
                    .bind(canto_record)
                    .bind(next_sibling)
                    .execute(pool)
                    .await
                    .unwrap();

                sqlx::query("INSERT INTO texts VALUES (?, ?)")
                    .bind(first)
                    .bind(format!(
                        "Chapter {} <h1>SB {}.{}</h1> heading",
                        chapter, canto, chapter
                    ))
                    .execute(pool)
                    .await
                    .unwrap();

                for verse in 1..=*verse_count {
                    record += 1;
                    sqlx::query("INSERT INTO texts VALUES (?, ?)")
                        .bind(record)
                        .bind(format!(
                            "<strong>TEXT {}</strong> verse {} of chapter {} <em>purport</em>",
                            verse, verse, chapter
                        ))
                        .execute(pool)
                        .await
                        .unwrap();
                }

                record = next_sibling;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_miner_scripted_responses() {
        let miner = MockMiner::new()
            .with_response(vec![record("Govinda")])
            .with_failure("down");

        let first = miner.find_names(&[Turn::user("hi")]).await.unwrap();
        assert_eq!(first[0].name, "Govinda");

        assert!(miner.find_names(&[Turn::user("again")]).await.is_err());

        // Script exhausted: empty response, never an error
        assert!(miner.find_names(&[Turn::user("more")]).await.unwrap().is_empty());

        assert_eq!(miner.call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_miner_clones_share_state() {
        let miner = MockMiner::new().with_response(vec![record("Govinda")]);
        let observer = miner.clone();

        miner.find_names(&[Turn::user("hi")]).await.unwrap();

        assert_eq!(observer.call_count(), 1);
    }
}
