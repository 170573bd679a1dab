//! Batch extraction: the two-round exchange with the extraction capability.
//!
//! Round 1 submits the batch text with the task prompt (and the exclusion
//! block when prior names exist). Round 2 replays the whole exchange as
//! conversation history and asks for additional names from the same batch.
//! The batch result is the union of both rounds, deduplicated by
//! normalized name, round 1 order first.

use std::collections::HashSet;

use tracing::info;

use crate::error::Result;
use crate::pipeline::prompts;
use crate::store::normalize_name;
use crate::traits::{NameMiner, Turn};
use crate::types::NameRecord;

/// Run the two-round extraction protocol over one batch of verse text.
///
/// Service failures and malformed responses propagate; a failed round
/// aborts the batch with no partial result.
pub async fn extract_batch<M: NameMiner + ?Sized>(
    miner: &M,
    batch_text: &str,
    source_ref: &str,
    exclusions: &[String],
) -> Result<Vec<NameRecord>> {
    if !exclusions.is_empty() {
        info!(excluded = exclusions.len(), "excluding existing names from previous searches");
    }

    let mut transcript = vec![Turn::user(prompts::opening_prompt(
        batch_text, source_ref, exclusions,
    ))];

    let first = miner.find_names(&transcript).await?;
    info!(source = %source_ref, found = first.len(), "first extraction round complete");

    // Replay round 1 verbatim so the continuation sees exactly what it
    // already produced
    transcript.push(Turn::model(serde_json::to_string(&first)?));
    transcript.push(Turn::user(prompts::continuation_prompt(source_ref)));

    let second = miner.find_names(&transcript).await?;
    info!(found = second.len(), "continuation round complete");

    Ok(merge_rounds(first, second))
}

/// Union of both rounds' records, deduplicated by normalized name.
///
/// Round 1 records come first; a round 2 record with a name already seen
/// in round 1 (or earlier in round 2) is dropped.
pub fn merge_rounds(first: Vec<NameRecord>, second: Vec<NameRecord>) -> Vec<NameRecord> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(first.len() + second.len());

    for record in first.into_iter().chain(second) {
        if seen.insert(normalize_name(&record.name)) {
            merged.push(record);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{record, MockMiner};
    use crate::traits::Role;

    #[test]
    fn test_merge_rounds_unions_and_dedups() {
        let first = vec![record("Govinda"), record("Mādhava")];
        let second = vec![record("govinda"), record("Keśava"), record("kesava")];

        let merged = merge_rounds(first, second);

        let names: Vec<&str> = merged.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Govinda", "Mādhava", "Keśava"]);
    }

    #[test]
    fn test_merge_rounds_keeps_round_one_when_round_two_is_empty() {
        let merged = merge_rounds(vec![record("Govinda")], vec![]);
        assert_eq!(merged.len(), 1);
    }

    #[tokio::test]
    async fn test_two_rounds_share_one_conversation() {
        let miner = MockMiner::new()
            .with_response(vec![record("Govinda")])
            .with_response(vec![record("Keśava")]);

        let result = extract_batch(&miner, "TEXT 1 body", "Canto 1, Chapter 1", &[])
            .await
            .unwrap();

        let names: Vec<&str> = result.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Govinda", "Keśava"]);

        let calls = miner.calls();
        assert_eq!(calls.len(), 2);

        // Round 1: single user turn carrying the batch
        assert_eq!(calls[0].len(), 1);
        assert_eq!(calls[0][0].role, Role::User);
        assert!(calls[0][0].text.starts_with("TEXT 1 body"));

        // Round 2: original prompt, round 1 records replayed as the model
        // turn, then the continuation instruction
        assert_eq!(calls[1].len(), 3);
        assert_eq!(calls[1][0].text, calls[0][0].text);
        assert_eq!(calls[1][1].role, Role::Model);
        assert!(calls[1][1].text.contains("Govinda"));
        assert_eq!(calls[1][2].role, Role::User);
        assert!(calls[1][2].text.contains("continue to find more names"));
    }

    #[tokio::test]
    async fn test_exclusions_reach_the_opening_prompt_only_when_present() {
        let miner = MockMiner::new();
        extract_batch(&miner, "batch", "ref", &["Govinda".to_string()])
            .await
            .unwrap();

        let calls = miner.calls();
        assert!(calls[0][0].text.contains("DO NOT include any of the following names"));
        assert!(calls[0][0].text.contains("Govinda"));

        let miner = MockMiner::new();
        extract_batch(&miner, "batch", "ref", &[]).await.unwrap();
        assert!(!miner.calls()[0][0].text.contains("DO NOT include"));
    }

    #[tokio::test]
    async fn test_round_failure_aborts_the_batch() {
        let miner = MockMiner::new()
            .with_response(vec![record("Govinda")])
            .with_failure("service unavailable");

        let result = extract_batch(&miner, "batch", "ref", &[]).await;
        assert!(result.is_err());
    }
}
