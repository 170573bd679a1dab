//! Per-chapter name store.
//!
//! Each (canto, chapter) pair owns one JSON file holding the ordered
//! sequence of every `NameRecord` harvested so far. The store doubles as
//! the exclusion source for later runs: reading is always lenient (a
//! missing or corrupt file is an empty store, with a logged warning),
//! while appending is a strict read-modify-write of the whole sequence
//! with name-level dedup.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::error::{HarvestError, Result};
use crate::types::NameRecord;

/// File-backed store of harvested names, one file per chapter.
pub struct NameStore {
    dir: PathBuf,
}

/// What an `append` call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppendOutcome {
    /// Records added to the chapter file
    pub appended: usize,

    /// Records dropped as duplicates of an already-stored name
    pub skipped: usize,
}

impl NameStore {
    /// Create a store rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of a chapter's name file.
    pub fn chapter_path(&self, canto: u32, chapter: u32) -> PathBuf {
        self.dir
            .join(format!("sb_canto{}_chapter{}_names.json", canto, chapter))
    }

    /// Load every record stored for a chapter.
    ///
    /// Never fails: a missing file is an empty store, and an unreadable or
    /// unparsable file degrades to empty with a warning so a damaged store
    /// never blocks a harvest run.
    pub fn load_records(&self, canto: u32, chapter: u32) -> Vec<NameRecord> {
        let path = self.chapter_path(canto, chapter);

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no name store for chapter yet");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "name store unreadable, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "name store corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    /// Names already recorded for a chapter, for the exclusion hint.
    pub fn load_exclusions(&self, canto: u32, chapter: u32) -> Vec<String> {
        let names: Vec<String> = self
            .load_records(canto, chapter)
            .into_iter()
            .map(|r| r.name)
            .collect();

        if !names.is_empty() {
            info!(canto, chapter, existing = names.len(), "loaded existing names to exclude");
        }

        names
    }

    /// Append a batch of records to a chapter's file.
    ///
    /// Read-modify-write of the full sequence. A record whose normalized
    /// name already exists in the stored sequence, or earlier in this
    /// batch, is dropped; stored records are never rewritten.
    pub fn append(
        &self,
        canto: u32,
        chapter: u32,
        records: Vec<NameRecord>,
    ) -> Result<AppendOutcome> {
        let mut stored = self.load_records(canto, chapter);
        let mut seen: HashSet<String> = stored.iter().map(|r| normalize_name(&r.name)).collect();

        let mut outcome = AppendOutcome::default();
        for record in records {
            if seen.insert(normalize_name(&record.name)) {
                stored.push(record);
                outcome.appended += 1;
            } else {
                debug!(name = %record.name, "dropping duplicate name");
                outcome.skipped += 1;
            }
        }

        fs::create_dir_all(&self.dir).map_err(HarvestError::store)?;

        let path = self.chapter_path(canto, chapter);
        let json = serde_json::to_string_pretty(&stored).map_err(HarvestError::store)?;
        fs::write(&path, json).map_err(HarvestError::store)?;

        info!(
            canto,
            chapter,
            appended = outcome.appended,
            skipped = outcome.skipped,
            total = stored.len(),
            "appended new entries to name store"
        );

        Ok(outcome)
    }
}

/// Dedup key for a name: lowercased, with IAST diacritics folded to ASCII
/// so transliteration variants of the same name collide
/// (e.g. "Vāsudeva" and "vasudeva").
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase().chars().map(fold_iast).collect()
}

fn fold_iast(c: char) -> char {
    match c {
        'ā' => 'a',
        'ī' => 'i',
        'ū' => 'u',
        'ē' => 'e',
        'ō' => 'o',
        'ṛ' | 'ṝ' => 'r',
        'ḷ' | 'ḹ' => 'l',
        'ṅ' | 'ñ' | 'ṇ' => 'n',
        'ṭ' => 't',
        'ḍ' => 'd',
        'ś' | 'ṣ' => 's',
        'ṁ' | 'ṃ' => 'm',
        'ḥ' => 'h',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = NameStore::new(dir.path());

        assert!(store.load_records(1, 1).is_empty());
        assert!(store.load_exclusions(1, 1).is_empty());
    }

    #[test]
    fn test_corrupt_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = NameStore::new(dir.path());
        fs::write(store.chapter_path(1, 1), "not json {").unwrap();

        assert!(store.load_records(1, 1).is_empty());
        assert!(store.load_exclusions(1, 1).is_empty());
    }

    #[test]
    fn test_append_then_reload() {
        let dir = TempDir::new().unwrap();
        let store = NameStore::new(dir.path());

        let outcome = store
            .append(5, 2, vec![record("Govinda"), record("Mādhava")])
            .unwrap();
        assert_eq!(outcome.appended, 2);
        assert_eq!(outcome.skipped, 0);

        let outcome = store.append(5, 2, vec![record("Keśava")]).unwrap();
        assert_eq!(outcome.appended, 1);

        let reloaded = store.load_records(5, 2);
        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded[0].name, "Govinda");
        assert_eq!(reloaded[2].name, "Keśava");

        let exclusions = store.load_exclusions(5, 2);
        assert_eq!(exclusions, vec!["Govinda", "Mādhava", "Keśava"]);
    }

    #[test]
    fn test_append_dedups_by_normalized_name() {
        let dir = TempDir::new().unwrap();
        let store = NameStore::new(dir.path());

        store.append(1, 1, vec![record("Vāsudeva")]).unwrap();

        // Case and diacritic variants of a stored name, plus an in-batch
        // duplicate
        let outcome = store
            .append(
                1,
                1,
                vec![record("vasudeva"), record("VĀSUDEVA"), record("Nārada"), record("Narada")],
            )
            .unwrap();

        assert_eq!(outcome.appended, 1);
        assert_eq!(outcome.skipped, 3);

        let names: Vec<String> = store.load_records(1, 1).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Vāsudeva", "Nārada"]);
    }

    #[test]
    fn test_chapters_are_isolated() {
        let dir = TempDir::new().unwrap();
        let store = NameStore::new(dir.path());

        store.append(1, 1, vec![record("Govinda")]).unwrap();
        store.append(1, 2, vec![record("Govinda")]).unwrap();

        assert_eq!(store.load_records(1, 1).len(), 1);
        assert_eq!(store.load_records(1, 2).len(), 1);
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Vāsudeva"), "vasudeva");
        assert_eq!(normalize_name("  Śrīmad-Bhāgavatam "), "srimad-bhagavatam");
        assert_eq!(normalize_name("KṚṢṆA"), "krsna");
        assert_eq!(normalize_name("plain"), "plain");
    }
}
