//! Verse segmentation: strip markup and split chapter text on verse markers.
//!
//! The vedabase stores each chapter as a run of markup-laden rows. Cleaning
//! removes every `<...>` tag; the cleaned rows are concatenated into one
//! chapter-wide blob and split wherever a whole-word verse marker
//! (`TEXT 5`, `TEXTS 5-7`) begins. The marker stays attached to the piece
//! it introduces, so each unit is the marker plus everything up to the next
//! marker. Whatever precedes the first marker (the chapter header) is
//! discarded.

use regex::Regex;

/// A single verse unit: its marker label and the commentary block it heads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseUnit {
    /// The marker label, e.g. "TEXT 5" or "TEXTS 5-7"
    pub marker: String,

    /// Cleaned text between this marker and the next
    pub body: String,
}

impl VerseUnit {
    /// The full unit text, marker first.
    pub fn text(&self) -> String {
        if self.body.is_empty() {
            self.marker.clone()
        } else {
            format!("{} {}", self.marker, self.body)
        }
    }
}

/// Replace every `<...>` tag (non-greedy, so adjacent tags are removed
/// individually) with a single space, preserving inter-word spacing.
pub fn strip_markup(raw: &str) -> String {
    let tag = Regex::new(r"<.*?>").unwrap();
    tag.replace_all(raw, " ").into_owned()
}

/// Segment raw chapter rows into ordered verse units.
///
/// Rows must already be in ascending record order; that order defines
/// verse numbering order.
pub fn segment_verses<S: AsRef<str>>(rows: &[S]) -> Vec<VerseUnit> {
    let cleaned: Vec<String> = rows.iter().map(|r| strip_markup(r.as_ref())).collect();
    split_verses(&cleaned.join(" "))
}

/// Split a cleaned chapter blob at every whole-word verse marker.
///
/// A marker is `TEXT <n>` or `TEXTS <n>-<m>`; word boundaries on both sides
/// keep tokens like "TEXTUAL 12" or "CONTEXT 5" from becoming split points.
pub fn split_verses(blob: &str) -> Vec<VerseUnit> {
    let marker = Regex::new(r"\b(TEXT \d+|TEXTS \d+-\d+)\b").unwrap();

    let matches: Vec<(usize, usize)> = marker.find_iter(blob).map(|m| (m.start(), m.end())).collect();

    matches
        .iter()
        .enumerate()
        .map(|(i, &(start, end))| {
            let piece_end = matches.get(i + 1).map_or(blob.len(), |&(next, _)| next);
            VerseUnit {
                marker: blob[start..end].to_string(),
                body: blob[end..piece_end].trim().to_string(),
            }
        })
        .collect()
}
