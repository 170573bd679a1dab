//! Domain data types for the harvest library.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A Sanskrit name extracted from the corpus.
///
/// Produced only by the generative service; the pipeline treats it as an
/// opaque validated value and never constructs or mutates one beyond
/// serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NameRecord {
    /// The name itself, in the nominative case
    pub name: String,

    /// Definition of the name
    pub definition: String,

    /// Where the name comes from and how it is used
    pub context: String,

    /// Verse numbers or sections pointing to this name
    /// (e.g. "SB 1.1.1, 1.1.12 Purport")
    pub references: Vec<String>,

    /// Naming-criteria category (e.g. "Names of Krishna")
    pub category: String,

    /// Gender associated with the name ("Male", "Female", or "Neutral")
    pub gender: String,
}
