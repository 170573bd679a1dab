//! Typed errors for the harvest library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur while harvesting names.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Corpus database query failed
    #[error("corpus database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Generative extraction service unavailable or failed
    #[error("extraction service error: {0}")]
    Miner(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Extraction response was not valid JSON for the record schema
    #[error("malformed extraction response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// Name store read-modify-write failed
    #[error("name store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl HarvestError {
    /// Wrap an arbitrary service error from a `NameMiner` implementation.
    pub fn miner(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Miner(Box::new(err))
    }

    /// Wrap an arbitrary storage error.
    pub fn store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Store(Box::new(err))
    }
}

/// Result type alias for harvest operations.
pub type Result<T> = std::result::Result<T, HarvestError>;
