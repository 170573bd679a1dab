//! Core trait abstraction for the generative extraction capability.
//!
//! The `NameMiner` trait is the seam between the pipeline and a concrete
//! LLM provider: submit a conversation transcript, receive schema-validated
//! name records. The Gemini implementation lives in [`crate::ai`]; a
//! deterministic mock lives in [`crate::testing`].

use async_trait::async_trait;

use crate::error::Result;
use crate::types::NameRecord;

/// Role of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Prompt text submitted by the pipeline
    User,

    /// A prior model response replayed as history
    Model,
}

/// One turn of the conversation submitted to the extraction capability.
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    /// Create a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// Create a model turn.
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Generative extraction capability.
///
/// Implementations wrap a specific LLM provider and are responsible for
/// enforcing the record schema on the response; a response that does not
/// validate must surface as an error, never as a best-effort partial list.
#[async_trait]
pub trait NameMiner: Send + Sync {
    /// Submit a conversation and receive schema-validated name records.
    ///
    /// The transcript is submitted in order, oldest turn first. The final
    /// turn is always a user turn carrying the active instruction.
    async fn find_names(&self, transcript: &[Turn]) -> Result<Vec<NameRecord>>;
}
