//! Gemini implementation of the `NameMiner` trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::GeminiClient;
//! use harvest::ai::GeminiMiner;
//!
//! let miner = GeminiMiner::new(GeminiClient::from_env()?).with_model("gemini-2.5-pro");
//! let pipeline = HarvestPipeline::new(corpus, store, miner);
//! ```

use async_trait::async_trait;
use gemini_client::{Content, GeminiClient};

use crate::error::{HarvestError, Result};
use crate::traits::{NameMiner, Role, Turn};
use crate::types::NameRecord;

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

/// Gemini-backed extraction capability.
///
/// Every call requests schema-validated structured output for the record
/// list at temperature 0, so repeated runs over identical inputs are
/// reproducible.
#[derive(Clone)]
pub struct GeminiMiner {
    client: GeminiClient,
    model: String,
}

impl GeminiMiner {
    /// Wrap a Gemini client with the default model.
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Set the generation model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl NameMiner for GeminiMiner {
    async fn find_names(&self, transcript: &[Turn]) -> Result<Vec<NameRecord>> {
        let contents: Vec<Content> = transcript
            .iter()
            .map(|turn| match turn.role {
                Role::User => Content::user(turn.text.as_str()),
                Role::Model => Content::model(turn.text.as_str()),
            })
            .collect();

        self.client
            .generate_structured::<Vec<NameRecord>>(&self.model, contents)
            .await
            .map_err(HarvestError::miner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_override() {
        let miner = GeminiMiner::new(GeminiClient::new("key")).with_model("gemini-2.0-flash");
        assert_eq!(miner.model(), "gemini-2.0-flash");
    }
}
