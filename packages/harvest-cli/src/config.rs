//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dotenvy::dotenv;

/// Harvest configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the vedabase SQLite file
    pub vedabase_path: PathBuf,

    /// Gemini API key
    pub gemini_api_key: String,

    /// Generation model
    pub gemini_model: String,

    /// Directory holding the per-chapter name files
    pub names_dir: PathBuf,

    /// Path of the chapter catalog artifact
    pub catalog_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            vedabase_path: env::var("VEDABASE_PATH")
                .context("VEDABASE_PATH must be set")?
                .into(),
            gemini_api_key: env::var("GEMINI_API_KEY")
                .context("GEMINI_API_KEY must be set")?,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-pro".to_string()),
            names_dir: env::var("NAMES_DIR")
                .unwrap_or_else(|_| ".".to_string())
                .into(),
            catalog_path: env::var("CATALOG_PATH")
                .unwrap_or_else(|_| "sb_chapters.json".to_string())
                .into(),
        })
    }
}
