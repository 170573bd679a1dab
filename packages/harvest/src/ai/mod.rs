//! Implementations of the `NameMiner` trait.
//!
//! This module provides the Gemini reference implementation. Users can use
//! it directly or implement their own provider.

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::GeminiMiner;
