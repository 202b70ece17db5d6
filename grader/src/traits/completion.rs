//! Completion Client Trait
//!
//! The extractor needs exactly one capability from the AI collaborator: turn a prompt
//! into response text. Request formats, auth and rate limits belong to the
//! implementation (see [`crate::completion::gemini`]).
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use grader::error::CompletionError;
//! use grader::traits::completion::CompletionClient;
//!
//! struct Canned(&'static str);
//!
//! #[async_trait]
//! impl CompletionClient for Canned {
//!     async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
//!         Ok(self.0.to_string())
//!     }
//! }
//! ```

use crate::error::CompletionError;
use async_trait::async_trait;

/// An AI text-completion collaborator.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends `prompt` and returns the generated text.
    ///
    /// # Errors
    ///
    /// Returns a [`CompletionError`] on quota, network or auth problems.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
