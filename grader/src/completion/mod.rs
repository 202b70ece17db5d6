//! # Completion Module
//!
//! Invocation of a [`CompletionClient`] as a tagged outcome.
//!
//! A call either yields [`CompletionOutcome::Success`] with the response text or
//! [`CompletionOutcome::Failure`] with the reason. Callers branch on the variant; there
//! is no retry. Timeouts are enforced here by dropping the in-flight future, which
//! cancels the underlying request.

pub mod gemini;

use crate::error::CompletionError;
use crate::traits::completion::CompletionClient;
use std::time::Duration;

/// Result of one completion call.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
    Success(String),
    Failure(CompletionError),
}

impl From<Result<String, CompletionError>> for CompletionOutcome {
    fn from(result: Result<String, CompletionError>) -> Self {
        match result {
            Ok(text) => CompletionOutcome::Success(text),
            Err(err) => CompletionOutcome::Failure(err),
        }
    }
}

/// Calls `client` and gives up after `timeout`.
pub async fn complete_with_timeout(
    client: &dyn CompletionClient,
    prompt: &str,
    timeout: Duration,
) -> CompletionOutcome {
    match tokio::time::timeout(timeout, client.complete(prompt)).await {
        Ok(result) => result.into(),
        Err(_) => {
            tracing::warn!(?timeout, "completion call timed out, abandoning it");
            CompletionOutcome::Failure(CompletionError::Timeout(timeout))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Slow;

    #[async_trait]
    impl CompletionClient for Slow {
        async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("[]".to_string())
        }
    }

    struct Failing;

    #[async_trait]
    impl CompletionClient for Failing {
        async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
            Err(CompletionError::RateLimited)
        }
    }

    #[tokio::test]
    async fn test_timeout_becomes_failure() {
        let outcome = complete_with_timeout(&Slow, "prompt", Duration::from_millis(20)).await;
        assert_eq!(
            outcome,
            CompletionOutcome::Failure(CompletionError::Timeout(Duration::from_millis(20)))
        );
    }

    #[tokio::test]
    async fn test_client_error_becomes_failure() {
        let outcome = complete_with_timeout(&Failing, "prompt", Duration::from_secs(1)).await;
        assert_eq!(outcome, CompletionOutcome::Failure(CompletionError::RateLimited));
    }
}
