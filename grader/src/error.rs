//! Grader Error Types
//!
//! This module defines the error types of the grader pipeline.
//!
//! - [`CompletionError`]: failures of the AI-completion collaborator (network, auth, quota, timeout).
//! - [`FallbackReason`]: why the extractor abandoned the completion path. These are never
//!   returned to callers; they are logged and recorded on the extraction report.
//! - [`ExtractError`]: the one failure the extractor surfaces, an input kind with no text.
//!
//! The grade aggregator has no error type: it is total over its input.

use std::time::Duration;
use thiserror::Error;

/// Failure of a single call to the completion collaborator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompletionError {
    /// No API key is configured for the collaborator.
    #[error("completion API key is not configured")]
    MissingApiKey,
    /// Transport-level failure (DNS, connect, TLS, body read).
    #[error("network error: {0}")]
    Network(String),
    /// The collaborator rejected the request with a non-success status.
    #[error("completion request failed with status {status}: {body}")]
    Http { status: u16, body: String },
    /// Quota exhausted or rate limit hit (HTTP 429).
    #[error("completion quota exhausted or rate limited")]
    RateLimited,
    /// The call did not finish within the allotted time and was abandoned.
    #[error("completion timed out after {0:?}")]
    Timeout(Duration),
    /// The response body did not match the collaborator's envelope.
    #[error("invalid completion response: {0}")]
    InvalidResponse(String),
    /// The collaborator answered without any generated text.
    #[error("completion returned no text")]
    EmptyResponse,
}

/// Why the extractor used the deterministic fallback instead of the completion result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FallbackReason {
    #[error("completion unavailable: {0}")]
    CompletionUnavailable(#[from] CompletionError),
    #[error("unparsable completion response: {0}")]
    UnparsableCompletionResponse(String),
    #[error("completion returned an empty assessment list")]
    EmptyCompletionResult,
    #[error("no completion client configured")]
    NoCompletionClient,
    #[error("source document has no text content")]
    NoTextContent,
}

/// Errors surfaced to callers of the extractor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    /// The input kind carries no extractable text (e.g. an image without OCR).
    #[error("unsupported source kind '{0}': provide a PDF or HTML file")]
    UnsupportedSourceKind(String),
}
