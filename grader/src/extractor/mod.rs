//! # Assessment Extractor
//!
//! Turns course-outline text into a normalised list of weighted assessments.
//!
//! ## Paths
//!
//! 1. **Completion**: the outline is sent to a [`CompletionClient`] with the prompt from
//!    [`prompt::build_prompt`]. The response is fence-stripped, parsed as a JSON array and
//!    normalised.
//! 2. **Fallback**: any failure of the completion path (no client, transport error,
//!    timeout, unparsable or empty response) switches to [`fallback::fallback_assessments`].
//!
//! The only error surfaced is [`ExtractError::UnsupportedSourceKind`], for a non-text
//! document (e.g. an image) that arrives without any text. Every other outcome is a
//! non-empty list whose weights sum to 100 (within rounding), or all zero when the
//! completion path returned only zero weights.

pub mod fallback;
pub mod normalize;
pub mod prompt;
pub mod response;

use crate::completion::{CompletionOutcome, complete_with_timeout};
use crate::error::{ExtractError, FallbackReason};
use crate::traits::completion::CompletionClient;
use crate::types::{Assessment, SourceKind};
use std::time::Duration;

pub use fallback::{default_assessments, fallback_assessments};
pub use normalize::{normalize_assessments, renormalize_weights};
pub use prompt::build_prompt;
pub use response::{parse_completion_response, strip_code_fences};

/// Which path produced an extraction result.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionSource {
    Completion,
    Fallback(FallbackReason),
}

/// An extracted assessment list together with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionReport {
    pub assessments: Vec<Assessment>,
    pub source: ExtractionSource,
}

impl ExtractionReport {
    pub fn used_fallback(&self) -> bool {
        matches!(self.source, ExtractionSource::Fallback(_))
    }
}

fn fallback_report(raw_text: &str, kind: &SourceKind, reason: FallbackReason) -> ExtractionReport {
    tracing::warn!(%reason, source_kind = %kind, "falling back to pattern-based outline parsing");
    ExtractionReport {
        assessments: fallback_assessments(raw_text, kind),
        source: ExtractionSource::Fallback(reason),
    }
}

/// Extracts assessments from `raw_text`.
///
/// # Arguments
///
/// * `raw_text` - Text already pulled out of the uploaded document.
/// * `kind` - Kind of the uploaded document.
/// * `client` - Completion collaborator; `None` goes straight to the fallback.
/// * `timeout` - Upper bound for the completion call.
///
/// # Errors
///
/// [`ExtractError::UnsupportedSourceKind`] when `kind` is not text-bearing and
/// `raw_text` is blank.
pub async fn extract_assessments(
    raw_text: &str,
    kind: &SourceKind,
    client: Option<&dyn CompletionClient>,
    timeout: Duration,
) -> Result<ExtractionReport, ExtractError> {
    if raw_text.trim().is_empty() {
        if !kind.is_text_bearing() {
            tracing::warn!(source_kind = %kind, "no text available for non-text source");
            return Err(ExtractError::UnsupportedSourceKind(kind.to_string()));
        }
        return Ok(fallback_report(raw_text, kind, FallbackReason::NoTextContent));
    }

    let Some(client) = client else {
        return Ok(fallback_report(raw_text, kind, FallbackReason::NoCompletionClient));
    };

    tracing::info!(text_len = raw_text.len(), source_kind = %kind, "extracting assessments via completion");

    let prompt = build_prompt(raw_text);
    match complete_with_timeout(client, &prompt, timeout).await {
        CompletionOutcome::Success(text) => match parse_completion_response(&text) {
            Ok(values) => {
                let assessments = normalize_assessments(&values);
                tracing::info!(count = assessments.len(), "completion extraction succeeded");
                Ok(ExtractionReport {
                    assessments,
                    source: ExtractionSource::Completion,
                })
            }
            Err(reason) => Ok(fallback_report(raw_text, kind, reason)),
        },
        CompletionOutcome::Failure(err) => Ok(fallback_report(raw_text, kind, err.into())),
    }
}

/// Like [`extract_assessments`], returning only the assessment list.
pub async fn extract_assessments_list(
    raw_text: &str,
    kind: &SourceKind,
    client: Option<&dyn CompletionClient>,
    timeout: Duration,
) -> Result<Vec<Assessment>, ExtractError> {
    extract_assessments(raw_text, kind, client, timeout)
        .await
        .map(|report| report.assessments)
}
