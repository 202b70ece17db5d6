//! Inputs accepted by [`crate::course_service::CourseService`] and course id helpers.

use grader::types::{Assessment, SourceKind};
use std::path::Path;
use validator::{Validate, ValidationError};

/// An uploaded outline together with the text already extracted from it.
#[derive(Debug, Clone, Default, Validate)]
pub struct OutlineUpload {
    #[validate(custom(function = "validate_not_blank"))]
    pub file_name: String,

    /// MIME type reported by the client, if any.
    pub content_type: Option<String>,

    /// Text extracted from the document (PDF text layer, stripped HTML, OCR output).
    pub raw_text: String,

    /// Uploaded document bytes, stored next to the course record when present.
    pub bytes: Option<Vec<u8>>,
}

impl OutlineUpload {
    pub fn from_text(file_name: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            raw_text: raw_text.into(),
            bytes: None,
        }
    }

    /// Content type wins over the file extension when both are known.
    pub fn source_kind(&self) -> SourceKind {
        match self.content_type.as_deref().map(str::trim) {
            Some(ct) if !ct.is_empty() => SourceKind::from_content_type(ct),
            _ => SourceKind::from_file_name(&self.file_name),
        }
    }

    /// Lowercased extension of the uploaded file, `bin` when it has none.
    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or_else(|| "bin".to_string())
    }
}

/// Partial update of a course. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Validate)]
pub struct CourseUpdate {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_assessments"))]
    pub assessments: Option<Vec<Assessment>>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("must not be blank"));
    }
    Ok(())
}

/// Ids unique and non-blank, names non-blank, `max > 0`, weights finite.
pub fn validate_assessments(assessments: &[Assessment]) -> Result<(), ValidationError> {
    let mut seen = std::collections::HashSet::new();
    for a in assessments {
        if a.id.trim().is_empty() {
            return Err(ValidationError::new("assessment id must not be blank"));
        }
        if !seen.insert(a.id.as_str()) {
            return Err(ValidationError::new("assessment ids must be unique"));
        }
        if a.name.trim().is_empty() {
            return Err(ValidationError::new("assessment name must not be blank"));
        }
        if !(a.max.is_finite() && a.max > 0.0) {
            return Err(ValidationError::new("assessment max must be positive"));
        }
        if !a.weight.is_finite() {
            return Err(ValidationError::new("assessment weight must be a finite number"));
        }
    }
    Ok(())
}

/// Lowercases, turns whitespace runs into `-` and drops anything outside `[a-z0-9-]`.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// `{slug}-{millis}`, or `course-{millis}` when the name has no usable characters.
pub fn course_id_for(name: &str, millis: i64) -> String {
    let slug = slugify(name);
    if slug.trim_matches('-').is_empty() {
        format!("course-{millis}")
    } else {
        format!("{slug}-{millis}")
    }
}
