//! # Types Module
//!
//! Core data shapes shared by the extractor, the aggregator and the persistence layer.
//! Field names serialize in camelCase so stored course records stay readable by the
//! web front end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// A single gradable item with a maximum score and a percentage weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Unique within the owning course.
    pub id: String,
    pub name: String,
    pub category: String,
    /// Maximum points; expected to be positive.
    pub max: f64,
    /// Percentage points toward the final grade.
    pub weight: f64,
}

/// A user-entered score. `max` overrides the assessment's declared maximum.
///
/// `earned == None` means "not yet graded", which is different from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earned: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ScoreEntry {
    pub fn earned(earned: f64) -> Self {
        Self {
            earned: Some(earned),
            max: None,
        }
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

/// Sparse map from assessment id to its entered score.
pub type ScoreMap = HashMap<String, ScoreEntry>;

/// A course and everything the calculator persists about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Records written before ids were stored take theirs from the file name.
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// Stored copy of the uploaded outline, relative to the course folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Display order only.
    #[serde(default)]
    pub assessments: Vec<Assessment>,
    #[serde(default)]
    pub grades: ScoreMap,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Kind of document an outline was extracted from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Pdf,
    Html,
    PlainText,
    Image,
    Other(String),
}

impl SourceKind {
    /// Classifies a MIME type such as `application/pdf` or `text/html; charset=utf-8`.
    pub fn from_content_type(content_type: &str) -> Self {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match mime.as_str() {
            "application/pdf" => SourceKind::Pdf,
            "text/plain" => SourceKind::PlainText,
            m if m.starts_with("text/html") => SourceKind::Html,
            m if m.starts_with("image/") => SourceKind::Image,
            _ => SourceKind::Other(mime),
        }
    }

    /// Classifies a file by its extension.
    pub fn from_file_name(file_name: &str) -> Self {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => SourceKind::Pdf,
            "html" | "htm" => SourceKind::Html,
            "txt" => SourceKind::PlainText,
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" | "tif" | "tiff" | "heic" => {
                SourceKind::Image
            }
            _ => SourceKind::Other(ext),
        }
    }

    /// Whether documents of this kind yield text without OCR.
    pub fn is_text_bearing(&self) -> bool {
        matches!(
            self,
            SourceKind::Pdf | SourceKind::Html | SourceKind::PlainText
        )
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Pdf => f.write_str("pdf"),
            SourceKind::Html => f.write_str("html"),
            SourceKind::PlainText => f.write_str("text"),
            SourceKind::Image => f.write_str("image"),
            SourceKind::Other(raw) if raw.is_empty() => f.write_str("unknown"),
            SourceKind::Other(raw) => f.write_str(raw),
        }
    }
}
