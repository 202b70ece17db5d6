//! # Course Store
//!
//! The storage capability the course service runs against. Backends:
//!
//! - [`file::FileCourseStore`]: one JSON document per course under `{STORAGE_ROOT}/courses`.
//! - [`memory::MemoryCourseStore`]: process-local map, for tests and embedding.
//! - [`demo::DemoCourseStore`]: read-only demo data; writes are accepted and discarded.
//!
//! [`store_from_config`] picks the backend for the current deployment mode.

pub mod demo;
pub mod file;
pub mod memory;

use grader::types::Course;
use std::sync::Arc;
use thiserror::Error;

pub use demo::DemoCourseStore;
pub use file::FileCourseStore;
pub use memory::MemoryCourseStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid course id '{0}'")]
    InvalidCourseId(String),
    #[error("store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Per-course persistence keyed by course id.
pub trait CourseStore: Send + Sync {
    fn get(&self, course_id: &str) -> StoreResult<Option<Course>>;

    /// Inserts or replaces the course with `course.id`.
    fn put(&self, course: &Course) -> StoreResult<()>;

    /// Removes the course; `Ok(false)` when it did not exist.
    fn delete(&self, course_id: &str) -> StoreResult<bool>;

    /// All courses, oldest first.
    fn list(&self) -> StoreResult<Vec<Course>>;

    /// Keeps a copy of an uploaded outline. Backends without file storage ignore it.
    fn put_source_file(&self, _file_name: &str, _bytes: &[u8]) -> StoreResult<()> {
        Ok(())
    }
}

/// Course ids may only contain ASCII letters, digits, `-` and `_`.
pub fn course_id_is_valid(course_id: &str) -> bool {
    !course_id.is_empty()
        && course_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub(crate) fn check_course_id(course_id: &str) -> StoreResult<()> {
    if course_id_is_valid(course_id) {
        Ok(())
    } else {
        Err(StoreError::InvalidCourseId(course_id.to_string()))
    }
}

/// Demo store when `DEMO_MODE` is on, otherwise the file store under `STORAGE_ROOT`.
pub fn store_from_config() -> Arc<dyn CourseStore> {
    if util::config::demo_mode() {
        tracing::info!("demo mode: course changes will not be persisted");
        Arc::new(DemoCourseStore)
    } else {
        Arc::new(FileCourseStore::from_config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_id_validation() {
        assert!(course_id_is_valid("math-135-1736500000000"));
        assert!(course_id_is_valid("demo_cs_101"));
        assert!(!course_id_is_valid(""));
        assert!(!course_id_is_valid("../etc/passwd"));
        assert!(!course_id_is_valid("a b"));
        assert!(!course_id_is_valid("x.json"));
    }
}
