//! # Course Service
//!
//! Course lifecycle on top of a [`CourseStore`]: creation from an uploaded outline,
//! assessment editing, grade entry and the running grade summary.

use crate::course::{CourseUpdate, OutlineUpload, course_id_for};
use crate::store::{CourseStore, StoreError, store_from_config};
use chrono::{DateTime, Utc};
use grader::completion::gemini::GeminiClient;
use grader::error::ExtractError;
use grader::extractor::extract_assessments;
use grader::scorer::{GradeSummary, compute_grade_summary, distinct_categories};
use grader::traits::completion::CompletionClient;
use grader::types::{Assessment, Course, ScoreEntry, ScoreMap};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use validator::Validate;

const NEW_ASSESSMENT_NAME: &str = "New Assessment";
const NEW_ASSESSMENT_CATEGORY: &str = "Assignments";
const NEW_ASSESSMENT_MAX: f64 = 100.0;
const NEW_ASSESSMENT_WEIGHT: f64 = 10.0;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ServiceError::Validation(errors.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Clone)]
pub struct CourseService {
    store: Arc<dyn CourseStore>,
    completion: Option<Arc<dyn CompletionClient>>,
    completion_timeout: Duration,
}

impl CourseService {
    /// Service without a completion client; extraction always uses the fallback parser.
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        Self {
            store,
            completion: None,
            completion_timeout: Duration::from_secs(util::config::completion_timeout_secs()),
        }
    }

    pub fn with_completion(mut self, client: Arc<dyn CompletionClient>, timeout: Duration) -> Self {
        self.completion = Some(client);
        self.completion_timeout = timeout;
        self
    }

    /// Store and Gemini client from the global configuration.
    pub fn from_config() -> Self {
        let service = Self::new(store_from_config());
        match GeminiClient::from_config() {
            Some(client) => {
                tracing::info!(model = client.model(), "completion client configured");
                let timeout = service.completion_timeout;
                service.with_completion(Arc::new(client), timeout)
            }
            None => {
                tracing::info!("no completion API key set, outlines use the pattern parser");
                service
            }
        }
    }

    pub fn store(&self) -> &Arc<dyn CourseStore> {
        &self.store
    }

    fn load(&self, course_id: &str) -> ServiceResult<Course> {
        self.store
            .get(course_id)?
            .ok_or_else(|| ServiceError::NotFound(format!("course '{course_id}'")))
    }

    /// Loads, edits, stamps `updated_at` and saves.
    fn modify<T>(
        &self,
        course_id: &str,
        edit: impl FnOnce(&mut Course) -> ServiceResult<T>,
    ) -> ServiceResult<(Course, T)> {
        let mut course = self.load(course_id)?;
        let out = edit(&mut course)?;
        course.updated_at = Some(Utc::now());
        self.store.put(&course)?;
        Ok((course, out))
    }

    /// Creates a course from an uploaded outline.
    ///
    /// The outline is run through the assessment extractor; only a non-text upload
    /// without any text fails extraction.
    pub async fn create_course(&self, name: &str, upload: OutlineUpload) -> ServiceResult<Course> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("course name must not be blank".to_string()));
        }
        upload.validate()?;

        let now = Utc::now();
        let course_id = course_id_for(name, now.timestamp_millis());
        let kind = upload.source_kind();

        let report = extract_assessments(
            &upload.raw_text,
            &kind,
            self.completion.as_deref(),
            self.completion_timeout,
        )
        .await?;
        let used_fallback = report.used_fallback();

        let file_name = match upload.bytes.as_deref() {
            Some(bytes) => {
                let file_name = format!("{course_id}.{}", upload.extension());
                self.store.put_source_file(&file_name, bytes)?;
                Some(file_name)
            }
            None => None,
        };

        let course = Course {
            id: course_id,
            name: name.to_string(),
            file_name,
            assessments: report.assessments,
            grades: ScoreMap::new(),
            created_at: now,
            updated_at: None,
        };
        self.store.put(&course)?;

        tracing::info!(
            course_id = %course.id,
            assessments = course.assessments.len(),
            used_fallback,
            "course created"
        );
        Ok(course)
    }

    pub fn get_course(&self, course_id: &str) -> ServiceResult<Course> {
        self.load(course_id)
    }

    pub fn list_courses(&self) -> ServiceResult<Vec<Course>> {
        Ok(self.store.list()?)
    }

    pub fn update_course(&self, course_id: &str, update: CourseUpdate) -> ServiceResult<Course> {
        update.validate()?;
        let (course, ()) = self.modify(course_id, |course| {
            if let Some(name) = update.name {
                course.name = name.trim().to_string();
            }
            if let Some(assessments) = update.assessments {
                course.assessments = assessments;
            }
            Ok(())
        })?;
        tracing::info!(course_id, "course updated");
        Ok(course)
    }

    /// Appends a placeholder assessment and returns it.
    pub fn add_assessment(&self, course_id: &str) -> ServiceResult<Assessment> {
        let (_, added) = self.modify(course_id, |course| {
            let base = format!("assessment-{}", Utc::now().timestamp_millis());
            let mut id = base.clone();
            let mut suffix = 1;
            while course.assessments.iter().any(|a| a.id == id) {
                suffix += 1;
                id = format!("{base}-{suffix}");
            }

            let assessment = Assessment {
                id,
                name: NEW_ASSESSMENT_NAME.to_string(),
                category: NEW_ASSESSMENT_CATEGORY.to_string(),
                max: NEW_ASSESSMENT_MAX,
                weight: NEW_ASSESSMENT_WEIGHT,
            };
            course.assessments.push(assessment.clone());
            Ok(assessment)
        })?;
        Ok(added)
    }

    /// Removes an assessment and any score entered for it.
    pub fn remove_assessment(&self, course_id: &str, assessment_id: &str) -> ServiceResult<Course> {
        let (course, ()) = self.modify(course_id, |course| {
            let before = course.assessments.len();
            course.assessments.retain(|a| a.id != assessment_id);
            if course.assessments.len() == before {
                return Err(ServiceError::NotFound(format!("assessment '{assessment_id}'")));
            }
            course.grades.remove(assessment_id);
            Ok(())
        })?;
        Ok(course)
    }

    /// Replaces the whole grade map.
    pub fn save_grades(&self, course_id: &str, grades: ScoreMap) -> ServiceResult<ScoreMap> {
        let (course, ()) = self.modify(course_id, |course| {
            course.grades = grades;
            Ok(())
        })?;
        tracing::debug!(course_id, entries = course.grades.len(), "grades saved");
        Ok(course.grades)
    }

    pub fn get_grades(&self, course_id: &str) -> ServiceResult<(ScoreMap, Option<DateTime<Utc>>)> {
        let course = self.load(course_id)?;
        Ok((course.grades, course.updated_at))
    }

    /// Records one score. Non-finite values are rejected.
    pub fn set_score(
        &self,
        course_id: &str,
        assessment_id: &str,
        entry: ScoreEntry,
    ) -> ServiceResult<ScoreMap> {
        let finite = |v: Option<f64>| v.is_none_or(f64::is_finite);
        if !finite(entry.earned) || !finite(entry.max) {
            return Err(ServiceError::Validation("scores must be finite numbers".to_string()));
        }

        let (course, ()) = self.modify(course_id, |course| {
            if !course.assessments.iter().any(|a| a.id == assessment_id) {
                return Err(ServiceError::NotFound(format!("assessment '{assessment_id}'")));
            }
            course.grades.insert(assessment_id.to_string(), entry);
            Ok(())
        })?;
        Ok(course.grades)
    }

    /// Marks an assessment as not yet graded.
    pub fn clear_score(&self, course_id: &str, assessment_id: &str) -> ServiceResult<ScoreMap> {
        let (course, ()) = self.modify(course_id, |course| {
            course.grades.remove(assessment_id);
            Ok(())
        })?;
        Ok(course.grades)
    }

    pub fn delete_course(&self, course_id: &str) -> ServiceResult<()> {
        if self.store.delete(course_id)? {
            Ok(())
        } else {
            Err(ServiceError::NotFound(format!("course '{course_id}'")))
        }
    }

    /// Current grade, standing and per-category contributions.
    pub fn grade_summary(&self, course_id: &str) -> ServiceResult<GradeSummary> {
        let course = self.load(course_id)?;
        let categories = distinct_categories(&course.assessments);
        Ok(compute_grade_summary(&course.assessments, &course.grades, &categories))
    }
}
