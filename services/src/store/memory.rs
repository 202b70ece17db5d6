//! In-process course store.

use super::{CourseStore, StoreError, StoreResult, check_course_id};
use grader::types::Course;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryCourseStore {
    courses: RwLock<HashMap<String, Course>>,
}

impl MemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `courses`.
    pub fn with_courses(courses: impl IntoIterator<Item = Course>) -> Self {
        Self {
            courses: RwLock::new(courses.into_iter().map(|c| (c.id.clone(), c)).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.courses.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CourseStore for MemoryCourseStore {
    fn get(&self, course_id: &str) -> StoreResult<Option<Course>> {
        check_course_id(course_id)?;
        let courses = self.courses.read().map_err(|_| StoreError::Poisoned)?;
        Ok(courses.get(course_id).cloned())
    }

    fn put(&self, course: &Course) -> StoreResult<()> {
        check_course_id(&course.id)?;
        let mut courses = self.courses.write().map_err(|_| StoreError::Poisoned)?;
        courses.insert(course.id.clone(), course.clone());
        Ok(())
    }

    fn delete(&self, course_id: &str) -> StoreResult<bool> {
        check_course_id(course_id)?;
        let mut courses = self.courses.write().map_err(|_| StoreError::Poisoned)?;
        Ok(courses.remove(course_id).is_some())
    }

    fn list(&self) -> StoreResult<Vec<Course>> {
        let courses = self.courses.read().map_err(|_| StoreError::Poisoned)?;
        let mut all: Vec<Course> = courses.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn course(id: &str, age_days: i64) -> Course {
        Course {
            id: id.to_string(),
            name: id.to_uppercase(),
            file_name: None,
            assessments: Vec::new(),
            grades: Default::default(),
            created_at: Utc::now() - Duration::days(age_days),
            updated_at: None,
        }
    }

    #[test]
    fn test_crud() {
        let store = MemoryCourseStore::new();
        assert!(store.is_empty());

        store.put(&course("a", 1)).unwrap();
        assert_eq!(store.get("a").unwrap().unwrap().name, "A");
        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn test_list_oldest_first() {
        let store = MemoryCourseStore::with_courses([course("new", 0), course("old", 9)]);
        let ids: Vec<String> = store.list().unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["old", "new"]);
        assert_eq!(store.len(), 2);
    }
}
