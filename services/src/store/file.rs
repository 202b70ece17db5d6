//! File-backed course store.
//!
//! Layout under the store directory:
//!
//! ```text
//! {dir}/{course_id}.json             course record (pretty JSON)
//! {dir}/sources/{course_id}.{ext}    uploaded outline, if any
//! ```
//!
//! Outlines live in their own folder so an upload can never land on a record path.
//!
//! Records are written to a `.tmp` sibling and renamed into place.

use super::{CourseStore, StoreError, StoreResult, check_course_id};
use grader::types::Course;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use util::paths;

#[derive(Debug, Clone)]
pub struct FileCourseStore {
    dir: PathBuf,
}

impl FileCourseStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `{STORAGE_ROOT}/courses`.
    pub fn from_config() -> Self {
        Self::new(paths::courses_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, course_id: &str) -> PathBuf {
        paths::course_path_in(&self.dir, course_id)
    }

    /// Where an uploaded outline named `file_name` is kept.
    pub fn source_path(&self, file_name: &str) -> PathBuf {
        paths::sources_dir_in(&self.dir).join(file_name)
    }

    /// Parses a record; records written without an `id` take it from the file stem.
    fn read_record(path: &Path, course_id: &str) -> StoreResult<Course> {
        let raw = fs::read_to_string(path)?;
        let mut course: Course = serde_json::from_str(&raw)?;
        if course.id.is_empty() {
            course.id = course_id.to_string();
        }
        Ok(course)
    }
}

/// Rejects anything that is not a bare file name inside the store directory.
fn check_file_name(file_name: &str) -> StoreResult<()> {
    let bare = !file_name.is_empty()
        && !file_name.starts_with('.')
        && !file_name.contains(['/', '\\'])
        && file_name != "..";
    if bare {
        Ok(())
    } else {
        Err(StoreError::InvalidCourseId(file_name.to_string()))
    }
}

impl CourseStore for FileCourseStore {
    fn get(&self, course_id: &str) -> StoreResult<Option<Course>> {
        check_course_id(course_id)?;
        match Self::read_record(&self.record_path(course_id), course_id) {
            Ok(course) => Ok(Some(course)),
            Err(StoreError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn put(&self, course: &Course) -> StoreResult<()> {
        check_course_id(&course.id)?;
        paths::ensure_dir(&self.dir)?;

        let path = self.record_path(&course.id);
        let pretty = serde_json::to_string_pretty(course)?;

        let tmp = paths::temp_path(&path);
        {
            let mut f = fs::File::create(&tmp)?;
            f.write_all(pretty.as_bytes())?;
            f.flush()?;
        }
        fs::rename(&tmp, &path)?;
        tracing::debug!(course_id = %course.id, path = %path.display(), "course saved");
        Ok(())
    }

    fn delete(&self, course_id: &str) -> StoreResult<bool> {
        let Some(course) = self.get(course_id)? else {
            return Ok(false);
        };

        fs::remove_file(self.record_path(course_id))?;

        if let Some(file_name) = course.file_name.as_deref() {
            if check_file_name(file_name).is_ok() {
                match fs::remove_file(self.source_path(file_name)) {
                    Ok(()) => {}
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => tracing::warn!(
                        course_id,
                        file_name,
                        error = %e,
                        "failed to remove uploaded outline"
                    ),
                }
            }
        }

        tracing::info!(course_id, "course deleted");
        Ok(true)
    }

    fn list(&self) -> StoreResult<Vec<Course>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut courses = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(course_id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match Self::read_record(&path, course_id) {
                Ok(course) => courses.push(course),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable course record"),
            }
        }

        courses.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(courses)
    }

    fn put_source_file(&self, file_name: &str, bytes: &[u8]) -> StoreResult<()> {
        check_file_name(file_name)?;
        paths::ensure_dir(paths::sources_dir_in(&self.dir))?;
        fs::write(self.source_path(file_name), bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use grader::types::{Assessment, ScoreEntry};
    use tempfile::TempDir;

    fn course(id: &str, day: u32) -> Course {
        Course {
            id: id.to_string(),
            name: format!("Course {id}"),
            file_name: None,
            assessments: vec![Assessment {
                id: "assessment-1".to_string(),
                name: "Final Exam".to_string(),
                category: "Exams".to_string(),
                max: 100.0,
                weight: 100.0,
            }],
            grades: Default::default(),
            created_at: Utc.with_ymd_and_hms(2025, 1, day, 9, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn test_put_then_get() {
        let tmp = TempDir::new().unwrap();
        let store = FileCourseStore::new(tmp.path().join("courses"));

        let mut c = course("cs-101-1", 1);
        c.grades.insert("assessment-1".into(), ScoreEntry::earned(91.0));
        store.put(&c).unwrap();

        assert_eq!(store.get("cs-101-1").unwrap(), Some(c));
        assert!(!tmp.path().join("courses/cs-101-1.json.tmp").exists());
    }

    #[test]
    fn test_missing_course_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = FileCourseStore::new(tmp.path());
        assert_eq!(store.get("nope").unwrap(), None);
        assert!(!store.delete("nope").unwrap());
    }

    #[test]
    fn test_list_is_sorted_and_skips_other_files() {
        let tmp = TempDir::new().unwrap();
        let store = FileCourseStore::new(tmp.path());
        store.put(&course("later", 5)).unwrap();
        store.put(&course("earlier", 2)).unwrap();
        store.put_source_file("earlier.pdf", b"%PDF-1.4").unwrap();
        fs::write(tmp.path().join("broken.json"), "{not json").unwrap();

        let ids: Vec<String> = store.list().unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["earlier", "later"]);
    }

    #[test]
    fn test_list_of_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = FileCourseStore::new(tmp.path().join("absent"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_delete_removes_source_file() {
        let tmp = TempDir::new().unwrap();
        let store = FileCourseStore::new(tmp.path());
        let mut c = course("bio-2", 3);
        c.file_name = Some("bio-2.pdf".to_string());
        store.put_source_file("bio-2.pdf", b"%PDF").unwrap();
        store.put(&c).unwrap();

        assert!(tmp.path().join("sources/bio-2.pdf").exists());

        assert!(store.delete("bio-2").unwrap());
        assert!(!tmp.path().join("bio-2.json").exists());
        assert!(!tmp.path().join("sources/bio-2.pdf").exists());
    }

    #[test]
    fn test_json_outline_does_not_clobber_record() {
        let tmp = TempDir::new().unwrap();
        let store = FileCourseStore::new(tmp.path());
        let mut c = course("econ-3", 4);
        c.file_name = Some("econ-3.json".to_string());
        store.put_source_file("econ-3.json", br#"{"my":"outline"}"#).unwrap();
        store.put(&c).unwrap();

        assert_eq!(
            fs::read(store.source_path("econ-3.json")).unwrap(),
            br#"{"my":"outline"}"#
        );
        assert_eq!(store.get("econ-3").unwrap(), Some(c));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_record_without_id_takes_file_stem() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("chem-1.json"),
            r#"{"name":"CHEM","assessments":[],"createdAt":"2025-02-01T00:00:00Z"}"#,
        )
        .unwrap();

        let store = FileCourseStore::new(tmp.path());
        let loaded = store.get("chem-1").unwrap().unwrap();
        assert_eq!(loaded.id, "chem-1");
    }

    #[test]
    fn test_path_traversal_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let store = FileCourseStore::new(tmp.path());
        assert!(matches!(
            store.get("../secrets"),
            Err(StoreError::InvalidCourseId(_))
        ));
        assert!(store.put_source_file("../x.pdf", b"").is_err());
    }
}
