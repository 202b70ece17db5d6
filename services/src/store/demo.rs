//! Read-only demo data for hosted previews.
//!
//! Reads always succeed: an unknown id resolves to the first demo course. Writes are
//! accepted and dropped so the UI behaves normally without touching disk.

use super::{CourseStore, StoreResult};
use chrono::{DateTime, TimeZone, Utc};
use grader::types::{Assessment, Course};

#[derive(Debug, Clone, Copy, Default)]
pub struct DemoCourseStore;

fn assessment(id: &str, name: &str, category: &str, weight: f64) -> Assessment {
    Assessment {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        max: 100.0,
        weight,
    }
}

fn created(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// The fixed demo catalogue.
pub fn demo_courses() -> Vec<Course> {
    vec![
        Course {
            id: "demo-math-135".to_string(),
            name: "MATH 135 - Calculus I".to_string(),
            file_name: None,
            assessments: vec![
                assessment("quiz1", "Quiz 1", "Quizzes", 5.0),
                assessment("quiz2", "Quiz 2", "Quizzes", 5.0),
                assessment("quiz3", "Quiz 3", "Quizzes", 5.0),
                assessment("quiz4", "Quiz 4", "Quizzes", 5.0),
                assessment("midterm", "Midterm Exam", "Exams", 30.0),
                assessment("final", "Final Exam", "Exams", 50.0),
            ],
            grades: Default::default(),
            created_at: created(6),
            updated_at: None,
        },
        Course {
            id: "demo-cs-101".to_string(),
            name: "CS 101 - Introduction to Programming".to_string(),
            file_name: None,
            assessments: vec![
                assessment("hw1", "Homework 1", "Assignments", 10.0),
                assessment("hw2", "Homework 2", "Assignments", 10.0),
                assessment("hw3", "Homework 3", "Assignments", 10.0),
                assessment("project1", "Project 1", "Projects", 20.0),
                assessment("project2", "Project 2", "Projects", 20.0),
                assessment("final", "Final Exam", "Exams", 30.0),
            ],
            grades: Default::default(),
            created_at: created(7),
            updated_at: None,
        },
    ]
}

impl CourseStore for DemoCourseStore {
    fn get(&self, course_id: &str) -> StoreResult<Option<Course>> {
        let mut courses = demo_courses();
        let index = courses.iter().position(|c| c.id == course_id).unwrap_or(0);
        Ok(Some(courses.swap_remove(index)))
    }

    fn put(&self, course: &Course) -> StoreResult<()> {
        tracing::debug!(course_id = %course.id, "demo mode: discarding course write");
        Ok(())
    }

    fn delete(&self, course_id: &str) -> StoreResult<bool> {
        tracing::debug!(course_id, "demo mode: discarding course delete");
        Ok(true)
    }

    fn list(&self) -> StoreResult<Vec<Course>> {
        Ok(demo_courses())
    }
}
