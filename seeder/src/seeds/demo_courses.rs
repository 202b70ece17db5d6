use crate::seed::Seeder;
use grader::types::{ScoreEntry, ScoreMap};
use services::store::demo::demo_courses;
use services::ServiceError;
use services::CourseService;
use std::pin::Pin;

pub struct DemoCoursesSeeder;

impl Seeder for DemoCoursesSeeder {
    fn seed<'a>(
        &'a self,
        service: &'a CourseService,
    ) -> Pin<Box<dyn Future<Output = Result<(), ServiceError>> + Send + 'a>> {
        Box::pin(async move {
            let mut rng = fastrand::Rng::new();

            for course in demo_courses() {
                service.store().put(&course)?;

                // Grade roughly the first half so the summary has something to show.
                let graded = course.assessments.len() / 2;
                let mut grades = ScoreMap::new();
                for assessment in course.assessments.iter().take(graded) {
                    let earned = f64::from(rng.u32(55..=100)) * assessment.max / 100.0;
                    grades.insert(assessment.id.clone(), ScoreEntry::earned(earned));
                }
                service.save_grades(&course.id, grades)?;
            }

            Ok(())
        })
    }
}
