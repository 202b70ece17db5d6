use crate::seed::Seeder;
use services::{CourseService, OutlineUpload, ServiceError};
use std::pin::Pin;

/// `(course name, file name, outline text)`
const SAMPLE_OUTLINES: &[(&str, &str, &str)] = &[
    (
        "PHYS 121 - Mechanics",
        "phys121-outline.txt",
        "Evaluation\n\
         Weekly quizzes (Quiz 1 to Quiz 8) 20%\n\
         Lab 1 - Lab 5 reports 15%\n\
         Midterm exam 25%\n\
         Final exam 40%\n",
    ),
    (
        "COS 214 - Software Modelling",
        "cos214-study-guide.html",
        "<h2>Assessment</h2>\
         <ul><li>Assignment 1: 10%</li><li>Assignment 2: 10%</li><li>Assignment 3: 10%</li>\
         <li>Project 1 (group): 20%</li><li>Project 2 (group): 20%</li>\
         <li>Final Exam: 30%</li></ul>",
    ),
    (
        "HIST 200 - Modern Europe",
        "hist200.pdf",
        "Reading responses are due every Friday. Participation counts toward the final grade.",
    ),
];

pub struct OutlinesSeeder;

impl Seeder for OutlinesSeeder {
    fn seed<'a>(
        &'a self,
        service: &'a CourseService,
    ) -> Pin<Box<dyn Future<Output = Result<(), ServiceError>> + Send + 'a>> {
        Box::pin(async move {
            for (name, file_name, text) in SAMPLE_OUTLINES {
                let upload = OutlineUpload {
                    file_name: file_name.to_string(),
                    content_type: None,
                    raw_text: text.to_string(),
                    bytes: Some(text.as_bytes().to_vec()),
                };
                let course = service.create_course(name, upload).await?;
                tracing::info!(course_id = %course.id, assessments = course.assessments.len(), "seeded outline");
            }
            Ok(())
        })
    }
}
