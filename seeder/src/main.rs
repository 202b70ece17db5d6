use crate::seed::{Seeder, run_seeder};
use crate::seeds::{demo_courses::DemoCoursesSeeder, outlines::OutlinesSeeder};
use grader::completion::gemini::GeminiClient;
use services::CourseService;
use services::store::FileCourseStore;
use std::sync::Arc;
use std::time::Duration;
use util::config;
use util::logging::init_logging;

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    let _log_guard = init_logging(&config::log_file(), &config::log_level());

    let store = FileCourseStore::from_config();
    tracing::info!(dir = %store.dir().display(), "seeding course store");

    let mut service = CourseService::new(Arc::new(store));
    if let Some(client) = GeminiClient::from_config() {
        service = service.with_completion(
            Arc::new(client),
            Duration::from_secs(config::completion_timeout_secs()),
        );
    }

    for (seeder, name) in [
        (Box::new(DemoCoursesSeeder) as Box<dyn Seeder + Send + Sync>, "DemoCourses"),
        (Box::new(OutlinesSeeder), "Outlines"),
    ] {
        run_seeder(&*seeder, name, &service).await;
    }
}
