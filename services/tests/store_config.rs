use serial_test::serial;
use services::store::{CourseStore, store_from_config};
use services::{CourseService, OutlineUpload};
use util::config::AppConfig;
use util::test_helpers::setup_test_storage_root;

#[test]
#[serial]
fn test_demo_mode_serves_demo_courses() {
    AppConfig::set_demo_mode(true);

    let store = store_from_config();
    let names: Vec<String> = store.list().unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(
        names,
        vec!["MATH 135 - Calculus I", "CS 101 - Introduction to Programming"]
    );

    AppConfig::reset();
}

#[tokio::test]
#[serial]
async fn test_file_mode_writes_under_storage_root() {
    let tmp = setup_test_storage_root();
    AppConfig::set_demo_mode(false);
    AppConfig::set_gemini_api_key("");

    let service = CourseService::from_config();
    let course = service
        .create_course("Geo 7", OutlineUpload::from_text("g.txt", "Lab 1 and Lab 2"))
        .await
        .unwrap();

    assert!(
        tmp.path()
            .join("courses")
            .join(format!("{}.json", course.id))
            .exists()
    );
    assert_eq!(service.list_courses().unwrap().len(), 1);

    AppConfig::reset();
}
