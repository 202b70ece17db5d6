pub mod course;
pub mod course_service;
pub mod store;

pub use course::{CourseUpdate, OutlineUpload};
pub use course_service::{CourseService, ServiceError, ServiceResult};
pub use store::{CourseStore, StoreError};
