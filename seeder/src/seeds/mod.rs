pub mod demo_courses;
pub mod outlines;
