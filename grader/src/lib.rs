//! # Grader Library
//!
//! Core logic of the grade calculator: turning course outlines into weighted
//! assessments and turning entered scores into running grade figures.
//!
//! ## Key Concepts
//! - **Extractor** ([`extractor`]): outline text to `Vec<Assessment>`, via an AI
//!   completion collaborator with a deterministic regex fallback.
//! - **Aggregator** ([`scorer`]): assessments plus a sparse score map to a
//!   [`scorer::GradeSummary`] (overall grade, standing, per-category contributions).
//! - **Completion clients** ([`completion`]): the Gemini client and the timeout wrapper
//!   that turns each call into a tagged outcome.
//!
//! The two halves share only the [`types::Assessment`] shape.

pub mod completion;
pub mod error;
pub mod extractor;
pub mod scorer;
pub mod traits;
pub mod types;
pub mod utilities;
