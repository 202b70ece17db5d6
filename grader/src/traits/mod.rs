//!
//! Traits Module
//!
//! Seams between the grader core and its external collaborators.
//!
//! - [`completion`]: the AI text-completion capability used by the extractor.

pub mod completion;
