//! Shared plumbing for the grade calculator workspace: configuration,
//! logging bootstrap and storage paths.

pub mod config;
pub mod logging;
pub mod paths;
pub mod test_helpers;
