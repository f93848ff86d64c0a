//! StudyFlow: collect a study request, send it to a scheduling service
//! and show the weekly plan it returns.

pub mod cli;
pub mod config;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod validation;
pub mod wizard;
