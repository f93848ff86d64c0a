//! Scheduling service module
//!
//! Sends a validated [`Submission`](crate::models::Submission) to the remote
//! scheduling endpoint and turns the answer into a list of study sessions.

pub mod client;
pub mod errors;

pub use client::{HttpScheduler, Scheduler};
pub use errors::{Alert, AlertKind, SubmissionError};
