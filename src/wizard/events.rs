//! Events delivered to the wizard loop from background work

use crate::models::ScheduleEntry;
use crate::scheduler::SubmissionError;

#[derive(Debug)]
pub enum AppEvent {
    /// The outstanding schedule request finished
    ScheduleGenerated(Result<Vec<ScheduleEntry>, SubmissionError>),
}
