//! View state container for the wizard
//!
//! All mutations go through [`ViewStore::dispatch`], which keeps the
//! submit/result lifecycle in one place instead of spreading flags across
//! screens.

use tracing::{debug, warn};

use crate::models::ScheduleEntry;
use crate::scheduler::{Alert, SubmissionError};

/// Which half of the wizard is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    CollectingInput,
    ShowingResults,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub mode: ViewMode,
    pub schedule: Vec<ScheduleEntry>,
    /// A request is outstanding; further submits are refused
    pub submitting: bool,
    /// Blocking message waiting to be dismissed
    pub alert: Option<Alert>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: ViewMode::CollectingInput,
            schedule: Vec::new(),
            submitting: false,
            alert: None,
        }
    }
}

#[derive(Debug)]
pub enum Action {
    /// A validated submission has been handed to the scheduler
    SubmitStarted,
    ScheduleReceived(Vec<ScheduleEntry>),
    SubmitFailed(SubmissionError),
    DismissAlert,
    BackToEdit,
    Reload,
}

/// Whether the store accepted an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored,
}

#[derive(Debug, Default)]
pub struct ViewStore {
    state: ViewState,
}

impl ViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn can_submit(&self) -> bool {
        self.state.mode == ViewMode::CollectingInput
            && !self.state.submitting
            && self.state.alert.is_none()
    }

    pub fn dispatch(&mut self, action: Action) -> Outcome {
        debug!("Dispatching {:?}", action);

        match action {
            Action::SubmitStarted => {
                if !self.can_submit() {
                    warn!("Submit ignored: a request is already in progress");
                    return Outcome::Ignored;
                }
                self.state.submitting = true;
                self.state.schedule.clear();
            }
            Action::ScheduleReceived(schedule) => {
                if !self.state.submitting {
                    warn!("Dropping schedule that arrived with no request outstanding");
                    return Outcome::Ignored;
                }
                self.state.submitting = false;
                self.state.schedule = schedule;
                self.state.mode = ViewMode::ShowingResults;
            }
            Action::SubmitFailed(error) => {
                if !self.state.submitting {
                    warn!("Dropping failure that arrived with no request outstanding: {}", error);
                    return Outcome::Ignored;
                }
                self.state.submitting = false;
                self.state.alert = Some(error.alert());
            }
            Action::DismissAlert => {
                if self.state.alert.take().is_none() {
                    return Outcome::Ignored;
                }
            }
            Action::BackToEdit => {
                if self.state.mode != ViewMode::ShowingResults {
                    return Outcome::Ignored;
                }
                self.state.mode = ViewMode::CollectingInput;
                self.state.schedule.clear();
            }
            Action::Reload => {
                self.state = ViewState::default();
            }
        }

        Outcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::AlertKind;

    fn algebra() -> Vec<ScheduleEntry> {
        vec![ScheduleEntry {
            title: "Algebra".to_string(),
            day: "Mon".to_string(),
            time: "18-20".to_string(),
        }]
    }

    fn rejected() -> SubmissionError {
        SubmissionError::Rejected {
            status: 500,
            body: String::new(),
        }
    }

    #[test]
    fn test_initial_state() {
        let store = ViewStore::new();
        assert_eq!(store.state(), &ViewState::default());
        assert_eq!(store.state().mode, ViewMode::CollectingInput);
        assert!(store.state().schedule.is_empty());
        assert!(store.can_submit());
    }

    #[test]
    fn test_successful_submission_shows_results() {
        let mut store = ViewStore::new();
        assert_eq!(store.dispatch(Action::SubmitStarted), Outcome::Applied);
        assert!(store.state().submitting);
        assert!(!store.can_submit());

        assert_eq!(store.dispatch(Action::ScheduleReceived(algebra())), Outcome::Applied);
        assert_eq!(store.state().mode, ViewMode::ShowingResults);
        assert_eq!(store.state().schedule, algebra());
        assert!(!store.state().submitting);
    }

    #[test]
    fn test_second_submit_is_refused_while_in_flight() {
        let mut store = ViewStore::new();
        store.dispatch(Action::SubmitStarted);
        assert_eq!(store.dispatch(Action::SubmitStarted), Outcome::Ignored);
        assert!(store.state().submitting);
    }

    #[test]
    fn test_failure_raises_alert_and_stays_on_form() {
        let mut store = ViewStore::new();
        store.dispatch(Action::SubmitStarted);
        store.dispatch(Action::SubmitFailed(rejected()));

        assert_eq!(store.state().mode, ViewMode::CollectingInput);
        assert!(!store.state().submitting);
        assert_eq!(
            store.state().alert.as_ref().map(|a| a.kind),
            Some(AlertKind::GenerationFailed)
        );
        assert!(!store.can_submit());

        assert_eq!(store.dispatch(Action::DismissAlert), Outcome::Applied);
        assert!(store.can_submit());
        assert_eq!(store.dispatch(Action::DismissAlert), Outcome::Ignored);
    }

    #[test]
    fn test_late_results_are_dropped() {
        let mut store = ViewStore::new();
        assert_eq!(store.dispatch(Action::ScheduleReceived(algebra())), Outcome::Ignored);
        assert_eq!(store.dispatch(Action::SubmitFailed(rejected())), Outcome::Ignored);
        assert_eq!(store.state(), &ViewState::default());
    }

    #[test]
    fn test_back_to_edit_and_reload() {
        let mut store = ViewStore::new();
        assert_eq!(store.dispatch(Action::BackToEdit), Outcome::Ignored);

        store.dispatch(Action::SubmitStarted);
        store.dispatch(Action::ScheduleReceived(algebra()));
        assert_eq!(store.dispatch(Action::BackToEdit), Outcome::Applied);
        assert_eq!(store.state().mode, ViewMode::CollectingInput);
        assert!(store.state().schedule.is_empty());

        store.dispatch(Action::SubmitStarted);
        store.dispatch(Action::ScheduleReceived(algebra()));
        assert_eq!(store.dispatch(Action::Reload), Outcome::Applied);
        assert_eq!(store.state(), &ViewState::default());
    }
}
