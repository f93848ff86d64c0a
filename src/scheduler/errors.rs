//! Scheduling service error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Scheduling service rejected the request (status {status}): {body}")]
    Rejected {
        status: u16,
        body: String,
    },

    #[error("Scheduling service returned an unreadable schedule: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Could not reach the scheduling service: {0}")]
    Transport(#[from] reqwest::Error),
}

/// What the user is told when a submission fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// The service answered but could not produce a plan
    GenerationFailed,
    /// The service could not be reached
    ConnectionFailed,
}

/// Blocking message shown after a failed submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn generation_failed() -> Self {
        Self {
            kind: AlertKind::GenerationFailed,
            message: "Failed to generate schedule".to_string(),
        }
    }

    pub fn connection_failed() -> Self {
        Self {
            kind: AlertKind::ConnectionFailed,
            message: "Connection failed. Is the backend running?".to_string(),
        }
    }
}

impl SubmissionError {
    pub fn alert(&self) -> Alert {
        match self {
            SubmissionError::Rejected { .. } | SubmissionError::InvalidResponse(_) => {
                Alert::generation_failed()
            }
            SubmissionError::Transport(_) => Alert::connection_failed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_and_invalid_share_an_alert() {
        let rejected = SubmissionError::Rejected {
            status: 500,
            body: "boom".to_string(),
        };
        let invalid = SubmissionError::InvalidResponse(
            serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        );

        assert_eq!(rejected.alert(), Alert::generation_failed());
        assert_eq!(invalid.alert(), Alert::generation_failed());
        assert_ne!(Alert::generation_failed(), Alert::connection_failed());
        assert!(rejected.to_string().contains("status 500"));
    }
}
