use clap::{Parser, Subcommand};
use tracing::warn;

use crate::models::{LearningStyle, TimeBlock};
use crate::validation::{parse_hours, SubmissionDraft};

#[derive(Parser, Debug)]
#[command(name = "studyflow")]
#[command(about = "Collect a study request and turn it into a weekly study plan")]
#[command(version)]
pub struct Cli {
    /// Scheduling endpoint (overrides STUDYFLOW_ENDPOINT)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Without a command the interactive wizard starts
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a study request without the wizard and print the plan
    Submit {
        /// Student name
        #[arg(long, default_value = "")]
        name: String,

        /// Subject to study
        #[arg(long, default_value = "")]
        subject: String,

        /// Hours per week (1-40)
        #[arg(long, default_value = "")]
        hours: String,

        /// Deadline (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        deadline: String,

        /// Time block, repeatable ("Mon 18-20", "wed", ...)
        #[arg(long)]
        availability: Vec<String>,

        /// Learning style (visual, auditory, reading, kinesthetic)
        #[arg(long)]
        style: Option<String>,
    },
}

impl Commands {
    /// Turn command line values into a draft. Values that name no known
    /// time block or style are dropped so validation reports the field.
    pub fn to_draft(&self) -> SubmissionDraft {
        match self {
            Commands::Submit {
                name,
                subject,
                hours,
                deadline,
                availability,
                style,
            } => SubmissionDraft {
                name: name.clone(),
                subject: subject.clone(),
                hours_per_week: parse_hours(hours),
                deadline: deadline.clone(),
                availability: availability
                    .iter()
                    .filter_map(|block| Self::parse_time_block(block))
                    .collect(),
                learning_style: style.as_deref().and_then(Self::parse_learning_style),
            },
        }
    }

    pub fn parse_time_block(block: &str) -> Option<TimeBlock> {
        match block.parse() {
            Ok(block) => Some(block),
            Err(e) => {
                warn!("Ignoring availability value: {}", e);
                None
            }
        }
    }

    pub fn parse_learning_style(style: &str) -> Option<LearningStyle> {
        match style.parse() {
            Ok(style) => Some(style),
            Err(e) => {
                warn!("Ignoring learning style: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Field;

    fn submit(args: &[&str]) -> Commands {
        let cli = Cli::try_parse_from(["studyflow", "submit"].iter().chain(args)).unwrap();
        cli.command.expect("submit command")
    }

    #[test]
    fn test_no_command_starts_wizard() {
        let cli = Cli::try_parse_from(["studyflow", "--endpoint", "http://example.test/schedule"])
            .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.endpoint.as_deref(), Some("http://example.test/schedule"));
    }

    #[test]
    fn test_full_submit_builds_submission() {
        let command = submit(&[
            "--name", " Ann ",
            "--subject", "Math",
            "--hours", "5",
            "--deadline", "2024-06-01",
            "--availability", "sat",
            "--availability", "Mon 18-20",
            "--style", "Reading/Writing",
        ]);

        let submission = command.to_draft().into_submission().unwrap();
        assert_eq!(submission.name(), "Ann");
        assert_eq!(submission.hours_per_week(), 5.0);
        assert_eq!(
            submission.availability(),
            &[TimeBlock::MondayEvening, TimeBlock::SaturdayMorning]
        );
        assert_eq!(submission.learning_style(), LearningStyle::Reading);
    }

    #[test]
    fn test_unknown_values_surface_as_field_errors() {
        let command = submit(&[
            "--name", "Ann",
            "--subject", "Math",
            "--hours", "five",
            "--deadline", "2024-06-01",
            "--availability", "Sun 09-11",
            "--style", "telepathic",
        ]);

        let errors = command.to_draft().into_submission().unwrap_err();
        assert!(errors.contains(Field::HoursPerWeek));
        assert!(errors.contains(Field::Availability));
        assert!(errors.contains(Field::LearningStyle));
        assert!(!errors.contains(Field::Name));
    }
}
