//! Declarative field rules for the study request form
//!
//! The form collects a [`SubmissionDraft`]; the only way to obtain a
//! [`Submission`] is to run the draft through its constraint set.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::models::{LearningStyle, Submission, TimeBlock};

/// Format check only, `2024-13-01` passes
static DEADLINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("deadline pattern compiles")
});

/// Raw form values before validation
#[derive(Debug, Clone, Default, Validate)]
pub struct SubmissionDraft {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,

    #[validate(
        required(message = "Enter hours per week as a number"),
        range(min = 1.0, max = 40.0, message = "Hours per week must be between 1 and 40")
    )]
    pub hours_per_week: Option<f64>,

    #[validate(regex(path = *DEADLINE_PATTERN, message = "Invalid date (expected YYYY-MM-DD)"))]
    pub deadline: String,

    #[validate(length(min = 1, message = "Select at least one time block"))]
    pub availability: Vec<TimeBlock>,

    #[validate(required(message = "Choose a learning style"))]
    pub learning_style: Option<LearningStyle>,
}

impl SubmissionDraft {
    /// Evaluate every rule at once and build the submission if all pass
    pub fn into_submission(mut self) -> Result<Submission, FieldErrors> {
        self.normalize();
        self.validate().map_err(FieldErrors::from)?;

        let (Some(hours_per_week), Some(learning_style)) = (self.hours_per_week, self.learning_style)
        else {
            let mut errors = FieldErrors::default();
            if self.hours_per_week.is_none() {
                errors.insert(Field::HoursPerWeek, Field::HoursPerWeek.default_message());
            }
            if self.learning_style.is_none() {
                errors.insert(Field::LearningStyle, Field::LearningStyle.default_message());
            }
            return Err(errors);
        };

        let mut availability = self.availability;
        availability.sort();
        availability.dedup();

        Ok(Submission::new(
            self.name,
            self.subject,
            hours_per_week,
            self.deadline,
            availability,
            learning_style,
        ))
    }

    /// Blank text counts as missing, and so do hours that are not a finite number
    fn normalize(&mut self) {
        for text in [&mut self.name, &mut self.subject, &mut self.deadline] {
            let trimmed = text.trim().to_string();
            *text = trimmed;
        }
        self.hours_per_week = self.hours_per_week.filter(|hours| hours.is_finite());
    }
}

/// Parse the hours field; anything that is not a finite number counts as missing
pub fn parse_hours(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|hours| hours.is_finite())
}

/// Form fields that carry a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Subject,
    HoursPerWeek,
    Deadline,
    Availability,
    LearningStyle,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Subject,
        Field::HoursPerWeek,
        Field::Deadline,
        Field::Availability,
        Field::LearningStyle,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Subject => "Subject",
            Field::HoursPerWeek => "Hours per week",
            Field::Deadline => "Deadline",
            Field::Availability => "Availability",
            Field::LearningStyle => "Learning style",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(Field::Name),
            "subject" => Some(Field::Subject),
            "hours_per_week" => Some(Field::HoursPerWeek),
            "deadline" => Some(Field::Deadline),
            "availability" => Some(Field::Availability),
            "learning_style" => Some(Field::LearningStyle),
            _ => None,
        }
    }

    fn default_message(&self) -> String {
        format!("{} is invalid", self.label())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One human-readable message per failing field
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("{} field(s) need attention", .0.len())]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Failing fields in form order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: Field, message: String) {
        self.0.entry(field).or_insert(message);
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut result = FieldErrors::default();
        for (key, field_errors) in errors.field_errors() {
            let key = key.to_string();
            let Some(field) = Field::from_key(&key) else {
                continue;
            };
            let message = field_errors
                .iter()
                .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| field.default_message());
            result.insert(field, message);
        }
        result
    }
}
