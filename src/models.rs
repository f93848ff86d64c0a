use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated study request, ready to be sent to the scheduling service.
///
/// Only [`crate::validation::SubmissionDraft::into_submission`] can build one,
/// so holding a `Submission` means every field rule has passed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    name: String,
    subject: String,
    hours_per_week: f64,
    deadline: String,
    availability: Vec<TimeBlock>,
    learning_style: LearningStyle,
}

impl Submission {
    pub(crate) fn new(
        name: String,
        subject: String,
        hours_per_week: f64,
        deadline: String,
        availability: Vec<TimeBlock>,
        learning_style: LearningStyle,
    ) -> Self {
        Self {
            name,
            subject,
            hours_per_week,
            deadline,
            availability,
            learning_style,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn hours_per_week(&self) -> f64 {
        self.hours_per_week
    }

    pub fn deadline(&self) -> &str {
        &self.deadline
    }

    pub fn availability(&self) -> &[TimeBlock] {
        &self.availability
    }

    pub fn learning_style(&self) -> LearningStyle {
        self.learning_style
    }
}

/// Weekly time blocks a learner can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeBlock {
    #[serde(rename = "Mon 18-20")]
    MondayEvening,
    #[serde(rename = "Wed 18-20")]
    WednesdayEvening,
    #[serde(rename = "Sat 10-12")]
    SaturdayMorning,
}

impl TimeBlock {
    pub const ALL: [TimeBlock; 3] = [
        TimeBlock::MondayEvening,
        TimeBlock::WednesdayEvening,
        TimeBlock::SaturdayMorning,
    ];

    /// Wire value sent to the scheduling service
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeBlock::MondayEvening => "Mon 18-20",
            TimeBlock::WednesdayEvening => "Wed 18-20",
            TimeBlock::SaturdayMorning => "Sat 10-12",
        }
    }

    /// Human-friendly label shown in the form
    pub fn display_label(&self) -> &'static str {
        match self {
            TimeBlock::MondayEvening => "Mon 6–8 PM",
            TimeBlock::WednesdayEvening => "Wed 6–8 PM",
            TimeBlock::SaturdayMorning => "Sat 10–12 PM",
        }
    }

    fn day_key(&self) -> &'static str {
        match self {
            TimeBlock::MondayEvening => "mon",
            TimeBlock::WednesdayEvening => "wed",
            TimeBlock::SaturdayMorning => "sat",
        }
    }
}

impl fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeBlock {
    type Err = anyhow::Error;

    /// Accepts the wire label (`Mon 18-20`) or the day key (`mon`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TimeBlock::ALL
            .into_iter()
            .find(|block| block.as_str().to_lowercase() == wanted || block.day_key() == wanted)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown time block: {}. Supported blocks: Mon 18-20, Wed 18-20, Sat 10-12",
                    s
                )
            })
    }
}

/// How the learner prefers to study
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    Visual,
    Auditory,
    Reading,
    Kinesthetic,
}

impl LearningStyle {
    pub const ALL: [LearningStyle; 4] = [
        LearningStyle::Visual,
        LearningStyle::Auditory,
        LearningStyle::Reading,
        LearningStyle::Kinesthetic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LearningStyle::Visual => "visual",
            LearningStyle::Auditory => "auditory",
            LearningStyle::Reading => "reading",
            LearningStyle::Kinesthetic => "kinesthetic",
        }
    }

    pub fn display_label(&self) -> &'static str {
        match self {
            LearningStyle::Visual => "Visual",
            LearningStyle::Auditory => "Auditory",
            LearningStyle::Reading => "Reading/Writing",
            LearningStyle::Kinesthetic => "Kinesthetic",
        }
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LearningStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "visual" => Ok(LearningStyle::Visual),
            "auditory" => Ok(LearningStyle::Auditory),
            "reading" | "reading/writing" => Ok(LearningStyle::Reading),
            "kinesthetic" => Ok(LearningStyle::Kinesthetic),
            other => Err(anyhow::anyhow!(
                "Unsupported learning style: {}. Supported styles: visual, auditory, reading, kinesthetic",
                other
            )),
        }
    }
}

/// One planned study session returned by the scheduling service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub title: String,
    pub day: String,
    pub time: String,
}

impl fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {} {}", self.title, self.day, self.time)
    }
}

/// Body returned by `POST /schedule`
#[derive(Debug, Deserialize)]
pub struct ScheduleResponse {
    pub schedule: Vec<ScheduleEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_entry_display() {
        let entry = ScheduleEntry {
            title: "Algebra".to_string(),
            day: "Mon".to_string(),
            time: "18-20".to_string(),
        };
        assert_eq!(entry.to_string(), "Algebra – Mon 18-20");
    }

    #[test]
    fn test_submission_serializes_with_wire_names() {
        let submission = Submission::new(
            "Ann".to_string(),
            "Math".to_string(),
            5.0,
            "2024-06-01".to_string(),
            vec![TimeBlock::MondayEvening, TimeBlock::SaturdayMorning],
            LearningStyle::Visual,
        );

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["name"], "Ann");
        assert_eq!(json["subject"], "Math");
        assert_eq!(json["hoursPerWeek"], 5.0);
        assert_eq!(json["deadline"], "2024-06-01");
        assert_eq!(json["availability"], serde_json::json!(["Mon 18-20", "Sat 10-12"]));
        assert_eq!(json["learningStyle"], "visual");
    }

    #[test]
    fn test_time_block_parsing() {
        assert_eq!("Mon 18-20".parse::<TimeBlock>().unwrap(), TimeBlock::MondayEvening);
        assert_eq!("wed".parse::<TimeBlock>().unwrap(), TimeBlock::WednesdayEvening);
        assert_eq!(" SAT 10-12 ".parse::<TimeBlock>().unwrap(), TimeBlock::SaturdayMorning);
        assert!("Tue 18-20".parse::<TimeBlock>().is_err());
    }

    #[test]
    fn test_learning_style_parsing() {
        assert_eq!("Visual".parse::<LearningStyle>().unwrap(), LearningStyle::Visual);
        assert_eq!("reading/writing".parse::<LearningStyle>().unwrap(), LearningStyle::Reading);
        assert!("".parse::<LearningStyle>().is_err());
        assert!("musical".parse::<LearningStyle>().is_err());
    }

    #[test]
    fn test_schedule_response_ignores_extra_keys() {
        let body = r#"{"schedule":[{"title":"Study Math","day":"Monday","time":"18-20","done":false}],"meta":1}"#;
        let response: ScheduleResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.schedule.len(), 1);
        assert_eq!(response.schedule[0].day, "Monday");
    }

    #[test]
    fn test_schedule_response_rejects_malformed_entries() {
        let body = r#"{"schedule":[{"title":"Study Math","day":"Monday"}]}"#;
        assert!(serde_json::from_str::<ScheduleResponse>(body).is_err());

        let body = r#"{"schedule":[{"title":1,"day":"Monday","time":"18-20"}]}"#;
        assert!(serde_json::from_str::<ScheduleResponse>(body).is_err());

        assert!(serde_json::from_str::<ScheduleResponse>(r#"{"plan":[]}"#).is_err());
    }
}
