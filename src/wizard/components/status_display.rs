//! Status display component for showing messages and progress

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::wizard::ui::Styles;

/// Types of status messages
#[derive(Debug, Clone, PartialEq)]
pub enum StatusType {
    Info,
    Success,
    Warning,
    Error,
    Loading,
}

/// Status message with type and content
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub message: String,
    pub status_type: StatusType,
    pub timestamp: chrono::DateTime<chrono::Local>,
}

impl StatusMessage {
    pub fn new(message: String, status_type: StatusType) -> Self {
        Self {
            message,
            status_type,
            timestamp: chrono::Local::now(),
        }
    }
}

/// Status display component
pub struct StatusDisplay {
    pub current_message: Option<StatusMessage>,
    pub message_history: Vec<StatusMessage>,
    pub max_history: usize,
    pub show_timestamp: bool,
}

impl Default for StatusDisplay {
    fn default() -> Self {
        Self {
            current_message: None,
            message_history: Vec::new(),
            max_history: 100,
            show_timestamp: false,
        }
    }
}

impl StatusDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timestamps(mut self) -> Self {
        self.show_timestamp = true;
        self
    }

    /// Set current status message
    pub fn set_message(&mut self, message: StatusMessage) {
        self.archive_current();
        self.current_message = Some(message);
    }

    pub fn set_info(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Info));
    }

    pub fn set_success(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Success));
    }

    pub fn set_warning(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Warning));
    }

    pub fn set_error(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Error));
    }

    pub fn set_loading(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Loading));
    }

    fn archive_current(&mut self) {
        if let Some(current) = self.current_message.take() {
            self.message_history.push(current);

            if self.message_history.len() > self.max_history {
                self.message_history.remove(0);
            }
        }
    }

    /// Drop the current message and the whole history
    pub fn reset(&mut self) {
        self.current_message = None;
        self.message_history.clear();
    }

    pub fn get_current(&self) -> Option<&StatusMessage> {
        self.current_message.as_ref()
    }

    pub fn get_history(&self) -> &[StatusMessage] {
        &self.message_history
    }

    /// Render the status display
    pub fn render(&self, f: &mut Frame, area: Rect, idle_text: &str) {
        let content = match &self.current_message {
            Some(message) => self.format_message(message),
            None => idle_text.to_string(),
        };

        let style = match self.current_message.as_ref().map(|m| &m.status_type) {
            Some(StatusType::Info) => Styles::info(),
            Some(StatusType::Success) => Styles::success(),
            Some(StatusType::Warning) | Some(StatusType::Loading) => Styles::warning(),
            Some(StatusType::Error) => Styles::error(),
            None => Styles::inactive(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::inactive_border());

        let paragraph = Paragraph::new(content)
            .style(style)
            .block(block);

        f.render_widget(paragraph, area);
    }

    fn format_message(&self, message: &StatusMessage) -> String {
        let prefix = match message.status_type {
            StatusType::Info => "ℹ",
            StatusType::Success => "✓",
            StatusType::Warning => "⚠",
            StatusType::Error => "✗",
            StatusType::Loading => "⟳",
        };

        if self.show_timestamp {
            format!(
                "{} [{}] {}",
                prefix,
                message.timestamp.format("%H:%M:%S"),
                message.message
            )
        } else {
            format!("{} {}", prefix, message.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_move_into_history() {
        let mut status = StatusDisplay::new();
        status.set_info("first".to_string());
        status.set_error("second".to_string());

        assert_eq!(status.get_current().map(|m| m.message.as_str()), Some("second"));
        assert_eq!(status.get_history().len(), 1);
        assert_eq!(status.get_history()[0].message, "first");

        status.reset();
        assert!(status.get_current().is_none());
        assert!(status.get_history().is_empty());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut status = StatusDisplay::new();
        status.max_history = 2;
        for i in 0..5 {
            status.set_loading(format!("step {}", i));
        }
        let history: Vec<&str> = status.get_history().iter().map(|m| m.message.as_str()).collect();
        assert_eq!(history, vec!["step 2", "step 3"]);
    }

    #[test]
    fn test_format_message_prefix() {
        let status = StatusDisplay::new();
        let message = StatusMessage::new("Generating schedule...".to_string(), StatusType::Loading);
        assert_eq!(status.format_message(&message), "⟳ Generating schedule...");

        let status = StatusDisplay::new().with_timestamps();
        assert!(status.format_message(&message).starts_with("⟳ ["));
    }
}
