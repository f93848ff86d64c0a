//! Study request form screen

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use crate::{
    models::{LearningStyle, TimeBlock},
    validation::{parse_hours, Field, FieldErrors, SubmissionDraft},
    wizard::{
        components::{Form, FormField, FormFieldType},
        handlers::CommonKeyHandler,
        traits::{FormHandler, ScreenAction},
        ui::Styles,
    },
};

const CHOOSE_PROMPT: &str = "Choose...";

/// Form screen state
pub struct FormScreen {
    pub form: Form,
}

impl Default for FormScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl FormScreen {
    pub fn new() -> Self {
        let today = Local::now().format("%Y-%m-%d").to_string();

        let availability_options = TimeBlock::ALL
            .iter()
            .map(|block| block.display_label().to_string())
            .collect();

        let style_options = std::iter::once(CHOOSE_PROMPT.to_string())
            .chain(
                LearningStyle::ALL
                    .iter()
                    .map(|style| style.display_label().to_string()),
            )
            .collect();

        // Order matches `Field::ALL`
        let fields = vec![
            FormField::new("Name", FormFieldType::Text).with_placeholder("Your name"),
            FormField::new("Subject", FormFieldType::Text)
                .with_placeholder("Subject (e.g. Python)"),
            FormField::new("Hours per week", FormFieldType::Number).with_placeholder("1-40"),
            FormField::new("Deadline (YYYY-MM-DD)", FormFieldType::Date).with_placeholder(&today),
            FormField::new("Availability (Space to toggle)", FormFieldType::Checklist)
                .with_options(availability_options),
            FormField::new("Learning style (←/→ to choose)", FormFieldType::Select)
                .with_options(style_options),
        ];

        Self {
            form: Form::new(fields),
        }
    }

    fn field_index(field: Field) -> usize {
        match field {
            Field::Name => 0,
            Field::Subject => 1,
            Field::HoursPerWeek => 2,
            Field::Deadline => 3,
            Field::Availability => 4,
            Field::LearningStyle => 5,
        }
    }

    fn field(&self, field: Field) -> Option<&FormField> {
        self.form.get_field(Self::field_index(field))
    }

    pub fn field_mut(&mut self, field: Field) -> Option<&mut FormField> {
        self.form.get_field_mut(Self::field_index(field))
    }

    fn text_of(&self, field: Field) -> String {
        self.field(field)
            .map(|f| f.value.clone())
            .unwrap_or_default()
    }

    /// Collect the current form values
    pub fn draft(&self) -> SubmissionDraft {
        let availability = self
            .field(Field::Availability)
            .map(|f| {
                f.checked_indices()
                    .into_iter()
                    .filter_map(|i| TimeBlock::ALL.get(i).copied())
                    .collect()
            })
            .unwrap_or_default();

        // Option 0 is the "Choose..." prompt
        let learning_style = self
            .field(Field::LearningStyle)
            .and_then(|f| f.option_cursor.checked_sub(1))
            .and_then(|i| LearningStyle::ALL.get(i).copied());

        SubmissionDraft {
            name: self.text_of(Field::Name),
            subject: self.text_of(Field::Subject),
            hours_per_week: parse_hours(&self.text_of(Field::HoursPerWeek)),
            deadline: self.text_of(Field::Deadline),
            availability,
            learning_style,
        }
    }

    /// Show one message per failing field and focus the first of them
    pub fn apply_errors(&mut self, errors: &FieldErrors) {
        self.form.clear_errors();
        for (field, message) in errors.iter() {
            if let Some(form_field) = self.field_mut(field) {
                form_field.validation_error = Some(message.to_string());
            }
        }
        if let Some((first, _)) = errors.iter().next() {
            self.form.set_current_field(Self::field_index(first));
        }
    }

    pub fn clear_errors(&mut self) {
        self.form.clear_errors();
    }

    fn edit_current(&mut self, edit: impl FnOnce(&mut FormField)) {
        if let Some(field) = self.form.get_current_field_mut() {
            edit(field);
        }
    }

    /// Handle key events for the form
    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        let Some(field) = self.form.get_field(self.form.current_field) else {
            return ScreenAction::None;
        };
        let field_type = field.field_type.clone();
        let at_first_option = field.option_cursor == 0;
        let at_last_option = field.option_cursor + 1 >= field.options.len();

        match (field_type, key.code) {
            (FormFieldType::Checklist, KeyCode::Char(' ')) => {
                self.edit_current(FormField::toggle_option)
            }
            (FormFieldType::Checklist, KeyCode::Up) if !at_first_option => {
                self.edit_current(FormField::option_up)
            }
            (FormFieldType::Checklist, KeyCode::Down) if !at_last_option => {
                self.edit_current(FormField::option_down)
            }
            (FormFieldType::Select, KeyCode::Left) => self.edit_current(FormField::select_previous),
            (FormFieldType::Select, KeyCode::Right) => self.edit_current(FormField::select_next),
            (_, KeyCode::Left) => self.edit_current(FormField::move_cursor_left),
            (_, KeyCode::Right) => self.edit_current(FormField::move_cursor_right),
            (_, KeyCode::Home) => self.edit_current(FormField::move_cursor_to_start),
            (_, KeyCode::End) => self.edit_current(FormField::move_cursor_to_end),
            (_, KeyCode::Up) => self.form.previous_field(),
            (_, KeyCode::Down) => self.form.next_field(),
            _ => {
                return CommonKeyHandler::handle_form_keys(&mut self.form, key)
                    .unwrap_or(ScreenAction::None)
            }
        }

        ScreenAction::None
    }

    /// Draw the form; the submit control is greyed out while a request is in flight
    pub fn draw(&self, f: &mut Frame, area: Rect, submitting: bool) {
        let mut constraints: Vec<Constraint> = self
            .form
            .fields
            .iter()
            .map(|field| Constraint::Length(field.height()))
            .collect();
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (i, field) in self.form.fields.iter().enumerate() {
            field.render(f, chunks[i]);
        }

        let (label, style) = if submitting {
            ("[ Generating schedule... ]", Styles::inactive())
        } else {
            ("[ Generate Schedule ]  Enter", Styles::button())
        };
        let button = Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Center);
        f.render_widget(button, chunks[self.form.fields.len()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(screen: &mut FormScreen, code: KeyCode) -> ScreenAction {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(screen: &mut FormScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_empty_form_builds_empty_draft() {
        let draft = FormScreen::new().draft();
        assert!(draft.name.is_empty());
        assert!(draft.hours_per_week.is_none());
        assert!(draft.availability.is_empty());
        assert!(draft.learning_style.is_none());
    }

    #[test]
    fn test_keyboard_fills_every_field() {
        let mut screen = FormScreen::new();

        type_text(&mut screen, "Ann");
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "Math");
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "5");
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "2024-06-01");
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Char(' '));
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Char(' '));
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Right);

        let submission = screen.draft().into_submission().unwrap();
        assert_eq!(submission.name(), "Ann");
        assert_eq!(submission.subject(), "Math");
        assert_eq!(submission.hours_per_week(), 5.0);
        assert_eq!(submission.deadline(), "2024-06-01");
        assert_eq!(
            submission.availability(),
            &[TimeBlock::MondayEvening, TimeBlock::SaturdayMorning]
        );
        assert_eq!(submission.learning_style(), LearningStyle::Visual);

        assert_eq!(press(&mut screen, KeyCode::Enter), ScreenAction::Submit);
    }

    #[test]
    fn test_whitespace_only_name_is_missing() {
        let mut screen = FormScreen::new();
        type_text(&mut screen, "   ");
        let errors = screen.draft().into_submission().unwrap_err();
        assert_eq!(errors.get(Field::Name), Some("Name is required"));
    }

    #[test]
    fn test_apply_errors_marks_fields_and_focuses_first() {
        let mut screen = FormScreen::new();
        screen.form.set_current_field(5);
        let errors = screen.draft().into_submission().unwrap_err();
        screen.apply_errors(&errors);

        assert_eq!(screen.form.current_field, 0);
        for field in Field::ALL {
            let form_field = screen.field(field).unwrap();
            assert_eq!(
                form_field.validation_error.as_deref(),
                errors.get(field),
                "{} should show its message",
                field
            );
        }

        screen.clear_errors();
        assert!(screen.form.fields.iter().all(|f| f.validation_error.is_none()));
    }

    #[test]
    fn test_checklist_edges_move_between_fields() {
        let mut screen = FormScreen::new();
        screen.form.set_current_field(4);

        press(&mut screen, KeyCode::Up);
        assert_eq!(screen.form.current_field, 3);

        screen.form.set_current_field(4);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.form.current_field, 4);
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.form.current_field, 5);
    }

    #[test]
    fn test_select_wraps_back_to_prompt() {
        let mut screen = FormScreen::new();
        screen.form.set_current_field(5);
        press(&mut screen, KeyCode::Left);
        assert_eq!(screen.draft().learning_style, Some(LearningStyle::Kinesthetic));
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.draft().learning_style, None);
    }
}
