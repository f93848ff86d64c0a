//! Form field component for user input

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::wizard::{traits::FormHandler, ui::Styles};

/// Type of form field
#[derive(Debug, Clone, PartialEq)]
pub enum FormFieldType {
    Text,
    Number,
    Date,
    /// Several options can be ticked
    Checklist,
    /// Exactly one option, cycled with the arrow keys
    Select,
}

/// Individual form field
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub field_type: FormFieldType,
    pub is_focused: bool,
    /// Cursor position in characters, not bytes
    pub cursor_position: usize,
    pub options: Vec<String>,
    /// Tick state per option (checklist only)
    pub checked: Vec<bool>,
    /// Highlighted option for checklists, chosen option for selects
    pub option_cursor: usize,
    pub validation_error: Option<String>,
}

impl FormField {
    pub fn new(label: &str, field_type: FormFieldType) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            placeholder: String::new(),
            field_type,
            is_focused: false,
            cursor_position: 0,
            options: Vec::new(),
            checked: Vec::new(),
            option_cursor: 0,
            validation_error: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    /// Options for checklist and select fields; a select starts on the first option
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.checked = vec![false; options.len()];
        self.options = options;
        self.option_cursor = 0;
        self
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    pub fn accepts_text(&self) -> bool {
        matches!(
            self.field_type,
            FormFieldType::Text | FormFieldType::Number | FormFieldType::Date
        )
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        if !self.accepts_text() {
            return;
        }
        let index = self.byte_index(self.cursor_position);
        self.value.insert(index, c);
        self.cursor_position += 1;
        self.validation_error = None;
    }

    pub fn delete_char(&mut self) {
        if self.accepts_text() && self.cursor_position > 0 {
            self.cursor_position -= 1;
            let index = self.byte_index(self.cursor_position);
            self.value.remove(index);
            self.validation_error = None;
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.accepts_text() && self.cursor_position < self.char_count() {
            let index = self.byte_index(self.cursor_position);
            self.value.remove(index);
            self.validation_error = None;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.char_count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.char_count();
    }

    pub fn is_empty(&self) -> bool {
        match self.field_type {
            FormFieldType::Checklist => !self.checked.iter().any(|c| *c),
            FormFieldType::Select => self.option_cursor == 0,
            _ => self.value.is_empty(),
        }
    }

    /// Move the checklist highlight up
    pub fn option_up(&mut self) {
        if self.option_cursor > 0 {
            self.option_cursor -= 1;
        }
    }

    /// Move the checklist highlight down
    pub fn option_down(&mut self) {
        if self.option_cursor + 1 < self.options.len() {
            self.option_cursor += 1;
        }
    }

    /// Tick or untick the highlighted checklist option
    pub fn toggle_option(&mut self) {
        if self.field_type != FormFieldType::Checklist {
            return;
        }
        if let Some(checked) = self.checked.get_mut(self.option_cursor) {
            *checked = !*checked;
            self.validation_error = None;
        }
    }

    /// Cycle a select field forward
    pub fn select_next(&mut self) {
        if self.field_type != FormFieldType::Select || self.options.is_empty() {
            return;
        }
        self.option_cursor = (self.option_cursor + 1) % self.options.len();
        self.validation_error = None;
    }

    /// Cycle a select field backward
    pub fn select_previous(&mut self) {
        if self.field_type != FormFieldType::Select || self.options.is_empty() {
            return;
        }
        self.option_cursor = if self.option_cursor == 0 {
            self.options.len() - 1
        } else {
            self.option_cursor - 1
        };
        self.validation_error = None;
    }

    /// Indices of ticked checklist options
    pub fn checked_indices(&self) -> Vec<usize> {
        self.checked
            .iter()
            .enumerate()
            .filter(|(_, checked)| **checked)
            .map(|(i, _)| i)
            .collect()
    }

    /// Rows this field needs, borders included
    pub fn height(&self) -> u16 {
        match self.field_type {
            FormFieldType::Checklist => self.options.len() as u16 + 2,
            _ => 3,
        }
    }

    fn block(&self) -> Block<'_> {
        let border_style = if self.is_focused {
            Styles::active_border()
        } else if self.validation_error.is_some() {
            Styles::error()
        } else {
            Styles::inactive_border()
        };

        let title = if let Some(ref error) = self.validation_error {
            format!("{} - Error: {}", self.label, error)
        } else {
            self.label.clone()
        };

        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
    }

    /// Render the form field
    pub fn render(&self, f: &mut Frame, area: Rect) {
        match self.field_type {
            FormFieldType::Checklist => self.render_checklist(f, area),
            FormFieldType::Select => self.render_select(f, area),
            _ => self.render_text(f, area),
        }
    }

    fn render_text(&self, f: &mut Frame, area: Rect) {
        let display_text = if self.value.is_empty() && !self.placeholder.is_empty() {
            &self.placeholder
        } else {
            &self.value
        };

        let text_style = if self.value.is_empty() && !self.placeholder.is_empty() {
            Styles::inactive()
        } else {
            Styles::default()
        };

        let paragraph = Paragraph::new(display_text.to_string())
            .style(text_style)
            .block(self.block());

        f.render_widget(paragraph, area);

        if self.is_focused {
            let cursor_x = area.x + 1 + self.cursor_position as u16;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width.saturating_sub(1) {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }

    fn render_checklist(&self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let mark = if self.checked.get(i).copied().unwrap_or(false) {
                    "[x]"
                } else {
                    "[ ]"
                };
                let style = if self.is_focused && i == self.option_cursor {
                    Styles::selected()
                } else {
                    Style::default()
                };
                ListItem::new(format!("{} {}", mark, option)).style(style)
            })
            .collect();

        f.render_widget(List::new(items).block(self.block()), area);
    }

    fn render_select(&self, f: &mut Frame, area: Rect) {
        let current = self
            .options
            .get(self.option_cursor)
            .cloned()
            .unwrap_or_default();

        let value_style = if self.option_cursor == 0 {
            Styles::inactive()
        } else {
            Styles::default()
        };

        let line = if self.is_focused {
            Line::from(vec![
                Span::styled("◀ ", Styles::active_border()),
                Span::styled(current, value_style),
                Span::styled(" ▶", Styles::active_border()),
            ])
        } else {
            Line::from(Span::styled(current, value_style))
        };

        f.render_widget(Paragraph::new(line).block(self.block()), area);
    }
}

/// Form container that manages multiple fields
pub struct Form {
    pub fields: Vec<FormField>,
    pub current_field: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        let mut form = Self {
            fields,
            current_field: 0,
        };
        form.update_focus();
        form
    }

    fn update_focus(&mut self) {
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focus(i == self.current_field);
        }
    }

    pub fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }

    pub fn get_field_mut(&mut self, index: usize) -> Option<&mut FormField> {
        self.fields.get_mut(index)
    }

    pub fn get_current_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.current_field)
    }

    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.validation_error = None;
        }
    }
}

impl FormHandler for Form {
    fn get_current_field(&self) -> usize {
        self.current_field
    }

    fn set_current_field(&mut self, field: usize) {
        if field < self.fields.len() {
            self.current_field = field;
            self.update_focus();
        }
    }

    fn get_field_count(&self) -> usize {
        self.fields.len()
    }

    fn handle_char_input(&mut self, c: char) {
        if let Some(field) = self.get_current_field_mut() {
            field.insert_char(c);
        }
    }

    fn handle_backspace(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.delete_char();
        }
    }

    fn handle_delete(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.delete_char_forward();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_editing_handles_multibyte_input() {
        let mut field = FormField::new("Name", FormFieldType::Text);
        for c in "Zoë".chars() {
            field.insert_char(c);
        }
        assert_eq!(field.value, "Zoë");
        assert_eq!(field.cursor_position, 3);

        field.move_cursor_left();
        field.insert_char('x');
        assert_eq!(field.value, "Zoxë");

        field.delete_char_forward();
        assert_eq!(field.value, "Zox");

        field.move_cursor_to_start();
        field.delete_char();
        assert_eq!(field.value, "Zox");

        field.move_cursor_to_end();
        field.delete_char();
        assert_eq!(field.value, "Zo");
    }

    #[test]
    fn test_typing_clears_validation_error() {
        let mut field = FormField::new("Name", FormFieldType::Text);
        field.validation_error = Some("Name is required".to_string());
        field.insert_char('A');
        assert!(field.validation_error.is_none());
    }

    #[test]
    fn test_checklist_toggles() {
        let mut field = FormField::new("Availability", FormFieldType::Checklist)
            .with_options(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert!(field.is_empty());

        field.insert_char('x');
        assert!(field.value.is_empty());

        field.toggle_option();
        field.option_down();
        field.option_down();
        field.option_down();
        field.toggle_option();
        assert_eq!(field.checked_indices(), vec![0, 2]);

        field.toggle_option();
        assert_eq!(field.checked_indices(), vec![0]);
        assert_eq!(field.height(), 5);
    }

    #[test]
    fn test_select_cycles_through_options() {
        let mut field = FormField::new("Style", FormFieldType::Select)
            .with_options(vec!["Choose...".to_string(), "a".to_string(), "b".to_string()]);
        assert!(field.is_empty());

        field.select_previous();
        assert_eq!(field.option_cursor, 2);
        field.select_next();
        assert_eq!(field.option_cursor, 0);
        field.select_next();
        assert_eq!(field.option_cursor, 1);
        assert!(!field.is_empty());
    }

    #[test]
    fn test_form_focus_wraps() {
        let mut form = Form::new(vec![
            FormField::new("A", FormFieldType::Text),
            FormField::new("B", FormFieldType::Text),
        ]);
        assert!(form.fields[0].is_focused);

        form.previous_field();
        assert_eq!(form.get_current_field(), 1);
        assert!(form.fields[1].is_focused);
        assert!(!form.fields[0].is_focused);

        form.next_field();
        assert_eq!(form.get_current_field(), 0);
    }
}
