//! Weekly plan screen

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::{
    models::ScheduleEntry,
    wizard::{
        handlers::CommonKeyHandler,
        traits::{Navigable, ScreenAction},
        ui::{truncate_to_width, Styles},
    },
};

/// Plan screen state; the entries themselves live in the view store
pub struct PlanScreen {
    pub entry_state: ListState,
    pub entry_count: usize,
}

impl Default for PlanScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanScreen {
    pub fn new() -> Self {
        Self {
            entry_state: ListState::default(),
            entry_count: 0,
        }
    }

    /// Prepare for a freshly received plan
    pub fn reset(&mut self, entry_count: usize) {
        self.entry_count = entry_count;
        self.entry_state.select(if entry_count == 0 { None } else { Some(0) });
    }

    /// Handle key events for the plan screen
    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        if let Some(action) = CommonKeyHandler::handle_navigation_keys(self, key) {
            return action;
        }

        match key.code {
            KeyCode::Char('b') | KeyCode::Esc | KeyCode::Backspace => ScreenAction::BackToEdit,
            KeyCode::Char('r') => ScreenAction::Reload,
            KeyCode::Char('q') => ScreenAction::Quit,
            _ => ScreenAction::None,
        }
    }

    /// Draw the plan screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect, schedule: &[ScheduleEntry]) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Sessions
                Constraint::Length(3), // Navigation hints
            ])
            .split(area);

        let title_text = match schedule.len() {
            1 => "📅 Your Weekly Plan - 1 session".to_string(),
            n => format!("📅 Your Weekly Plan - {} sessions", n),
        };
        let title = Paragraph::new(title_text)
            .style(Styles::title())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        let block = Block::default()
            .title("Sessions")
            .borders(Borders::ALL)
            .border_style(Styles::active_border());

        if schedule.is_empty() {
            let empty = Paragraph::new("The scheduler returned no sessions.")
                .style(Styles::inactive())
                .block(block);
            f.render_widget(empty, chunks[1]);
        } else {
            let max_width = chunks[1].width.saturating_sub(4) as usize;
            let items: Vec<ListItem> = schedule
                .iter()
                .map(|entry| {
                    ListItem::new(Line::from(vec![
                        Span::styled("▌ ", Styles::info()),
                        Span::raw(truncate_to_width(&entry.to_string(), max_width)),
                    ]))
                })
                .collect();

            let list = List::new(items)
                .block(block)
                .highlight_style(Styles::selected());
            f.render_stateful_widget(list, chunks[1], &mut self.entry_state);
        }

        let hints = Paragraph::new("← b/Esc: Back to Edit | r: Refresh | ↑/↓: Navigate | q: Quit")
            .style(Styles::inactive())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(hints, chunks[2]);
    }
}

impl Navigable for PlanScreen {
    fn navigate_up(&mut self) {
        if let Some(selected) = self.entry_state.selected() {
            self.entry_state.select(Some(selected.saturating_sub(1)));
        }
    }

    fn navigate_down(&mut self) {
        if let Some(selected) = self.entry_state.selected() {
            if selected + 1 < self.entry_count {
                self.entry_state.select(Some(selected + 1));
            }
        }
    }

    fn get_selected_index(&self) -> Option<usize> {
        self.entry_state.selected()
    }

    fn set_selected_index(&mut self, index: Option<usize>) {
        self.entry_state.select(index);
    }

    fn get_item_count(&self) -> usize {
        self.entry_count
    }
}
