//! Main wizard application state and logic

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{error, info, warn};

use super::components::StatusDisplay;
use super::events::AppEvent;
use super::handlers::CommonKeyHandler;
use super::screens::{FormScreen, PlanScreen};
use super::traits::ScreenAction;
use super::ui::{centered_rect, Styles};
use crate::config::Config;
use crate::scheduler::{HttpScheduler, Scheduler};
use crate::store::{Action, Outcome, ViewMode, ViewStore};

/// How long the loop waits for a key before checking background events
const TICK: Duration = Duration::from_millis(100);

/// Main wizard application state
pub struct App {
    /// Application configuration
    pub config: Config,
    /// Mode, schedule, in-flight flag and alert
    pub store: ViewStore,

    pub form: FormScreen,
    pub plan: PlanScreen,
    pub status: StatusDisplay,

    pub should_quit: bool,
    pub show_help_popup: bool,

    scheduler: Arc<dyn Scheduler>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
}

impl App {
    /// Create a wizard talking to the configured HTTP endpoint
    pub fn new(config: Config) -> Result<Self> {
        let scheduler = HttpScheduler::new(&config)?;
        Ok(Self::with_scheduler(config, Arc::new(scheduler)))
    }

    pub fn with_scheduler(config: Config, scheduler: Arc<dyn Scheduler>) -> Self {
        let (events_tx, events_rx) = unbounded_channel();

        Self {
            config,
            store: ViewStore::new(),
            form: FormScreen::new(),
            plan: PlanScreen::new(),
            status: StatusDisplay::new().with_timestamps(),
            should_quit: false,
            show_help_popup: false,
            scheduler,
            events_tx,
            events_rx,
        }
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.status
            .set_info(format!("Ready - sending plans to {}", self.config.endpoint));

        loop {
            terminal.draw(|f| self.draw(f))?;

            while let Ok(event) = self.events_rx.try_recv() {
                self.handle_app_event(event);
            }

            if crossterm::event::poll(TICK)? {
                if let Event::Key(key) = crossterm::event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Wait for the next background event
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.events_rx.recv().await
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if let Some(action) = CommonKeyHandler::handle_global_keys(key) {
            self.apply(action);
            return;
        }

        // The alert blocks everything until dismissed
        if self.store.state().alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.store.dispatch(Action::DismissAlert);
            }
            return;
        }

        if self.show_help_popup {
            if key.code == KeyCode::Esc {
                self.show_help_popup = false;
            }
            return;
        }

        let action = match self.store.state().mode {
            ViewMode::CollectingInput => self.form.handle_key(key),
            ViewMode::ShowingResults => self.plan.handle_key(key),
        };
        self.apply(action);
    }

    /// Handle events posted by background tasks
    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ScheduleGenerated(Ok(schedule)) => {
                let count = schedule.len();
                if self.store.dispatch(Action::ScheduleReceived(schedule)) == Outcome::Applied {
                    info!("Showing plan with {} sessions", count);
                    self.plan.reset(count);
                    self.status
                        .set_success(format!("Received a plan with {} sessions", count));
                }
            }
            AppEvent::ScheduleGenerated(Err(e)) => {
                warn!("Schedule generation failed: {}", e);
                let alert = e.alert();
                if self.store.dispatch(Action::SubmitFailed(e)) == Outcome::Applied {
                    self.status.set_error(alert.message);
                }
            }
        }
    }

    fn apply(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::Submit => self.submit(),
            ScreenAction::BackToEdit => {
                if self.store.dispatch(Action::BackToEdit) == Outcome::Applied {
                    self.form = FormScreen::new();
                    self.plan = PlanScreen::new();
                    self.status.set_info("Start a new plan".to_string());
                }
            }
            ScreenAction::Reload => self.reload(),
            ScreenAction::ToggleHelp => self.show_help_popup = !self.show_help_popup,
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::SetStatus(message) => self.status.set_info(message),
            ScreenAction::None => {}
        }
    }

    /// Validate the form and hand the submission to a background task
    fn submit(&mut self) {
        if self.store.state().submitting {
            self.status
                .set_warning("A schedule request is already in progress".to_string());
            return;
        }

        let submission = match self.form.draft().into_submission() {
            Ok(submission) => submission,
            Err(errors) => {
                info!("Form blocked: {}", errors);
                self.form.apply_errors(&errors);
                self.status
                    .set_error(format!("Please fix {} field(s) before submitting", errors.len()));
                return;
            }
        };

        self.form.clear_errors();
        if self.store.dispatch(Action::SubmitStarted) == Outcome::Ignored {
            return;
        }
        self.status.set_loading("Generating schedule...".to_string());

        let scheduler = Arc::clone(&self.scheduler);
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = scheduler.generate(&submission).await;
            if events_tx.send(AppEvent::ScheduleGenerated(result)).is_err() {
                error!("Wizard closed before the schedule arrived");
            }
        });
    }

    /// Start over as if the application had just been launched
    pub fn reload(&mut self) {
        info!("Reloading wizard");
        self.store.dispatch(Action::Reload);
        self.form = FormScreen::new();
        self.plan = PlanScreen::new();
        self.status.reset();
        self.show_help_popup = false;
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        let header = Paragraph::new("🎯 StudyFlow AI")
            .style(Styles::title())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(header, chunks[0]);

        let state = self.store.state();
        match state.mode {
            ViewMode::CollectingInput => self.form.draw(f, chunks[1], state.submitting),
            ViewMode::ShowingResults => self.plan.draw(f, chunks[1], &state.schedule),
        }

        let idle = match state.mode {
            ViewMode::CollectingInput => "Enter: Generate | Tab: Next field | F1: Help | Ctrl+C: Quit",
            ViewMode::ShowingResults => "b: Back to Edit | r: Refresh | F1: Help | q: Quit",
        };
        self.status.render(f, chunks[2], idle);

        if let Some(alert) = &state.alert {
            Self::draw_alert(f, size, &alert.message);
        } else if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    fn draw_alert(f: &mut Frame, area: Rect, message: &str) {
        let popup_area = centered_rect(60, 30, area);
        f.render_widget(Clear, popup_area);

        let alert = Paragraph::new(format!("{}\n\nPress Enter to continue", message))
            .style(Styles::error())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title("Alert")
                    .borders(Borders::ALL)
                    .border_style(Styles::error()),
            );
        f.render_widget(alert, popup_area);
    }

    /// Draw help popup with context-sensitive shortcuts
    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 60, area);
        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(self.get_context_help())
            .block(
                Block::default()
                    .title("Help - Shortcuts")
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            );
        f.render_widget(help_popup, popup_area);
    }

    /// Get context-sensitive help content
    fn get_context_help(&self) -> String {
        let global_help = "Global Shortcuts:\n\
            F1 - Toggle this help\n\
            Esc - Close this help\n\
            Ctrl+C - Quit application\n\n";

        let screen_help = match self.store.state().mode {
            ViewMode::CollectingInput => {
                "Study Form:\n\
                Tab / Shift+Tab - Next / previous field\n\
                ↑/↓ - Move between fields or time blocks\n\
                Space - Toggle a time block\n\
                ←/→ - Move cursor or change learning style\n\
                Enter - Generate schedule"
            }
            ViewMode::ShowingResults => {
                "Weekly Plan:\n\
                ↑/↓ - Select a session\n\
                b / Esc - Back to edit (empty form)\n\
                r - Refresh (start over)\n\
                q - Quit"
            }
        };

        format!("{}{}", global_help, screen_help)
    }
}
