//! Main TUI application state machine.
//!
//! Handles:
//! - Focus navigation and field input
//! - Backend calls via background workers
//! - Result display and verdict submission

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::Paragraph,
    Frame, Terminal,
};

use crate::adapters;
use crate::application::DiagnosisForm;
use crate::config::ClientConfig;
use crate::domain::Gender;
use crate::ports::DiagnosisApi;

use super::styles::ClinicTheme;
use super::ui::{
    ack::render_acknowledgement,
    form::{render_form, Focus},
    render_disclaimer, render_header,
    results::{grid_rows, render_results, render_verdict_bar},
};
use super::worker::{ApiEvent, ApiWorker, ApiWorkerHandle, RequestKind};

/// Screen regions, computed the same way for drawing and scrolling.
struct Regions {
    header: Rect,
    form: Rect,
    results: Rect,
    footer: Rect,
}

impl Regions {
    fn split(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(0),    // Body
                Constraint::Length(3), // Disclaimer
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
            .split(chunks[1]);

        Self {
            header: chunks[0],
            form: body[0],
            results: body[1],
            footer: chunks[2],
        }
    }
}

/// Main application state
pub struct App {
    /// Backend the workers call
    api: Arc<dyn DiagnosisApi>,

    /// Form, catalog, diagnosis and acknowledgement state
    form: DiagnosisForm,

    focus: Focus,

    /// Whether the app should quit
    should_quit: bool,

    /// Whether the built-in mock backend is in use
    mock: bool,

    /// Backend calls still running
    pending: Vec<ApiWorkerHandle>,

    /// Result rows scrolled past
    results_scroll: usize,

    /// Last known terminal area
    viewport: Rect,
}

impl App {
    /// Create the application with the backend selected by `config`.
    ///
    /// # Errors
    /// Returns error if the backend client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let api = adapters::connect(config)?;
        let mut app = Self::with_api(api);
        app.mock = config.mock;
        Ok(app)
    }

    /// Create the application around an existing backend.
    pub fn with_api(api: Arc<dyn DiagnosisApi>) -> Self {
        Self {
            api,
            form: DiagnosisForm::new(),
            focus: Focus::default(),
            should_quit: false,
            mock: false,
            pending: Vec::new(),
            results_scroll: 0,
            viewport: Rect::new(0, 0, 120, 40),
        }
    }

    #[must_use]
    pub fn form(&self) -> &DiagnosisForm {
        &self.form
    }

    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[must_use]
    pub fn results_scroll(&self) -> usize {
        self.results_scroll
    }

    /// Record the terminal size; result scrolling is bounded by the grid it
    /// produces.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Rect::new(0, 0, width, height);
        self.results_scroll = self.results_scroll.min(self.max_results_scroll());
    }

    /// Whether any backend call is still running.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.request_symptoms();

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_workers();

            let size = terminal.size()?;
            self.resize(size.width, size.height);

            terminal.draw(|f| self.draw(f))?;

            // Short poll to stay responsive while workers run
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Draw the whole screen.
    pub fn draw(&self, f: &mut Frame) {
        let regions = Regions::split(f.area());

        render_header(f, regions.header, self.mock);
        render_form(f, regions.form, &self.form, self.focus);

        match self.form.diagnosis() {
            Some(diagnosis) => {
                let panel = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(2)])
                    .split(regions.results);
                render_results(f, panel[0], diagnosis.results(), self.results_scroll);
                render_verdict_bar(f, panel[1], self.form.is_loading());
            }
            None => {
                let hint = Paragraph::new(Span::styled(
                    "Submit the form to see preliminary diagnostic suggestions.",
                    ClinicTheme::text_muted(),
                ))
                .alignment(Alignment::Center);
                f.render_widget(hint, regions.results);
            }
        }

        render_disclaimer(f, regions.footer);

        if let Some(ack) = self.form.acknowledgement() {
            render_acknowledgement(f, f.area(), ack);
        }
    }

    /// Apply completions from finished workers.
    pub fn poll_workers(&mut self) {
        let mut events = Vec::new();
        self.pending.retain(|worker| match worker.try_recv() {
            Some(event) => {
                events.push(event);
                false
            }
            None => true,
        });

        for event in events {
            self.apply_event(event);
        }
    }

    pub fn apply_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::SymptomsLoaded(outcome) => self.form.finish_symptoms(outcome),
            ApiEvent::DiagnosisReady(outcome) => {
                self.results_scroll = 0;
                self.form.finish_diagnosis(outcome);
            }
            ApiEvent::VerdictSaved { is_valid, outcome } => {
                self.form.finish_validation(is_valid, outcome);
            }
        }
    }

    /// Start (or restart) the catalog fetch.
    pub fn request_symptoms(&mut self) {
        self.form.begin_symptom_load();
        self.pending
            .push(ApiWorker::fetch_symptoms(Arc::clone(&self.api)));
    }

    fn submit(&mut self) {
        if self.form.is_loading() {
            tracing::debug!("Diagnosis already in flight");
            return;
        }

        if let Ok(request) = self.form.begin_diagnosis() {
            self.pending
                .push(ApiWorker::request_diagnosis(Arc::clone(&self.api), request));
        }
    }

    fn submit_verdict(&mut self, is_valid: bool) {
        if self.form.is_loading() {
            return;
        }

        if let Some(verdict) = self.form.begin_validation(is_valid) {
            self.pending
                .push(ApiWorker::save_verdict(Arc::clone(&self.api), verdict));
        }
    }

    fn new_patient(&mut self) {
        // A pending verdict still carries the current patient
        let verdict_pending = self
            .pending
            .iter()
            .any(|worker| matches!(worker.kind(), RequestKind::Verdict { .. }));
        if verdict_pending {
            tracing::debug!("New patient refused while a verdict is saving");
            return;
        }

        if self.form.reset_patient().is_err() {
            tracing::debug!("New patient refused while a diagnosis is in flight");
            return;
        }

        self.focus = Focus::Name;
        self.results_scroll = 0;
    }

    /// Last result row that can be scrolled to in the current viewport.
    fn max_results_scroll(&self) -> usize {
        let cards = self.form.diagnosis().map_or(0, |d| d.len());
        grid_rows(cards, Regions::split(self.viewport).results.width).saturating_sub(1)
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);

        // Global quit handling
        if ctrl && matches!(key, KeyCode::Char('q') | KeyCode::Char('c')) {
            self.should_quit = true;
            return;
        }

        // The acknowledgement is modal
        if self.form.acknowledgement().is_some() {
            if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.form.dismiss_acknowledgement();
            }
            return;
        }

        if ctrl {
            match key {
                KeyCode::Char('s') => self.submit(),
                KeyCode::Char('v') => self.submit_verdict(true),
                KeyCode::Char('x') => self.submit_verdict(false),
                KeyCode::Char('r') => self.request_symptoms(),
                KeyCode::Char('n') => self.new_patient(),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return;
            }
            KeyCode::PageDown => {
                self.results_scroll = (self.results_scroll + 1).min(self.max_results_scroll());
                return;
            }
            KeyCode::PageUp => {
                self.results_scroll = self.results_scroll.saturating_sub(1);
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Name => self.handle_name_key(key),
            Focus::Gender => self.handle_gender_key(key),
            Focus::Year => self.handle_year_key(key),
            Focus::Symptoms => self.handle_symptoms_key(key),
            Focus::Submit => {
                if key == KeyCode::Enter {
                    self.submit();
                }
            }
        }
    }

    fn handle_name_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char(c) => self.form.push_name_char(c),
            KeyCode::Backspace => self.form.pop_name_char(),
            KeyCode::Enter => self.focus = self.focus.next(),
            _ => {}
        }
    }

    fn handle_gender_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => self.form.toggle_gender(),
            KeyCode::Char('m') | KeyCode::Char('M') => self.form.set_gender(Gender::Male),
            KeyCode::Char('f') | KeyCode::Char('F') => self.form.set_gender(Gender::Female),
            KeyCode::Enter => self.focus = self.focus.next(),
            _ => {}
        }
    }

    fn handle_year_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char(c) => self.form.push_year_char(c),
            KeyCode::Backspace => self.form.pop_year_char(),
            KeyCode::Enter => self.focus = self.focus.next(),
            _ => {}
        }
    }

    fn handle_symptoms_key(&mut self, key: KeyCode) {
        let picker = self.form.picker_mut();
        match key {
            KeyCode::Up => picker.move_up(),
            KeyCode::Down => picker.move_down(),
            KeyCode::Enter => picker.toggle_highlighted(),
            KeyCode::Char(c) => picker.push_query(c),
            KeyCode::Backspace => {
                // Empty filter: remove the last chosen symptom
                if picker.pop_query().is_none() {
                    picker.pop_selected();
                }
            }
            KeyCode::Delete => picker.clear_selection(),
            KeyCode::Esc => picker.clear_query(),
            _ => {}
        }
    }
}
