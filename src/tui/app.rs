use crate::discover::{DiscoverError, Discovery, SearchResult};
use crate::event::{Event, EventResult};
use crate::llm::GroundedModel;
use crate::tui::form::FilterForm;
use crate::tui::results;
use crate::tui::state::{AppStatus, Session};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::TableState,
    Frame,
};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Resolution of one discovery request, tagged with its sequence number so
/// the session can discard stale arrivals.
struct Outcome {
    seq: u64,
    result: Result<SearchResult, DiscoverError>,
}

/// Main application state
pub struct App<M: GroundedModel + 'static> {
    discovery: Arc<Discovery<M>>,
    session: Session,
    form: FilterForm,
    /// Receiver for the one outstanding request, if any
    outcome_rx: Option<mpsc::UnboundedReceiver<Outcome>>,
    table_state: TableState,
    tick: usize,
    /// Transient status line, e.g. the export confirmation
    notice: Option<String>,
    should_quit: bool,
}

impl<M: GroundedModel + 'static> App<M> {
    pub fn new(discovery: Discovery<M>) -> Self {
        Self {
            discovery: Arc::new(discovery),
            session: Session::new(),
            form: FilterForm::new(),
            outcome_rx: None,
            table_state: TableState::default(),
            tick: 0,
            notice: None,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Drain any resolved outcome from the in-flight request
    pub fn poll_outcome(&mut self) {
        let Some(rx) = &mut self.outcome_rx else {
            return;
        };

        while let Ok(outcome) = rx.try_recv() {
            match outcome.result {
                Ok(result) => {
                    self.session.complete(outcome.seq, result);
                    self.table_state.select(Some(0));
                }
                Err(err) => {
                    self.session.fail(outcome.seq, err.to_string());
                }
            }
        }

        if !self.session.is_generating() {
            self.outcome_rx = None;
        }
    }

    /// Handle an event
    pub fn handle_event(&mut self, event: Event) -> EventResult<()> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Tick => {
                self.tick = self.tick.wrapping_add(1);
                Ok(())
            }
            Event::Quit => {
                self.should_quit = true;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        if key.code == KeyCode::Enter {
            match self.session.status() {
                // "Try Again": back to Idle, next Enter resubmits.
                AppStatus::Error => self.session.reset(),
                // Resubmit is disabled while a request is outstanding.
                AppStatus::Generating => {}
                AppStatus::Idle | AppStatus::Complete => self.submit(),
            }
            return Ok(());
        }

        if self.session.status() == AppStatus::Complete {
            match key.code {
                KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.export();
                    return Ok(());
                }
                KeyCode::PageUp => {
                    self.scroll_table(-1);
                    return Ok(());
                }
                KeyCode::PageDown => {
                    self.scroll_table(1);
                    return Ok(());
                }
                _ => {}
            }
        }

        self.form.handle_key(key);
        Ok(())
    }

    /// Snapshot the form and start the one outstanding request
    fn submit(&mut self) {
        if self.session.is_generating() {
            return;
        }

        let filters = self.form.to_filters();
        let seq = self.session.begin();
        self.notice = None;
        self.table_state = TableState::default();

        let (tx, rx) = mpsc::unbounded_channel();
        self.outcome_rx = Some(rx);

        let discovery = self.discovery.clone();
        tokio::spawn(async move {
            let result = discovery.discover(&filters).await;
            // Receiver may be gone if the user moved on; that is fine.
            let _ = tx.send(Outcome { seq, result });
        });
    }

    fn export(&mut self) {
        if self.session.opportunities().is_empty() {
            self.notice = Some("Nothing to export".to_string());
            return;
        }

        let dir = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
        match crate::export::write_export(
            &dir,
            self.form.output_format(),
            self.session.opportunities(),
        ) {
            Ok(path) => {
                self.notice = Some(format!("Exported to {}", path.display()));
            }
            Err(err) => {
                tracing::warn!(error = %err, "export failed");
                self.notice = Some(format!("Export failed: {err}"));
            }
        }
    }

    fn scroll_table(&mut self, delta: i64) {
        let len = self.session.opportunities().len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as i64;
        let next = (current + delta).clamp(0, len as i64 - 1);
        self.table_state.select(Some(next as usize));
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(46), Constraint::Min(40)])
            .split(frame.area());

        self.form
            .render(frame, columns[0], self.session.is_generating());

        match self.session.status() {
            AppStatus::Idle => results::render_idle(frame, columns[1]),
            AppStatus::Generating => results::render_generating(frame, columns[1], self.tick),
            AppStatus::Error => {
                results::render_error(frame, columns[1], self.session.error().unwrap_or(""))
            }
            AppStatus::Complete => results::render_complete(
                frame,
                columns[1],
                self.session.opportunities(),
                self.session.sources(),
                &mut self.table_state,
                self.notice.as_deref(),
            ),
        }
    }
}
