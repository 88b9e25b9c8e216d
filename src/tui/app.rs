use crate::event::{Event, EventResult};
use crate::search::{SearchError, SearchProvider, SearchResult};
use crate::state::{SearchSession, View};
use crate::tui::{InputWidget, ResultList};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::sync::Arc;
use tokio::sync::mpsc;

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// One settled search, tagged with the search it answers
#[derive(Debug)]
pub enum SearchOutcome {
    Completed {
        seq: u64,
        results: Vec<SearchResult>,
    },
    Failed {
        seq: u64,
        message: String,
    },
}

impl SearchOutcome {
    fn seq(&self) -> u64 {
        match self {
            SearchOutcome::Completed { seq, .. } | SearchOutcome::Failed { seq, .. } => *seq,
        }
    }
}

/// Main application state
pub struct App {
    /// Search provider (the mock generator in production, deterministic
    /// doubles in tests)
    provider: Arc<dyn SearchProvider>,
    /// The state record driving all rendering decisions
    session: SearchSession,
    /// Input widget for the name being searched
    input: InputWidget,
    /// Result list component with selection support
    results: ResultList,
    /// Channel receiver for the in-flight search, if any
    outcome_receiver: Option<mpsc::UnboundedReceiver<SearchOutcome>>,
    /// Monotone search counter; outcomes carry the value they were
    /// spawned with so a stale one can never overwrite a newer search
    search_seq: u64,
    /// Tick counter driving the loading spinner
    tick_count: usize,
    /// Whether the application should quit
    should_quit: bool,
}

impl App {
    /// Create a new application instance
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider,
            session: SearchSession::new(),
            input: InputWidget::new(),
            results: ResultList::new(),
            outcome_receiver: None,
            search_seq: 0,
            tick_count: 0,
            should_quit: false,
        }
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The current session state
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Check for a settled search
    pub fn poll_outcome(&mut self) -> Option<SearchOutcome> {
        self.outcome_receiver
            .as_mut()
            .and_then(|receiver| receiver.try_recv().ok())
    }

    /// Commit a settled search to the session
    pub fn handle_outcome(&mut self, outcome: SearchOutcome) {
        if outcome.seq() != self.search_seq {
            // With submission gated on !is_loading there is never more
            // than one search in flight; a mismatch means the channel
            // plumbing broke, not that a race was lost.
            tracing::warn!(
                outcome_seq = outcome.seq(),
                current_seq = self.search_seq,
                "dropping stale search outcome"
            );
            return;
        }

        match outcome {
            SearchOutcome::Completed { results, .. } => {
                self.session.finish_success(results);
                self.results.reset();
            }
            SearchOutcome::Failed { message, .. } => {
                self.session.finish_failure(&message);
            }
        }
        self.outcome_receiver = None;
    }

    /// Handle an event
    pub fn handle_event(&mut self, event: Event) -> EventResult<()> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Tick => {
                self.tick_count = self.tick_count.wrapping_add(1);
                Ok(())
            }
            Event::Resize(_, _) => Ok(()),
            Event::Quit => {
                self.should_quit = true;
                Ok(())
            }
        }
    }

    /// Handle mouse events
    fn handle_mouse(&mut self, mouse: crossterm::event::MouseEvent) -> EventResult<()> {
        use crossterm::event::MouseEventKind;

        match mouse.kind {
            MouseEventKind::ScrollUp => self.results.select_prev(),
            MouseEventKind::ScrollDown => self.results.select_next(self.session.results().len()),
            _ => {}
        }
        Ok(())
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyEvent) -> EventResult<()> {
        // Handle Ctrl+C to quit
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        // Open the selected result in the system browser
        if key.code == KeyCode::Char('o') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.open_selected();
            return Ok(());
        }

        match key.code {
            KeyCode::Up => {
                self.results.select_prev();
                return Ok(());
            }
            KeyCode::Down => {
                self.results.select_next(self.session.results().len());
                return Ok(());
            }
            KeyCode::Esc => {
                self.input.clear();
                self.session.set_query("");
                return Ok(());
            }
            KeyCode::Enter => {
                // Submission is a no-op while a search is in flight.
                if !self.session.is_loading() {
                    self.submit_search();
                }
                return Ok(());
            }
            _ => {}
        }

        // Forward other keys to the input widget; mirror the text into
        // the session only on an actual edit, so cursor movement does
        // not dismiss a visible error.
        let before = self.input.text();
        self.input.handle_key(key);
        let after = self.input.text();
        if after != before {
            self.session.set_query(&after);
        }
        Ok(())
    }

    /// Start a search over the current input and spawn the provider call
    fn submit_search(&mut self) {
        let Some(query) = self.session.begin_search() else {
            return;
        };

        self.results.reset();
        self.search_seq += 1;
        let seq = self.search_seq;

        let (tx, rx) = mpsc::unbounded_channel();
        self.outcome_receiver = Some(rx);

        let provider = Arc::clone(&self.provider);
        tracing::info!(query = %query, seq, "starting search");

        // The spawned task never touches session state; it reports back
        // over the channel and the event loop commits the outcome.
        tokio::spawn(async move {
            let outcome = match provider.search(&query).await {
                Ok(results) => SearchOutcome::Completed { seq, results },
                Err(SearchError::ServiceUnavailable(message)) => {
                    SearchOutcome::Failed { seq, message }
                }
            };
            let _ = tx.send(outcome); // Receiver dropped on quit
        });
    }

    /// Open the selected result link in the system browser
    fn open_selected(&mut self) {
        if self.session.view() != View::Results {
            return;
        }
        let Some(result) = self.session.results().get(self.results.selected()) else {
            return;
        };

        tracing::info!(url = %result.url, "opening result in browser");
        if let Err(e) = open::that(&result.url) {
            tracing::warn!(url = %result.url, error = %e, "failed to open browser");
        }
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Results
                Constraint::Length(3), // Status / error banner
                Constraint::Length(3), // Input
            ])
            .split(frame.area());

        self.render_main(frame, chunks[0]);
        self.render_status(frame, chunks[1]);
        self.input.render(frame, chunks[2]);
    }

    /// Render the main area for the current view
    fn render_main(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Results ")
            .border_style(Style::default().fg(Color::White));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        match self.session.view() {
            View::Help => {
                let help = Paragraph::new(vec![
                    Line::default(),
                    Line::from("Find a person across the sites they might appear on."),
                    Line::default(),
                    Line::from(Span::styled(
                        "Type a name below and press Enter.",
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
                .alignment(Alignment::Center);
                frame.render_widget(help, inner);
            }
            View::Loading => {
                let spinner = SPINNER_FRAMES[self.tick_count % SPINNER_FRAMES.len()];
                let loading = Paragraph::new(vec![
                    Line::default(),
                    Line::from(format!(
                        "{spinner} Searching for \"{}\"...",
                        self.session.query().trim()
                    )),
                ])
                .alignment(Alignment::Center);
                frame.render_widget(loading, inner);
            }
            View::Results => {
                let results = self.session.results().to_vec();
                self.results.render(frame, inner, &results);
            }
            View::NoResults => {
                let empty = Paragraph::new(vec![
                    Line::default(),
                    Line::from("No results found. Try a different name."),
                ])
                .alignment(Alignment::Center);
                frame.render_widget(empty, inner);
            }
            // The banner carries the story after a failed search.
            View::Blank => {}
        }
    }

    /// Render the status bar, doubling as the error banner
    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(error) = self.session.error() {
            Line::from(Span::styled(
                format!("⚠ {error}"),
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            let state = if self.session.is_loading() {
                "Searching..."
            } else {
                "Ready"
            };
            Line::from(vec![
                Span::styled("Status: ", Style::default().fg(Color::Yellow)),
                Span::raw(state),
                Span::raw(" | "),
                Span::styled("Results: ", Style::default().fg(Color::Cyan)),
                Span::raw(self.session.results().len().to_string()),
                Span::styled(
                    "  (↑/↓=select │ Ctrl+O=open │ Ctrl+C=quit)",
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        };

        let status = Paragraph::new(vec![line]).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        );

        frame.render_widget(status, area);
    }
}
