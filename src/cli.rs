use crate::config;
use crate::event::Event;
use crate::logging;
use crate::search::providers::MockPeopleProvider;
use crate::search::SearchProvider;
use crate::tui::App;
use anyhow::{Context, Result};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, EventStream, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Drives the loading spinner; state changes redraw on their own events.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Load configuration, set up the terminal, and run the app to completion
pub async fn run() -> Result<()> {
    let config = config::load_or_create_config()?;
    let _log_guard = logging::init(&config)?;

    let provider: Arc<dyn SearchProvider> =
        Arc::new(MockPeopleProvider::new(config.search.clone()));
    let mut app = App::new(provider);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_loop(&mut terminal, &mut app).await;

    // Restore the terminal even when the loop errored.
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(TICK_INTERVAL);

    while !app.should_quit() {
        // Commit any settled search before drawing.
        while let Some(outcome) = app.poll_outcome() {
            app.handle_outcome(outcome);
        }

        terminal.draw(|frame| app.render(frame))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    app.handle_event(Event::Key(key))?;
                }
                Some(Ok(CrosstermEvent::Mouse(mouse))) => {
                    app.handle_event(Event::Mouse(mouse))?;
                }
                Some(Ok(CrosstermEvent::Resize(width, height))) => {
                    app.handle_event(Event::Resize(width, height))?;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("Terminal event stream failed"),
                None => break,
            },
            _ = tick.tick() => {
                app.handle_event(Event::Tick)?;
            }
        }
    }

    Ok(())
}
