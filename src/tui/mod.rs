pub mod app;
pub mod form;
pub mod results;
pub mod state;

pub use app::App;
pub use form::FilterForm;
pub use state::{AppStatus, Session};

use crate::discover::Discovery;
use crate::event::Event;
use crate::llm::{GeminiClient, GroundedModel};
use anyhow::{Context, Result};
use crossterm::{
    event::{self as cevent, Event as CrosstermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;
use std::time::Duration;

/// Load configuration, set up the terminal, and run the app loop
pub async fn run() -> Result<()> {
    let config = crate::config::load_or_create_config()?;
    let _log_guard = crate::logging::init(&config)?;

    let discovery = Discovery::new(GeminiClient::new(config));
    let mut app = App::new(discovery);

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app).await;
    restore_terminal(&mut terminal)?;

    result
}

async fn event_loop<M: GroundedModel + 'static>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<M>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if cevent::poll(Duration::from_millis(100)).context("Failed to poll terminal events")? {
            match cevent::read().context("Failed to read terminal event")? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_event(Event::Key(key))?;
                }
                CrosstermEvent::Resize(width, height) => {
                    app.handle_event(Event::Resize(width, height))?;
                }
                _ => {}
            }
        } else {
            app.handle_event(Event::Tick)?;
        }

        app.poll_outcome();

        if app.should_quit() {
            return Ok(());
        }
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}
