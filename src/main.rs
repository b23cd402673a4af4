//! Agent Builder — a terminal form for describing an AI agent's name,
//! purpose, capabilities, personality, and goals, with a live preview.
//!
//! The form and preview always come up; saving is the only part that needs
//! a writable data directory, and its absence is reported in the activity
//! strip instead of stopping the program.

mod app;
mod constants;
mod store;
mod util;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::ExecutableCommand;
use crossterm::event;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::app::App;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// How long to wait for a key before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let mut app = App::new();
    let mut tui = enter_tui()?;

    // Leave the alternate screen before surfacing any error from the loop.
    let outcome = edit_until_quit(&mut tui, &mut app);
    leave_tui()?;
    outcome
}

/// Raw mode plus the alternate screen, so the form owns the whole terminal.
fn enter_tui() -> Result<Tui> {
    terminal::enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    stdout
        .execute(EnterAlternateScreen)
        .context("enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("create terminal")
}

fn leave_tui() -> Result<()> {
    terminal::disable_raw_mode().context("disable raw mode")?;
    io::stdout()
        .execute(LeaveAlternateScreen)
        .context("leave alternate screen")?;
    Ok(())
}

/// Redraw the form and preview from the current state after every key, until
/// the user quits.
fn edit_until_quit(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit() {
        tui.draw(|frame| app.draw(frame))?;
        if event::poll(POLL_INTERVAL)? {
            app.handle_event(event::read()?)?;
        }
    }
    Ok(())
}
