//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash,
//! and runs the main event loop.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use crate::api::ExpenseApi;
use crate::config::settings::Settings;
use crate::controller::ViewController;

use super::app::{Action, App};
use super::event::{Event, EventHandler};
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal_impl();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    restore_terminal_impl()?;
    Ok(())
}

fn restore_terminal_impl() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI application
pub async fn run_tui(api: Arc<dyn ExpenseApi>, settings: &Settings) -> Result<()> {
    let mut terminal = init_terminal()?;

    let result = run_app(&mut terminal, api, settings).await;

    // Restore even when the loop failed, then report the failure
    restore_terminal()?;
    result
}

async fn run_app(terminal: &mut Tui, api: Arc<dyn ExpenseApi>, settings: &Settings) -> Result<()> {
    let mut app = App::new(ViewController::with_shared_api(api), settings);
    let mut events = EventHandler::default();
    let sender = events.sender();

    info!("tui started");
    spawn_load(&mut app, &sender);

    loop {
        terminal.draw(|frame| {
            super::views::render(frame, &mut app);
        })?;

        let Some(event) = events.next().await else {
            break;
        };

        if let Some(action) = handle_event(&mut app, event)? {
            perform(&mut app, action, &sender).await;
        }

        if app.should_quit {
            break;
        }
    }

    info!("tui stopped");
    Ok(())
}

/// Carry out a remote action. Loads run in the background so the screen
/// keeps drawing; mutations are awaited because they decide whether the
/// form closes.
async fn perform(app: &mut App<'_>, action: Action, sender: &UnboundedSender<Event>) {
    match action {
        Action::Load => spawn_load(app, sender),
        Action::Submit(input) => app.submit_form(input).await,
        Action::Remove(id) => app.remove(id).await,
    }
}

fn spawn_load(app: &mut App<'_>, sender: &UnboundedSender<Event>) {
    let ticket = app.controller.begin_load();
    let api = app.controller.api();
    let sender = sender.clone();

    tokio::spawn(async move {
        let result = api.list(ticket.filter()).await;
        if sender.send(Event::Loaded { ticket, result }).is_err() {
            debug!("list response arrived after the tui closed");
        }
    });
}
