//! Terminal lifecycle and the main application loop
//!
//! Raw mode, the alternate screen and mouse capture are enabled on the
//! way in and torn down on the way out, including through panics.

use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{App, StatusLevel};
use crate::config::AppConfig;
use crate::error::Error;
use crate::events::EventHandler;
use crate::ui::render_ui;

pub type AdminTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Whether the terminal has been switched into TUI mode and still needs
/// restoring.
static TERMINAL_NEEDS_CLEANUP: AtomicBool = AtomicBool::new(false);

/// Switch the terminal into TUI mode.
pub fn init_terminal() -> Result<AdminTerminal, Error> {
    enable_raw_mode().map_err(Error::Io)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(Error::Io)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(Error::Io)?;
    terminal.hide_cursor().map_err(Error::Io)?;

    TERMINAL_NEEDS_CLEANUP.store(true, Ordering::SeqCst);
    Ok(terminal)
}

/// Restore the terminal to normal mode. Safe to call more than once.
pub fn restore_terminal(terminal: &mut AdminTerminal) -> Result<(), Error> {
    if TERMINAL_NEEDS_CLEANUP.load(Ordering::SeqCst) {
        disable_raw_mode().map_err(Error::Io)?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .map_err(Error::Io)?;
        terminal.show_cursor().map_err(Error::Io)?;
        TERMINAL_NEEDS_CLEANUP.store(false, Ordering::SeqCst);
    }
    Ok(())
}

/// Best-effort restoration for panic paths; errors are ignored.
fn emergency_terminal_cleanup() {
    if TERMINAL_NEEDS_CLEANUP.load(Ordering::SeqCst) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        let _ = execute!(io::stdout(), cursor::Show);
        TERMINAL_NEEDS_CLEANUP.store(false, Ordering::SeqCst);
    }
}

/// Install a panic hook that puts the terminal back before the panic
/// message prints.
pub fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        emergency_terminal_cleanup();
        original_hook(panic_info);
    }));
}

/// Run the admin console until the user quits.
pub async fn run(config: &AppConfig) -> Result<(), Error> {
    setup_panic_handler();

    let mut terminal = init_terminal().map_err(|e| {
        emergency_terminal_cleanup();
        e
    })?;
    tracing::info!("terminal initialized");

    let mut app = App::new();
    let mut event_handler = EventHandler::new();

    let app_result = run_app_loop(&mut terminal, &mut app, &mut event_handler, config).await;

    // Restore even when the loop failed; the loop error wins
    if let Err(restore_error) = restore_terminal(&mut terminal) {
        if app_result.is_ok() {
            return Err(restore_error);
        }
        eprintln!("Warning: failed to restore terminal: {restore_error}");
    }
    tracing::info!("terminal restored");

    app_result
}

async fn run_app_loop(
    terminal: &mut AdminTerminal,
    app: &mut App,
    event_handler: &mut EventHandler,
    config: &AppConfig,
) -> Result<(), Error> {
    let tick_rate = config.tick_rate();
    loop {
        terminal
            .draw(|frame| {
                if let Err(e) = render_ui(frame, app) {
                    app.set_status(format!("Render error: {e}"), StatusLevel::Error);
                }
            })
            .map_err(Error::Io)?;

        // The timeout lets the loop redraw periodically without input
        match tokio::time::timeout(tick_rate, event_handler.next()).await {
            Ok(Ok(event)) => match app.handle_event(event) {
                Ok(should_quit) => {
                    if should_quit {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "event handling failed");
                    app.set_status(format!("Event error: {e}"), StatusLevel::Error);
                }
            },
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "event channel failed");
                app.set_status(format!("Event channel error: {e}"), StatusLevel::Error);
            }
            Err(_) => {}
        }

        if app.state.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_flag_round_trip() {
        TERMINAL_NEEDS_CLEANUP.store(false, Ordering::SeqCst);
        emergency_terminal_cleanup();
        assert!(!TERMINAL_NEEDS_CLEANUP.load(Ordering::SeqCst));

        TERMINAL_NEEDS_CLEANUP.store(true, Ordering::SeqCst);
        emergency_terminal_cleanup();
        assert!(!TERMINAL_NEEDS_CLEANUP.load(Ordering::SeqCst));
    }

    #[test]
    fn test_panic_handler_installs() {
        setup_panic_handler();
    }
}
