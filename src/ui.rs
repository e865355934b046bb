//! Frame composition
//!
//! One vertical stack: header, tab bar, active screen, status bar.
//! Floating surfaces render after the stack so dialogs sit above the
//! screen body and header menus sit above everything.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{App, NavigationMode, Screen};
use crate::components::header::{render_header, render_header_overlays};
use crate::components::navigation::render_navigation;
use crate::components::status_bar::render_status_bar;
use crate::error::Error;
use crate::screens::dashboard::render_dashboard;
use crate::screens::events::{render_events, render_events_overlays};
use crate::screens::games::{render_games, render_games_overlays};
use crate::screens::packages::{render_packages, render_packages_overlays};
use crate::screens::promos::{render_promos, render_promos_overlays};
use crate::screens::settings::render_settings;
use crate::screens::shop::{render_shop, render_shop_overlays};
use crate::screens::users::{render_users, render_users_overlays};

pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 24;

pub fn render_ui(f: &mut Frame, app: &mut App) -> Result<(), Error> {
    let size = f.area();
    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        render_size_warning(f, size);
        return Ok(());
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(size);

    let title = app.state.current_screen.title();
    render_header(f, &mut app.state.header, &app.store, title, chunks[0]);
    render_navigation(f, app, chunks[1]);
    render_content(f, app, chunks[2]);
    render_status_bar(f, app, chunks[3]);
    render_overlays(f, app);

    Ok(())
}

fn render_content(f: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.state.navigation_mode == NavigationMode::WithinScreen;
    let store = &app.store;
    match app.state.current_screen {
        Screen::Dashboard => render_dashboard(f, &app.state.dashboard, store, area),
        Screen::Events => render_events(f, &mut app.state.events_screen, store, area, focused),
        Screen::Games => render_games(f, &mut app.state.games_screen, store, area, focused),
        Screen::Promos => render_promos(f, &mut app.state.promos_screen, store, area, focused),
        Screen::Shop => render_shop(f, &mut app.state.shop_screen, store, area, focused),
        Screen::Users => render_users(f, &mut app.state.users_screen, store, area, focused),
        Screen::Packages => {
            render_packages(f, &mut app.state.packages_screen, store, area, focused);
        }
        Screen::Settings => render_settings(f, &mut app.state.settings_screen, store, area),
    }
}

fn render_overlays(f: &mut Frame, app: &mut App) {
    match app.state.current_screen {
        Screen::Events => render_events_overlays(f, &mut app.state.events_screen),
        Screen::Games => render_games_overlays(f, &mut app.state.games_screen),
        Screen::Promos => render_promos_overlays(f, &mut app.state.promos_screen),
        Screen::Shop => render_shop_overlays(f, &mut app.state.shop_screen),
        Screen::Users => render_users_overlays(f, &mut app.state.users_screen),
        Screen::Packages => render_packages_overlays(f, &mut app.state.packages_screen),
        Screen::Dashboard | Screen::Settings => {}
    }
    // Header menus and modals stack above any screen dialog
    render_header_overlays(f, &mut app.state.header, &app.store);
}

fn render_size_warning(f: &mut Frame, size: Rect) {
    let width = 44.min(size.width);
    let height = 5.min(size.height);
    let popup = Rect {
        x: size.width.saturating_sub(width) / 2,
        y: size.height.saturating_sub(height) / 2,
        width,
        height,
    };
    f.render_widget(Clear, popup);
    let warning = Paragraph::new(format!(
        "Terminal too small\nNeed {MIN_WIDTH}x{MIN_HEIGHT}, have {}x{}",
        size.width, size.height
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .style(Style::default().fg(Color::Yellow))
    .block(Block::default().borders(Borders::ALL).title("Resize"));
    f.render_widget(warning, popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(app: &mut App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                render_ui(f, app).unwrap();
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn test_full_frame_renders_chrome_and_dashboard() {
        let mut app = App::new();
        let text = buffer_text(&mut app, 100, 32);
        assert!(text.contains("Aura Admin"));
        assert!(text.contains("Hello, Sabbir"));
        assert!(text.contains("1:Dashboard"));
        assert!(text.contains("Total Users"));
        assert!(text.contains("Welcome to Aura Admin"));
    }

    #[test]
    fn test_undersized_terminal_shows_warning_only() {
        let mut app = App::new();
        let text = buffer_text(&mut app, 40, 10);
        assert!(text.contains("Terminal too small"));
        assert!(!text.contains("1:Dashboard"));
    }

    #[test]
    fn test_each_screen_renders_without_panic() {
        let mut app = App::new();
        for screen in Screen::all() {
            app.state.current_screen = *screen;
            let text = buffer_text(&mut app, 100, 32);
            assert!(text.contains("Aura Admin"), "chrome lost on {screen:?}");
        }
    }

    #[test]
    fn test_open_dialog_draws_over_the_table() {
        let mut app = App::new();
        app.handle_event(Event::Char('2')).unwrap();
        app.handle_event(Event::Enter).unwrap();
        app.handle_event(Event::Char('n')).unwrap();

        let text = buffer_text(&mut app, 100, 32);
        assert!(text.contains("Create Event"));
        assert!(text.contains("Event Name"));
    }
}
