//! Status bar with contextual help

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, NavigationMode, Screen, StatusLevel};

/// Render the bottom status bar: current status on the left, contextual
/// key help on the right.
pub fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let (icon, color) = match app.state.status.level {
        StatusLevel::Info => ("ℹ️", Color::Gray),
        StatusLevel::Success => ("✅", Color::Green),
        StatusLevel::Error => ("❌", Color::Red),
    };

    let status = Paragraph::new(format!("{} {}", icon, app.state.status.text))
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Status")
                .border_style(Style::default().fg(color)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(status, chunks[0]);

    let help = Paragraph::new(get_context_help(app))
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .border_style(Style::default().fg(Color::Gray)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(help, chunks[1]);
}

/// Key hints for the current screen and focus layer.
pub fn get_context_help(app: &App) -> String {
    if app.state.navigation_mode == NavigationMode::ScreenLevel {
        return "Tab/1-8: screens | Enter: into screen | Ctrl+C: quit".to_string();
    }
    match app.state.current_screen {
        Screen::Dashboard => "y: year | r: refresh | Esc: tab mode".to_string(),
        Screen::Settings => "Tab: next field | s: save | Esc: tab mode".to_string(),
        Screen::Users => {
            "/: search | f: status | r: role | t: toggle | d: delete | Esc: tab mode".to_string()
        }
        _ => "n: new | e: edit | t: toggle | d: delete | f: filter | Left/Right: page".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;

    #[test]
    fn test_help_follows_navigation_mode() {
        let mut app = App::new();
        assert!(get_context_help(&app).contains("1-8"));

        app.state.navigation_mode = NavigationMode::WithinScreen;
        app.state.current_screen = Screen::Events;
        assert!(get_context_help(&app).contains("n: new"));

        app.state.current_screen = Screen::Settings;
        assert!(get_context_help(&app).contains("save"));
    }
}
