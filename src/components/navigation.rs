//! Navigation tab bar

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

use crate::app::{App, NavigationMode, Screen};

/// Screens in tab order with their number shortcuts.
pub fn screen_tabs() -> Vec<(Screen, &'static str)> {
    vec![
        (Screen::Dashboard, "1:Dashboard"),
        (Screen::Events, "2:Events"),
        (Screen::Games, "3:Games"),
        (Screen::Promos, "4:Promos"),
        (Screen::Shop, "5:Shop"),
        (Screen::Users, "6:Users"),
        (Screen::Packages, "7:Packages"),
        (Screen::Settings, "8:Settings"),
    ]
}

/// Render the tab bar. The border color tracks the navigation mode so the
/// active focus layer is visible at a glance.
pub fn render_navigation(f: &mut Frame, app: &App, area: Rect) {
    let tabs = screen_tabs();
    let titles: Vec<Line> = tabs.iter().map(|(_, title)| Line::from(*title)).collect();
    let selected = tabs
        .iter()
        .position(|(screen, _)| *screen == app.state.current_screen)
        .unwrap_or(0);

    let (border_color, title) = match app.state.navigation_mode {
        NavigationMode::ScreenLevel => (Color::Blue, "Navigation [TAB MODE]"),
        NavigationMode::WithinScreen => (Color::Green, "Navigation [CONTENT MODE]"),
    };

    let widget = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(title),
        )
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .select(selected)
        .divider("|");

    f.render_widget(widget, area);
}

/// Map a number key to its screen.
pub fn number_key_to_screen(key: char) -> Option<Screen> {
    match key {
        '1' => Some(Screen::Dashboard),
        '2' => Some(Screen::Events),
        '3' => Some(Screen::Games),
        '4' => Some(Screen::Promos),
        '5' => Some(Screen::Shop),
        '6' => Some(Screen::Users),
        '7' => Some(Screen::Packages),
        '8' => Some(Screen::Settings),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_keys_cover_every_screen() {
        for (i, (screen, _)) in screen_tabs().iter().enumerate() {
            let key = char::from_digit(i as u32 + 1, 10).unwrap();
            assert_eq!(number_key_to_screen(key), Some(*screen));
        }
        assert_eq!(number_key_to_screen('9'), None);
        assert_eq!(number_key_to_screen('x'), None);
    }

    #[test]
    fn test_tab_labels_carry_their_shortcut() {
        for (i, (_, title)) in screen_tabs().iter().enumerate() {
            assert!(title.starts_with(char::from_digit(i as u32 + 1, 10).unwrap()));
        }
    }
}
