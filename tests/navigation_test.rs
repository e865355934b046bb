//! Two-layer navigation across the whole shell
//!
//! Screen switching, focus hand-off between the tab bar and screen
//! content, and the ways open header surfaces hold navigation keys
//! captive.

use aura_admin::app::{App, NavigationMode, Screen, StatusLevel};
use aura_admin::events::Event;
use aura_admin::render_ui;
use aura_admin::screens::StatusFilter;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn press(app: &mut App, event: Event) {
    app.handle_event(event).expect("event routing failed");
}

fn draw(app: &mut App) {
    let backend = TestBackend::new(100, 32);
    let mut terminal = Terminal::new(backend).expect("test terminal");
    terminal
        .draw(|frame| render_ui(frame, app).expect("render failed"))
        .expect("draw failed");
}

#[test]
fn test_screen_state_survives_switching_away_and_back() {
    let mut app = App::new();
    press(&mut app, Event::Char('2'));
    press(&mut app, Event::Enter);
    press(&mut app, Event::Char('f'));
    press(&mut app, Event::Down);
    assert_eq!(app.state.events_screen.filter, StatusFilter::Active);
    assert_eq!(app.state.events_screen.table.state.selected(), Some(1));

    press(&mut app, Event::Tab);
    assert_eq!(app.state.current_screen, Screen::Games);
    assert_eq!(
        app.state.navigation_mode,
        NavigationMode::WithinScreen,
        "switching with Tab keeps the content focused"
    );
    press(&mut app, Event::BackTab);

    assert_eq!(app.state.current_screen, Screen::Events);
    assert_eq!(app.state.events_screen.filter, StatusFilter::Active);
    assert_eq!(
        app.state.events_screen.table.state.selected(),
        Some(1),
        "filter and selection must survive the round trip"
    );
}

#[test]
fn test_account_menu_holds_keys_away_from_tab_bar() {
    let mut app = App::new();
    draw(&mut app);

    press(&mut app, Event::Click { column: 90, row: 1 });
    assert!(app.state.header.account_menu_open());

    // Keys the open menu does not recognize stop at the header
    press(&mut app, Event::Tab);
    assert!(app.state.header.account_menu_open());
    assert_eq!(app.state.current_screen, Screen::Dashboard);
    press(&mut app, Event::Char('3'));
    assert_eq!(app.state.current_screen, Screen::Dashboard);

    press(&mut app, Event::Escape);
    assert!(!app.state.header.account_menu_open());

    press(&mut app, Event::Tab);
    assert_eq!(app.state.current_screen, Screen::Events);
}

#[test]
fn test_mode_flip_round_trip_on_every_screen() {
    let mut app = App::new();
    let digits = ['1', '2', '3', '4', '5', '6', '7', '8'];
    for (digit, screen) in digits.iter().zip(Screen::all()) {
        press(&mut app, Event::Char(*digit));
        assert_eq!(app.state.current_screen, *screen);
        assert_eq!(app.state.navigation_mode, NavigationMode::ScreenLevel);

        press(&mut app, Event::Enter);
        assert_eq!(
            app.state.navigation_mode,
            NavigationMode::WithinScreen,
            "Enter must focus {screen:?}"
        );
        press(&mut app, Event::Escape);
        assert_eq!(
            app.state.navigation_mode,
            NavigationMode::ScreenLevel,
            "Escape must release {screen:?}"
        );
    }
}

#[test]
fn test_number_jump_is_disabled_within_screen() {
    let mut app = App::new();
    press(&mut app, Event::Char('2'));
    press(&mut app, Event::Enter);

    press(&mut app, Event::Char('3'));
    assert_eq!(
        app.state.current_screen,
        Screen::Events,
        "number keys belong to the screen while content is focused"
    );

    // Tab still switches, without dropping focus back to the tab bar
    press(&mut app, Event::Tab);
    assert_eq!(app.state.current_screen, Screen::Games);
    assert_eq!(app.state.navigation_mode, NavigationMode::WithinScreen);
}

#[test]
fn test_click_on_table_row_enters_screen_focus() {
    let mut app = App::new();
    press(&mut app, Event::Char('2'));
    assert_eq!(app.state.navigation_mode, NavigationMode::ScreenLevel);
    draw(&mut app);

    press(&mut app, Event::Click { column: 40, row: 12 });

    assert_eq!(
        app.state.navigation_mode,
        NavigationMode::WithinScreen,
        "a handled click pulls focus into the screen"
    );
    assert_eq!(app.state.events_screen.table.state.selected(), Some(1));
}

#[test]
fn test_click_on_empty_area_stays_at_screen_level() {
    let mut app = App::new();
    press(&mut app, Event::Char('2'));
    draw(&mut app);

    press(&mut app, Event::Click { column: 50, row: 30 });

    assert_eq!(app.state.navigation_mode, NavigationMode::ScreenLevel);
}

#[test]
fn test_status_line_tracks_screen_switches() {
    let mut app = App::new();
    assert_eq!(app.state.status.text, "Welcome to Aura Admin");
    assert_eq!(app.state.status.level, StatusLevel::Info);

    press(&mut app, Event::Tab);
    assert_eq!(app.state.status.text, "Event Management");

    press(&mut app, Event::Char('8'));
    assert_eq!(app.state.status.text, "Video Call Settings");

    // Within-screen switches update it the same way
    press(&mut app, Event::Char('2'));
    press(&mut app, Event::Enter);
    press(&mut app, Event::Tab);
    assert_eq!(app.state.current_screen, Screen::Games);
    assert_eq!(app.state.status.text, "Game Management");
}
