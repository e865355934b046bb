//! Header surfaces driven through application routing
//!
//! The header's menus and modals sit above both navigation layers, so
//! these tests check the hand-off: clicks reach the bell and account
//! trigger first, open surfaces hold shortcuts captive, and the
//! settings and logout entries land back in the shell.

use aura_admin::app::{App, NavigationMode, Screen};
use aura_admin::events::Event;
use aura_admin::render_ui;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn press(app: &mut App, event: Event) {
    app.handle_event(event).expect("event routing failed");
}

/// Render once at 100x32. The header bell box spans x 78..86 and the
/// account box x 86..100 on row band 0..3.
fn draw(app: &mut App) {
    let backend = TestBackend::new(100, 32);
    let mut terminal = Terminal::new(backend).expect("test terminal");
    terminal
        .draw(|frame| render_ui(frame, app).expect("render failed"))
        .expect("draw failed");
}

fn click(column: u16, row: u16) -> Event {
    Event::Click { column, row }
}

#[test]
fn test_notifications_capture_screen_shortcuts_until_closed() {
    let mut app = App::new();
    press(&mut app, Event::Char('2'));
    draw(&mut app);

    press(&mut app, click(80, 1));
    assert!(app.state.header.notifications_open());
    assert_eq!(app.store.unread_notifications(), 2);

    // Number shortcuts stop at the open panel
    press(&mut app, Event::Char('3'));
    assert_eq!(app.state.current_screen, Screen::Events);
    assert!(app.state.header.notifications_open());

    press(&mut app, Event::Char('a'));
    assert_eq!(app.store.unread_notifications(), 0);

    press(&mut app, Event::Escape);
    assert!(!app.state.header.notifications_open());
    press(&mut app, Event::Char('3'));
    assert_eq!(app.state.current_screen, Screen::Games);
}

#[test]
fn test_notification_selection_marks_single_read() {
    let mut app = App::new();
    draw(&mut app);

    press(&mut app, click(80, 1));
    press(&mut app, Event::Down);
    press(&mut app, Event::Enter);

    assert!(app.store.notifications[1].read);
    assert!(
        !app.store.notifications[0].read,
        "only the selected entry is marked"
    );
    assert_eq!(app.store.unread_notifications(), 1);
}

#[test]
fn test_account_menu_settings_entry_switches_to_settings() {
    let mut app = App::new();
    draw(&mut app);

    press(&mut app, click(90, 1));
    assert!(app.state.header.account_menu_open());

    // Settings is the first activatable row, already highlighted
    press(&mut app, Event::Enter);

    assert!(!app.state.header.account_menu_open());
    assert_eq!(app.state.current_screen, Screen::Settings);
    assert_eq!(app.state.navigation_mode, NavigationMode::WithinScreen);
    assert_eq!(app.state.status.text, "Video Call Settings");
}

#[test]
fn test_logout_confirmation_quits_the_app() {
    let mut app = App::new();
    draw(&mut app);

    press(&mut app, click(90, 1));
    press(&mut app, Event::Down);
    press(&mut app, Event::Enter);
    assert!(app.state.header.logout_open());

    press(&mut app, Event::Right);
    let quit = app.handle_event(Event::Enter).expect("event routing failed");

    assert!(quit, "a confirmed logout must stop the event loop");
    assert!(app.state.should_quit);
    assert_eq!(app.state.status.text, "Logged out");
}

#[test]
fn test_logout_default_no_resumes_the_session() {
    let mut app = App::new();
    draw(&mut app);

    press(&mut app, click(90, 1));
    press(&mut app, Event::Down);
    press(&mut app, Event::Enter);
    assert!(app.state.header.logout_open());

    // No is focused first, so a bare Enter declines
    let quit = app.handle_event(Event::Enter).expect("event routing failed");
    assert!(!quit);
    assert!(!app.state.header.logout_open());
    assert!(!app.state.should_quit);

    press(&mut app, Event::Tab);
    assert_eq!(app.state.current_screen, Screen::Events);
}

#[test]
fn test_header_subscriptions_balance_after_full_tour() {
    let mut app = App::new();
    draw(&mut app);

    press(&mut app, click(80, 1));
    press(&mut app, Event::Escape);
    press(&mut app, click(90, 1));
    press(&mut app, Event::Escape);
    press(&mut app, click(90, 1));
    press(&mut app, Event::Down);
    press(&mut app, Event::Enter);
    press(&mut app, Event::Enter);

    assert_eq!(app.state.header.subscription_count(), 0);
    assert!(app.state.header.subscriptions_balanced());
}
