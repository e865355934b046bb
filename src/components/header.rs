//! Application header
//!
//! Greeting and screen title on the left, the notification bell and the
//! account menu on the right. The bell opens the notifications modal and
//! the account menu carries Settings and Log Out. Opening either modal
//! closes the account menu first, inside the trigger's wrapped action, so
//! the menu never lingers under a modal backdrop.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::components::dialog::{Dialog, DialogContent, DialogTrigger, OpenRequest};
use crate::components::dropdown::{
    DropdownMenu, MenuAlign, MenuContent, MenuEntry, MenuResponse, MenuTrigger,
};
use crate::data::store::DataStore;
use crate::events::Event;

/// Lines each notification occupies in the modal list
const NOTIFICATION_ROWS: u16 = 3;

/// Outcome of routing one event through the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderResponse {
    /// Event did not concern the header; keep routing it
    NotHandled,
    /// Event was consumed
    Handled,
    /// The Settings menu item was activated
    OpenSettings,
    /// Log out was confirmed
    LoggedOut,
}

/// Header chrome state: one account menu and two controlled modals.
#[derive(Debug)]
pub struct HeaderState {
    greeting: String,
    account_menu: DropdownMenu,
    account_trigger: MenuTrigger,
    account_content: MenuContent,
    notifications: Dialog,
    notifications_open: bool,
    notifications_content: DialogContent,
    bell: DialogTrigger,
    notif_selected: usize,
    notif_list_area: Option<Rect>,
    logout: Dialog,
    logout_open: bool,
    logout_content: DialogContent,
    /// Which confirm button is focused; starts on No
    logout_yes: bool,
    logout_no_area: Option<Rect>,
    logout_yes_area: Option<Rect>,
}

impl HeaderState {
    pub fn new() -> Self {
        let account_menu = DropdownMenu::new().aligned(MenuAlign::End);
        let account_trigger = MenuTrigger::new("Sabbir").in_scope(account_menu.scope());
        let account_content = MenuContent::new(vec![
            MenuEntry::label("Account"),
            MenuEntry::separator(),
            MenuEntry::item("settings", "Settings"),
            MenuEntry::item("logout", "Log Out"),
        ])
        .in_scope(account_menu.scope())
        .with_width(24);

        let notifications = Dialog::controlled(false);
        let notifications_content = DialogContent::new()
            .in_scope(notifications.scope())
            .with_title("Notifications")
            .with_description("See all recent activity")
            .sized(50, 60);
        let bell = DialogTrigger::new("🔔").in_scope(notifications.scope());

        let logout = Dialog::controlled(false);
        let logout_content = DialogContent::new()
            .in_scope(logout.scope())
            .with_title("Confirm Logout")
            .sized(40, 30);

        Self {
            greeting: "Sabbir".to_string(),
            account_menu,
            account_trigger,
            account_content,
            notifications,
            notifications_open: false,
            notifications_content,
            bell,
            notif_selected: 0,
            notif_list_area: None,
            logout,
            logout_open: false,
            logout_content,
            logout_yes: false,
            logout_no_area: None,
            logout_yes_area: None,
        }
    }

    pub fn account_menu_open(&self) -> bool {
        self.account_menu.is_open()
    }

    pub fn notifications_open(&self) -> bool {
        self.notifications_open
    }

    pub fn logout_open(&self) -> bool {
        self.logout_open
    }

    /// Whether any header surface currently captures input.
    pub fn has_capture(&self) -> bool {
        self.account_menu.is_open() || self.notifications_open || self.logout_open
    }

    /// Held global subscriptions across the menu and both modals.
    pub fn subscription_count(&self) -> u64 {
        self.account_menu.subscription_count()
            + self.notifications.subscription_count()
            + self.logout.subscription_count()
    }

    pub fn subscriptions_balanced(&self) -> bool {
        self.account_menu.subscriptions_balanced()
            && self.notifications.subscriptions_balanced()
            && self.logout.subscriptions_balanced()
    }

    /// Route one event through the header. Open modals take priority and
    /// swallow whatever they do not recognize.
    pub fn handle_event(&mut self, event: &Event, store: &mut DataStore) -> HeaderResponse {
        if self.logout_open {
            return self.handle_logout_event(event);
        }
        if self.notifications_open {
            return self.handle_notifications_event(event, store);
        }

        if let Event::Click { column, row } = event {
            if self.bell.hit(*column, *row) {
                // The wrapped action closes the account menu before the
                // open request is issued
                let Self {
                    bell,
                    notifications,
                    account_menu,
                    ..
                } = self;
                bell.activate(notifications, || account_menu.close());
                self.apply_notification_requests();
                return HeaderResponse::Handled;
            }
        }

        match self
            .account_menu
            .handle_event(event, &self.account_trigger, &self.account_content)
        {
            MenuResponse::Activated(id) => match id.as_str() {
                "settings" => HeaderResponse::OpenSettings,
                "logout" => {
                    self.account_menu.close();
                    self.set_logout_open(true);
                    HeaderResponse::Handled
                }
                _ => HeaderResponse::Handled,
            },
            MenuResponse::NotHandled => HeaderResponse::NotHandled,
            _ => HeaderResponse::Handled,
        }
    }

    fn handle_logout_event(&mut self, event: &Event) -> HeaderResponse {
        match event {
            Event::Left | Event::Right | Event::Tab | Event::BackTab => {
                self.logout_yes = !self.logout_yes;
                HeaderResponse::Handled
            }
            Event::Enter => {
                let confirmed = self.logout_yes;
                self.set_logout_open(false);
                if confirmed {
                    HeaderResponse::LoggedOut
                } else {
                    HeaderResponse::Handled
                }
            }
            Event::Click { column, row } => {
                if rect_hit(self.logout_yes_area, *column, *row) {
                    self.set_logout_open(false);
                    return HeaderResponse::LoggedOut;
                }
                if rect_hit(self.logout_no_area, *column, *row) {
                    self.set_logout_open(false);
                    return HeaderResponse::Handled;
                }
                self.logout.handle_event(event);
                self.apply_logout_requests();
                HeaderResponse::Handled
            }
            Event::Escape => {
                self.logout.handle_event(event);
                self.apply_logout_requests();
                HeaderResponse::Handled
            }
            _ => HeaderResponse::Handled,
        }
    }

    fn handle_notifications_event(
        &mut self,
        event: &Event,
        store: &mut DataStore,
    ) -> HeaderResponse {
        match event {
            Event::Up => {
                self.notif_selected = self.notif_selected.saturating_sub(1);
                HeaderResponse::Handled
            }
            Event::Down => {
                let last = store.notifications.len().saturating_sub(1);
                self.notif_selected = (self.notif_selected + 1).min(last);
                HeaderResponse::Handled
            }
            Event::Enter => {
                if let Some(notification) = store.notifications.get(self.notif_selected) {
                    let id = notification.id.clone();
                    store.mark_notification_read(&id);
                }
                HeaderResponse::Handled
            }
            Event::Char('a') => {
                store.mark_all_notifications_read();
                HeaderResponse::Handled
            }
            Event::Click { column, row } => {
                if let Some(index) = self.notification_at(*column, *row, store.notifications.len())
                {
                    let id = store.notifications[index].id.clone();
                    store.mark_notification_read(&id);
                } else {
                    self.notifications.handle_event(event);
                    self.apply_notification_requests();
                }
                HeaderResponse::Handled
            }
            Event::Escape => {
                self.notifications.handle_event(event);
                self.apply_notification_requests();
                HeaderResponse::Handled
            }
            _ => HeaderResponse::Handled,
        }
    }

    fn notification_at(&self, column: u16, row: u16, len: usize) -> Option<usize> {
        let area = self.notif_list_area?;
        if column < area.x
            || column >= area.x.saturating_add(area.width)
            || row < area.y
            || row >= area.y.saturating_add(area.height)
        {
            return None;
        }
        let index = ((row - area.y) / NOTIFICATION_ROWS) as usize;
        (index < len).then_some(index)
    }

    fn set_logout_open(&mut self, open: bool) {
        if self.logout_open == open {
            return;
        }
        self.logout_open = open;
        self.logout.sync_open(open);
        if open {
            self.logout_yes = false;
        } else {
            self.logout_no_area = None;
            self.logout_yes_area = None;
        }
    }

    fn set_notifications_open(&mut self, open: bool) {
        if self.notifications_open == open {
            return;
        }
        self.notifications_open = open;
        self.notifications.sync_open(open);
        if open {
            self.notif_selected = 0;
        } else {
            self.notif_list_area = None;
        }
    }

    fn apply_logout_requests(&mut self) {
        let mut open = self.logout_open;
        for request in self.logout.take_requests() {
            open = matches!(request, OpenRequest::Open);
        }
        self.set_logout_open(open);
    }

    fn apply_notification_requests(&mut self) {
        let mut open = self.notifications_open;
        for request in self.notifications.take_requests() {
            open = matches!(request, OpenRequest::Open);
        }
        self.set_notifications_open(open);
    }
}

impl Default for HeaderState {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the header bar: greeting, bell, account trigger.
pub fn render_header(
    f: &mut Frame,
    header: &mut HeaderState,
    store: &DataStore,
    screen_title: &str,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Length(14),
        ])
        .split(area);

    let greeting = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Hello, {}", header.greeting),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {screen_title}"),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Aura Admin")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(greeting, chunks[0]);

    let unread = store.unread_notifications();
    if unread > 0 {
        header.bell.set_label(format!("🔔 {unread}"));
    } else {
        header.bell.set_label("🔔");
    }
    header.bell.render(f, chunks[1], false);

    let account_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = account_block.inner(chunks[2]);
    f.render_widget(account_block, chunks[2]);
    let open = header.account_menu.is_open();
    header.account_trigger.render(f, inner, open);
}

/// Render the header's floating surfaces: menu content and both modals.
/// Call after the screen body so the overlays draw on top.
pub fn render_header_overlays(f: &mut Frame, header: &mut HeaderState, store: &DataStore) {
    let viewport = f.area();

    header.account_content.render(f, &header.account_menu);

    if let Some(body) = header
        .notifications_content
        .render(f, &mut header.notifications, viewport)
    {
        render_notification_list(f, header, store, body);
    }

    if let Some(body) = header.logout_content.render(f, &mut header.logout, viewport) {
        render_logout_body(f, header, body);
    }
}

fn render_notification_list(f: &mut Frame, header: &mut HeaderState, store: &DataStore, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(body);

    if store.notifications.is_empty() {
        let empty = Paragraph::new("No notifications")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        f.render_widget(empty, chunks[0]);
    } else {
        let mut lines = Vec::new();
        for (i, notification) in store.notifications.iter().enumerate() {
            let marker = if i == header.notif_selected { "> " } else { "  " };
            let mut title_spans = vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(
                    notification.title.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ];
            if !notification.read {
                title_spans.push(Span::styled(
                    " [New]",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ));
            }
            lines.push(Line::from(title_spans));
            lines.push(Line::from(Span::styled(
                format!("    {} ({})", notification.description, notification.time),
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::from(""));
        }
        f.render_widget(Paragraph::new(lines), chunks[0]);
    }
    header.notif_list_area = Some(chunks[0]);

    let footer = Paragraph::new("[Enter] mark read  [a] mark all read  [Esc] close")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, chunks[1]);
}

fn render_logout_body(f: &mut Frame, header: &mut HeaderState, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(3)])
        .split(body);

    let question = Paragraph::new("Do you want to Logout?")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center);
    f.render_widget(question, chunks[0]);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_confirm_button(f, buttons[0], "No", !header.logout_yes);
    render_confirm_button(f, buttons[1], "Yes", header.logout_yes);
    header.logout_no_area = Some(buttons[0]);
    header.logout_yes_area = Some(buttons[1]);
}

fn render_confirm_button(f: &mut Frame, area: Rect, label: &str, focused: bool) {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let button = Paragraph::new(label)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(button, area);
}

fn rect_hit(area: Option<Rect>, column: u16, row: u16) -> bool {
    match area {
        Some(area) => {
            column >= area.x
                && column < area.x.saturating_add(area.width)
                && row >= area.y
                && row < area.y.saturating_add(area.height)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    /// Header rendered once at 80x24 so trigger rectangles are populated.
    /// Bell box spans x 58..66, account box x 66..80 on row band 0..3.
    fn rendered() -> (HeaderState, DataStore) {
        let mut header = HeaderState::new();
        let store = DataStore::seeded();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                render_header(f, &mut header, &store, "DASHBOARD", Rect::new(0, 0, 80, 3));
            })
            .unwrap();
        (header, store)
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Click { column, row }
    }

    #[test]
    fn test_account_menu_toggles_and_dismisses_outside() {
        let (mut header, mut store) = rendered();

        assert_eq!(
            header.handle_event(&click(70, 1), &mut store),
            HeaderResponse::Handled
        );
        assert!(header.account_menu_open());
        assert_eq!(header.subscription_count(), 1);

        // Click far from trigger and content dismisses
        assert_eq!(
            header.handle_event(&click(5, 15), &mut store),
            HeaderResponse::Handled
        );
        assert!(!header.account_menu_open());
        assert_eq!(header.subscription_count(), 0);
    }

    #[test]
    fn test_settings_item_reports_open_settings() {
        let (mut header, mut store) = rendered();
        header.handle_event(&click(70, 1), &mut store);

        // Highlight opens on Settings, the first activatable row
        let response = header.handle_event(&Event::Enter, &mut store);
        assert_eq!(response, HeaderResponse::OpenSettings);
        assert!(!header.account_menu_open());
    }

    #[test]
    fn test_logout_item_closes_menu_before_modal_opens() {
        let (mut header, mut store) = rendered();
        header.handle_event(&click(70, 1), &mut store);
        header.handle_event(&Event::Down, &mut store);
        let response = header.handle_event(&Event::Enter, &mut store);

        assert_eq!(response, HeaderResponse::Handled);
        assert!(!header.account_menu_open());
        assert!(header.logout_open());
        // Exactly the modal holds interest; the menu released its own
        assert_eq!(header.subscription_count(), 1);
    }

    #[test]
    fn test_logout_confirm_no_then_yes() {
        let (mut header, mut store) = rendered();
        header.set_logout_open(true);

        // No is focused first; Enter declines
        assert_eq!(
            header.handle_event(&Event::Enter, &mut store),
            HeaderResponse::Handled
        );
        assert!(!header.logout_open());

        header.set_logout_open(true);
        header.handle_event(&Event::Right, &mut store);
        assert_eq!(
            header.handle_event(&Event::Enter, &mut store),
            HeaderResponse::LoggedOut
        );
        assert!(!header.logout_open());
        assert!(header.subscriptions_balanced());
    }

    #[test]
    fn test_bell_closes_account_menu_before_notifications_open() {
        let (mut header, mut store) = rendered();
        header.handle_event(&click(70, 1), &mut store);
        assert!(header.account_menu_open());

        header.handle_event(&click(60, 1), &mut store);
        assert!(!header.account_menu_open());
        assert!(header.notifications_open());
        assert_eq!(header.subscription_count(), 1);
    }

    #[test]
    fn test_notifications_mark_read_flow() {
        let (mut header, mut store) = rendered();
        header.handle_event(&click(60, 1), &mut store);
        assert_eq!(store.unread_notifications(), 2);

        header.handle_event(&Event::Enter, &mut store);
        assert_eq!(store.unread_notifications(), 1);

        header.handle_event(&Event::Char('a'), &mut store);
        assert_eq!(store.unread_notifications(), 0);

        header.handle_event(&Event::Escape, &mut store);
        assert!(!header.notifications_open());
        assert!(header.subscriptions_balanced());
    }

    #[test]
    fn test_open_modal_swallows_unrelated_keys() {
        let (mut header, mut store) = rendered();
        header.set_logout_open(true);
        assert_eq!(
            header.handle_event(&Event::Char('x'), &mut store),
            HeaderResponse::Handled
        );
        assert!(header.logout_open());
    }

    #[test]
    fn test_escape_on_idle_header_is_not_handled() {
        let (mut header, mut store) = rendered();
        assert_eq!(
            header.handle_event(&Event::Escape, &mut store),
            HeaderResponse::NotHandled
        );
    }
}
