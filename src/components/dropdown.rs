//! Dropdown menu primitive
//!
//! A popover menu anchored below a trigger. The open bit is always owned by
//! the menu itself. On the closed-to-open transition the content position is
//! computed once from the trigger's on-screen box (top = trigger bottom +
//! fixed gap, horizontal alignment start/end/center); it is not recomputed
//! while the menu stays open.
//!
//! Dismissal while open: Escape, a click that lands neither on the trigger
//! nor inside the content, or activating an item. Hosts that need to close
//! the menu before running a follow-up action call [`DropdownMenu::close`]
//! directly. Global event interest is held only while open and released on
//! every exit path.

use std::sync::atomic::{AtomicU64, Ordering};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::components::listener::ListenerGuard;
use crate::events::Event;

static NEXT_MENU_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Horizontal alignment of the content relative to the trigger box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuAlign {
    /// Content's left edge on the trigger's left edge
    #[default]
    Start,
    /// Content's right edge on the trigger's right edge
    End,
    /// Content centered on the trigger
    Center,
}

/// One row of menu content
#[derive(Debug, Clone, PartialEq)]
pub enum MenuEntry {
    /// Activatable row; activation closes the menu and reports the id
    Item { id: String, label: String },
    /// Non-interactive heading
    Label(String),
    /// Non-interactive divider
    Separator,
}

impl MenuEntry {
    pub fn item(id: impl Into<String>, label: impl Into<String>) -> Self {
        MenuEntry::Item {
            id: id.into(),
            label: label.into(),
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        MenuEntry::Label(text.into())
    }

    pub fn separator() -> Self {
        MenuEntry::Separator
    }

    fn is_activatable(&self) -> bool {
        matches!(self, MenuEntry::Item { .. })
    }
}

/// Outcome of routing one event through a menu
#[derive(Debug, Clone, PartialEq)]
pub enum MenuResponse {
    /// Event did not concern this menu; keep routing it
    NotHandled,
    /// Menu opened
    Opened,
    /// Menu closed (toggle, Escape, or outside click)
    Closed,
    /// An item was activated; the menu has already closed
    Activated(String),
    /// Event was consumed without a state change (click inside content on a
    /// non-dismissing row, or highlight movement)
    Handled,
}

/// Proof that a sub-element was composed inside a specific menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownScope {
    instance: u64,
}

/// Popover menu state; open/closed is always self-owned
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownMenu {
    instance: u64,
    open: bool,
    align: MenuAlign,
    gap: u16,
    /// Content rectangle fixed at the moment of opening
    anchor: Option<Rect>,
    highlighted: Option<usize>,
    listeners: ListenerGuard,
}

impl DropdownMenu {
    pub fn new() -> Self {
        Self {
            instance: NEXT_MENU_INSTANCE.fetch_add(1, Ordering::Relaxed),
            open: false,
            align: MenuAlign::Start,
            gap: 0,
            anchor: None,
            highlighted: None,
            listeners: ListenerGuard::new(),
        }
    }

    pub fn aligned(mut self, align: MenuAlign) -> Self {
        self.align = align;
        self
    }

    /// Rows between the trigger's bottom edge and the content's top edge.
    pub fn with_gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    /// Scope handle for wiring a trigger and content to this menu.
    pub fn scope(&self) -> DropdownScope {
        DropdownScope {
            instance: self.instance,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Content rectangle while open; None while closed.
    pub fn anchor_rect(&self) -> Option<Rect> {
        self.anchor
    }

    /// Index of the keyboard-highlighted entry while open.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Count of currently held global subscriptions: 1 while open, 0 closed.
    pub fn subscription_count(&self) -> u64 {
        self.listeners.held_count()
    }

    /// Acquire/release pairs over the menu's lifetime are balanced.
    pub fn subscriptions_balanced(&self) -> bool {
        self.listeners.is_balanced()
    }

    /// Toggle open/closed from the trigger. The anchor is computed here,
    /// exactly once per open period.
    pub fn toggle(&mut self, trigger: &MenuTrigger, content: &MenuContent) {
        self.expect_scope(trigger.scope, "MenuTrigger");
        self.expect_scope(content.scope, "MenuContent");
        if self.open {
            self.dismiss();
        } else if let Some(trigger_area) = trigger.area {
            let height = content.height();
            self.anchor = Some(anchored_rect(
                trigger_area,
                self.align,
                self.gap,
                content.width,
                height,
            ));
            self.highlighted = content.first_activatable();
            self.open = true;
            self.listeners.acquire();
        }
    }

    /// Programmatic close; the public API hosts use instead of simulating
    /// an outside click.
    pub fn close(&mut self) {
        self.dismiss();
    }

    /// Route one event through the menu.
    ///
    /// A click on the trigger toggles and is fully consumed, so the same
    /// dispatch can never also count as an outside click. While open, a
    /// click inside the content activates items and is swallowed on
    /// non-interactive rows; any other click dismisses the menu. Escape
    /// dismisses while open and is a no-op while closed.
    pub fn handle_event(
        &mut self,
        event: &Event,
        trigger: &MenuTrigger,
        content: &MenuContent,
    ) -> MenuResponse {
        self.expect_scope(trigger.scope, "MenuTrigger");
        self.expect_scope(content.scope, "MenuContent");
        match event {
            Event::Click { column, row } => {
                if trigger.hit(*column, *row) {
                    let was_open = self.open;
                    self.toggle(trigger, content);
                    return if was_open {
                        MenuResponse::Closed
                    } else {
                        MenuResponse::Opened
                    };
                }
                if !self.open {
                    return MenuResponse::NotHandled;
                }
                match self.entry_at(*column, *row, content) {
                    Some(index) => match &content.entries[index] {
                        MenuEntry::Item { id, .. } => {
                            let id = id.clone();
                            self.dismiss();
                            MenuResponse::Activated(id)
                        }
                        _ => MenuResponse::Handled,
                    },
                    None if self.content_contains(*column, *row) => MenuResponse::Handled,
                    None => {
                        self.dismiss();
                        MenuResponse::Closed
                    }
                }
            }
            Event::Escape => {
                if self.open {
                    self.dismiss();
                    MenuResponse::Closed
                } else {
                    MenuResponse::NotHandled
                }
            }
            Event::Up if self.open => {
                self.move_highlight_up(content);
                MenuResponse::Handled
            }
            Event::Down if self.open => {
                self.move_highlight_down(content);
                MenuResponse::Handled
            }
            Event::Enter if self.open => match self.highlighted {
                Some(index) => match &content.entries[index] {
                    MenuEntry::Item { id, .. } => {
                        let id = id.clone();
                        self.dismiss();
                        MenuResponse::Activated(id)
                    }
                    _ => MenuResponse::Handled,
                },
                None => MenuResponse::Handled,
            },
            _ => MenuResponse::NotHandled,
        }
    }

    /// Whether a terminal cell lies inside the open content box.
    pub fn content_contains(&self, column: u16, row: u16) -> bool {
        match self.anchor {
            Some(anchor) => {
                column >= anchor.x
                    && column < anchor.x.saturating_add(anchor.width)
                    && row >= anchor.y
                    && row < anchor.y.saturating_add(anchor.height)
            }
            None => false,
        }
    }

    fn entry_at(&self, column: u16, row: u16, content: &MenuContent) -> Option<usize> {
        let anchor = self.anchor?;
        if !self.content_contains(column, row) {
            return None;
        }
        // First content row sits below the top border
        if row <= anchor.y || column <= anchor.x {
            return None;
        }
        let index = (row - anchor.y - 1) as usize;
        if index < content.entries.len() && column < anchor.x + anchor.width.saturating_sub(1) {
            Some(index)
        } else {
            None
        }
    }

    fn move_highlight_up(&mut self, content: &MenuContent) {
        if let Some(current) = self.highlighted {
            if let Some(previous) = content.entries[..current]
                .iter()
                .rposition(|entry| entry.is_activatable())
            {
                self.highlighted = Some(previous);
            }
        }
    }

    fn move_highlight_down(&mut self, content: &MenuContent) {
        if let Some(current) = self.highlighted {
            if let Some(offset) = content.entries[current + 1..]
                .iter()
                .position(|entry| entry.is_activatable())
            {
                self.highlighted = Some(current + 1 + offset);
            }
        }
    }

    fn dismiss(&mut self) {
        if self.open {
            self.open = false;
            self.anchor = None;
            self.highlighted = None;
            self.listeners.release();
        }
    }

    fn expect_scope(&self, scope: Option<DropdownScope>, element: &str) {
        match scope {
            None => panic!("{element} used outside its DropdownMenu scope; build it with in_scope()"),
            Some(scope) if scope.instance != self.instance => {
                panic!("{element} is attached to a different DropdownMenu instance")
            }
            Some(_) => {}
        }
    }
}

impl Default for DropdownMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DropdownMenu {
    fn drop(&mut self) {
        // Dropping while open is an exit path like any other
        self.listeners.release();
    }
}

/// Clickable element that toggles a menu open and closed
#[derive(Debug, Clone)]
pub struct MenuTrigger {
    label: String,
    scope: Option<DropdownScope>,
    /// Trigger rectangle recorded at last render, used for hit testing and
    /// as the anchor source at open time
    area: Option<Rect>,
}

impl MenuTrigger {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            scope: None,
            area: None,
        }
    }

    /// Attach the trigger to a menu. Routing events through a trigger that
    /// was never attached is a programmer error and panics.
    pub fn in_scope(mut self, scope: DropdownScope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether a terminal cell lies inside the last rendered trigger.
    pub fn hit(&self, column: u16, row: u16) -> bool {
        match self.area {
            Some(area) => {
                column >= area.x
                    && column < area.x.saturating_add(area.width)
                    && row >= area.y
                    && row < area.y.saturating_add(area.height)
            }
            None => false,
        }
    }

    /// Draw the trigger and record its rectangle.
    pub fn render(&mut self, f: &mut Frame, area: Rect, open: bool) {
        let style = if open {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let caret = if open { "▴" } else { "▾" };
        let text = Paragraph::new(Line::from(vec![
            Span::styled(self.label.clone(), style),
            Span::styled(format!(" {caret}"), Style::default().fg(Color::DarkGray)),
        ]));
        f.render_widget(text, area);
        self.area = Some(area);
    }
}

/// Menu rows plus the fixed content width
#[derive(Debug, Clone)]
pub struct MenuContent {
    scope: Option<DropdownScope>,
    entries: Vec<MenuEntry>,
    width: u16,
}

impl MenuContent {
    pub fn new(entries: Vec<MenuEntry>) -> Self {
        Self {
            scope: None,
            entries,
            width: 24,
        }
    }

    /// Attach the content to a menu. Rendering content that was never
    /// attached is a programmer error and panics.
    pub fn in_scope(mut self, scope: DropdownScope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Replace the rows (e.g. a notifications feed that grows).
    pub fn set_entries(&mut self, entries: Vec<MenuEntry>) {
        self.entries = entries;
    }

    fn height(&self) -> u16 {
        self.entries.len() as u16 + 2
    }

    fn first_activatable(&self) -> Option<usize> {
        self.entries.iter().position(|entry| entry.is_activatable())
    }

    /// Draw the content at the menu's anchor. Renders nothing while closed.
    pub fn render(&self, f: &mut Frame, menu: &DropdownMenu) {
        menu.expect_scope(self.scope, "MenuContent");
        let Some(anchor) = menu.anchor else {
            return;
        };
        let area = anchor.intersection(f.area());
        if area.width == 0 || area.height == 0 {
            return;
        }

        f.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let lines: Vec<Line> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| match entry {
                MenuEntry::Item { label, .. } => {
                    if menu.highlighted == Some(i) {
                        Line::from(Span::styled(
                            format!("{label:<width$}", width = inner.width as usize),
                            Style::default()
                                .fg(Color::Black)
                                .bg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        ))
                    } else {
                        Line::from(Span::styled(label.clone(), Style::default().fg(Color::White)))
                    }
                }
                MenuEntry::Label(text) => Line::from(Span::styled(
                    text.clone(),
                    Style::default()
                        .fg(Color::Gray)
                        .add_modifier(Modifier::BOLD),
                )),
                MenuEntry::Separator => Line::from(Span::styled(
                    "─".repeat(inner.width as usize),
                    Style::default().fg(Color::DarkGray),
                )),
            })
            .collect();

        f.render_widget(Paragraph::new(lines), inner);
    }
}

/// Content rectangle derived from the trigger box at open time: top edge a
/// fixed gap below the trigger, horizontal placement per the alignment.
pub fn anchored_rect(trigger: Rect, align: MenuAlign, gap: u16, width: u16, height: u16) -> Rect {
    let y = trigger.y.saturating_add(trigger.height).saturating_add(gap);
    let x = match align {
        MenuAlign::Start => trigger.x,
        MenuAlign::End => trigger
            .x
            .saturating_add(trigger.width)
            .saturating_sub(width),
        MenuAlign::Center => trigger
            .x
            .saturating_add(trigger.width / 2)
            .saturating_sub(width / 2),
    };
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (DropdownMenu, MenuTrigger, MenuContent) {
        let menu = DropdownMenu::new().aligned(MenuAlign::End);
        let mut trigger = MenuTrigger::new("admin").in_scope(menu.scope());
        trigger.area = Some(Rect::new(60, 1, 10, 1));
        let content = MenuContent::new(vec![
            MenuEntry::label("My Account"),
            MenuEntry::separator(),
            MenuEntry::item("profile", "Profile"),
            MenuEntry::item("settings", "Settings"),
            MenuEntry::separator(),
            MenuEntry::item("logout", "Log out"),
        ])
        .in_scope(menu.scope());
        (menu, trigger, content)
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Click { column, row }
    }

    #[test]
    fn test_trigger_click_toggles_without_self_close() {
        let (mut menu, trigger, content) = fixture();

        // Opening click is consumed entirely; the same dispatch can never
        // also be seen as an outside click
        let response = menu.handle_event(&click(62, 1), &trigger, &content);
        assert_eq!(response, MenuResponse::Opened);
        assert!(menu.is_open());
        assert_eq!(menu.subscription_count(), 1);

        let response = menu.handle_event(&click(62, 1), &trigger, &content);
        assert_eq!(response, MenuResponse::Closed);
        assert!(!menu.is_open());
        assert_eq!(menu.subscription_count(), 0);
    }

    #[test]
    fn test_anchor_computed_once_per_open() {
        let (mut menu, mut trigger, content) = fixture();
        menu.toggle(&trigger, &content);
        let anchor = menu.anchor_rect().expect("open menu has an anchor");

        // Trigger moves while the menu is open; the anchor must not follow
        trigger.area = Some(Rect::new(10, 5, 10, 1));
        assert_eq!(menu.anchor_rect(), Some(anchor));

        // A fresh open recomputes from the new trigger box
        menu.close();
        assert!(menu.anchor_rect().is_none());
        menu.toggle(&trigger, &content);
        let reopened = menu.anchor_rect().expect("anchor after reopen");
        assert_ne!(reopened, anchor);
        assert_eq!(reopened.y, 5 + 1);
    }

    #[test]
    fn test_alignment_math() {
        let trigger = Rect::new(40, 2, 10, 1);

        let start = anchored_rect(trigger, MenuAlign::Start, 0, 24, 8);
        assert_eq!((start.x, start.y), (40, 3));

        let end = anchored_rect(trigger, MenuAlign::End, 0, 24, 8);
        assert_eq!((end.x, end.y), (50 - 24, 3));

        let center = anchored_rect(trigger, MenuAlign::Center, 0, 24, 8);
        assert_eq!((center.x, center.y), (45 - 12, 3));

        let gapped = anchored_rect(trigger, MenuAlign::Start, 1, 24, 8);
        assert_eq!(gapped.y, 4);
    }

    #[test]
    fn test_outside_click_closes_inside_click_does_not() {
        let (mut menu, trigger, content) = fixture();
        menu.toggle(&trigger, &content);
        let anchor = menu.anchor_rect().unwrap();

        // Click on the label row: inside content, non-dismissing
        let label_row = anchor.y + 1;
        let response = menu.handle_event(&click(anchor.x + 2, label_row), &trigger, &content);
        assert_eq!(response, MenuResponse::Handled);
        assert!(menu.is_open());

        // Click far away from trigger and content: dismisses
        let response = menu.handle_event(&click(1, 20), &trigger, &content);
        assert_eq!(response, MenuResponse::Closed);
        assert!(!menu.is_open());
        assert!(menu.subscriptions_balanced());
    }

    #[test]
    fn test_item_click_activates_and_closes() {
        let (mut menu, trigger, content) = fixture();
        menu.toggle(&trigger, &content);
        let anchor = menu.anchor_rect().unwrap();

        // Entries: 0 label, 1 separator, 2 profile, 3 settings, 4 sep, 5 logout
        let logout_row = anchor.y + 1 + 5;
        let response = menu.handle_event(&click(anchor.x + 2, logout_row), &trigger, &content);
        assert_eq!(response, MenuResponse::Activated("logout".to_string()));
        assert!(!menu.is_open());
    }

    #[test]
    fn test_escape_closes_open_menu_and_is_noop_closed() {
        let (mut menu, trigger, content) = fixture();

        assert_eq!(
            menu.handle_event(&Event::Escape, &trigger, &content),
            MenuResponse::NotHandled
        );

        menu.toggle(&trigger, &content);
        assert_eq!(
            menu.handle_event(&Event::Escape, &trigger, &content),
            MenuResponse::Closed
        );
        assert!(!menu.is_open());
        assert_eq!(
            menu.handle_event(&Event::Escape, &trigger, &content),
            MenuResponse::NotHandled
        );
    }

    #[test]
    fn test_keyboard_highlight_skips_decoration() {
        let (mut menu, trigger, content) = fixture();
        menu.toggle(&trigger, &content);

        // Opens on the first activatable entry (index 2, after label + sep)
        assert_eq!(menu.highlighted(), Some(2));

        menu.handle_event(&Event::Down, &trigger, &content);
        assert_eq!(menu.highlighted(), Some(3));
        menu.handle_event(&Event::Down, &trigger, &content);
        assert_eq!(menu.highlighted(), Some(5));
        // Bottom of the list: stays put
        menu.handle_event(&Event::Down, &trigger, &content);
        assert_eq!(menu.highlighted(), Some(5));

        menu.handle_event(&Event::Up, &trigger, &content);
        assert_eq!(menu.highlighted(), Some(3));

        let response = menu.handle_event(&Event::Enter, &trigger, &content);
        assert_eq!(response, MenuResponse::Activated("settings".to_string()));
    }

    #[test]
    fn test_two_menus_are_independent() {
        let (mut first, first_trigger, first_content) = fixture();
        let mut second = DropdownMenu::new();
        let mut second_trigger = MenuTrigger::new("bell").in_scope(second.scope());
        second_trigger.area = Some(Rect::new(40, 1, 4, 1));
        let second_content =
            MenuContent::new(vec![MenuEntry::item("read", "Mark read")]).in_scope(second.scope());

        first.toggle(&first_trigger, &first_content);
        second.toggle(&second_trigger, &second_content);

        first.handle_event(&Event::Escape, &first_trigger, &first_content);
        assert!(!first.is_open());
        assert!(second.is_open());
        assert_eq!(second.subscription_count(), 1);
    }

    #[test]
    fn test_repeated_cycles_do_not_leak_subscriptions() {
        let (mut menu, trigger, content) = fixture();
        for _ in 0..20 {
            menu.toggle(&trigger, &content);
            menu.handle_event(&Event::Escape, &trigger, &content);
        }
        assert_eq!(menu.subscription_count(), 0);
        assert!(menu.subscriptions_balanced());
    }

    #[test]
    #[should_panic(expected = "outside its DropdownMenu scope")]
    fn test_trigger_outside_scope_fails_fast() {
        let (mut menu, _, content) = fixture();
        let stray = MenuTrigger::new("stray");
        menu.handle_event(&Event::Escape, &stray, &content);
    }

    #[test]
    #[should_panic(expected = "different DropdownMenu instance")]
    fn test_content_from_other_menu_fails_fast() {
        let (mut menu, trigger, _) = fixture();
        let other = DropdownMenu::new();
        let foreign = MenuContent::new(vec![MenuEntry::item("x", "X")]).in_scope(other.scope());
        menu.handle_event(&Event::Escape, &trigger, &foreign);
    }

    #[test]
    fn test_render_draws_nothing_while_closed() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let (menu, _, content) = fixture();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| content.render(f, &menu)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let all_blank = buffer.content().iter().all(|cell| cell.symbol() == " ");
        assert!(all_blank, "closed menu must not draw");
    }

    #[test]
    fn test_render_draws_content_while_open() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let (mut menu, trigger, content) = fixture();
        menu.toggle(&trigger, &content);
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| content.render(f, &menu)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let any_drawn = buffer.content().iter().any(|cell| cell.symbol() != " ");
        assert!(any_drawn, "open menu draws its panel");
    }
}
