//! Modal dialog primitive
//!
//! A dialog couples a trigger with a content panel drawn over the current
//! screen. The open bit lives either in the dialog itself (uncontrolled) or
//! in the host (controlled); the choice is made once at construction and
//! never revisited. A controlled dialog records requested transitions for
//! the host to drain and renders only the flag the host last supplied, so a
//! host may refuse a transition simply by not syncing it.
//!
//! While open, the dialog holds global event interest: Escape requests
//! close, a click inside the panel is swallowed, and any other click counts
//! as a backdrop click and requests close. Interest is released on every
//! exit path, so repeated open/close cycles cannot leak subscriptions.

use std::sync::atomic::{AtomicU64, Ordering};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::components::listener::ListenerGuard;
use crate::events::Event;

static NEXT_DIALOG_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Open-state transition recorded by a controlled dialog for its host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenRequest {
    Open,
    Close,
}

/// Who owns the open bit; fixed for the dialog's lifetime
#[derive(Debug, Clone, PartialEq)]
enum DialogMode {
    /// The instance owns and mutates its own open state
    Owned { open: bool },
    /// The host owns the state; the instance records requests and renders
    /// whatever flag the host last synced in
    Delegated {
        open: bool,
        requests: Vec<OpenRequest>,
    },
}

/// Proof that a sub-element was composed inside a specific dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogScope {
    instance: u64,
}

/// Modal container with a fixed ownership mode
#[derive(Debug, Clone, PartialEq)]
pub struct Dialog {
    instance: u64,
    mode: DialogMode,
    listeners: ListenerGuard,
    /// Panel rectangle recorded at last render, used for click routing
    panel: Option<Rect>,
}

impl Dialog {
    /// Uncontrolled dialog: owns its open bit, starts closed.
    pub fn new() -> Self {
        Self {
            instance: NEXT_DIALOG_INSTANCE.fetch_add(1, Ordering::Relaxed),
            mode: DialogMode::Owned { open: false },
            listeners: ListenerGuard::new(),
            panel: None,
        }
    }

    /// Controlled dialog: the host owns the open bit and supplies its
    /// current value here and on every change via [`Dialog::sync_open`].
    pub fn controlled(open: bool) -> Self {
        let mut listeners = ListenerGuard::new();
        if open {
            listeners.acquire();
        }
        Self {
            instance: NEXT_DIALOG_INSTANCE.fetch_add(1, Ordering::Relaxed),
            mode: DialogMode::Delegated {
                open,
                requests: Vec::new(),
            },
            listeners,
            panel: None,
        }
    }

    /// Scope handle for wiring triggers and content to this dialog.
    pub fn scope(&self) -> DialogScope {
        DialogScope {
            instance: self.instance,
        }
    }

    pub fn is_open(&self) -> bool {
        match &self.mode {
            DialogMode::Owned { open } => *open,
            DialogMode::Delegated { open, .. } => *open,
        }
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self.mode, DialogMode::Delegated { .. })
    }

    /// Request the open state. Owned dialogs transition immediately;
    /// controlled dialogs only record the request for the host.
    pub fn request_open(&mut self) {
        match &mut self.mode {
            DialogMode::Owned { open } => {
                if !*open {
                    *open = true;
                    self.listeners.acquire();
                }
            }
            DialogMode::Delegated { requests, .. } => {
                requests.push(OpenRequest::Open);
            }
        }
    }

    /// Request the closed state. Owned dialogs transition immediately;
    /// controlled dialogs only record the request for the host.
    pub fn request_close(&mut self) {
        match &mut self.mode {
            DialogMode::Owned { open } => {
                if *open {
                    *open = false;
                    self.listeners.release();
                    self.panel = None;
                }
            }
            DialogMode::Delegated { requests, .. } => {
                requests.push(OpenRequest::Close);
            }
        }
    }

    /// Programmatic close, equivalent to a backdrop click or Escape.
    pub fn close(&mut self) {
        self.request_close();
    }

    /// Drain transition requests recorded since the last call. Always empty
    /// for an uncontrolled dialog, which applies its own transitions.
    pub fn take_requests(&mut self) -> Vec<OpenRequest> {
        match &mut self.mode {
            DialogMode::Owned { .. } => Vec::new(),
            DialogMode::Delegated { requests, .. } => std::mem::take(requests),
        }
    }

    /// Host-supplied open flag for a controlled dialog.
    ///
    /// Panics when called on an uncontrolled dialog: the instance owns its
    /// state and the host must not overwrite it.
    pub fn sync_open(&mut self, open: bool) {
        match &mut self.mode {
            DialogMode::Owned { .. } => {
                panic!("sync_open called on an uncontrolled Dialog; construct it with Dialog::controlled to delegate state")
            }
            DialogMode::Delegated { open: current, .. } => {
                if *current != open {
                    *current = open;
                    if open {
                        self.listeners.acquire();
                    } else {
                        self.listeners.release();
                        self.panel = None;
                    }
                }
            }
        }
    }

    /// Handle a global event. Returns true when the event was consumed.
    ///
    /// Closed dialogs consume nothing, so Escape while closed is a no-op.
    /// While open: Escape and backdrop clicks request close; clicks inside
    /// the panel are swallowed without closing.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if !self.is_open() {
            return false;
        }
        match event {
            Event::Escape => {
                self.request_close();
                true
            }
            Event::Click { column, row } => {
                if self.panel_contains(*column, *row) {
                    true
                } else {
                    self.request_close();
                    true
                }
            }
            _ => false,
        }
    }

    /// Whether a terminal cell lies inside the last rendered panel.
    pub fn panel_contains(&self, column: u16, row: u16) -> bool {
        match self.panel {
            Some(panel) => rect_contains(panel, column, row),
            None => false,
        }
    }

    /// Panel rectangle from the last render, if the dialog was drawn open.
    pub fn panel_rect(&self) -> Option<Rect> {
        self.panel
    }

    /// Count of currently held global subscriptions: 1 while open, 0 closed.
    pub fn subscription_count(&self) -> u64 {
        self.listeners.held_count()
    }

    /// Acquire/release pairs over the dialog's lifetime are balanced.
    pub fn subscriptions_balanced(&self) -> bool {
        self.listeners.is_balanced()
    }

    fn note_panel(&mut self, panel: Rect) {
        self.panel = Some(panel);
    }

    fn expect_scope(&self, scope: Option<DialogScope>, element: &str) {
        match scope {
            None => panic!("{element} used outside its Dialog scope; build it with in_scope()"),
            Some(scope) if scope.instance != self.instance => {
                panic!("{element} is attached to a different Dialog instance")
            }
            Some(_) => {}
        }
    }
}

impl Default for Dialog {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Dialog {
    fn drop(&mut self) {
        // Dropping while open is an exit path like any other
        self.listeners.release();
    }
}

/// Clickable element that opens a dialog.
///
/// The trigger wraps a caller action: on activation the wrapped action runs
/// first, then the open request is issued, so a host can close a sibling
/// menu before the modal appears.
#[derive(Debug, Clone)]
pub struct DialogTrigger {
    label: String,
    scope: Option<DialogScope>,
    /// Trigger rectangle recorded at last render, used for hit testing
    area: Option<Rect>,
}

impl DialogTrigger {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            scope: None,
            area: None,
        }
    }

    /// Attach the trigger to a dialog. Activating a trigger that was never
    /// attached is a programmer error and panics.
    pub fn in_scope(mut self, scope: DialogScope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Whether a terminal cell lies inside the last rendered trigger.
    pub fn hit(&self, column: u16, row: u16) -> bool {
        match self.area {
            Some(area) => rect_contains(area, column, row),
            None => false,
        }
    }

    /// Run the wrapped action, then request open on the owning dialog.
    ///
    /// Panics when the trigger is outside the dialog's scope.
    pub fn activate<F: FnOnce()>(&self, dialog: &mut Dialog, child_action: F) {
        dialog.expect_scope(self.scope, "DialogTrigger");
        child_action();
        dialog.request_open();
    }

    /// Draw the trigger as a bordered button and record its rectangle.
    pub fn render(&mut self, f: &mut Frame, area: Rect, focused: bool) {
        let style = if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let button = Paragraph::new(self.label.as_str())
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(button, area);
        self.area = Some(area);
    }
}

/// Panel frame for a dialog's content.
///
/// Renders nothing while the owning dialog is closed. While open it clears
/// the centered panel area, draws the frame with optional title and
/// description, records the panel rectangle into the dialog for click
/// routing, and returns the inner body area for the caller to fill.
#[derive(Debug, Clone)]
pub struct DialogContent {
    scope: Option<DialogScope>,
    title: Option<String>,
    description: Option<String>,
    width_percent: u16,
    height_percent: u16,
}

impl DialogContent {
    pub fn new() -> Self {
        Self {
            scope: None,
            title: None,
            description: None,
            width_percent: 60,
            height_percent: 60,
        }
    }

    /// Attach the content to a dialog. Rendering content that was never
    /// attached is a programmer error and panics.
    pub fn in_scope(mut self, scope: DialogScope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Panel size as percentages of the viewport.
    pub fn sized(mut self, width_percent: u16, height_percent: u16) -> Self {
        self.width_percent = width_percent;
        self.height_percent = height_percent;
        self
    }

    /// Draw the panel over `area` and return the body rectangle, or None
    /// while the dialog is closed.
    pub fn render(&self, f: &mut Frame, dialog: &mut Dialog, area: Rect) -> Option<Rect> {
        dialog.expect_scope(self.scope, "DialogContent");
        if !dialog.is_open() {
            return None;
        }

        let panel = centered_rect(self.width_percent, self.height_percent, area);
        f.render_widget(Clear, panel);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(self.title.as_deref().unwrap_or(""));
        let inner = block.inner(panel);
        f.render_widget(block, panel);
        dialog.note_panel(panel);

        let body = if let Some(description) = &self.description {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2), Constraint::Min(0)])
                .split(inner);
            let text = Paragraph::new(Line::from(Span::styled(
                description.clone(),
                Style::default().fg(Color::Gray),
            )))
            .wrap(Wrap { trim: true });
            f.render_widget(text, chunks[0]);
            chunks[1]
        } else {
            inner
        };

        Some(body)
    }
}

impl Default for DialogContent {
    fn default() -> Self {
        Self::new()
    }
}

/// Centered sub-rectangle sized as percentages of the outer rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_uncontrolled_starts_closed_and_toggles() {
        let mut dialog = Dialog::new();
        let scope = dialog.scope();
        let trigger = DialogTrigger::new("Create Event").in_scope(scope);

        assert!(!dialog.is_open());

        // Odd number of opens since last close renders the panel
        trigger.activate(&mut dialog, || {});
        assert!(dialog.is_open());
        assert_eq!(dialog.subscription_count(), 1);

        dialog.handle_event(&Event::Escape);
        assert!(!dialog.is_open());
        assert_eq!(dialog.subscription_count(), 0);

        trigger.activate(&mut dialog, || {});
        assert!(dialog.is_open());
        dialog.close();
        assert!(!dialog.is_open());
        assert!(dialog.subscriptions_balanced());
    }

    #[test]
    fn test_trigger_runs_child_action_and_opens() {
        let mut dialog = Dialog::new();
        let trigger = DialogTrigger::new("Open").in_scope(dialog.scope());

        // A host typically closes a sibling menu in the wrapped action; it
        // must run even though the activation also opens the dialog
        let mut child_ran = false;
        trigger.activate(&mut dialog, || child_ran = true);

        assert!(child_ran);
        assert!(dialog.is_open());
    }

    #[test]
    fn test_controlled_dialog_only_records_requests() {
        let mut dialog = Dialog::controlled(false);
        let trigger = DialogTrigger::new("Open").in_scope(dialog.scope());

        trigger.activate(&mut dialog, || {});
        // Visibility does not change until the host syncs the flag back
        assert!(!dialog.is_open());
        assert_eq!(dialog.take_requests(), vec![OpenRequest::Open]);

        dialog.sync_open(true);
        assert!(dialog.is_open());
        assert_eq!(dialog.subscription_count(), 1);

        // Escape proposes close but the host may refuse by not syncing
        dialog.handle_event(&Event::Escape);
        assert!(dialog.is_open());
        assert_eq!(dialog.take_requests(), vec![OpenRequest::Close]);

        dialog.sync_open(false);
        assert!(!dialog.is_open());
        assert!(dialog.subscriptions_balanced());
    }

    #[test]
    fn test_escape_while_closed_is_noop() {
        let mut dialog = Dialog::new();
        assert!(!dialog.handle_event(&Event::Escape));
        assert!(!dialog.is_open());
        assert_eq!(dialog.subscription_count(), 0);
    }

    #[test]
    fn test_panel_click_keeps_open_backdrop_click_closes() {
        let mut dialog = Dialog::new();
        dialog.request_open();
        dialog.note_panel(Rect::new(10, 5, 40, 10));

        // Inside the panel: swallowed, stays open
        assert!(dialog.handle_event(&Event::Click { column: 20, row: 8 }));
        assert!(dialog.is_open());

        // Outside the panel is the backdrop: closes
        assert!(dialog.handle_event(&Event::Click { column: 2, row: 2 }));
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_two_dialogs_are_independent() {
        let mut first = Dialog::new();
        let mut second = Dialog::new();
        first.request_open();
        second.request_open();

        first.handle_event(&Event::Escape);
        assert!(!first.is_open());
        assert!(second.is_open());
        assert_eq!(second.subscription_count(), 1);
    }

    #[test]
    fn test_repeated_cycles_do_not_leak_subscriptions() {
        let mut dialog = Dialog::new();
        for _ in 0..20 {
            dialog.request_open();
            dialog.handle_event(&Event::Escape);
        }
        assert_eq!(dialog.subscription_count(), 0);
        assert!(dialog.subscriptions_balanced());
    }

    #[test]
    #[should_panic(expected = "outside its Dialog scope")]
    fn test_trigger_outside_scope_fails_fast() {
        let mut dialog = Dialog::new();
        let trigger = DialogTrigger::new("Open");
        trigger.activate(&mut dialog, || {});
    }

    #[test]
    #[should_panic(expected = "different Dialog instance")]
    fn test_trigger_attached_to_wrong_dialog_fails_fast() {
        let mut dialog = Dialog::new();
        let other = Dialog::new();
        let trigger = DialogTrigger::new("Open").in_scope(other.scope());
        trigger.activate(&mut dialog, || {});
    }

    #[test]
    #[should_panic(expected = "uncontrolled Dialog")]
    fn test_sync_open_on_uncontrolled_fails_fast() {
        let mut dialog = Dialog::new();
        dialog.sync_open(true);
    }

    #[test]
    fn test_content_renders_nothing_while_closed() {
        let mut dialog = Dialog::new();
        let content = DialogContent::new()
            .in_scope(dialog.scope())
            .with_title("Create Event");

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                assert!(content.render(f, &mut dialog, area).is_none());
            })
            .unwrap();
        assert!(dialog.panel_rect().is_none());
    }

    #[test]
    fn test_content_renders_panel_while_open() {
        let mut dialog = Dialog::new();
        let content = DialogContent::new()
            .in_scope(dialog.scope())
            .with_title("Create Event")
            .with_description("Fill in the event details");
        dialog.request_open();

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                let body = content.render(f, &mut dialog, area);
                assert!(body.is_some());
            })
            .unwrap();

        let panel = dialog.panel_rect().expect("panel recorded");
        assert!(panel.width > 0 && panel.height > 0);
        // The recorded panel is what click routing consults
        assert!(dialog.panel_contains(panel.x + 1, panel.y + 1));
        assert!(!dialog.panel_contains(0, 0));
    }

    #[test]
    fn test_centered_rect_is_centered() {
        let area = Rect::new(0, 0, 100, 50);
        let centered = centered_rect(50, 40, area);
        assert_eq!(centered.width, 50);
        assert_eq!(centered.height, 20);
        assert_eq!(centered.x, 25);
        assert_eq!(centered.y, 15);
    }
}
