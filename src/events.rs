//! Event Handling System
//!
//! This module manages keyboard and mouse events for the TUI application,
//! providing a structured way to handle user input and system events.

use crossterm::event::{self, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};

use std::time::Duration;
use tokio::sync::mpsc;

/// Application events that can be handled
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Quit the application
    Quit,
    /// Navigate to next tab
    Tab,
    /// Navigate to previous tab (Shift+Tab)
    BackTab,
    /// Enter/confirm action
    Enter,
    /// Escape/cancel action
    Escape,
    /// Arrow key navigation
    Up,
    Down,
    Left,
    Right,
    /// Character input
    Char(char),
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Home key
    Home,
    /// End key
    End,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Function keys
    F(u8),
    /// Ctrl+key combinations
    Ctrl(char),
    /// Alt+key combinations
    Alt(char),
    /// Refresh/reload action (typically F5)
    Refresh,
    /// Help action (typically F1)
    Help,
    /// Left mouse button pressed at a terminal cell
    Click { column: u16, row: u16 },
    /// Mouse wheel scrolled up
    ScrollUp,
    /// Mouse wheel scrolled down
    ScrollDown,
    /// Move focus in a direction (arrow-driven focus traversal)
    MoveFocus(FocusDirection),
    /// Focus the next component in tab order
    FocusNext,
    /// Focus the previous component in tab order
    FocusPrevious,
    /// Custom application events
    Custom(String),
}

/// Direction for focus traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Identifies a focusable widget on the current screen
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FocusableComponent {
    TextInput(String),
    Dropdown(String),
    Checkbox(String),
    Button(String),
    Table(String),
}

impl FocusableComponent {
    /// Stable identifier used in tab-order maps
    pub fn id(&self) -> &str {
        match self {
            FocusableComponent::TextInput(id)
            | FocusableComponent::Dropdown(id)
            | FocusableComponent::Checkbox(id)
            | FocusableComponent::Button(id)
            | FocusableComponent::Table(id) => id,
        }
    }
}

/// Event handler for processing terminal events
pub struct EventHandler {
    /// Receiver for events
    receiver: mpsc::UnboundedReceiver<Event>,
    /// Sender for events (for custom events)
    sender: mpsc::UnboundedSender<Event>,
    /// Handle for the background terminal event processing task
    _terminal_task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        // Spawn a task to handle terminal events
        let event_sender = sender.clone();
        let terminal_task = tokio::spawn(async move {
            loop {
                // Poll for events with a timeout to avoid blocking
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    if let Ok(terminal_event) = event::read() {
                        if let Some(app_event) = Self::convert_terminal_event(terminal_event) {
                            if event_sender.send(app_event).is_err() {
                                break; // Channel closed, exit the loop
                            }
                        }
                    }
                }

                // Small delay to prevent high CPU usage
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        });

        Self {
            receiver,
            sender,
            _terminal_task: terminal_task,
        }
    }

    /// Get the next event
    pub async fn next(&mut self) -> Result<Event, Box<dyn std::error::Error + Send + Sync>> {
        self.receiver
            .recv()
            .await
            .ok_or_else(|| "Event channel closed".into())
    }

    /// Sender handle for injecting application events into the loop
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }

    /// Send a custom event
    pub fn send_custom_event(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>> {
        self.sender.send(event)
    }

    /// Convert a terminal event to an application event
    fn convert_terminal_event(terminal_event: event::Event) -> Option<Event> {
        match terminal_event {
            event::Event::Key(key_event) => Self::convert_key_event(key_event),
            event::Event::Mouse(mouse_event) => match mouse_event.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(Event::Click {
                    column: mouse_event.column,
                    row: mouse_event.row,
                }),
                MouseEventKind::ScrollUp => Some(Event::ScrollUp),
                MouseEventKind::ScrollDown => Some(Event::ScrollDown),
                _ => None,
            },
            event::Event::Resize(_, _) => None, // Redraw happens on the next tick anyway
            _ => None,
        }
    }

    /// Convert a key event to an application event
    ///
    /// Plain characters are passed through as `Char` so text inputs receive
    /// them; quit shortcuts are limited to Ctrl+C here and 'q' is interpreted
    /// by the application depending on navigation mode.
    fn convert_key_event(key_event: KeyEvent) -> Option<Event> {
        match key_event {
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => Some(Event::Quit),

            // Tab navigation
            KeyEvent {
                code: KeyCode::Tab,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Tab),

            KeyEvent {
                code: KeyCode::BackTab,
                modifiers: KeyModifiers::SHIFT,
                ..
            } => Some(Event::BackTab),

            // Action keys
            KeyEvent {
                code: KeyCode::Enter,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Enter),

            KeyEvent {
                code: KeyCode::Esc,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Escape),

            // Arrow keys
            KeyEvent {
                code: KeyCode::Up,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Up),

            KeyEvent {
                code: KeyCode::Down,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Down),

            KeyEvent {
                code: KeyCode::Left,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Left),

            KeyEvent {
                code: KeyCode::Right,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Right),

            // Editing keys
            KeyEvent {
                code: KeyCode::Backspace,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Backspace),

            KeyEvent {
                code: KeyCode::Delete,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Delete),

            KeyEvent {
                code: KeyCode::Home,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Home),

            KeyEvent {
                code: KeyCode::End,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::End),

            KeyEvent {
                code: KeyCode::PageUp,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::PageUp),

            KeyEvent {
                code: KeyCode::PageDown,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::PageDown),

            // Function keys
            KeyEvent {
                code: KeyCode::F(n),
                modifiers: KeyModifiers::NONE,
                ..
            } => match n {
                1 => Some(Event::Help),
                5 => Some(Event::Refresh),
                _ => Some(Event::F(n)),
            },

            // Character input (shifted characters arrive with SHIFT set)
            KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Char(c)),

            KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::SHIFT,
                ..
            } => Some(Event::Char(c)),

            // Ctrl + character combinations
            KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => {
                // Skip 'c' since it's already handled as quit
                if c != 'c' {
                    Some(Event::Ctrl(c))
                } else {
                    None
                }
            }

            // Alt + character combinations
            KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::ALT,
                ..
            } => Some(Event::Alt(c)),

            // Ignore other key combinations
            _ => None,
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: event::KeyEventKind::Press,
            state: event::KeyEventState::NONE,
        }
    }

    #[test]
    fn test_event_conversion() {
        let quit_ctrl_c = key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            EventHandler::convert_key_event(quit_ctrl_c),
            Some(Event::Quit)
        );

        let tab = key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(EventHandler::convert_key_event(tab), Some(Event::Tab));

        // Plain characters must survive conversion so text inputs see them
        let char_q = key(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(
            EventHandler::convert_key_event(char_q),
            Some(Event::Char('q'))
        );

        let upper = key(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(
            EventHandler::convert_key_event(upper),
            Some(Event::Char('A'))
        );
    }

    #[test]
    fn test_mouse_conversion() {
        let click = event::Event::Mouse(event::MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 3,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            EventHandler::convert_terminal_event(click),
            Some(Event::Click { column: 12, row: 3 })
        );

        let drag = event::Event::Mouse(event::MouseEvent {
            kind: MouseEventKind::Moved,
            column: 12,
            row: 3,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(EventHandler::convert_terminal_event(drag), None);
    }

    #[test]
    fn test_focusable_component_id() {
        let input = FocusableComponent::TextInput("event_name".to_string());
        assert_eq!(input.id(), "event_name");

        let button = FocusableComponent::Button("save".to_string());
        assert_eq!(button.id(), "save");
    }

    #[tokio::test]
    async fn test_custom_event_round_trip() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        sender
            .send(Event::Custom("seed_reload".to_string()))
            .unwrap();

        if let Some(event) = receiver.recv().await {
            assert_eq!(event, Event::Custom("seed_reload".to_string()));
        } else {
            panic!("Expected custom event");
        }
    }
}
