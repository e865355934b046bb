//! Admin console screens
//!
//! One module per screen plus the routing shared by every dialog-hosted
//! form: focused-control-first event dispatch, Tab/arrow focus movement,
//! and click-to-focus with the label-to-control association resolved by
//! the field itself.

pub mod dashboard;
pub mod events;
pub mod games;
pub mod packages;
pub mod promos;
pub mod settings;
pub mod shop;
pub mod users;

pub use dashboard::DashboardState;
pub use events::EventsScreenState;
pub use games::GamesScreenState;
pub use packages::PackagesScreenState;
pub use promos::PromosScreenState;
pub use settings::SettingsScreenState;
pub use shop::ShopScreenState;
pub use users::UsersScreenState;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::StatusLevel;
use crate::components::forms::{FieldControl, FormField, Select, SelectOption};
use crate::data::model::Status;
use crate::events::Event;
use crate::utils::focus_manager::FocusManager;

/// What a screen did with an event
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenResponse {
    /// Event did not concern the screen; keep routing it
    NotHandled,
    /// Event was consumed
    Handled,
    /// Event was consumed and produced a status line
    Status(StatusLevel, String),
}

impl ScreenResponse {
    pub fn success(text: impl Into<String>) -> Self {
        ScreenResponse::Status(StatusLevel::Success, text.into())
    }

    pub fn info(text: impl Into<String>) -> Self {
        ScreenResponse::Status(StatusLevel::Info, text.into())
    }

    pub fn error(text: impl Into<String>) -> Self {
        ScreenResponse::Status(StatusLevel::Error, text.into())
    }
}

/// Row status filter cycled with the f key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn matches(&self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == Status::Active,
            StatusFilter::Inactive => status == Status::Inactive,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Active,
            StatusFilter::Active => StatusFilter::Inactive,
            StatusFilter::Inactive => StatusFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Active => "Active",
            StatusFilter::Inactive => "Inactive",
        }
    }
}

/// Routing outcome for a form hosted in a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRouting {
    /// The form consumed the event
    Consumed,
    /// The submit button was activated
    Submit,
    /// Escape or the cancel button; the host should close the dialog
    Cancel,
    /// Not a form concern (button rectangles, dialog backdrop)
    NotHandled,
}

/// Dispatch one event through a dialog form.
///
/// The focused control gets the event first, so an open select list keeps
/// Enter, Escape, and the arrows to itself. Only then do the keys fall
/// through to focus movement and the submit/cancel actions.
pub(crate) fn route_form_event(
    fields: &mut [&mut FormField],
    focus: &mut FocusManager,
    event: &Event,
) -> FormRouting {
    if let Some(current) = focus.current_focus().map(|c| c.id().to_string()) {
        if let Some(field) = fields.iter_mut().find(|f| f.field_name() == current) {
            if field.handle_event(event) {
                return FormRouting::Consumed;
            }
        }
    }

    match event {
        Event::Tab | Event::FocusNext | Event::Down => {
            focus.focus_next();
            sync_field_focus(fields, focus);
            FormRouting::Consumed
        }
        Event::BackTab | Event::FocusPrevious | Event::Up => {
            focus.focus_previous();
            sync_field_focus(fields, focus);
            FormRouting::Consumed
        }
        Event::Enter => match focus.current_focus().map(|c| c.id()) {
            Some("submit") => FormRouting::Submit,
            Some("cancel") => FormRouting::Cancel,
            _ => FormRouting::Consumed,
        },
        Event::Escape => FormRouting::Cancel,
        Event::Click { column, row } => {
            let hit = fields
                .iter()
                .find(|f| f.click_target(*column, *row).is_some())
                .map(|f| f.field_name().to_string());
            match hit {
                Some(name) => {
                    let again = focus.is_focused_id(&name);
                    focus.focus_id(&name);
                    sync_field_focus(fields, focus);
                    if again {
                        // A second click on the focused control toggles it
                        if let Some(field) = fields.iter_mut().find(|f| f.field_name() == name) {
                            match field.control_mut() {
                                FieldControl::Select(select) => select.toggle(),
                                FieldControl::Check(checkbox) => checkbox.toggle(),
                                FieldControl::Text(_) => {}
                            }
                        }
                    }
                    FormRouting::Consumed
                }
                None => FormRouting::NotHandled,
            }
        }
        // The dialog is modal: stray keys never reach the screen behind it
        _ => FormRouting::Consumed,
    }
}

/// Mirror the focus manager's current id onto the controls.
pub(crate) fn sync_field_focus(fields: &mut [&mut FormField], focus: &FocusManager) {
    for field in fields.iter_mut() {
        let focused = focus.is_focused_id(field.field_name());
        field.set_focused(focused);
    }
}

/// Select over fixed string options; value and display text coincide.
pub(crate) fn options_select(options: &[&str]) -> Select<String> {
    let mut select = Select::new();
    for text in options {
        select = select.add_option(SelectOption::new(*text, text.to_string()));
    }
    select
}

/// Render the cancel/submit pair at the bottom of a dialog form and return
/// their rectangles for click routing.
pub(crate) fn render_form_buttons(
    f: &mut Frame,
    area: Rect,
    submit_label: &str,
    focus: &FocusManager,
) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    form_button(f, chunks[0], "Cancel", focus.is_focused_id("cancel"));
    form_button(f, chunks[1], submit_label, focus.is_focused_id("submit"));
    (chunks[0], chunks[1])
}

fn form_button(f: &mut Frame, area: Rect, label: &str, focused: bool) {
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

pub(crate) fn rect_hit(area: Option<Rect>, column: u16, row: u16) -> bool {
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
    use crate::components::forms::TextInput;
    use crate::events::FocusableComponent;

    fn form_fixture() -> (FormField, FormField, FocusManager) {
        let name = FormField::text("name", "Name", TextInput::new());
        let code = FormField::text("code", "Code", TextInput::new());
        let mut focus = FocusManager::new();
        focus.set_tab_order(vec![
            FocusableComponent::TextInput("name".to_string()),
            FocusableComponent::TextInput("code".to_string()),
            FocusableComponent::Button("submit".to_string()),
            FocusableComponent::Button("cancel".to_string()),
        ]);
        focus.focus_first();
        (name, code, focus)
    }

    #[test]
    fn test_focused_text_input_consumes_typing() {
        let (mut name, mut code, mut focus) = form_fixture();
        {
            let mut fields = [&mut name, &mut code];
            sync_field_focus(&mut fields, &focus);
            assert_eq!(
                route_form_event(&mut fields, &mut focus, &Event::Char('A')),
                FormRouting::Consumed
            );
        }
        assert_eq!(name.value(), "A");
        assert_eq!(code.value(), "");
    }

    #[test]
    fn test_tab_moves_focus_and_enter_submits() {
        let (mut name, mut code, mut focus) = form_fixture();
        let mut fields = [&mut name, &mut code];
        sync_field_focus(&mut fields, &focus);

        route_form_event(&mut fields, &mut focus, &Event::Tab);
        assert!(focus.is_focused_id("code"));
        route_form_event(&mut fields, &mut focus, &Event::Tab);
        assert!(focus.is_focused_id("submit"));
        assert_eq!(
            route_form_event(&mut fields, &mut focus, &Event::Enter),
            FormRouting::Submit
        );
    }

    #[test]
    fn test_escape_cancels_when_no_list_is_open() {
        let (mut name, mut code, mut focus) = form_fixture();
        let mut fields = [&mut name, &mut code];
        assert_eq!(
            route_form_event(&mut fields, &mut focus, &Event::Escape),
            FormRouting::Cancel
        );
    }

    #[test]
    fn test_open_select_keeps_escape_to_itself() {
        let bundle = FormField::select("bundle", "Bundle", options_select(&["Aura", "Call"]));
        let mut bundle = bundle;
        let mut focus = FocusManager::new();
        focus.set_tab_order(vec![FocusableComponent::Dropdown("bundle".to_string())]);
        focus.focus_first();
        let mut fields = [&mut bundle];
        sync_field_focus(&mut fields, &focus);

        // Enter opens the list; Escape then closes the list, not the dialog
        route_form_event(&mut fields, &mut focus, &Event::Enter);
        assert!(fields[0].is_list_open());
        assert_eq!(
            route_form_event(&mut fields, &mut focus, &Event::Escape),
            FormRouting::Consumed
        );
        assert!(!fields[0].is_list_open());
        assert_eq!(
            route_form_event(&mut fields, &mut focus, &Event::Escape),
            FormRouting::Cancel
        );
    }

    #[test]
    fn test_status_filter_cycle() {
        let filter = StatusFilter::default();
        assert!(filter.matches(Status::Active) && filter.matches(Status::Inactive));
        let filter = filter.next();
        assert_eq!(filter, StatusFilter::Active);
        assert!(!filter.matches(Status::Inactive));
        assert_eq!(filter.next().next(), StatusFilter::All);
    }
}
