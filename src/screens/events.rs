//! Event management screen
//!
//! Paged table of scheduled events with a status filter, an uncontrolled
//! create dialog, and a host-controlled edit dialog. New rows land at the
//! top of the table with an Active status; deleting the row an edit dialog
//! is showing closes that dialog.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use chrono::NaiveDate;

use crate::components::binding::FormState;
use crate::components::dialog::{Dialog, DialogContent, DialogTrigger, OpenRequest};
use crate::components::forms::{FormField, TextInput};
use crate::components::tables::{render_table, TableView};
use crate::data::model::{EventRow, Status};
use crate::data::store::{self, DataStore};
use crate::events::{Event, FocusableComponent};
use crate::utils::focus_manager::FocusManager;
use crate::utils::validation::{validate_date, validate_required};

use super::{
    options_select, rect_hit, render_form_buttons, route_form_event, FormRouting, ScreenResponse,
    StatusFilter,
};

const BUNDLE_OPTIONS: [&str; 3] = ["Aura Bundle", "Call Bundle", "Premium Bundle"];
const STATE_OPTIONS: [&str; 4] = ["California", "Texas", "New York", "Florida"];

/// Create/edit form for one event. Built fresh on every dialog open so the
/// fields bind under a new mount.
#[derive(Debug)]
pub struct EventForm {
    pub name: FormField,
    pub bundle: FormField,
    pub state: FormField,
    pub date: FormField,
    pub start_time: FormField,
    pub end_time: FormField,
    pub form: FormState,
    pub focus: FocusManager,
    submit_label: &'static str,
    submit_area: Option<Rect>,
    cancel_area: Option<Rect>,
}

impl EventForm {
    pub fn new() -> Self {
        let name = FormField::text(
            "name",
            "Event Name",
            TextInput::new().with_placeholder("Enter Your Event Name"),
        );
        let bundle = FormField::select("bundle", "Event Type", options_select(&BUNDLE_OPTIONS));
        let state = FormField::select("state", "State", options_select(&STATE_OPTIONS));
        let date = FormField::text("date", "Date", TextInput::new().with_placeholder("2025-02-01"));
        let start_time = FormField::text(
            "start_time",
            "Start Time",
            TextInput::new().with_placeholder("10:00 AM"),
        );
        let end_time = FormField::text(
            "end_time",
            "End Time",
            TextInput::new().with_placeholder("12:00 PM"),
        );

        let mut focus = FocusManager::new();
        focus.set_tab_order(vec![
            FocusableComponent::TextInput("name".to_string()),
            FocusableComponent::Dropdown("bundle".to_string()),
            FocusableComponent::Dropdown("state".to_string()),
            FocusableComponent::TextInput("date".to_string()),
            FocusableComponent::TextInput("start_time".to_string()),
            FocusableComponent::TextInput("end_time".to_string()),
            FocusableComponent::Button("submit".to_string()),
            FocusableComponent::Button("cancel".to_string()),
        ]);
        focus.focus_first();

        let mut editor = Self {
            name,
            bundle,
            state,
            date,
            start_time,
            end_time,
            form: FormState::new(),
            focus,
            submit_label: "Create Event",
            submit_area: None,
            cancel_area: None,
        };
        editor.sync_focus();
        editor
    }

    pub fn from_row(row: &EventRow) -> Self {
        let mut editor = Self::new();
        editor.submit_label = "Save Changes";
        editor.name.set_value(&row.name);
        editor.bundle.set_value(&row.bundle);
        editor.state.set_value(&row.state);
        editor.date.set_value(&row.date.format("%Y-%m-%d").to_string());
        editor.start_time.set_value(&row.start_time);
        editor.end_time.set_value(&row.end_time);
        editor
    }

    fn fields_and_focus(&mut self) -> ([&mut FormField; 6], &mut FocusManager) {
        let Self {
            name,
            bundle,
            state,
            date,
            start_time,
            end_time,
            focus,
            ..
        } = self;
        ([name, bundle, state, date, start_time, end_time], focus)
    }

    fn sync_focus(&mut self) {
        let (mut fields, focus) = self.fields_and_focus();
        super::sync_field_focus(&mut fields, focus);
    }

    pub fn route(&mut self, event: &Event) -> FormRouting {
        let (mut fields, focus) = self.fields_and_focus();
        route_form_event(&mut fields, focus, event)
    }

    /// Whether any select list is open; Escape then belongs to the list.
    pub fn list_open(&self) -> bool {
        self.bundle.is_list_open() || self.state.is_list_open()
    }

    pub fn validate(&mut self) -> bool {
        let mut ok = self.name.validate_into(&mut self.form, validate_required);
        ok &= self.bundle.validate_into(&mut self.form, |v| {
            if v.is_empty() {
                Err("Select an event type".to_string())
            } else {
                Ok(())
            }
        });
        ok &= self.state.validate_into(&mut self.form, |v| {
            if v.is_empty() {
                Err("Select a state".to_string())
            } else {
                Ok(())
            }
        });
        ok &= self
            .date
            .validate_into(&mut self.form, |v| validate_date(v).map(|_| ()));
        ok &= self.start_time.validate_into(&mut self.form, validate_required);
        ok &= self.end_time.validate_into(&mut self.form, validate_required);
        ok
    }

    fn parsed_date(&self) -> NaiveDate {
        NaiveDate::parse_from_str(&self.date.value(), "%Y-%m-%d").unwrap_or_default()
    }

    pub fn to_row(&self, id: u64) -> EventRow {
        EventRow {
            id,
            name: self.name.value(),
            bundle: self.bundle.value(),
            date: self.parsed_date(),
            start_time: self.start_time.value(),
            end_time: self.end_time.value(),
            status: Status::Active,
            state: self.state.value(),
        }
    }

    /// Overwrite an existing row with the edited values; status is managed
    /// by the toggle action, not the form.
    pub fn apply_to(&self, row: &mut EventRow) {
        row.name = self.name.value();
        row.bundle = self.bundle.value();
        row.date = self.parsed_date();
        row.start_time = self.start_time.value();
        row.end_time = self.end_time.value();
        row.state = self.state.value();
    }
}

impl Default for EventForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Event screen state
#[derive(Debug)]
pub struct EventsScreenState {
    pub filter: StatusFilter,
    pub table: TableView,
    pub create: Dialog,
    create_trigger: DialogTrigger,
    create_content: DialogContent,
    pub edit: Dialog,
    edit_content: DialogContent,
    pub editing_id: Option<u64>,
    pub editor: EventForm,
}

impl Default for EventsScreenState {
    fn default() -> Self {
        let create = Dialog::new();
        let create_trigger = DialogTrigger::new("New Event [n]").in_scope(create.scope());
        let create_content = DialogContent::new()
            .in_scope(create.scope())
            .with_title("Create Event")
            .sized(70, 90);
        let edit = Dialog::controlled(false);
        let edit_content = DialogContent::new()
            .in_scope(edit.scope())
            .with_title("Edit Event")
            .sized(70, 90);
        Self {
            filter: StatusFilter::All,
            table: TableView::default(),
            create,
            create_trigger,
            create_content,
            edit,
            edit_content,
            editing_id: None,
            editor: EventForm::new(),
        }
    }
}

impl EventsScreenState {
    pub fn filtered<'a>(&self, rows: &'a [EventRow]) -> Vec<&'a EventRow> {
        rows.iter()
            .filter(|row| self.filter.matches(row.status))
            .collect()
    }

    pub fn modal_open(&self) -> bool {
        self.create.is_open() || self.edit.is_open()
    }

    pub fn open_create(&mut self) {
        self.editor = EventForm::new();
        self.create_trigger.activate(&mut self.create, || {});
    }

    pub fn open_edit(&mut self, row: &EventRow) {
        self.editor = EventForm::from_row(row);
        self.editing_id = Some(row.id);
        self.edit.sync_open(true);
    }

    pub fn close_edit(&mut self) {
        self.editing_id = None;
        self.edit.sync_open(false);
    }

    fn apply_edit_requests(&mut self) {
        let mut open = self.edit.is_open();
        for request in self.edit.take_requests() {
            open = matches!(request, OpenRequest::Open);
        }
        if !open && self.edit.is_open() {
            self.close_edit();
        }
    }

    fn selected_id(&self, store: &DataStore) -> Option<u64> {
        let rows = self.filtered(&store.events);
        self.table.selected_index(rows.len()).map(|i| rows[i].id)
    }

    /// Delete one event. An edit dialog showing the same row closes with it.
    pub fn delete_event(&mut self, store: &mut DataStore, id: u64) -> bool {
        let removed = store::delete_row(&mut store.events, id);
        if removed {
            if self.editing_id == Some(id) {
                self.close_edit();
            }
            let len = self.filtered(&store.events).len();
            self.table.clamp(len);
        }
        removed
    }

    pub fn handle_event(&mut self, event: &Event, store: &mut DataStore) -> ScreenResponse {
        if self.create.is_open() {
            return self.handle_create_dialog(event, store);
        }
        if self.edit.is_open() {
            return self.handle_edit_dialog(event, store);
        }

        let len = self.filtered(&store.events).len();
        match event {
            Event::Char('n') => {
                self.open_create();
                ScreenResponse::Handled
            }
            Event::Char('e') | Event::Enter => {
                let row = self
                    .selected_id(store)
                    .and_then(|id| store.events.iter().find(|r| r.id == id).cloned());
                if let Some(row) = row {
                    self.open_edit(&row);
                }
                ScreenResponse::Handled
            }
            Event::Char('t') => match self.selected_id(store) {
                Some(id) => {
                    store::toggle_status(&mut store.events, id);
                    ScreenResponse::success("Event status updated")
                }
                None => ScreenResponse::Handled,
            },
            Event::Char('d') => match self.selected_id(store) {
                Some(id) => {
                    self.delete_event(store, id);
                    ScreenResponse::success("Event deleted")
                }
                None => ScreenResponse::Handled,
            },
            Event::Char('f') => {
                self.filter = self.filter.next();
                let len = self.filtered(&store.events).len();
                self.table.page = 0;
                self.table.clamp(len);
                ScreenResponse::info(format!("Filter: {}", self.filter.label()))
            }
            Event::Up => {
                self.table.select_previous(len);
                ScreenResponse::Handled
            }
            Event::Down => {
                self.table.select_next(len);
                ScreenResponse::Handled
            }
            Event::Left | Event::PageUp => {
                self.table.previous_page(len);
                ScreenResponse::Handled
            }
            Event::Right | Event::PageDown => {
                self.table.next_page(len);
                ScreenResponse::Handled
            }
            Event::Click { column, row } => {
                if self.create_trigger.hit(*column, *row) {
                    self.open_create();
                    return ScreenResponse::Handled;
                }
                if let Some(visible) = self.table.row_at(*column, *row, len) {
                    self.table.state.select(Some(visible));
                    return ScreenResponse::Handled;
                }
                ScreenResponse::NotHandled
            }
            _ => ScreenResponse::NotHandled,
        }
    }

    fn handle_create_dialog(&mut self, event: &Event, store: &mut DataStore) -> ScreenResponse {
        match self.editor.route(event) {
            FormRouting::Consumed => ScreenResponse::Handled,
            FormRouting::Submit => self.submit_create(store),
            FormRouting::Cancel => {
                self.create.close();
                ScreenResponse::Handled
            }
            FormRouting::NotHandled => {
                if let Event::Click { column, row } = event {
                    if rect_hit(self.editor.submit_area, *column, *row) {
                        return self.submit_create(store);
                    }
                    if rect_hit(self.editor.cancel_area, *column, *row) {
                        self.create.close();
                        return ScreenResponse::Handled;
                    }
                }
                self.create.handle_event(event);
                ScreenResponse::Handled
            }
        }
    }

    fn handle_edit_dialog(&mut self, event: &Event, store: &mut DataStore) -> ScreenResponse {
        match self.editor.route(event) {
            FormRouting::Consumed => ScreenResponse::Handled,
            FormRouting::Submit => self.submit_edit(store),
            FormRouting::Cancel => {
                self.close_edit();
                ScreenResponse::Handled
            }
            FormRouting::NotHandled => {
                if let Event::Click { column, row } = event {
                    if rect_hit(self.editor.submit_area, *column, *row) {
                        return self.submit_edit(store);
                    }
                    if rect_hit(self.editor.cancel_area, *column, *row) {
                        self.close_edit();
                        return ScreenResponse::Handled;
                    }
                }
                self.edit.handle_event(event);
                self.apply_edit_requests();
                ScreenResponse::Handled
            }
        }
    }

    fn submit_create(&mut self, store: &mut DataStore) -> ScreenResponse {
        if !self.editor.validate() {
            return ScreenResponse::error("Fix the highlighted fields");
        }
        let row = self.editor.to_row(store::next_id(&store.events));
        store::insert_top(&mut store.events, row);
        self.create.close();
        // Jump to the first page so the new top row is visible
        self.table.page = 0;
        self.table.state.select(Some(0));
        ScreenResponse::success("Event created")
    }

    fn submit_edit(&mut self, store: &mut DataStore) -> ScreenResponse {
        if !self.editor.validate() {
            return ScreenResponse::error("Fix the highlighted fields");
        }
        let Some(id) = self.editing_id else {
            self.close_edit();
            return ScreenResponse::Handled;
        };
        if let Some(row) = store::find_mut(&mut store.events, id) {
            self.editor.apply_to(row);
        }
        self.close_edit();
        ScreenResponse::success("Event updated")
    }
}

pub fn render_events(
    f: &mut Frame,
    state: &mut EventsScreenState,
    store: &DataStore,
    area: Rect,
    focused: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let toolbar = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(18), Constraint::Min(0)])
        .split(chunks[0]);
    state.create_trigger.render(f, toolbar[0], false);
    let filter_text = Paragraph::new(format!("Filter: {}  [f to cycle]", state.filter.label()))
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(filter_text, toolbar[1]);

    let filtered = state.filtered(&store.events);
    state.table.clamp(filtered.len());
    let rows: Vec<Vec<String>> = filtered
        .iter()
        .map(|row| {
            vec![
                row.id.to_string(),
                row.name.clone(),
                row.bundle.clone(),
                row.date.format("%Y-%m-%d").to_string(),
                row.start_time.clone(),
                row.end_time.clone(),
                row.status.label().to_string(),
                row.state.clone(),
            ]
        })
        .collect();

    render_table(
        f,
        chunks[1],
        "Event Management",
        &[
            "SL", "Event Name", "Event Type", "Date", "Start", "End", "Status", "State",
        ],
        &[
            Constraint::Length(4),
            Constraint::Min(18),
            Constraint::Length(15),
            Constraint::Length(11),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(11),
        ],
        &rows,
        &mut state.table,
        focused,
    );
}

/// Render the create/edit dialog over the screen; call after the body.
pub fn render_events_overlays(f: &mut Frame, state: &mut EventsScreenState) {
    let viewport = f.area();
    if let Some(body) = state
        .create_content
        .render(f, &mut state.create, viewport)
    {
        render_event_form(f, body, &mut state.editor);
    }
    if let Some(body) = state.edit_content.render(f, &mut state.edit, viewport) {
        render_event_form(f, body, &mut state.editor);
    }
}

fn render_event_form(f: &mut Frame, body: Rect, editor: &mut EventForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(body);

    let pairs = [chunks[0], chunks[1], chunks[2]].map(|chunk| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunk)
    });

    editor.name.render(f, pairs[0][0], &editor.form);
    editor.bundle.render(f, pairs[0][1], &editor.form);
    editor.state.render(f, pairs[1][0], &editor.form);
    editor.date.render(f, pairs[1][1], &editor.form);
    editor.start_time.render(f, pairs[2][0], &editor.form);
    editor.end_time.render(f, pairs[2][1], &editor.form);

    let (cancel, submit) = render_form_buttons(f, chunks[3], editor.submit_label, &editor.focus);
    editor.cancel_area = Some(cancel);
    editor.submit_area = Some(submit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Status;

    fn store_with_extra_events(extra: usize) -> DataStore {
        let mut store = DataStore::seeded();
        for i in 0..extra {
            let id = store::next_id(&store.events);
            store.events.push(EventRow {
                id,
                name: format!("Filler Event {i}"),
                bundle: "Aura Bundle".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                start_time: "09:00 AM".to_string(),
                end_time: "10:00 AM".to_string(),
                status: Status::Inactive,
                state: "Texas".to_string(),
            });
        }
        store
    }

    #[test]
    fn test_filter_applies_before_pagination() {
        let mut state = EventsScreenState::default();
        let store = store_with_extra_events(4);
        assert_eq!(state.filtered(&store.events).len(), 7);
        assert_eq!(state.table.total_pages(7), 2);

        state.filter = StatusFilter::Active;
        let filtered = state.filtered(&store.events);
        assert_eq!(filtered.len(), 2);
        // Two active rows fit a single page once the filter is applied
        assert_eq!(state.table.total_pages(filtered.len()), 1);
    }

    #[test]
    fn test_create_inserts_at_top_with_active_status() {
        let mut state = EventsScreenState::default();
        let mut store = DataStore::seeded();

        state.handle_event(&Event::Char('n'), &mut store);
        assert!(state.create.is_open());

        state.editor.name.set_value("Spring Launch");
        state.editor.bundle.set_value("Aura Bundle");
        state.editor.state.set_value("Texas");
        state.editor.date.set_value("2025-03-15");
        state.editor.start_time.set_value("09:00 AM");
        state.editor.end_time.set_value("11:00 AM");
        state.editor.focus.focus_id("submit");

        let response = state.handle_event(&Event::Enter, &mut store);
        assert_eq!(
            response,
            ScreenResponse::Status(crate::app::StatusLevel::Success, "Event created".to_string())
        );
        assert!(!state.create.is_open());
        assert_eq!(store.events.len(), 4);
        assert_eq!(store.events[0].name, "Spring Launch");
        assert_eq!(store.events[0].id, 4);
        assert_eq!(store.events[0].status, Status::Active);
    }

    #[test]
    fn test_create_validation_keeps_dialog_open() {
        let mut state = EventsScreenState::default();
        let mut store = DataStore::seeded();

        state.handle_event(&Event::Char('n'), &mut store);
        state.editor.focus.focus_id("submit");
        let response = state.handle_event(&Event::Enter, &mut store);

        assert!(matches!(
            response,
            ScreenResponse::Status(crate::app::StatusLevel::Error, _)
        ));
        assert!(state.create.is_open());
        assert!(state.editor.form.has_errors());
        assert_eq!(store.events.len(), 3);
    }

    #[test]
    fn test_edit_updates_row_and_closes() {
        let mut state = EventsScreenState::default();
        let mut store = DataStore::seeded();

        state.handle_event(&Event::Enter, &mut store);
        assert!(state.edit.is_open());
        assert_eq!(state.editing_id, Some(1));

        state.editor.name.set_value("Renamed Event");
        state.editor.focus.focus_id("submit");
        state.handle_event(&Event::Enter, &mut store);

        assert!(!state.edit.is_open());
        assert_eq!(state.editing_id, None);
        assert_eq!(store.events[0].name, "Renamed Event");
        // Toggle state was left alone by the edit
        assert_eq!(store.events[0].status, Status::Active);
    }

    #[test]
    fn test_escape_cancels_create_without_committing() {
        let mut state = EventsScreenState::default();
        let mut store = DataStore::seeded();

        state.handle_event(&Event::Char('n'), &mut store);
        state.editor.name.set_value("Never Saved");
        state.handle_event(&Event::Escape, &mut store);

        assert!(!state.create.is_open());
        assert_eq!(store.events.len(), 3);
        assert!(state.create.subscriptions_balanced());
    }

    #[test]
    fn test_delete_closes_edit_showing_same_row() {
        let mut state = EventsScreenState::default();
        let mut store = DataStore::seeded();

        let row = store.events[0].clone();
        state.open_edit(&row);
        assert!(state.edit.is_open());

        state.delete_event(&mut store, row.id);
        assert!(!state.edit.is_open());
        assert_eq!(state.editing_id, None);
        assert_eq!(store.events.len(), 2);

        // Deleting a different row leaves an open edit alone
        let other = store.events[0].clone();
        state.open_edit(&other);
        let unrelated_id = store.events[1].id;
        state.delete_event(&mut store, unrelated_id);
        assert!(state.edit.is_open());
        state.close_edit();
    }

    #[test]
    fn test_toggle_flips_selected_row_only() {
        let mut state = EventsScreenState::default();
        let mut store = DataStore::seeded();

        let response = state.handle_event(&Event::Char('t'), &mut store);
        assert!(matches!(response, ScreenResponse::Status(_, _)));
        assert_eq!(store.events[0].status, Status::Inactive);
        assert_eq!(store.events[1].status, Status::Active);
    }

    #[test]
    fn test_fresh_mount_per_dialog_open() {
        let mut state = EventsScreenState::default();
        let mut store = DataStore::seeded();

        state.handle_event(&Event::Char('n'), &mut store);
        let first = state.editor.name.scope().ids().control_id;
        state.handle_event(&Event::Escape, &mut store);

        state.handle_event(&Event::Char('n'), &mut store);
        let second = state.editor.name.scope().ids().control_id;
        assert_ne!(first, second);
    }
}
