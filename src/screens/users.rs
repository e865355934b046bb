//! User management screen
//!
//! Users are registered through the app, so there is no create dialog
//! here. The screen searches across name, email, address and phone,
//! filters on role and status, and edits rows through a controlled
//! dialog. Search is a capture mode: while active, printable keys go to
//! the query instead of screen shortcuts.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::components::binding::FormState;
use crate::components::dialog::{Dialog, DialogContent, OpenRequest};
use crate::components::forms::{FormField, TextInput};
use crate::components::tables::{render_table, TableView};
use crate::data::model::{Role, Status, UserRow};
use crate::data::store::{self, DataStore};
use crate::events::{Event, FocusableComponent};
use crate::utils::focus_manager::FocusManager;
use crate::utils::validation::{validate_email, validate_phone, validate_required};

use super::{
    options_select, rect_hit, render_form_buttons, route_form_event, FormRouting, ScreenResponse,
    StatusFilter,
};

const ROLE_OPTIONS: [&str; 3] = ["Admin", "Moderator", "User"];

fn next_role_filter(current: Option<Role>) -> Option<Role> {
    match current {
        None => Some(Role::Admin),
        Some(Role::Admin) => Some(Role::Moderator),
        Some(Role::Moderator) => Some(Role::User),
        Some(Role::User) => None,
    }
}

fn role_filter_label(current: Option<Role>) -> &'static str {
    match current {
        None => "All Roles",
        Some(role) => role.label(),
    }
}

#[derive(Debug)]
pub struct UserForm {
    pub name: FormField,
    pub email: FormField,
    pub phone: FormField,
    pub address: FormField,
    pub role: FormField,
    pub form: FormState,
    pub focus: FocusManager,
    submit_area: Option<Rect>,
    cancel_area: Option<Rect>,
}

impl UserForm {
    pub fn from_row(row: &UserRow) -> Self {
        let name = FormField::text("name", "Name", TextInput::new());
        let email = FormField::text("email", "Email", TextInput::new());
        let phone = FormField::text("phone", "Phone", TextInput::new());
        let address = FormField::text("address", "Address", TextInput::new());
        let role = FormField::select("role", "Role", options_select(&ROLE_OPTIONS));

        let mut focus = FocusManager::new();
        focus.set_tab_order(vec![
            FocusableComponent::TextInput("name".to_string()),
            FocusableComponent::TextInput("email".to_string()),
            FocusableComponent::TextInput("phone".to_string()),
            FocusableComponent::TextInput("address".to_string()),
            FocusableComponent::Dropdown("role".to_string()),
            FocusableComponent::Button("submit".to_string()),
            FocusableComponent::Button("cancel".to_string()),
        ]);
        focus.focus_first();

        let mut editor = Self {
            name,
            email,
            phone,
            address,
            role,
            form: FormState::new(),
            focus,
            submit_area: None,
            cancel_area: None,
        };
        editor.name.set_value(&row.name);
        editor.email.set_value(&row.email);
        editor.phone.set_value(&row.phone);
        editor.address.set_value(&row.address);
        editor.role.set_value(row.role.label());
        editor.sync_focus();
        editor
    }

    fn fields_and_focus(&mut self) -> ([&mut FormField; 5], &mut FocusManager) {
        let Self {
            name,
            email,
            phone,
            address,
            role,
            focus,
            ..
        } = self;
        ([name, email, phone, address, role], focus)
    }

    fn sync_focus(&mut self) {
        let (mut fields, focus) = self.fields_and_focus();
        super::sync_field_focus(&mut fields, focus);
    }

    pub fn route(&mut self, event: &Event) -> FormRouting {
        let (mut fields, focus) = self.fields_and_focus();
        route_form_event(&mut fields, focus, event)
    }

    pub fn validate(&mut self) -> bool {
        let mut ok = self.name.validate_into(&mut self.form, validate_required);
        ok &= self.email.validate_into(&mut self.form, validate_email);
        ok &= self.phone.validate_into(&mut self.form, validate_phone);
        ok &= self.address.validate_into(&mut self.form, validate_required);
        ok &= self.role.validate_into(&mut self.form, |v| {
            if v.is_empty() {
                Err("Select a role".to_string())
            } else {
                Ok(())
            }
        });
        ok
    }

    /// Overwrite the editable fields; join date and status are untouched.
    pub fn apply_to(&self, row: &mut UserRow) {
        row.name = self.name.value();
        row.email = self.email.value();
        row.phone = self.phone.value();
        row.address = self.address.value();
        row.role = Role::from_label(&self.role.value()).unwrap_or(row.role);
    }
}

#[derive(Debug)]
pub struct UsersScreenState {
    pub search: TextInput,
    pub searching: bool,
    pub filter: StatusFilter,
    pub role_filter: Option<Role>,
    pub table: TableView,
    pub edit: Dialog,
    edit_content: DialogContent,
    pub editing_id: Option<u64>,
    pub editor: Option<UserForm>,
}

impl Default for UsersScreenState {
    fn default() -> Self {
        let edit = Dialog::controlled(false);
        let edit_content = DialogContent::new()
            .in_scope(edit.scope())
            .with_title("Edit User")
            .sized(70, 90);
        Self {
            search: TextInput::new().with_placeholder("name, email, address or phone"),
            searching: false,
            filter: StatusFilter::All,
            role_filter: None,
            table: TableView::default(),
            edit,
            edit_content,
            editing_id: None,
            editor: None,
        }
    }
}

impl UsersScreenState {
    pub fn filtered<'a>(&self, rows: &'a [UserRow]) -> Vec<&'a UserRow> {
        let query = self.search.value().trim().to_lowercase();
        rows.iter()
            .filter(|row| {
                if !self.filter.matches(row.status) {
                    return false;
                }
                if let Some(role) = self.role_filter {
                    if row.role != role {
                        return false;
                    }
                }
                if query.is_empty() {
                    return true;
                }
                row.name.to_lowercase().contains(&query)
                    || row.email.to_lowercase().contains(&query)
                    || row.address.to_lowercase().contains(&query)
                    || row.phone.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn modal_open(&self) -> bool {
        self.edit.is_open()
    }

    /// Whether the screen is holding keyboard input for the search box.
    pub fn capturing(&self) -> bool {
        self.searching
    }

    pub fn open_edit(&mut self, row: &UserRow) {
        self.editor = Some(UserForm::from_row(row));
        self.editing_id = Some(row.id);
        self.edit.sync_open(true);
    }

    pub fn close_edit(&mut self) {
        self.editing_id = None;
        self.editor = None;
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
        let rows = self.filtered(&store.users);
        self.table.selected_index(rows.len()).map(|i| rows[i].id)
    }

    pub fn delete_user(&mut self, store: &mut DataStore, id: u64) -> bool {
        let removed = store::delete_row(&mut store.users, id);
        if removed {
            if self.editing_id == Some(id) {
                self.close_edit();
            }
            let len = self.filtered(&store.users).len();
            self.table.clamp(len);
        }
        removed
    }

    fn start_search(&mut self) {
        self.searching = true;
        self.search.set_focused(true);
    }

    fn end_search(&mut self) {
        self.searching = false;
        self.search.set_focused(false);
    }

    pub fn handle_event(&mut self, event: &Event, store: &mut DataStore) -> ScreenResponse {
        if self.edit.is_open() {
            return self.handle_edit_dialog(event, store);
        }

        if self.searching {
            match event {
                Event::Enter | Event::Escape => {
                    self.end_search();
                    let len = self.filtered(&store.users).len();
                    self.table.page = 0;
                    self.table.clamp(len);
                    return ScreenResponse::Handled;
                }
                _ => {
                    if self.search.handle_event(event) {
                        let len = self.filtered(&store.users).len();
                        self.table.page = 0;
                        self.table.clamp(len);
                    }
                    return ScreenResponse::Handled;
                }
            }
        }

        let len = self.filtered(&store.users).len();
        match event {
            Event::Char('/') => {
                self.start_search();
                ScreenResponse::info("Search: type a query, Enter to apply")
            }
            Event::Char('c') => {
                self.search.clear();
                let len = self.filtered(&store.users).len();
                self.table.page = 0;
                self.table.clamp(len);
                ScreenResponse::info("Search cleared")
            }
            Event::Char('e') | Event::Enter => {
                let row = self
                    .selected_id(store)
                    .and_then(|id| store.users.iter().find(|r| r.id == id).cloned());
                if let Some(row) = row {
                    self.open_edit(&row);
                }
                ScreenResponse::Handled
            }
            Event::Char('t') => match self.selected_id(store) {
                Some(id) => {
                    store::toggle_status(&mut store.users, id);
                    ScreenResponse::success("User status updated")
                }
                None => ScreenResponse::Handled,
            },
            Event::Char('d') => match self.selected_id(store) {
                Some(id) => {
                    self.delete_user(store, id);
                    ScreenResponse::success("User deleted")
                }
                None => ScreenResponse::Handled,
            },
            Event::Char('f') => {
                self.filter = self.filter.next();
                let len = self.filtered(&store.users).len();
                self.table.page = 0;
                self.table.clamp(len);
                ScreenResponse::info(format!("Filter: {}", self.filter.label()))
            }
            Event::Char('r') => {
                self.role_filter = next_role_filter(self.role_filter);
                let len = self.filtered(&store.users).len();
                self.table.page = 0;
                self.table.clamp(len);
                ScreenResponse::info(format!("Filter: {}", role_filter_label(self.role_filter)))
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
                if self.search.hit(*column, *row) {
                    self.start_search();
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

    fn handle_edit_dialog(&mut self, event: &Event, store: &mut DataStore) -> ScreenResponse {
        let Some(editor) = self.editor.as_mut() else {
            self.close_edit();
            return ScreenResponse::Handled;
        };
        match editor.route(event) {
            FormRouting::Consumed => ScreenResponse::Handled,
            FormRouting::Submit => self.submit_edit(store),
            FormRouting::Cancel => {
                self.close_edit();
                ScreenResponse::Handled
            }
            FormRouting::NotHandled => {
                if let Event::Click { column, row } = event {
                    if rect_hit(editor.submit_area, *column, *row) {
                        return self.submit_edit(store);
                    }
                    if rect_hit(editor.cancel_area, *column, *row) {
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

    fn submit_edit(&mut self, store: &mut DataStore) -> ScreenResponse {
        let Some(editor) = self.editor.as_mut() else {
            self.close_edit();
            return ScreenResponse::Handled;
        };
        if !editor.validate() {
            return ScreenResponse::error("Fix the highlighted fields");
        }
        let Some(id) = self.editing_id else {
            self.close_edit();
            return ScreenResponse::Handled;
        };
        if let Some(row) = store::find_mut(&mut store.users, id) {
            editor.apply_to(row);
        }
        self.close_edit();
        ScreenResponse::success("User updated")
    }
}

pub fn render_users(
    f: &mut Frame,
    state: &mut UsersScreenState,
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
        .constraints([Constraint::Percentage(40), Constraint::Min(0)])
        .split(chunks[0]);
    state.search.render(f, toolbar[0], false);
    let filter_text = Paragraph::new(format!(
        "{} / {}  [/: search, f: status, r: role]",
        state.filter.label(),
        role_filter_label(state.role_filter)
    ))
    .style(Style::default().fg(Color::Gray))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(filter_text, toolbar[1]);

    let filtered = state.filtered(&store.users);
    state.table.clamp(filtered.len());
    let rows: Vec<Vec<String>> = filtered
        .iter()
        .map(|row| {
            vec![
                row.id.to_string(),
                row.name.clone(),
                row.email.clone(),
                row.phone.clone(),
                row.joined.format("%Y-%m-%d").to_string(),
                row.role.label().to_string(),
                row.status.label().to_string(),
            ]
        })
        .collect();

    render_table(
        f,
        chunks[1],
        "User Management",
        &["SL", "Name", "Email", "Phone", "Joined", "Role", "Status"],
        &[
            Constraint::Length(4),
            Constraint::Length(14),
            Constraint::Min(18),
            Constraint::Length(14),
            Constraint::Length(11),
            Constraint::Length(10),
            Constraint::Length(9),
        ],
        &rows,
        &mut state.table,
        focused,
    );
}

pub fn render_users_overlays(f: &mut Frame, state: &mut UsersScreenState) {
    let viewport = f.area();
    let UsersScreenState {
        edit,
        edit_content,
        editor,
        ..
    } = state;
    if let Some(body) = edit_content.render(f, edit, viewport) {
        if let Some(editor) = editor.as_mut() {
            render_user_form(f, body, editor);
        }
    }
}

fn render_user_form(f: &mut Frame, body: Rect, editor: &mut UserForm) {
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

    let first = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);
    editor.name.render(f, first[0], &editor.form);
    editor.email.render(f, first[1], &editor.form);

    let second = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    editor.phone.render(f, second[0], &editor.form);
    editor.address.render(f, second[1], &editor.form);

    editor.role.render(f, chunks[2], &editor.form);

    let (cancel, submit) = render_form_buttons(f, chunks[3], "Save Changes", &editor.focus);
    editor.cancel_area = Some(cancel);
    editor.submit_area = Some(submit);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_matches_across_fields() {
        let mut state = UsersScreenState::default();
        let store = DataStore::seeded();

        state.search.set_value("dhaka");
        let by_address = state.filtered(&store.users);
        assert_eq!(by_address.len(), 1);
        assert_eq!(by_address[0].name, "Sabbir Ahmed");

        state.search.set_value("+880171");
        let by_phone = state.filtered(&store.users);
        assert_eq!(by_phone.len(), 1);

        state.search.set_value("nusrat@");
        let by_email = state.filtered(&store.users);
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].name, "Nusrat Jahan");
    }

    #[test]
    fn test_role_and_status_filters_compose_with_search() {
        let mut state = UsersScreenState::default();
        let store = DataStore::seeded();

        state.role_filter = Some(Role::Admin);
        assert_eq!(state.filtered(&store.users).len(), 1);

        // Admin search for a non-admin name finds nothing
        state.search.set_value("arif");
        assert!(state.filtered(&store.users).is_empty());
    }

    #[test]
    fn test_search_mode_captures_shortcut_keys() {
        let mut state = UsersScreenState::default();
        let mut store = DataStore::seeded();
        let users_before = store.users.len();

        state.handle_event(&Event::Char('/'), &mut store);
        assert!(state.capturing());

        // 'd' is the delete shortcut outside search mode
        state.handle_event(&Event::Char('d'), &mut store);
        assert_eq!(store.users.len(), users_before);
        assert_eq!(state.search.value(), "d");

        state.handle_event(&Event::Enter, &mut store);
        assert!(!state.capturing());
    }

    #[test]
    fn test_edit_preserves_join_date_and_status() {
        let mut state = UsersScreenState::default();
        let mut store = DataStore::seeded();
        let joined = store.users[0].joined;

        let row = store.users[0].clone();
        state.open_edit(&row);
        let editor = state.editor.as_mut().unwrap();
        editor.name.set_value("Renamed Admin");
        editor.focus.focus_id("submit");
        state.handle_event(&Event::Enter, &mut store);

        assert!(!state.edit.is_open());
        assert_eq!(store.users[0].name, "Renamed Admin");
        assert_eq!(store.users[0].joined, joined);
        assert_eq!(store.users[0].role, Role::Admin);
    }

    #[test]
    fn test_invalid_email_blocks_save() {
        let mut state = UsersScreenState::default();
        let mut store = DataStore::seeded();

        let row = store.users[0].clone();
        state.open_edit(&row);
        let editor = state.editor.as_mut().unwrap();
        editor.email.set_value("not-an-email");
        editor.focus.focus_id("submit");
        state.handle_event(&Event::Enter, &mut store);

        assert!(state.edit.is_open());
        assert_eq!(store.users[0].email, row.email);
    }

    #[test]
    fn test_delete_clamps_selection() {
        let mut state = UsersScreenState::default();
        let mut store = DataStore::seeded();

        state.delete_user(&mut store, 1);
        state.delete_user(&mut store, 2);
        state.delete_user(&mut store, 3);
        assert!(store.users.is_empty());
        assert_eq!(state.table.selected_index(0), None);
    }
}
