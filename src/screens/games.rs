//! Game management screen
//!
//! Same table/dialog shell as the events screen with a two-field form.
//! Created dates are stamped when the row is inserted.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::components::binding::FormState;
use crate::components::dialog::{Dialog, DialogContent, DialogTrigger, OpenRequest};
use crate::components::forms::{FormField, TextInput};
use crate::components::tables::{render_table, TableView};
use crate::data::model::{GameRow, Status};
use crate::data::store::{self, DataStore};
use crate::events::{Event, FocusableComponent};
use crate::utils::focus_manager::FocusManager;
use crate::utils::validation::validate_required;

use super::{
    rect_hit, render_form_buttons, route_form_event, FormRouting, ScreenResponse, StatusFilter,
};

#[derive(Debug)]
pub struct GameForm {
    pub name: FormField,
    pub description: FormField,
    pub form: FormState,
    pub focus: FocusManager,
    submit_label: &'static str,
    submit_area: Option<Rect>,
    cancel_area: Option<Rect>,
}

impl GameForm {
    pub fn new() -> Self {
        let name = FormField::text(
            "name",
            "Game Name",
            TextInput::new().with_placeholder("Enter Game Name"),
        );
        let description = FormField::text(
            "description",
            "Description",
            TextInput::new().with_placeholder("Short description"),
        );

        let mut focus = FocusManager::new();
        focus.set_tab_order(vec![
            FocusableComponent::TextInput("name".to_string()),
            FocusableComponent::TextInput("description".to_string()),
            FocusableComponent::Button("submit".to_string()),
            FocusableComponent::Button("cancel".to_string()),
        ]);
        focus.focus_first();

        let mut editor = Self {
            name,
            description,
            form: FormState::new(),
            focus,
            submit_label: "Create Game",
            submit_area: None,
            cancel_area: None,
        };
        editor.sync_focus();
        editor
    }

    pub fn from_row(row: &GameRow) -> Self {
        let mut editor = Self::new();
        editor.submit_label = "Save Changes";
        editor.name.set_value(&row.name);
        editor.description.set_value(&row.description);
        editor
    }

    fn fields_and_focus(&mut self) -> ([&mut FormField; 2], &mut FocusManager) {
        let Self {
            name,
            description,
            focus,
            ..
        } = self;
        ([name, description], focus)
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
        ok &= self
            .description
            .validate_into(&mut self.form, validate_required);
        ok
    }

    pub fn to_row(&self, id: u64) -> GameRow {
        GameRow {
            id,
            name: self.name.value(),
            description: self.description.value(),
            created: chrono::Local::now().date_naive(),
            status: Status::Active,
        }
    }

    pub fn apply_to(&self, row: &mut GameRow) {
        row.name = self.name.value();
        row.description = self.description.value();
    }
}

impl Default for GameForm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct GamesScreenState {
    pub filter: StatusFilter,
    pub table: TableView,
    pub create: Dialog,
    create_trigger: DialogTrigger,
    create_content: DialogContent,
    pub edit: Dialog,
    edit_content: DialogContent,
    pub editing_id: Option<u64>,
    pub editor: GameForm,
}

impl Default for GamesScreenState {
    fn default() -> Self {
        let create = Dialog::new();
        let create_trigger = DialogTrigger::new("New Game [n]").in_scope(create.scope());
        let create_content = DialogContent::new()
            .in_scope(create.scope())
            .with_title("Create Game")
            .sized(60, 70);
        let edit = Dialog::controlled(false);
        let edit_content = DialogContent::new()
            .in_scope(edit.scope())
            .with_title("Edit Game")
            .sized(60, 70);
        Self {
            filter: StatusFilter::All,
            table: TableView::default(),
            create,
            create_trigger,
            create_content,
            edit,
            edit_content,
            editing_id: None,
            editor: GameForm::new(),
        }
    }
}

impl GamesScreenState {
    pub fn filtered<'a>(&self, rows: &'a [GameRow]) -> Vec<&'a GameRow> {
        rows.iter()
            .filter(|row| self.filter.matches(row.status))
            .collect()
    }

    pub fn modal_open(&self) -> bool {
        self.create.is_open() || self.edit.is_open()
    }

    pub fn open_create(&mut self) {
        self.editor = GameForm::new();
        self.create_trigger.activate(&mut self.create, || {});
    }

    pub fn open_edit(&mut self, row: &GameRow) {
        self.editor = GameForm::from_row(row);
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
        let rows = self.filtered(&store.games);
        self.table.selected_index(rows.len()).map(|i| rows[i].id)
    }

    pub fn delete_game(&mut self, store: &mut DataStore, id: u64) -> bool {
        let removed = store::delete_row(&mut store.games, id);
        if removed {
            if self.editing_id == Some(id) {
                self.close_edit();
            }
            let len = self.filtered(&store.games).len();
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

        let len = self.filtered(&store.games).len();
        match event {
            Event::Char('n') => {
                self.open_create();
                ScreenResponse::Handled
            }
            Event::Char('e') | Event::Enter => {
                let row = self
                    .selected_id(store)
                    .and_then(|id| store.games.iter().find(|r| r.id == id).cloned());
                if let Some(row) = row {
                    self.open_edit(&row);
                }
                ScreenResponse::Handled
            }
            Event::Char('t') => match self.selected_id(store) {
                Some(id) => {
                    store::toggle_status(&mut store.games, id);
                    ScreenResponse::success("Game status updated")
                }
                None => ScreenResponse::Handled,
            },
            Event::Char('d') => match self.selected_id(store) {
                Some(id) => {
                    self.delete_game(store, id);
                    ScreenResponse::success("Game deleted")
                }
                None => ScreenResponse::Handled,
            },
            Event::Char('f') => {
                self.filter = self.filter.next();
                let len = self.filtered(&store.games).len();
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
        let row = self.editor.to_row(store::next_id(&store.games));
        store::insert_top(&mut store.games, row);
        self.create.close();
        self.table.page = 0;
        self.table.state.select(Some(0));
        ScreenResponse::success("Game created")
    }

    fn submit_edit(&mut self, store: &mut DataStore) -> ScreenResponse {
        if !self.editor.validate() {
            return ScreenResponse::error("Fix the highlighted fields");
        }
        let Some(id) = self.editing_id else {
            self.close_edit();
            return ScreenResponse::Handled;
        };
        if let Some(row) = store::find_mut(&mut store.games, id) {
            self.editor.apply_to(row);
        }
        self.close_edit();
        ScreenResponse::success("Game updated")
    }
}

pub fn render_games(
    f: &mut Frame,
    state: &mut GamesScreenState,
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
        .constraints([Constraint::Length(17), Constraint::Min(0)])
        .split(chunks[0]);
    state.create_trigger.render(f, toolbar[0], false);
    let filter_text = Paragraph::new(format!("Filter: {}  [f to cycle]", state.filter.label()))
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(filter_text, toolbar[1]);

    let filtered = state.filtered(&store.games);
    state.table.clamp(filtered.len());
    let rows: Vec<Vec<String>> = filtered
        .iter()
        .map(|row| {
            vec![
                row.id.to_string(),
                row.name.clone(),
                row.description.clone(),
                row.created.format("%Y-%m-%d").to_string(),
                row.status.label().to_string(),
            ]
        })
        .collect();

    render_table(
        f,
        chunks[1],
        "Game Management",
        &["SL", "Game Name", "Description", "Created", "Status"],
        &[
            Constraint::Length(4),
            Constraint::Length(20),
            Constraint::Min(24),
            Constraint::Length(11),
            Constraint::Length(9),
        ],
        &rows,
        &mut state.table,
        focused,
    );
}

pub fn render_games_overlays(f: &mut Frame, state: &mut GamesScreenState) {
    let viewport = f.area();
    if let Some(body) = state
        .create_content
        .render(f, &mut state.create, viewport)
    {
        render_game_form(f, body, &mut state.editor);
    }
    if let Some(body) = state.edit_content.render(f, &mut state.edit, viewport) {
        render_game_form(f, body, &mut state.editor);
    }
}

fn render_game_form(f: &mut Frame, body: Rect, editor: &mut GameForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(body);

    editor.name.render(f, chunks[0], &editor.form);
    editor.description.render(f, chunks[1], &editor.form);

    let (cancel, submit) = render_form_buttons(f, chunks[2], editor.submit_label, &editor.focus);
    editor.cancel_area = Some(cancel);
    editor.submit_area = Some(submit);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_stamps_today_and_inserts_at_top() {
        let mut state = GamesScreenState::default();
        let mut store = DataStore::seeded();
        let before = store.games.len();

        state.handle_event(&Event::Char('n'), &mut store);
        state.editor.name.set_value("Sky Duel");
        state.editor.description.set_value("Head-to-head trivia");
        state.editor.focus.focus_id("submit");
        state.handle_event(&Event::Enter, &mut store);

        assert_eq!(store.games.len(), before + 1);
        assert_eq!(store.games[0].name, "Sky Duel");
        assert_eq!(store.games[0].created, chrono::Local::now().date_naive());
        assert_eq!(store.games[0].status, Status::Active);
        assert!(!state.create.is_open());
    }

    #[test]
    fn test_edit_preserves_created_date() {
        let mut state = GamesScreenState::default();
        let mut store = DataStore::seeded();
        let original_created = store.games[0].created;

        let row = store.games[0].clone();
        state.open_edit(&row);
        state.editor.description.set_value("Updated copy");
        state.editor.focus.focus_id("submit");
        state.handle_event(&Event::Enter, &mut store);

        assert_eq!(store.games[0].description, "Updated copy");
        assert_eq!(store.games[0].created, original_created);
    }

    #[test]
    fn test_empty_description_blocks_submit() {
        let mut state = GamesScreenState::default();
        let mut store = DataStore::seeded();

        state.handle_event(&Event::Char('n'), &mut store);
        state.editor.name.set_value("No Description");
        state.editor.focus.focus_id("submit");
        state.handle_event(&Event::Enter, &mut store);

        assert!(state.create.is_open());
        assert!(state.editor.form.has_errors());
    }
}
