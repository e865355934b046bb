//! Aura package management screen

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::components::binding::FormState;
use crate::components::dialog::{Dialog, DialogContent, DialogTrigger, OpenRequest};
use crate::components::forms::{FormField, InputKind, TextInput};
use crate::components::tables::{render_table, TableView};
use crate::data::model::{PackageRow, Status};
use crate::data::store::{self, DataStore};
use crate::events::{Event, FocusableComponent};
use crate::utils::focus_manager::FocusManager;
use crate::utils::validation::{validate_number, validate_price, validate_required};

use super::{
    options_select, rect_hit, render_form_buttons, route_form_event, FormRouting, ScreenResponse,
    StatusFilter,
};

const DURATION_OPTIONS: [&str; 4] = ["7 days", "30 days", "90 days", "365 days"];

#[derive(Debug)]
pub struct PackageForm {
    pub name: FormField,
    pub duration: FormField,
    pub price: FormField,
    pub stock: FormField,
    pub form: FormState,
    pub focus: FocusManager,
    submit_label: &'static str,
    submit_area: Option<Rect>,
    cancel_area: Option<Rect>,
}

impl PackageForm {
    pub fn new() -> Self {
        let name = FormField::text(
            "name",
            "Package Name",
            TextInput::new().with_placeholder("Starter Aura"),
        );
        let duration = FormField::select("duration", "Duration", options_select(&DURATION_OPTIONS));
        let price = FormField::text(
            "price",
            "Price",
            TextInput::new().kind(InputKind::Decimal).with_placeholder("4.99"),
        );
        let stock = FormField::text(
            "stock",
            "Stock",
            TextInput::new().kind(InputKind::Number).with_placeholder("1000"),
        );

        let mut focus = FocusManager::new();
        focus.set_tab_order(vec![
            FocusableComponent::TextInput("name".to_string()),
            FocusableComponent::Dropdown("duration".to_string()),
            FocusableComponent::TextInput("price".to_string()),
            FocusableComponent::TextInput("stock".to_string()),
            FocusableComponent::Button("submit".to_string()),
            FocusableComponent::Button("cancel".to_string()),
        ]);
        focus.focus_first();

        let mut editor = Self {
            name,
            duration,
            price,
            stock,
            form: FormState::new(),
            focus,
            submit_label: "Create Package",
            submit_area: None,
            cancel_area: None,
        };
        editor.sync_focus();
        editor
    }

    pub fn from_row(row: &PackageRow) -> Self {
        let mut editor = Self::new();
        editor.submit_label = "Save Changes";
        editor.name.set_value(&row.name);
        editor.duration.set_value(&row.duration);
        editor.price.set_value(&format!("{:.2}", row.price));
        editor.stock.set_value(&row.stock.to_string());
        editor
    }

    fn fields_and_focus(&mut self) -> ([&mut FormField; 4], &mut FocusManager) {
        let Self {
            name,
            duration,
            price,
            stock,
            focus,
            ..
        } = self;
        ([name, duration, price, stock], focus)
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
        ok &= self.duration.validate_into(&mut self.form, |v| {
            if v.is_empty() {
                Err("Select a duration".to_string())
            } else {
                Ok(())
            }
        });
        ok &= self
            .price
            .validate_into(&mut self.form, |v| validate_price(v).map(|_| ()));
        ok &= self
            .stock
            .validate_into(&mut self.form, |v| validate_number(v).map(|_| ()));
        ok
    }

    pub fn to_row(&self, id: u64) -> PackageRow {
        PackageRow {
            id,
            name: self.name.value(),
            duration: self.duration.value(),
            price: self.price.value().parse().unwrap_or(0.0),
            stock: self.stock.value().parse().unwrap_or(0),
            status: Status::Active,
        }
    }

    pub fn apply_to(&self, row: &mut PackageRow) {
        row.name = self.name.value();
        row.duration = self.duration.value();
        row.price = self.price.value().parse().unwrap_or(0.0);
        row.stock = self.stock.value().parse().unwrap_or(0);
    }
}

impl Default for PackageForm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct PackagesScreenState {
    pub filter: StatusFilter,
    pub table: TableView,
    pub create: Dialog,
    create_trigger: DialogTrigger,
    create_content: DialogContent,
    pub edit: Dialog,
    edit_content: DialogContent,
    pub editing_id: Option<u64>,
    pub editor: PackageForm,
}

impl Default for PackagesScreenState {
    fn default() -> Self {
        let create = Dialog::new();
        let create_trigger = DialogTrigger::new("New Package [n]").in_scope(create.scope());
        let create_content = DialogContent::new()
            .in_scope(create.scope())
            .with_title("Create Package")
            .sized(65, 90);
        let edit = Dialog::controlled(false);
        let edit_content = DialogContent::new()
            .in_scope(edit.scope())
            .with_title("Edit Package")
            .sized(65, 90);
        Self {
            filter: StatusFilter::All,
            table: TableView::default(),
            create,
            create_trigger,
            create_content,
            edit,
            edit_content,
            editing_id: None,
            editor: PackageForm::new(),
        }
    }
}

impl PackagesScreenState {
    pub fn filtered<'a>(&self, rows: &'a [PackageRow]) -> Vec<&'a PackageRow> {
        rows.iter()
            .filter(|row| self.filter.matches(row.status))
            .collect()
    }

    pub fn modal_open(&self) -> bool {
        self.create.is_open() || self.edit.is_open()
    }

    pub fn open_create(&mut self) {
        self.editor = PackageForm::new();
        self.create_trigger.activate(&mut self.create, || {});
    }

    pub fn open_edit(&mut self, row: &PackageRow) {
        self.editor = PackageForm::from_row(row);
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
        let rows = self.filtered(&store.packages);
        self.table.selected_index(rows.len()).map(|i| rows[i].id)
    }

    pub fn delete_package(&mut self, store: &mut DataStore, id: u64) -> bool {
        let removed = store::delete_row(&mut store.packages, id);
        if removed {
            if self.editing_id == Some(id) {
                self.close_edit();
            }
            let len = self.filtered(&store.packages).len();
            self.table.clamp(len);
        }
        removed
    }

    pub fn handle_event(&mut self, event: &Event, store: &mut DataStore) -> ScreenResponse {
        if self.create.is_open() {
            return self.handle_dialog(event, store, false);
        }
        if self.edit.is_open() {
            return self.handle_dialog(event, store, true);
        }

        let len = self.filtered(&store.packages).len();
        match event {
            Event::Char('n') => {
                self.open_create();
                ScreenResponse::Handled
            }
            Event::Char('e') | Event::Enter => {
                let row = self
                    .selected_id(store)
                    .and_then(|id| store.packages.iter().find(|r| r.id == id).cloned());
                if let Some(row) = row {
                    self.open_edit(&row);
                }
                ScreenResponse::Handled
            }
            Event::Char('t') => match self.selected_id(store) {
                Some(id) => {
                    store::toggle_status(&mut store.packages, id);
                    ScreenResponse::success("Package status updated")
                }
                None => ScreenResponse::Handled,
            },
            Event::Char('d') => match self.selected_id(store) {
                Some(id) => {
                    self.delete_package(store, id);
                    ScreenResponse::success("Package deleted")
                }
                None => ScreenResponse::Handled,
            },
            Event::Char('f') => {
                self.filter = self.filter.next();
                let len = self.filtered(&store.packages).len();
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

    fn handle_dialog(&mut self, event: &Event, store: &mut DataStore, editing: bool) -> ScreenResponse {
        match self.editor.route(event) {
            FormRouting::Consumed => ScreenResponse::Handled,
            FormRouting::Submit => {
                if editing {
                    self.submit_edit(store)
                } else {
                    self.submit_create(store)
                }
            }
            FormRouting::Cancel => {
                if editing {
                    self.close_edit();
                } else {
                    self.create.close();
                }
                ScreenResponse::Handled
            }
            FormRouting::NotHandled => {
                if let Event::Click { column, row } = event {
                    if rect_hit(self.editor.submit_area, *column, *row) {
                        return if editing {
                            self.submit_edit(store)
                        } else {
                            self.submit_create(store)
                        };
                    }
                    if rect_hit(self.editor.cancel_area, *column, *row) {
                        if editing {
                            self.close_edit();
                        } else {
                            self.create.close();
                        }
                        return ScreenResponse::Handled;
                    }
                }
                if editing {
                    self.edit.handle_event(event);
                    self.apply_edit_requests();
                } else {
                    self.create.handle_event(event);
                }
                ScreenResponse::Handled
            }
        }
    }

    fn submit_create(&mut self, store: &mut DataStore) -> ScreenResponse {
        if !self.editor.validate() {
            return ScreenResponse::error("Fix the highlighted fields");
        }
        let row = self.editor.to_row(store::next_id(&store.packages));
        store::insert_top(&mut store.packages, row);
        self.create.close();
        self.table.page = 0;
        self.table.state.select(Some(0));
        ScreenResponse::success("Package created")
    }

    fn submit_edit(&mut self, store: &mut DataStore) -> ScreenResponse {
        if !self.editor.validate() {
            return ScreenResponse::error("Fix the highlighted fields");
        }
        let Some(id) = self.editing_id else {
            self.close_edit();
            return ScreenResponse::Handled;
        };
        if let Some(row) = store::find_mut(&mut store.packages, id) {
            self.editor.apply_to(row);
        }
        self.close_edit();
        ScreenResponse::success("Package updated")
    }
}

pub fn render_packages(
    f: &mut Frame,
    state: &mut PackagesScreenState,
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
        .constraints([Constraint::Length(20), Constraint::Min(0)])
        .split(chunks[0]);
    state.create_trigger.render(f, toolbar[0], false);
    let filter_text = Paragraph::new(format!("Filter: {}  [f to cycle]", state.filter.label()))
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(filter_text, toolbar[1]);

    let filtered = state.filtered(&store.packages);
    state.table.clamp(filtered.len());
    let rows: Vec<Vec<String>> = filtered
        .iter()
        .map(|row| {
            vec![
                row.id.to_string(),
                row.name.clone(),
                row.duration.clone(),
                format!("${:.2}", row.price),
                row.stock.to_string(),
                row.status.label().to_string(),
            ]
        })
        .collect();

    render_table(
        f,
        chunks[1],
        "Aura Package Management",
        &["SL", "Package Name", "Duration", "Price", "Stock", "Status"],
        &[
            Constraint::Length(4),
            Constraint::Min(16),
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Length(7),
            Constraint::Length(9),
        ],
        &rows,
        &mut state.table,
        focused,
    );
}

pub fn render_packages_overlays(f: &mut Frame, state: &mut PackagesScreenState) {
    let viewport = f.area();
    if let Some(body) = state
        .create_content
        .render(f, &mut state.create, viewport)
    {
        render_package_form(f, body, &mut state.editor);
    }
    if let Some(body) = state.edit_content.render(f, &mut state.edit, viewport) {
        render_package_form(f, body, &mut state.editor);
    }
}

fn render_package_form(f: &mut Frame, body: Rect, editor: &mut PackageForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
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
    editor.duration.render(f, first[1], &editor.form);

    let second = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    editor.price.render(f, second[0], &editor.form);
    editor.stock.render(f, second[1], &editor.form);

    let (cancel, submit) = render_form_buttons(f, chunks[2], editor.submit_label, &editor.focus);
    editor.cancel_area = Some(cancel);
    editor.submit_area = Some(submit);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_parses_price_and_stock() {
        let mut state = PackagesScreenState::default();
        let mut store = DataStore::seeded();

        state.handle_event(&Event::Char('n'), &mut store);
        state.editor.name.set_value("Mega Aura");
        state.editor.duration.set_value("90 days");
        state.editor.price.set_value("29.99");
        state.editor.stock.set_value("60");
        state.editor.focus.focus_id("submit");
        state.handle_event(&Event::Enter, &mut store);

        assert_eq!(store.packages[0].name, "Mega Aura");
        assert_eq!(store.packages[0].duration, "90 days");
        assert!((store.packages[0].price - 29.99).abs() < f64::EPSILON);
        assert_eq!(store.packages[0].stock, 60);
        assert_eq!(store.packages[0].status, Status::Active);
    }

    #[test]
    fn test_decimal_input_filters_typed_characters() {
        let mut editor = PackageForm::new();
        editor.price.set_focused(true);
        for c in "-12a.5.0".chars() {
            editor.price.handle_event(&Event::Char(c));
        }
        // Sign, letter, and second decimal point are all dropped
        assert_eq!(editor.price.value(), "12.50");
    }

    #[test]
    fn test_edit_roundtrips_price_formatting() {
        let store = DataStore::seeded();
        let editor = PackageForm::from_row(&store.packages[0]);
        assert_eq!(editor.price.value(), "4.99");
        assert_eq!(editor.duration.value(), "7 days");
    }

    #[test]
    fn test_filter_hides_inactive_packages() {
        let mut state = PackagesScreenState::default();
        let mut store = DataStore::seeded();
        store.packages[1].status = Status::Inactive;

        state.filter = StatusFilter::Active;
        let filtered = state.filtered(&store.packages);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|row| row.status == Status::Active));
    }
}
