//! Promo code management screen
//!
//! Adds two things over the basic table shell: a code generator wired to a
//! Generate button, and a discount value select whose options follow the
//! chosen promo kind (percentage steps or flat amounts).

use rand::Rng;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::components::binding::FormState;
use crate::components::dialog::{Dialog, DialogContent, DialogTrigger, OpenRequest};
use crate::components::forms::{FieldControl, FormField, InputKind, SelectOption, TextInput};
use crate::components::tables::{render_table, TableView};
use crate::data::model::{PromoKind, PromoRow, Status};
use crate::data::store::{self, DataStore};
use crate::events::{Event, FocusableComponent};
use crate::utils::focus_manager::FocusManager;
use crate::utils::validation::{validate_number, validate_promo_code};

use super::{
    options_select, rect_hit, render_form_buttons, route_form_event, FormRouting, ScreenResponse,
    StatusFilter,
};

const KIND_OPTIONS: [&str; 2] = ["Percentage", "Flat"];
const PERCENT_OPTIONS: [&str; 8] = ["5%", "10%", "15%", "20%", "25%", "30%", "40%", "50%"];
const FLAT_OPTIONS: [&str; 7] = ["5", "10", "25", "50", "100", "200", "500"];

/// Unambiguous code alphabet; no I, O, 0 or 1.
const CODE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const CODE_LEN: usize = 8;

pub fn generate_promo_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LEN)
        .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
        .collect()
}

#[derive(Debug)]
pub struct PromoForm {
    pub code: FormField,
    pub kind: FormField,
    pub value: FormField,
    pub max_uses: FormField,
    pub form: FormState,
    pub focus: FocusManager,
    submit_label: &'static str,
    generate_area: Option<Rect>,
    submit_area: Option<Rect>,
    cancel_area: Option<Rect>,
}

impl PromoForm {
    pub fn new() -> Self {
        let code = FormField::text(
            "code",
            "Promo Code",
            TextInput::new().with_placeholder("AURA50"),
        );
        let kind = FormField::select("kind", "Discount Type", options_select(&KIND_OPTIONS));
        let value = FormField::select("value", "Discount Value", options_select(&PERCENT_OPTIONS));
        let max_uses = FormField::text(
            "max_uses",
            "Max Uses",
            TextInput::new().kind(InputKind::Number).with_placeholder("100"),
        );

        let mut focus = FocusManager::new();
        focus.set_tab_order(vec![
            FocusableComponent::TextInput("code".to_string()),
            FocusableComponent::Button("generate".to_string()),
            FocusableComponent::Dropdown("kind".to_string()),
            FocusableComponent::Dropdown("value".to_string()),
            FocusableComponent::TextInput("max_uses".to_string()),
            FocusableComponent::Button("submit".to_string()),
            FocusableComponent::Button("cancel".to_string()),
        ]);
        focus.focus_first();

        let mut editor = Self {
            code,
            kind,
            value,
            max_uses,
            form: FormState::new(),
            focus,
            submit_label: "Create Promo",
            generate_area: None,
            submit_area: None,
            cancel_area: None,
        };
        editor.kind.set_value("Percentage");
        editor.sync_focus();
        editor
    }

    pub fn from_row(row: &PromoRow) -> Self {
        let mut editor = Self::new();
        editor.submit_label = "Save Changes";
        editor.code.set_value(&row.code);
        editor.kind.set_value(row.kind.label());
        editor.sync_value_options();
        editor.value.set_value(&row.value);
        editor.max_uses.set_value(&row.max_uses.to_string());
        editor
    }

    fn fields_and_focus(&mut self) -> ([&mut FormField; 4], &mut FocusManager) {
        let Self {
            code,
            kind,
            value,
            max_uses,
            focus,
            ..
        } = self;
        ([code, kind, value, max_uses], focus)
    }

    fn sync_focus(&mut self) {
        let (mut fields, focus) = self.fields_and_focus();
        super::sync_field_focus(&mut fields, focus);
    }

    pub fn route(&mut self, event: &Event) -> FormRouting {
        let kind_before = self.kind.value();
        let (mut fields, focus) = self.fields_and_focus();
        let routing = route_form_event(&mut fields, focus, event);
        if self.kind.value() != kind_before {
            self.sync_value_options();
        }
        routing
    }

    /// Swap the value options to match the current kind. The previous
    /// selection is dropped since it belongs to the other option set.
    pub fn sync_value_options(&mut self) {
        let options: &[&str] = match PromoKind::from_label(&self.kind.value()) {
            Some(PromoKind::Flat) => &FLAT_OPTIONS,
            _ => &PERCENT_OPTIONS,
        };
        if let FieldControl::Select(select) = self.value.control_mut() {
            select.set_options(
                options
                    .iter()
                    .map(|text| SelectOption::new(*text, text.to_string()))
                    .collect(),
            );
        }
    }

    pub fn regenerate(&mut self) {
        self.code.set_value(&generate_promo_code());
    }

    pub fn validate(&mut self) -> bool {
        let mut ok = self.code.validate_into(&mut self.form, validate_promo_code);
        ok &= self.kind.validate_into(&mut self.form, |v| {
            if v.is_empty() {
                Err("Select a discount type".to_string())
            } else {
                Ok(())
            }
        });
        ok &= self.value.validate_into(&mut self.form, |v| {
            if v.is_empty() {
                Err("Select a discount value".to_string())
            } else {
                Ok(())
            }
        });
        ok &= self
            .max_uses
            .validate_into(&mut self.form, |v| validate_number(v).map(|_| ()));
        ok
    }

    pub fn to_row(&self, id: u64) -> PromoRow {
        PromoRow {
            id,
            code: self.code.value(),
            kind: PromoKind::from_label(&self.kind.value()).unwrap_or_default(),
            value: self.value.value(),
            max_uses: self.max_uses.value().parse().unwrap_or(0),
            status: Status::Active,
        }
    }

    pub fn apply_to(&self, row: &mut PromoRow) {
        row.code = self.code.value();
        row.kind = PromoKind::from_label(&self.kind.value()).unwrap_or_default();
        row.value = self.value.value();
        row.max_uses = self.max_uses.value().parse().unwrap_or(0);
    }
}

impl Default for PromoForm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct PromosScreenState {
    pub filter: StatusFilter,
    pub table: TableView,
    pub create: Dialog,
    create_trigger: DialogTrigger,
    create_content: DialogContent,
    pub edit: Dialog,
    edit_content: DialogContent,
    pub editing_id: Option<u64>,
    pub editor: PromoForm,
}

impl Default for PromosScreenState {
    fn default() -> Self {
        let create = Dialog::new();
        let create_trigger = DialogTrigger::new("New Promo [n]").in_scope(create.scope());
        let create_content = DialogContent::new()
            .in_scope(create.scope())
            .with_title("Create Promo Code")
            .sized(65, 90);
        let edit = Dialog::controlled(false);
        let edit_content = DialogContent::new()
            .in_scope(edit.scope())
            .with_title("Edit Promo Code")
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
            editor: PromoForm::new(),
        }
    }
}

impl PromosScreenState {
    pub fn filtered<'a>(&self, rows: &'a [PromoRow]) -> Vec<&'a PromoRow> {
        rows.iter()
            .filter(|row| self.filter.matches(row.status))
            .collect()
    }

    pub fn modal_open(&self) -> bool {
        self.create.is_open() || self.edit.is_open()
    }

    pub fn open_create(&mut self) {
        self.editor = PromoForm::new();
        self.create_trigger.activate(&mut self.create, || {});
    }

    pub fn open_edit(&mut self, row: &PromoRow) {
        self.editor = PromoForm::from_row(row);
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
        let rows = self.filtered(&store.promos);
        self.table.selected_index(rows.len()).map(|i| rows[i].id)
    }

    pub fn delete_promo(&mut self, store: &mut DataStore, id: u64) -> bool {
        let removed = store::delete_row(&mut store.promos, id);
        if removed {
            if self.editing_id == Some(id) {
                self.close_edit();
            }
            let len = self.filtered(&store.promos).len();
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

        let len = self.filtered(&store.promos).len();
        match event {
            Event::Char('n') => {
                self.open_create();
                ScreenResponse::Handled
            }
            Event::Char('e') | Event::Enter => {
                let row = self
                    .selected_id(store)
                    .and_then(|id| store.promos.iter().find(|r| r.id == id).cloned());
                if let Some(row) = row {
                    self.open_edit(&row);
                }
                ScreenResponse::Handled
            }
            Event::Char('t') => match self.selected_id(store) {
                Some(id) => {
                    store::toggle_status(&mut store.promos, id);
                    ScreenResponse::success("Promo status updated")
                }
                None => ScreenResponse::Handled,
            },
            Event::Char('d') => match self.selected_id(store) {
                Some(id) => {
                    self.delete_promo(store, id);
                    ScreenResponse::success("Promo deleted")
                }
                None => ScreenResponse::Handled,
            },
            Event::Char('f') => {
                self.filter = self.filter.next();
                let len = self.filtered(&store.promos).len();
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

    /// Shared create/edit dialog handler; the generate button is checked
    /// before form routing so Enter on it regenerates instead of submitting.
    fn handle_dialog(&mut self, event: &Event, store: &mut DataStore, editing: bool) -> ScreenResponse {
        if matches!(event, Event::Enter) && self.editor.focus.is_focused_id("generate") {
            self.editor.regenerate();
            return ScreenResponse::Handled;
        }
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
                    if rect_hit(self.editor.generate_area, *column, *row) {
                        self.editor.regenerate();
                        return ScreenResponse::Handled;
                    }
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
        let row = self.editor.to_row(store::next_id(&store.promos));
        store::insert_top(&mut store.promos, row);
        self.create.close();
        self.table.page = 0;
        self.table.state.select(Some(0));
        ScreenResponse::success("Promo code created")
    }

    fn submit_edit(&mut self, store: &mut DataStore) -> ScreenResponse {
        if !self.editor.validate() {
            return ScreenResponse::error("Fix the highlighted fields");
        }
        let Some(id) = self.editing_id else {
            self.close_edit();
            return ScreenResponse::Handled;
        };
        if let Some(row) = store::find_mut(&mut store.promos, id) {
            self.editor.apply_to(row);
        }
        self.close_edit();
        ScreenResponse::success("Promo code updated")
    }
}

pub fn render_promos(
    f: &mut Frame,
    state: &mut PromosScreenState,
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

    let filtered = state.filtered(&store.promos);
    state.table.clamp(filtered.len());
    let rows: Vec<Vec<String>> = filtered
        .iter()
        .map(|row| {
            vec![
                row.id.to_string(),
                row.code.clone(),
                row.kind.label().to_string(),
                row.value.clone(),
                row.max_uses.to_string(),
                row.status.label().to_string(),
            ]
        })
        .collect();

    render_table(
        f,
        chunks[1],
        "Promo Code Management",
        &["SL", "Code", "Type", "Value", "Max Uses", "Status"],
        &[
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(9),
        ],
        &rows,
        &mut state.table,
        focused,
    );
}

pub fn render_promos_overlays(f: &mut Frame, state: &mut PromosScreenState) {
    let viewport = f.area();
    if let Some(body) = state
        .create_content
        .render(f, &mut state.create, viewport)
    {
        render_promo_form(f, body, &mut state.editor);
    }
    if let Some(body) = state.edit_content.render(f, &mut state.edit, viewport) {
        render_promo_form(f, body, &mut state.editor);
    }
}

fn render_promo_form(f: &mut Frame, body: Rect, editor: &mut PromoForm) {
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

    // Code input with the generate button beside it
    let code_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[0]);
    editor.code.render(f, code_row[0], &editor.form);
    let button_area = Rect {
        x: code_row[1].x,
        y: code_row[1].y + 1,
        width: code_row[1].width,
        height: 3.min(code_row[1].height),
    };
    let generate_focused = editor.focus.is_focused_id("generate");
    let generate_style = if generate_focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let generate = Paragraph::new("Generate")
        .style(generate_style)
        .centered()
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(generate, button_area);
    editor.generate_area = Some(button_area);

    let pair = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    editor.kind.render(f, pair[0], &editor.form);
    editor.value.render(f, pair[1], &editor.form);

    editor.max_uses.render(f, chunks[2], &editor.form);

    let (cancel, submit) = render_form_buttons(f, chunks[3], editor.submit_label, &editor.focus);
    editor.cancel_area = Some(cancel);
    editor.submit_area = Some(submit);
}
