//! Shop bundle management screen
//!
//! Bundles come in two shapes: aura bundles sell an aura amount for a
//! dollar price, call bundles sell call minutes for an aura price. The
//! form swaps its dependent fields when the type changes, remounting them
//! under fresh scopes, and the table filters on type and status.

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
use crate::data::model::{BundleRow, BundleType, Status};
use crate::data::store::{self, DataStore};
use crate::events::{Event, FocusableComponent};
use crate::utils::focus_manager::FocusManager;
use crate::utils::validation::{validate_number, validate_price, validate_required};

use super::{
    options_select, rect_hit, render_form_buttons, route_form_event, FormRouting, ScreenResponse,
    StatusFilter,
};

const TYPE_OPTIONS: [&str; 2] = ["Aura Bundle", "Call Bundle"];

/// Bundle type filter, cycled independently of the status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Aura,
    Call,
}

impl TypeFilter {
    pub fn matches(&self, bundle_type: BundleType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Aura => bundle_type == BundleType::Aura,
            TypeFilter::Call => bundle_type == BundleType::Call,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            TypeFilter::All => TypeFilter::Aura,
            TypeFilter::Aura => TypeFilter::Call,
            TypeFilter::Call => TypeFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TypeFilter::All => "All Types",
            TypeFilter::Aura => "Aura Bundles",
            TypeFilter::Call => "Call Bundles",
        }
    }
}

#[derive(Debug)]
pub struct BundleForm {
    pub bundle_type: FormField,
    pub aura_amount: FormField,
    pub price: FormField,
    pub stock: FormField,
    pub form: FormState,
    pub focus: FocusManager,
    submit_label: &'static str,
    submit_area: Option<Rect>,
    cancel_area: Option<Rect>,
}

fn dependent_fields(bundle_type: BundleType) -> (FormField, FormField) {
    match bundle_type {
        BundleType::Aura => (
            FormField::text(
                "aura_amount",
                "Aura Amount",
                TextInput::new().kind(InputKind::Number).with_placeholder("550"),
            ),
            FormField::text(
                "price",
                "Price",
                TextInput::new().with_placeholder("$4.99"),
            ),
        ),
        BundleType::Call => (
            FormField::text(
                "aura_amount",
                "Aura Needed",
                TextInput::new().kind(InputKind::Number).with_placeholder("100"),
            ),
            FormField::text(
                "price",
                "Call Duration",
                TextInput::new().with_placeholder("10 min"),
            ),
        ),
    }
}

impl BundleForm {
    pub fn new() -> Self {
        let bundle_type =
            FormField::select("bundle_type", "Bundle Type", options_select(&TYPE_OPTIONS));
        let (aura_amount, price) = dependent_fields(BundleType::Aura);
        let stock = FormField::text(
            "stock",
            "Stock",
            TextInput::new().kind(InputKind::Number).with_placeholder("1000"),
        );

        let mut focus = FocusManager::new();
        focus.set_tab_order(vec![
            FocusableComponent::Dropdown("bundle_type".to_string()),
            FocusableComponent::TextInput("aura_amount".to_string()),
            FocusableComponent::TextInput("price".to_string()),
            FocusableComponent::TextInput("stock".to_string()),
            FocusableComponent::Button("submit".to_string()),
            FocusableComponent::Button("cancel".to_string()),
        ]);
        focus.focus_first();

        let mut editor = Self {
            bundle_type,
            aura_amount,
            price,
            stock,
            form: FormState::new(),
            focus,
            submit_label: "Create Bundle",
            submit_area: None,
            cancel_area: None,
        };
        editor.bundle_type.set_value("Aura Bundle");
        editor.sync_focus();
        editor
    }

    pub fn from_row(row: &BundleRow) -> Self {
        let mut editor = Self::new();
        editor.submit_label = "Save Changes";
        editor.bundle_type.set_value(row.bundle_type.label());
        editor.sync_dependent_fields();
        editor.aura_amount.set_value(&row.aura_amount.to_string());
        editor.price.set_value(&row.price);
        editor.stock.set_value(&row.stock.to_string());
        editor
    }

    pub fn selected_type(&self) -> BundleType {
        if self.bundle_type.value() == "Call Bundle" {
            BundleType::Call
        } else {
            BundleType::Aura
        }
    }

    /// Remount the amount and price fields for the current type. Their
    /// values reset with the remount; stock carries over.
    pub fn sync_dependent_fields(&mut self) {
        let (aura_amount, price) = dependent_fields(self.selected_type());
        self.aura_amount = aura_amount;
        self.price = price;
        self.sync_focus();
    }

    fn fields_and_focus(&mut self) -> ([&mut FormField; 4], &mut FocusManager) {
        let Self {
            bundle_type,
            aura_amount,
            price,
            stock,
            focus,
            ..
        } = self;
        ([bundle_type, aura_amount, price, stock], focus)
    }

    fn sync_focus(&mut self) {
        let (mut fields, focus) = self.fields_and_focus();
        super::sync_field_focus(&mut fields, focus);
    }

    pub fn route(&mut self, event: &Event) -> FormRouting {
        let type_before = self.bundle_type.value();
        let (mut fields, focus) = self.fields_and_focus();
        let routing = route_form_event(&mut fields, focus, event);
        if self.bundle_type.value() != type_before {
            self.sync_dependent_fields();
        }
        routing
    }

    pub fn validate(&mut self) -> bool {
        let mut ok = self.bundle_type.validate_into(&mut self.form, |v| {
            if v.is_empty() {
                Err("Select a bundle type".to_string())
            } else {
                Ok(())
            }
        });
        ok &= self
            .aura_amount
            .validate_into(&mut self.form, |v| validate_number(v).map(|_| ()));
        ok &= match self.selected_type() {
            BundleType::Aura => self.price.validate_into(&mut self.form, |v| {
                validate_price(v.trim_start_matches('$')).map(|_| ())
            }),
            BundleType::Call => self.price.validate_into(&mut self.form, validate_required),
        };
        ok &= self
            .stock
            .validate_into(&mut self.form, |v| validate_number(v).map(|_| ()));
        ok
    }

    /// Aura bundle prices display with a dollar sign regardless of how
    /// the value was typed.
    fn normalized_price(&self) -> String {
        let raw = self.price.value();
        match self.selected_type() {
            BundleType::Aura if !raw.starts_with('$') => format!("${raw}"),
            _ => raw,
        }
    }

    pub fn to_row(&self, id: u64) -> BundleRow {
        BundleRow {
            id,
            bundle_type: self.selected_type(),
            aura_amount: self.aura_amount.value().parse().unwrap_or(0),
            price: self.normalized_price(),
            stock: self.stock.value().parse().unwrap_or(0),
            created: chrono::Local::now().date_naive(),
            status: Status::Active,
        }
    }

    pub fn apply_to(&self, row: &mut BundleRow) {
        row.bundle_type = self.selected_type();
        row.aura_amount = self.aura_amount.value().parse().unwrap_or(0);
        row.price = self.normalized_price();
        row.stock = self.stock.value().parse().unwrap_or(0);
    }
}

impl Default for BundleForm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ShopScreenState {
    pub filter: StatusFilter,
    pub type_filter: TypeFilter,
    pub table: TableView,
    pub create: Dialog,
    create_trigger: DialogTrigger,
    create_content: DialogContent,
    pub edit: Dialog,
    edit_content: DialogContent,
    pub editing_id: Option<u64>,
    pub editor: BundleForm,
}

impl Default for ShopScreenState {
    fn default() -> Self {
        let create = Dialog::new();
        let create_trigger = DialogTrigger::new("New Bundle [n]").in_scope(create.scope());
        let create_content = DialogContent::new()
            .in_scope(create.scope())
            .with_title("Create Bundle")
            .sized(65, 90);
        let edit = Dialog::controlled(false);
        let edit_content = DialogContent::new()
            .in_scope(edit.scope())
            .with_title("Edit Bundle")
            .sized(65, 90);
        Self {
            filter: StatusFilter::All,
            type_filter: TypeFilter::All,
            table: TableView::default(),
            create,
            create_trigger,
            create_content,
            edit,
            edit_content,
            editing_id: None,
            editor: BundleForm::new(),
        }
    }
}

impl ShopScreenState {
    pub fn filtered<'a>(&self, rows: &'a [BundleRow]) -> Vec<&'a BundleRow> {
        rows.iter()
            .filter(|row| {
                self.filter.matches(row.status) && self.type_filter.matches(row.bundle_type)
            })
            .collect()
    }

    pub fn modal_open(&self) -> bool {
        self.create.is_open() || self.edit.is_open()
    }

    pub fn open_create(&mut self) {
        self.editor = BundleForm::new();
        self.create_trigger.activate(&mut self.create, || {});
    }

    pub fn open_edit(&mut self, row: &BundleRow) {
        self.editor = BundleForm::from_row(row);
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
        let rows = self.filtered(&store.bundles);
        self.table.selected_index(rows.len()).map(|i| rows[i].id)
    }

    pub fn delete_bundle(&mut self, store: &mut DataStore, id: u64) -> bool {
        let removed = store::delete_row(&mut store.bundles, id);
        if removed {
            if self.editing_id == Some(id) {
                self.close_edit();
            }
            let len = self.filtered(&store.bundles).len();
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

        let len = self.filtered(&store.bundles).len();
        match event {
            Event::Char('n') => {
                self.open_create();
                ScreenResponse::Handled
            }
            Event::Char('e') | Event::Enter => {
                let row = self
                    .selected_id(store)
                    .and_then(|id| store.bundles.iter().find(|r| r.id == id).cloned());
                if let Some(row) = row {
                    self.open_edit(&row);
                }
                ScreenResponse::Handled
            }
            Event::Char('t') => match self.selected_id(store) {
                Some(id) => {
                    store::toggle_status(&mut store.bundles, id);
                    ScreenResponse::success("Bundle status updated")
                }
                None => ScreenResponse::Handled,
            },
            Event::Char('d') => match self.selected_id(store) {
                Some(id) => {
                    self.delete_bundle(store, id);
                    ScreenResponse::success("Bundle deleted")
                }
                None => ScreenResponse::Handled,
            },
            Event::Char('f') => {
                self.filter = self.filter.next();
                let len = self.filtered(&store.bundles).len();
                self.table.page = 0;
                self.table.clamp(len);
                ScreenResponse::info(format!("Filter: {}", self.filter.label()))
            }
            Event::Char('b') => {
                self.type_filter = self.type_filter.next();
                let len = self.filtered(&store.bundles).len();
                self.table.page = 0;
                self.table.clamp(len);
                ScreenResponse::info(format!("Filter: {}", self.type_filter.label()))
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
        let row = self.editor.to_row(store::next_id(&store.bundles));
        store::insert_top(&mut store.bundles, row);
        self.create.close();
        self.table.page = 0;
        self.table.state.select(Some(0));
        ScreenResponse::success("Bundle created")
    }

    fn submit_edit(&mut self, store: &mut DataStore) -> ScreenResponse {
        if !self.editor.validate() {
            return ScreenResponse::error("Fix the highlighted fields");
        }
        let Some(id) = self.editing_id else {
            self.close_edit();
            return ScreenResponse::Handled;
        };
        if let Some(row) = store::find_mut(&mut store.bundles, id) {
            self.editor.apply_to(row);
        }
        self.close_edit();
        ScreenResponse::success("Bundle updated")
    }
}

pub fn render_shop(
    f: &mut Frame,
    state: &mut ShopScreenState,
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
        .constraints([Constraint::Length(19), Constraint::Min(0)])
        .split(chunks[0]);
    state.create_trigger.render(f, toolbar[0], false);
    let filter_text = Paragraph::new(format!(
        "{} / {}  [f: status, b: type]",
        state.filter.label(),
        state.type_filter.label()
    ))
    .style(Style::default().fg(Color::Gray))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(filter_text, toolbar[1]);

    let filtered = state.filtered(&store.bundles);
    state.table.clamp(filtered.len());
    let rows: Vec<Vec<String>> = filtered
        .iter()
        .map(|row| {
            vec![
                row.id.to_string(),
                row.bundle_type.label().to_string(),
                row.aura_amount.to_string(),
                row.price.clone(),
                row.stock.to_string(),
                row.created.format("%Y-%m-%d").to_string(),
                row.status.label().to_string(),
            ]
        })
        .collect();

    render_table(
        f,
        chunks[1],
        "Shop Management",
        &["SL", "Type", "Aura", "Price", "Stock", "Created", "Status"],
        &[
            Constraint::Length(4),
            Constraint::Min(13),
            Constraint::Length(7),
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Length(11),
            Constraint::Length(9),
        ],
        &rows,
        &mut state.table,
        focused,
    );
}

pub fn render_shop_overlays(f: &mut Frame, state: &mut ShopScreenState) {
    let viewport = f.area();
    if let Some(body) = state
        .create_content
        .render(f, &mut state.create, viewport)
    {
        render_bundle_form(f, body, &mut state.editor);
    }
    if let Some(body) = state.edit_content.render(f, &mut state.edit, viewport) {
        render_bundle_form(f, body, &mut state.editor);
    }
}

fn render_bundle_form(f: &mut Frame, body: Rect, editor: &mut BundleForm) {
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

    editor.bundle_type.render(f, chunks[0], &editor.form);

    let pair = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    editor.aura_amount.render(f, pair[0], &editor.form);
    editor.price.render(f, pair[1], &editor.form);

    editor.stock.render(f, chunks[2], &editor.form);

    let (cancel, submit) = render_form_buttons(f, chunks[3], editor.submit_label, &editor.focus);
    editor.cancel_area = Some(cancel);
    editor.submit_area = Some(submit);
}
