//! Form input widgets
//!
//! Reusable controls for the create/edit dialogs: a text input built on
//! tui-input, a select that opens an option list below its box, and a
//! checkbox. Controls only hold value, focus, and render state; field
//! identity and validation results flow through the binding layer in
//! [`crate::components::binding`], and validation rules live with the
//! screens in [`crate::utils::validation`].
//!
//! [`FormField`] composes a field scope, a label, one control, an optional
//! description, and the error message line into a single unit the dialogs
//! lay out vertically.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use tui_input::{Input, InputRequest};

use crate::components::binding::{
    FieldBinding, FieldDescription, FieldLabel, FieldMessage, FieldScope, FormState,
};
use crate::events::Event;

/// Character filter applied while typing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    /// Any text
    #[default]
    Text,
    /// Digits only
    Number,
    /// Digits with at most one decimal point
    Decimal,
    /// Hex color: leading '#' plus hex digits
    HexColor,
}

impl InputKind {
    fn accepts(&self, current: &str, c: char) -> bool {
        match self {
            InputKind::Text => true,
            InputKind::Number => c.is_ascii_digit(),
            InputKind::Decimal => c.is_ascii_digit() || (c == '.' && !current.contains('.')),
            InputKind::HexColor => {
                (c == '#' && current.is_empty()) || c.is_ascii_hexdigit()
            }
        }
    }
}

/// Single-line text control
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    input: Input,
    kind: InputKind,
    placeholder: String,
    focused: bool,
    /// Box rectangle recorded at last render, used for hit testing
    area: Option<Rect>,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.input = Input::default().with_value(value.into());
        self
    }

    pub fn set_value(&mut self, value: &str) {
        self.input = Input::default().with_value(value.to_string());
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn clear(&mut self) {
        self.input = Input::default();
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn hit(&self, column: u16, row: u16) -> bool {
        rect_hit(self.area, column, row)
    }

    /// Apply one editing request; characters the kind filter rejects are
    /// dropped.
    pub fn handle_input(&mut self, request: InputRequest) {
        if let InputRequest::InsertChar(c) = request {
            if !self.kind.accepts(self.input.value(), c) {
                return;
            }
        }
        self.input.handle(request);
    }

    /// Route a key event into the control when focused.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if !self.focused {
            return false;
        }
        match input_request_for(event) {
            Some(request) => {
                self.handle_input(request);
                true
            }
            None => false,
        }
    }

    /// Draw the bordered box and cursor; the label, description, and error
    /// line are rendered by the owning [`FormField`].
    pub fn render(&mut self, frame: &mut Frame, area: Rect, has_error: bool) {
        let border_style = if self.focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if has_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Blue)
        };

        let block = Block::default().borders(Borders::ALL).style(border_style);

        let showing_placeholder = self.input.value().is_empty() && !self.focused;
        let display_value = if showing_placeholder {
            self.placeholder.clone()
        } else {
            self.input.value().to_string()
        };

        let text_style = if showing_placeholder {
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC)
        } else {
            Style::default().fg(Color::White)
        };

        frame.render_widget(
            Paragraph::new(display_value).block(block).style(text_style),
            area,
        );

        if self.focused {
            let cursor_x = area.x + self.input.visual_cursor() as u16 + 1;
            let cursor_y = area.y + 1;
            frame.set_cursor_position((cursor_x, cursor_y));
        }

        self.area = Some(area);
    }
}

/// Option for the select control
#[derive(Debug, Clone)]
pub struct SelectOption<T> {
    pub text: String,
    pub value: T,
    pub enabled: bool,
}

impl<T> SelectOption<T> {
    pub fn new(text: impl Into<String>, value: T) -> Self {
        Self {
            text: text.into(),
            value,
            enabled: true,
        }
    }

    pub fn disabled(text: impl Into<String>, value: T) -> Self {
        Self {
            text: text.into(),
            value,
            enabled: false,
        }
    }
}

/// Single-value chooser that opens an option list below its box.
///
/// The list behaves like the dropdown primitive's content: it appears on
/// toggle, closes on selection or Escape, and only the highlighted option
/// moves while navigating with the arrow keys.
#[derive(Debug, Clone)]
pub struct Select<T> {
    options: Vec<SelectOption<T>>,
    selected: Option<usize>,
    open: bool,
    focused: bool,
    list_state: ListState,
    highlighted: Option<usize>,
    /// Box rectangle recorded at last render, used for hit testing
    area: Option<Rect>,
}

impl<T: Clone> Select<T> {
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
            selected: None,
            open: false,
            focused: false,
            list_state: ListState::default(),
            highlighted: None,
            area: None,
        }
    }

    pub fn with_options(mut self, options: Vec<SelectOption<T>>) -> Self {
        self.options = options;
        self
    }

    pub fn add_option(mut self, option: SelectOption<T>) -> Self {
        self.options.push(option);
        self
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.open = false;
            self.highlighted = None;
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn hit(&self, column: u16, row: u16) -> bool {
        rect_hit(self.area, column, row)
    }

    /// Toggle the option list open/closed.
    pub fn toggle(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.open = !self.open;
        if self.open {
            let initial = self.selected.unwrap_or(0);
            self.highlighted = Some(initial);
            self.list_state.select(Some(initial));
        } else {
            self.highlighted = None;
        }
    }

    /// Close the list without selecting (Escape path).
    pub fn close_list(&mut self) {
        self.open = false;
        self.highlighted = None;
    }

    pub fn move_up(&mut self) {
        if self.open && !self.options.is_empty() {
            let current = self.highlighted.unwrap_or(0);
            let next = if current > 0 {
                current - 1
            } else {
                self.options.len() - 1
            };
            self.highlighted = Some(next);
            self.list_state.select(Some(next));
        }
    }

    pub fn move_down(&mut self) {
        if self.open && !self.options.is_empty() {
            let current = self.highlighted.unwrap_or(0);
            let next = if current + 1 < self.options.len() {
                current + 1
            } else {
                0
            };
            self.highlighted = Some(next);
            self.list_state.select(Some(next));
        }
    }

    /// Select the highlighted option and close the list.
    pub fn select_current(&mut self) {
        if self.open {
            if let Some(highlighted) = self.highlighted {
                if highlighted < self.options.len() && self.options[highlighted].enabled {
                    self.selected = Some(highlighted);
                    self.open = false;
                    self.highlighted = None;
                }
            }
        }
    }

    pub fn selected_value(&self) -> Option<&T> {
        self.selected
            .and_then(|idx| self.options.get(idx))
            .map(|opt| &opt.value)
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selected
            .and_then(|idx| self.options.get(idx))
            .map(|opt| opt.text.as_str())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Replace the option set in place. The selection and any open list are
    /// reset since indices into the old set no longer apply.
    pub fn set_options(&mut self, options: Vec<SelectOption<T>>) {
        self.options = options;
        self.selected = None;
        self.open = false;
        self.highlighted = None;
        self.list_state.select(None);
    }

    pub fn select_by_value(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        if let Some((index, _)) = self
            .options
            .iter()
            .enumerate()
            .find(|(_, opt)| &opt.value == value)
        {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// Route a key event into the control when focused.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if !self.focused {
            return false;
        }
        match event {
            Event::Enter => {
                if self.open {
                    self.select_current();
                } else {
                    self.toggle();
                }
                true
            }
            Event::Up if self.open => {
                self.move_up();
                true
            }
            Event::Down if self.open => {
                self.move_down();
                true
            }
            Event::Escape if self.open => {
                self.close_list();
                true
            }
            _ => false,
        }
    }

    /// Draw the value box; the open option list overlays the rows below it.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, has_error: bool) {
        let box_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else if has_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Gray)
        };

        let selected_text = self
            .selected_text()
            .unwrap_or("Select an option...")
            .to_string();
        let arrow = if self.open { "▲" } else { "▼" };
        let display_text = format!("{selected_text} {arrow}");

        frame.render_widget(
            Paragraph::new(display_text)
                .block(Block::default().borders(Borders::ALL).style(box_style))
                .style(Style::default().fg(Color::White)),
            area,
        );
        self.area = Some(area);

        if self.open && !self.options.is_empty() {
            let list_height = (self.options.len() as u16 + 2).min(8);
            let list_area = Rect {
                x: area.x,
                y: area.y + area.height,
                width: area.width,
                height: list_height,
            }
            .intersection(frame.area());

            frame.render_widget(Clear, list_area);

            let items: Vec<ListItem> = self
                .options
                .iter()
                .enumerate()
                .map(|(idx, opt)| {
                    let style = if !opt.enabled {
                        Style::default().fg(Color::DarkGray)
                    } else if Some(idx) == self.highlighted {
                        Style::default().fg(Color::Black).bg(Color::Yellow)
                    } else {
                        Style::default().fg(Color::White)
                    };

                    let text = if Some(idx) == self.selected {
                        format!("✓ {}", opt.text)
                    } else {
                        format!("  {}", opt.text)
                    };

                    ListItem::new(text).style(style)
                })
                .collect();

            let list = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );

            frame.render_stateful_widget(list, list_area, &mut self.list_state);
        }
    }
}

impl<T: Clone> Default for Select<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Checkbox control
#[derive(Debug, Clone)]
pub struct Checkbox {
    label: String,
    checked: bool,
    focused: bool,
    enabled: bool,
    area: Option<Rect>,
}

impl Checkbox {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checked: false,
            focused: false,
            enabled: true,
            area: None,
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn toggle(&mut self) {
        if self.enabled {
            self.checked = !self.checked;
        }
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn hit(&self, column: u16, row: u16) -> bool {
        rect_hit(self.area, column, row)
    }

    pub fn handle_event(&mut self, event: &Event) -> bool {
        if !self.focused {
            return false;
        }
        match event {
            Event::Enter | Event::Char(' ') => {
                self.toggle();
                true
            }
            _ => false,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let symbol = if self.checked { "☑" } else { "☐" };

        let style = if !self.enabled {
            Style::default().fg(Color::DarkGray)
        } else if self.focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        frame.render_widget(
            Paragraph::new(format!("{symbol} {}", self.label)).style(style),
            area,
        );
        self.area = Some(area);
    }
}

/// The control slot of a form field
#[derive(Debug, Clone)]
pub enum FieldControl {
    Text(TextInput),
    Select(Select<String>),
    Check(Checkbox),
}

/// One labeled field bound to a named entry in a [`FormState`].
///
/// Composes the field scope with a label, a control, an optional
/// description, and the message line. The label-to-control association is
/// internal: a click on either resolves to the same control id.
#[derive(Debug, Clone)]
pub struct FormField {
    scope: FieldScope,
    label: FieldLabel,
    control: FieldControl,
    description: Option<FieldDescription>,
    message: FieldMessage,
}

impl FormField {
    pub fn text(field_name: &str, label: impl Into<String>, input: TextInput) -> Self {
        Self::with_control(field_name, label, FieldControl::Text(input))
    }

    pub fn select(field_name: &str, label: impl Into<String>, select: Select<String>) -> Self {
        Self::with_control(field_name, label, FieldControl::Select(select))
    }

    pub fn checkbox(field_name: &str, label: impl Into<String>, checkbox: Checkbox) -> Self {
        Self::with_control(field_name, label, FieldControl::Check(checkbox))
    }

    fn with_control(field_name: &str, label: impl Into<String>, control: FieldControl) -> Self {
        let scope = FieldScope::mount(field_name);
        let label = FieldLabel::for_control(scope.ids().control_id, label);
        Self {
            scope,
            label,
            control,
            description: None,
            message: FieldMessage::new(),
        }
    }

    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(FieldDescription::new(text));
        self
    }

    pub fn with_message_override(mut self, text: impl Into<String>) -> Self {
        self.message = FieldMessage::with_override(text);
        self
    }

    pub fn field_name(&self) -> &str {
        self.scope.field_name()
    }

    pub fn scope(&self) -> &FieldScope {
        &self.scope
    }

    pub fn control(&self) -> &FieldControl {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut FieldControl {
        &mut self.control
    }

    /// Current control value as text.
    pub fn value(&self) -> String {
        match &self.control {
            FieldControl::Text(input) => input.value().to_string(),
            FieldControl::Select(select) => {
                select.selected_text().unwrap_or_default().to_string()
            }
            FieldControl::Check(checkbox) => checkbox.is_checked().to_string(),
        }
    }

    /// Seed the control from an existing row value (edit dialogs).
    pub fn set_value(&mut self, value: &str) {
        match &mut self.control {
            FieldControl::Text(input) => input.set_value(value),
            FieldControl::Select(select) => {
                select.select_by_value(&value.to_string());
            }
            FieldControl::Check(checkbox) => checkbox.set_checked(value == "true"),
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        match &mut self.control {
            FieldControl::Text(input) => input.set_focused(focused),
            FieldControl::Select(select) => select.set_focused(focused),
            FieldControl::Check(checkbox) => checkbox.set_focused(focused),
        }
    }

    pub fn is_focused(&self) -> bool {
        match &self.control {
            FieldControl::Text(input) => input.is_focused(),
            FieldControl::Select(select) => select.is_focused(),
            FieldControl::Check(checkbox) => checkbox.is_focused(),
        }
    }

    /// Whether the select list of this field is currently open.
    pub fn is_list_open(&self) -> bool {
        matches!(&self.control, FieldControl::Select(select) if select.is_open())
    }

    /// Control id targeted by a click on the label or the control box, the
    /// `for` association made without caller wiring.
    pub fn click_target(&self, column: u16, row: u16) -> Option<String> {
        let hit = self.label.hit(column, row)
            || match &self.control {
                FieldControl::Text(input) => input.hit(column, row),
                FieldControl::Select(select) => select.hit(column, row),
                FieldControl::Check(checkbox) => checkbox.hit(column, row),
            };
        hit.then(|| self.label.for_id().to_string())
    }

    /// Route a key event into the focused control.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match &mut self.control {
            FieldControl::Text(input) => input.handle_event(event),
            FieldControl::Select(select) => select.handle_event(event),
            FieldControl::Check(checkbox) => checkbox.handle_event(event),
        }
    }

    /// Write the current value into the form under this field's name.
    pub fn sync_to_form(&self, form: &mut FormState) {
        form.set_value(self.scope.field_name(), self.value());
    }

    /// Sync the value, run the validator, and record the outcome.
    pub fn validate_into(
        &self,
        form: &mut FormState,
        rule: impl Fn(&str) -> Result<(), String>,
    ) -> bool {
        self.sync_to_form(form);
        let outcome = rule(&self.value());
        let valid = outcome.is_ok();
        form.record(self.scope.field_name(), outcome);
        valid
    }

    /// Binding accessor for this field.
    pub fn binding(&self, form: &FormState) -> FieldBinding {
        self.scope.binding(form)
    }

    /// Rows this field occupies: label, control, optional description, and
    /// the message line.
    pub fn height(&self) -> u16 {
        let control_height = match &self.control {
            FieldControl::Check(_) => 1,
            _ => 3,
        };
        1 + control_height + u16::from(self.description.is_some()) + 1
    }

    /// Draw label, control, description, and message stacked vertically.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, form: &FormState) {
        let binding = self.scope.binding(form);
        let control_height = match &self.control {
            FieldControl::Check(_) => 1,
            _ => 3,
        };

        let mut constraints = vec![Constraint::Length(1), Constraint::Length(control_height)];
        if self.description.is_some() {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Length(1));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        self.label.render(frame, chunks[0], binding.has_error());
        match &mut self.control {
            FieldControl::Text(input) => input.render(frame, chunks[1], binding.has_error()),
            FieldControl::Select(select) => select.render(frame, chunks[1], binding.has_error()),
            FieldControl::Check(checkbox) => checkbox.render(frame, chunks[1]),
        }

        let mut next = 2;
        if let Some(description) = &self.description {
            description.render(frame, chunks[next]);
            next += 1;
        }
        self.message.render(frame, chunks[next], &binding);
    }
}

fn rect_hit(area: Option<Rect>, column: u16, row: u16) -> bool {
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

fn input_request_for(event: &Event) -> Option<InputRequest> {
    match event {
        Event::Char(c) => Some(InputRequest::InsertChar(*c)),
        Event::Backspace => Some(InputRequest::DeletePrevChar),
        Event::Delete => Some(InputRequest::DeleteNextChar),
        Event::Left => Some(InputRequest::GoToPrevChar),
        Event::Right => Some(InputRequest::GoToNextChar),
        Event::Home => Some(InputRequest::GoToStart),
        Event::End => Some(InputRequest::GoToEnd),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_kind_filter() {
        let mut input = TextInput::new().kind(InputKind::Number);
        input.set_focused(true);

        input.handle_event(&Event::Char('4'));
        input.handle_event(&Event::Char('x'));
        input.handle_event(&Event::Char('2'));
        assert_eq!(input.value(), "42");

        let mut decimal = TextInput::new().kind(InputKind::Decimal);
        decimal.set_focused(true);
        for c in "4.9.9".chars() {
            decimal.handle_event(&Event::Char(c));
        }
        assert_eq!(decimal.value(), "4.99");

        let mut color = TextInput::new().kind(InputKind::HexColor);
        color.set_focused(true);
        for c in "#4F46E5zz".chars() {
            color.handle_event(&Event::Char(c));
        }
        assert_eq!(color.value(), "#4F46E5");
    }

    #[test]
    fn test_text_input_ignores_events_when_unfocused() {
        let mut input = TextInput::new();
        assert!(!input.handle_event(&Event::Char('a')));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_select_keyboard_flow() {
        let mut select = Select::new()
            .add_option(SelectOption::new("Aura Bundle", "aura".to_string()))
            .add_option(SelectOption::new("Call Bundle", "call".to_string()));
        select.set_focused(true);

        select.handle_event(&Event::Enter); // opens
        assert!(select.is_open());
        select.handle_event(&Event::Down);
        select.handle_event(&Event::Enter); // selects
        assert!(!select.is_open());
        assert_eq!(select.selected_value(), Some(&"call".to_string()));
        assert_eq!(select.selected_text(), Some("Call Bundle"));
    }

    #[test]
    fn test_select_escape_closes_without_selecting() {
        let mut select = Select::new()
            .add_option(SelectOption::new("Percentage", "percentage".to_string()))
            .add_option(SelectOption::new("Flat", "flat".to_string()));
        select.set_focused(true);

        select.handle_event(&Event::Enter);
        select.handle_event(&Event::Down);
        select.handle_event(&Event::Escape);
        assert!(!select.is_open());
        assert_eq!(select.selected_value(), None);
    }

    #[test]
    fn test_select_skips_disabled_on_select() {
        let mut select = Select::new()
            .add_option(SelectOption::disabled("Legacy", "legacy".to_string()))
            .add_option(SelectOption::new("Current", "current".to_string()));
        select.set_focused(true);
        select.toggle();

        // Highlight starts on the disabled option; selecting it is refused
        select.select_current();
        assert!(select.is_open());
        select.move_down();
        select.select_current();
        assert_eq!(select.selected_value(), Some(&"current".to_string()));
    }

    #[test]
    fn test_checkbox_toggle() {
        let mut checkbox = Checkbox::new("Active");
        assert!(!checkbox.is_checked());

        checkbox.set_focused(true);
        checkbox.handle_event(&Event::Char(' '));
        assert!(checkbox.is_checked());

        checkbox.handle_event(&Event::Enter);
        assert!(!checkbox.is_checked());
    }

    #[test]
    fn test_form_field_validate_records_into_form() {
        let mut form = FormState::new();
        let field = FormField::text("name", "Event name", TextInput::new());

        let valid = field.validate_into(&mut form, |value| {
            if value.trim().is_empty() {
                Err("This field is required".to_string())
            } else {
                Ok(())
            }
        });

        assert!(!valid);
        assert_eq!(
            field.binding(&form).state.error.as_deref(),
            Some("This field is required")
        );

        let mut field = field;
        field.set_value("Aura Bundle Event");
        field.validate_into(&mut form, |_| Ok(()));
        assert_eq!(form.value("name"), "Aura Bundle Event");
        assert!(field.binding(&form).state.is_valid());
    }

    #[test]
    fn test_form_field_label_targets_control() {
        let form = FormState::new();
        let field = FormField::text("email", "Email", TextInput::new());
        let binding = field.binding(&form);

        // Same association the label renders with
        assert_eq!(field.scope().ids().control_id, binding.control_id);
    }

    #[test]
    fn test_form_field_heights() {
        let plain = FormField::text("name", "Name", TextInput::new());
        assert_eq!(plain.height(), 5);

        let described = FormField::text("color", "Color", TextInput::new())
            .with_description("Hex value like #4F46E5");
        assert_eq!(described.height(), 6);

        let boxed = FormField::checkbox("active", "Status", Checkbox::new("Active"));
        assert_eq!(boxed.height(), 3);
    }
}
