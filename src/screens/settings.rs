//! Video call settings screen
//!
//! Inline form over the persisted call settings: timer, free add-time
//! uses, max duration, and the overlay color with a saved palette and a
//! live preview that follows the hex/RGB format select. Edits stay local
//! until saved; Escape discards them.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::components::binding::FormState;
use crate::components::forms::{FormField, InputKind, TextInput};
use crate::data::store::DataStore;
use crate::events::{Event, FocusableComponent};
use crate::utils::focus_manager::FocusManager;
use crate::utils::formatting::hex_to_rgb;
use crate::utils::validation::{validate_hex_color, validate_number};

use super::{options_select, rect_hit, route_form_event, FormRouting, ScreenResponse};

const TIMER_RANGE: std::ops::RangeInclusive<u64> = 30..=300;
const FREE_USES_RANGE: std::ops::RangeInclusive<u64> = 0..=10;
const DURATION_RANGE: std::ops::RangeInclusive<u64> = 5..=120;
const FORMAT_OPTIONS: [&str; 2] = ["HEX", "RGB"];

fn validate_in_range(
    value: &str,
    range: std::ops::RangeInclusive<u64>,
    what: &str,
) -> Result<(), String> {
    let number = validate_number(value)?;
    if range.contains(&number) {
        Ok(())
    } else {
        Err(format!("{what} must be {} to {}", range.start(), range.end()))
    }
}

#[derive(Debug)]
pub struct SettingsScreenState {
    pub timer: FormField,
    pub free_uses: FormField,
    pub max_duration: FormField,
    pub color: FormField,
    pub format: FormField,
    pub form: FormState,
    pub focus: FocusManager,
    pub palette_index: usize,
    palette_areas: Vec<(Rect, String)>,
    save_area: Option<Rect>,
}

impl Default for SettingsScreenState {
    fn default() -> Self {
        let timer = FormField::text(
            "timer",
            "Call Timer (seconds)",
            TextInput::new().kind(InputKind::Number).with_placeholder("60"),
        );
        let free_uses = FormField::text(
            "free_uses",
            "Free Add-Time Uses",
            TextInput::new().kind(InputKind::Number).with_placeholder("3"),
        );
        let max_duration = FormField::text(
            "max_duration",
            "Max Call Duration (minutes)",
            TextInput::new().kind(InputKind::Number).with_placeholder("30"),
        );
        let color = FormField::text(
            "color",
            "Overlay Color",
            TextInput::new()
                .kind(InputKind::HexColor)
                .with_placeholder("#4F46E5"),
        );
        let mut format =
            FormField::select("format", "Color Format", options_select(&FORMAT_OPTIONS));
        format.set_value("HEX");

        let mut focus = FocusManager::new();
        focus.set_tab_order(vec![
            FocusableComponent::TextInput("timer".to_string()),
            FocusableComponent::TextInput("free_uses".to_string()),
            FocusableComponent::TextInput("max_duration".to_string()),
            FocusableComponent::TextInput("color".to_string()),
            FocusableComponent::Dropdown("format".to_string()),
            FocusableComponent::Button("submit".to_string()),
        ]);
        focus.focus_first();

        let mut state = Self {
            timer,
            free_uses,
            max_duration,
            color,
            format,
            form: FormState::new(),
            focus,
            palette_index: 0,
            palette_areas: Vec::new(),
            save_area: None,
        };
        state.sync_focus();
        state
    }
}

impl SettingsScreenState {
    /// Reload the fields from the persisted settings, discarding edits.
    pub fn load(&mut self, store: &DataStore) {
        self.timer.set_value(&store.settings.timer_seconds.to_string());
        self.free_uses
            .set_value(&store.settings.free_add_time_uses.to_string());
        self.max_duration
            .set_value(&store.settings.max_call_duration_min.to_string());
        self.color.set_value(&store.settings.overlay_color);
        self.form.reset();
    }

    fn fields_and_focus(&mut self) -> ([&mut FormField; 5], &mut FocusManager) {
        let Self {
            timer,
            free_uses,
            max_duration,
            color,
            format,
            focus,
            ..
        } = self;
        ([timer, free_uses, max_duration, color, format], focus)
    }

    fn sync_focus(&mut self) {
        let (mut fields, focus) = self.fields_and_focus();
        super::sync_field_focus(&mut fields, focus);
    }

    fn validate(&mut self) -> bool {
        let mut ok = self.timer.validate_into(&mut self.form, |v| {
            validate_in_range(v, TIMER_RANGE, "Timer")
        });
        ok &= self.free_uses.validate_into(&mut self.form, |v| {
            validate_in_range(v, FREE_USES_RANGE, "Free uses")
        });
        ok &= self.max_duration.validate_into(&mut self.form, |v| {
            validate_in_range(v, DURATION_RANGE, "Duration")
        });
        ok &= self.color.validate_into(&mut self.form, validate_hex_color);
        ok
    }

    pub fn save(&mut self, store: &mut DataStore) -> ScreenResponse {
        if !self.validate() {
            return ScreenResponse::error("Fix the highlighted fields");
        }
        store.settings.timer_seconds = self.timer.value().parse().unwrap_or(60);
        store.settings.free_add_time_uses = self.free_uses.value().parse().unwrap_or(3);
        store.settings.max_call_duration_min = self.max_duration.value().parse().unwrap_or(30);
        store.settings.overlay_color = self.color.value();
        ScreenResponse::success("Settings saved")
    }

    /// Apply the next palette color to the overlay field.
    pub fn cycle_palette(&mut self, store: &DataStore) {
        if store.settings.saved_colors.is_empty() {
            return;
        }
        let color = store.settings.saved_colors[self.palette_index].clone();
        self.palette_index = (self.palette_index + 1) % store.settings.saved_colors.len();
        self.color.set_value(&color);
    }

    pub fn handle_event(&mut self, event: &Event, store: &mut DataStore) -> ScreenResponse {
        // Save and palette shortcuts come first; no settings field accepts
        // these letters, so nothing typeable is shadowed.
        match event {
            Event::Char('s') | Event::Ctrl('s') => return self.save(store),
            Event::Char('p') => {
                self.cycle_palette(store);
                return ScreenResponse::info("Palette color applied");
            }
            _ => {}
        }

        match {
            let (mut fields, focus) = self.fields_and_focus();
            route_form_event(&mut fields, focus, event)
        } {
            FormRouting::Consumed => ScreenResponse::Handled,
            FormRouting::Submit => self.save(store),
            FormRouting::Cancel => {
                // Escape discards edits; the shell drops back to tab mode
                self.load(store);
                ScreenResponse::NotHandled
            }
            FormRouting::NotHandled => {
                if let Event::Click { column, row } = event {
                    if rect_hit(self.save_area, *column, *row) {
                        return self.save(store);
                    }
                    let swatch = self
                        .palette_areas
                        .iter()
                        .find(|(area, _)| rect_hit(Some(*area), *column, *row))
                        .map(|(_, color)| color.clone());
                    if let Some(color) = swatch {
                        self.color.set_value(&color);
                        return ScreenResponse::info("Palette color applied");
                    }
                }
                ScreenResponse::NotHandled
            }
        }
    }
}

pub fn render_settings(
    f: &mut Frame,
    state: &mut SettingsScreenState,
    store: &DataStore,
    area: Rect,
) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title("Video Call Settings [s: save, p: palette]");
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(inner);

    let first = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);
    state.timer.render(f, first[0], &state.form);
    state.free_uses.render(f, first[1], &state.form);

    let second = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    state.max_duration.render(f, second[0], &state.form);
    state.color.render(f, second[1], &state.form);

    let third = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ])
        .split(chunks[2]);
    state.format.render(f, third[0], &state.form);

    // The companion boxes line up with the select's control row so the
    // open option list can drop into the blank area below.
    let control_row = |r: Rect| Rect {
        y: r.y + 1,
        height: r.height.saturating_sub(1).min(3),
        ..r
    };
    render_palette(f, control_row(third[1]), state, &store.settings.saved_colors);
    render_preview(
        f,
        control_row(third[2]),
        &state.color.value(),
        &state.format.value(),
    );
    render_save_button(f, control_row(third[3]), state);
}

fn render_palette(f: &mut Frame, area: Rect, state: &mut SettingsScreenState, colors: &[String]) {
    let block = Block::default().borders(Borders::ALL).title("Saved [p]");
    let inner = block.inner(area);
    f.render_widget(block, area);

    state.palette_areas.clear();
    let mut spans = Vec::new();
    let mut x = inner.x;
    for color in colors {
        let style = match hex_to_rgb(color) {
            Some((r, g, b)) => Style::default().fg(Color::Rgb(r, g, b)),
            None => Style::default().fg(Color::Gray),
        };
        spans.push(Span::styled("██", style));
        spans.push(Span::raw(" "));
        if x + 2 <= inner.right() {
            state
                .palette_areas
                .push((Rect::new(x, inner.y, 2, 1), color.clone()));
        }
        x += 3;
    }
    f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_preview(f: &mut Frame, area: Rect, color: &str, format: &str) {
    let (text, style) = match hex_to_rgb(color) {
        Some((r, g, b)) => {
            let text = if format == "RGB" {
                format!("{r}, {g}, {b}")
            } else {
                color.to_string()
            };
            (text, Style::default().bg(Color::Rgb(r, g, b)).fg(Color::White))
        }
        None => ("invalid".to_string(), Style::default().fg(Color::Red)),
    };
    let preview = Paragraph::new(text)
        .style(style)
        .centered()
        .block(Block::default().borders(Borders::ALL).title("Preview"));
    f.render_widget(preview, area);
}

fn render_save_button(f: &mut Frame, area: Rect, state: &mut SettingsScreenState) {
    let focused = state.focus.is_focused_id("submit");
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let button = Paragraph::new("Save Settings")
        .style(style)
        .centered()
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(button, area);
    state.save_area = Some(area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> (SettingsScreenState, DataStore) {
        let mut state = SettingsScreenState::default();
        let store = DataStore::seeded();
        state.load(&store);
        (state, store)
    }

    #[test]
    fn test_save_writes_validated_values() {
        let (mut state, mut store) = loaded();

        state.timer.set_value("90");
        state.free_uses.set_value("5");
        state.max_duration.set_value("45");
        state.color.set_value("#22c55e");
        let response = state.handle_event(&Event::Char('s'), &mut store);

        assert_eq!(
            response,
            ScreenResponse::Status(
                crate::app::StatusLevel::Success,
                "Settings saved".to_string()
            )
        );
        assert_eq!(store.settings.timer_seconds, 90);
        assert_eq!(store.settings.free_add_time_uses, 5);
        assert_eq!(store.settings.max_call_duration_min, 45);
        assert_eq!(store.settings.overlay_color, "#22c55e");
    }

    #[test]
    fn test_out_of_range_timer_blocks_save() {
        let (mut state, mut store) = loaded();

        state.timer.set_value("500");
        let response = state.handle_event(&Event::Char('s'), &mut store);

        assert!(matches!(
            response,
            ScreenResponse::Status(crate::app::StatusLevel::Error, _)
        ));
        assert_eq!(store.settings.timer_seconds, 60);
        assert!(!state.form.validation("timer").is_valid());
    }

    #[test]
    fn test_palette_cycle_applies_saved_colors() {
        let (mut state, mut store) = loaded();

        state.handle_event(&Event::Char('p'), &mut store);
        assert_eq!(state.color.value(), "#ef4444");
        state.handle_event(&Event::Char('p'), &mut store);
        assert_eq!(state.color.value(), "#f97316");
    }

    #[test]
    fn test_escape_discards_unsaved_edits() {
        let (mut state, mut store) = loaded();

        state.timer.set_value("120");
        let response = state.handle_event(&Event::Escape, &mut store);

        assert_eq!(response, ScreenResponse::NotHandled);
        assert_eq!(state.timer.value(), "60");
        assert_eq!(store.settings.timer_seconds, 60);
    }

    #[test]
    fn test_format_select_changes_display_format() {
        let (mut state, mut store) = loaded();
        assert_eq!(state.format.value(), "HEX");

        state.focus.focus_id("format");
        state.sync_focus();
        state.handle_event(&Event::Enter, &mut store);
        state.handle_event(&Event::Down, &mut store);
        state.handle_event(&Event::Enter, &mut store);

        assert_eq!(state.format.value(), "RGB");
        assert_eq!(store.settings.overlay_color, "#4F46E5");
    }

    #[test]
    fn test_save_button_in_tab_order_submits() {
        let (mut state, mut store) = loaded();

        state.timer.set_value("45");
        state.focus.focus_id("submit");
        let response = state.handle_event(&Event::Enter, &mut store);

        assert!(matches!(
            response,
            ScreenResponse::Status(crate::app::StatusLevel::Success, _)
        ));
        assert_eq!(store.settings.timer_seconds, 45);
    }
}
