//! Form field binding layer
//!
//! Associates a labeled control with its description and error message
//! through a stable per-mount identity, and reflects the live validation
//! state of one named field held in a [`FormState`]. The scope is an
//! explicit value threaded from the field wrapper down to its leaves, so
//! none of them receive ids or validation state as separate parameters.
//!
//! Leaves are commonly reused outside any field scope; the accessor
//! therefore degrades gracefully when no scope is supplied instead of
//! failing fast like the dialog and dropdown sub-elements do.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

static NEXT_FIELD_MOUNT: AtomicU64 = AtomicU64::new(1);

/// Validation state of one named field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationState {
    /// Whether the field has been validated at least once
    pub touched: bool,
    /// Active validation error, if any
    pub error: Option<String>,
}

impl ValidationState {
    pub fn untouched() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Field values and validation results for one form.
///
/// The binding layer only reads validation state per field name and writes
/// values back; which values are acceptable is decided by the host's
/// validators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: HashMap<String, String>,
    validation: HashMap<String, ValidationState>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
    }

    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Store a validator outcome for a field, marking it touched.
    pub fn record(&mut self, field: &str, outcome: Result<(), String>) {
        let state = ValidationState {
            touched: true,
            error: outcome.err(),
        };
        self.validation.insert(field.to_string(), state);
    }

    pub fn set_error(&mut self, field: &str, message: impl Into<String>) {
        self.record(field, Err(message.into()));
    }

    pub fn clear_error(&mut self, field: &str) {
        self.record(field, Ok(()));
    }

    /// Current validation state for a field; untouched when never recorded.
    pub fn validation(&self, field: &str) -> ValidationState {
        self.validation.get(field).cloned().unwrap_or_default()
    }

    pub fn has_errors(&self) -> bool {
        self.validation.values().any(|state| state.error.is_some())
    }

    /// Drop all values and validation results (e.g. when a create form
    /// closes).
    pub fn reset(&mut self) {
        self.values.clear();
        self.validation.clear();
    }
}

/// One mounted field's scope: its name plus a per-mount unique base id.
///
/// Mounting the same field name twice yields two distinct scopes whose
/// derived ids never collide, so concurrently open forms stay independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldScope {
    field_name: String,
    mount_id: u64,
    detached: bool,
}

impl FieldScope {
    /// Enter a scope for a named field.
    pub fn mount(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            mount_id: NEXT_FIELD_MOUNT.fetch_add(1, Ordering::Relaxed),
            detached: false,
        }
    }

    /// Fallback scope synthesized for a leaf used outside any field scope:
    /// locally unique identity, no field association.
    pub fn detached() -> Self {
        Self {
            field_name: String::new(),
            mount_id: NEXT_FIELD_MOUNT.fetch_add(1, Ordering::Relaxed),
            detached: true,
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Derived id triple, stable for the scope's lifetime.
    pub fn ids(&self) -> FieldIds {
        let base = format!("field-{}", self.mount_id);
        FieldIds {
            control_id: format!("{base}-control"),
            description_id: format!("{base}-description"),
            message_id: format!("{base}-message"),
        }
    }

    /// Binding accessor for this scope. Ids are derived deterministically
    /// from the mount id and stay stable for the scope's lifetime.
    pub fn binding(&self, form: &FormState) -> FieldBinding {
        field_binding(Some(self), form)
    }
}

/// Deterministic, collision-free id strings for one mounted field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIds {
    pub control_id: String,
    pub description_id: String,
    pub message_id: String,
}

/// Derived identity triple plus current validation state for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    pub field_name: String,
    pub control_id: String,
    pub description_id: String,
    pub message_id: String,
    pub state: ValidationState,
}

impl FieldBinding {
    pub fn has_error(&self) -> bool {
        self.state.error.is_some()
    }
}

/// Binding accessor.
///
/// Inside a scope it derives the id triple from the scope's base id and
/// reads the field's validation state from the form. Without a scope it
/// must not panic: it synthesizes a fresh detached scope and reports an
/// untouched, valid state.
pub fn field_binding(scope: Option<&FieldScope>, form: &FormState) -> FieldBinding {
    match scope {
        Some(scope) => {
            let ids = scope.ids();
            FieldBinding {
                field_name: scope.field_name.clone(),
                control_id: ids.control_id,
                description_id: ids.description_id,
                message_id: ids.message_id,
                state: if scope.detached {
                    ValidationState::untouched()
                } else {
                    form.validation(&scope.field_name)
                },
            }
        }
        None => {
            let fallback = FieldScope::detached();
            field_binding(Some(&fallback), form)
        }
    }
}

/// Label line tied to a control id, so activating the label focuses the
/// control without the caller wiring the association by hand.
#[derive(Debug, Clone)]
pub struct FieldLabel {
    text: String,
    control_id: String,
    area: Option<Rect>,
}

impl FieldLabel {
    pub fn new(binding: &FieldBinding, text: impl Into<String>) -> Self {
        Self::for_control(binding.control_id.clone(), text)
    }

    pub fn for_control(control_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            control_id: control_id.into(),
            area: None,
        }
    }

    /// Control id this label activates, the `for` attribute equivalent.
    pub fn for_id(&self) -> &str {
        &self.control_id
    }

    pub fn hit(&self, column: u16, row: u16) -> bool {
        match self.area {
            Some(area) => {
                column >= area.x
                    && column < area.x.saturating_add(area.width)
                    && row >= area.y
                    && row < area.y.saturating_add(area.height)
            }
            None => false,
        }
    }

    /// Draw the label; shown in the error color while the field is invalid.
    pub fn render(&mut self, f: &mut Frame, area: Rect, has_error: bool) {
        let style = if has_error {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(self.text.clone(), style))),
            area,
        );
        self.area = Some(area);
    }
}

/// Static assistive text, always rendered, carried under the derived
/// description id.
#[derive(Debug, Clone)]
pub struct FieldDescription {
    text: String,
}

impl FieldDescription {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                self.text.clone(),
                Style::default().fg(Color::Gray),
            ))),
            area,
        );
    }
}

/// Error line for a field.
///
/// Renders nothing when the field has no active error and no override text
/// was supplied; the override, when present, wins over the field's own
/// error message.
#[derive(Debug, Clone, Default)]
pub struct FieldMessage {
    override_text: Option<String>,
}

impl FieldMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(text: impl Into<String>) -> Self {
        Self {
            override_text: Some(text.into()),
        }
    }

    /// Text that would render for this binding, if any.
    pub fn text(&self, binding: &FieldBinding) -> Option<String> {
        match &self.override_text {
            Some(text) => Some(text.clone()),
            None => binding.state.error.clone(),
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, binding: &FieldBinding) {
        if let Some(text) = self.text(binding) {
            f.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    text,
                    Style::default().fg(Color::Red),
                ))),
                area,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concurrent_scopes_do_not_collide() {
        let form = FormState::new();
        let name_scope = FieldScope::mount("name");
        let email_scope = FieldScope::mount("email");

        let name = name_scope.binding(&form);
        let email = email_scope.binding(&form);

        assert_ne!(name.control_id, email.control_id);
        assert_ne!(name.description_id, email.description_id);
        assert_ne!(name.message_id, email.message_id);

        // The triple is internally distinct as well
        assert_ne!(name.control_id, name.description_id);
        assert_ne!(name.control_id, name.message_id);
    }

    #[test]
    fn test_ids_are_stable_within_a_mount() {
        let form = FormState::new();
        let scope = FieldScope::mount("name");

        let first = scope.binding(&form);
        let second = scope.binding(&form);
        assert_eq!(first.control_id, second.control_id);
        assert_eq!(first.description_id, second.description_id);
        assert_eq!(first.message_id, second.message_id);
    }

    #[test]
    fn test_remount_never_collides_with_live_sibling() {
        let form = FormState::new();
        let sibling = FieldScope::mount("name");
        let sibling_binding = sibling.binding(&form);

        // Unmount and remount the same field while the sibling stays live
        let remounted = FieldScope::mount("name");
        let remounted_binding = remounted.binding(&form);

        assert_ne!(remounted_binding.control_id, sibling_binding.control_id);
        assert_eq!(remounted_binding.field_name, "name");
    }

    #[test]
    fn test_binding_reads_validation_from_form() {
        let mut form = FormState::new();
        let scope = FieldScope::mount("email");

        let untouched = scope.binding(&form);
        assert!(!untouched.state.touched);
        assert!(untouched.state.is_valid());

        form.set_error("email", "Required");
        let invalid = scope.binding(&form);
        assert!(invalid.has_error());
        assert_eq!(invalid.state.error.as_deref(), Some("Required"));

        form.clear_error("email");
        let valid = scope.binding(&form);
        assert!(valid.state.touched);
        assert!(valid.state.is_valid());
    }

    #[test]
    fn test_detached_accessor_degrades_gracefully() {
        let mut form = FormState::new();
        form.set_error("name", "Required");

        // No enclosing scope: no panic, safe identity, untouched state
        let first = field_binding(None, &form);
        let second = field_binding(None, &form);

        assert!(first.field_name.is_empty());
        assert!(!first.state.touched);
        assert!(first.state.is_valid());
        assert_ne!(first.control_id, second.control_id);
    }

    #[test]
    fn test_message_precedence() {
        let mut form = FormState::new();
        let scope = FieldScope::mount("name");

        // No error, no override: nothing renders
        let message = FieldMessage::new();
        assert_eq!(message.text(&scope.binding(&form)), None);

        // Field error renders verbatim
        form.set_error("name", "Required");
        assert_eq!(
            message.text(&scope.binding(&form)),
            Some("Required".to_string())
        );

        // Override wins over the field's own error
        let overridden = FieldMessage::with_override("Custom help");
        assert_eq!(
            overridden.text(&scope.binding(&form)),
            Some("Custom help".to_string())
        );
    }

    #[test]
    fn test_label_carries_control_association() {
        let form = FormState::new();
        let scope = FieldScope::mount("name");
        let binding = scope.binding(&form);

        let label = FieldLabel::new(&binding, "Event name");
        assert_eq!(label.for_id(), binding.control_id);
    }

    #[test]
    fn test_form_state_values_round_trip() {
        let mut form = FormState::new();
        assert_eq!(form.value("name"), "");

        form.set_value("name", "Aura Bundle Event");
        assert_eq!(form.value("name"), "Aura Bundle Event");

        form.set_error("date", "Required");
        assert!(form.has_errors());

        form.reset();
        assert_eq!(form.value("name"), "");
        assert!(!form.has_errors());
    }
}
