//! Focus Management for Form Dialogs
//!
//! Tracks which control inside an open dialog holds keyboard focus and
//! walks the tab order on Tab/Shift+Tab. Hidden or disabled components are
//! skipped during navigation.

use crate::events::{Event, FocusDirection, FocusableComponent};
use std::collections::HashMap;

/// Focus manager handles focus state and navigation across components
#[derive(Debug, Clone, Default)]
pub struct FocusManager {
    /// Current focused component
    current_focus: Option<FocusableComponent>,
    /// Ordered list of focusable components for tab navigation
    tab_order: Vec<FocusableComponent>,
    /// Component visibility state (used to skip hidden components)
    component_visibility: HashMap<FocusableComponent, bool>,
    /// Component enabled state (used to skip disabled components)
    component_enabled: HashMap<FocusableComponent, bool>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tab order for components
    pub fn set_tab_order(&mut self, components: Vec<FocusableComponent>) {
        self.tab_order = components;
        for component in &self.tab_order {
            self.component_visibility.insert(component.clone(), true);
            self.component_enabled.insert(component.clone(), true);
        }
    }

    /// Add a component to the end of the tab order
    pub fn add_component(&mut self, component: FocusableComponent) {
        if !self.tab_order.contains(&component) {
            self.tab_order.push(component.clone());
            self.component_visibility.insert(component.clone(), true);
            self.component_enabled.insert(component, true);
        }
    }

    /// Remove a component from the tab order
    pub fn remove_component(&mut self, component: &FocusableComponent) {
        self.tab_order.retain(|c| c != component);
        self.component_visibility.remove(component);
        self.component_enabled.remove(component);

        if self.current_focus.as_ref() == Some(component) {
            self.current_focus = None;
        }
    }

    /// Set component visibility (hidden components are skipped in navigation)
    pub fn set_component_visibility(&mut self, component: FocusableComponent, visible: bool) {
        self.component_visibility.insert(component, visible);
    }

    /// Set component enabled state (disabled components are skipped in navigation)
    pub fn set_component_enabled(&mut self, component: FocusableComponent, enabled: bool) {
        self.component_enabled.insert(component, enabled);
    }

    /// Get the currently focused component
    pub fn current_focus(&self) -> Option<&FocusableComponent> {
        self.current_focus.as_ref()
    }

    /// Check if a component is currently focused
    pub fn is_focused(&self, component: &FocusableComponent) -> bool {
        self.current_focus.as_ref() == Some(component)
    }

    /// Whether the focused component's id matches
    pub fn is_focused_id(&self, id: &str) -> bool {
        self.current_focus
            .as_ref()
            .map(|c| c.id() == id)
            .unwrap_or(false)
    }

    /// Set focus to a specific component
    pub fn set_focus(&mut self, component: FocusableComponent) -> bool {
        if self.is_component_focusable(&component) {
            self.current_focus = Some(component);
            true
        } else {
            false
        }
    }

    /// Set focus to the component with the given id (mouse activation path)
    pub fn focus_id(&mut self, id: &str) -> bool {
        let target = self.tab_order.iter().find(|c| c.id() == id).cloned();
        match target {
            Some(component) => self.set_focus(component),
            None => false,
        }
    }

    /// Clear all focus
    pub fn clear_focus(&mut self) {
        self.current_focus = None;
    }

    /// Move focus in the specified direction
    pub fn move_focus(&mut self, direction: FocusDirection) -> Option<FocusableComponent> {
        match direction {
            FocusDirection::Up | FocusDirection::Left => self.focus_previous(),
            FocusDirection::Down | FocusDirection::Right => self.focus_next(),
        }
    }

    /// Focus the next component in tab order, wrapping at the end
    pub fn focus_next(&mut self) -> Option<FocusableComponent> {
        if self.tab_order.is_empty() {
            return None;
        }

        let start_index = self.current_focus_index().map(|i| i + 1).unwrap_or(0);
        for i in 0..self.tab_order.len() {
            let index = (start_index + i) % self.tab_order.len();
            let component = self.tab_order[index].clone();
            if self.is_component_focusable(&component) {
                self.current_focus = Some(component.clone());
                return Some(component);
            }
        }

        None
    }

    /// Focus the previous component in tab order, wrapping at the start
    pub fn focus_previous(&mut self) -> Option<FocusableComponent> {
        if self.tab_order.is_empty() {
            return None;
        }

        let len = self.tab_order.len();
        let start_index = self.current_focus_index().unwrap_or(0);
        for i in 1..=len {
            let index = (start_index + len - (i % len)) % len;
            let component = self.tab_order[index].clone();
            if self.is_component_focusable(&component) {
                self.current_focus = Some(component.clone());
                return Some(component);
            }
        }

        None
    }

    /// Focus the first focusable component (dialog-open path)
    pub fn focus_first(&mut self) -> Option<FocusableComponent> {
        for component in self.tab_order.clone() {
            if self.is_component_focusable(&component) {
                self.current_focus = Some(component.clone());
                return Some(component);
            }
        }
        None
    }

    /// Handle focus-related events
    pub fn handle_event(&mut self, event: &Event) -> Option<FocusableComponent> {
        match event {
            Event::Tab | Event::FocusNext => self.focus_next(),
            Event::BackTab | Event::FocusPrevious => self.focus_previous(),
            Event::MoveFocus(direction) => self.move_focus(*direction),
            _ => None,
        }
    }

    /// Get all focusable components in order
    pub fn get_focusable_components(&self) -> Vec<FocusableComponent> {
        self.tab_order
            .iter()
            .filter(|c| self.is_component_focusable(c))
            .cloned()
            .collect()
    }

    /// Check if a component can receive focus
    fn is_component_focusable(&self, component: &FocusableComponent) -> bool {
        let visible = self.component_visibility.get(component).unwrap_or(&true);
        let enabled = self.component_enabled.get(component).unwrap_or(&true);
        *visible && *enabled
    }

    /// Get the index of the currently focused component
    fn current_focus_index(&self) -> Option<usize> {
        self.current_focus
            .as_ref()
            .and_then(|focus| self.tab_order.iter().position(|c| c == focus))
    }
}
