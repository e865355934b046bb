//! Scoped acquisition of global event interest
//!
//! Dialogs and dropdowns react to events that do not target their own
//! widgets (Escape anywhere, clicks outside their panels). Interest in those
//! global events is acquired when a component enters its open state and
//! released on every exit path: explicit close, Escape, outside click, or
//! dropping the component while open. The guard records balanced
//! acquire/release pairs so leak checks can be asserted in tests.

/// Tracks one component's subscription to global events.
///
/// At most one subscription is held at a time; re-acquiring while held or
/// re-releasing while idle are no-ops, which keeps repeated open/close
/// cycles from accumulating or double-freeing interest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListenerGuard {
    held: bool,
    acquisitions: u64,
    releases: u64,
}

impl ListenerGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire interest on the closed-to-open transition.
    pub fn acquire(&mut self) {
        if !self.held {
            self.held = true;
            self.acquisitions += 1;
        }
    }

    /// Release interest on any open-to-closed transition.
    pub fn release(&mut self) {
        if self.held {
            self.held = false;
            self.releases += 1;
        }
    }

    /// Whether the component currently holds global interest.
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Number of currently held subscriptions: 1 while open, 0 while closed.
    pub fn held_count(&self) -> u64 {
        u64::from(self.held)
    }

    /// Total acquisitions over the guard's lifetime.
    pub fn acquisitions(&self) -> u64 {
        self.acquisitions
    }

    /// Total releases over the guard's lifetime.
    pub fn releases(&self) -> u64 {
        self.releases
    }

    /// Every acquisition has been matched by a release.
    pub fn is_balanced(&self) -> bool {
        self.acquisitions == self.releases
    }
}
