//! Host-controlled versus self-managed value resolution.
//!
//! Every widget value flows through [`Controlled`]: when the host supplies a value it is
//! authoritative and the widget mirrors it; otherwise the widget tracks its own state. The
//! external value is replaced wholesale on each host update and never merged with the internal
//! one.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Single authoritative-value resolver for a widget value.
pub struct Controlled<T> {
    external: Option<T>,
    internal: T,
}

impl<T: Clone + PartialEq> Controlled<T> {
    /// Creates an uncontrolled value seeded with `default_value`.
    pub fn uncontrolled(default_value: T) -> Self {
        Self {
            external: None,
            internal: default_value,
        }
    }

    /// Creates a resolver that prefers `value` when present.
    pub fn new(value: Option<T>, default_value: T) -> Self {
        Self {
            external: value,
            internal: default_value,
        }
    }

    /// Returns the value the widget should render.
    pub fn current(&self) -> &T {
        self.external.as_ref().unwrap_or(&self.internal)
    }

    /// Whether the host currently owns the value.
    pub fn is_controlled(&self) -> bool {
        self.external.is_some()
    }

    /// Records a locally produced value.
    ///
    /// Returns `true` when the rendered value would differ from the current one, which is the
    /// condition for emitting a change callback. In controlled mode the internal slot is still
    /// updated so that dropping control later resumes from the last local value.
    pub fn set(&mut self, value: T) -> bool {
        let changed = *self.current() != value;
        self.internal = value;
        changed
    }

    /// Re-derives the external value from a host update.
    pub fn sync(&mut self, value: Option<T>) {
        self.external = value;
    }
}

impl<T: Clone + PartialEq + Default> Default for Controlled<T> {
    fn default() -> Self {
        Self::uncontrolled(T::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn external_value_wins_over_internal_state() {
        let mut value = Controlled::new(Some(4), 1);
        assert_eq!(*value.current(), 4);

        assert!(value.set(7));
        assert_eq!(*value.current(), 4);

        value.sync(None);
        assert_eq!(*value.current(), 7);
    }

    #[test]
    fn setting_the_rendered_value_reports_no_change() {
        let mut value = Controlled::uncontrolled(String::from("a"));
        assert!(!value.set(String::from("a")));
        assert!(value.set(String::from("b")));
        assert!(!value.is_controlled());
    }
}
