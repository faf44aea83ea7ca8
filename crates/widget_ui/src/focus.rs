//! Imperative focus control over composite inputs.

use leptos::*;

/// Moves keyboard focus between the inputs of a composite control.
pub trait FocusHandle {
    /// Focuses the input at `index`; out-of-range indices are ignored.
    fn focus(&self, index: usize);
    /// Removes focus from whichever input holds it.
    fn blur(&self);
}

#[derive(Clone, Copy)]
/// Focus handle over the start/end inputs of a range picker.
pub struct InputPairFocus {
    inputs: [NodeRef<html::Input>; 2],
}

impl InputPairFocus {
    /// Creates a handle with fresh, unmounted node refs.
    pub fn new() -> Self {
        Self {
            inputs: [create_node_ref(), create_node_ref()],
        }
    }

    /// Node ref to attach to the input at `index`.
    pub fn node_ref(&self, index: usize) -> NodeRef<html::Input> {
        self.inputs[index.min(1)]
    }
}

impl Default for InputPairFocus {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusHandle for InputPairFocus {
    fn focus(&self, index: usize) {
        let Some(node_ref) = self.inputs.get(index) else {
            return;
        };
        if let Some(input) = node_ref.get_untracked() {
            if let Err(err) = input.focus() {
                logging::warn!("range input focus failed: {err:?}");
            }
        }
    }

    fn blur(&self) {
        for input in self.inputs.iter().filter_map(|node_ref| node_ref.get_untracked()) {
            if let Err(err) = input.blur() {
                logging::warn!("range input blur failed: {err:?}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmounted_inputs_ignore_focus_requests() {
        let _ = create_runtime();
        let focus = InputPairFocus::new();
        focus.focus(0);
        focus.focus(7);
        focus.blur();
        assert!(focus.node_ref(1).get_untracked().is_none());
    }
}
