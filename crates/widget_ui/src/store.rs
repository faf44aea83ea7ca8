//! Signal-backed reducer plumbing shared by the widget components.
//!
//! Components keep their headless state in one `RwSignal` and funnel every DOM event through
//! [`apply`] or [`try_apply`]. The snapshot is reduced off-signal and written back only when it
//! changed, so a no-op action never wakes the view.

use leptos::*;
use widget_core::WidgetError;

/// Reduces `action` against a snapshot of `state` and returns the emitted effects.
pub(crate) fn apply<S, A, E>(
    state: RwSignal<S>,
    action: A,
    reduce: impl FnOnce(&mut S, A) -> Vec<E>,
) -> Vec<E>
where
    S: Clone + PartialEq + 'static,
{
    let mut next = state.get_untracked();
    let effects = reduce(&mut next, action);
    if state.with_untracked(|current| *current != next) {
        state.set(next);
    }
    effects
}

/// Like [`apply`] for reducers that can reject an action.
///
/// A rejected action leaves the state untouched and is logged under `widget`.
pub(crate) fn try_apply<S, A, E>(
    state: RwSignal<S>,
    widget: &'static str,
    action: A,
    reduce: impl FnOnce(&mut S, A) -> Result<Vec<E>, WidgetError>,
) -> Vec<E>
where
    S: Clone + PartialEq + 'static,
{
    let mut next = state.get_untracked();
    match reduce(&mut next, action) {
        Ok(effects) => {
            if state.with_untracked(|current| *current != next) {
                state.set(next);
            }
            effects
        }
        Err(err) => {
            logging::warn!("{widget} reducer error: {err}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use widget_core::prelude::*;

    use super::*;

    #[test]
    fn unchanged_state_is_not_written_back() {
        let _ = create_runtime();
        let state = create_rw_signal(PasswordState::new(PasswordConfig::default(), None));
        let effects = apply(state, PasswordAction::Input("hunter2".into()), reduce_password);
        assert_eq!(effects, vec![PasswordEffect::Change("hunter2".into())]);
        assert_eq!(state.get_untracked().value(), "hunter2");

        let effects = apply(state, PasswordAction::Input("hunter2".into()), reduce_password);
        assert!(effects.is_empty());
    }

    #[test]
    fn rejected_actions_leave_state_alone() {
        let _ = create_runtime();
        let state = create_rw_signal(SelectState::new(SelectConfig::default(), None));
        let before = state.get_untracked();
        let effects = try_apply(
            state,
            "select",
            SelectAction::Choose("missing".into()),
            reduce_select,
        );
        assert!(effects.is_empty());
        assert_eq!(state.get_untracked(), before);
    }
}
