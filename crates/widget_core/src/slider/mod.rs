//! Single and range slider state machine.
//!
//! Pointer gestures are reduced against a [`TrackGeometry`]: a drag captures its start value and
//! pointer position, every move recomputes the candidate from the pixel delta, snaps it to a step,
//! clamps it to the bounds and to the opposite handle, and emits [`SliderEffect::Change`] when the
//! committed value moves. Ending the gesture emits a single [`SliderEffect::AfterChange`].

use serde::{Deserialize, Serialize};

use crate::controlled::Controlled;
use crate::error::WidgetError;

mod geometry;

pub use geometry::{safe_step, Tick, TrackGeometry};

const PAGE_STEPS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
/// A single number or an ordered `(lower, upper)` pair.
pub enum SliderValue {
    /// Single-handle value.
    Single(f64),
    /// Range value; `lower <= upper`.
    Range(f64, f64),
}

impl Default for SliderValue {
    fn default() -> Self {
        Self::Single(0.0)
    }
}

impl SliderValue {
    /// Value carried by `handle` (the single value answers for both handles).
    pub fn handle(self, handle: Handle) -> f64 {
        match (self, handle) {
            (Self::Single(value), _) => value,
            (Self::Range(lower, _), Handle::Lower) => lower,
            (Self::Range(_, upper), Handle::Upper) => upper,
        }
    }

    fn with_handle(self, handle: Handle, value: f64) -> Self {
        match (self, handle) {
            (Self::Single(_), _) => Self::Single(value),
            (Self::Range(_, upper), Handle::Lower) => Self::Range(value, upper),
            (Self::Range(lower, _), Handle::Upper) => Self::Range(lower, value),
        }
    }

    /// Snaps, clamps and orders the value for `geometry`, converting between single and range
    /// shapes as `range` requires.
    pub fn normalized(self, geometry: &TrackGeometry, range: bool) -> Self {
        match (self, range) {
            (Self::Single(value), false) => Self::Single(geometry.snap(value)),
            (Self::Single(value), true) => Self::Range(geometry.min(), geometry.snap(value)),
            (Self::Range(_, upper), false) => Self::Single(geometry.snap(upper)),
            (Self::Range(a, b), true) => {
                let (a, b) = (geometry.snap(a), geometry.snap(b));
                Self::Range(a.min(b), a.max(b))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Slider handle. Single sliders only have [`Handle::Upper`].
pub enum Handle {
    /// Left handle of a range slider.
    Lower,
    /// Right handle of a range slider, or the only handle.
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// What a pointer gesture grabbed.
pub enum DragTarget {
    /// One of the handles.
    Handle(Handle),
    /// The filled bar between the handles of a range slider.
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Track end marks.
pub enum BoundMark {
    /// Mark at `min`.
    Start,
    /// Mark at `max`.
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Keyboard commands for a focused handle.
pub enum SliderKey {
    /// One step down.
    Decrease,
    /// One step up.
    Increase,
    /// Ten steps down.
    PageDecrease,
    /// Ten steps up.
    PageIncrease,
    /// Jump to the lowest reachable value.
    Home,
    /// Jump to the highest reachable value.
    End,
}

impl SliderKey {
    /// Maps a DOM `KeyboardEvent.key` to a slider command.
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "ArrowDown" => Some(Self::Decrease),
            "ArrowRight" | "ArrowUp" => Some(Self::Increase),
            "PageDown" => Some(Self::PageDecrease),
            "PageUp" => Some(Self::PageIncrease),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Slider props.
pub struct SliderConfig {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Step size; non-positive values fall back to `1`.
    pub step: f64,
    /// Two handles instead of one.
    pub range: bool,
    /// Ignore every gesture.
    pub disabled: bool,
    /// Render step ticks and number labels.
    pub show_ticks: bool,
    /// Allow handle tooltips at all.
    pub tooltip_visible: bool,
    /// Render a clickable mark at `min`.
    pub start_mark: bool,
    /// Render a clickable mark at `max`.
    pub end_mark: bool,
    /// Initial value when the host does not control it.
    pub default_value: SliderValue,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10.0,
            step: 1.0,
            range: false,
            disabled: false,
            show_ticks: true,
            tooltip_visible: true,
            start_mark: false,
            end_mark: false,
            default_value: SliderValue::Single(0.0),
        }
    }
}

impl SliderConfig {
    /// Parses a JSON props payload and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidConfig`] for malformed JSON and
    /// [`WidgetError::InvalidBounds`] when `min` is not below `max`.
    pub fn from_json(raw: &str) -> Result<Self, WidgetError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the numeric bounds.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidBounds`] when `min` is not below `max` or either is not
    /// finite.
    pub fn validate(&self) -> Result<(), WidgetError> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min >= self.max {
            return Err(WidgetError::InvalidBounds {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Transient state of an in-progress pointer gesture.
pub struct DragState {
    /// Grabbed element.
    pub target: DragTarget,
    /// Slider value when the gesture started.
    pub start_value: SliderValue,
    /// Pointer x coordinate when the gesture started.
    pub start_pointer_x: f64,
    /// Pointer delta from the start, in pixels.
    pub offset_px: f64,
}

#[derive(Debug, Clone, PartialEq)]
/// Slider instance state.
pub struct SliderState {
    config: SliderConfig,
    geometry: TrackGeometry,
    value: Controlled<SliderValue>,
    drag: Option<DragState>,
    hovered: Option<Handle>,
}

#[derive(Debug, Clone, PartialEq)]
/// Inputs accepted by [`reduce_slider`].
pub enum SliderAction {
    /// The track was measured (or re-measured).
    Resize {
        /// Track width in pixels.
        width_px: f64,
    },
    /// Pointer pressed on a handle or the bar.
    PointerDown {
        /// Grabbed element.
        target: DragTarget,
        /// Pointer x coordinate.
        pointer_x: f64,
    },
    /// Pointer moved during a gesture.
    PointerMove {
        /// Pointer x coordinate.
        pointer_x: f64,
    },
    /// Pointer released; ends the gesture.
    PointerUp {
        /// Pointer x coordinate.
        pointer_x: f64,
    },
    /// Gesture aborted (pointer cancel or unmount).
    PointerCancel,
    /// Click on the bare track at a pixel offset.
    ClickTrack {
        /// Offset from the start of the track.
        offset_px: f64,
    },
    /// Click on a tick carrying a domain value.
    ClickTick {
        /// Tick value.
        value: f64,
    },
    /// Click on a start/end mark.
    ClickBound(BoundMark),
    /// Keyboard command on a focused handle.
    Key {
        /// Focused handle.
        handle: Handle,
        /// Command.
        key: SliderKey,
    },
    /// Pointer entered or left a handle.
    Hover {
        /// Handle under the pointer.
        handle: Handle,
        /// Entered (`true`) or left.
        hovered: bool,
    },
    /// Host value update; `None` releases control.
    SyncValue(Option<SliderValue>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Callbacks emitted by [`reduce_slider`].
pub enum SliderEffect {
    /// Committed value changed.
    Change(SliderValue),
    /// A gesture finished.
    AfterChange(SliderValue),
}

impl SliderState {
    /// Creates a slider from validated props and an optional host value.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidBounds`] when the bounds are unusable.
    pub fn new(config: SliderConfig, value: Option<SliderValue>) -> Result<Self, WidgetError> {
        config.validate()?;
        let geometry = TrackGeometry::new(config.min, config.max, config.step, 0.0);
        let internal = config.default_value.normalized(&geometry, config.range);
        let external = value.map(|value| value.normalized(&geometry, config.range));
        Ok(Self {
            config,
            geometry,
            value: Controlled::new(external, internal),
            drag: None,
            hovered: None,
        })
    }

    /// Props the slider was built with.
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// Current track geometry.
    pub fn geometry(&self) -> &TrackGeometry {
        &self.geometry
    }

    /// Rendered value.
    pub fn value(&self) -> SliderValue {
        *self.value.current()
    }

    /// In-progress gesture, if any.
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Whether `handle` is being dragged (directly or through the bar).
    pub fn is_dragging(&self, handle: Handle) -> bool {
        match self.drag.map(|drag| drag.target) {
            Some(DragTarget::Handle(dragged)) => dragged == handle,
            Some(DragTarget::Bar) => true,
            None => false,
        }
    }

    /// Derived tooltip visibility: dragging or hovered, when tooltips are enabled.
    pub fn tooltip_open(&self, handle: Handle) -> bool {
        self.config.tooltip_visible && (self.is_dragging(handle) || self.hovered == Some(handle))
    }

    /// Pixel offset of a handle.
    pub fn handle_offset(&self, handle: Handle) -> f64 {
        self.geometry.offset_of(self.value().handle(handle))
    }

    /// Handles present for the configured mode, lower first.
    pub fn handles(&self) -> &'static [Handle] {
        if self.config.range {
            &[Handle::Lower, Handle::Upper]
        } else {
            &[Handle::Upper]
        }
    }

    fn commit(&mut self, value: SliderValue, effects: &mut Vec<SliderEffect>) {
        if self.value.set(value) {
            log::trace!("slider value -> {value:?}");
            effects.push(SliderEffect::Change(value));
        }
    }

    fn clamp_handle(&self, base: SliderValue, handle: Handle, candidate: f64) -> f64 {
        let candidate = self.geometry.snap(candidate);
        match (base, handle) {
            (SliderValue::Single(_), _) => candidate,
            (SliderValue::Range(_, upper), Handle::Lower) => candidate.min(upper),
            (SliderValue::Range(lower, _), Handle::Upper) => candidate.max(lower),
        }
    }

    fn dragged_value(&self, drag: &DragState) -> SliderValue {
        let current = self.value();
        match drag.target {
            DragTarget::Handle(handle) => {
                let start_px = self.geometry.offset_of(drag.start_value.handle(handle));
                let candidate = self.geometry.value_at(start_px + drag.offset_px);
                current.with_handle(handle, self.clamp_handle(current, handle, candidate))
            }
            DragTarget::Bar => {
                let SliderValue::Range(lower, upper) = drag.start_value else {
                    return current;
                };
                let steps = (drag.offset_px / self.geometry.segment_px()).round();
                let shift = (steps * self.geometry.step())
                    .max(self.geometry.min() - lower)
                    .min(self.geometry.max_aligned() - upper);
                SliderValue::Range(
                    self.geometry.snap(lower + shift),
                    self.geometry.snap(upper + shift),
                )
            }
        }
    }

    fn nearest_handle(&self, value: f64) -> Handle {
        match self.value() {
            SliderValue::Single(_) => Handle::Upper,
            SliderValue::Range(lower, upper) => {
                let target_px = self.geometry.offset_of(value);
                let lower_px = (self.geometry.offset_of(lower) - target_px).abs();
                let upper_px = (self.geometry.offset_of(upper) - target_px).abs();
                if lower_px < upper_px || (lower_px == upper_px && value < lower) {
                    Handle::Lower
                } else {
                    Handle::Upper
                }
            }
        }
    }

    fn jump_to(&mut self, value: f64, effects: &mut Vec<SliderEffect>) {
        let handle = self.nearest_handle(value);
        let current = self.value();
        let next = current.with_handle(handle, self.clamp_handle(current, handle, value));
        self.commit(next, effects);
        effects.push(SliderEffect::AfterChange(next));
    }

    fn key_target(&self, handle: Handle, key: SliderKey) -> f64 {
        let value = self.value().handle(handle);
        let step = self.geometry.step();
        match key {
            SliderKey::Decrease => value - step,
            SliderKey::Increase => value + step,
            SliderKey::PageDecrease => value - step * PAGE_STEPS,
            SliderKey::PageIncrease => value + step * PAGE_STEPS,
            SliderKey::Home => self.geometry.min(),
            SliderKey::End => self.geometry.max_aligned(),
        }
    }
}

/// Applies a [`SliderAction`] and collects the callbacks the host should receive.
///
/// Disabled sliders only accept [`SliderAction::Resize`] and [`SliderAction::SyncValue`].
pub fn reduce_slider(state: &mut SliderState, action: SliderAction) -> Vec<SliderEffect> {
    let mut effects = Vec::new();
    let passive = matches!(
        action,
        SliderAction::Resize { .. } | SliderAction::SyncValue(_) | SliderAction::PointerCancel
    );
    if state.config.disabled && !passive {
        return effects;
    }

    match action {
        SliderAction::Resize { width_px } => {
            state.geometry = state.geometry.with_width(width_px);
        }
        SliderAction::PointerDown { target, pointer_x } => {
            if !state.geometry.is_measured() {
                return effects;
            }
            if target == DragTarget::Bar && !state.config.range {
                return effects;
            }
            state.drag = Some(DragState {
                target,
                start_value: state.value(),
                start_pointer_x: pointer_x,
                offset_px: 0.0,
            });
        }
        SliderAction::PointerMove { pointer_x } => {
            let Some(mut drag) = state.drag else {
                return effects;
            };
            drag.offset_px = pointer_x - drag.start_pointer_x;
            state.drag = Some(drag);
            let next = state.dragged_value(&drag);
            state.commit(next, &mut effects);
        }
        SliderAction::PointerUp { pointer_x } => {
            let Some(mut drag) = state.drag.take() else {
                return effects;
            };
            drag.offset_px = pointer_x - drag.start_pointer_x;
            let next = state.dragged_value(&drag);
            state.commit(next, &mut effects);
            log::debug!("slider gesture ended at {next:?}");
            effects.push(SliderEffect::AfterChange(next));
        }
        SliderAction::PointerCancel => {
            if state.drag.take().is_some() {
                log::debug!("slider gesture cancelled");
            }
        }
        SliderAction::ClickTrack { offset_px } => {
            if !state.geometry.is_measured() {
                return effects;
            }
            let value = state.geometry.value_at(offset_px);
            state.jump_to(value, &mut effects);
        }
        SliderAction::ClickTick { value } => {
            state.jump_to(value, &mut effects);
        }
        SliderAction::ClickBound(mark) => {
            let value = match mark {
                BoundMark::Start => state.geometry.min(),
                BoundMark::End => state.geometry.max_aligned(),
            };
            state.jump_to(value, &mut effects);
        }
        SliderAction::Key { handle, key } => {
            let handle = if state.config.range {
                handle
            } else {
                Handle::Upper
            };
            let current = state.value();
            let target = state.key_target(handle, key);
            let next = current.with_handle(handle, state.clamp_handle(current, handle, target));
            state.commit(next, &mut effects);
            effects.push(SliderEffect::AfterChange(next));
        }
        SliderAction::Hover { handle, hovered } => {
            if hovered {
                state.hovered = Some(handle);
            } else if state.hovered == Some(handle) {
                state.hovered = None;
            }
        }
        SliderAction::SyncValue(value) => {
            let value = value.map(|value| value.normalized(&state.geometry, state.config.range));
            state.value.sync(value);
        }
    }

    effects
}
