//! Track geometry: pixel offset <-> stepped domain value conversion.

use serde::{Deserialize, Serialize};

/// Largest number of decimals kept when rounding stepped values.
const MAX_STEP_DECIMALS: u32 = 10;

/// Returns `step` when it is a usable positive number, otherwise `1`.
pub fn safe_step(step: f64) -> f64 {
    if step.is_finite() && step > 0.0 {
        step
    } else {
        1.0
    }
}

fn decimals_of(value: f64) -> u32 {
    let text = format!("{value}");
    text.split_once('.')
        .map(|(_, fraction)| fraction.len() as u32)
        .unwrap_or(0)
        .min(MAX_STEP_DECIMALS)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Bounded, steppable axis mapped onto a track of `width_px` pixels.
pub struct TrackGeometry {
    min: f64,
    max: f64,
    step: f64,
    width_px: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// One step boundary on the track.
pub struct Tick {
    /// Domain value at the boundary.
    pub value: f64,
    /// Pixel offset from the start of the track.
    pub offset_px: f64,
    /// Whether the tick sits on `min` or the last aligned value.
    pub is_bound: bool,
}

impl TrackGeometry {
    /// Builds geometry for `[min, max]` with a sanitized step.
    pub fn new(min: f64, max: f64, step: f64, width_px: f64) -> Self {
        Self {
            min,
            max,
            step: safe_step(step),
            width_px: width_px.max(0.0),
        }
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound as configured.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Sanitized step.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Track width in pixels.
    pub fn width_px(&self) -> f64 {
        self.width_px
    }

    /// Returns a copy measured against a new track width.
    pub fn with_width(self, width_px: f64) -> Self {
        Self {
            width_px: width_px.max(0.0),
            ..self
        }
    }

    /// Number of track segments, `ceil((max - min) / step)`.
    pub fn segment_count(&self) -> u32 {
        (((self.max - self.min) / self.step).ceil() as u32).max(1)
    }

    /// Pixel width of a single segment.
    pub fn segment_px(&self) -> f64 {
        self.width_px / f64::from(self.segment_count())
    }

    /// Whether the track has been measured.
    pub fn is_measured(&self) -> bool {
        self.segment_px() > 0.0
    }

    fn max_step_index(&self) -> f64 {
        // Tolerate float noise such as (1.0 - 0.0) / 0.1 = 9.999999999999998.
        ((self.max - self.min) / self.step + 1e-9).floor()
    }

    /// Highest step-aligned value that does not exceed `max`.
    pub fn max_aligned(&self) -> f64 {
        self.round_precision(self.min + self.max_step_index() * self.step)
    }

    fn round_precision(&self, value: f64) -> f64 {
        let decimals = decimals_of(self.step).max(decimals_of(self.min));
        let scale = 10f64.powi(decimals as i32);
        (value * scale).round() / scale
    }

    /// Snaps `value` to the nearest step boundary and clamps it to `[min, max_aligned]`.
    pub fn snap(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        let index = ((value - self.min) / self.step)
            .round()
            .clamp(0.0, self.max_step_index());
        self.round_precision(self.min + index * self.step)
    }

    /// Pixel offset of a domain value.
    pub fn offset_of(&self, value: f64) -> f64 {
        (value - self.min) / self.step * self.segment_px()
    }

    /// Stepped, clamped domain value at a pixel offset.
    pub fn value_at(&self, offset_px: f64) -> f64 {
        if !self.is_measured() {
            return self.min;
        }
        self.snap(self.min + offset_px / self.segment_px() * self.step)
    }

    /// Percentage of the track covered up to `value`, for CSS positioning.
    ///
    /// Uses the same segment grid as [`Self::offset_of`], so a rendered position and the pointer
    /// offset that selects it agree at any width.
    pub fn percent_of(&self, value: f64) -> f64 {
        let steps = (value - self.min) / self.step;
        (steps / f64::from(self.segment_count()) * 100.0).clamp(0.0, 100.0)
    }

    /// Every step boundary from `min` to the last aligned value.
    pub fn ticks(&self) -> Vec<Tick> {
        let last = self.max_step_index() as u32;
        (0..=last)
            .map(|index| {
                let value = self.round_precision(self.min + f64::from(index) * self.step);
                Tick {
                    value,
                    offset_px: self.offset_of(value),
                    is_bound: index == 0 || index == last,
                }
            })
            .collect()
    }
}
