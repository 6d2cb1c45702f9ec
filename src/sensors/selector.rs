//! Duration selector knob.
//!
//! The knob is a potentiometer on an ADC channel.  Its range is cut into
//! `segment_count` equal segments, each worth `duration_step_secs`.  The
//! reading is inverted: turning clockwise lowers the raw value and selects
//! a longer cycle.

use crate::config::CycleConfig;

/// Maps raw knob positions to selectable durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationSelector {
    selector_max: u16,
    segments: u16,
    step_secs: u16,
}

impl DurationSelector {
    pub fn new(config: &CycleConfig) -> Self {
        Self {
            selector_max: config.selector_max.max(1),
            segments: config.segment_count().max(1),
            step_secs: config.duration_step_secs,
        }
    }

    /// Segment index for a raw reading, `1..=segments`.
    /// Readings at or above `selector_max` are clamped to the top of range.
    pub fn segment(&self, raw: u16) -> u16 {
        let max = u32::from(self.selector_max);
        let raw = u32::from(raw).min(max - 1);
        let inverted = max - 1 - raw;
        (1 + inverted * u32::from(self.segments) / max) as u16
    }

    /// Seconds selected by `segment`.
    pub fn duration_secs(&self, segment: u16) -> u16 {
        segment.saturating_mul(self.step_secs)
    }

}
