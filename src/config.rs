//! System configuration parameters
//!
//! All tunable timing and selector parameters for the microwave controller.
//! The reference hardware runs a 10 ms timer, samples inputs and advances
//! the cycle every 100 ms, and offers six 20-second steps on the knob.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleConfig {
    // --- Timing ---
    /// Hardware timer period (milliseconds)
    pub timer_period_ms: u32,
    /// Input sampling and cycle tick cadence (milliseconds).
    /// Must divide one second so the countdown rollover is exact.
    pub activation_period_ms: u32,
    /// Status reporter cadence (milliseconds)
    pub report_interval_ms: u32,

    // --- Duration selector ---
    /// Exclusive upper bound of the selector knob reading
    pub selector_max: u16,
    /// Longest selectable cycle (seconds)
    pub max_duration_secs: u16,
    /// Duration covered by one selector segment (seconds)
    pub duration_step_secs: u16,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            // Timing
            timer_period_ms: 10,
            activation_period_ms: 100, // 10 ticks per second
            report_interval_ms: 50,

            // Selector
            selector_max: 1024, // 10-bit ADC
            max_duration_secs: 2 * 60,
            duration_step_secs: 20,
        }
    }
}

impl CycleConfig {
    /// Reject parameter combinations the cycle arithmetic cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.timer_period_ms == 0 || self.activation_period_ms == 0 {
            return Err(Error::Config("timer and activation periods must be non-zero"));
        }
        if 1000 % self.activation_period_ms != 0 {
            return Err(Error::Config("activation_period_ms must divide 1000"));
        }
        if 1000 / self.activation_period_ms > u32::from(u8::MAX) {
            return Err(Error::Config("activation_period_ms too short for the tick counter"));
        }
        if self.activation_period_ms % self.timer_period_ms != 0 {
            return Err(Error::Config(
                "timer_period_ms must divide activation_period_ms",
            ));
        }
        if self.report_interval_ms == 0 {
            return Err(Error::Config("report_interval_ms must be non-zero"));
        }
        if self.selector_max == 0 {
            return Err(Error::Config("selector_max must be non-zero"));
        }
        if self.duration_step_secs == 0 || self.max_duration_secs % self.duration_step_secs != 0
        {
            return Err(Error::Config(
                "duration_step_secs must be non-zero and divide max_duration_secs",
            ));
        }
        if self.max_duration_secs < self.duration_step_secs {
            return Err(Error::Config(
                "max_duration_secs must cover at least one step",
            ));
        }
        Ok(())
    }

    /// Parse a JSON override and validate it.  Missing fields are an error;
    /// the document must describe the whole configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Cycle ticks that make up one second of countdown.
    pub fn ticks_per_second(&self) -> u8 {
        (1000 / self.activation_period_ms) as u8
    }

    /// Hardware timer ticks between two driver activations.
    pub fn timer_ticks_per_activation(&self) -> u32 {
        self.activation_period_ms / self.timer_period_ms
    }

    /// Number of discrete durations the knob can select.
    pub fn segment_count(&self) -> u16 {
        self.max_duration_secs / self.duration_step_secs
    }
}
