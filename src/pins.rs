//! GPIO / peripheral pin assignments for the controller board.
//!
//! Single source of truth: the firmware entry point and the peripheral
//! bring-up reference this module rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Front-panel inputs (active-low with pull-ups)
// ---------------------------------------------------------------------------

/// Door reed switch.  LOW = door closed (magnet present).
pub const DOOR_SWITCH_GPIO: i32 = 4;
/// Momentary start/stop push-button.  LOW = pressed.
pub const START_STOP_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Duration selector (potentiometer on ADC1)
// ---------------------------------------------------------------------------

/// Knob wiper.
pub const SELECTOR_ADC_GPIO: i32 = 6;
/// ADC1 channel wired to `SELECTOR_ADC_GPIO` on ESP32-S3.
pub const SELECTOR_ADC_CHANNEL: u32 = 5;
/// Resolution the knob reading is scaled to; matches `CycleConfig::selector_max`.
pub const SELECTOR_ADC_BITS: u32 = 10;

// ---------------------------------------------------------------------------
// Outputs (active-high)
// ---------------------------------------------------------------------------

/// Heating element relay (magnetron supply).
pub const HEATING_RELAY_GPIO: i32 = 10;
/// Cavity lamp.
pub const INTERIOR_LIGHT_GPIO: i32 = 11;
/// Front-panel cycle indicator LED.
pub const INDICATOR_LED_GPIO: i32 = 12;
