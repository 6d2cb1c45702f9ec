//! Port traits: the hexagonal boundary between the cycle core and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ CycleService (domain)
//! ```
//!
//! Driven adapters (switches, lamps, event sinks) implement these traits.
//! The [`CycleService`](super::service::CycleService) owns its
//! [`OutputSink`] from construction; the
//! [`ControlLoop`](super::driver::ControlLoop) receives the
//! [`InputPort`] and [`EventSink`] at call sites.

use crate::error::InputError;

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One reading of every raw input, taken together.
///
/// Each channel is read on its own: a failed knob conversion must not hide
/// a door level that was read fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSample {
    /// Door switch: `true` = door closed.
    pub door_closed: Result<bool, InputError>,
    /// Start/stop button: `true` = currently held down.
    pub start_stop_pressed: Result<bool, InputError>,
    /// Raw selector knob position, `0..selector_max`.
    pub selector_position: Result<u16, InputError>,
}

impl InputSample {
    /// A sample where every channel read cleanly.
    pub fn healthy(door_closed: bool, start_stop_pressed: bool, selector_position: u16) -> Self {
        Self {
            door_closed: Ok(door_closed),
            start_stop_pressed: Ok(start_stop_pressed),
            selector_position: Ok(selector_position),
        }
    }

    /// Channel failures in forwarding order (knob, door, button).
    pub fn faults(&self) -> impl Iterator<Item = InputError> {
        [
            self.selector_position.err(),
            self.door_closed.err(),
            self.start_stop_pressed.err(),
        ]
        .into_iter()
        .flatten()
    }
}

/// Read-side port: the control loop samples the panel through this.
pub trait InputPort {
    /// Sample door, button, and selector.  Never fails as a whole; a
    /// channel that could not be read carries its own error.
    fn sample(&mut self) -> InputSample;
}

// ───────────────────────────────────────────────────────────────
// Output sink (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the state machine drives the appliance through this.
/// Implementations only switch hardware; the interlock lives in the core.
pub trait OutputSink {
    /// Energise or de-energise the heating element.
    fn set_heating_element(&mut self, on: bool);

    /// Cavity lamp.
    fn set_interior_light(&mut self, on: bool);

    /// Front-panel cycle indicator.
    fn set_indicator_light(&mut self, on: bool);

    /// Flip the indicator (heartbeat blink while a cycle is active).
    fn toggle_indicator_light(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / display)
// ───────────────────────────────────────────────────────────────

/// The control loop emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
