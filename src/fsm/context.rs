//! The session record and the context threaded through every state handler.
//!
//! `Session` is the single mutable record of the appliance: cycle state,
//! door level, the three durations, the sub-second accumulator, and the
//! mirror of the last commanded output levels.  `FsmContext` pairs it with
//! the injected [`OutputSink`] so that an entry handler changes the record
//! and drives the hardware in the same step.

use log::error;

use super::CycleState;
use crate::app::ports::OutputSink;
use crate::safety;

// ---------------------------------------------------------------------------
// Output levels (written through FsmContext; mirrored for inspection)
// ---------------------------------------------------------------------------

/// Last level commanded on each output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputLevels {
    /// Heating element (magnetron) energised.
    pub heating: bool,
    /// Cavity lamp.
    pub interior_light: bool,
    /// Front-panel "cooking" indicator; blinks while a cycle is active.
    pub indicator_light: bool,
}

impl OutputLevels {
    /// Everything off.
    pub fn all_off() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The appliance's one cooking session.
///
/// Created once at startup and owned by the
/// [`CycleService`](crate::app::service::CycleService); it is never
/// destroyed, only reset when a run ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Settled cycle state.  Never `Completed` or `Aborted` between calls.
    pub state: CycleState,
    /// Door switch level as last reported to the dispatcher.
    pub door_closed: bool,
    /// Duration staged on the selector for the next run (seconds).
    pub selected_secs: u16,
    /// Duration committed when the current run started (seconds).
    pub requested_secs: u16,
    /// Countdown of the current run (seconds).
    pub remaining_secs: u16,
    /// Ticks elapsed towards the next whole-second decrement.
    pub sub_ticks: u8,
    /// Set on every change; cleared only by the reporting side.
    pub dirty: bool,
    /// Label of the most recently requested state, transient ones included.
    pub status_label: &'static str,
    /// Mirror of the last commanded output levels.
    pub outputs: OutputLevels,
}

impl Session {
    /// Fresh session: idle, door reported open until the first sample,
    /// every duration zero, outputs off.  Starts dirty so the first report
    /// goes out.
    pub fn new() -> Self {
        Self {
            state: CycleState::Idle,
            door_closed: false,
            selected_secs: 0,
            requested_secs: 0,
            remaining_secs: 0,
            sub_ticks: 0,
            dirty: true,
            status_label: CycleState::Idle.label(),
            outputs: OutputLevels::all_off(),
        }
    }

    pub fn is_door_open(&self) -> bool {
        !self.door_closed
    }

    pub fn is_running(&self) -> bool {
        self.state == CycleState::Running
    }

    /// True once the countdown of the current run has reached zero.
    pub fn is_finished(&self) -> bool {
        self.remaining_secs == 0
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// What a state handler gets: the session plus the output capability.
pub struct FsmContext<'a> {
    pub session: &'a mut Session,
    outputs: &'a mut dyn OutputSink,
}

impl<'a> FsmContext<'a> {
    pub fn new(session: &'a mut Session, outputs: &'a mut dyn OutputSink) -> Self {
        Self { session, outputs }
    }

    /// Drive the heating element.  Switching on is gated by the interlock:
    /// a refused request logs the fault and forces the element off.
    pub fn set_heating(&mut self, on: bool) {
        let on = if on {
            match safety::heating_permitted(self.session) {
                Ok(()) => true,
                Err(fault) => {
                    error!("INTERLOCK: refused heating-on ({fault})");
                    false
                }
            }
        } else {
            false
        };
        self.outputs.set_heating_element(on);
        self.session.outputs.heating = on;
    }

    pub fn set_interior_light(&mut self, on: bool) {
        self.outputs.set_interior_light(on);
        self.session.outputs.interior_light = on;
    }

    pub fn set_indicator_light(&mut self, on: bool) {
        self.outputs.set_indicator_light(on);
        self.session.outputs.indicator_light = on;
    }

    pub fn toggle_indicator_light(&mut self) {
        self.outputs.toggle_indicator_light();
        self.session.outputs.indicator_light = !self.session.outputs.indicator_light;
    }

    /// End-of-run reset: countdown and sub-second count cleared, every
    /// output off.
    pub fn reset(&mut self) {
        self.session.remaining_secs = 0;
        self.session.sub_ticks = 0;
        self.set_heating(false);
        self.set_interior_light(false);
        self.set_indicator_light(false);
    }
}
