//! Outbound application events.
//!
//! The [`ControlLoop`](super::driver::ControlLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them, e.g. log to serial or drive a display.

use crate::error::InputError;
use crate::fsm::{CycleState, Transition};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The cycle service has started (carries initial state).
    Started(CycleState),

    /// A new duration was staged on the selector (seconds).
    DurationSelected(u16),

    /// The door switch changed (`true` = closed).
    DoorChanged(bool),

    /// The state machine executed a transition.  Transient states
    /// (`Succeeded`, `Canceled`) are only ever visible here.
    Transition(Transition),

    /// Inputs could not be sampled this activation; the tick still ran.
    InputDegraded(InputError),
}
