//! Inbound commands to the cycle service.
//!
//! These are the four panel events as values, for adapters that queue or
//! replay input rather than calling the
//! [`CycleService`](super::service::CycleService) methods directly.

/// Events that external adapters can send into the cycle core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// The operator staged a new duration (seconds).
    SelectDuration(u16),

    /// The door switch changed level (`true` = closed).
    DoorChanged(bool),

    /// The start/stop button was pressed.
    StartStopPressed,

    /// One cycle tick elapsed.
    Tick,
}
