//! Unified error types for the microwave controller.
//!
//! The cycle core itself never fails: every dispatcher event is total over
//! its input domain.  Bring-up errors (configuration, peripherals) funnel
//! into [`Error`] and end the firmware.  Runtime faults never do:
//! [`InputError`] rides on a single input channel and [`SafetyFault`] is a
//! refused heating command; both are logged and the loop carries on.
//! All types are `Copy` so they can be forwarded as events without
//! allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible bring-up step funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// Door switch GPIO read failed.
    DoorReadFailed,
    /// Start/stop button GPIO read failed.
    ButtonReadFailed,
    /// Selector knob ADC conversion failed.
    SelectorReadFailed,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DoorReadFailed => write!(f, "door switch read failed"),
            Self::ButtonReadFailed => write!(f, "start/stop button read failed"),
            Self::SelectorReadFailed => write!(f, "selector ADC read failed"),
        }
    }
}

impl core::error::Error for InputError {}

// ---------------------------------------------------------------------------
// Safety faults
// ---------------------------------------------------------------------------

/// Output commands refused by the heating interlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyFault {
    /// Heating requested while the door is open.
    HeatingWithDoorOpen,
    /// Heating requested while no cycle is running.
    HeatingOutsideRun,
}

impl fmt::Display for SafetyFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeatingWithDoorOpen => write!(f, "heating requested with door open"),
            Self::HeatingOutsideRun => write!(f, "heating requested outside a running cycle"),
        }
    }
}

impl core::error::Error for SafetyFault {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
