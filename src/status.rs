//! Status formatter.
//!
//! Derives a read-only [`StatusSnapshot`] from the session for the
//! reporting side.  Taking a snapshot never touches the dirty flag;
//! consuming it is the reporter's business.

use core::fmt;

use serde::Serialize;

use crate::clock::{ClockTime, to_clock};
use crate::fsm::CycleState;
use crate::fsm::context::Session;

/// Door position as shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DoorLabel {
    Opened,
    Closed,
}

impl DoorLabel {
    pub fn from_closed(closed: bool) -> Self {
        if closed { Self::Closed } else { Self::Opened }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Opened => "Opened",
            Self::Closed => "Closed",
        }
    }
}

impl fmt::Display for DoorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A point-in-time view of the session suitable for display or logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub remaining: ClockTime,
    pub selected: ClockTime,
    pub percent_complete: u8,
    pub door: DoorLabel,
    /// Operation label; may name a transient state that already folded.
    pub state_label: &'static str,
    /// Settled state.
    pub state: CycleState,
}

/// Project the session into a snapshot.
pub fn snapshot(session: &Session) -> StatusSnapshot {
    StatusSnapshot {
        remaining: to_clock(session.remaining_secs),
        selected: to_clock(session.selected_secs),
        percent_complete: percent_complete(session.remaining_secs, session.requested_secs),
        door: DoorLabel::from_closed(session.door_closed),
        state_label: session.status_label,
        state: session.state,
    }
}

/// Share of the requested duration already elapsed, rounded to the
/// nearest percent.  A session that never ran reports 0.
pub fn percent_complete(remaining_secs: u16, requested_secs: u16) -> u8 {
    if requested_secs == 0 {
        return 0;
    }
    let requested = u32::from(requested_secs);
    let elapsed = requested.saturating_sub(u32::from(remaining_secs));
    ((elapsed * 100 + requested / 2) / requested).min(100) as u8
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Status {} [{:>3}%] | Door [{:6}] | Selected [{}] | Operation {}",
            self.remaining, self.percent_complete, self.door, self.selected, self.state_label
        )
    }
}
