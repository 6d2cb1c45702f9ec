//! Duration codec: whole seconds ⇄ `mm:ss` clock face.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A duration split into minutes and seconds for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClockTime {
    pub minutes: u16,
    pub seconds: u8,
}

impl ClockTime {
    /// Recombine into a total number of seconds.
    pub fn total_secs(self) -> u32 {
        u32::from(self.minutes) * 60 + u32::from(self.seconds)
    }
}

/// Split `total_secs` into minutes and the remaining seconds.
pub fn to_clock(total_secs: u16) -> ClockTime {
    ClockTime {
        minutes: total_secs / 60,
        seconds: (total_secs % 60) as u8,
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}
