//! Log-based adapters.
//!
//! [`LogEventSink`] implements [`EventSink`] by writing structured
//! application events to the logger (UART / USB-CDC in production).
//! [`ConsoleReporter`] is the reporting side of the [`StatusBoard`]: it
//! renders each unreported snapshot as one status line.

use core::fmt::Write;

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::app::publish::StatusBoard;
use crate::status::StatusSnapshot;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::DurationSelected(secs) => {
                info!("SELECT | {}s", secs);
            }
            AppEvent::DoorChanged(closed) => {
                info!("DOOR | {}", if *closed { "closed" } else { "opened" });
            }
            AppEvent::Transition(t) if t.folded() => {
                info!(
                    "STATE | {:?} -> {:?} -> {:?} ({})",
                    t.from, t.entered, t.settled, t.label
                );
            }
            AppEvent::Transition(t) => {
                info!("STATE | {:?} -> {:?} ({})", t.from, t.entered, t.label);
            }
            AppEvent::InputDegraded(e) => {
                warn!("INPUT | degraded: {}", e);
            }
        }
    }
}

// ── Status line reporter ──────────────────────────────────────

/// Longest status line the reporter renders.
pub const STATUS_LINE_CAP: usize = 128;

/// Render a snapshot into a fixed-capacity line.
///
/// Returns `None` if the line does not fit.
pub fn render_status(snapshot: &StatusSnapshot) -> Option<heapless::String<STATUS_LINE_CAP>> {
    let mut line = heapless::String::new();
    write!(line, "{}", snapshot).ok()?;
    Some(line)
}

/// Prints the status line whenever the board holds an unreported snapshot.
#[derive(Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// Consume the board's update, if any, and print it.
    /// Returns `true` if a line was printed.
    pub fn report(&mut self, board: &StatusBoard) -> bool {
        let Some(snapshot) = board.take_update() else {
            return false;
        };
        match render_status(&snapshot) {
            Some(line) => {
                info!("{}", line);
                true
            }
            None => {
                warn!("Status line exceeds {} bytes, dropped", STATUS_LINE_CAP);
                false
            }
        }
    }
}
