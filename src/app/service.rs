//! Cycle service, the event dispatcher at the hexagonal core.
//!
//! [`CycleService`] owns the state machine, the one [`Session`], and the
//! injected [`OutputSink`].  It exposes the four panel events and encodes
//! the precedence rules between them; the state machine only executes the
//! transitions requested here.  Every event takes `&mut self`, so the
//! borrow checker enforces the single-writer discipline: events never
//! interleave.
//!
//! ```text
//!  duration ─┐
//!  door ─────┤   ┌───────────────────────┐
//!  start/stop┼──▶│      CycleService      │──▶ OutputSink
//!  tick ─────┘   │  rules · CycleMachine  │
//!                └───────────────────────┘
//!                          │ snapshot()
//!                          ▼
//!                      StatusBoard
//! ```

use log::{debug, error, info};

use crate::config::CycleConfig;
use crate::fsm::context::{FsmContext, Session};
use crate::fsm::{CycleMachine, CycleState, Transition};
use crate::safety;
use crate::status::{self, StatusSnapshot};

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{EventSink, OutputSink};
use super::publish::StatusBoard;

// ───────────────────────────────────────────────────────────────
// CycleService
// ───────────────────────────────────────────────────────────────

/// The dispatcher: sole owner and sole writer of the session.
pub struct CycleService<O: OutputSink> {
    machine: CycleMachine,
    session: Session,
    outputs: O,
    /// Ticks per countdown second (derived from config).
    ticks_per_second: u8,
}

impl<O: OutputSink> CycleService<O> {
    /// Construct the service around its output capability.
    ///
    /// Outputs are not touched until [`start`](Self::start).
    pub fn new(config: &CycleConfig, outputs: O) -> Self {
        Self {
            machine: CycleMachine::default(),
            session: Session::new(),
            outputs,
            ticks_per_second: config.ticks_per_second().max(1),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive the outputs to the idle levels and announce the start.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.machine
            .apply_transition(&mut self.session, &mut self.outputs, CycleState::Idle);
        sink.emit(&AppEvent::Started(self.session.state));
        info!("CycleService started in {:?}", self.session.state);
    }

    // ── Panel events ──────────────────────────────────────────

    /// Stage a duration for the next run.  Accepted in every state; a run
    /// already in progress keeps its committed duration.
    pub fn on_duration_selected(&mut self, secs: u16) {
        self.session.selected_secs = secs;
        self.session.dirty = true;
        debug!("Duration selected: {}s", secs);
    }

    /// Door switch changed.  Opening the door pauses a running cycle
    /// before anything else can happen.
    pub fn on_door_changed(&mut self, closed: bool) -> Option<Transition> {
        self.session.door_closed = closed;

        let transition = if self.session.is_door_open() && self.session.is_running() {
            Some(self.transition(CycleState::Paused))
        } else {
            None
        };

        let lamp = self.session.is_door_open() || self.session.is_running();
        FsmContext::new(&mut self.session, &mut self.outputs).set_interior_light(lamp);

        self.session.dirty = true;
        debug!("Door {}", if closed { "closed" } else { "opened" });
        self.enforce_interlock();
        transition
    }

    /// Start/stop button pressed.
    ///
    /// | Door   | State          | Result   |
    /// |--------|----------------|----------|
    /// | closed | Idle, Paused   | Running  |
    /// | closed | Running        | Aborted  |
    /// | open   | anything but Idle | Aborted |
    /// | open   | Idle           | no-op    |
    pub fn on_start_stop_pressed(&mut self) -> Option<Transition> {
        let target = match (self.session.door_closed, self.session.state) {
            (true, CycleState::Idle | CycleState::Paused) => Some(CycleState::Running),
            (true, CycleState::Running) => Some(CycleState::Aborted),
            (false, state) if state != CycleState::Idle => Some(CycleState::Aborted),
            _ => None,
        };

        let transition = target.map(|t| self.transition(t));
        self.session.dirty = true;
        self.enforce_interlock();
        transition
    }

    /// One cycle tick elapsed.  Blinks the indicator while a cycle is
    /// active and advances the countdown while running.
    pub fn on_tick_elapsed(&mut self) -> Option<Transition> {
        let transition = match self.session.state {
            CycleState::Paused => {
                FsmContext::new(&mut self.session, &mut self.outputs).toggle_indicator_light();
                None
            }
            CycleState::Running => {
                FsmContext::new(&mut self.session, &mut self.outputs).toggle_indicator_light();
                self.session.sub_ticks += 1;

                if self.session.sub_ticks >= self.ticks_per_second {
                    self.session.sub_ticks = 0;
                    self.session.dirty = true;

                    if self.session.is_finished() {
                        Some(self.transition(CycleState::Completed))
                    } else {
                        self.session.remaining_secs -= 1;
                        None
                    }
                } else {
                    None
                }
            }
            _ => None,
        };

        self.enforce_interlock();
        transition
    }

    /// Apply an inbound command; same semantics as the individual events.
    pub fn handle_command(&mut self, cmd: AppCommand) -> Option<Transition> {
        match cmd {
            AppCommand::SelectDuration(secs) => {
                self.on_duration_selected(secs);
                None
            }
            AppCommand::DoorChanged(closed) => self.on_door_changed(closed),
            AppCommand::StartStopPressed => self.on_start_stop_pressed(),
            AppCommand::Tick => self.on_tick_elapsed(),
        }
    }

    // ── Reporting ─────────────────────────────────────────────

    /// Read-only projection for display.  Does not clear the dirty flag.
    pub fn snapshot(&self) -> StatusSnapshot {
        status::snapshot(&self.session)
    }

    /// Whether anything changed since the reporting side last cleared it.
    pub fn is_dirty(&self) -> bool {
        self.session.dirty
    }

    /// Called by a same-context reporter after it consumed a snapshot.
    pub fn clear_dirty(&mut self) {
        self.session.dirty = false;
    }

    /// Hand a snapshot to a reporter in another execution context.
    ///
    /// The dirty flag moves onto the board with the snapshot; from then on
    /// only the reporter clears it.  Returns `true` if anything was posted.
    pub fn publish(&mut self, board: &StatusBoard) -> bool {
        if !self.session.dirty {
            return false;
        }
        board.post(self.snapshot());
        self.session.dirty = false;
        true
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> CycleState {
        self.session.state
    }

    pub fn outputs(&self) -> &O {
        &self.outputs
    }

    pub fn outputs_mut(&mut self) -> &mut O {
        &mut self.outputs
    }

    // ── Internal ──────────────────────────────────────────────

    fn transition(&mut self, target: CycleState) -> Transition {
        self.machine
            .apply_transition(&mut self.session, &mut self.outputs, target)
    }

    /// Post-event audit of the output mirror; cuts the element on a fault.
    fn enforce_interlock(&mut self) {
        if let Err(fault) = safety::check_outputs(&self.session) {
            error!("Interlock override: forcing heating off ({fault})");
            FsmContext::new(&mut self.session, &mut self.outputs).set_heating(false);
        }
    }
}
