//! Function-pointer cycle state machine.
//!
//! Classic embedded FSM pattern ported to Rust:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  StateTable                                                     │
//! │  ┌───────────┬─────────────┬───────────┬──────────┬──────────┐  │
//! │  │ CycleState│ label       │ prepare   │ on_enter │ settles  │  │
//! │  ├───────────┼─────────────┼───────────┼──────────┼──────────┤  │
//! │  │ Idle      │ Off         │ -         │ fn(ctx)  │ Idle     │  │
//! │  │ Running   │ In Progress │ fn(ctx)   │ fn(ctx)  │ Running  │  │
//! │  │ Paused    │ Paused      │ -         │ fn(ctx)  │ Paused   │  │
//! │  │ Completed │ Succeeded   │ -         │ fn(ctx)  │ Idle     │  │
//! │  │ Aborted   │ Canceled    │ -         │ fn(ctx)  │ Idle     │  │
//! │  └───────────┴─────────────┴───────────┴──────────┴──────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`CycleMachine::apply_transition`] is the only place outputs change on
//! a state change.  It never refuses a target: the dispatcher decides which
//! transitions are legal, the machine just executes them.  The sequence is
//! label → `prepare` → bump → `on_enter` → settle, so a transient target
//! (`Completed`, `Aborted`) is visible in the returned [`Transition`] and in
//! `status_label`, while `Session::state` has already folded back to `Idle`.

pub mod context;
pub mod states;

use context::{FsmContext, Session};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::app::ports::OutputSink;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of every cycle state.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CycleState {
    Idle = 0,
    Running = 1,
    Paused = 2,
    Completed = 3,
    Aborted = 4,
}

impl CycleState {
    /// Total number of states; sizes the table array.
    pub const COUNT: usize = 5;

    /// Every state, in table order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Idle,
        Self::Running,
        Self::Paused,
        Self::Completed,
        Self::Aborted,
    ];

    /// Operator-facing label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Off",
            Self::Running => "In Progress",
            Self::Paused => "Paused",
            Self::Completed => "Succeeded",
            Self::Aborted => "Canceled",
        }
    }

    /// `Completed` and `Aborted` are markers that fold back to `Idle`.
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Completed | Self::Aborted)
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `prepare` and `on_enter` actions.
/// These run exactly once per transition into the state.
pub type StateActionFn = fn(&mut FsmContext<'_>);

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single cycle state.
/// Stored in a fixed-size array, no heap.
pub struct StateDescriptor {
    pub id: CycleState,
    pub label: &'static str,
    /// Runs before the state field is bumped.
    pub prepare: Option<StateActionFn>,
    /// Runs after the bump; drives the outputs.
    pub on_enter: Option<StateActionFn>,
    /// State recorded once entry completes.
    pub settles_as: CycleState,
}

// ---------------------------------------------------------------------------
// Transition record
// ---------------------------------------------------------------------------

/// Outcome of one [`CycleMachine::apply_transition`] call.
///
/// `entered` is the requested target, `settled` what the session holds
/// afterwards.  They differ only for the transient states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: CycleState,
    pub entered: CycleState,
    pub settled: CycleState,
    pub label: &'static str,
}

impl Transition {
    /// True when a transient state was entered and folded away.
    pub fn folded(&self) -> bool {
        self.entered != self.settled
    }
}

// ---------------------------------------------------------------------------
// Machine
// ---------------------------------------------------------------------------

/// The cycle state machine: the state table plus the transition routine.
/// The session it operates on lives outside, owned by the dispatcher.
pub struct CycleMachine {
    /// Fixed-size table indexed by `CycleState as usize`.
    table: [StateDescriptor; CycleState::COUNT],
}

impl CycleMachine {
    pub fn new(table: [StateDescriptor; CycleState::COUNT]) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, d)| d.id as usize == i),
            "state table out of order"
        );
        Self { table }
    }

    /// Execute a transition to `target`, applying its side effects.
    pub fn apply_transition(
        &self,
        session: &mut Session,
        outputs: &mut dyn OutputSink,
        target: CycleState,
    ) -> Transition {
        let desc = &self.table[target as usize];
        let from = session.state;

        session.status_label = desc.label;

        let mut ctx = FsmContext::new(session, outputs);
        if let Some(prepare) = desc.prepare {
            prepare(&mut ctx);
        }

        ctx.session.state = desc.id;
        if let Some(enter) = desc.on_enter {
            enter(&mut ctx);
        }

        ctx.session.state = desc.settles_as;
        ctx.session.dirty = true;

        let transition = Transition {
            from,
            entered: desc.id,
            settled: desc.settles_as,
            label: desc.label,
        };

        if transition.folded() {
            info!(
                "Cycle transition: {:?} -> {:?} (settled {:?})",
                from, desc.id, desc.settles_as
            );
        } else {
            info!("Cycle transition: {:?} -> {:?}", from, desc.id);
        }
        debug!(
            "  remaining={}s requested={}s outputs={:?}",
            ctx.session.remaining_secs, ctx.session.requested_secs, ctx.session.outputs
        );

        transition
    }

    /// Label stored in the table for `state`.
    pub fn label(&self, state: CycleState) -> &'static str {
        self.table[state as usize].label
    }
}

impl Default for CycleMachine {
    fn default() -> Self {
        Self::new(states::build_state_table())
    }
}
