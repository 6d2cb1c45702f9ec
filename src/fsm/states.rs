//! Concrete state entry functions and table builder.
//!
//! Each state is defined by plain `fn` pointers, no closures or heap.
//!
//! ```text
//!            [start, door closed]
//!   IDLE ───────────────────────────▶ RUNNING ──[door opens]──▶ PAUSED
//!    ▲                                 │   ▲                      │
//!    │                   [countdown    │   └──[start, door closed]┘
//!    │                    expired]     │
//!    │                                 ▼
//!    ├──────── fold ──────────────── COMPLETED
//!    │
//!    └──────── fold ──────────────── ABORTED ◀──[stop / start with door open]
//!                                                   (from RUNNING or PAUSED)
//! ```

use super::context::FsmContext;
use super::{CycleState, StateDescriptor};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; CycleState::COUNT] {
    [
        // Index 0: Idle
        StateDescriptor {
            id: CycleState::Idle,
            label: CycleState::Idle.label(),
            prepare: None,
            on_enter: Some(idle_enter),
            settles_as: CycleState::Idle,
        },
        // Index 1: Running
        StateDescriptor {
            id: CycleState::Running,
            label: CycleState::Running.label(),
            prepare: Some(running_prepare),
            on_enter: Some(running_enter),
            settles_as: CycleState::Running,
        },
        // Index 2: Paused
        StateDescriptor {
            id: CycleState::Paused,
            label: CycleState::Paused.label(),
            prepare: None,
            on_enter: Some(paused_enter),
            settles_as: CycleState::Paused,
        },
        // Index 3: Completed (transient)
        StateDescriptor {
            id: CycleState::Completed,
            label: CycleState::Completed.label(),
            prepare: None,
            on_enter: Some(completed_enter),
            settles_as: CycleState::Idle,
        },
        // Index 4: Aborted (transient)
        StateDescriptor {
            id: CycleState::Aborted,
            label: CycleState::Aborted.label(),
            prepare: None,
            on_enter: Some(aborted_enter),
            settles_as: CycleState::Idle,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut FsmContext<'_>) {
    ctx.reset();
}

// ═══════════════════════════════════════════════════════════════════════════
//  RUNNING state: element on, countdown advancing
// ═══════════════════════════════════════════════════════════════════════════

/// An exhausted countdown commits the staged duration, whether the run is
/// new or was paused in its final second; otherwise the countdown resumes.
fn running_prepare(ctx: &mut FsmContext<'_>) {
    if ctx.session.is_finished() {
        ctx.session.remaining_secs = ctx.session.selected_secs;
        ctx.session.requested_secs = ctx.session.selected_secs;
        info!("RUNNING: new cycle of {}s", ctx.session.requested_secs);
    } else {
        info!(
            "RUNNING: resuming with {}s of {}s left",
            ctx.session.remaining_secs, ctx.session.requested_secs
        );
    }
}

fn running_enter(ctx: &mut FsmContext<'_>) {
    ctx.set_heating(true);
    ctx.set_interior_light(true);
}

// ═══════════════════════════════════════════════════════════════════════════
//  PAUSED state: element off, countdown frozen
// ═══════════════════════════════════════════════════════════════════════════

fn paused_enter(ctx: &mut FsmContext<'_>) {
    ctx.set_heating(false);
    info!("PAUSED: {}s left", ctx.session.remaining_secs);
}

// ═══════════════════════════════════════════════════════════════════════════
//  COMPLETED / ABORTED: end-of-run markers, folded to Idle by the machine
// ═══════════════════════════════════════════════════════════════════════════

fn completed_enter(ctx: &mut FsmContext<'_>) {
    info!("COMPLETED: {}s cycle finished", ctx.session.requested_secs);
    ctx.reset();
}

fn aborted_enter(ctx: &mut FsmContext<'_>) {
    info!(
        "ABORTED: canceled with {}s of {}s left",
        ctx.session.remaining_secs, ctx.session.requested_secs
    );
    ctx.reset();
}
