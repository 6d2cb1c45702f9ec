//! Interrupt-driven event system.
//!
//! Events are produced by the hardware timer callbacks and consumed by the
//! main control loop, one at a time in FIFO order.  The callbacks never
//! touch the session; they only enqueue.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ 10 ms timer │────▶│  Event Queue │────▶│  Main Loop   │
//! │ 50 ms timer │────▶│  (lock-free) │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use heapless::mpmc::Q32;
use log::warn;

/// System event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Event {
    /// Hardware timer period elapsed (drives input sampling and the cycle tick).
    TimerTick = 0,
    /// Status reporter period elapsed.
    ReportTick = 1,
}

// ── Lock-free MPMC queue ──────────────────────────────────────

/// Bounded event queue.  Full queue drops the newest event.
pub struct EventQueue {
    inner: Q32<Event>,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self { inner: Q32::new() }
    }

    /// Enqueue `event`.  Safe from ISR and timer-task context.
    /// Returns `false` if the queue is full (event dropped).
    pub fn push(&self, event: Event) -> bool {
        self.inner.enqueue(event).is_ok()
    }

    pub fn pop(&self) -> Option<Event> {
        self.inner.dequeue()
    }

    /// Drain all pending events into a callback, in FIFO order.
    pub fn drain(&self, mut handler: impl FnMut(Event)) {
        while let Some(event) = self.pop() {
            handler(event);
        }
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// The firmware-wide queue fed by the timer callbacks.
static EVENTS: EventQueue = EventQueue::new();

/// Push an event into the global queue.
pub fn push_event(event: Event) -> bool {
    let accepted = EVENTS.push(event);
    if !accepted {
        warn!("Event queue full, dropped {:?}", event);
    }
    accepted
}

/// Drain the global queue.
pub fn drain_events(handler: impl FnMut(Event)) {
    EVENTS.drain(handler);
}
