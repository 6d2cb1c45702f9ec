//! Snapshot publication across execution contexts.
//!
//! The control loop and the status reporter run on different schedules
//! (100 ms activations vs. 50 ms reports).  Instead of sharing the
//! session, the service posts an immutable [`StatusSnapshot`] copy here
//! under an `embassy-sync` blocking mutex.  The dirty flag travels with the
//! snapshot and only the reporter clears it.
//!
//! ```text
//! ┌──────────────┐  post()   ┌─────────────┐  take_update()  ┌──────────┐
//! │ CycleService │─────────▶│ StatusBoard │───────────────▶│ Reporter │
//! └──────────────┘           └─────────────┘                 └──────────┘
//! ```

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::status::StatusSnapshot;

struct Slot {
    latest: Option<StatusSnapshot>,
    dirty: bool,
}

/// Latest published snapshot plus its unreported flag.
pub struct StatusBoard {
    slot: Mutex<CriticalSectionRawMutex, RefCell<Slot>>,
}

impl StatusBoard {
    /// Empty board; usable as a `static`.
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(RefCell::new(Slot {
                latest: None,
                dirty: false,
            })),
        }
    }

    /// Replace the latest snapshot and mark it unreported.
    pub fn post(&self, snapshot: StatusSnapshot) {
        self.slot.lock(|cell| {
            let mut slot = cell.borrow_mut();
            slot.latest = Some(snapshot);
            slot.dirty = true;
        });
    }

    /// Reporter side: the snapshot if one is unreported, clearing the flag.
    pub fn take_update(&self) -> Option<StatusSnapshot> {
        self.slot.lock(|cell| {
            let mut slot = cell.borrow_mut();
            if slot.dirty {
                slot.dirty = false;
                slot.latest
            } else {
                None
            }
        })
    }

    pub fn is_dirty(&self) -> bool {
        self.slot.lock(|cell| cell.borrow().dirty)
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsm::context::Session;
    use crate::status;

    #[test]
    fn empty_board_has_nothing_to_report() {
        let board = StatusBoard::new();
        assert!(!board.is_dirty());
        assert!(board.take_update().is_none());
    }

    #[test]
    fn take_update_clears_flag_until_next_post() {
        let board = StatusBoard::new();
        let snap = status::snapshot(&Session::new());
        board.post(snap);
        assert!(board.is_dirty());

        assert_eq!(board.take_update(), Some(snap));
        assert!(!board.is_dirty());
        assert!(board.take_update().is_none());

        board.post(snap);
        assert_eq!(board.take_update(), Some(snap));
    }

    #[test]
    fn later_post_overwrites_earlier() {
        let board = StatusBoard::new();
        let mut s = Session::new();
        board.post(status::snapshot(&s));
        s.door_closed = true;
        board.post(status::snapshot(&s));

        let snap = board.take_update().unwrap();
        assert_eq!(snap.door, status::DoorLabel::Closed);
    }
}
