//! Front-panel sensing.
//!
//! Only the duration knob needs interpretation; the door switch and the
//! start/stop button are plain GPIO levels read by the hardware adapter.

pub mod selector;

pub use selector::DurationSelector;
