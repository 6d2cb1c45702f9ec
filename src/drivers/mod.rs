//! Hardware initialisation, tick timers, and the task watchdog.

pub mod hw_init;
pub mod hw_timer;
pub mod watchdog;
