//! Microwave cycle controller library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection.  All ESP-IDF-specific code is guarded by
//! `#[cfg(feature = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod fsm;
pub mod pins;
pub mod safety;
pub mod sensors;
pub mod status;

pub mod adapters;
pub mod drivers;
