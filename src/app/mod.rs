//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules of the controller: event
//! dispatch, input edge detection, and snapshot publication.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod driver;
pub mod events;
pub mod ports;
pub mod publish;
pub mod service;
