//! Heating interlock.
//!
//! The heating element may only be energised while a cycle is running and
//! the door is closed.  The dispatcher already sequences events so this
//! holds (a door-open observation pauses the run before anything else
//! happens), but the outputs are double-gated:
//!
//! 1. [`heating_permitted`] is consulted by every heating-on command issued
//!    from a state handler; a refused command leaves the element off.
//! 2. [`check_outputs`] runs after every dispatcher event and reports a
//!    mirror that says the element is on when it must not be.
//!
//! Neither gate fires in normal operation.  A fault here means the state
//! table or the dispatcher rules were edited into an unsafe shape.

use log::error;

use crate::error::SafetyFault;
use crate::fsm::context::Session;

/// May the heating element be switched on for this session right now?
pub fn heating_permitted(session: &Session) -> Result<(), SafetyFault> {
    if session.is_door_open() {
        return Err(SafetyFault::HeatingWithDoorOpen);
    }
    if !session.is_running() {
        return Err(SafetyFault::HeatingOutsideRun);
    }
    Ok(())
}

/// Verify the commanded output levels against the session state.
pub fn check_outputs(session: &Session) -> Result<(), SafetyFault> {
    if session.outputs.heating {
        heating_permitted(session).inspect_err(|fault| {
            error!("SAFETY FAULT: heating element on ({fault})");
        })
    } else {
        Ok(())
    }
}
