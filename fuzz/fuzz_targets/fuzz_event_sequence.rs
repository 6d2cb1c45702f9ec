//! Fuzz target: panel event sequences through the control loop
//!
//! Each input byte is one activation of the panel: bit 0 = door closed,
//! bit 1 = button held, bits 2-3 = which channel fails to read (none, knob,
//! door, button), upper bits pick the knob position.  Verifies after every
//! activation:
//! - No panics
//! - Heating only while running with the door closed
//! - Countdown never exceeds the committed duration
//! - No transient state survives a call
//!
//! cargo fuzz run fuzz_event_sequence

#![no_main]

use libfuzzer_sys::fuzz_target;
use microwave::app::driver::ControlLoop;
use microwave::app::events::AppEvent;
use microwave::app::ports::{EventSink, InputPort, InputSample, OutputSink};
use microwave::app::service::CycleService;
use microwave::config::CycleConfig;
use microwave::error::InputError;
use microwave::fsm::CycleState;

struct BytePanel {
    byte: u8,
}

impl InputPort for BytePanel {
    fn sample(&mut self) -> InputSample {
        let mut sample = InputSample::healthy(
            self.byte & 0b0001 != 0,
            self.byte & 0b0010 != 0,
            u16::from(self.byte >> 4) << 6,
        );
        match (self.byte >> 2) & 0b11 {
            1 => sample.selector_position = Err(InputError::SelectorReadFailed),
            2 => sample.door_closed = Err(InputError::DoorReadFailed),
            3 => sample.start_stop_pressed = Err(InputError::ButtonReadFailed),
            _ => {}
        }
        sample
    }
}

#[derive(Default)]
struct HeatingMirror {
    heating: bool,
}

impl OutputSink for HeatingMirror {
    fn set_heating_element(&mut self, on: bool) {
        self.heating = on;
    }
    fn set_interior_light(&mut self, _on: bool) {}
    fn set_indicator_light(&mut self, _on: bool) {}
    fn toggle_indicator_light(&mut self) {}
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let config = CycleConfig::default();
    let mut control = ControlLoop::new(&config);
    let mut service = CycleService::new(&config, HeatingMirror::default());
    service.start(&mut Discard);

    for &byte in data {
        let mut panel = BytePanel { byte };
        control.activate(&mut panel, &mut service, &mut Discard);

        let s = service.session();
        // A door that read open must never leave the element on, whatever
        // else failed in the same sample.
        if byte & 0b1100 != 0b1000 && byte & 0b0001 == 0 {
            assert!(!service.outputs().heating);
            assert_ne!(s.state, CycleState::Running);
        }
        assert!(!s.state.is_transient());
        assert!(s.remaining_secs <= s.requested_secs);
        assert_eq!(
            service.outputs().heating,
            s.state == CycleState::Running && s.door_closed
        );
    }
});
