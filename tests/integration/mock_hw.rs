//! Mock hardware adapters for integration tests.
//!
//! Records every output call so tests can assert on the full command
//! history without touching real GPIO registers, and replays scripted
//! input samples.

use std::collections::VecDeque;

use microwave::app::events::AppEvent;
use microwave::app::ports::{EventSink, InputPort, InputSample, OutputSink};
use microwave::error::InputError;

// ── Output call record ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCall {
    Heating(bool),
    InteriorLight(bool),
    Indicator(bool),
    ToggleIndicator,
}

// ── MockOutputs ───────────────────────────────────────────────

/// Output sink that tracks the physical level of each output as well as
/// the call history.
#[derive(Default)]
pub struct MockOutputs {
    pub calls: Vec<OutputCall>,
    pub heating: bool,
    pub interior_light: bool,
    pub indicator: bool,
}

#[allow(dead_code)]
impl MockOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggles(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == OutputCall::ToggleIndicator)
            .count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// True if the heating element was ever commanded on in the history.
    pub fn heating_was_on(&self) -> bool {
        self.calls.contains(&OutputCall::Heating(true))
    }
}

impl OutputSink for MockOutputs {
    fn set_heating_element(&mut self, on: bool) {
        self.heating = on;
        self.calls.push(OutputCall::Heating(on));
    }

    fn set_interior_light(&mut self, on: bool) {
        self.interior_light = on;
        self.calls.push(OutputCall::InteriorLight(on));
    }

    fn set_indicator_light(&mut self, on: bool) {
        self.indicator = on;
        self.calls.push(OutputCall::Indicator(on));
    }

    fn toggle_indicator_light(&mut self) {
        self.indicator = !self.indicator;
        self.calls.push(OutputCall::ToggleIndicator);
    }
}

// ── MockInputs ────────────────────────────────────────────────

/// Panel whose levels are set directly by the test.  A queued failure hits
/// only the channel it names, once, on the next sample; `knob_broken`
/// fails the knob on every sample.
pub struct MockInputs {
    pub door_closed: bool,
    pub pressed: bool,
    pub knob: u16,
    pub knob_broken: bool,
    pub failures: VecDeque<InputError>,
    pub samples: usize,
}

#[allow(dead_code)]
impl MockInputs {
    pub fn new() -> Self {
        Self {
            door_closed: true,
            pressed: false,
            knob: 1023,
            knob_broken: false,
            failures: VecDeque::new(),
            samples: 0,
        }
    }

    pub fn fail_next(&mut self, e: InputError) {
        self.failures.push_back(e);
    }
}

impl InputPort for MockInputs {
    fn sample(&mut self) -> InputSample {
        self.samples += 1;
        let mut sample = InputSample::healthy(self.door_closed, self.pressed, self.knob);
        if self.knob_broken {
            sample.selector_position = Err(InputError::SelectorReadFailed);
        }
        match self.failures.pop_front() {
            Some(e @ InputError::DoorReadFailed) => sample.door_closed = Err(e),
            Some(e @ InputError::ButtonReadFailed) => sample.start_stop_pressed = Err(e),
            Some(e @ InputError::SelectorReadFailed) => sample.selector_position = Err(e),
            None => {}
        }
        sample
    }
}

// ── Recording event sink ──────────────────────────────────────

#[derive(Default)]
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transitions(&self) -> Vec<microwave::fsm::Transition> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Transition(t) => Some(*t),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
