//! Input sampling driver.
//!
//! Turns raw panel levels into the four dispatcher events.  The hardware
//! timer fires every `timer_period_ms`; every `timer_ticks_per_activation`
//! of those the loop samples the panel once and forwards, in this order:
//!
//! 1. duration selection, when the knob moved into a new segment
//! 2. door change, when the switch level differs from the last forwarded one
//! 3. start/stop, on the released→pressed edge only
//! 4. the cycle tick
//!
//! The fixed order matters: a door opened in the same activation as a tick
//! pauses the run before the tick is counted.

use log::{debug, warn};

use crate::config::CycleConfig;
use crate::sensors::DurationSelector;

use super::events::AppEvent;
use super::ports::{EventSink, InputPort, InputSample, OutputSink};
use super::service::CycleService;

/// Edge detector and activation counter between the timer and the service.
pub struct ControlLoop {
    selector: DurationSelector,
    ticks_per_activation: u32,
    timer_ticks: u32,
    last_segment: Option<u16>,
    last_door: Option<bool>,
    last_button: Option<bool>,
}

impl ControlLoop {
    pub fn new(config: &CycleConfig) -> Self {
        Self {
            selector: DurationSelector::new(config),
            ticks_per_activation: config.timer_ticks_per_activation().max(1),
            timer_ticks: 0,
            last_segment: None,
            last_door: None,
            last_button: None,
        }
    }

    /// Count one hardware timer tick; run an activation when due.
    /// Returns `true` if this tick triggered an activation.
    pub fn on_timer_tick<O: OutputSink>(
        &mut self,
        inputs: &mut impl InputPort,
        service: &mut CycleService<O>,
        sink: &mut impl EventSink,
    ) -> bool {
        self.timer_ticks += 1;
        if self.timer_ticks < self.ticks_per_activation {
            return false;
        }
        self.timer_ticks = 0;
        self.activate(inputs, service, sink);
        true
    }

    /// Sample once, forward any input changes, then deliver the tick.
    ///
    /// A channel that fails to read is skipped for this activation only and
    /// its last forwarded level stands; the other channels are forwarded as
    /// usual and the countdown keeps running.
    pub fn activate<O: OutputSink>(
        &mut self,
        inputs: &mut impl InputPort,
        service: &mut CycleService<O>,
        sink: &mut impl EventSink,
    ) {
        let sample = inputs.sample();
        for fault in sample.faults() {
            warn!("Input sampling failed: {fault}");
            sink.emit(&AppEvent::InputDegraded(fault));
        }
        self.forward_inputs(sample, service, sink);

        if let Some(t) = service.on_tick_elapsed() {
            sink.emit(&AppEvent::Transition(t));
        }
    }

    fn forward_inputs<O: OutputSink>(
        &mut self,
        sample: InputSample,
        service: &mut CycleService<O>,
        sink: &mut impl EventSink,
    ) {
        if let Ok(raw) = sample.selector_position {
            let segment = self.selector.segment(raw);
            if self.last_segment != Some(segment) {
                self.last_segment = Some(segment);
                let secs = self.selector.duration_secs(segment);
                service.on_duration_selected(secs);
                sink.emit(&AppEvent::DurationSelected(secs));
            }
        }

        if let Ok(closed) = sample.door_closed {
            if self.last_door != Some(closed) {
                self.last_door = Some(closed);
                let transition = service.on_door_changed(closed);
                sink.emit(&AppEvent::DoorChanged(closed));
                if let Some(t) = transition {
                    sink.emit(&AppEvent::Transition(t));
                }
            }
        }

        if let Ok(pressed) = sample.start_stop_pressed {
            let was_pressed = self.last_button.replace(pressed);
            if pressed && was_pressed == Some(false) {
                debug!("Start/stop pressed");
                if let Some(t) = service.on_start_stop_pressed() {
                    sink.emit(&AppEvent::Transition(t));
                }
            }
        }
    }
}
