//! Hardware adapter: bridges panel peripherals to the domain port traits.
//!
//! [`PanelInputs`] implements [`InputPort`] over two `embedded-hal` input
//! pins and a knob channel; [`PanelOutputs`] implements [`OutputSink`] over
//! three output pins.  Generic over the pin types so the same code drives
//! ESP-IDF `PinDriver`s on the board and plain test pins on the host.
//!
//! Both switches are active-low: door LOW = closed, button LOW = pressed.

use embedded_hal::digital::{InputPin, OutputPin, PinState, StatefulOutputPin};
use log::error;

use crate::app::ports::{InputPort, InputSample, OutputSink};
use crate::drivers::hw_init;
use crate::error::InputError;

// ── Knob channel ──────────────────────────────────────────────

/// Source of raw duration-knob readings.
pub trait SelectorChannel {
    fn read_raw(&mut self) -> Result<u16, InputError>;
}

/// The on-board ADC channel configured by [`hw_init::init_peripherals`].
pub struct SelectorAdc;

impl SelectorChannel for SelectorAdc {
    fn read_raw(&mut self) -> Result<u16, InputError> {
        hw_init::selector_read().ok_or(InputError::SelectorReadFailed)
    }
}

// ── InputPort implementation ──────────────────────────────────

pub struct PanelInputs<D, B, K> {
    door: D,
    button: B,
    knob: K,
}

impl<D, B, K> PanelInputs<D, B, K>
where
    D: InputPin,
    B: InputPin,
    K: SelectorChannel,
{
    pub fn new(door: D, button: B, knob: K) -> Self {
        Self { door, button, knob }
    }
}

impl<D, B, K> InputPort for PanelInputs<D, B, K>
where
    D: InputPin,
    B: InputPin,
    K: SelectorChannel,
{
    fn sample(&mut self) -> InputSample {
        InputSample {
            door_closed: self
                .door
                .is_low()
                .map_err(|_| InputError::DoorReadFailed),
            start_stop_pressed: self
                .button
                .is_low()
                .map_err(|_| InputError::ButtonReadFailed),
            selector_position: self.knob.read_raw(),
        }
    }
}

// ── OutputSink implementation ─────────────────────────────────

pub struct PanelOutputs<H, L, I> {
    heating: H,
    lamp: L,
    indicator: I,
}

impl<H, L, I> PanelOutputs<H, L, I>
where
    H: OutputPin,
    L: OutputPin,
    I: StatefulOutputPin,
{
    pub fn new(heating: H, lamp: L, indicator: I) -> Self {
        Self {
            heating,
            lamp,
            indicator,
        }
    }
}

impl<H, L, I> OutputSink for PanelOutputs<H, L, I>
where
    H: OutputPin,
    L: OutputPin,
    I: StatefulOutputPin,
{
    fn set_heating_element(&mut self, on: bool) {
        if let Err(e) = self.heating.set_state(PinState::from(on)) {
            error!("Heating relay write failed: {:?}", e);
        }
    }

    fn set_interior_light(&mut self, on: bool) {
        if let Err(e) = self.lamp.set_state(PinState::from(on)) {
            error!("Interior light write failed: {:?}", e);
        }
    }

    fn set_indicator_light(&mut self, on: bool) {
        if let Err(e) = self.indicator.set_state(PinState::from(on)) {
            error!("Indicator write failed: {:?}", e);
        }
    }

    fn toggle_indicator_light(&mut self) {
        if let Err(e) = self.indicator.toggle() {
            error!("Indicator toggle failed: {:?}", e);
        }
    }
}
