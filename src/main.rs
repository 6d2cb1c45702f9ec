//! Microwave controller firmware entry point.
//!
//! Hexagonal architecture with timer-driven execution.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  PanelInputs       PanelOutputs      LogEventSink  Reporter    │
//! │  (InputPort)       (OutputSink)      (EventSink)   (board)     │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │  ControlLoop → CycleService (pure logic)               │    │
//! │  │  FSM · interlock · countdown                           │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  esp_timer (10 ms cycle, 50 ms report) → lock-free event queue │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, PinDriver, Pull};
use log::info;

use microwave::adapters::hardware::{PanelInputs, PanelOutputs, SelectorAdc};
use microwave::adapters::log_sink::{ConsoleReporter, LogEventSink};
use microwave::app::driver::ControlLoop;
use microwave::app::publish::StatusBoard;
use microwave::app::service::CycleService;
use microwave::config::CycleConfig;
use microwave::drivers::{hw_init, hw_timer, watchdog::Watchdog};
use microwave::error::Error;
use microwave::events::{self, Event};
use microwave::pins;

/// Snapshot hand-off between the control loop and the status reporter.
static STATUS_BOARD: StatusBoard = StatusBoard::new();

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Microwave controller v{}         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    // A board variant can bake its own timing in at build time.
    let config = match option_env!("MICROWAVE_CONFIG_JSON") {
        Some(json) => CycleConfig::from_json(json)?,
        None => CycleConfig::default(),
    };
    config.validate()?;
    info!("Config: {:?}", config);

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals().map_err(Error::from)?;
    let watchdog = Watchdog::new();

    // SAFETY: each GPIO number is claimed exactly once, here.
    let (door_pin, button_pin, heating_pin, lamp_pin, indicator_pin) = unsafe {
        (
            AnyIOPin::new(pins::DOOR_SWITCH_GPIO),
            AnyIOPin::new(pins::START_STOP_GPIO),
            AnyIOPin::new(pins::HEATING_RELAY_GPIO),
            AnyIOPin::new(pins::INTERIOR_LIGHT_GPIO),
            AnyIOPin::new(pins::INDICATOR_LED_GPIO),
        )
    };

    let mut door = PinDriver::input(door_pin)?;
    door.set_pull(Pull::Up)?;
    let mut button = PinDriver::input(button_pin)?;
    button.set_pull(Pull::Up)?;

    let mut heating = PinDriver::output(heating_pin)?;
    heating.set_low()?;
    let mut lamp = PinDriver::output(lamp_pin)?;
    lamp.set_low()?;
    let mut indicator = PinDriver::output(indicator_pin)?;
    indicator.set_low()?;

    let mut inputs = PanelInputs::new(door, button, SelectorAdc);
    let outputs = PanelOutputs::new(heating, lamp, indicator);

    // ── 4. Cycle core ─────────────────────────────────────────
    let mut log_sink = LogEventSink::new();
    let mut reporter = ConsoleReporter::new();
    let mut control = ControlLoop::new(&config);
    let mut service = CycleService::new(&config, outputs);

    service.start(&mut log_sink);
    service.publish(&STATUS_BOARD);

    if let Err(e) = hw_timer::start_timers(&config) {
        // The cycle timer may already be running if the report timer failed.
        hw_timer::stop_timers();
        return Err(Error::from(e).into());
    }

    info!("System ready. Entering event loop.");

    // ── 5. Event loop ─────────────────────────────────────────
    loop {
        let mut idle = true;

        events::drain_events(|event| {
            idle = false;
            match event {
                Event::TimerTick => {
                    if control.on_timer_tick(&mut inputs, &mut service, &mut log_sink) {
                        service.publish(&STATUS_BOARD);
                    }
                }
                Event::ReportTick => {
                    reporter.report(&STATUS_BOARD);
                }
            }
        });

        watchdog.feed();

        if idle {
            FreeRtos::delay_ms(1);
        }
    }
}
