//! Hardware timer module using ESP-IDF's esp_timer API.
//!
//! Creates the two periodic timers that feed the event queue:
//!
//! - cycle timer (`timer_period_ms`, 10 ms) → [`Event::TimerTick`]
//! - report timer (`report_interval_ms`, 50 ms) → [`Event::ReportTick`]
//!
//! Timer callbacks execute in the ESP timer task context (not ISR) and
//! only call `push_event()`; they never touch the session.

use crate::config::CycleConfig;
use crate::events::{Event, push_event};

use super::hw_init::HwInitError;

#[cfg(feature = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(feature = "espidf")]
use log::info;

#[cfg(feature = "espidf")]
static mut CYCLE_TIMER: esp_timer_handle_t = core::ptr::null_mut();
#[cfg(feature = "espidf")]
static mut REPORT_TIMER: esp_timer_handle_t = core::ptr::null_mut();

#[cfg(feature = "espidf")]
unsafe extern "C" fn cycle_tick_cb(_arg: *mut core::ffi::c_void) {
    push_event(Event::TimerTick);
}

#[cfg(feature = "espidf")]
unsafe extern "C" fn report_tick_cb(_arg: *mut core::ffi::c_void) {
    push_event(Event::ReportTick);
}

/// Create and start one periodic timer, storing its handle in `slot`.
///
/// SAFETY: `slot` must point at one of the static handles above and be
/// written only from the main task during bring-up.
#[cfg(feature = "espidf")]
unsafe fn start_periodic(
    slot: *mut esp_timer_handle_t,
    name: &'static [u8],
    callback: unsafe extern "C" fn(*mut core::ffi::c_void),
    period_ms: u32,
) -> Result<(), HwInitError> {
    let args = esp_timer_create_args_t {
        callback: Some(callback),
        arg: core::ptr::null_mut(),
        dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
        name: name.as_ptr() as *const _,
        skip_unhandled_events: false,
    };
    let ret = unsafe { esp_timer_create(&args, slot) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::TimerFailed(ret));
    }
    let ret = unsafe { esp_timer_start_periodic(*slot, u64::from(period_ms) * 1_000) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::TimerFailed(ret));
    }
    Ok(())
}

/// Start the cycle and report timers.
#[cfg(feature = "espidf")]
pub fn start_timers(config: &CycleConfig) -> Result<(), HwInitError> {
    // SAFETY: the handles are written here once at boot from the single
    // main task before any timer callback fires.
    unsafe {
        start_periodic(
            &raw mut CYCLE_TIMER,
            b"cycle\0",
            cycle_tick_cb,
            config.timer_period_ms,
        )?;
        start_periodic(
            &raw mut REPORT_TIMER,
            b"report\0",
            report_tick_cb,
            config.report_interval_ms,
        )?;
    }
    info!(
        "hw_timer: cycle@{}ms + report@{}ms started",
        config.timer_period_ms, config.report_interval_ms
    );
    Ok(())
}

#[cfg(not(feature = "espidf"))]
pub fn start_timers(config: &CycleConfig) -> Result<(), HwInitError> {
    log::info!(
        "hw_timer(sim): timers not started (tick every {}ms by hand)",
        config.timer_period_ms
    );
    Ok(())
}

/// Stop whichever timers are running.  Used to unwind a partial bring-up.
#[cfg(feature = "espidf")]
pub fn stop_timers() {
    // SAFETY: handles are valid if start_timers() succeeded; the null check
    // covers a partial bring-up.
    unsafe {
        for handle in [CYCLE_TIMER, REPORT_TIMER] {
            if !handle.is_null() {
                esp_timer_stop(handle);
            }
        }
    }
}

/// Host stand-in for the timer callbacks: enqueue what `elapsed_ms` of
/// wall time would have produced.  Returns the number of events dropped.
pub fn simulate_elapsed(config: &CycleConfig, start_ms: u32, elapsed_ms: u32) -> u32 {
    let mut dropped = 0;
    for ms in start_ms + 1..=start_ms + elapsed_ms {
        if ms % config.timer_period_ms == 0 && !push_event(Event::TimerTick) {
            dropped += 1;
        }
        if ms % config.report_interval_ms == 0 && !push_event(Event::ReportTick) {
            dropped += 1;
        }
    }
    dropped
}
