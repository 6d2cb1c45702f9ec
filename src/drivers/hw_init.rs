//! One-shot peripheral initialization.
//!
//! Configures the ADC channel behind the duration knob using raw ESP-IDF
//! sys calls.  GPIO directions for the door switch, the button and the
//! three outputs are set up by the `PinDriver`s in `main()`.  Called once
//! before the event loop starts.

#[cfg(feature = "espidf")]
use esp_idf_svc::sys::*;

use crate::error::Error;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    TimerFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::TimerFailed(rc) => write!(f, "esp_timer setup failed (rc={})", rc),
        }
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        match e {
            HwInitError::AdcInitFailed(_) => Self::Init("selector ADC"),
            HwInitError::TimerFailed(_) => Self::Init("cycle timer"),
        }
    }
}

#[cfg(feature = "espidf")]
use log::info;

#[cfg(feature = "espidf")]
use crate::pins;

#[cfg(feature = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before event loop; single-threaded.
    unsafe {
        init_adc()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(feature = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(feature = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only after `init_adc()` completed, from the main
/// task.  The handle is never written again.
#[cfg(feature = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(feature = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let ret = unsafe {
        adc_oneshot_config_channel(adc1_handle(), pins::SELECTOR_ADC_CHANNEL, &chan_cfg)
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    info!(
        "hw_init: ADC1 configured (CH{}=selector on GPIO{})",
        pins::SELECTOR_ADC_CHANNEL,
        pins::SELECTOR_ADC_GPIO
    );
    Ok(())
}

/// One conversion of the knob, scaled to `SELECTOR_ADC_BITS`.
/// `None` if the conversion failed.
#[cfg(feature = "espidf")]
pub fn selector_read() -> Option<u16> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract, main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), pins::SELECTOR_ADC_CHANNEL, &mut raw) };
    if ret != ESP_OK as i32 {
        return None;
    }
    Some((raw.max(0) as u16) >> (12 - pins::SELECTOR_ADC_BITS))
}

#[cfg(not(feature = "espidf"))]
static SIM_SELECTOR: core::sync::atomic::AtomicU16 = core::sync::atomic::AtomicU16::new(1023);

/// Simulated knob: returns the last value set with [`set_sim_selector`].
#[cfg(not(feature = "espidf"))]
pub fn selector_read() -> Option<u16> {
    Some(SIM_SELECTOR.load(core::sync::atomic::Ordering::Relaxed))
}

#[cfg(not(feature = "espidf"))]
pub fn set_sim_selector(raw: u16) {
    SIM_SELECTOR.store(raw, core::sync::atomic::Ordering::Relaxed);
}
