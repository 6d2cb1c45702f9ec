//! Task Watchdog Timer (TWDT) driver.
//!
//! Resets the device if the main loop stalls.  A stalled loop would leave
//! the heating relay in whatever state it was last driven to, so the
//! timeout is kept short; the main loop feeds on every drained batch.

#[cfg(feature = "espidf")]
use esp_idf_svc::sys::*;

/// Main-loop stall budget before the TWDT panics and resets.
pub const WATCHDOG_TIMEOUT_MS: u32 = 2_000;

pub struct Watchdog {
    #[cfg(feature = "espidf")]
    subscribed: bool,
    #[cfg(not(feature = "espidf"))]
    feeds: core::cell::Cell<u32>,
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::new()
    }
}

impl Watchdog {
    /// Initialise and subscribe the current task to the TWDT.
    pub fn new() -> Self {
        #[cfg(feature = "espidf")]
        {
            // SAFETY: TWDT calls from the main task during bring-up.
            unsafe {
                let cfg = esp_task_wdt_config_t {
                    timeout_ms: WATCHDOG_TIMEOUT_MS,
                    idle_core_mask: 0,
                    trigger_panic: true,
                };
                let ret = esp_task_wdt_reconfigure(&cfg);
                if ret != ESP_OK as i32 {
                    log::warn!("TWDT reconfigure returned {} (may already be configured)", ret);
                }

                let subscribed = esp_task_wdt_add(core::ptr::null_mut()) == ESP_OK as i32;
                if subscribed {
                    log::info!("Watchdog: subscribed ({}ms timeout)", WATCHDOG_TIMEOUT_MS);
                } else {
                    log::warn!("Watchdog: failed to subscribe");
                }
                Self { subscribed }
            }
        }

        #[cfg(not(feature = "espidf"))]
        {
            log::info!("Watchdog(sim): counting feeds only");
            Self {
                feeds: core::cell::Cell::new(0),
            }
        }
    }

    pub fn feed(&self) {
        #[cfg(feature = "espidf")]
        {
            if self.subscribed {
                // SAFETY: resets the TWDT entry of the calling (subscribed) task.
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }

        #[cfg(not(feature = "espidf"))]
        {
            self.feeds.set(self.feeds.get().wrapping_add(1));
        }
    }

    /// Number of feeds seen by the simulated watchdog.
    #[cfg(not(feature = "espidf"))]
    pub fn feeds(&self) -> u32 {
        self.feeds.get()
    }
}
