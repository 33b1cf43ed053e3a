//! Task Watchdog Timer (TWDT) driver.
//!
//! Wraps the ESP-IDF TWDT API to reset the device if the main task
//! stalls for longer than the configured timeout.
//!
//! The main task feeds it through the clock adapter on every sleep, so
//! blocking protocol waits keep it alive as long as they keep polling.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

pub struct Watchdog {
    #[cfg(target_os = "espidf")]
    subscribed: bool,
}

impl Watchdog {
    /// Initialise the TWDT and subscribe the current task.
    #[cfg(target_os = "espidf")]
    pub fn new(timeout_secs: u32) -> Self {
        unsafe {
            let cfg = esp_task_wdt_config_t {
                timeout_ms: timeout_secs.saturating_mul(1_000),
                idle_core_mask: 0,
                trigger_panic: true,
            };
            let ret = esp_task_wdt_reconfigure(&cfg);
            if ret != ESP_OK as esp_err_t {
                log::warn!(
                    "TWDT reconfigure returned {} (may already be configured)",
                    ret
                );
            }

            let ret = esp_task_wdt_add(core::ptr::null_mut());
            let subscribed = ret == ESP_OK as esp_err_t;
            if subscribed {
                info!("Watchdog: subscribed ({}s timeout, panic on trigger)", timeout_secs);
            } else {
                log::warn!("Watchdog: failed to subscribe ({})", ret);
            }

            Self { subscribed }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(timeout_secs: u32) -> Self {
        log::info!("Watchdog(sim): no-op ({}s)", timeout_secs);
        Self {}
    }

    /// Feed the watchdog.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }
    }
}
