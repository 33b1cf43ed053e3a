//! Flash LED driver.
//!
//! The ESP32-CAM flash LED hangs off one LEDC PWM channel.  The operator
//! console switches it between a fixed "on" duty and off.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives an `esp_idf_hal` LEDC channel.
//! On host/test: tracks duty in-memory only.

use log::warn;

use crate::app::ports::IlluminationPort;

#[cfg(target_os = "espidf")]
use esp_idf_hal::ledc::LedcDriver;

pub struct FlashLed {
    on_duty: u8,
    duty: u8,
    #[cfg(target_os = "espidf")]
    channel: LedcDriver<'static>,
}

impl FlashLed {
    /// `on_duty` is on a 0-255 scale.
    #[cfg(target_os = "espidf")]
    pub fn new(channel: LedcDriver<'static>, on_duty: u8) -> Self {
        let mut led = Self {
            on_duty,
            duty: 0,
            channel,
        };
        led.apply(0);
        led
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(on_duty: u8) -> Self {
        Self { on_duty, duty: 0 }
    }

    pub fn duty(&self) -> u8 {
        self.duty
    }

    #[cfg(target_os = "espidf")]
    fn apply(&mut self, duty: u8) {
        let max = self.channel.get_max_duty();
        let scaled = u32::from(duty) * max / 255;
        if let Err(e) = self.channel.set_duty(scaled) {
            warn!("flash_led: set_duty failed: {}", e);
            return;
        }
        self.duty = duty;
    }

    #[cfg(not(target_os = "espidf"))]
    fn apply(&mut self, duty: u8) {
        if duty > 0 && self.on_duty == 0 {
            warn!("flash_led(sim): on duty is 0, LED stays dark");
        }
        self.duty = duty;
    }
}

impl IlluminationPort for FlashLed {
    fn set_illumination(&mut self, on: bool) {
        self.apply(if on { self.on_duty } else { 0 });
    }
}
