//! Actuator drivers and task helpers.

pub mod flash_led;
pub mod task_pin;
pub mod watchdog;
