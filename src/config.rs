//! System configuration parameters
//!
//! All tunable parameters for the VoteCam station.
//! Values can be overridden via NVS (non-volatile storage) or a JSON
//! document baked in at build time.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// What the request bridge does when its queue is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnqueuePolicy {
    /// Block the submitting session until a queue slot frees up.
    Block,
    /// Fail the submission immediately with an error string.
    Reject,
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Network ---
    /// Base URL of the remote logging/verification service.
    pub service_url: String,
    /// WiFi station SSID (empty = not provisioned)
    pub wifi_ssid: String,
    /// WiFi station password (empty for open networks)
    pub wifi_password: String,
    /// TCP port of the operator control channel
    pub control_port: u16,
    /// Upper bound on a single logging-service call (milliseconds)
    pub http_timeout_ms: u32,
    /// Behaviour of `submit` when the request queue is full
    pub enqueue_policy: EnqueuePolicy,

    // --- Session deadlines ---
    /// Vote AwaitingInput deadline (milliseconds)
    pub vote_timeout_ms: u32,
    /// Fingerprint enrollment deadline (milliseconds)
    pub enroll_timeout_ms: u32,
    /// Fingerprint deletion deadline (milliseconds)
    pub delete_timeout_ms: u32,

    // --- Timing ---
    /// Poll period while waiting for a vote line (milliseconds)
    pub vote_poll_interval_ms: u32,
    /// Poll period inside enrollment/deletion waits (milliseconds)
    pub serial_poll_interval_ms: u32,
    /// Continuous face presence required to arm a vote (milliseconds)
    pub presence_dwell_ms: u32,
    /// Main loop period (milliseconds)
    pub loop_interval_ms: u32,

    // --- Hardware ---
    /// Fingerprint unit UART baud rate
    pub serial_baud: u32,
    /// Flash LED duty when illumination is on (0-255)
    pub flash_duty: u8,
    /// Task watchdog timeout (seconds)
    pub watchdog_timeout_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Network
            service_url: String::new(),
            wifi_ssid: String::new(),
            wifi_password: String::new(),
            control_port: 88,
            http_timeout_ms: 15_000,
            enqueue_policy: EnqueuePolicy::Block,

            // Session deadlines
            vote_timeout_ms: 120_000,
            enroll_timeout_ms: 30_000,
            delete_timeout_ms: 30_000,

            // Timing
            vote_poll_interval_ms: 100,
            serial_poll_interval_ms: 10,
            presence_dwell_ms: 1_500,
            loop_interval_ms: 20,

            // Hardware
            serial_baud: 115_200,
            flash_duty: 128,
            watchdog_timeout_secs: 60,
        }
    }
}

impl SystemConfig {
    /// Parse a (possibly partial) JSON document; missing fields keep
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|_| ConfigError::Corrupted)
    }

    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.service_url.is_empty()
            && !(self.service_url.starts_with("https://") || self.service_url.starts_with("http://"))
        {
            return Err(ConfigError::ValidationFailed(
                "service_url must be an http(s) URL",
            ));
        }
        if self.wifi_ssid.len() > 32 {
            return Err(ConfigError::ValidationFailed("wifi_ssid must be 0-32 bytes"));
        }
        if !self.wifi_password.is_empty()
            && !(8..=64).contains(&self.wifi_password.len())
        {
            return Err(ConfigError::ValidationFailed(
                "wifi_password must be 8-64 bytes, or empty for open",
            ));
        }
        if self.control_port == 0 {
            return Err(ConfigError::ValidationFailed("control_port must be non-zero"));
        }
        if !(1_000..=60_000).contains(&self.http_timeout_ms) {
            return Err(ConfigError::ValidationFailed(
                "http_timeout_ms must be 1000-60000",
            ));
        }
        if !(5_000..=600_000).contains(&self.vote_timeout_ms) {
            return Err(ConfigError::ValidationFailed(
                "vote_timeout_ms must be 5000-600000",
            ));
        }
        if !(5_000..=300_000).contains(&self.enroll_timeout_ms) {
            return Err(ConfigError::ValidationFailed(
                "enroll_timeout_ms must be 5000-300000",
            ));
        }
        if !(5_000..=300_000).contains(&self.delete_timeout_ms) {
            return Err(ConfigError::ValidationFailed(
                "delete_timeout_ms must be 5000-300000",
            ));
        }
        if !(1..=1_000).contains(&self.vote_poll_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "vote_poll_interval_ms must be 1-1000",
            ));
        }
        if !(1..=1_000).contains(&self.serial_poll_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "serial_poll_interval_ms must be 1-1000",
            ));
        }
        if !(100..=10_000).contains(&self.presence_dwell_ms) {
            return Err(ConfigError::ValidationFailed(
                "presence_dwell_ms must be 100-10000",
            ));
        }
        if !(1..=1_000).contains(&self.loop_interval_ms) {
            return Err(ConfigError::ValidationFailed("loop_interval_ms must be 1-1000"));
        }
        if !matches!(self.serial_baud, 9_600 | 19_200 | 38_400 | 57_600 | 115_200) {
            return Err(ConfigError::ValidationFailed(
                "serial_baud must be a standard rate (9600-115200)",
            ));
        }
        // A blocking logging call must fit inside one watchdog window.
        if self.watchdog_timeout_secs.saturating_mul(1_000) <= self.http_timeout_ms {
            return Err(ConfigError::ValidationFailed(
                "watchdog_timeout_secs must exceed http_timeout_ms",
            ));
        }
        Ok(())
    }
}
