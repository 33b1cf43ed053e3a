//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ StationService / session machines
//! ```
//!
//! Driven adapters (UART, control channel, request bridge, flash LED,
//! clock, event sinks, storage) implement these traits.  The
//! [`StationService`](super::service::StationService) and the protocol
//! state machines in [`crate::session`] consume them via generics, so the
//! domain core never touches hardware directly.

use embedded_hal::delay::DelayNs;

use crate::config::SystemConfig;

use super::commands::ControlCommand;

// ───────────────────────────────────────────────────────────────
// Serial port (driven adapter: fingerprint unit ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Line-oriented serial link to the fingerprint reader/verifier.
pub trait SerialLink {
    /// Take one received byte, if any.  Never blocks.
    fn read_byte(&mut self) -> Option<u8>;

    /// Write `line` followed by a newline terminator.
    fn write_line(&mut self, line: &str);
}

// ───────────────────────────────────────────────────────────────
// Control port (driven adapter: operator console ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Operator control channel as seen by the domain.
pub trait ControlPort {
    /// Service the channel (accept, read) and return the next decoded
    /// command, if one is pending.  Never blocks.
    fn poll_command(&mut self) -> Option<ControlCommand>;

    /// Best-effort status message.  Silently dropped when no client is
    /// connected.
    fn send(&mut self, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Bridge port (driven adapter: domain → logging service)
// ───────────────────────────────────────────────────────────────

/// Synchronous view of the remote logging service.
///
/// Implementations block until the response (or a descriptive error
/// string) is available.  Failure is an outcome, never a fault.
pub trait BridgePort {
    fn submit(&self, url: &str) -> String;
}

// ───────────────────────────────────────────────────────────────
// Illumination port (driven adapter: domain → flash LED)
// ───────────────────────────────────────────────────────────────

pub trait IlluminationPort {
    fn set_illumination(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Signal ports (external collaborators → domain)
// ───────────────────────────────────────────────────────────────

/// Whether a live stream viewer currently holds the camera.
pub trait ViewerSignal {
    fn is_active(&self) -> bool;
}

/// Raw (undebounced) face-detector output.
pub trait PresenceSensor {
    fn face_present(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.  Sleeping goes through
/// [`DelayNs`] so the same adapter serves embedded-hal drivers.
pub trait Clock: DelayNs {
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Implementations MUST validate config values before persisting
/// (see [`SystemConfig::validate`]).
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`ConfigError::NotFound`] if no stored config exists.
    fn load(&self) -> Result<SystemConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed integrity / deserialization check.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
