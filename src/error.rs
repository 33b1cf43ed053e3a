//! Adapter error types for the VoteCam firmware.
//!
//! All variants are `Copy` so they pass through adapters without
//! allocation.  `main` lifts them into `anyhow` at boot.
//!
//! Protocol sessions never produce these: a failed vote or enrollment is
//! an outcome, not an error.

use core::fmt;

// ---------------------------------------------------------------------------
// HTTP errors
// ---------------------------------------------------------------------------

/// Transport-level failure of one GET.  The request bridge renders these
/// into the response string; callers never see them as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpError {
    /// Connection could not be opened or the request not sent.
    Connect(i32),
    /// The call exceeded its time bound.
    Timeout,
    /// Reading the response body failed.
    Read,
    /// The response body did not fit the receive buffer.
    TooLarge,
    /// The response body was not UTF-8 text.
    NotText,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect(rc) => write!(f, "connection failed ({rc})"),
            Self::Timeout => write!(f, "timed out"),
            Self::Read => write!(f, "read failed"),
            Self::TooLarge => write!(f, "response too large"),
            Self::NotText => write!(f, "response not text"),
        }
    }
}

impl std::error::Error for HttpError {}

// ---------------------------------------------------------------------------
// Control channel errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    /// Listener socket could not be bound.
    Bind(u16),
    /// The peer closed or reset the connection.
    Disconnected,
    /// A write to the client failed.
    WriteFailed,
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind(port) => write!(f, "bind to port {port} failed"),
            Self::Disconnected => write!(f, "client disconnected"),
            Self::WriteFailed => write!(f, "client write failed"),
        }
    }
}

impl std::error::Error for ControlError {}
