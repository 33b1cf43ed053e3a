//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::session::delete::DeleteOutcome;
use crate::session::enroll::EnrollOutcome;
use crate::session::vote::VoteOutcome;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("START | station ready"),
            AppEvent::VoteFinished(outcome) => match outcome {
                VoteOutcome::NetworkFailure | VoteOutcome::TimedOut => {
                    warn!("VOTE  | outcome={:?}", outcome);
                }
                _ => info!("VOTE  | outcome={:?}", outcome),
            },
            AppEvent::FingerprintEnrollFinished(outcome) => match outcome {
                EnrollOutcome::Enrolled(id) => info!("ENROL | fingerprint id={}", id),
                other => warn!("ENROL | fingerprint outcome={:?}", other),
            },
            AppEvent::ProfileFinished { action, outcome } => {
                info!("PROF  | action={:?} outcome={:?}", action, outcome);
            }
            AppEvent::FingerprintDeleteFinished { id, outcome } => match outcome {
                DeleteOutcome::Deleted { display_name } => info!(
                    "DEL   | fingerprint id={} name={}",
                    id,
                    display_name.as_deref().unwrap_or("?")
                ),
                other => warn!("DEL   | fingerprint id={} outcome={:?}", id, other),
            },
            AppEvent::IlluminationChanged(on) => {
                info!("LIGHT | {}", if *on { "on" } else { "off" });
            }
            AppEvent::CommandRejected(keyword) => warn!("BUSY  | {} already pending", keyword),
        }
    }
}
