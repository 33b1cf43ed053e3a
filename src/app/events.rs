//! Outbound application events.
//!
//! The [`StationService`](super::service::StationService) emits these
//! through the [`EventSink`](super::ports::EventSink) port after every
//! protocol session.  Adapters on the other side decide what to do with
//! them (log to serial, forward over the network).

use crate::session::delete::DeleteOutcome;
use crate::session::enroll::EnrollOutcome;
use crate::session::profile::{ProfileAction, ProfileOutcome};
use crate::session::vote::VoteOutcome;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The station service has started.
    Started,

    /// A vote session reached its terminal outcome.
    VoteFinished(VoteOutcome),

    /// A fingerprint enrollment session finished.
    FingerprintEnrollFinished(EnrollOutcome),

    /// A profile enrollment or deletion finished.
    ProfileFinished {
        action: ProfileAction,
        outcome: ProfileOutcome,
    },

    /// A fingerprint deletion session finished.
    FingerprintDeleteFinished { id: String, outcome: DeleteOutcome },

    /// Flash illumination was switched by the operator.
    IlluminationChanged(bool),

    /// A command was refused because the same request is still pending.
    CommandRejected(&'static str),
}
