//! Vote state machine.
//!
//! ```text
//!  Idle ──presence dwell──▶ Armed ──"VOTE"──▶ AwaitingInput
//!                                               │
//!            ┌──────────────┬──────────────┬────┴─────────┐
//!      VOTE,<id>,…     VOTING FAILED    viewer active   deadline
//!            │              │              │              │
//!       bridge call    ExternallyAborted Interrupted    TimedOut
//!            │
//!   Recorded / Duplicate / Unregistered / NetworkFailure
//! ```
//!
//! A ballot line has four comma-delimited fields after the literal
//! `VOTE` prefix.  Lines with fewer fields are ignored and the wait
//! continues.  A vote reaches the service at most once per session.

use log::{info, warn};

use crate::app::ports::{BridgePort, Clock, ControlPort, IlluminationPort, SerialLink, ViewerSignal};
use crate::bridge::url::Action;
use crate::serial::{
    CMD_VOTE, REPLY_DOUBLE_VOTE, REPLY_POOR_NETWORK, REPLY_UNREGISTERED, REPLY_VOTED,
};

use super::SessionContext;

/// Sentinel line: the fingerprint unit gave up on this voter.
pub const VOTING_FAILED: &str = "VOTING FAILED";

/// Control-channel message for an expired vote session.
pub const MSG_VOTE_TIMEOUT: &str = "Voting session timed out";

/// Terminal outcome of one vote session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// Service answered "Vote logged".
    Recorded,
    /// Service answered "Previously voted".
    Duplicate,
    /// Service answered "Unregistered ID".
    Unregistered,
    /// Any other response, including bridge errors.
    NetworkFailure,
    /// The unit reported `VOTING FAILED`.
    ExternallyAborted,
    /// No ballot line before the deadline.
    TimedOut,
    /// A stream viewer took the camera.
    Interrupted,
}

impl VoteOutcome {
    /// Classify a logging-service response.
    pub fn from_response(response: &str) -> Self {
        match response.trim() {
            "Vote logged" => Self::Recorded,
            "Previously voted" => Self::Duplicate,
            "Unregistered ID" => Self::Unregistered,
            _ => Self::NetworkFailure,
        }
    }

    /// Line forwarded to the fingerprint unit, for outcomes that
    /// involved the service.
    pub fn serial_reply(self) -> Option<&'static str> {
        match self {
            Self::Recorded => Some(REPLY_VOTED),
            Self::Duplicate => Some(REPLY_DOUBLE_VOTE),
            Self::Unregistered => Some(REPLY_UNREGISTERED),
            Self::NetworkFailure => Some(REPLY_POOR_NETWORK),
            Self::ExternallyAborted | Self::TimedOut | Self::Interrupted => None,
        }
    }
}

/// A parsed `VOTE,<id>,<pres>,<gub>,<sen>` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ballot<'a> {
    pub voter_id: &'a str,
    pub pres: &'a str,
    pub gub: &'a str,
    pub sen: &'a str,
}

impl<'a> Ballot<'a> {
    /// Parse a ballot line.  The last field takes the remainder of the
    /// line, commas included.
    pub fn parse(line: &'a str) -> Option<Self> {
        let rest = line.strip_prefix("VOTE,")?;
        let mut fields = rest.splitn(4, ',');
        let voter_id = fields.next()?;
        let pres = fields.next()?;
        let gub = fields.next()?;
        let sen = fields.next()?;
        Some(Self {
            voter_id,
            pres,
            gub,
            sen,
        })
    }
}

impl<S, C, B, L, K, V> SessionContext<S, C, B, L, K, V>
where
    S: SerialLink,
    C: ControlPort,
    B: BridgePort,
    L: IlluminationPort,
    K: Clock,
    V: ViewerSignal,
{
    /// Run one armed vote session to its terminal outcome.
    pub fn run_vote(&mut self) -> VoteOutcome {
        self.begin_exchange(CMD_VOTE);
        let deadline = self.deadline(self.timing.vote_timeout_ms);
        info!("vote: awaiting ballot");

        let outcome = loop {
            if self.viewer.is_active() {
                break VoteOutcome::Interrupted;
            }
            if self.expired(deadline) {
                break VoteOutcome::TimedOut;
            }

            self.service_control();

            if let Some(outcome) = self.drain_vote_lines() {
                break outcome;
            }

            self.sleep_ms(self.timing.vote_poll_ms);
        };

        match outcome {
            VoteOutcome::TimedOut => {
                warn!("vote: no ballot before deadline");
                self.notify(MSG_VOTE_TIMEOUT);
            }
            VoteOutcome::Interrupted => info!("vote: interrupted by stream viewer"),
            other => info!("vote: finished {:?}", other),
        }
        outcome
    }

    /// Consume every buffered line; returns once a terminal line is seen.
    fn drain_vote_lines(&mut self) -> Option<VoteOutcome> {
        while let Some(line) = self.serial.poll_line() {
            if line.as_str() == VOTING_FAILED {
                return Some(VoteOutcome::ExternallyAborted);
            }
            let Some(ballot) = Ballot::parse(&line) else {
                if line.starts_with("VOTE,") {
                    warn!("vote: incomplete ballot line ignored");
                }
                continue;
            };

            let url = self
                .service_request(Action::Vote)
                .param("id", ballot.voter_id)
                .param("pres", ballot.pres)
                .param("gub", ballot.gub)
                .param("sen", ballot.sen)
                .build();
            let outcome = VoteOutcome::from_response(&self.call_service(&url));
            if let Some(reply) = outcome.serial_reply() {
                self.serial.write_line(reply);
            }
            return Some(outcome);
        }
        None
    }
}
