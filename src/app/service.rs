//! Station service, the hexagonal core.
//!
//! [`StationService`] decides, once per main-loop iteration, which
//! protocol machine (if any) runs next.  All I/O flows through the
//! [`SessionContext`] ports and the presence/event ports passed at the
//! call site, so the whole service is testable with mock adapters.
//!
//! ```text
//!  PresenceSensor ──▶ ┌───────────────────────────┐ ──▶ EventSink
//!                     │      StationService        │
//!  SessionContext ◀──▶│  debounce · flags · pick   │
//!                     └───────────────────────────┘
//! ```
//!
//! Per step, at most one machine runs, in this priority order:
//! vote, enroll fingerprint, enroll profile, delete fingerprint,
//! delete profile.

use log::{debug, info};

use crate::config::SystemConfig;
use crate::session::SessionContext;
use crate::session::profile::ProfileAction;

use super::events::AppEvent;
use super::ports::{
    BridgePort, Clock, ControlPort, EventSink, IlluminationPort, PresenceSensor, SerialLink,
    ViewerSignal,
};
use super::presence::PresenceDebouncer;

pub struct StationService {
    presence: PresenceDebouncer,
    /// Presence fired and the vote machine has not run yet.
    vote_armed: bool,
    steps: u64,
}

impl StationService {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            presence: PresenceDebouncer::new(config.presence_dwell_ms),
            vote_armed: false,
            steps: 0,
        }
    }

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!("StationService started");
    }

    pub fn vote_armed(&self) -> bool {
        self.vote_armed
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// One main-loop iteration.  Returns the terminal event of the
    /// machine that ran, if one did.
    pub fn step<S, C, B, L, K, V>(
        &mut self,
        ctx: &mut SessionContext<S, C, B, L, K, V>,
        presence: &mut impl PresenceSensor,
        sink: &mut impl EventSink,
    ) -> Option<AppEvent>
    where
        S: SerialLink,
        C: ControlPort,
        B: BridgePort,
        L: IlluminationPort,
        K: Clock,
        V: ViewerSignal,
    {
        self.steps += 1;

        // 1. Operator commands
        ctx.service_control();
        Self::forward(ctx, sink);

        // 2. Presence trigger
        let now = ctx.now_ms();
        if self.presence.observe(presence.face_present(), now) {
            if ctx.viewer.is_active() {
                debug!("service: presence ignored while stream is viewed");
            } else {
                info!("service: voter present, arming vote");
                self.vote_armed = true;
            }
        }

        // 3. At most one machine
        let event = self.run_next(ctx);

        // 4. Commands serviced inside the machine's waits
        Self::forward(ctx, sink);
        if let Some(ev) = &event {
            sink.emit(ev);
        }
        event
    }

    fn run_next<S, C, B, L, K, V>(
        &mut self,
        ctx: &mut SessionContext<S, C, B, L, K, V>,
    ) -> Option<AppEvent>
    where
        S: SerialLink,
        C: ControlPort,
        B: BridgePort,
        L: IlluminationPort,
        K: Clock,
        V: ViewerSignal,
    {
        if self.vote_armed {
            self.vote_armed = false;
            return Some(AppEvent::VoteFinished(ctx.run_vote()));
        }

        if ctx.flags.enroll_fingerprint.take().is_some() {
            let outcome = ctx.run_enroll_fingerprint();
            ctx.flags.enroll_fingerprint.finish();
            return Some(AppEvent::FingerprintEnrollFinished(outcome));
        }

        if let Some(payload) = ctx.flags.enroll_profile.take() {
            let outcome = ctx.run_profile(ProfileAction::Enroll, &payload);
            ctx.flags.enroll_profile.finish();
            return Some(AppEvent::ProfileFinished {
                action: ProfileAction::Enroll,
                outcome,
            });
        }

        if let Some(id) = ctx.flags.delete_fingerprint.take() {
            let outcome = ctx.run_delete_fingerprint(&id);
            ctx.flags.delete_fingerprint.finish();
            return Some(AppEvent::FingerprintDeleteFinished { id, outcome });
        }

        if let Some(payload) = ctx.flags.delete_profile.take() {
            let outcome = ctx.run_profile(ProfileAction::Delete, &payload);
            ctx.flags.delete_profile.finish();
            return Some(AppEvent::ProfileFinished {
                action: ProfileAction::Delete,
                outcome,
            });
        }

        None
    }

    fn forward<S, C, B, L, K, V>(
        ctx: &mut SessionContext<S, C, B, L, K, V>,
        sink: &mut impl EventSink,
    ) where
        S: SerialLink,
        C: ControlPort,
        B: BridgePort,
        L: IlluminationPort,
        K: Clock,
        V: ViewerSignal,
    {
        for ev in ctx.drain_events() {
            sink.emit(&ev);
        }
    }
}
