//! Shared session context.
//!
//! Owns every port a protocol machine touches plus the operator request
//! flags.  Long waits call [`SessionContext::service_control`] on each
//! poll so illumination toggles and new requests are never starved.

use log::{info, warn};

use crate::app::commands::ControlCommand;
use crate::app::events::AppEvent;
use crate::app::flags::SessionFlags;
use crate::app::ports::{BridgePort, Clock, ControlPort, IlluminationPort, SerialLink, ViewerSignal};
use crate::bridge::url::ServiceRequest;
use crate::config::SystemConfig;
use crate::serial::LineReader;

/// Deadlines and poll periods, copied out of [`SystemConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTiming {
    pub vote_timeout_ms: u32,
    pub enroll_timeout_ms: u32,
    pub delete_timeout_ms: u32,
    pub vote_poll_ms: u32,
    pub serial_poll_ms: u32,
}

impl SessionTiming {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            vote_timeout_ms: config.vote_timeout_ms,
            enroll_timeout_ms: config.enroll_timeout_ms,
            delete_timeout_ms: config.delete_timeout_ms,
            vote_poll_ms: config.vote_poll_interval_ms,
            serial_poll_ms: config.serial_poll_interval_ms,
        }
    }
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self::from_config(&SystemConfig::default())
    }
}

/// Ports and state shared by all protocol machines.
pub struct SessionContext<S, C, B, L, K, V> {
    pub serial: LineReader<S>,
    pub control: C,
    pub bridge: B,
    pub light: L,
    pub clock: K,
    pub viewer: V,
    pub flags: SessionFlags,
    pub timing: SessionTiming,
    service_url: String,
    /// Events raised while dispatching commands, drained by the service.
    events: Vec<AppEvent>,
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
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        serial: S,
        control: C,
        bridge: B,
        light: L,
        clock: K,
        viewer: V,
        config: &SystemConfig,
    ) -> Self {
        Self {
            serial: LineReader::new(serial),
            control,
            bridge,
            light,
            clock,
            viewer,
            flags: SessionFlags::new(),
            timing: SessionTiming::from_config(config),
            service_url: config.service_url.clone(),
            events: Vec::new(),
        }
    }

    // ── Control channel ──────────────────────────────────────

    /// Drain and apply every pending operator command.
    pub fn service_control(&mut self) {
        while let Some(cmd) = self.control.poll_command() {
            self.apply(cmd);
        }
    }

    /// Apply one decoded command: illumination immediately, everything
    /// else by arming its request slot.
    pub fn apply(&mut self, cmd: ControlCommand) {
        let keyword = cmd.keyword();
        let armed = match cmd {
            ControlCommand::Illumination(on) => {
                self.light.set_illumination(on);
                self.events.push(AppEvent::IlluminationChanged(on));
                return;
            }
            ControlCommand::EnrollFingerprint => self.flags.enroll_fingerprint.arm(()),
            ControlCommand::EnrollProfile(payload) => self.flags.enroll_profile.arm(payload),
            ControlCommand::DeleteFingerprint(id) => {
                if id.trim().is_empty() {
                    warn!("session: DELETE_FINGER without id ignored");
                    return;
                }
                self.flags.delete_fingerprint.arm(id.trim().to_owned())
            }
            ControlCommand::DeleteProfile(payload) => self.flags.delete_profile.arm(payload),
        };

        if armed {
            info!("session: {keyword} queued");
        } else {
            warn!("session: {keyword} rejected, previous request pending");
            self.notify(&format!("Busy: {keyword} already pending"));
            self.events.push(AppEvent::CommandRejected(keyword));
        }
    }

    /// Best-effort status message to the operator.
    pub fn notify(&mut self, text: &str) {
        self.control.send(text);
    }

    /// Take the events raised since the last call.
    pub fn drain_events(&mut self) -> Vec<AppEvent> {
        core::mem::take(&mut self.events)
    }

    // ── Serial ───────────────────────────────────────────────

    /// Open a serial exchange: forget anything left from an earlier
    /// session, then send `trigger`.  Only replies to this trigger count.
    pub fn begin_exchange(&mut self, trigger: &str) {
        let dropped = self.serial.resync();
        if dropped > 0 {
            warn!("session: discarded {dropped} stale serial bytes before {trigger:?}");
        }
        self.serial.write_line(trigger);
    }

    // ── Logging service ──────────────────────────────────────

    /// Start a request against the configured service URL.
    pub fn service_request(&self, action: crate::bridge::url::Action) -> ServiceRequest<'_> {
        ServiceRequest::new(&self.service_url, action)
    }

    /// Submit a built URL and block for the (trimmed) response text.
    pub fn call_service(&self, url: &str) -> String {
        self.bridge.submit(url).trim().to_owned()
    }

    // ── Time ─────────────────────────────────────────────────

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Absolute deadline `after_ms` from now.
    pub fn deadline(&self, after_ms: u32) -> u64 {
        self.clock.now_ms() + u64::from(after_ms)
    }

    pub fn expired(&self, deadline: u64) -> bool {
        self.clock.now_ms() >= deadline
    }

    pub fn sleep_ms(&mut self, ms: u32) {
        self.clock.delay_ms(ms);
    }
}
