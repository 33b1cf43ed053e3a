//! Mock adapters for integration tests.
//!
//! Every mock shares one simulated millisecond clock, so scripted input
//! (serial bytes, operator commands, viewer activity) can be released at
//! a given point in simulated time.  Sleeping through [`FakeClock`]
//! advances that time instantly.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use votecam::app::commands::ControlCommand;
use votecam::app::events::AppEvent;
use votecam::app::ports::{
    BridgePort, Clock, ControlPort, EventSink, IlluminationPort, PresenceSensor, SerialLink,
    ViewerSignal,
};
use votecam::config::SystemConfig;
use votecam::session::SessionContext;

pub const SERVICE_URL: &str = "https://svc.test/exec";

// ── Simulated time ────────────────────────────────────────────

/// Shared simulated time, in nanoseconds.
#[derive(Clone, Default)]
pub struct SimTime(Rc<Cell<u64>>);

impl SimTime {
    pub fn now_ms(&self) -> u64 {
        self.0.get() / 1_000_000
    }

    pub fn advance_ns(&self, ns: u64) {
        self.0.set(self.0.get() + ns);
    }
}

pub struct FakeClock {
    time: SimTime,
}

impl DelayNs for FakeClock {
    fn delay_ns(&mut self, ns: u32) {
        self.time.advance_ns(u64::from(ns));
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u64 {
        self.time.now_ms()
    }
}

// ── Serial ────────────────────────────────────────────────────

/// Fingerprint unit stand-in: bytes become readable once simulated time
/// reaches their release point.
pub struct MockSerial {
    time: SimTime,
    script: VecDeque<(u64, VecDeque<u8>)>,
    pub written: Vec<String>,
}

#[allow(dead_code)]
impl MockSerial {
    /// Queue raw bytes for release at `at_ms`.  Entries must be queued in
    /// release order.
    pub fn send_at(&mut self, at_ms: u64, bytes: &[u8]) {
        self.script.push_back((at_ms, bytes.iter().copied().collect()));
    }

    /// Queue one newline-terminated line for release at `at_ms`.
    pub fn line_at(&mut self, at_ms: u64, line: &str) {
        self.send_at(at_ms, format!("{line}\n").as_bytes());
    }
}

impl SerialLink for MockSerial {
    fn read_byte(&mut self) -> Option<u8> {
        let now = self.time.now_ms();
        loop {
            let (at, bytes) = self.script.front_mut()?;
            if *at > now {
                return None;
            }
            if let Some(b) = bytes.pop_front() {
                return Some(b);
            }
            self.script.pop_front();
        }
    }

    fn write_line(&mut self, line: &str) {
        self.written.push(line.to_owned());
    }
}

// ── Control channel ───────────────────────────────────────────

pub struct MockControl {
    time: SimTime,
    inbound: VecDeque<(u64, ControlCommand)>,
    pub sent: Vec<String>,
}

#[allow(dead_code)]
impl MockControl {
    /// Queue a raw operator message for release at `at_ms`.  Unknown
    /// text is dropped here, as the dispatcher would.
    pub fn command_at(&mut self, at_ms: u64, text: &str) {
        if let Some(cmd) = ControlCommand::decode(text) {
            self.inbound.push_back((at_ms, cmd));
        }
    }

    pub fn was_sent(&self, text: &str) -> bool {
        self.sent.iter().any(|m| m == text)
    }
}

impl ControlPort for MockControl {
    fn poll_command(&mut self) -> Option<ControlCommand> {
        let now = self.time.now_ms();
        match self.inbound.front() {
            Some((at, _)) if *at <= now => self.inbound.pop_front().map(|(_, cmd)| cmd),
            _ => None,
        }
    }

    fn send(&mut self, text: &str) {
        self.sent.push(text.to_owned());
    }
}

// ── Logging service ───────────────────────────────────────────

/// Records every submitted URL and answers from a scripted list.  An
/// exhausted script answers with an error string.
#[derive(Default)]
pub struct StubBridge {
    pub urls: RefCell<Vec<String>>,
    responses: RefCell<VecDeque<String>>,
}

#[allow(dead_code)]
impl StubBridge {
    pub fn respond(&self, text: &str) {
        self.responses.borrow_mut().push_back(text.to_owned());
    }

    pub fn calls(&self) -> usize {
        self.urls.borrow().len()
    }

    pub fn url(&self, i: usize) -> String {
        self.urls.borrow()[i].clone()
    }
}

impl BridgePort for StubBridge {
    fn submit(&self, url: &str) -> String {
        self.urls.borrow_mut().push(url.to_owned());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| "HTTP Error: connection failed (-1)".to_owned())
    }
}

// ── Illumination / signals ────────────────────────────────────

#[derive(Default)]
pub struct MockLight {
    pub history: Vec<bool>,
}

impl IlluminationPort for MockLight {
    fn set_illumination(&mut self, on: bool) {
        self.history.push(on);
    }
}

pub struct MockViewer {
    time: SimTime,
    /// Viewer connects at this time, if ever.
    pub active_from: Option<u64>,
}

impl ViewerSignal for MockViewer {
    fn is_active(&self) -> bool {
        self.active_from.is_some_and(|t| self.time.now_ms() >= t)
    }
}

#[derive(Default)]
pub struct MockPresence {
    pub present: bool,
}

impl PresenceSensor for MockPresence {
    fn face_present(&mut self) -> bool {
        self.present
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Harness ───────────────────────────────────────────────────

pub type TestCtx =
    SessionContext<MockSerial, MockControl, StubBridge, MockLight, FakeClock, MockViewer>;

pub fn test_config() -> SystemConfig {
    SystemConfig {
        service_url: SERVICE_URL.into(),
        ..SystemConfig::default()
    }
}

/// A session context wired to fresh mocks, plus the shared time handle.
pub fn make_ctx() -> (TestCtx, SimTime) {
    make_ctx_with(&test_config())
}

pub fn make_ctx_with(config: &SystemConfig) -> (TestCtx, SimTime) {
    let time = SimTime::default();
    let serial = MockSerial {
        time: time.clone(),
        script: VecDeque::new(),
        written: Vec::new(),
    };
    let control = MockControl {
        time: time.clone(),
        inbound: VecDeque::new(),
        sent: Vec::new(),
    };
    let viewer = MockViewer {
        time: time.clone(),
        active_from: None,
    };
    let clock = FakeClock { time: time.clone() };
    let ctx = SessionContext::new(
        serial,
        control,
        StubBridge::default(),
        MockLight::default(),
        clock,
        viewer,
        config,
    );
    (ctx, time)
}
