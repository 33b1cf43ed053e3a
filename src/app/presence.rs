//! Presence debouncer.  Turns raw face-detector samples into a single
//! vote trigger per continuous presence interval.
//!
//! ```text
//!  present ──────┐████████████████████████┌──── absent
//!                │◀── dwell ──▶│          │
//!                start         fire once  reset
//! ```

/// Debounce state for the vote trigger.
#[derive(Debug, Clone)]
pub struct PresenceDebouncer {
    dwell_ms: u64,
    /// Timestamp of the first sample in the current presence interval.
    started_at: Option<u64>,
    /// Whether this interval already fired.
    triggered: bool,
}

impl PresenceDebouncer {
    pub fn new(dwell_ms: u32) -> Self {
        Self {
            dwell_ms: u64::from(dwell_ms),
            started_at: None,
            triggered: false,
        }
    }

    /// Feed one detector sample.  Returns `true` exactly once per
    /// continuous presence interval, as soon as it reaches the dwell time.
    pub fn observe(&mut self, present: bool, now_ms: u64) -> bool {
        if !present {
            self.started_at = None;
            self.triggered = false;
            return false;
        }

        let start = *self.started_at.get_or_insert(now_ms);
        if !self.triggered && now_ms.saturating_sub(start) >= self.dwell_ms {
            self.triggered = true;
            return true;
        }
        false
    }

    /// `true` while a presence interval is being timed or has fired.
    pub fn is_tracking(&self) -> bool {
        self.started_at.is_some()
    }
}
