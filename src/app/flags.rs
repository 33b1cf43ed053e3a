//! Session request flags.
//!
//! The control dispatcher arms a slot; the matching state machine takes
//! the payload, runs, and finishes the slot.  A slot that is armed or in
//! flight refuses to be re-armed, so one payload is never consumed twice
//! and never silently overwritten.
//!
//! ```text
//!   Idle ──arm(p)──▶ Armed(p) ──take()──▶ InFlight ──finish()──▶ Idle
//! ```

use log::warn;

/// One request slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlagSlot<T> {
    #[default]
    Idle,
    Armed(T),
    InFlight,
}

impl<T> FlagSlot<T> {
    /// Arm the slot.  Returns `false` (and keeps the old state) unless idle.
    pub fn arm(&mut self, payload: T) -> bool {
        if matches!(self, Self::Idle) {
            *self = Self::Armed(payload);
            true
        } else {
            false
        }
    }

    /// Claim the armed payload, moving the slot in flight.
    pub fn take(&mut self) -> Option<T> {
        match core::mem::replace(self, Self::InFlight) {
            Self::Armed(payload) => Some(payload),
            other => {
                *self = other;
                None
            }
        }
    }

    /// Release the slot after the consuming machine returned.
    pub fn finish(&mut self) {
        if !matches!(self, Self::InFlight) {
            warn!("flags: finish() on a slot that was not in flight");
        }
        *self = Self::Idle;
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, Self::Armed(_))
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// All pending operator requests, owned by the session context.
#[derive(Debug, Default)]
pub struct SessionFlags {
    pub enroll_fingerprint: FlagSlot<()>,
    pub enroll_profile: FlagSlot<String>,
    pub delete_fingerprint: FlagSlot<String>,
    pub delete_profile: FlagSlot<String>,
}

impl SessionFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if any slot is waiting for its machine.
    pub fn any_armed(&self) -> bool {
        self.enroll_fingerprint.is_armed()
            || self.enroll_profile.is_armed()
            || self.delete_fingerprint.is_armed()
            || self.delete_profile.is_armed()
    }
}
