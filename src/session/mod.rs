//! Blocking protocol state machines.
//!
//! Each machine drives one logical interaction with the fingerprint
//! unit and/or the logging service to exactly one terminal outcome.
//! Machines share a [`SessionContext`] holding the I/O ports and the
//! operator request flags; only one machine runs at a time.
//!
//! | Machine            | Trigger            | Deadline      | Bridge calls |
//! |--------------------|--------------------|---------------|--------------|
//! | vote               | presence dwell     | 120 s         | 0-1          |
//! | enroll fingerprint | `ENROL_FINGER`     | 30 s          | 0            |
//! | enroll profile     | `ENROL_PROFILE`    | bridge only   | 0-1          |
//! | delete profile     | `DELETE_PROFILE`   | bridge only   | 0-1          |
//! | delete fingerprint | `DELETE_FINGER`    | 30 s          | 0-1          |

pub mod context;
pub mod delete;
pub mod enroll;
pub mod profile;
pub mod vote;

pub use context::{SessionContext, SessionTiming};
