//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the orchestration rules for the VoteCam station:
//! command decoding, request flags, presence debouncing, and the choice
//! of which protocol machine runs next.  All interaction with hardware
//! happens through **port traits** defined in [`ports`], keeping this
//! layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod flags;
pub mod ports;
pub mod presence;
pub mod service;
