//! VoteCam firmware library.
//!
//! Exposes the request bridge, serial line protocol, control dispatcher
//! and protocol state machines for integration testing. All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod bridge;
pub mod config;
pub mod control;
pub mod error;
pub mod pins;
pub mod serial;
pub mod session;

pub mod adapters;
pub mod drivers;
