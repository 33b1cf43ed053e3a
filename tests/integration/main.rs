//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below exercises one protocol session (or the station loop
//! as a whole) against the mock adapters in `mock_hw`.  Simulated time
//! makes multi-second deadlines run instantly on the host.

mod handoff_tests;
mod mock_hw;
mod profile_tests;
mod service_tests;
mod vote_tests;
