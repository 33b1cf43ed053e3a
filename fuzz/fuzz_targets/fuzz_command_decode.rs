//! Fuzz target: `ControlCommand::decode`
//!
//! Any UTF-8 text from the control channel must decode to a command or
//! to nothing, never panic.
//!
//! cargo fuzz run fuzz_command_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use votecam::app::commands::ControlCommand;
use votecam::session::profile::Profile;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    match ControlCommand::decode(text) {
        Some(ControlCommand::EnrollProfile(payload) | ControlCommand::DeleteProfile(payload)) => {
            let _ = Profile::parse(&payload);
        }
        Some(cmd) => assert!(text.starts_with(cmd.keyword())),
        None => {}
    }
});
