//! Fuzz target: `LineAssembler::feed_slice`
//!
//! Drives arbitrary byte sequences into the serial line assembler and
//! asserts that every yielded line is bounded, trimmed and non-empty,
//! and that a reset leaves nothing buffered.
//!
//! cargo fuzz run fuzz_line_assembler

#![no_main]

use libfuzzer_sys::fuzz_target;
use votecam::serial::line::{LineAssembler, SERIAL_LINE_MAX};

fuzz_target!(|data: &[u8]| {
    let mut asm = LineAssembler::<SERIAL_LINE_MAX>::new();

    asm.feed_slice(data, |line| {
        assert!(line.len() <= SERIAL_LINE_MAX, "line exceeds bound");
        assert!(!line.is_empty(), "blank line yielded");
        assert_eq!(line.trim(), line.as_str(), "line not trimmed");
    });
    assert!(asm.pending() <= SERIAL_LINE_MAX);

    asm.reset();
    assert_eq!(asm.pending(), 0);
    asm.feed_slice(data, |_| {});
});
