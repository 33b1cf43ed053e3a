//! Bounded line assembler.
//!
//! Accumulates bytes from a serial (or any byte-oriented) link and
//! yields complete, trimmed lines.  Handles partial reads gracefully; a
//! line may arrive one byte at a time or several lines per read.
//!
//! Splitting policy:
//! - `\n` and `\r` both terminate a line; `\r\n` counts as one terminator.
//! - Lines are trimmed of surrounding whitespace; blank lines are dropped.
//! - A line longer than `N` bytes is discarded in full: everything up to
//!   the next terminator is dropped, so the tail of an overlong line is
//!   never mistaken for a fresh line.
//! - Lines that are not valid UTF-8 are dropped.

use heapless::{String, Vec};
use log::debug;

/// Line bound for the fingerprint unit's serial protocol.
pub const SERIAL_LINE_MAX: usize = 100;

/// Assembler state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssemblerState {
    /// Appending bytes to the current line.
    Collecting,
    /// Current line overflowed; dropping bytes until the next terminator.
    Discarding,
}

/// Streaming line assembler with a fixed `N`-byte bound.
pub struct LineAssembler<const N: usize> {
    state: AssemblerState,
    buf: Vec<u8, N>,
    /// Previous byte was `\r` (a following `\n` is part of the same terminator).
    after_cr: bool,
}

impl<const N: usize> Default for LineAssembler<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineAssembler<N> {
    pub fn new() -> Self {
        Self {
            state: AssemblerState::Collecting,
            buf: Vec::new(),
            after_cr: false,
        }
    }

    /// Feed one byte.  Returns `Some(line)` when a terminator completes a
    /// non-blank line.
    pub fn feed(&mut self, byte: u8) -> Option<String<N>> {
        if byte == b'\n' && self.after_cr {
            self.after_cr = false;
            return None;
        }
        self.after_cr = byte == b'\r';

        if byte == b'\n' || byte == b'\r' {
            return self.complete();
        }

        if self.state == AssemblerState::Discarding {
            return None;
        }

        if self.buf.push(byte).is_err() {
            debug!("line: dropped unterminated line over {} bytes", N);
            self.buf.clear();
            self.state = AssemblerState::Discarding;
        }
        None
    }

    /// Feed a chunk of bytes, invoking `on_line` for every completed line.
    pub fn feed_slice(&mut self, data: &[u8], mut on_line: impl FnMut(String<N>)) {
        for &byte in data {
            if let Some(line) = self.feed(byte) {
                on_line(line);
            }
        }
    }

    /// Number of bytes buffered for the current (incomplete) line.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Drop any partial line (e.g. after a link reset).
    pub fn reset(&mut self) {
        self.buf.clear();
        self.state = AssemblerState::Collecting;
        self.after_cr = false;
    }

    fn complete(&mut self) -> Option<String<N>> {
        if self.state == AssemblerState::Discarding {
            self.state = AssemblerState::Collecting;
            self.buf.clear();
            return None;
        }

        let line = core::str::from_utf8(&self.buf)
            .ok()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .and_then(|l| String::try_from(l).ok());
        if line.is_none() && !self.buf.is_empty() {
            debug!("line: dropped blank or non-UTF-8 line");
        }
        self.buf.clear();
        line
    }
}
