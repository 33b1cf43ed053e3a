//! Serial line protocol to the fingerprint reader/verifier.
//!
//! ```text
//!  SerialLink (bytes) ──▶ LineAssembler<100> ──▶ LineReader::poll_line()
//! ```
//!
//! Vocabulary sent by the station (fixed):
//!
//! | Line              | Meaning                                   |
//! |-------------------|-------------------------------------------|
//! | `VOTE`            | a voter is present, start a vote          |
//! | `ENROL`           | enroll a new fingerprint                  |
//! | `DELETE ID: <id>` | delete the stored fingerprint `<id>`      |
//! | `VOTED`           | vote logged                               |
//! | `DOUBLE VOTE`     | voter already voted                       |
//! | `UNREGISTERED`    | voter id unknown to the service           |
//! | `POOR NETWORK`    | logging call failed                       |

pub mod line;

use heapless::String;

use crate::app::ports::SerialLink;
use line::{LineAssembler, SERIAL_LINE_MAX};

pub const CMD_VOTE: &str = "VOTE";
pub const CMD_ENROL: &str = "ENROL";
pub const CMD_DELETE_PREFIX: &str = "DELETE ID: ";

pub const REPLY_VOTED: &str = "VOTED";
pub const REPLY_DOUBLE_VOTE: &str = "DOUBLE VOTE";
pub const REPLY_UNREGISTERED: &str = "UNREGISTERED";
pub const REPLY_POOR_NETWORK: &str = "POOR NETWORK";

/// A completed serial line.
pub type SerialLine = String<SERIAL_LINE_MAX>;

/// Serial link plus its line assembler.
pub struct LineReader<S> {
    link: S,
    assembler: LineAssembler<SERIAL_LINE_MAX>,
}

impl<S: SerialLink> LineReader<S> {
    pub fn new(link: S) -> Self {
        Self {
            link,
            assembler: LineAssembler::new(),
        }
    }

    /// Drain available bytes until one line completes.  Returns `None`
    /// once the link has no more bytes; a partial line stays buffered.
    pub fn poll_line(&mut self) -> Option<SerialLine> {
        while let Some(byte) = self.link.read_byte() {
            if let Some(line) = self.assembler.feed(byte) {
                return Some(line);
            }
        }
        None
    }

    /// Bytes buffered for a line not yet terminated.
    pub fn partial_len(&self) -> usize {
        self.assembler.pending()
    }

    /// Drop the partial line and every byte the link already holds.
    /// Returns the number of link bytes discarded.
    pub fn resync(&mut self) -> usize {
        self.assembler.reset();
        let mut dropped = 0;
        while self.link.read_byte().is_some() {
            dropped += 1;
        }
        dropped
    }

    pub fn write_line(&mut self, line: &str) {
        self.link.write_line(line);
    }

    pub fn link(&self) -> &S {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut S {
        &mut self.link
    }
}
