//! Fingerprint enrollment state machine.
//!
//! Sends `ENROL` to the unit, then waits up to the enroll deadline for
//! `ENROLLED ID: <n>` or `NOT ENROLLED`.  Every other line is discarded;
//! unterminated input is bounded by the serial line reader.

use log::{info, warn};

use crate::app::ports::{BridgePort, Clock, ControlPort, IlluminationPort, SerialLink, ViewerSignal};
use crate::serial::CMD_ENROL;

use super::SessionContext;

const ENROLLED_PREFIX: &str = "ENROLLED ID: ";
const NOT_ENROLLED: &str = "NOT ENROLLED";

pub const MSG_ENROLL_FAILED: &str = "ENROLLMENT FAILED!";
pub const MSG_ENROLL_TIMEOUT: &str = "ENROLLMENT TIMEOUT!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollOutcome {
    /// The unit stored a template under this id.
    Enrolled(u32),
    /// `NOT ENROLLED`, or an enrolled line without a positive id.
    Failed,
    TimedOut,
}

/// Parse the id out of `ENROLLED ID: <n>`.  `Some(None)` means the line
/// matched but the id was not a positive integer.
fn parse_enrolled(line: &str) -> Option<Option<u32>> {
    let raw = line.strip_prefix(ENROLLED_PREFIX)?;
    Some(raw.trim().parse::<u32>().ok().filter(|&n| n > 0))
}

impl<S, C, B, L, K, V> SessionContext<S, C, B, L, K, V>
where
    S: SerialLink,
    C: ControlPort,
    B: BridgePort,
    L: IlluminationPort,
    K: Clock,
    V: ViewerSignal,
{
    pub fn run_enroll_fingerprint(&mut self) -> EnrollOutcome {
        self.begin_exchange(CMD_ENROL);
        let deadline = self.deadline(self.timing.enroll_timeout_ms);

        let outcome = 'wait: loop {
            if self.expired(deadline) {
                break EnrollOutcome::TimedOut;
            }
            self.service_control();

            while let Some(line) = self.serial.poll_line() {
                if let Some(id) = parse_enrolled(&line) {
                    break 'wait id.map_or(EnrollOutcome::Failed, EnrollOutcome::Enrolled);
                }
                if line.as_str() == NOT_ENROLLED {
                    break 'wait EnrollOutcome::Failed;
                }
            }

            self.sleep_ms(self.timing.serial_poll_ms);
        };

        match outcome {
            EnrollOutcome::Enrolled(id) => {
                info!("enroll: fingerprint stored as {id}");
                self.notify(&format!("ID: {id}"));
            }
            EnrollOutcome::Failed => {
                warn!("enroll: unit reported failure");
                self.notify(MSG_ENROLL_FAILED);
            }
            EnrollOutcome::TimedOut => {
                warn!("enroll: no answer before deadline");
                self.notify(MSG_ENROLL_TIMEOUT);
            }
        }
        outcome
    }
}
