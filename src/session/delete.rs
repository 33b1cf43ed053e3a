//! Fingerprint deletion state machine.
//!
//! Sends `DELETE ID: <id>` and waits for `DELETED ID: <id>` or
//! `NOT DELETED ID: <id>` (exact match on the same id).  On deletion the
//! profile's display name is fetched from the logging service and
//! reported alongside the confirmation.  The wait is bounded by the
//! delete deadline.

use log::{info, warn};

use crate::app::ports::{BridgePort, Clock, ControlPort, IlluminationPort, SerialLink, ViewerSignal};
use crate::bridge::url::Action;
use crate::serial::CMD_DELETE_PREFIX;

use super::SessionContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The unit deleted the template.  `display_name` is `first|last`
    /// when the retrieval payload was well formed.
    Deleted { display_name: Option<String> },
    NotDeleted,
    TimedOut,
}

/// Extract `first|last` from a `<id>,<first>,<last>` retrieval payload.
fn display_name(payload: &str) -> Option<String> {
    let (_, rest) = payload.split_once(',')?;
    let (first, last) = rest.split_once(',')?;
    Some(format!("{first}|{last}"))
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
    pub fn run_delete_fingerprint(&mut self, id: &str) -> DeleteOutcome {
        self.begin_exchange(&format!("{CMD_DELETE_PREFIX}{id}"));
        let deleted = format!("DELETED ID: {id}");
        let not_deleted = format!("NOT DELETED ID: {id}");
        let deadline = self.deadline(self.timing.delete_timeout_ms);

        let confirmed = 'wait: loop {
            if self.expired(deadline) {
                break None;
            }
            self.service_control();

            while let Some(line) = self.serial.poll_line() {
                if line.as_str() == deleted {
                    break 'wait Some(true);
                }
                if line.as_str() == not_deleted {
                    break 'wait Some(false);
                }
            }

            self.sleep_ms(self.timing.serial_poll_ms);
        };

        match confirmed {
            Some(true) => {
                let url = self
                    .service_request(Action::Retrieve)
                    .param("id", id)
                    .build();
                let name = display_name(&self.call_service(&url));
                if name.is_none() {
                    warn!("delete: retrieval payload for {id} malformed");
                }
                self.notify(&format!("PROFILE: {}", name.as_deref().unwrap_or("unknown")));
                self.notify(&format!("Fingerprint {id} deleted"));
                info!("delete: fingerprint {id} deleted");
                DeleteOutcome::Deleted { display_name: name }
            }
            Some(false) => {
                warn!("delete: unit kept fingerprint {id}");
                self.notify(&format!("Fingerprint {id} not deleted"));
                DeleteOutcome::NotDeleted
            }
            None => {
                warn!("delete: no answer for {id} before deadline");
                self.notify(&format!("Fingerprint Delete Timeout for ID: {id}"));
                DeleteOutcome::TimedOut
            }
        }
    }
}
