//! Inbound operator commands.
//!
//! Control-channel text is decoded exactly once, here, into a closed
//! [`ControlCommand`] variant.  Nothing downstream re-matches strings.

/// Commands that the operator console can send into the station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    /// `LED_ON` / `LED_OFF`.
    Illumination(bool),
    /// `ENROL_FINGER`.
    EnrollFingerprint,
    /// `ENROL_PROFILE <id>|<first>|<last>`.
    EnrollProfile(String),
    /// `DELETE_FINGER <id>`.
    DeleteFingerprint(String),
    /// `DELETE_PROFILE <id>|<first>|<last>`.
    DeleteProfile(String),
}

const LED_ON: &str = "LED_ON";
const LED_OFF: &str = "LED_OFF";
const ENROL_FINGER: &str = "ENROL_FINGER";
const ENROL_PROFILE: &str = "ENROL_PROFILE ";
const DELETE_FINGER: &str = "DELETE_FINGER ";
const DELETE_PROFILE: &str = "DELETE_PROFILE ";

impl ControlCommand {
    /// Decode one inbound message.  Unrecognised text yields `None`.
    ///
    /// Bare commands match exactly; payload commands match on their
    /// prefix (including the separating space) and carry the remainder
    /// verbatim.
    pub fn decode(msg: &str) -> Option<Self> {
        match msg {
            LED_ON => return Some(Self::Illumination(true)),
            LED_OFF => return Some(Self::Illumination(false)),
            ENROL_FINGER => return Some(Self::EnrollFingerprint),
            _ => {}
        }

        if let Some(payload) = msg.strip_prefix(ENROL_PROFILE) {
            Some(Self::EnrollProfile(payload.to_owned()))
        } else if let Some(id) = msg.strip_prefix(DELETE_FINGER) {
            Some(Self::DeleteFingerprint(id.to_owned()))
        } else if let Some(payload) = msg.strip_prefix(DELETE_PROFILE) {
            Some(Self::DeleteProfile(payload.to_owned()))
        } else {
            None
        }
    }

    /// Wire keyword, for logs and busy replies.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Illumination(true) => LED_ON,
            Self::Illumination(false) => LED_OFF,
            Self::EnrollFingerprint => ENROL_FINGER,
            Self::EnrollProfile(_) => "ENROL_PROFILE",
            Self::DeleteFingerprint(_) => "DELETE_FINGER",
            Self::DeleteProfile(_) => "DELETE_PROFILE",
        }
    }
}
