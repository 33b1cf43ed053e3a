//! Profile enrollment and deletion.
//!
//! Both are single-shot: parse the `<id>|<first>|<last>` payload, make
//! one logging-service call, report.  A malformed payload is reported
//! without any call.

use log::{info, warn};

use crate::app::ports::{BridgePort, Clock, ControlPort, IlluminationPort, SerialLink, ViewerSignal};
use crate::bridge::url::Action;

use super::SessionContext;

pub const MSG_INVALID_PROFILE: &str = "[Profile] Error: Invalid data format.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileAction {
    Enroll,
    Delete,
}

impl ProfileAction {
    fn service_action(self) -> Action {
        match self {
            Self::Enroll => Action::Enroll,
            Self::Delete => Action::Delete,
        }
    }

    /// Response text that means success.
    fn success_sentinel(self) -> &'static str {
        match self {
            Self::Enroll => "Profile enrolled",
            Self::Delete => "Profile deleted",
        }
    }

    fn success_message(self, id: &str) -> String {
        match self {
            Self::Enroll => format!("Profile Enrollment successful for ID: {id}"),
            Self::Delete => format!("Profile deleted: {id}"),
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Self::Enroll => "Profile Enrollment Failed!",
            Self::Delete => "Profile Deletion Failed!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileOutcome {
    Succeeded,
    /// The service answered with anything but the success sentinel.
    Failed,
    /// Payload lacked two `|` separators; no call was made.
    MalformedPayload,
}

/// A parsed `<id>|<first>|<last>` payload.  The last name takes the
/// remainder, separators included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile<'a> {
    pub id: &'a str,
    pub first: &'a str,
    pub last: &'a str,
}

impl<'a> Profile<'a> {
    pub fn parse(payload: &'a str) -> Option<Self> {
        let (id, rest) = payload.split_once('|')?;
        let (first, last) = rest.split_once('|')?;
        Some(Self { id, first, last })
    }
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
    pub fn run_profile(&mut self, action: ProfileAction, payload: &str) -> ProfileOutcome {
        let Some(profile) = Profile::parse(payload) else {
            warn!("profile: malformed payload ({} bytes)", payload.len());
            self.notify(MSG_INVALID_PROFILE);
            return ProfileOutcome::MalformedPayload;
        };

        let url = self
            .service_request(action.service_action())
            .param("id", profile.id)
            .param("first", profile.first)
            .param("last", profile.last)
            .build();
        let response = self.call_service(&url);

        if response == action.success_sentinel() {
            info!("profile: {:?} {} ok", action, profile.id);
            self.notify(&action.success_message(profile.id));
            ProfileOutcome::Succeeded
        } else {
            warn!("profile: {:?} {} failed: {}", action, profile.id, response);
            self.notify(action.failure_message());
            self.notify(&format!("Service response: {response}"));
            ProfileOutcome::Failed
        }
    }
}
