//! Logging-service request targets.
//!
//! Every call is a GET on the configured service URL with an `action`
//! discriminator followed by action-specific fields, each value
//! percent-encoded:
//!
//! ```text
//! <base>?action=vote&id=17&pres=CandA&gub=CandB&sen=CandC
//! <base>?action=enroll&id=1&first=Jane&last=Doe
//! <base>?action=delete&id=1&first=Jane&last=Doe
//! <base>?action=retrieve&id=9
//! ```

use core::fmt::Write;

/// Request discriminator understood by the logging service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Vote,
    Enroll,
    Delete,
    Retrieve,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vote => "vote",
            Self::Enroll => "enroll",
            Self::Delete => "delete",
            Self::Retrieve => "retrieve",
        }
    }
}

/// Builder for one request target.
pub struct ServiceRequest<'a> {
    base: &'a str,
    action: Action,
    params: heapless::Vec<(&'static str, &'a str), 4>,
}

impl<'a> ServiceRequest<'a> {
    pub fn new(base: &'a str, action: Action) -> Self {
        Self {
            base,
            action,
            params: heapless::Vec::new(),
        }
    }

    /// Append one field.  Fields beyond the fourth are ignored; no action
    /// uses more.
    #[must_use]
    pub fn param(mut self, key: &'static str, value: &'a str) -> Self {
        if self.params.push((key, value)).is_err() {
            log::warn!("url: too many fields for {}", self.action.as_str());
        }
        self
    }

    /// Render the full URL.
    pub fn build(&self) -> String {
        let mut url = String::with_capacity(self.base.len() + 64);
        url.push_str(self.base);
        url.push(if self.base.contains('?') { '&' } else { '?' });
        let _ = write!(url, "action={}", self.action.as_str());
        for (key, value) in &self.params {
            let _ = write!(url, "&{}={}", key, urlencoding::encode(value));
        }
        url
    }
}
