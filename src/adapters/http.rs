//! HTTP transport for the request bridge.
//!
//! - **`target_os = "espidf"`**: [`EspHttpTransport`] opens one
//!   `EspHttpConnection` per GET, with a bounded timeout, GET/HEAD-only
//!   redirect following and the ESP-IDF certificate bundle for HTTPS.
//! - Body collection is shared and host-tested.

use crate::error::HttpError;

/// Largest response body the station accepts.  Service answers are
/// short status strings or a `<id>,<first>,<last>` record.
pub const MAX_RESPONSE_BYTES: usize = 2048;

/// Drain a body through `read` (returns 0 at end) into a UTF-8 string.
pub fn collect_body(
    mut read: impl FnMut(&mut [u8]) -> Result<usize, HttpError>,
) -> Result<String, HttpError> {
    let mut body = Vec::new();
    let mut chunk = [0u8; 256];
    loop {
        let n = read(&mut chunk)?;
        if n == 0 {
            break;
        }
        if body.len() + n > MAX_RESPONSE_BYTES {
            return Err(HttpError::TooLarge);
        }
        body.extend_from_slice(&chunk[..n]);
    }
    String::from_utf8(body).map_err(|_| HttpError::NotText)
}

#[cfg(target_os = "espidf")]
pub use esp_impl::EspHttpTransport;

#[cfg(target_os = "espidf")]
mod esp_impl {
    use core::time::Duration;

    use esp_idf_svc::http::Method;
    use esp_idf_svc::http::client::{Configuration, EspHttpConnection, FollowRedirectsPolicy};
    use esp_idf_svc::sys::{EspError, ESP_ERR_HTTP_EAGAIN, ESP_ERR_TIMEOUT};
    use log::debug;

    use super::collect_body;
    use crate::bridge::HttpTransport;
    use crate::error::HttpError;

    pub struct EspHttpTransport {
        timeout: Duration,
    }

    impl EspHttpTransport {
        pub fn new(timeout_ms: u32) -> Self {
            Self {
                timeout: Duration::from_millis(u64::from(timeout_ms)),
            }
        }

        fn classify(e: EspError) -> HttpError {
            let code = e.code();
            if code == ESP_ERR_HTTP_EAGAIN as i32 || code == ESP_ERR_TIMEOUT as i32 {
                HttpError::Timeout
            } else {
                HttpError::Connect(code)
            }
        }
    }

    impl HttpTransport for EspHttpTransport {
        fn get(&mut self, url: &str) -> Result<String, HttpError> {
            let mut conn = EspHttpConnection::new(&Configuration {
                timeout: Some(self.timeout),
                follow_redirects_policy: FollowRedirectsPolicy::FollowGetHead,
                crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
                ..Default::default()
            })
            .map_err(Self::classify)?;

            conn.initiate_request(Method::Get, url, &[])
                .map_err(Self::classify)?;
            conn.initiate_response().map_err(Self::classify)?;
            debug!("http: status {}", conn.status());

            collect_body(|buf| {
                conn.read(buf).map_err(|e| match Self::classify(e) {
                    HttpError::Timeout => HttpError::Timeout,
                    _ => HttpError::Read,
                })
            })
        }
    }
}
