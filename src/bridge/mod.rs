//! Request bridge: serialises outbound logging-service calls onto one
//! dedicated network worker.
//!
//! Protocol sessions run on the main loop and must not drive the network
//! stack themselves.  They submit a request URL and block until the
//! worker publishes the response text.
//!
//! ```text
//! ┌──────────────┐ PendingRequest ┌───────────────┐  GET  ┌─────────┐
//! │  main loop   │───────────────▶│ BridgeWorker  │──────▶│ service │
//! │  (sessions)  │◀───────────────│ (core 0)      │◀──────│         │
//! └──────────────┘  Signal<text>  └───────────────┘       └─────────┘
//! ```
//!
//! The queue is an `embassy-sync` bounded channel of depth
//! [`QUEUE_DEPTH`].  Each request carries its own completion `Signal`
//! that holds the response string, so the response is always in place
//! before the submitter wakes.  Transport failures are rendered as
//! `"HTTP Error: <detail>"` and returned like any other response.

pub mod url;

use std::sync::Arc;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use embassy_sync::signal::Signal;
use futures_lite::future::block_on;
use log::{debug, warn};

use crate::app::ports::BridgePort;
use crate::config::EnqueuePolicy;
use crate::error::HttpError;

/// Maximum number of requests waiting for the worker.
pub const QUEUE_DEPTH: usize = 5;

/// Response text returned when the queue is full under
/// [`EnqueuePolicy::Reject`].
pub const QUEUE_FULL_RESPONSE: &str = "HTTP Error: request queue full";

type Completion = Signal<CriticalSectionRawMutex, String>;
type RequestQueue = Channel<CriticalSectionRawMutex, PendingRequest, QUEUE_DEPTH>;

/// One GET waiting for the worker.  The submitter keeps a second handle
/// on `done` and reclaims the response from it.
pub struct PendingRequest {
    url: String,
    done: Arc<Completion>,
}

/// Blocking GET against the logging service.
///
/// Implementations return the response body for any HTTP status the
/// server answers with; only transport failures are errors.
pub trait HttpTransport {
    fn get(&mut self, url: &str) -> Result<String, HttpError>;
}

/// Rejection from [`RequestBridge::try_submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeError {
    QueueFull,
}

impl core::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::QueueFull => write!(f, "request queue full"),
        }
    }
}

impl std::error::Error for BridgeError {}

/// Submitting half of the bridge.  Cheap to clone.
#[derive(Clone)]
pub struct RequestBridge {
    queue: Arc<RequestQueue>,
    policy: EnqueuePolicy,
}

impl RequestBridge {
    /// Create a bridge and the worker that serves it.
    pub fn new(policy: EnqueuePolicy) -> (Self, BridgeWorker) {
        let queue = Arc::new(RequestQueue::new());
        let worker = BridgeWorker {
            queue: Arc::clone(&queue),
        };
        (Self { queue, policy }, worker)
    }

    /// Enqueue `url`, waiting for a free slot if the queue is full, then
    /// block until the response is published.
    pub fn submit_blocking(&self, url: &str) -> String {
        let (request, done) = Self::pending(url);
        block_on(self.queue.send(request));
        block_on(done.wait())
    }

    /// Enqueue `url` only if a slot is free, then block until the
    /// response is published.
    pub fn try_submit(&self, url: &str) -> Result<String, BridgeError> {
        let (request, done) = Self::pending(url);
        match self.queue.try_send(request) {
            Ok(()) => Ok(block_on(done.wait())),
            Err(TrySendError::Full(_)) => Err(BridgeError::QueueFull),
        }
    }

    /// Requests waiting for the worker (not counting the one in service).
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn policy(&self) -> EnqueuePolicy {
        self.policy
    }

    fn pending(url: &str) -> (PendingRequest, Arc<Completion>) {
        let done = Arc::new(Completion::new());
        let request = PendingRequest {
            url: url.to_owned(),
            done: Arc::clone(&done),
        };
        (request, done)
    }
}

impl BridgePort for RequestBridge {
    fn submit(&self, url: &str) -> String {
        match self.policy {
            EnqueuePolicy::Block => self.submit_blocking(url),
            EnqueuePolicy::Reject => self.try_submit(url).unwrap_or_else(|e| {
                warn!("bridge: {e}, request refused");
                QUEUE_FULL_RESPONSE.to_owned()
            }),
        }
    }
}

/// Serving half of the bridge.  Exactly one exists per bridge.
pub struct BridgeWorker {
    queue: Arc<RequestQueue>,
}

impl BridgeWorker {
    /// Wait for the next request, perform it, and publish the response.
    pub fn serve_one<T: HttpTransport>(&self, transport: &mut T) {
        let request = block_on(self.queue.receive());
        debug!("bridge: GET {}", request.url);

        let response = match transport.get(&request.url) {
            Ok(body) => body,
            Err(e) => {
                warn!("bridge: request failed: {e}");
                format!("HTTP Error: {e}")
            }
        };
        request.done.signal(response);
    }

    /// Serve requests forever.  Runs on the dedicated network thread.
    pub fn run<T: HttpTransport>(self, mut transport: T) -> ! {
        log::info!("bridge: worker running (queue depth {QUEUE_DEPTH})");
        loop {
            self.serve_one(&mut transport);
        }
    }
}
