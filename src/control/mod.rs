//! Operator control channel dispatcher.
//!
//! Owns at most one live client.  A new connection closes and replaces
//! the previous one before it is observed, so two clients are never
//! serviced at once.  Inbound text is decoded into [`ControlCommand`]s;
//! outbound status text is best-effort.
//!
//! ```text
//!  ControlServer ──accept──▶ Option<Client> ──poll──▶ ControlCommand
//!                                 ▲
//!                                 └────── send(text) (best-effort)
//! ```

use log::{debug, info, warn};

use crate::app::commands::ControlCommand;
use crate::app::ports::ControlPort;
use crate::error::ControlError;

/// One connected operator console.
pub trait ControlClient {
    /// Whether the connection can currently carry traffic.
    fn is_available(&self) -> bool;

    /// Next complete inbound message, if any.  Never blocks.
    /// `Err` means the connection is gone.
    fn poll_message(&mut self) -> Result<Option<String>, ControlError>;

    fn send(&mut self, text: &str) -> Result<(), ControlError>;

    /// Tear the connection down.  Called exactly once, before the client
    /// is dropped by the dispatcher.
    fn close(&mut self);
}

/// Accepts new operator connections.
pub trait ControlServer {
    type Client: ControlClient;

    /// A newly connected client, if one is waiting.  Never blocks.
    fn poll_accept(&mut self) -> Option<Self::Client>;
}

/// Single-client dispatcher implementing [`ControlPort`].
pub struct Dispatcher<S: ControlServer> {
    server: S,
    client: Option<S::Client>,
}

impl<S: ControlServer> Dispatcher<S> {
    pub fn new(server: S) -> Self {
        Self {
            server,
            client: None,
        }
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    pub fn server(&self) -> &S {
        &self.server
    }

    /// Adopt every waiting connection; the newest one wins.
    fn accept_pending(&mut self) {
        while let Some(incoming) = self.server.poll_accept() {
            if let Some(mut old) = self.client.replace(incoming) {
                info!("control: new client, closing previous");
                old.close();
            } else {
                info!("control: client connected");
            }
        }
    }

    fn drop_client(&mut self, reason: ControlError) {
        if let Some(mut client) = self.client.take() {
            warn!("control: dropping client ({reason})");
            client.close();
        }
    }
}

impl<S: ControlServer> ControlPort for Dispatcher<S> {
    fn poll_command(&mut self) -> Option<ControlCommand> {
        self.accept_pending();

        loop {
            let client = self.client.as_mut()?;
            match client.poll_message() {
                Ok(Some(text)) => {
                    if let Some(cmd) = ControlCommand::decode(&text) {
                        debug!("control: {}", cmd.keyword());
                        return Some(cmd);
                    }
                    debug!("control: ignored unrecognised message ({} bytes)", text.len());
                }
                Ok(None) => return None,
                Err(e) => {
                    self.drop_client(e);
                    return None;
                }
            }
        }
    }

    fn send(&mut self, text: &str) {
        let Some(client) = self.client.as_mut() else {
            debug!("control: no client, dropped \"{text}\"");
            return;
        };
        if !client.is_available() {
            return;
        }
        if let Err(e) = client.send(text) {
            self.drop_client(e);
        }
    }
}
