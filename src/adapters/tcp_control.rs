//! Line-oriented TCP control server.
//!
//! Implements [`ControlServer`] / [`ControlClient`] over non-blocking
//! `std::net` sockets (lwIP on the device).  Each inbound message is one
//! `\n`-terminated line; outbound messages are written the same way.

use std::collections::VecDeque;
use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};

use log::{info, warn};

use crate::control::{ControlClient, ControlServer};
use crate::error::ControlError;
use crate::serial::line::LineAssembler;

/// Longest inbound control message.
pub const CONTROL_LINE_MAX: usize = 256;

pub struct TcpControlServer {
    listener: TcpListener,
}

impl TcpControlServer {
    /// Listen on all interfaces at `port` (0 picks an ephemeral port).
    pub fn bind(port: u16) -> Result<Self, ControlError> {
        let listener = TcpListener::bind(("0.0.0.0", port)).map_err(|e| {
            warn!("control: bind {port} failed: {e}");
            ControlError::Bind(port)
        })?;
        listener
            .set_nonblocking(true)
            .map_err(|_| ControlError::Bind(port))?;
        info!("control: listening on port {}", port);
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.local_addr().ok()
    }
}

impl ControlServer for TcpControlServer {
    type Client = TcpControlClient;

    fn poll_accept(&mut self) -> Option<TcpControlClient> {
        match self.listener.accept() {
            Ok((stream, peer)) => {
                if let Err(e) = stream.set_nonblocking(true) {
                    warn!("control: rejecting {peer}: {e}");
                    return None;
                }
                let _ = stream.set_nodelay(true);
                info!("control: accepted {}", peer);
                Some(TcpControlClient::new(stream))
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock => None,
            Err(e) => {
                warn!("control: accept failed: {e}");
                None
            }
        }
    }
}

pub struct TcpControlClient {
    stream: TcpStream,
    assembler: LineAssembler<CONTROL_LINE_MAX>,
    ready: VecDeque<String>,
    open: bool,
}

impl TcpControlClient {
    fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            assembler: LineAssembler::new(),
            ready: VecDeque::new(),
            open: true,
        }
    }

    /// Pull whatever the socket has into complete lines.
    fn fill(&mut self) -> Result<(), ControlError> {
        let mut buf = [0u8; 128];
        loop {
            match self.stream.read(&mut buf) {
                Ok(0) => return Err(ControlError::Disconnected),
                Ok(n) => {
                    let ready = &mut self.ready;
                    self.assembler
                        .feed_slice(&buf[..n], |line| ready.push_back(line.as_str().to_owned()));
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(()),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(_) => return Err(ControlError::Disconnected),
            }
        }
    }
}

impl ControlClient for TcpControlClient {
    fn is_available(&self) -> bool {
        self.open
    }

    fn poll_message(&mut self) -> Result<Option<String>, ControlError> {
        if self.ready.is_empty() {
            if !self.open {
                return Err(ControlError::Disconnected);
            }
            if let Err(e) = self.fill() {
                self.open = false;
                if self.ready.is_empty() {
                    return Err(e);
                }
            }
        }
        Ok(self.ready.pop_front())
    }

    fn send(&mut self, text: &str) -> Result<(), ControlError> {
        let mut frame = Vec::with_capacity(text.len() + 1);
        frame.extend_from_slice(text.as_bytes());
        frame.push(b'\n');
        self.stream.write_all(&frame).map_err(|_| {
            self.open = false;
            ControlError::WriteFailed
        })
    }

    fn close(&mut self) {
        self.open = false;
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}
