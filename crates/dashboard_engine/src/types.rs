use std::sync::mpsc;
use std::time::Duration;

/// Lifecycle and data events of the live connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    Connecting { endpoint: String },
    /// Handshake done and the resync request sent.
    Opened { endpoint: String },
    /// One inbound text frame, undecoded.
    Frame(String),
    Closed { reason: Option<String> },
    /// Handshake or transport failure; the connection is closed afterwards.
    Error(String),
    Reconnecting { attempt: u32, delay: Duration },
    GaveUp { attempts: u32 },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConnectError {
    #[error("invalid endpoint {endpoint}: {message}")]
    InvalidEndpoint { endpoint: String, message: String },
    #[error("session cookie is not a valid header value")]
    InvalidCookie,
    #[error("handshake failed: {0}")]
    Handshake(String),
    #[error("connection runtime unavailable: {0}")]
    Runtime(String),
}

/// Receiver of connection events; called from the connection's runtime.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ConnectionEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<ConnectionEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<ConnectionEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ConnectionEvent) {
        let _ = self.tx.send(event);
    }
}
