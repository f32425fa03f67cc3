//! Dashboard engine: the live connection to the analysis service.
mod config;
mod handle;
mod manager;
mod reconnect;
mod types;

pub use config::{ConnectionConfig, PageScheme};
pub use handle::ConnectionHandle;
pub use manager::{ConnectionManager, RESYNC_REQUEST};
pub use reconnect::{Backoff, ReconnectPolicy};
pub use types::{ChannelEventSink, ConnectError, ConnectionEvent, EventSink};
