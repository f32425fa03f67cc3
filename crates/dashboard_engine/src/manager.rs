//! WebSocket connection lifecycle.
//!
//! [`ConnectionManager::run`] connects to the progress endpoint, requests a
//! resync as soon as the handshake completes, forwards every text frame to
//! the [`EventSink`], and reconnects according to the configured
//! [`ReconnectPolicy`](crate::ReconnectPolicy) until cancelled or exhausted.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::{HeaderValue, COOKIE};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;
use url::Url;

use dashboard_logging::{dash_error, dash_info, dash_trace, dash_warn};

use crate::{Backoff, ConnectError, ConnectionConfig, ConnectionEvent, EventSink};

/// Text sent once per successful connection; the service answers with the
/// full status of every in-flight job.
pub const RESYNC_REQUEST: &str = "Reload";

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Owns the configuration of the single progress connection.
pub struct ConnectionManager {
    config: ConnectionConfig,
}

impl ConnectionManager {
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }

    /// Run the connect / session / reconnect loop.
    ///
    /// Returns when `cancel` fires or the reconnect policy gives up.
    pub async fn run(&self, sink: &dyn EventSink, cancel: CancellationToken) {
        let endpoint = match self.config.endpoint() {
            Ok(endpoint) => endpoint,
            Err(err) => {
                dash_error!("Cannot build progress endpoint: {}", err);
                sink.emit(ConnectionEvent::Error(err.to_string()));
                sink.emit(ConnectionEvent::GaveUp { attempts: 0 });
                return;
            }
        };
        let mut backoff = Backoff::new(self.config.reconnect.clone());

        loop {
            dash_info!("Connecting to {}", endpoint);
            sink.emit(ConnectionEvent::Connecting {
                endpoint: endpoint.to_string(),
            });

            let connected = tokio::select! {
                _ = cancel.cancelled() => return,
                result = self.open(&endpoint) => result,
            };

            match connected {
                Ok(ws_stream) => {
                    backoff.reset();
                    run_session(ws_stream, endpoint.as_str(), sink, &cancel).await;
                }
                Err(err) => {
                    dash_error!("Connection to {} failed: {}", endpoint, err);
                    sink.emit(ConnectionEvent::Error(err.to_string()));
                }
            }

            if cancel.is_cancelled() {
                return;
            }

            let Some((attempt, delay)) = backoff.next_attempt() else {
                dash_error!(
                    "Giving up on {} after {} reconnect attempt(s)",
                    endpoint,
                    backoff.attempts()
                );
                sink.emit(ConnectionEvent::GaveUp {
                    attempts: backoff.attempts(),
                });
                return;
            };

            dash_info!(
                "Reconnect attempt {} in {} ms",
                attempt,
                delay.as_millis()
            );
            sink.emit(ConnectionEvent::Reconnecting { attempt, delay });

            // Wait before the next attempt, respecting cancellation.
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    async fn open(&self, endpoint: &Url) -> Result<WsStream, ConnectError> {
        let mut request = endpoint
            .as_str()
            .into_client_request()
            .map_err(|err| ConnectError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                message: err.to_string(),
            })?;

        if let Some(cookie) = &self.config.session_cookie {
            let value = HeaderValue::from_str(cookie).map_err(|_| ConnectError::InvalidCookie)?;
            request.headers_mut().insert(COOKIE, value);
        }

        let (ws_stream, _response) = connect_async(request)
            .await
            .map_err(|err| ConnectError::Handshake(err.to_string()))?;
        Ok(ws_stream)
    }
}

/// Drive one open connection until it closes, fails or is cancelled.
async fn run_session(
    ws_stream: WsStream,
    endpoint: &str,
    sink: &dyn EventSink,
    cancel: &CancellationToken,
) {
    let (mut write, mut read) = ws_stream.split();

    if let Err(err) = write.send(Message::Text(RESYNC_REQUEST.to_string())).await {
        dash_error!("Failed to request resync: {}", err);
        sink.emit(ConnectionEvent::Error(err.to_string()));
        return;
    }
    dash_info!("Connection established to {}, resync requested", endpoint);
    sink.emit(ConnectionEvent::Opened {
        endpoint: endpoint.to_string(),
    });

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                dash_info!("Closing connection to {}", endpoint);
                if let Err(err) = write.close().await {
                    dash_warn!("Close handshake failed: {}", err);
                }
                sink.emit(ConnectionEvent::Closed {
                    reason: Some("client shutdown".to_string()),
                });
                return;
            }
            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        dash_trace!("Received status frame ({} bytes)", text.len());
                        sink.emit(ConnectionEvent::Frame(text));
                    }
                    Some(Ok(Message::Close(frame))) => {
                        let reason = frame
                            .map(|frame| frame.reason.to_string())
                            .filter(|reason| !reason.is_empty());
                        dash_info!("Server closed the connection");
                        sink.emit(ConnectionEvent::Closed { reason });
                        return;
                    }
                    Some(Ok(_)) => {
                        // Ping/pong is answered by tungstenite; binary frames carry nothing for us.
                    }
                    Some(Err(err)) => {
                        dash_error!("Transport error: {}, forcing close", err);
                        sink.emit(ConnectionEvent::Error(err.to_string()));
                        let _ = write.close().await;
                        sink.emit(ConnectionEvent::Closed { reason: None });
                        return;
                    }
                    None => {
                        dash_info!("Connection stream ended");
                        sink.emit(ConnectionEvent::Closed { reason: None });
                        return;
                    }
                }
            }
        }
    }
}
