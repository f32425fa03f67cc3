use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{ConnectError, ReconnectPolicy};

/// Scheme of the page hosting the dashboard; it decides transport and port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageScheme {
    #[default]
    Http,
    Https,
}

impl FromStr for PageScheme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().trim_end_matches(':').to_ascii_lowercase().as_str() {
            "http" => Ok(PageScheme::Http),
            "https" => Ok(PageScheme::Https),
            other => Err(format!("unknown page scheme {other:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub host: String,
    pub page_scheme: PageScheme,
    /// Port used for `ws://` when the page is served over http.
    pub insecure_port: u16,
    /// Port used for `wss://` when the page is served over https.
    pub secure_port: u16,
    pub path: String,
    /// Cookie header forwarded on the handshake, carrying the session.
    pub session_cookie: Option<String>,
    pub reconnect: ReconnectPolicy,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            page_scheme: PageScheme::Http,
            insecure_port: 8001,
            secure_port: 8000,
            path: "/ws/progress/".to_string(),
            session_cookie: None,
            reconnect: ReconnectPolicy::default(),
        }
    }
}

impl ConnectionConfig {
    /// WebSocket endpoint for this configuration.
    pub fn endpoint(&self) -> Result<Url, ConnectError> {
        let (scheme, port) = match self.page_scheme {
            PageScheme::Http => ("ws", self.insecure_port),
            PageScheme::Https => ("wss", self.secure_port),
        };
        let raw = format!("{scheme}://{}:{port}{}", self.host, self.path);
        Url::parse(&raw).map_err(|err| ConnectError::InvalidEndpoint {
            endpoint: raw.clone(),
            message: err.to_string(),
        })
    }
}
