use crate::ConnectionStatus;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub connection: ConnectionStatus,
    pub endpoint: Option<String>,
    pub frames_received: u64,
    pub frames_dropped: u64,
    /// Jobs skipped inside otherwise valid frames.
    pub jobs_rejected: u64,
    pub cards_created: u64,
    pub render_failures: u64,
    pub last_decode_error: Option<String>,
    pub last_transport_error: Option<String>,
    pub shutting_down: bool,
    pub dirty: bool,
}
