use crate::view_model::AppViewModel;
use crate::DecodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Open,
    Reconnecting {
        attempt: u32,
        delay_ms: u64,
    },
    Closed,
    /// Reconnect attempts are exhausted.
    GaveUp,
}

/// Counts reported back after a snapshot was reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSummary {
    pub jobs: usize,
    pub created: usize,
    pub failed: usize,
}

/// Connection and frame bookkeeping. Job state is deliberately absent: the
/// rendering surface is the only record of which jobs exist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    connection: ConnectionStatus,
    endpoint: Option<String>,
    frames_received: u64,
    frames_dropped: u64,
    jobs_rejected: u64,
    cards_created: u64,
    render_failures: u64,
    last_decode_error: Option<DecodeError>,
    last_transport_error: Option<String>,
    shutting_down: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            connection: self.connection,
            endpoint: self.endpoint.clone(),
            frames_received: self.frames_received,
            frames_dropped: self.frames_dropped,
            jobs_rejected: self.jobs_rejected,
            cards_created: self.cards_created,
            render_failures: self.render_failures,
            last_decode_error: self.last_decode_error.as_ref().map(ToString::to_string),
            last_transport_error: self.last_transport_error.clone(),
            shutting_down: self.shutting_down,
            dirty: self.dirty,
        }
    }

    pub fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    pub fn frames_received(&self) -> u64 {
        self.frames_received
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_connection(&mut self, status: ConnectionStatus) {
        self.connection = status;
        self.dirty = true;
    }

    pub(crate) fn set_endpoint(&mut self, endpoint: String) {
        self.endpoint = Some(endpoint);
    }

    pub(crate) fn record_frame(&mut self) {
        self.frames_received += 1;
    }

    pub(crate) fn record_dropped_frame(&mut self, err: DecodeError) {
        self.frames_dropped += 1;
        self.last_decode_error = Some(err);
        self.dirty = true;
    }

    pub(crate) fn record_rejected_job(&mut self, err: DecodeError) {
        self.jobs_rejected += 1;
        self.last_decode_error = Some(err);
        self.dirty = true;
    }

    pub(crate) fn record_rendered(&mut self, summary: crate::FrameSummary) {
        self.cards_created += summary.created as u64;
        self.render_failures += summary.failed as u64;
        self.dirty = true;
    }

    pub(crate) fn record_transport_error(&mut self, message: String) {
        self.last_transport_error = Some(message);
        self.dirty = true;
    }

    pub(crate) fn begin_shutdown(&mut self) -> bool {
        let first = !self.shutting_down;
        self.shutting_down = true;
        self.dirty |= first;
        first
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
