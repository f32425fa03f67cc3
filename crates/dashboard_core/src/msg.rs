#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A connection attempt to `endpoint` has started.
    Connecting { endpoint: String },
    /// The handshake succeeded and the resync request went out.
    Opened { endpoint: String },
    /// One raw text frame arrived from the analysis service.
    FrameReceived(String),
    /// The surface finished reconciling the last applied snapshot.
    FrameRendered(crate::FrameSummary),
    /// The connection closed, by either side.
    Closed { reason: Option<String> },
    /// The transport reported an error; the connection was force-closed.
    TransportFailed(String),
    /// A reconnect is pending after `delay_ms`.
    ReconnectScheduled { attempt: u32, delay_ms: u64 },
    /// The reconnect policy is exhausted; no further attempts follow.
    GaveUp { attempts: u32 },
    /// User removed a job card.
    CancelClicked { job_id: crate::JobId },
    /// User asked the dashboard to shut down.
    QuitRequested,
    /// UI/render tick to coalesce rendering.
    Tick,
}
