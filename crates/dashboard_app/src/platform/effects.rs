use std::sync::mpsc;

use dashboard_core::{
    reconcile, DomCommand, Effect, ElementIds, HtmlDocument, Msg, RenderSurface,
};
use dashboard_engine::{ConnectionEvent, ConnectionHandle, EventSink};
use dashboard_logging::{dash_info, dash_warn};

/// Forwards connection events into the UI loop as messages.
pub struct MsgSink {
    msg_tx: mpsc::Sender<Msg>,
}

impl MsgSink {
    pub fn new(msg_tx: mpsc::Sender<Msg>) -> Self {
        Self { msg_tx }
    }
}

impl EventSink for MsgSink {
    fn emit(&self, event: ConnectionEvent) {
        let _ = self.msg_tx.send(map_event(event));
    }
}

fn map_event(event: ConnectionEvent) -> Msg {
    match event {
        ConnectionEvent::Connecting { endpoint } => Msg::Connecting { endpoint },
        ConnectionEvent::Opened { endpoint } => Msg::Opened { endpoint },
        ConnectionEvent::Frame(text) => Msg::FrameReceived(text),
        ConnectionEvent::Closed { reason } => Msg::Closed { reason },
        ConnectionEvent::Error(message) => Msg::TransportFailed(message),
        ConnectionEvent::Reconnecting { attempt, delay } => Msg::ReconnectScheduled {
            attempt,
            delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        },
        ConnectionEvent::GaveUp { attempts } => Msg::GaveUp { attempts },
    }
}

/// Carries out effects against the page document and the live connection.
pub struct EffectRunner {
    connection: Option<ConnectionHandle>,
    stopped: bool,
}

impl EffectRunner {
    pub fn new(connection: Option<ConnectionHandle>) -> Self {
        Self {
            connection,
            stopped: false,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Run one effect; returns the follow-up message, if any.
    pub fn run(&mut self, effect: Effect, document: &mut HtmlDocument) -> Option<Msg> {
        match effect {
            Effect::ApplySnapshot(snapshot) => {
                let report = reconcile(document, &snapshot);
                Some(Msg::FrameRendered(report.summary()))
            }
            Effect::RemoveCard { job_id } => {
                let container_id = ElementIds::for_job(&job_id).container;
                match document.apply(DomCommand::RemoveElement {
                    element_id: container_id,
                }) {
                    Ok(()) => dash_info!("Removed card for job {}", job_id),
                    Err(err) => dash_warn!("Cannot remove job {}: {}", job_id, err),
                }
                None
            }
            Effect::Shutdown => {
                if let Some(mut connection) = self.connection.take() {
                    connection.shutdown();
                }
                self.stopped = true;
                None
            }
        }
    }
}
