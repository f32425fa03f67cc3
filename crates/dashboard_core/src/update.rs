use dashboard_logging::{dash_debug, dash_info, dash_warn};

use crate::{decode_frame, AppState, ConnectionStatus, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Connecting { endpoint } => {
            state.set_endpoint(endpoint);
            state.set_connection(ConnectionStatus::Connecting);
            Vec::new()
        }
        Msg::Opened { endpoint } => {
            state.set_endpoint(endpoint);
            state.set_connection(ConnectionStatus::Open);
            Vec::new()
        }
        Msg::FrameReceived(text) => {
            state.record_frame();
            if state.is_shutting_down() {
                return (state, Vec::new());
            }
            match decode_frame(&text) {
                Ok(frame) => {
                    for err in frame.rejected {
                        dash_warn!("Skipping job: {}", err);
                        state.record_rejected_job(err);
                    }
                    if frame.snapshot.is_empty() {
                        Vec::new()
                    } else {
                        dash_debug!("Decoded snapshot with {} job(s)", frame.snapshot.len());
                        vec![Effect::ApplySnapshot(frame.snapshot)]
                    }
                }
                Err(err) => {
                    dash_warn!("Dropping frame ({} bytes): {}", text.len(), err);
                    state.record_dropped_frame(err);
                    Vec::new()
                }
            }
        }
        Msg::FrameRendered(summary) => {
            state.record_rendered(summary);
            Vec::new()
        }
        Msg::Closed { reason } => {
            dash_info!("Connection closed ({})", reason.as_deref().unwrap_or("no reason"));
            state.set_connection(ConnectionStatus::Closed);
            Vec::new()
        }
        Msg::TransportFailed(message) => {
            state.record_transport_error(message);
            state.set_connection(ConnectionStatus::Closed);
            Vec::new()
        }
        Msg::ReconnectScheduled { attempt, delay_ms } => {
            state.set_connection(ConnectionStatus::Reconnecting { attempt, delay_ms });
            Vec::new()
        }
        Msg::GaveUp { .. } => {
            state.set_connection(ConnectionStatus::GaveUp);
            Vec::new()
        }
        Msg::CancelClicked { job_id } => {
            state.mark_dirty();
            vec![Effect::RemoveCard { job_id }]
        }
        Msg::QuitRequested => {
            if state.begin_shutdown() {
                vec![Effect::Shutdown]
            } else {
                Vec::new()
            }
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}
