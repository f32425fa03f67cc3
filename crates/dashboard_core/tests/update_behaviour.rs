use std::sync::Once;

use dashboard_core::{
    decode_frame, reconcile, update, AppState, ConnectionStatus, Effect, FrameSummary,
    HtmlDocument, Msg, RenderSurface,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dashboard_logging::initialize_for_tests);
}

const FRAME: &str = r#"{"job1": {"firmware_name": "fw1.bin", "percentage": 37.6, "module_list": ["modA"], "phase_list": ["phaseX"]}}"#;

/// Runs a message through `update` and applies any snapshot effect to `doc`,
/// the way the UI loop does.
fn dispatch(state: AppState, doc: &mut HtmlDocument, msg: Msg) -> (AppState, Vec<Effect>) {
    let (mut state, effects) = update(state, msg);
    for effect in &effects {
        if let Effect::ApplySnapshot(snapshot) = effect {
            let summary = reconcile(doc, snapshot).summary();
            let (next, _) = update(state, Msg::FrameRendered(summary));
            state = next;
        }
    }
    (state, effects)
}

#[test]
fn valid_frame_emits_snapshot_effect() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::FrameReceived(FRAME.to_string()));

    assert_eq!(
        effects,
        vec![Effect::ApplySnapshot(decode_frame(FRAME).unwrap().snapshot)]
    );
    assert_eq!(state.frames_received(), 1);
    assert!(!state.consume_dirty());
}

#[test]
fn malformed_frame_is_dropped_and_cards_survive() {
    init_logging();
    let mut doc = HtmlDocument::new();
    let (state, _) = dispatch(AppState::new(), &mut doc, Msg::FrameReceived(FRAME.to_string()));
    let before = doc.clone();

    let (mut state, effects) = dispatch(state, &mut doc, Msg::FrameReceived("not json".to_string()));

    assert!(effects.is_empty());
    assert_eq!(doc, before);
    let view = state.view();
    assert_eq!(view.frames_received, 2);
    assert_eq!(view.frames_dropped, 1);
    assert_eq!(view.cards_created, 1);
    assert!(view.last_decode_error.is_some());
    assert!(state.consume_dirty());
}

#[test]
fn bad_job_does_not_hold_back_its_siblings() {
    init_logging();
    let mut doc = HtmlDocument::new();
    let first = r#"{"a": {"firmware_name": "a.bin", "percentage": 10}}"#;
    let (state, _) = dispatch(AppState::new(), &mut doc, Msg::FrameReceived(first.to_string()));

    let mixed = r#"{"a": {"firmware_name": "a.bin", "percentage": 55},
                    "b": {"firmware_name": "b.bin", "percentage": null},
                    "job 2": {"firmware_name": "c.bin", "percentage": 3}}"#;
    let (mut state, effects) = dispatch(state, &mut doc, Msg::FrameReceived(mixed.to_string()));

    assert_eq!(effects.len(), 1);
    assert_eq!(doc.progress("pBar_a").map(|p| p.value()), Some(55));
    assert!(!doc.contains("Container_b"));
    assert_eq!(doc.card_count(), 1);
    let view = state.view();
    assert_eq!(view.frames_dropped, 0);
    assert_eq!(view.jobs_rejected, 2);
    assert!(view.last_decode_error.is_some());
    assert!(state.consume_dirty());
}

#[test]
fn empty_snapshot_has_no_effect() {
    init_logging();
    let (_, effects) = update(AppState::new(), Msg::FrameReceived("{}".to_string()));
    assert!(effects.is_empty());
}

#[test]
fn rendered_summary_accumulates() {
    init_logging();
    let summary = FrameSummary {
        jobs: 3,
        created: 2,
        failed: 1,
    };
    let (state, _) = update(AppState::new(), Msg::FrameRendered(summary));
    let (state, _) = update(state, Msg::FrameRendered(summary));

    let view = state.view();
    assert_eq!(view.cards_created, 4);
    assert_eq!(view.render_failures, 2);
}

#[test]
fn connection_lifecycle_updates_status() {
    init_logging();
    let endpoint = "ws://dash.local:8001/ws/progress/".to_string();
    let (state, _) = update(
        AppState::new(),
        Msg::Connecting {
            endpoint: endpoint.clone(),
        },
    );
    assert_eq!(state.connection(), ConnectionStatus::Connecting);

    let (state, _) = update(state, Msg::Opened { endpoint: endpoint.clone() });
    assert_eq!(state.connection(), ConnectionStatus::Open);
    assert_eq!(state.view().endpoint, Some(endpoint));

    let (state, _) = update(state, Msg::TransportFailed("reset by peer".to_string()));
    assert_eq!(state.connection(), ConnectionStatus::Closed);
    assert_eq!(state.view().last_transport_error.as_deref(), Some("reset by peer"));

    let (state, _) = update(
        state,
        Msg::ReconnectScheduled {
            attempt: 2,
            delay_ms: 2000,
        },
    );
    assert_eq!(
        state.connection(),
        ConnectionStatus::Reconnecting {
            attempt: 2,
            delay_ms: 2000
        }
    );

    let (state, _) = update(state, Msg::GaveUp { attempts: 5 });
    assert_eq!(state.connection(), ConnectionStatus::GaveUp);
}

#[test]
fn close_is_recorded_without_effects() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::Closed { reason: None });
    assert!(effects.is_empty());
    assert_eq!(state.connection(), ConnectionStatus::Closed);
    assert!(state.consume_dirty());
}

#[test]
fn cancel_emits_remove_effect() {
    init_logging();
    let (_, effects) = update(
        AppState::new(),
        Msg::CancelClicked {
            job_id: "job1".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::RemoveCard {
            job_id: "job1".to_string()
        }]
    );
}

#[test]
fn quit_shuts_down_once_and_ignores_later_frames() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::QuitRequested);
    assert_eq!(effects, vec![Effect::Shutdown]);
    assert!(state.view().shutting_down);

    let (state, effects) = update(state, Msg::QuitRequested);
    assert!(effects.is_empty());

    let (_, effects) = update(state, Msg::FrameReceived(FRAME.to_string()));
    assert!(effects.is_empty());
}
