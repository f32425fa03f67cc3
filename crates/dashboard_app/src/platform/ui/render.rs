use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use dashboard_core::{AppViewModel, ConnectionStatus};

use super::constants::APP_VERSION;

pub fn connection_label(view: &AppViewModel) -> String {
    let endpoint = view.endpoint.as_deref().unwrap_or("no endpoint");
    match view.connection {
        ConnectionStatus::Connecting => format!("Connecting to {endpoint}"),
        ConnectionStatus::Open => format!("Live ({endpoint})"),
        ConnectionStatus::Reconnecting { attempt, delay_ms } => {
            format!("Reconnecting (attempt {attempt}, in {delay_ms} ms)")
        }
        ConnectionStatus::Closed => "Disconnected".to_string(),
        ConnectionStatus::GaveUp => "Offline, gave up reconnecting".to_string(),
    }
}

/// Status line shown at the bottom of the rendered page.
pub fn footer_text<Tz>(view: &AppViewModel, card_count: usize, updated: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut parts = vec![
        connection_label(view),
        format!("Jobs: {card_count}"),
        format!(
            "Frames: {} received, {} dropped",
            view.frames_received, view.frames_dropped
        ),
    ];
    if view.jobs_rejected > 0 {
        parts.push(format!("Jobs skipped: {}", view.jobs_rejected));
    }
    if view.render_failures > 0 {
        parts.push(format!("Render failures: {}", view.render_failures));
    }
    if let Some(err) = &view.last_transport_error {
        parts.push(format!("Last error: {err}"));
    }
    if view.shutting_down {
        parts.push("Shutting down".to_string());
    }
    parts.push(format!("v{APP_VERSION}"));
    parts.push(format!("Updated {}", updated.format("%Y-%m-%d %H:%M:%S %z")));
    parts.join(" | ")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;

    fn updated() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn footer_for_live_connection() {
        let view = AppViewModel {
            connection: ConnectionStatus::Open,
            endpoint: Some("ws://localhost:8001/ws/progress/".to_string()),
            frames_received: 12,
            frames_dropped: 1,
            ..AppViewModel::default()
        };

        assert_eq!(
            footer_text(&view, 3, &updated()),
            format!(
                "Live (ws://localhost:8001/ws/progress/) | Jobs: 3 | Frames: 12 received, 1 dropped \
                 | v{APP_VERSION} | Updated 2026-03-14 09:26:53 +0000"
            )
        );
    }

    #[test]
    fn footer_surfaces_failures() {
        let view = AppViewModel {
            connection: ConnectionStatus::Reconnecting {
                attempt: 2,
                delay_ms: 2_000,
            },
            render_failures: 4,
            jobs_rejected: 2,
            last_transport_error: Some("connection reset".to_string()),
            ..AppViewModel::default()
        };

        let footer = footer_text(&view, 0, &updated());
        assert!(footer.starts_with("Reconnecting (attempt 2, in 2000 ms) | Jobs: 0"));
        assert!(footer.contains("Jobs skipped: 2 | Render failures: 4"));
        assert!(footer.contains("Last error: connection reset"));
    }

    #[test]
    fn gave_up_label() {
        let view = AppViewModel {
            connection: ConnectionStatus::GaveUp,
            ..AppViewModel::default()
        };
        assert_eq!(connection_label(&view), "Offline, gave up reconnecting");
    }
}
