use crate::ids::ElementIds;
use crate::DomCommand;

/// Observable state of a progress bar, already rounded and clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressState {
    value: u8,
}

impl ProgressState {
    /// Non-finite input renders as 0; everything else is clamped to 0..=100
    /// and rounded half away from zero.
    pub fn from_percentage(percentage: f64) -> Self {
        let value = if percentage.is_finite() {
            percentage.clamp(0.0, 100.0).round() as u8
        } else {
            0
        };
        Self { value }
    }

    /// Accessibility "current value" of the bar.
    pub fn value(&self) -> u8 {
        self.value
    }

    /// CSS width of the filled part.
    pub fn width(&self) -> String {
        format!("{}%", self.value)
    }

    /// Text shown inside the bar.
    pub fn label(&self) -> String {
        format!("{}%", self.value)
    }
}

/// Command that moves a job's progress bar to `percentage`.
pub fn progress_command(job_id: &str, percentage: f64) -> DomCommand {
    DomCommand::SetProgress {
        bar_id: ElementIds::for_job(job_id).progress_bar,
        state: ProgressState::from_percentage(percentage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_nearest() {
        assert_eq!(ProgressState::from_percentage(37.6).value(), 38);
        assert_eq!(ProgressState::from_percentage(37.4).value(), 37);
        assert_eq!(ProgressState::from_percentage(12.5).value(), 13);
    }

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(ProgressState::from_percentage(-5.0).value(), 0);
        assert_eq!(ProgressState::from_percentage(140.2).value(), 100);
        assert_eq!(ProgressState::from_percentage(f64::NAN).value(), 0);
        assert_eq!(ProgressState::from_percentage(f64::INFINITY).value(), 0);
    }

    #[test]
    fn width_and_label_match_value() {
        let state = ProgressState::from_percentage(99.7);
        assert_eq!(state.width(), "100%");
        assert_eq!(state.label(), "100%");
    }

    #[test]
    fn command_targets_progress_bar() {
        assert_eq!(
            progress_command("job9", 50.0),
            DomCommand::SetProgress {
                bar_id: "pBar_job9".to_string(),
                state: ProgressState::from_percentage(50.0),
            }
        );
    }
}
