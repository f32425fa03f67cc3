/// Id of the single container every card is inserted into.
pub const DASHBOARD_CONTAINER_ID: &str = "main";

const CONTAINER_PREFIX: &str = "Container_";
const PROGRESS_BAR_PREFIX: &str = "pBar_";
const PHASE_LOG_PREFIX: &str = "log_phase_";
const MODULE_LOG_PREFIX: &str = "log_module_";

/// Deterministic element ids of one job's card regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIds {
    pub container: String,
    pub progress_bar: String,
    pub phase_log: String,
    pub module_log: String,
}

impl ElementIds {
    pub fn for_job(job_id: &str) -> Self {
        Self {
            container: format!("{CONTAINER_PREFIX}{job_id}"),
            progress_bar: format!("{PROGRESS_BAR_PREFIX}{job_id}"),
            phase_log: format!("{PHASE_LOG_PREFIX}{job_id}"),
            module_log: format!("{MODULE_LOG_PREFIX}{job_id}"),
        }
    }
}

/// Card title for a firmware file: everything before the first `.`.
pub fn display_name(firmware_name: &str) -> &str {
    firmware_name
        .split_once('.')
        .map_or(firmware_name, |(stem, _)| stem)
}

/// Link target of the job's full analysis log.
pub fn log_href(job_id: &str) -> String {
    format!("/log/{job_id}")
}
