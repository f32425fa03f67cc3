use std::collections::BTreeMap;

use serde::Deserialize;

use crate::ids::display_name;
use crate::{JobSnapshot, Snapshot};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The frame is not JSON or not an object keyed by job identifier.
    #[error("malformed status frame: {message}")]
    Malformed { message: String },
    #[error("job identifier {job_id:?} cannot address a card")]
    InvalidJobId { job_id: String },
    #[error("job {job_id:?} has an unusable status: {message}")]
    InvalidJob { job_id: String, message: String },
}

/// Per-job fields as the analysis service emits them.
#[derive(Debug, Deserialize)]
struct WireJob {
    firmware_name: String,
    percentage: f64,
    #[serde(default)]
    module_list: Option<Vec<String>>,
    #[serde(default)]
    phase_list: Option<Vec<String>>,
    #[serde(default)]
    finished: bool,
}

/// A decoded frame: every job that validated, plus one error per job that
/// did not.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedFrame {
    pub snapshot: Snapshot,
    pub rejected: Vec<DecodeError>,
}

/// Decode one inbound text frame into a typed snapshot.
///
/// Only a frame that is not a JSON object fails as a whole. Each job is
/// validated on its own; a bad job lands in `rejected` and its siblings are
/// still returned.
pub fn decode_frame(text: &str) -> Result<DecodedFrame, DecodeError> {
    let wire: BTreeMap<String, serde_json::Value> =
        serde_json::from_str(text).map_err(|err| DecodeError::Malformed {
            message: err.to_string(),
        })?;

    let mut frame = DecodedFrame::default();
    for (job_id, value) in wire {
        match decode_job(&job_id, value) {
            Ok(job) => frame.snapshot.insert(job_id, job),
            Err(err) => frame.rejected.push(err),
        }
    }
    Ok(frame)
}

fn decode_job(job_id: &str, value: serde_json::Value) -> Result<JobSnapshot, DecodeError> {
    if !is_addressable(job_id) {
        return Err(DecodeError::InvalidJobId {
            job_id: job_id.to_string(),
        });
    }
    let job: WireJob = serde_json::from_value(value).map_err(|err| DecodeError::InvalidJob {
        job_id: job_id.to_string(),
        message: err.to_string(),
    })?;
    Ok(JobSnapshot {
        display_name: display_name(&job.firmware_name).to_string(),
        percentage: job.percentage,
        phase_log: job.phase_list.unwrap_or_default(),
        module_log: job.module_list.unwrap_or_default(),
        finished: job.finished,
    })
}

/// Element ids are built by concatenation, so the identifier must not carry
/// characters that would break an id attribute or a selector.
fn is_addressable(job_id: &str) -> bool {
    !job_id.is_empty()
        && !job_id
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '&' | '#'))
}
