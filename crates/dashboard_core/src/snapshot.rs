use std::collections::BTreeMap;

/// Server-assigned job identifier, stable across the job's lifetime.
pub type JobId = String;

/// Typed status of one analysis job as carried by a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSnapshot {
    /// Name shown on the card: the firmware filename up to its first `.`.
    pub display_name: String,
    /// Reported progress; may be fractional or out of range.
    pub percentage: f64,
    pub phase_log: Vec<String>,
    pub module_log: Vec<String>,
    pub finished: bool,
}

/// Decoded contents of one inbound frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    jobs: BTreeMap<JobId, JobSnapshot>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, job_id: impl Into<JobId>, job: JobSnapshot) {
        self.jobs.insert(job_id.into(), job);
    }

    pub fn get(&self, job_id: &str) -> Option<&JobSnapshot> {
        self.jobs.get(job_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&JobId, &JobSnapshot)> {
        self.jobs.iter()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl FromIterator<(JobId, JobSnapshot)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (JobId, JobSnapshot)>>(iter: I) -> Self {
        Self {
            jobs: iter.into_iter().collect(),
        }
    }
}
