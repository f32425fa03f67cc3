use dashboard_logging::{dash_debug, dash_warn};

use crate::ids::ElementIds;
use crate::{
    append_command, build_card, progress_command, DomCommand, FrameSummary, JobId, JobSnapshot,
    LogKind, ProgressState, RenderError, RenderSurface, Snapshot,
};

/// What reconciling one job changed on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobUpdate {
    pub created: bool,
    pub phase_appended: usize,
    pub module_appended: usize,
    pub progress: ProgressState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub job_id: JobId,
    pub result: Result<JobUpdate, RenderError>,
}

/// Per-job results of reconciling one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameReport {
    pub outcomes: Vec<JobOutcome>,
}

impl FrameReport {
    pub fn created_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome.result, Ok(JobUpdate { created: true, .. })))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&JobId, &RenderError)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().err().map(|err| (&outcome.job_id, err)))
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn summary(&self) -> FrameSummary {
        FrameSummary {
            jobs: self.outcomes.len(),
            created: self.created_count(),
            failed: self.failure_count(),
        }
    }
}

/// Bring the surface in line with one decoded snapshot.
///
/// Every job is reconciled independently: a render failure is recorded in
/// the report and the remaining jobs of the frame still get their update.
pub fn reconcile(surface: &mut dyn RenderSurface, snapshot: &Snapshot) -> FrameReport {
    let outcomes = snapshot
        .iter()
        .map(|(job_id, job)| {
            let result = reconcile_job(surface, job_id, job);
            if let Err(err) = &result {
                dash_warn!("Render failed for job {}: {}", job_id, err);
            }
            JobOutcome {
                job_id: job_id.clone(),
                result,
            }
        })
        .collect();
    FrameReport { outcomes }
}

fn reconcile_job(
    surface: &mut dyn RenderSurface,
    job_id: &str,
    job: &JobSnapshot,
) -> Result<JobUpdate, RenderError> {
    let ids = ElementIds::for_job(job_id);

    // Card existence on the surface is the only record of a seen job.
    let created = !surface.contains(&ids.container);
    if created {
        surface.apply(build_card(job_id, &job.display_name))?;
        dash_debug!("Created card {} ({})", ids.container, job.display_name);
    }

    let module_appended = append_new_lines(surface, job_id, &ids, LogKind::Module, &job.module_log)?;
    let phase_appended = append_new_lines(surface, job_id, &ids, LogKind::Phase, &job.phase_log)?;

    surface.apply(progress_command(job_id, job.percentage))?;
    if job.finished {
        surface.apply(DomCommand::MarkFinished {
            container_id: ids.container.clone(),
        })?;
    }

    Ok(JobUpdate {
        created,
        phase_appended,
        module_appended,
        progress: ProgressState::from_percentage(job.percentage),
    })
}

/// Frames carry the whole log so far; only lines past what is already
/// rendered are appended.
fn append_new_lines(
    surface: &mut dyn RenderSurface,
    job_id: &str,
    ids: &ElementIds,
    kind: LogKind,
    lines: &[String],
) -> Result<usize, RenderError> {
    let rendered = surface.list_len(kind.list_id(ids))?;
    let fresh = lines.get(rendered..).unwrap_or_default();
    for line in fresh {
        surface.apply(append_command(job_id, kind, line))?;
    }
    Ok(fresh.len())
}
