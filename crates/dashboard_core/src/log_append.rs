use crate::ids::ElementIds;
use crate::DomCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Phase,
    Module,
}

impl LogKind {
    pub(crate) fn list_id(self, ids: &ElementIds) -> &str {
        match self {
            LogKind::Phase => &ids.phase_log,
            LogKind::Module => &ids.module_log,
        }
    }
}

/// Command appending `line` to the end of the job's `kind` log list.
///
/// The line is kept as text; escaping happens when the surface renders it.
pub fn append_command(job_id: &str, kind: LogKind, line: &str) -> DomCommand {
    let ids = ElementIds::for_job(job_id);
    DomCommand::AppendListItem {
        list_id: kind.list_id(&ids).to_string(),
        text: line.to_string(),
    }
}
