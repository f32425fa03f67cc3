#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Reconcile the rendering surface against a decoded snapshot.
    ApplySnapshot(crate::Snapshot),
    RemoveCard { job_id: crate::JobId },
    /// Close the connection and stop the UI loop.
    Shutdown,
}
