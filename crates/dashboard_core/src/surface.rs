use crate::{CardFragment, ProgressState};

/// One mutation of the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomCommand {
    /// Append a new card as the last child of the dashboard container.
    InsertCard(CardFragment),
    /// Append one text entry at the end of a log list.
    AppendListItem { list_id: String, text: String },
    /// Overwrite the observable state of a progress bar.
    SetProgress { bar_id: String, state: ProgressState },
    /// Flag a card as belonging to a finished analysis.
    MarkFinished { container_id: String },
    /// Detach an element and everything below it.
    RemoveElement { element_id: String },
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("no element with id {element_id:?}")]
    MissingElement { element_id: String },
    #[error("element id {element_id:?} already exists")]
    DuplicateElement { element_id: String },
    #[error("element {element_id:?} is not a {expected}")]
    WrongKind {
        element_id: String,
        expected: &'static str,
    },
}

/// The addressable rendering surface the reconciler drives.
///
/// The surface is the only record of which jobs have been rendered; nothing
/// else in the pipeline remembers job state between frames.
pub trait RenderSurface {
    /// Whether an element with this id is currently attached.
    fn contains(&self, element_id: &str) -> bool;

    /// Number of entries currently rendered in a log list.
    fn list_len(&self, list_id: &str) -> Result<usize, RenderError>;

    fn apply(&mut self, command: DomCommand) -> Result<(), RenderError>;
}
