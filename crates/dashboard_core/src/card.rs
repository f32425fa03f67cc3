use crate::ids::{log_href, ElementIds};
use crate::DomCommand;

/// A self-contained, not yet attached job card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFragment {
    pub ids: ElementIds,
    pub title: String,
    pub log_href: String,
}

/// Build the insertion command for a brand-new card.
///
/// The card starts with both log lists empty and the progress bar at zero;
/// every region is addressed through ids derived from `job_id`.
pub fn build_card(job_id: &str, display_name: &str) -> DomCommand {
    DomCommand::InsertCard(CardFragment {
        ids: ElementIds::for_job(job_id),
        title: display_name.to_string(),
        log_href: log_href(job_id),
    })
}
