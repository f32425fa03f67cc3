//! Dashboard core: snapshot decoding, job-card reconciliation and the pure
//! connection state machine.
mod card;
mod decode;
mod document;
mod effect;
mod ids;
mod log_append;
mod msg;
mod progress;
mod reconcile;
mod snapshot;
mod state;
mod surface;
mod update;
mod view_model;

pub use card::{build_card, CardFragment};
pub use decode::{decode_frame, DecodeError, DecodedFrame};
pub use document::{escape_markup, HtmlDocument};
pub use effect::Effect;
pub use ids::{display_name, log_href, ElementIds, DASHBOARD_CONTAINER_ID};
pub use log_append::{append_command, LogKind};
pub use msg::Msg;
pub use progress::{progress_command, ProgressState};
pub use reconcile::{reconcile, FrameReport, JobOutcome, JobUpdate};
pub use snapshot::{JobId, JobSnapshot, Snapshot};
pub use state::{AppState, ConnectionStatus, FrameSummary};
pub use surface::{DomCommand, RenderError, RenderSurface};
pub use update::update;
pub use view_model::AppViewModel;
