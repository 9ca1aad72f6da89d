//! Extractor core: pure form state machine and view-model helpers.
mod effect;
mod msg;
mod reply;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use reply::{ScrapeReply, Settlement};
pub use state::{
    FormState, Focus, InFlightPhase, Lifecycle, RequestId, ValidationIssue, DEFAULT_QUERY,
};
pub use update::{update, FALLBACK_APP_ERROR, FALLBACK_TRANSPORT_ERROR};
pub use view_model::{AppViewModel, ResultRegion, PREVIEW_LIMIT};
