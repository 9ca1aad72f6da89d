use serde_json::Value;

use crate::{Focus, ValidationIssue};

/// Number of records shown in the success preview.
pub const PREVIEW_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub query: String,
    pub destination: String,
    pub focus: Focus,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub validation: Option<ValidationIssue>,
    pub result: ResultRegion,
    pub dirty: bool,
}

/// The one result area drawn under the form. Exactly one variant per lifecycle state.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultRegion {
    None,
    Loading {
        status: String,
    },
    Error {
        message: String,
    },
    Success {
        status: String,
        preview: Vec<Value>,
        total_records: usize,
    },
}
