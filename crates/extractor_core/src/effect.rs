#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one extraction call.
    Scrape {
        request_id: crate::RequestId,
        formula: String,
        spreadsheet_url: String,
    },
}
