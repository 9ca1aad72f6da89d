use serde_json::Value;

/// Decoded body of a 2xx answer from the extraction API.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScrapeReply {
    pub success: bool,
    pub count: u64,
    /// Extracted records in server order.
    pub data: Vec<Value>,
    pub message: Option<String>,
}

/// How the single outbound call for a submission ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    /// The server answered with a 2xx status; `success` may still be false.
    Completed(ScrapeReply),
    /// Timeout, network failure or non-2xx status.
    TransportFailed {
        /// `detail` field of the server's error body, when there was one.
        detail: Option<String>,
        /// Client-side description of the failure.
        message: Option<String>,
    },
}
