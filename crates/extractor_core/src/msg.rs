#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the search formula.
    QueryChanged(String),
    /// User edited the spreadsheet URL.
    DestinationChanged(String),
    FocusNext,
    FocusPrev,
    /// User activated the submit control.
    SubmitClicked,
    /// The effect runner is about to issue the call for this request.
    RequestDispatched { request_id: crate::RequestId },
    /// The outbound call for a request settled.
    ScrapeSettled {
        request_id: crate::RequestId,
        settlement: crate::Settlement,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
