use url::Url;

use crate::state::InFlightPhase;
use crate::{
    Effect, Focus, FormState, Lifecycle, Msg, ScrapeReply, Settlement, ValidationIssue,
};

/// Shown when the server reports `success: false` without a message.
pub const FALLBACK_APP_ERROR: &str = "Failed to extract data";
/// Shown when a transport failure carries no usable text.
pub const FALLBACK_TRANSPORT_ERROR: &str = "An error occurred";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: FormState, msg: Msg) -> (FormState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryChanged(query) => {
            state.set_query(query);
            Vec::new()
        }
        Msg::DestinationChanged(destination) => {
            state.set_destination(destination);
            Vec::new()
        }
        Msg::FocusNext => {
            let next = state.focus().next();
            state.set_focus(next);
            Vec::new()
        }
        Msg::FocusPrev => {
            let prev = state.focus().prev();
            state.set_focus(prev);
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::RequestDispatched { request_id } => {
            if state.in_flight_id() == Some(request_id) {
                state.set_phase(InFlightPhase::Working);
            }
            Vec::new()
        }
        Msg::ScrapeSettled {
            request_id,
            settlement,
        } => {
            // Only the request in flight may settle the form; anything else is stale.
            if state.in_flight_id() == Some(request_id) {
                state.settle(settled_lifecycle(settlement));
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut FormState) -> Vec<Effect> {
    if state.lifecycle().is_in_flight() {
        return Vec::new();
    }

    let spreadsheet_url = match check_required(state.query(), state.destination()) {
        Ok(url) => url,
        Err(issue) => {
            state.set_focus(match issue {
                ValidationIssue::MissingQuery => Focus::Query,
                ValidationIssue::MissingDestination | ValidationIssue::InvalidDestination => {
                    Focus::Destination
                }
            });
            state.block_submit(issue);
            return Vec::new();
        }
    };

    let formula = state.query().to_string();
    let request_id = state.begin_request();
    vec![Effect::Scrape {
        request_id,
        formula,
        spreadsheet_url,
    }]
}

/// Required-field check; returns the destination with surrounding whitespace removed.
fn check_required(query: &str, destination: &str) -> Result<String, ValidationIssue> {
    if query.is_empty() {
        return Err(ValidationIssue::MissingQuery);
    }
    let destination = destination.trim();
    if destination.is_empty() {
        return Err(ValidationIssue::MissingDestination);
    }
    Url::parse(destination).map_err(|_| ValidationIssue::InvalidDestination)?;
    Ok(destination.to_string())
}

fn settled_lifecycle(settlement: Settlement) -> Lifecycle {
    match settlement {
        Settlement::Completed(reply) if reply.success => Lifecycle::Succeeded {
            status: success_status(&reply),
            result: reply,
        },
        Settlement::Completed(ScrapeReply { message, .. }) => Lifecycle::Failed {
            error: non_empty(message).unwrap_or_else(|| FALLBACK_APP_ERROR.to_string()),
        },
        Settlement::TransportFailed { detail, message } => Lifecycle::Failed {
            error: non_empty(detail)
                .or_else(|| non_empty(message))
                .unwrap_or_else(|| FALLBACK_TRANSPORT_ERROR.to_string()),
        },
    }
}

fn success_status(reply: &ScrapeReply) -> String {
    format!("✓ Successfully extracted {} trademarks!", reply.count)
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|text| !text.is_empty())
}
