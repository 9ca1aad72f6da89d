use crate::view_model::{AppViewModel, ResultRegion, PREVIEW_LIMIT};
use crate::ScrapeReply;

pub type RequestId = u64;

/// Example formula the query field starts with.
pub const DEFAULT_QUERY: &str = "CD:[2015-07-01 TO 2015-07-05] AND EN:INDIVIDUAL OW:USA";

/// Control that currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Query,
    Destination,
    Submit,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Query => Focus::Destination,
            Focus::Destination => Focus::Submit,
            Focus::Submit => Focus::Query,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Query => Focus::Submit,
            Focus::Destination => Focus::Query,
            Focus::Submit => Focus::Destination,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InFlightPhase {
    Starting,
    Working,
}

impl InFlightPhase {
    pub fn label(self) -> &'static str {
        match self {
            InFlightPhase::Starting => "Starting extraction...",
            InFlightPhase::Working => "Scraping USPTO data with AI...",
        }
    }
}

/// Request lifecycle. Each variant carries only the data that is valid in it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Lifecycle {
    #[default]
    Idle,
    InFlight {
        request_id: RequestId,
        phase: InFlightPhase,
    },
    Succeeded {
        status: String,
        result: ScrapeReply,
    },
    Failed {
        error: String,
    },
}

impl Lifecycle {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Lifecycle::InFlight { .. })
    }
}

/// Reason a submit was blocked before any request was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingQuery,
    MissingDestination,
    InvalidDestination,
}

impl ValidationIssue {
    pub fn hint(self) -> &'static str {
        match self {
            ValidationIssue::MissingQuery => "Please fill out the search formula.",
            ValidationIssue::MissingDestination => "Please fill out the Google Sheets URL.",
            ValidationIssue::InvalidDestination => "Please enter a URL.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    query: String,
    destination: String,
    focus: Focus,
    lifecycle: Lifecycle,
    validation: Option<ValidationIssue>,
    next_request_id: RequestId,
    dirty: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            destination: String::new(),
            focus: Focus::default(),
            lifecycle: Lifecycle::Idle,
            validation: None,
            next_request_id: 1,
            dirty: false,
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn view(&self) -> AppViewModel {
        let in_flight = self.lifecycle.is_in_flight();
        AppViewModel {
            query: self.query.clone(),
            destination: self.destination.clone(),
            focus: self.focus,
            submit_enabled: !in_flight,
            submit_label: if in_flight {
                "Extracting Data..."
            } else {
                "Start Extraction"
            },
            validation: self.validation,
            result: self.result_region(),
            dirty: self.dirty,
        }
    }

    fn result_region(&self) -> ResultRegion {
        match &self.lifecycle {
            Lifecycle::Idle => ResultRegion::None,
            Lifecycle::InFlight { phase, .. } => ResultRegion::Loading {
                status: phase.label().to_string(),
            },
            Lifecycle::Failed { error } => ResultRegion::Error {
                message: error.clone(),
            },
            Lifecycle::Succeeded { status, result } => ResultRegion::Success {
                status: status.clone(),
                preview: result.data.iter().take(PREVIEW_LIMIT).cloned().collect(),
                total_records: result.data.len(),
            },
        }
    }

    /// Returns whether a repaint is due and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn query(&self) -> &str {
        &self.query
    }

    pub(crate) fn destination(&self) -> &str {
        &self.destination
    }

    pub(crate) fn set_query(&mut self, query: String) {
        self.query = query;
        self.validation = None;
        self.dirty = true;
    }

    pub(crate) fn set_destination(&mut self, destination: String) {
        self.destination = destination;
        self.validation = None;
        self.dirty = true;
    }

    pub(crate) fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            self.focus = focus;
            self.dirty = true;
        }
    }

    pub(crate) fn focus(&self) -> Focus {
        self.focus
    }

    pub(crate) fn block_submit(&mut self, issue: ValidationIssue) {
        self.validation = Some(issue);
        self.dirty = true;
    }

    /// Moves to `InFlight` and returns the id of the new request.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.validation = None;
        self.lifecycle = Lifecycle::InFlight {
            request_id,
            phase: InFlightPhase::Starting,
        };
        self.dirty = true;
        request_id
    }

    /// The id of the request currently in flight, if any.
    pub(crate) fn in_flight_id(&self) -> Option<RequestId> {
        match self.lifecycle {
            Lifecycle::InFlight { request_id, .. } => Some(request_id),
            _ => None,
        }
    }

    pub(crate) fn set_phase(&mut self, phase: InFlightPhase) {
        if let Lifecycle::InFlight { phase: current, .. } = &mut self.lifecycle {
            if *current != phase {
                *current = phase;
                self.dirty = true;
            }
        }
    }

    pub(crate) fn settle(&mut self, lifecycle: Lifecycle) {
        self.lifecycle = lifecycle;
        self.dirty = true;
    }
}
