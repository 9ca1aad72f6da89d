use std::sync::mpsc;
use std::thread;

use extractor_client::{
    ClientEvent, ClientEvents, ClientHandle, ClientSettings, ScrapeError, ScrapeRequest,
    ScrapeResponse,
};
use extractor_core::{Effect, Msg, ScrapeReply, Settlement};
use extractor_logging::{extractor_info, extractor_warn};

pub struct EffectRunner {
    client: ClientHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, msg_tx: mpsc::Sender<Msg>) -> Self {
        let (client, events) = ClientHandle::new(settings);
        Self::with_client(client, events, msg_tx)
    }

    pub fn with_client(
        client: ClientHandle,
        events: ClientEvents,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        spawn_event_loop(events, msg_tx.clone());
        Self { client, msg_tx }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Scrape {
                    request_id,
                    formula,
                    spreadsheet_url,
                } => {
                    extractor_info!(
                        "Scrape request_id={} formula_len={} spreadsheet_url_len={}",
                        request_id,
                        formula.len(),
                        spreadsheet_url.len()
                    );
                    // The phase change must reach the form before the settlement can.
                    if self
                        .msg_tx
                        .send(Msg::RequestDispatched { request_id })
                        .is_err()
                    {
                        extractor_warn!("Form is gone, request_id={} not dispatched", request_id);
                        continue;
                    }
                    self.client.submit(
                        request_id,
                        ScrapeRequest {
                            formula,
                            spreadsheet_url,
                        },
                    );
                }
            }
        }
    }
}

fn spawn_event_loop(events: ClientEvents, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            match event {
                ClientEvent::Settled { request_id, result } => {
                    if let Err(err) = &result {
                        extractor_warn!("Request {} failed: {}", request_id, err);
                    }
                    let msg = Msg::ScrapeSettled {
                        request_id,
                        settlement: map_settlement(result),
                    };
                    if msg_tx.send(msg).is_err() {
                        break;
                    }
                }
            }
        }
    });
}

fn map_settlement(result: Result<ScrapeResponse, ScrapeError>) -> Settlement {
    match result {
        Ok(response) => Settlement::Completed(ScrapeReply {
            success: response.success,
            count: response.count,
            data: response.data,
            message: response.message,
        }),
        Err(err) => Settlement::TransportFailed {
            detail: err.detail,
            message: Some(err.message),
        },
    }
}
