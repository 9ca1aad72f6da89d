use std::sync::{mpsc, Arc};
use std::thread;

use extractor_logging::{extractor_error, extractor_info, extractor_warn};

use crate::client::{ReqwestScraper, Scraper};
use crate::{ClientEvent, ClientSettings, FailureKind, RequestId, ScrapeError, ScrapeRequest};

enum ClientCommand {
    Submit {
        request_id: RequestId,
        request: ScrapeRequest,
    },
}

/// Sends extraction calls to a background runtime thread.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    /// Settles submissions directly when the worker thread is gone.
    event_tx: mpsc::Sender<ClientEvent>,
}

/// Receiving side for settlements produced by a [`ClientHandle`].
pub struct ClientEvents {
    event_rx: mpsc::Receiver<ClientEvent>,
}

impl ClientHandle {
    pub fn new(settings: ClientSettings) -> (Self, ClientEvents) {
        Self::with_scraper(Arc::new(ReqwestScraper::new(settings)))
    }

    pub fn with_scraper(scraper: Arc<dyn Scraper>) -> (Self, ClientEvents) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let worker_event_tx = event_tx.clone();
        thread::spawn(move || {
            let event_tx = worker_event_tx;
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    extractor_error!("Failed to start client runtime: {}", err);
                    fail_pending(cmd_rx, event_tx, err.to_string());
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let scraper = scraper.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(scraper, command, event_tx).await;
                });
            }
        });

        (Self { cmd_tx, event_tx }, ClientEvents { event_rx })
    }

    pub fn submit(&self, request_id: RequestId, request: ScrapeRequest) {
        let command = ClientCommand::Submit {
            request_id,
            request,
        };
        if self.cmd_tx.send(command).is_err() {
            extractor_error!("Client worker is gone, request_id={} not sent", request_id);
            send_event(
                &self.event_tx,
                request_id,
                Err(ScrapeError::new(
                    FailureKind::Unavailable,
                    "extraction client stopped",
                )),
            );
        }
    }
}

impl ClientEvents {
    /// Blocks until the next settlement. `None` once the client is gone.
    pub fn recv(&self) -> Option<ClientEvent> {
        self.event_rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    scraper: Arc<dyn Scraper>,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    match command {
        ClientCommand::Submit {
            request_id,
            request,
        } => {
            // The call runs in its own task so a panic still produces a settlement.
            let call = tokio::spawn(async move { scraper.scrape(request_id, &request).await });
            let result = match call.await {
                Ok(result) => result,
                Err(err) => {
                    extractor_error!("request_id={} scrape task failed: {}", request_id, err);
                    Err(ScrapeError::new(
                        FailureKind::Unavailable,
                        format!("extraction task failed: {err}"),
                    ))
                }
            };
            extractor_info!("request_id={} settled ok={}", request_id, result.is_ok());
            send_event(&event_tx, request_id, result);
        }
    }
}

fn send_event(
    event_tx: &mpsc::Sender<ClientEvent>,
    request_id: RequestId,
    result: Result<crate::ScrapeResponse, ScrapeError>,
) {
    if event_tx
        .send(ClientEvent::Settled { request_id, result })
        .is_err()
    {
        extractor_warn!("No listener for settlement of request_id={}", request_id);
    }
}

/// Without a runtime every submission settles immediately as unavailable.
fn fail_pending(
    cmd_rx: mpsc::Receiver<ClientCommand>,
    event_tx: mpsc::Sender<ClientEvent>,
    reason: String,
) {
    while let Ok(ClientCommand::Submit { request_id, .. }) = cmd_rx.recv() {
        send_event(
            &event_tx,
            request_id,
            Err(ScrapeError::new(FailureKind::Unavailable, reason.clone())),
        );
    }
}
