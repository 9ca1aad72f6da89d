use std::sync::{Arc, Mutex};

use extractor_client::{
    ClientEvent, ClientHandle, ClientSettings, FailureKind, RequestId, ScrapeError,
    ScrapeRequest, ScrapeResponse, Scraper,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct RecordingScraper {
    calls: Mutex<Vec<(RequestId, ScrapeRequest)>>,
}

#[async_trait::async_trait]
impl Scraper for RecordingScraper {
    async fn scrape(
        &self,
        request_id: RequestId,
        request: &ScrapeRequest,
    ) -> Result<ScrapeResponse, ScrapeError> {
        self.calls.lock().unwrap().push((request_id, request.clone()));
        if request.formula.is_empty() {
            return Err(ScrapeError {
                kind: FailureKind::Network,
                detail: None,
                message: "connection refused".to_string(),
            });
        }
        Ok(ScrapeResponse {
            success: true,
            count: 1,
            data: vec![json!({"mark": "TECH INNOVATE"})],
            message: None,
        })
    }
}

fn request(formula: &str) -> ScrapeRequest {
    ScrapeRequest {
        formula: formula.to_string(),
        spreadsheet_url: "https://sheet.example.com/d/1".to_string(),
    }
}

#[test]
fn each_submit_settles_once_with_its_id() {
    let scraper = Arc::new(RecordingScraper::default());
    let (handle, events) = ClientHandle::with_scraper(scraper.clone());

    handle.submit(11, request("q"));
    let event = events.recv().expect("settlement");

    match event {
        ClientEvent::Settled { request_id, result } => {
            assert_eq!(request_id, 11);
            assert_eq!(result.expect("ok").count, 1);
        }
    }
    assert_eq!(scraper.calls.lock().unwrap().len(), 1);
    assert!(events.try_recv().is_none());
}

#[test]
fn failures_are_delivered_as_events() {
    let scraper = Arc::new(RecordingScraper::default());
    let (handle, events) = ClientHandle::with_scraper(scraper);

    handle.submit(3, request(""));

    match events.recv().expect("settlement") {
        ClientEvent::Settled { request_id, result } => {
            assert_eq!(request_id, 3);
            assert_eq!(result.unwrap_err().message, "connection refused");
        }
    }
}

#[test]
fn reqwest_backed_handle_reaches_the_endpoint() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/scrape"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "count": 5,
                "data": [],
            })))
            .mount(&server)
            .await;
        server
    });

    let (handle, events) = ClientHandle::new(ClientSettings::with_api_base(server.uri()));
    handle.submit(1, request("q"));

    match events.recv().expect("settlement") {
        ClientEvent::Settled { result, .. } => assert_eq!(result.expect("ok").count, 5),
    }
}

struct PanickingScraper;

#[async_trait::async_trait]
impl Scraper for PanickingScraper {
    async fn scrape(
        &self,
        _request_id: RequestId,
        _request: &ScrapeRequest,
    ) -> Result<ScrapeResponse, ScrapeError> {
        panic!("scraper blew up");
    }
}

#[test]
fn panicking_scrape_still_settles_as_unavailable() {
    let (handle, events) = ClientHandle::with_scraper(Arc::new(PanickingScraper));

    handle.submit(8, request("q"));

    match events.recv().expect("settlement") {
        ClientEvent::Settled { request_id, result } => {
            assert_eq!(request_id, 8);
            assert_eq!(result.unwrap_err().kind, FailureKind::Unavailable);
        }
    }
}
