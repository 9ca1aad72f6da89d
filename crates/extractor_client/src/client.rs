use extractor_logging::{clip_for_log, extractor_debug, extractor_info, extractor_warn, LOG_CLIP_CHARS};
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::types::ErrorBody;
use crate::{ClientSettings, FailureKind, RequestId, ScrapeError, ScrapeRequest, ScrapeResponse};

#[async_trait::async_trait]
pub trait Scraper: Send + Sync {
    /// Issues one extraction call. Never retries.
    async fn scrape(
        &self,
        request_id: RequestId,
        request: &ScrapeRequest,
    ) -> Result<ScrapeResponse, ScrapeError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestScraper {
    settings: ClientSettings,
}

impl ReqwestScraper {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, ScrapeError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| ScrapeError::new(FailureKind::Network, err.to_string()))
    }

    fn map_reqwest_error(&self, err: reqwest::Error) -> ScrapeError {
        if err.is_timeout() {
            return ScrapeError::new(
                FailureKind::Timeout,
                format!(
                    "timeout of {}ms exceeded",
                    self.settings.request_timeout.as_millis()
                ),
            );
        }
        ScrapeError::new(FailureKind::Network, err.to_string())
    }
}

#[async_trait::async_trait]
impl Scraper for ReqwestScraper {
    async fn scrape(
        &self,
        request_id: RequestId,
        request: &ScrapeRequest,
    ) -> Result<ScrapeResponse, ScrapeError> {
        let url = reqwest::Url::parse(&self.settings.scrape_url())
            .map_err(|err| ScrapeError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let body = serde_json::to_vec(request)
            .map_err(|err| ScrapeError::new(FailureKind::Encode, err.to_string()))?;
        let client = self.build_client()?;

        extractor_info!(
            "POST {} request_id={} formula={:?} spreadsheet_url={:?}",
            url,
            request_id,
            clip_for_log(&request.formula, LOG_CLIP_CHARS),
            clip_for_log(&request.spreadsheet_url, LOG_CLIP_CHARS)
        );

        let response = client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| self.map_reqwest_error(err))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| self.map_reqwest_error(err))?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(ErrorBody::into_detail);
            extractor_warn!(
                "request_id={} failed with status {} detail={:?}",
                request_id,
                status,
                detail
            );
            return Err(ScrapeError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("Request failed with status code {}", status.as_u16()),
            )
            .with_detail(detail));
        }

        // A 2xx body we cannot read is reported as an unsuccessful reply without a message.
        let reply = match serde_json::from_slice::<ScrapeResponse>(&bytes) {
            Ok(reply) => reply,
            Err(err) => {
                extractor_warn!(
                    "request_id={} returned an undecodable body ({} bytes): {}",
                    request_id,
                    bytes.len(),
                    err
                );
                ScrapeResponse::default()
            }
        };
        extractor_debug!(
            "request_id={} success={} count={} records={}",
            request_id,
            reply.success,
            reply.count,
            reply.data.len()
        );
        Ok(reply)
    }
}
