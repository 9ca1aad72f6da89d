//! Extractor client: HTTP access to the extraction API and the background
//! worker that runs it off the UI thread.
mod client;
mod handle;
mod settings;
mod types;

pub use client::{ReqwestScraper, Scraper};
pub use handle::{ClientEvents, ClientHandle};
pub use settings::{endpoint_url, ClientSettings, DEFAULT_API_BASE, SCRAPE_PATH};
pub use types::{ClientEvent, FailureKind, RequestId, ScrapeError, ScrapeRequest, ScrapeResponse};
