use std::time::Duration;

/// API base used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
/// Path of the extraction endpoint, relative to the API base.
pub const SCRAPE_PATH: &str = "/api/scrape";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_base: String,
    pub connect_timeout: Duration,
    /// Upper bound for the whole call; extraction runs server-side and is slow.
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
        }
    }
}

impl ClientSettings {
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Self::default()
        }
    }

    pub fn scrape_url(&self) -> String {
        endpoint_url(&self.api_base, SCRAPE_PATH)
    }
}

/// Joins `base` and `path`, dropping one trailing slash from `base`.
pub fn endpoint_url(base: &str, path: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    format!("{base}{path}")
}
