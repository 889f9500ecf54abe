use std::time::Duration;

/// Where the recognition backend listens when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Per-request timeout applied to every network call.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Connection settings for the backend client.
///
/// `base_url` never ends with a slash; every setter normalizes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_url: String,
    timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL, DEFAULT_TIMEOUT_MS)
    }
}

impl Config {
    pub fn new(base_url: &str, timeout_ms: u64) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            timeout_ms,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace the base URL. The value is not validated beyond trimming
    /// trailing slashes.
    pub fn set_base_url(&mut self, url: &str) {
        self.base_url = normalize_base_url(url);
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Strip every trailing `/` so paths can be appended with a single slash.
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
