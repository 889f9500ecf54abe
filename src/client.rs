use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::{Client, Method};
use serde_json::Value;

use crate::app::UiEvent;
use crate::config::Config;
use crate::error::{RequestError, StorageError};
use crate::storage::{KeyValueStore, BACKEND_URL_KEY};

/// Camera index used when the caller does not pick one.
pub const DEFAULT_CAMERA: u32 = 0;

/// Backend routes called by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Health,
    GetText,
    ClearText,
    Backspace,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Health => "/health",
            Endpoint::GetText => "/get_text",
            Endpoint::ClearText => "/clear_text",
            Endpoint::Backspace => "/backspace",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Endpoint::Health | Endpoint::GetText => Method::GET,
            Endpoint::ClearText | Endpoint::Backspace => Method::POST,
        }
    }

    /// Short message suitable for the error banner.
    pub fn failure_message(self) -> &'static str {
        match self {
            Endpoint::Health => "Backend offline",
            Endpoint::GetText => "Failed to get text",
            Endpoint::ClearText => "Failed to clear text",
            Endpoint::Backspace => "Failed to backspace",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

/// HTTP client for the recognition backend.
///
/// Owns its [`Config`] and the durable store the backend URL is persisted
/// to. Each network call makes a single attempt bounded by the configured
/// timeout. Once [`subscribe`](Self::subscribe) has been called, text
/// operations report loading transitions and failures as [`UiEvent`]s.
pub struct BackendClient {
    http: Client,
    config: Config,
    online: AtomicBool,
    store: Box<dyn KeyValueStore>,
    events: Option<async_channel::Sender<UiEvent>>,
}

impl BackendClient {
    pub fn new(config: Config, store: impl KeyValueStore + 'static) -> reqwest::Result<Self> {
        let http = Client::builder()
            .user_agent(format!("sign-reader/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config,
            online: AtomicBool::new(false),
            store: Box::new(store),
            events: None,
        })
    }

    /// Receiver for loading and error events.
    ///
    /// The queue is unbounded so a `Loading(false)` is never lost behind a
    /// slow consumer. Subscribing again replaces the previous receiver.
    pub fn subscribe(&mut self) -> async_channel::Receiver<UiEvent> {
        let (sender, receiver) = async_channel::unbounded();
        self.events = Some(sender);
        receiver
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Session-only changes; use [`set_backend_url`](Self::set_backend_url)
    /// to persist the URL.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Result of the most recent health probe. `false` before any probe.
    pub fn is_backend_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }

    /// Check whether the backend answers `/health` with a 2xx status.
    /// Failures of any kind yield `false`.
    pub async fn probe_health(&self) -> bool {
        let endpoint = Endpoint::Health;
        let healthy = match self.send(endpoint).await {
            Ok(response) if response.status().is_success() => {
                log::debug!("Backend healthy at {}", self.config.base_url());
                true
            }
            Ok(response) => {
                log::warn!("Backend health check returned {}", response.status());
                false
            }
            Err(e) => {
                log::error!("{}: {e}", endpoint.failure_message());
                false
            }
        };

        self.online.store(healthy, Ordering::Relaxed);
        healthy
    }

    /// URL of the annotated MJPEG stream for `camera_id`. Not fetched here.
    pub fn video_feed_url(&self, camera_id: u32) -> String {
        format!("{}/video_feed?camera={camera_id}", self.config.base_url())
    }

    /// Current accumulated text as returned by the backend.
    pub async fn fetch_text(&self) -> Result<Value, RequestError> {
        self.request_json(Endpoint::GetText).await
    }

    pub async fn clear_text(&self) -> Result<Value, RequestError> {
        self.request_json(Endpoint::ClearText).await
    }

    /// Remove the last accumulated character.
    pub async fn backspace_text(&self) -> Result<Value, RequestError> {
        self.request_json(Endpoint::Backspace).await
    }

    /// Point the client at a new backend and remember it for later sessions.
    ///
    /// The in-memory URL is updated even when persisting fails.
    pub fn set_backend_url(&mut self, url: &str) -> Result<(), StorageError> {
        self.config.set_base_url(url);
        log::info!("Backend URL set to {}", self.config.base_url());
        self.store.set(BACKEND_URL_KEY, self.config.base_url())
    }

    /// Apply the persisted backend URL, if any, and return the effective URL.
    pub fn load_backend_url(&mut self) -> &str {
        match self.store.get(BACKEND_URL_KEY) {
            Some(saved) if !saved.is_empty() => {
                self.config.set_base_url(&saved);
                log::debug!("Loaded backend URL {}", self.config.base_url());
            }
            _ => log::debug!("No saved backend URL, using {}", self.config.base_url()),
        }
        self.config.base_url()
    }

    fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.config.base_url(), endpoint.path())
    }

    async fn send(&self, endpoint: Endpoint) -> Result<reqwest::Response, RequestError> {
        let timeout = self.config.timeout();
        self.http
            .request(endpoint.method(), self.url_for(endpoint))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| RequestError::from_reqwest(endpoint, timeout, e))
    }

    async fn request_json(&self, endpoint: Endpoint) -> Result<Value, RequestError> {
        self.emit(UiEvent::Loading(true));
        let result = self.send_for_json(endpoint).await;
        self.emit(UiEvent::Loading(false));

        match &result {
            Ok(_) => log::debug!("{endpoint} succeeded"),
            Err(e) => {
                log::error!("{}: {e}", endpoint.failure_message());
                self.emit(UiEvent::Error(format!("{}: {e}", endpoint.failure_message())));
            }
        }
        result
    }

    async fn send_for_json(&self, endpoint: Endpoint) -> Result<Value, RequestError> {
        let response = self.send(endpoint).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Status { endpoint, status });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| RequestError::from_reqwest(endpoint, self.config.timeout(), e))
    }

    fn emit(&self, event: UiEvent) {
        if let Some(sender) = &self.events {
            if let Err(e) = sender.try_send(event) {
                log::warn!("Dropped UI event, receiver is gone: {:?}", e.into_inner());
            }
        }
    }
}
