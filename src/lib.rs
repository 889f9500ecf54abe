//! Client for a sign-language recognition backend.
//!
//! [`BackendClient`] probes the backend, builds video feed URLs and drives
//! the accumulated-text endpoints. Presentation code listens for
//! [`UiEvent`]s to show loading and error state.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod storage;
pub mod ui;

pub use app::{AppState, UiEvent};
pub use client::{BackendClient, Endpoint, DEFAULT_CAMERA};
pub use config::{Config, DEFAULT_BACKEND_URL, DEFAULT_TIMEOUT_MS};
pub use error::{RequestError, StorageError};
pub use storage::{JsonFileStore, KeyValueStore, BACKEND_URL_KEY};
