use serde_json::Value;

use crate::ui::{ErrorBanner, LoadingIndicator};

/// Events sent from the backend client to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// A request failed; show the message to the user.
    Error(String),
    /// A request started (`true`) or finished (`false`).
    Loading(bool),
}

/// Presentation state driven by [`UiEvent`]s.
#[derive(Debug, Default)]
pub struct AppState {
    pub banner: ErrorBanner,
    pub loader: LoadingIndicator,
    pub last_text: Option<Value>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `text` and report whether it differs from the last one shown.
    pub fn record_text(&mut self, text: Value) -> bool {
        if self.last_text.as_ref() == Some(&text) {
            return false;
        }
        self.last_text = Some(text);
        true
    }
}
