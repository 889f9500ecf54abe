use std::time::{Duration, Instant};

/// How long an error message stays visible.
pub const ERROR_BANNER_DURATION: Duration = Duration::from_millis(5000);

/// Transient error notification that hides itself after a fixed delay.
#[derive(Debug, Clone)]
pub struct ErrorBanner {
    message: Option<String>,
    shown_at: Option<Instant>,
    hide_after: Duration,
}

impl Default for ErrorBanner {
    fn default() -> Self {
        Self::new(ERROR_BANNER_DURATION)
    }
}

impl ErrorBanner {
    pub fn new(hide_after: Duration) -> Self {
        Self {
            message: None,
            shown_at: None,
            hide_after,
        }
    }

    /// Display `message`, replacing any current one and restarting the timer.
    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.message = Some(message.into());
        self.shown_at = Some(now);
    }

    /// The message, if it is still within its display window at `now`.
    pub fn visible_message(&self, now: Instant) -> Option<&str> {
        match (&self.message, self.shown_at) {
            (Some(message), Some(at)) if now.duration_since(at) < self.hide_after => {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    /// Hide the banner once its window has passed. Returns true if it was
    /// hidden by this call.
    pub fn hide_expired(&mut self, now: Instant) -> bool {
        match self.shown_at {
            Some(at) if now.duration_since(at) >= self.hide_after => {
                self.message = None;
                self.shown_at = None;
                true
            }
            _ => false,
        }
    }
}
