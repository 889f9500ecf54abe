use std::time::Instant;

use super::state::{AppState, UiEvent};

/// Apply a single client event to the presentation state.
pub fn handle_ui_event(state: &mut AppState, event: UiEvent, now: Instant) {
    match event {
        UiEvent::Error(message) => {
            log::debug!("Showing error banner: {message}");
            state.banner.show(message, now);
        }
        UiEvent::Loading(loading) => {
            if state.loader.set(loading) {
                log::debug!("Loading indicator {}", if loading { "shown" } else { "hidden" });
            }
        }
    }
}

/// Apply every event currently queued on `events`. Returns how many were handled.
pub fn drain_ui_events(
    state: &mut AppState,
    events: &async_channel::Receiver<UiEvent>,
    now: Instant,
) -> usize {
    let mut handled = 0;
    while let Ok(event) = events.try_recv() {
        handle_ui_event(state, event, now);
        handled += 1;
    }
    handled
}
