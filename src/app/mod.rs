mod event_handler;
mod state;

pub use event_handler::{drain_ui_events, handle_ui_event};
pub use state::{AppState, UiEvent};
