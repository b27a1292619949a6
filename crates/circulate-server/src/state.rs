//! Application state.

use circulate_site::Dispatcher;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Renders request paths against the content tree.
    pub(crate) dispatcher: Dispatcher,
}
