//! Logging listener for event observation.

use hearken_core::{Event, EventKind, Listener};

/// A listener that logs every event it receives at `DEBUG` level.
///
/// Register it first to see events as emitted, or last to see them after
/// every other listener has run.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingListener;

impl<E: Event + std::fmt::Debug> Listener<E> for LoggingListener {
    fn on_event(&self, event: &mut E) {
        tracing::debug!(kind = %EventKind::of::<E>(), ?event, "event received");
    }
}
