//! Span-instrumented listener wrapper.

use hearken_core::{Event, EventKind, Listener};

/// A listener wrapper that runs the inner listener inside a `tracing` span.
///
/// The span is named `listener` and carries the wrapper's name and the event
/// kind, so anything the inner listener logs is attributed to it.
pub struct Traced<L> {
    inner: L,
    name: &'static str,
}

impl<L> Traced<L> {
    /// Create a new `Traced` wrapper around a listener.
    pub const fn new(inner: L, name: &'static str) -> Self {
        Self { inner, name }
    }

    /// The name recorded on the span.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<L: Clone> Clone for Traced<L> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            name: self.name,
        }
    }
}

impl<E, L> Listener<E> for Traced<L>
where
    E: Event,
    L: Listener<E>,
{
    fn on_event(&self, event: &mut E) {
        let kind = EventKind::of::<E>();
        let span = tracing::info_span!("listener", listener = %self.name, kind = %kind);
        let _guard = span.enter();
        self.inner.on_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Simple {
        value: i32,
    }

    impl Event for Simple {}

    #[test]
    fn test_traced_runs_inner() {
        let traced = Traced::new(|e: &mut Simple| e.value = 0, "reset");
        let mut event = Simple { value: 5 };
        traced.on_event(&mut event);
        assert_eq!(event.value, 0);
        assert_eq!(traced.name(), "reset");
    }
}
