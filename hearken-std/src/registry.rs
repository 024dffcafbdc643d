//! Per-kind listener storage.
//!
//! A [`ListenerRegistry`] holds the ordered listeners of exactly one event
//! kind, so no cast is ever needed to call them. Every mutation rebuilds a
//! [`ComposedHandler`], a frozen snapshot of the list that emission walks
//! without allocating or re-checking anything.

use hearken_core::{Event, EventKind, Listener, SharedListener, same_listener};
use std::sync::Arc;

/// Every listener of one kind, frozen in registration order.
///
/// The handler is cheap to clone and is itself a [`Listener`]. An empty
/// handler does nothing, so callers never need to distinguish "no
/// listeners" from "no handler".
pub struct ComposedHandler<E: Event> {
    chain: Arc<[SharedListener<E>]>,
}

impl<E: Event> ComposedHandler<E> {
    /// A handler that runs nothing.
    pub fn noop() -> Self {
        Self {
            chain: Arc::from(Vec::new()),
        }
    }

    fn compose(listeners: &[SharedListener<E>]) -> Self {
        Self {
            chain: listeners.iter().cloned().collect(),
        }
    }

    /// Runs every listener in order against `event`.
    #[inline]
    pub fn call(&self, event: &mut E) {
        for listener in self.chain.iter() {
            listener.on_event(event);
        }
    }

    /// Number of listeners in the snapshot.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Returns `true` if the handler runs nothing.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

impl<E: Event> Clone for ComposedHandler<E> {
    fn clone(&self) -> Self {
        Self {
            chain: Arc::clone(&self.chain),
        }
    }
}

impl<E: Event> Default for ComposedHandler<E> {
    fn default() -> Self {
        Self::noop()
    }
}

impl<E: Event> Listener<E> for ComposedHandler<E> {
    fn on_event(&self, event: &mut E) {
        self.call(event);
    }
}

/// The ordered listeners of a single event kind.
///
/// # Example
///
/// ```rust
/// use hearken_core::{Event, listener};
/// use hearken_std::registry::ListenerRegistry;
///
/// struct Simple {
///     value: i32,
/// }
///
/// impl Event for Simple {}
///
/// let mut registry = ListenerRegistry::new();
/// let reset = listener(|e: &mut Simple| e.value = 0);
/// registry.push(reset.clone());
///
/// let mut event = Simple { value: 1 };
/// registry.dispatch(&mut event);
/// assert_eq!(event.value, 0);
///
/// assert!(registry.remove(&reset));
/// assert!(registry.is_empty());
/// ```
pub struct ListenerRegistry<E: Event> {
    listeners: Vec<SharedListener<E>>,
    composed: Arc<ComposedHandler<E>>,
}

impl<E: Event> ListenerRegistry<E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            composed: Arc::new(ComposedHandler::noop()),
        }
    }

    /// The kind this registry serves.
    pub fn kind(&self) -> EventKind {
        EventKind::of::<E>()
    }

    /// Appends a listener. The same handle may be pushed more than once and
    /// then fires once per registration.
    pub fn push(&mut self, listener: SharedListener<E>) {
        self.listeners.push(listener);
        self.recompose();
    }

    /// Removes the first registration of `listener`, compared by identity.
    ///
    /// Returns `false` and leaves the registry untouched if it is not
    /// registered.
    pub fn remove(&mut self, listener: &SharedListener<E>) -> bool {
        let Some(index) = self
            .listeners
            .iter()
            .position(|registered| same_listener(registered, listener))
        else {
            return false;
        };
        // `Vec::remove` shifts the tail, keeping the relative order intact.
        self.listeners.remove(index);
        self.recompose();
        true
    }

    /// Removes every listener and hands them back in registration order.
    ///
    /// The listeners are dropped by the caller, so a caller holding a lock
    /// can release it first.
    pub fn clear(&mut self) -> Vec<SharedListener<E>> {
        let removed = std::mem::take(&mut self.listeners);
        self.recompose();
        removed
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// The current composed handler.
    pub fn composed(&self) -> &ComposedHandler<E> {
        &self.composed
    }

    /// The current composed handler, shared.
    pub(crate) fn composed_arc(&self) -> &Arc<ComposedHandler<E>> {
        &self.composed
    }

    /// Iterate over registered listeners in order.
    pub fn iter(&self) -> impl Iterator<Item = &SharedListener<E>> {
        self.listeners.iter()
    }

    /// Runs every listener against `event`.
    #[inline]
    pub fn dispatch(&self, event: &mut E) {
        self.composed.call(event);
    }

    fn recompose(&mut self) {
        self.composed = Arc::new(if self.listeners.is_empty() {
            ComposedHandler::noop()
        } else {
            ComposedHandler::compose(&self.listeners)
        });
    }
}

impl<E: Event> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}
