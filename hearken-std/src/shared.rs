//! Thread-safe event dispatcher.
//!
//! [`SharedDispatcher`] offers the [`EventDispatcher`] API through `&self`
//! so one instance can live in an `Arc` or a `static`.
//!
//! # Locking
//!
//! A single `RwLock` guards the kind map.
//!
//! - `register`/`remove_listener` take the write lock, so they exclude each
//!   other and any recomposition in flight.
//! - `emit` takes the read lock just long enough to clone the kind's
//!   [`ComposedHandler`] (one reference-count increment), then runs the
//!   listeners with no lock held.
//!
//! Emissions therefore run in parallel, and each one sees a complete listener
//! list: the one current when it started. Listeners may register or remove
//! listeners on the same dispatcher; the change applies from the next
//! emission on.
//!
//! No listener code runs under the lock, including `Drop`: listeners taken out
//! by `clear` are dropped after the write lock is released.
//!
//! [`EventDispatcher`]: crate::EventDispatcher

use crate::{
    erased::{self, ErasedHandler, ErasedListener, RegistryMap},
    registry::ComposedHandler,
};
use hearken_core::{Dispatcher, Event, EventKind, Listener, RegisterError, SharedListener};
use parking_lot::RwLock;
use std::{any::Any, collections::HashMap, sync::Arc};

/// An event dispatcher that can be shared between threads.
///
/// # Example
///
/// ```rust
/// use hearken_core::Event;
/// use hearken_std::SharedDispatcher;
/// use std::sync::Arc;
///
/// struct Tick {
///     count: u32,
/// }
///
/// impl Event for Tick {}
///
/// let dispatcher = Arc::new(SharedDispatcher::new());
/// dispatcher.on(|e: &mut Tick| e.count += 1);
///
/// let worker = {
///     let dispatcher = Arc::clone(&dispatcher);
///     std::thread::spawn(move || dispatcher.emit(Tick { count: 0 }).count)
/// };
/// assert_eq!(worker.join().unwrap(), 1);
/// ```
#[derive(Default)]
pub struct SharedDispatcher {
    registries: RwLock<RegistryMap>,
}

impl SharedDispatcher {
    /// Create a dispatcher with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher with room for `kinds` event kinds.
    pub fn with_capacity(kinds: usize) -> Self {
        Self {
            registries: RwLock::new(HashMap::with_capacity(kinds)),
        }
    }

    /// Appends `listener` to the listeners of `E`.
    pub fn register<E: Event>(&self, listener: SharedListener<E>) {
        let mut registries = self.registries.write();
        let registry = erased::typed_entry::<E>(&mut registries);
        registry.push(listener);
        tracing::trace!(
            kind = %registry.kind(),
            listeners = registry.len(),
            "listener registered"
        );
    }

    /// Registers any listener and returns the handle needed to remove it.
    pub fn on<E, L>(&self, listener: L) -> SharedListener<E>
    where
        E: Event,
        L: Listener<E>,
    {
        let listener = listener.shared();
        self.register(listener.clone());
        listener
    }

    /// Registers a listener whose kind is only known as a runtime tag.
    pub fn register_erased(
        &self,
        kind: EventKind,
        listener: ErasedListener,
    ) -> Result<(), RegisterError> {
        erased::check_kind(kind, &listener)?;
        let listeners = erased::insert_erased(&mut self.registries.write(), kind, listener)?;
        tracing::trace!(kind = %kind, listeners, "listener registered");
        Ok(())
    }

    /// Removes the first registration of `listener` for `E`, by identity.
    pub fn remove_listener<E: Event>(&self, listener: &SharedListener<E>) -> bool {
        let mut registries = self.registries.write();
        let Some(registry) = erased::typed_mut::<E>(&mut registries) else {
            return false;
        };
        let removed = registry.remove(listener);
        if removed {
            tracing::trace!(
                kind = %registry.kind(),
                listeners = registry.len(),
                "listener removed"
            );
        }
        removed
    }

    /// Removes every listener of `E`, returning how many there were.
    pub fn clear<E: Event>(&self) -> usize {
        self.clear_kind(EventKind::of::<E>())
    }

    /// Removes every listener of the kind named by `kind`.
    pub fn clear_kind(&self, kind: EventKind) -> usize {
        let cleared = self
            .registries
            .write()
            .get_mut(&kind.id())
            .map(|registry| registry.clear());
        // The guard is gone; dropping `cleared` may re-enter the dispatcher.
        cleared.map_or(0, |cleared| cleared.len())
    }

    /// The composed handler of `E` as of now.
    ///
    /// The handler keeps working after the lock is released and is not
    /// affected by later registrations or removals.
    pub fn snapshot<E: Event>(&self) -> ComposedHandler<E> {
        erased::typed::<E>(&self.registries.read())
            .map(|registry| registry.composed().clone())
            .unwrap_or_default()
    }

    /// Runs every listener of `E` against `event`, in registration order.
    pub fn dispatch<E: Event>(&self, event: &mut E) {
        let handler = self.snapshot::<E>();
        if handler.is_empty() {
            return;
        }
        let kind = EventKind::of::<E>();
        tracing::trace!(
            kind = %kind,
            listeners = handler.len(),
            "emitting event"
        );
        handler.call(event);
    }

    /// Dispatches `event` and returns it with every listener's mutations
    /// applied.
    pub fn emit<E: Event>(&self, mut event: E) -> E {
        self.dispatch(&mut event);
        event
    }

    /// Dispatches an event classified by its runtime type.
    ///
    /// Returns `false` if that type never had a listener registered.
    pub fn emit_any(&self, event: &mut dyn Any) -> bool {
        let handler: Option<Arc<dyn ErasedHandler>> = self
            .registries
            .read()
            .get(&(*event).type_id())
            .map(|registry| registry.erased_handler());
        handler.is_some_and(|handler| handler.call_any(event))
    }

    /// Number of listeners registered for `E`.
    pub fn listener_count<E: Event>(&self) -> usize {
        self.listener_count_of(EventKind::of::<E>())
    }

    /// Number of listeners registered for the kind named by `kind`.
    pub fn listener_count_of(&self, kind: EventKind) -> usize {
        self.registries
            .read()
            .get(&kind.id())
            .map_or(0, |registry| registry.len())
    }

    /// Returns `true` if at least one listener is registered for `E`.
    pub fn has_listeners<E: Event>(&self) -> bool {
        self.listener_count::<E>() > 0
    }

    /// Kinds that currently have at least one listener.
    pub fn kinds(&self) -> Vec<EventKind> {
        self.registries
            .read()
            .values()
            .filter(|registry| registry.len() > 0)
            .map(|registry| registry.kind())
            .collect()
    }
}

impl Dispatcher for SharedDispatcher {
    fn dispatch<E: Event>(&self, event: &mut E) {
        SharedDispatcher::dispatch(self, event);
    }

    fn listener_count<E: Event>(&self) -> usize {
        SharedDispatcher::listener_count::<E>(self)
    }
}

impl std::fmt::Debug for SharedDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.registries
                    .read()
                    .values()
                    .map(|registry| (registry.kind(), registry.len())),
            )
            .finish()
    }
}
