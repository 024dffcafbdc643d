//! Single-threaded event dispatcher.

use crate::{
    erased::{self, ErasedListener, RegistryMap},
    registry::ListenerRegistry,
};
use hearken_core::{Dispatcher, Event, EventKind, Listener, RegisterError, SharedListener};
use std::{any::Any, collections::HashMap};

/// Maps each event kind to its ordered listeners.
///
/// Registration and removal take `&mut self`; emission takes `&self`. The
/// borrow checker therefore guarantees that no listener list changes while an
/// event is being delivered. Use [`SharedDispatcher`] when several threads
/// need to register and emit through the same instance.
///
/// # Example
///
/// ```rust
/// use hearken_core::Event;
/// use hearken_std::EventDispatcher;
///
/// struct Simple {
///     value: i32,
/// }
///
/// impl Event for Simple {}
///
/// let mut dispatcher = EventDispatcher::new();
/// let reset = dispatcher.on(|e: &mut Simple| e.value = 0);
///
/// let event = dispatcher.emit(Simple { value: 1 });
/// assert_eq!(event.value, 0);
///
/// assert!(dispatcher.remove_listener(&reset));
/// assert_eq!(dispatcher.listener_count::<Simple>(), 0);
/// ```
///
/// [`SharedDispatcher`]: crate::SharedDispatcher
#[derive(Default)]
pub struct EventDispatcher {
    registries: RegistryMap,
}

impl EventDispatcher {
    /// Create a dispatcher with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher with room for `kinds` event kinds.
    pub fn with_capacity(kinds: usize) -> Self {
        Self {
            registries: HashMap::with_capacity(kinds),
        }
    }

    /// Appends `listener` to the listeners of `E`.
    ///
    /// Registering the same handle twice makes it fire twice per emission.
    pub fn register<E: Event>(&mut self, listener: SharedListener<E>) {
        let registry = erased::typed_entry::<E>(&mut self.registries);
        registry.push(listener);
        tracing::trace!(
            kind = %registry.kind(),
            listeners = registry.len(),
            "listener registered"
        );
    }

    /// Registers any listener and returns the handle needed to remove it.
    pub fn on<E, L>(&mut self, listener: L) -> SharedListener<E>
    where
        E: Event,
        L: Listener<E>,
    {
        let listener = listener.shared();
        self.register(listener.clone());
        listener
    }

    /// Registers a listener whose kind is only known as a runtime tag.
    ///
    /// Fails without touching the dispatcher if `listener` consumes a kind
    /// other than `kind`.
    pub fn register_erased(
        &mut self,
        kind: EventKind,
        listener: ErasedListener,
    ) -> Result<(), RegisterError> {
        let listeners = erased::insert_erased(&mut self.registries, kind, listener)?;
        tracing::trace!(kind = %kind, listeners, "listener registered");
        Ok(())
    }

    /// Removes the first registration of `listener` for `E`.
    ///
    /// Listeners are matched by identity, so only a clone of the handle that
    /// was registered can remove it. Returns `false` if it is not registered,
    /// including when `E` never had any listener.
    pub fn remove_listener<E: Event>(&mut self, listener: &SharedListener<E>) -> bool {
        let Some(registry) = erased::typed_mut::<E>(&mut self.registries) else {
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
    pub fn clear<E: Event>(&mut self) -> usize {
        erased::typed_mut::<E>(&mut self.registries).map_or(0, |registry| registry.clear().len())
    }

    /// Removes every listener of the kind named by `kind`.
    pub fn clear_kind(&mut self, kind: EventKind) -> usize {
        self.registries
            .get_mut(&kind.id())
            .map_or(0, |registry| registry.clear().len())
    }

    /// Runs every listener of `E` against `event`, in registration order.
    pub fn dispatch<E: Event>(&self, event: &mut E) {
        if let Some(registry) = self.registry::<E>() {
            tracing::trace!(
                kind = %registry.kind(),
                listeners = registry.len(),
                "emitting event"
            );
            registry.dispatch(event);
        }
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
        let Some(registry) = self.registries.get(&(*event).type_id()) else {
            return false;
        };
        tracing::trace!(
            kind = %registry.kind(),
            listeners = registry.len(),
            "emitting event"
        );
        registry.dispatch_any(event)
    }

    /// Number of listeners registered for `E`.
    pub fn listener_count<E: Event>(&self) -> usize {
        self.registry::<E>().map_or(0, ListenerRegistry::len)
    }

    /// Number of listeners registered for the kind named by `kind`.
    pub fn listener_count_of(&self, kind: EventKind) -> usize {
        self.registries
            .get(&kind.id())
            .map_or(0, |registry| registry.len())
    }

    /// Returns `true` if at least one listener is registered for `E`.
    pub fn has_listeners<E: Event>(&self) -> bool {
        self.listener_count::<E>() > 0
    }

    /// Kinds that currently have at least one listener.
    pub fn kinds(&self) -> impl Iterator<Item = EventKind> + '_ {
        self.registries
            .values()
            .filter(|registry| registry.len() > 0)
            .map(|registry| registry.kind())
    }

    /// The listener registry of `E`, if one was ever created.
    pub fn registry<E: Event>(&self) -> Option<&ListenerRegistry<E>> {
        erased::typed::<E>(&self.registries)
    }
}

impl Dispatcher for EventDispatcher {
    fn dispatch<E: Event>(&self, event: &mut E) {
        EventDispatcher::dispatch(self, event);
    }

    fn listener_count<E: Event>(&self) -> usize {
        EventDispatcher::listener_count::<E>(self)
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.registries
                    .values()
                    .map(|registry| (registry.kind(), registry.len())),
            )
            .finish()
    }
}
