//! Type-erased registries and listeners.
//!
//! A dispatcher keeps one [`ListenerRegistry<E>`] per event kind in a single
//! map keyed by `TypeId`. The map stores them behind `ErasedRegistry` and
//! recovers the concrete registry with a checked downcast, so a registry is
//! only ever reached through the type it was created for.
//!
//! [`ErasedListener`] is the registration payload for callers that only know
//! the kind as a runtime [`EventKind`] tag (plugin tables, config-driven
//! wiring). Its declared kind is compared against the tag before anything is
//! stored.

use crate::registry::{ComposedHandler, ListenerRegistry};
use hearken_core::{Event, EventKind, RegisterError, SharedListener};
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::Arc,
};

/// Registries of every kind, keyed by the kind's `TypeId`.
pub(crate) type RegistryMap = HashMap<TypeId, Box<dyn ErasedRegistry>>;

/// The registry of `E`, if one was ever created.
pub(crate) fn typed<E: Event>(map: &RegistryMap) -> Option<&ListenerRegistry<E>> {
    map.get(&TypeId::of::<E>())?.as_any().downcast_ref()
}

/// The registry of `E` for mutation, if one was ever created.
pub(crate) fn typed_mut<E: Event>(map: &mut RegistryMap) -> Option<&mut ListenerRegistry<E>> {
    map.get_mut(&TypeId::of::<E>())?.as_any_mut().downcast_mut()
}

/// The registry of `E`, created empty on first use.
pub(crate) fn typed_entry<E: Event>(map: &mut RegistryMap) -> &mut ListenerRegistry<E> {
    map.entry(TypeId::of::<E>())
        .or_insert_with(|| Box::new(ListenerRegistry::<E>::new()))
        .as_any_mut()
        .downcast_mut()
        .expect("registry keyed by TypeId holds listeners of that type")
}

/// Fails if `listener` consumes a kind other than `kind`.
pub(crate) fn check_kind(kind: EventKind, listener: &ErasedListener) -> Result<(), RegisterError> {
    if listener.kind() == kind {
        Ok(())
    } else {
        Err(RegisterError::TypeMismatch {
            expected: kind,
            found: listener.kind(),
        })
    }
}

/// Appends an erased listener under `kind`, creating the registry if needed.
pub(crate) fn insert_erased(
    map: &mut RegistryMap,
    kind: EventKind,
    listener: ErasedListener,
) -> Result<usize, RegisterError> {
    check_kind(kind, &listener)?;
    let registry = map
        .entry(kind.id())
        .or_insert_with(|| listener.new_registry());
    registry.push_erased(listener)?;
    Ok(registry.len())
}

/// Object-safe view of a [`ListenerRegistry`] of unknown kind.
pub(crate) trait ErasedRegistry: Send + Sync {
    /// Number of registered listeners.
    fn len(&self) -> usize;

    /// The kind this registry serves.
    fn kind(&self) -> EventKind;

    /// Dispatches `event` if it is of this registry's kind.
    fn dispatch_any(&self, event: &mut dyn Any) -> bool;

    /// Snapshot of the composed handler, callable without the registry.
    fn erased_handler(&self) -> Arc<dyn ErasedHandler>;

    /// Appends a listener whose kind is only known at runtime.
    fn push_erased(&mut self, listener: ErasedListener) -> Result<(), RegisterError>;

    /// Removes every listener and hands them back to be dropped.
    fn clear(&mut self) -> Cleared;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<E: Event> ErasedRegistry for ListenerRegistry<E> {
    fn len(&self) -> usize {
        ListenerRegistry::len(self)
    }

    fn kind(&self) -> EventKind {
        EventKind::of::<E>()
    }

    fn dispatch_any(&self, event: &mut dyn Any) -> bool {
        match event.downcast_mut::<E>() {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    fn erased_handler(&self) -> Arc<dyn ErasedHandler> {
        self.composed_arc().clone()
    }

    fn push_erased(&mut self, listener: ErasedListener) -> Result<(), RegisterError> {
        let listener = listener.downcast::<E>().map_err(|rejected| {
            RegisterError::TypeMismatch {
                expected: EventKind::of::<E>(),
                found: rejected.kind(),
            }
        })?;
        self.push(listener);
        Ok(())
    }

    fn clear(&mut self) -> Cleared {
        let listeners = ListenerRegistry::clear(self);
        Cleared {
            count: listeners.len(),
            _listeners: Box::new(listeners),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Listeners taken out of a registry of unknown kind.
///
/// Dropping this value drops the listeners, which may run arbitrary `Drop`
/// code, so it must outlive any lock guarding the registry.
pub(crate) struct Cleared {
    count: usize,
    _listeners: Box<dyn Any + Send>,
}

impl Cleared {
    /// Number of listeners that were removed.
    pub(crate) fn len(&self) -> usize {
        self.count
    }
}

/// Object-safe view of a [`ComposedHandler`] of unknown kind.
pub(crate) trait ErasedHandler: Send + Sync {
    fn call_any(&self, event: &mut dyn Any) -> bool;
}

impl<E: Event> ErasedHandler for ComposedHandler<E> {
    fn call_any(&self, event: &mut dyn Any) -> bool {
        match event.downcast_mut::<E>() {
            Some(event) => {
                self.call(event);
                true
            }
            None => false,
        }
    }
}

/// A listener whose event kind has been erased to a runtime tag.
///
/// # Example
///
/// ```rust
/// use hearken_core::{Event, EventKind, listener};
/// use hearken_std::{EventDispatcher, erased::ErasedListener};
///
/// struct Simple {
///     value: i32,
/// }
///
/// impl Event for Simple {}
///
/// let mut dispatcher = EventDispatcher::new();
/// let erased = ErasedListener::new(listener(|e: &mut Simple| e.value = 0));
/// dispatcher
///     .register_erased(EventKind::of::<Simple>(), erased)
///     .expect("kinds agree");
///
/// assert_eq!(dispatcher.emit(Simple { value: 1 }).value, 0);
/// ```
pub struct ErasedListener {
    kind: EventKind,
    listener: Box<dyn Any + Send + Sync>,
    new_registry: fn() -> Box<dyn ErasedRegistry>,
}

impl ErasedListener {
    /// Erase the kind of a typed listener.
    pub fn new<E: Event>(listener: SharedListener<E>) -> Self {
        Self {
            kind: EventKind::of::<E>(),
            listener: Box::new(listener),
            new_registry: || Box::new(ListenerRegistry::<E>::new()),
        }
    }

    /// The kind this listener consumes.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Recover the typed listener, or give the erased one back if it
    /// consumes a different kind.
    pub fn downcast<E: Event>(self) -> Result<SharedListener<E>, Self> {
        let Self {
            kind,
            listener,
            new_registry,
        } = self;
        match listener.downcast::<SharedListener<E>>() {
            Ok(listener) => Ok(*listener),
            Err(listener) => Err(Self {
                kind,
                listener,
                new_registry,
            }),
        }
    }

    /// An empty registry for this listener's kind.
    fn new_registry(&self) -> Box<dyn ErasedRegistry> {
        (self.new_registry)()
    }
}

impl std::fmt::Debug for ErasedListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErasedListener")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearken_core::listener;

    struct Ping {
        hits: u32,
    }

    impl Event for Ping {}

    struct Pong;

    impl Event for Pong {}

    #[test]
    fn test_downcast_to_declared_kind() {
        let erased = ErasedListener::new(listener(|e: &mut Ping| e.hits += 1));
        assert_eq!(erased.kind(), EventKind::of::<Ping>());
        assert!(erased.downcast::<Ping>().is_ok());
    }

    #[test]
    fn test_downcast_to_other_kind_returns_listener() {
        let erased = ErasedListener::new(listener(|e: &mut Ping| e.hits += 1));
        let Err(rejected) = erased.downcast::<Pong>() else {
            panic!("a Ping listener must not downcast to Pong");
        };
        assert_eq!(rejected.kind(), EventKind::of::<Ping>());
    }

    #[test]
    fn test_push_erased_rejects_foreign_kind() {
        let mut registry = ListenerRegistry::<Pong>::new();
        let erased = ErasedListener::new(listener(|e: &mut Ping| e.hits += 1));

        let err = ErasedRegistry::push_erased(&mut registry, erased).unwrap_err();
        assert_eq!(
            err,
            RegisterError::TypeMismatch {
                expected: EventKind::of::<Pong>(),
                found: EventKind::of::<Ping>(),
            }
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_dispatch_any_checks_kind() {
        let mut registry = ListenerRegistry::<Ping>::new();
        registry.push(listener(|e: &mut Ping| e.hits += 1));

        let mut ping = Ping { hits: 0 };
        let mut pong = Pong;
        assert!(registry.dispatch_any(&mut ping));
        assert!(!registry.dispatch_any(&mut pong));
        assert_eq!(ping.hits, 1);
    }

    #[test]
    fn test_erased_handler_runs_snapshot() {
        let mut registry = ListenerRegistry::<Ping>::new();
        registry.push(listener(|e: &mut Ping| e.hits += 10));
        let handler = registry.erased_handler();

        let mut ping = Ping { hits: 0 };
        assert!(handler.call_any(&mut ping));
        assert_eq!(ping.hits, 10);
    }

    #[test]
    fn test_erased_handler_is_shared_until_mutation() {
        let mut registry = ListenerRegistry::<Ping>::new();
        registry.push(listener(|e: &mut Ping| e.hits += 1));

        let first = registry.erased_handler();
        let second = registry.erased_handler();
        assert!(Arc::ptr_eq(&first, &second));

        registry.push(listener(|e: &mut Ping| e.hits += 1));
        assert!(!Arc::ptr_eq(&first, &registry.erased_handler()));
    }

    #[test]
    fn test_erased_clear_defers_drop_to_caller() {
        let mut registry = ListenerRegistry::<Ping>::new();
        let handle = listener(|e: &mut Ping| e.hits += 1);
        registry.push(handle.clone());

        let cleared = ErasedRegistry::clear(&mut registry);
        assert_eq!(cleared.len(), 1);
        assert_eq!(ErasedRegistry::len(&registry), 0);
        assert_eq!(Arc::strong_count(&handle), 2);
        drop(cleared);
        assert_eq!(Arc::strong_count(&handle), 1);
    }

    #[test]
    fn test_check_kind() {
        let erased = ErasedListener::new(listener(|e: &mut Ping| e.hits += 1));
        assert!(check_kind(EventKind::of::<Ping>(), &erased).is_ok());
        assert_eq!(
            check_kind(EventKind::of::<Pong>(), &erased),
            Err(RegisterError::TypeMismatch {
                expected: EventKind::of::<Pong>(),
                found: EventKind::of::<Ping>(),
            })
        );
    }
}
