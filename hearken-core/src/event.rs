//! Event trait and runtime kind tags.

use std::{
    any::{TypeId, type_name},
    fmt,
    hash::{Hash, Hasher},
};

/// A marker trait for types that can be emitted through a dispatcher.
///
/// Each implementing type is its own event kind. Events are handed to
/// listeners by mutable reference, so they need not be `Sync` or `Clone`.
///
/// # Example
///
/// ```rust
/// use hearken_core::{Event, EventKind};
///
/// struct Simple {
///     value: i32,
/// }
///
/// impl Event for Simple {}
///
/// let event = Simple { value: 1 };
/// assert_eq!(event.kind(), EventKind::of::<Simple>());
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Event",
    label = "must implement `Event`",
    note = "Event types must be `Send + 'static`; add `impl Event for {Self} {}` or `#[derive(Event)]`."
)]
pub trait Event: Send + 'static {
    /// The kind of this event.
    fn kind(&self) -> EventKind
    where
        Self: Sized,
    {
        EventKind::of::<Self>()
    }
}

// Common Event implementations
impl Event for () {}
impl Event for String {}
impl Event for &'static str {}
impl<T: Event> Event for Box<T> {}
impl<T: Event> Event for Vec<T> {}
impl<T: Event> Event for Option<T> {}

/// Runtime tag identifying an event kind.
///
/// Two tags are equal exactly when they name the same Rust type. The type
/// name is carried only for diagnostics.
#[derive(Clone, Copy)]
pub struct EventKind {
    id: TypeId,
    name: &'static str,
}

impl EventKind {
    /// The tag of event type `E`.
    pub fn of<E: Event>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: type_name::<E>(),
        }
    }

    /// The `TypeId` of the event type.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The fully qualified name of the event type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if this tag names `E`.
    pub fn is<E: Event>(&self) -> bool {
        self.id == TypeId::of::<E>()
    }
}

impl PartialEq for EventKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EventKind {}

impl Hash for EventKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventKind").field(&self.name).finish()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Simple {
        _value: i32,
    }

    impl Event for Simple {}

    struct Other;

    impl Event for Other {}

    #[test]
    fn test_kind_equality_follows_type() {
        assert_eq!(EventKind::of::<Simple>(), EventKind::of::<Simple>());
        assert_ne!(EventKind::of::<Simple>(), EventKind::of::<Other>());
        assert!(EventKind::of::<Other>().is::<Other>());
        assert!(!EventKind::of::<Other>().is::<Simple>());
    }

    #[test]
    fn test_instance_kind_matches_type_kind() {
        let event = Simple { _value: 1 };
        assert_eq!(event.kind(), EventKind::of::<Simple>());
    }

    #[test]
    fn test_kind_hashes_by_type() {
        let mut set = HashSet::new();
        set.insert(EventKind::of::<Simple>());
        set.insert(EventKind::of::<Simple>());
        set.insert(EventKind::of::<Other>());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_kind_display_uses_type_name() {
        let kind = EventKind::of::<Simple>();
        assert!(kind.to_string().ends_with("Simple"));
        assert_eq!(kind.name(), kind.to_string());
    }
}
