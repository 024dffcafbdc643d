//! # Listener
//!
//! A listener is the unit of behaviour attached to one event kind. It
//! receives the event by mutable reference, so it can both observe and
//! rewrite it; the next listener in line and the emitting caller see the
//! result.
//!
//! Listeners are registered as [`SharedListener`] handles. The handle's
//! allocation is the listener's identity: two closures with identical bodies
//! are still two different listeners, and removal targets exactly the handle
//! that was registered.

use crate::event::Event;
use std::sync::Arc;

/// A unit of behaviour triggered by events of kind `E`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Listener` for `{E}`",
    label = "missing `Listener` implementation",
    note = "Listeners implement `on_event(&self, &mut {E})`, or are closures `Fn(&mut {E})`."
)]
pub trait Listener<E: Event>: Send + Sync + 'static {
    /// Called once per emitted event.
    fn on_event(&self, event: &mut E);

    /// Chains this listener with another listener for the same kind.
    ///
    /// `next` runs after `self` and observes its mutations.
    fn and_then<Next>(self, next: Next) -> Chain<Self, Next>
    where
        Self: Sized,
        Next: Listener<E>,
    {
        Chain {
            first: self,
            second: next,
        }
    }

    /// Converts the listener into a registration handle.
    fn shared(self) -> SharedListener<E>
    where
        Self: Sized,
    {
        Arc::new(self)
    }
}

/// Reference-counted, type-erased listener handle.
///
/// Cloning the handle does not create a new listener; every clone refers to
/// the same registration identity.
pub type SharedListener<E> = Arc<dyn Listener<E>>;

/// Wraps a listener into a [`SharedListener`].
///
/// # Example
///
/// ```rust
/// use hearken_core::{Event, Listener, listener};
///
/// struct Simple {
///     value: i32,
/// }
///
/// impl Event for Simple {}
///
/// let reset = listener(|e: &mut Simple| e.value = 0);
/// let mut event = Simple { value: 7 };
/// reset.on_event(&mut event);
/// assert_eq!(event.value, 0);
/// ```
pub fn listener<E, L>(listener: L) -> SharedListener<E>
where
    E: Event,
    L: Listener<E>,
{
    Arc::new(listener)
}

/// Returns `true` if both handles refer to the same listener instance.
///
/// Only the allocation address is compared, never the vtable.
pub fn same_listener<E: Event>(a: &SharedListener<E>, b: &SharedListener<E>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl<E, F> Listener<E> for F
where
    E: Event,
    F: Fn(&mut E) + Send + Sync + 'static,
{
    fn on_event(&self, event: &mut E) {
        self(event)
    }
}

/// Two listeners run back to back. Created by [`Listener::and_then`].
pub struct Chain<A, B> {
    pub(crate) first: A,
    pub(crate) second: B,
}

impl<A, B, E> Listener<E> for Chain<A, B>
where
    E: Event,
    A: Listener<E>,
    B: Listener<E>,
{
    fn on_event(&self, event: &mut E) {
        self.first.on_event(event);
        self.second.on_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Simple {
        value: i32,
        log: Vec<&'static str>,
    }

    impl Event for Simple {}

    fn simple() -> Simple {
        Simple {
            value: 1,
            log: Vec::new(),
        }
    }

    struct Doubler;

    impl Listener<Simple> for Doubler {
        fn on_event(&self, event: &mut Simple) {
            event.value *= 2;
            event.log.push("double");
        }
    }

    #[test]
    fn test_closure_is_listener() {
        let reset = |e: &mut Simple| e.value = 0;
        let mut event = simple();
        reset.on_event(&mut event);
        assert_eq!(event.value, 0);
    }

    #[test]
    fn test_chain_runs_in_order() {
        let chain = Doubler.and_then(|e: &mut Simple| {
            e.value += 1;
            e.log.push("inc");
        });
        let mut event = simple();
        chain.on_event(&mut event);
        assert_eq!(event.value, 3);
        assert_eq!(event.log, vec!["double", "inc"]);
    }

    #[test]
    fn test_same_listener_is_identity() {
        let a = listener(|e: &mut Simple| e.value = 0);
        let b = listener(|e: &mut Simple| e.value = 0);
        let a_clone = a.clone();

        assert!(same_listener(&a, &a_clone));
        assert!(!same_listener(&a, &b));
    }

    #[test]
    fn test_zero_sized_listeners_have_distinct_identity() {
        let a = Doubler.shared();
        let b = Doubler.shared();
        assert!(!same_listener(&a, &b));
    }
}
