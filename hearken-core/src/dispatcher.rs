//! Dispatcher core trait.

use crate::event::Event;

/// Emission surface shared by every dispatcher.
///
/// Delivery is synchronous: when `dispatch` returns, every listener that was
/// registered for `E` at the start of the call has run exactly once.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot dispatch events",
    label = "missing `Dispatcher` implementation",
    note = "Implement `Dispatcher` to deliver events to registered listeners."
)]
pub trait Dispatcher {
    /// Runs every listener registered for `E` against `event`, in
    /// registration order. A kind with no listeners is a no-op.
    fn dispatch<E: Event>(&self, event: &mut E);

    /// Dispatches `event` and hands the same instance back to the caller.
    fn emit<E: Event>(&self, mut event: E) -> E {
        self.dispatch(&mut event);
        event
    }

    /// Number of listeners currently registered for `E`.
    fn listener_count<E: Event>(&self) -> usize;
}
