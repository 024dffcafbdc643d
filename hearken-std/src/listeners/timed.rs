//! Execution-time budget for listeners.
//!
//! Delivery is synchronous and cannot be interrupted: a listener that never
//! returns stalls the emitting caller. [`Timed`] cannot prevent that, but it
//! reports every invocation that overran its budget, which is how slow
//! listeners are found before they hang anything.

use hearken_core::{Event, EventKind, Listener};
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};

/// A listener wrapper that measures the inner listener and logs a warning
/// when a call takes longer than `budget`.
pub struct Timed<L> {
    inner: L,
    budget: Duration,
    overruns: AtomicU64,
}

impl<L> Timed<L> {
    /// Create a new timed listener.
    pub fn new(inner: L, budget: Duration) -> Self {
        Self {
            inner,
            budget,
            overruns: AtomicU64::new(0),
        }
    }

    /// The configured budget.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// How many calls exceeded the budget so far.
    pub fn overruns(&self) -> u64 {
        self.overruns.load(Ordering::Relaxed)
    }
}

impl<E, L> Listener<E> for Timed<L>
where
    E: Event,
    L: Listener<E>,
{
    fn on_event(&self, event: &mut E) {
        let started = Instant::now();
        self.inner.on_event(event);
        let elapsed = started.elapsed();
        if elapsed > self.budget {
            self.overruns.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(
                kind = %EventKind::of::<E>(),
                ?elapsed,
                budget = ?self.budget,
                "listener exceeded its time budget"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    struct Simple {
        value: i32,
    }

    impl Event for Simple {}

    #[test]
    fn test_fast_listener_within_budget() {
        let timed = Timed::new(|e: &mut Simple| e.value += 1, Duration::from_secs(5));
        let mut event = Simple { value: 0 };
        timed.on_event(&mut event);
        assert_eq!(event.value, 1);
        assert_eq!(timed.overruns(), 0);
    }

    #[test]
    fn test_slow_listener_counted() {
        let timed = Timed::new(
            |e: &mut Simple| {
                thread::sleep(Duration::from_millis(20));
                e.value += 1;
            },
            Duration::from_millis(1),
        );
        let mut event = Simple { value: 0 };
        timed.on_event(&mut event);
        timed.on_event(&mut event);
        assert_eq!(event.value, 2);
        assert_eq!(timed.overruns(), 2);
    }
}
