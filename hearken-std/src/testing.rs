//! Testing utilities for Hearken.
//!
//! This module provides listeners that make assertions about delivery easy.
//!
//! # Features
//!
//! - [`RecordingListener`]: Records a clone of every event it receives
//! - [`CountingListener`]: Counts invocations
//! - [`OrderRecorder`]: A shared log for asserting the order listeners ran in

use hearken_core::{Event, Listener};
use parking_lot::Mutex;
use std::marker::PhantomData;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Listener
// ============================================================================

/// A listener that records a clone of every event it receives.
///
/// The clone is taken when the listener runs, so it shows the event as
/// earlier listeners left it.
///
/// # Example
///
/// ```rust
/// use hearken_core::Event;
/// use hearken_std::{EventDispatcher, testing::RecordingListener};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Simple {
///     value: i32,
/// }
///
/// impl Event for Simple {}
///
/// let recorder = RecordingListener::<Simple>::new();
/// let mut dispatcher = EventDispatcher::new();
/// dispatcher.on(|e: &mut Simple| e.value += 1);
/// dispatcher.on(recorder.clone());
///
/// dispatcher.emit(Simple { value: 1 });
/// assert_eq!(recorder.events(), vec![Simple { value: 2 }]);
/// ```
pub struct RecordingListener<E: Clone> {
    events: Arc<Mutex<Vec<E>>>,
}

impl<E: Clone> RecordingListener<E> {
    /// Create a new recording listener.
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded events.
    pub fn events(&self) -> Vec<E> {
        self.events.lock().clone()
    }

    /// Get the number of recorded events.
    pub fn count(&self) -> usize {
        self.events.lock().len()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl<E: Clone> Default for RecordingListener<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Clone for RecordingListener<E> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

impl<E: Event + Clone> Listener<E> for RecordingListener<E> {
    fn on_event(&self, event: &mut E) {
        self.events.lock().push(event.clone());
    }
}

// ============================================================================
// Counting Listener
// ============================================================================

/// A listener that counts invocations, for any event kind.
///
/// Clones share the same counter.
#[derive(Clone, Default)]
pub struct CountingListener {
    count: Arc<AtomicUsize>,
}

impl CountingListener {
    /// Create a new counting listener.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<E: Event> Listener<E> for CountingListener {
    fn on_event(&self, _event: &mut E) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Order Recorder
// ============================================================================

/// A shared log of labels.
///
/// Each call to [`OrderRecorder::listener`] yields a listener that appends
/// its label when it runs, so the log shows the order listeners fired in.
#[derive(Clone, Default)]
pub struct OrderRecorder {
    log: Arc<Mutex<Vec<&'static str>>>,
}

impl OrderRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener for `E` that appends `label` to the log.
    pub fn listener<E: Event>(&self, label: &'static str) -> LabelListener<E> {
        LabelListener {
            log: Arc::clone(&self.log),
            label,
            _kind: PhantomData,
        }
    }

    /// Snapshot of the log.
    pub fn log(&self) -> Vec<&'static str> {
        self.log.lock().clone()
    }

    /// Clear the log.
    pub fn clear(&self) {
        self.log.lock().clear();
    }
}

/// Listener created by [`OrderRecorder::listener`].
pub struct LabelListener<E> {
    log: Arc<Mutex<Vec<&'static str>>>,
    label: &'static str,
    _kind: PhantomData<fn(&mut E)>,
}

impl<E: Event> Listener<E> for LabelListener<E> {
    fn on_event(&self, _event: &mut E) {
        self.log.lock().push(self.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Simple {
        value: i32,
    }

    impl Event for Simple {}

    #[test]
    fn test_recording_listener_shares_log_between_clones() {
        let recorder = RecordingListener::<Simple>::new();
        let clone = recorder.clone();
        clone.on_event(&mut Simple { value: 3 });

        assert_eq!(recorder.count(), 1);
        assert_eq!(recorder.events(), vec![Simple { value: 3 }]);
        recorder.clear();
        assert_eq!(clone.count(), 0);
    }

    #[test]
    fn test_counting_listener_counts_any_kind() {
        let counter = CountingListener::new();
        Listener::<Simple>::on_event(&counter, &mut Simple { value: 0 });
        Listener::<String>::on_event(&counter, &mut String::new());
        assert_eq!(counter.count(), 2);
        counter.reset();
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_order_recorder_labels() {
        let recorder = OrderRecorder::new();
        let first = recorder.listener::<Simple>("first");
        let second = recorder.listener::<Simple>("second");
        let mut event = Simple { value: 0 };
        second.on_event(&mut event);
        first.on_event(&mut event);
        assert_eq!(recorder.log(), vec!["second", "first"]);
    }
}
