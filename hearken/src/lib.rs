//! # hearken - Typed In-Process Event Dispatch
//!
//! `hearken` lets callers register typed listeners against an event kind and
//! later emit instances of that kind. Every registered listener runs
//! synchronously, in registration order, on the same mutable event; the
//! caller gets the event back with all mutations applied.
//!
//! ## Quick Start
//!
//! ```rust
//! use hearken::prelude::*;
//!
//! struct Simple {
//!     value: i32,
//! }
//!
//! impl Event for Simple {}
//!
//! let mut dispatcher = EventDispatcher::new();
//! let reset = dispatcher.on(|e: &mut Simple| e.value = 0);
//!
//! assert_eq!(dispatcher.emit(Simple { value: 1 }).value, 0);
//!
//! // Removal is by identity: only the returned handle removes the listener.
//! assert!(dispatcher.remove_listener(&reset));
//! assert_eq!(dispatcher.emit(Simple { value: 1 }).value, 1);
//! ```
//!
//! ## Choosing a Dispatcher
//!
//! - [`EventDispatcher`]: owned by one thread of control; mutation needs
//!   `&mut self`, so nothing can change while an event is in flight.
//! - [`SharedDispatcher`]: `Send + Sync`, usable through `&self` from many
//!   threads; emissions run on a consistent snapshot of the listener list.
//!
//! Both implement [`Dispatcher`], so code that only emits can stay generic.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use hearken_core::{
    // Listener
    Chain,
    // Dispatcher
    Dispatcher,
    // Event
    Event,
    EventKind,
    Listener,
    // Error types
    RegisterError,
    SharedListener,
    listener,
    same_listener,
};

pub use hearken_std::{
    ComposedHandler, ErasedListener, EventDispatcher, ListenerRegistry, SharedDispatcher,
};

/// Standard listener implementations.
pub mod listeners {
    pub use hearken_std::listeners::{LoggingListener, Timed, Traced};
}

/// Testing utilities.
pub mod testing {
    pub use hearken_std::testing::{
        CountingListener, LabelListener, OrderRecorder, RecordingListener,
    };
}

/// Prelude module - common imports for Hearken.
///
/// # Usage
///
/// ```rust
/// use hearken::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Core traits
        Dispatcher,
        Event,
        // Dispatchers
        EventDispatcher,
        EventKind,
        Listener,
        // Errors
        RegisterError,
        SharedDispatcher,
        SharedListener,
        listener,
    };
}

#[cfg(feature = "macros")]
pub use hearken_macros::{Event, listener};
