//! # hearken-std
//!
//! Standard implementations for the Hearken typed event dispatcher.
//!
//! This crate provides:
//! - **Per-kind storage**: [`ListenerRegistry`], [`ComposedHandler`]
//! - **Dispatchers**: [`EventDispatcher`] (single owner), [`SharedDispatcher`] (thread-safe)
//! - **Runtime-tagged registration**: [`ErasedListener`]
//! - **Standard listeners**: Logging, Traced, Timed
//! - **Testing utilities**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use hearken_core;

// Modules
pub mod dispatcher;
pub mod erased;
pub mod listeners;
pub mod registry;
pub mod shared;
pub mod testing;

pub use dispatcher::EventDispatcher;
pub use erased::ErasedListener;
pub use registry::{ComposedHandler, ListenerRegistry};
pub use shared::SharedDispatcher;
