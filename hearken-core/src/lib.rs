//! # hearken-core
//!
//! Core traits for the Hearken typed event dispatcher.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that defines events and listeners without needing a concrete dispatcher
//! from `hearken-std`.
//!
//! # Building Blocks
//!
//! ## [`Event`] and [`EventKind`]
//!
//! An event kind is a concrete Rust type. Implementing [`Event`] marks a type
//! as dispatchable; [`EventKind`] is the runtime tag of that type, used where
//! the kind is only known at runtime.
//!
//! ## [`Listener`]
//!
//! A listener receives `&mut E` and may mutate it; later listeners and the
//! emitting caller observe those mutations. Every `Fn(&mut E)` closure is a
//! listener. A [`SharedListener`] is the reference-counted handle used to
//! register a listener and later remove it by identity.
//!
//! ## [`Dispatcher`]
//!
//! The emission surface shared by every dispatcher implementation.
//!
//! # Errors
//!
//! [`RegisterError`] is the only error: a listener registered under a runtime
//! kind tag that does not match its event type.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod dispatcher;
mod error;
mod event;
mod listener;

// Re-exports
pub use dispatcher::Dispatcher;
pub use error::RegisterError;
pub use event::{Event, EventKind};
pub use listener::{Chain, Listener, SharedListener, listener, same_listener};
