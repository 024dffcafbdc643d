//! Error types for Hearken.
//!
//! Emitting to, removing from, or counting an event kind that has no
//! listeners is never an error. The only failure is a listener handed over
//! under the wrong runtime kind tag, which [`RegisterError`] reports at
//! registration time.

use crate::event::EventKind;
use thiserror::Error;

/// Errors that can occur while registering a listener.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// The listener consumes a different event type than the kind it was
    /// registered under.
    #[error("listener for `{found}` cannot be registered under `{expected}`")]
    TypeMismatch {
        /// The kind the caller asked to register under.
        expected: EventKind,
        /// The kind the listener actually consumes.
        found: EventKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping;
    struct Pong;

    impl crate::Event for Ping {}
    impl crate::Event for Pong {}

    #[test]
    fn test_type_mismatch_message_names_both_kinds() {
        let err = RegisterError::TypeMismatch {
            expected: EventKind::of::<Ping>(),
            found: EventKind::of::<Pong>(),
        };
        let message = err.to_string();
        assert!(message.contains("Ping"));
        assert!(message.contains("Pong"));
    }

    #[test]
    fn test_type_mismatch_is_a_std_error() {
        let err = RegisterError::TypeMismatch {
            expected: EventKind::of::<Ping>(),
            found: EventKind::of::<Pong>(),
        };
        let err: Box<dyn std::error::Error + Send + Sync> = Box::new(err);
        assert!(err.source().is_none());
        assert!(err.to_string().starts_with("listener for"));
    }
}
