#![allow(dead_code)]

use hearken::Event;
use std::sync::{Arc, Mutex};

// ============================================================================
// Test Event Types
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Simple {
    pub value: i32,
}

impl Event for Simple {}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Message {
    pub content: String,
}

impl Event for Message {}

// ============================================================================
// Shared Logs
// ============================================================================

/// Append-only log shared between listeners and the test body.
#[derive(Clone, Default)]
pub struct SharedLog(Arc<Mutex<Vec<String>>>);

impl SharedLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}
