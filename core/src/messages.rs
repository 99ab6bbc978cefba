//! Plain-text message feed consumed by the presentation layer.
//!
//! The framework's logging collaborator is deliberately unstructured: a
//! single `add(message)` call with a human-readable string. Ambient
//! diagnostics go through `tracing` instead.

use std::sync::Mutex;

/// Anything that accepts plain-text notifications.
pub trait MessageSink: Send + Sync {
    fn add(&self, message: String);
}

/// In-memory message feed.
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Mutex<Vec<String>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages logged so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("message log poisoned").clone()
    }

    pub fn clear(&self) {
        self.messages.lock().expect("message log poisoned").clear();
    }
}

impl MessageSink for MessageLog {
    fn add(&self, message: String) {
        self.messages.lock().expect("message log poisoned").push(message);
    }
}
