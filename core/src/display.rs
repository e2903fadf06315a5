//! Where outcomes end up.

use std::sync::{Mutex, PoisonError};

/// Renders one value, replacing whatever was rendered before.
pub trait DisplaySink {
    fn render(&self, value: &str);
}

impl<F: Fn(&str)> DisplaySink for F {
    fn render(&self, value: &str) {
        self(value)
    }
}

/// In-memory sink that keeps every rendered value in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    rendered: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// What is on display now: the last value rendered.
    pub fn current(&self) -> Option<String> {
        self.lock().last().cloned()
    }

    pub fn history(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.rendered.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DisplaySink for MemorySink {
    fn render(&self, value: &str) {
        self.lock().push(value.to_string());
    }
}
