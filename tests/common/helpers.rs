//! Common test helpers and utilities

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use tokio::time::timeout;

/// Helper to create test timeouts
pub fn test_timeout() -> Duration {
    Duration::from_secs(5)
}

/// Helper to await a future with a timeout
pub async fn with_timeout<T, F>(duration: Duration, future: F) -> Result<T>
where
    F: Future<Output = T>,
{
    timeout(duration, future)
        .await
        .map_err(|_| anyhow::anyhow!("Operation timed out after {:?}", duration))
}

/// Ordered record of labelled calls, shared between closures
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, label: impl Into<String>) {
        self.entries.lock().unwrap().push(label.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// How many times `label` was recorded
    pub fn count(&self, label: &str) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.as_str() == label)
            .count()
    }

    /// Whether `first` was recorded before `second` (first occurrences)
    pub fn called_before(&self, first: &str, second: &str) -> bool {
        let entries = self.entries.lock().unwrap();
        let position = |label: &str| entries.iter().position(|entry| entry == label);
        matches!((position(first), position(second)), (Some(a), Some(b)) if a < b)
    }
}

/// Shared integer accumulator
#[derive(Debug, Clone, Default)]
pub struct Tally(Arc<Mutex<i64>>);

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to the tally and return the new total
    pub fn add(&self, amount: i64) -> i64 {
        let mut total = self.0.lock().unwrap();
        *total += amount;
        *total
    }

    pub fn get(&self) -> i64 {
        *self.0.lock().unwrap()
    }
}

/// Shared string buffer
#[derive(Debug, Clone, Default)]
pub struct SharedText(Arc<Mutex<String>>);

impl SharedText {
    pub fn new(initial: &str) -> Self {
        Self(Arc::new(Mutex::new(initial.to_string())))
    }

    /// Append to the buffer and return its new contents
    pub fn append(&self, suffix: &str) -> String {
        let mut text = self.0.lock().unwrap();
        text.push_str(suffix);
        text.clone()
    }

    pub fn set(&self, value: &str) {
        *self.0.lock().unwrap() = value.to_string();
    }

    pub fn get(&self) -> String {
        self.0.lock().unwrap().clone()
    }
}
