use std::sync::atomic::{AtomicU64, Ordering};

use super::text::{write_header, write_sample};

/// Monotonic counter.
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment by 1.
    pub fn inc(&self) {
        self.add(1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, v: u64) {
        self.value.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "counter");
        write_sample(out, name, "", &self.get().to_string());
    }
}
