use std::sync::atomic::{AtomicU64, Ordering};

use super::text::{fmt_value, write_header, write_sample};

/// Overwritable gauge. The `f64` is stored as raw bits in an `AtomicU64`.
#[derive(Debug)]
pub struct Gauge {
    bits: AtomicU64,
}

impl Default for Gauge {
    fn default() -> Self {
        Self { bits: AtomicU64::new(0f64.to_bits()) }
    }
}

impl Gauge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, v: f64) {
        self.bits.store(v.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "gauge");
        write_sample(out, name, "", &fmt_value(self.get()));
    }
}
