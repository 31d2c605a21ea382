//! Labelled metric families.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::error::Result;

use super::histogram::{render_series, validate_bounds, Histogram, HistogramSnapshot};
use super::text::{fmt_value, label_str, write_header, write_sample};

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self.map.entry(label_key(labels)).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value, `None` if the series was never touched.
    pub fn get(&self, labels: &[(&str, &str)]) -> Option<u64> {
        self.map.get(&label_key(labels)).map(|c| c.load(Ordering::Relaxed))
    }

    /// Render in Prometheus text exposition format, series sorted by labels.
    pub fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "counter");
        let mut rows: Vec<(LabelKey, u64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, val) in rows {
            write_sample(out, name, &label_str(&key), &val.to_string());
        }
    }
}

#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl GaugeVec {
    pub fn set(&self, labels: &[(&str, &str)], v: f64) {
        let gauge = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0f64.to_bits()));
        gauge.store(v.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> Option<f64> {
        self.map
            .get(&label_key(labels))
            .map(|g| f64::from_bits(g.load(Ordering::Relaxed)))
    }

    /// Render in Prometheus text exposition format, series sorted by labels.
    pub fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "gauge");
        let mut rows: Vec<(LabelKey, f64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), f64::from_bits(r.value().load(Ordering::Relaxed))))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, val) in rows {
            write_sample(out, name, &label_str(&key), &fmt_value(val));
        }
    }
}

/// Histogram family sharing one bucket layout across all series.
pub struct HistogramVec {
    bounds: Arc<[f64]>,
    map: DashMap<LabelKey, Histogram>,
}

impl HistogramVec {
    pub fn new(bounds: &[f64]) -> Result<Self> {
        Ok(Self {
            bounds: validate_bounds(bounds)?,
            map: DashMap::new(),
        })
    }

    pub fn observe(&self, labels: &[(&str, &str)], v: f64) {
        let bounds = &self.bounds;
        let hist = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| Histogram::with_bounds(Arc::clone(bounds)));
        hist.observe(v);
    }

    pub fn snapshot(&self, labels: &[(&str, &str)]) -> Option<HistogramSnapshot> {
        self.map.get(&label_key(labels)).map(|h| h.snapshot())
    }

    /// Render in Prometheus text exposition format, series sorted by labels.
    pub fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "histogram");
        let mut rows: Vec<(LabelKey, HistogramSnapshot)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().snapshot()))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, snap) in rows {
            render_series(name, &label_str(&key), &snap, out);
        }
    }
}
