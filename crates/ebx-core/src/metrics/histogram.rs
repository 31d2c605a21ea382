use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{ExporterError, Result};

use super::text::{fmt_value, write_header, write_sample};

#[derive(Debug)]
struct HistogramState {
    // Cumulative: buckets[i] counts observations <= bounds[i].
    buckets: Vec<u64>,
    sum: f64,
    count: u64,
}

/// Fixed-bucket histogram.
///
/// Each series sits behind its own lock, held only for the update or the read,
/// so a render never sees a bucket that disagrees with `_count`.
#[derive(Debug)]
pub struct Histogram {
    bounds: Arc<[f64]>,
    state: Mutex<HistogramState>,
}

/// Point-in-time copy of a histogram series.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    /// `(upper bound, cumulative count)` in ascending bound order, `+Inf` excluded.
    pub buckets: Vec<(f64, u64)>,
    pub sum: f64,
    pub count: u64,
}

impl HistogramSnapshot {
    /// Cumulative count for the bucket with upper bound `le`.
    pub fn bucket(&self, le: f64) -> Option<u64> {
        self.buckets.iter().find(|(b, _)| *b == le).map(|(_, c)| *c)
    }
}

/// Bounds must be non-empty, finite, and strictly increasing.
pub(crate) fn validate_bounds(bounds: &[f64]) -> Result<Arc<[f64]>> {
    if bounds.is_empty() {
        return Err(ExporterError::InvalidMetric("histogram needs at least one bucket".into()));
    }
    if bounds.iter().any(|b| !b.is_finite()) {
        return Err(ExporterError::InvalidMetric(
            "histogram bucket bounds must be finite (+Inf is implicit)".into(),
        ));
    }
    if bounds.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ExporterError::InvalidMetric(format!(
            "histogram bucket bounds must be strictly increasing: {bounds:?}"
        )));
    }
    Ok(Arc::from(bounds))
}

impl Histogram {
    pub fn new(bounds: &[f64]) -> Result<Self> {
        Ok(Self::with_bounds(validate_bounds(bounds)?))
    }

    pub(crate) fn with_bounds(bounds: Arc<[f64]>) -> Self {
        let state = HistogramState {
            buckets: vec![0; bounds.len()],
            sum: 0.0,
            count: 0,
        };
        Self { bounds, state: Mutex::new(state) }
    }

    fn lock(&self) -> MutexGuard<'_, HistogramState> {
        // Nothing panics while the lock is held; a poisoned guard still holds valid counts.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record one observation. NaN is dropped.
    pub fn observe(&self, v: f64) {
        if v.is_nan() {
            return;
        }
        let mut st = self.lock();
        st.count += 1;
        st.sum += v;
        // Cumulative buckets: increment every bucket whose bound is >= v.
        for (i, &le) in self.bounds.iter().enumerate() {
            if v <= le {
                st.buckets[i] += 1;
            }
        }
    }

    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    pub fn snapshot(&self) -> HistogramSnapshot {
        let st = self.lock();
        HistogramSnapshot {
            buckets: self.bounds.iter().copied().zip(st.buckets.iter().copied()).collect(),
            sum: st.sum,
            count: st.count,
        }
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "histogram");
        render_series(name, "", &self.snapshot(), out);
    }
}

/// Render the `_bucket`/`_sum`/`_count` lines of one series.
pub(crate) fn render_series(name: &str, labels: &str, snap: &HistogramSnapshot, out: &mut String) {
    let bucket_name = format!("{name}_bucket");
    let prefix = if labels.is_empty() { String::new() } else { format!("{labels},") };

    for (le, count) in &snap.buckets {
        let bucket_labels = format!("{}le=\"{}\"", prefix, fmt_value(*le));
        write_sample(out, &bucket_name, &bucket_labels, &count.to_string());
    }
    let inf_labels = format!("{prefix}le=\"+Inf\"");
    write_sample(out, &bucket_name, &inf_labels, &snap.count.to_string());

    write_sample(out, &format!("{name}_sum"), labels, &fmt_value(snap.sum));
    write_sample(out, &format!("{name}_count"), labels, &snap.count.to_string());
}
