//! In-process metric instruments rendered in the Prometheus text format.
//!
//! Unlabelled instruments are plain atomics (histograms take a short lock so a
//! series is always read whole). Labelled families are backed by `DashMap` with
//! label pairs flattened into sorted key vectors, so render order is stable.

mod counter;
mod gauge;
mod histogram;
pub mod text;
mod vec;

pub use counter::Counter;
pub use gauge::Gauge;
pub use histogram::{Histogram, HistogramSnapshot};
pub use text::CONTENT_TYPE;
pub use vec::{CounterVec, GaugeVec, HistogramVec};
