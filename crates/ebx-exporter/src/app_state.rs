//! Shared application state for the exporter.
//!
//! The registry lives behind an `Arc` so the HTTP handlers and the simulation
//! task hold the same instruments.

use std::sync::Arc;

use ebx_core::error::Result;

use crate::config::ExporterConfig;
use crate::obs::metrics::ExporterMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<ExporterMetrics>,
}

struct AppStateInner {
    cfg: ExporterConfig,
}

impl AppState {
    /// Build application state. Fails only on a bad metric layout.
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        let metrics = ExporterMetrics::new(&cfg.exporter.namespace, cfg.simulation.profile)?;
        Ok(Self {
            inner: Arc::new(AppStateInner { cfg }),
            metrics: Arc::new(metrics),
        })
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> Arc<ExporterMetrics> {
        Arc::clone(&self.metrics)
    }
}
