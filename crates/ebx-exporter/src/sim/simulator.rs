use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

use crate::config::SimulationSection;
use crate::obs::metrics::ExporterMetrics;

use super::source::{BusinessSample, RandomSource, TelemetrySource};

/// Perpetual writer into the metric registry. Never reads it, never fails.
pub struct Simulator<S> {
    metrics: Arc<ExporterMetrics>,
    source: S,
    interval: Duration,
    ticks: u64,
}

impl Simulator<RandomSource> {
    pub fn from_config(metrics: Arc<ExporterMetrics>, cfg: &SimulationSection) -> Self {
        Self::new(metrics, RandomSource::from_config(cfg), cfg.tick_interval())
    }
}

impl<S: TelemetrySource> Simulator<S> {
    pub fn new(metrics: Arc<ExporterMetrics>, source: S, interval: Duration) -> Self {
        Self { metrics, source, interval, ticks: 0 }
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// One tick: count a transaction, redraw sessions, then sleep a random
    /// delay and record the measured time. Does not include the pause between ticks.
    pub async fn tick(&mut self) {
        self.metrics.record_transaction();

        let sessions = self.source.active_sessions();
        self.metrics.set_active_sessions(sessions);

        let delay = self.source.request_delay();
        let started = Instant::now();
        sleep(delay).await;
        let elapsed = started.elapsed();
        self.metrics.observe_duration(elapsed);

        if self.metrics.business().is_some() {
            let sample = self.source.business_sample();
            self.record_business(&sample);
        }

        self.ticks += 1;
        tracing::debug!(
            tick = self.ticks,
            sessions,
            ?elapsed,
            "simulation tick"
        );
    }

    fn record_business(&self, s: &BusinessSample) {
        let Some(b) = self.metrics.business() else { return };

        b.transactions_by_type
            .inc(&[("transaction_type", s.transaction_type), ("status", s.status)]);
        for (currency, balance) in &s.balances {
            b.account_balance.set(&[("currency", *currency)], *balance);
        }
        b.endpoint_duration.observe(&[("endpoint", s.endpoint)], s.endpoint_duration);
        b.login_attempts.inc(&[("status", s.login_status)]);
        if let Some(amount) = s.transfer_amount {
            b.transfer_amount.observe(amount);
        }
        if let Some(error_type) = s.api_error {
            b.api_errors.inc(&[("error_type", error_type)]);
        }
        b.database_connections.set(s.database_connections as f64);
    }

    /// Tick, pause, repeat. Runs until the process exits.
    pub async fn run(mut self) {
        tracing::info!(interval = ?self.interval, "simulation loop started");
        loop {
            self.tick().await;
            sleep(self.interval).await;
        }
    }
}

impl<S: TelemetrySource + 'static> Simulator<S> {
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
