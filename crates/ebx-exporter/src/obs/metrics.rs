//! Named metric registry for the exporter.
//!
//! Holds the core instruments (transactions counter, active sessions gauge,
//! request duration histogram) and, for the extended profile, the labelled
//! business families. Writers are the simulator; the reader is `/metrics`.

use std::time::Duration;

use ebx_core::error::Result;
use ebx_core::metrics::{
    Counter, CounterVec, Gauge, GaugeVec, Histogram, HistogramSnapshot, HistogramVec,
};

use crate::config::Profile;

/// Request duration buckets, seconds.
pub const DURATION_BUCKETS: [f64; 6] = [0.1, 0.2, 0.5, 1.0, 2.0, 5.0];

/// Transfer amount buckets, EUR.
pub const TRANSFER_AMOUNT_BUCKETS: [f64; 7] = [10.0, 50.0, 100.0, 500.0, 1000.0, 5000.0, 10000.0];

struct Family {
    name: String,
    help: &'static str,
}

impl Family {
    fn new(namespace: &str, name: &str, help: &'static str) -> Self {
        let name = if namespace.is_empty() {
            name.to_string()
        } else {
            format!("{namespace}_{name}")
        };
        Self { name, help }
    }
}

/// Labelled families published by the extended profile.
pub struct BusinessMetrics {
    pub transactions_by_type: CounterVec,
    pub account_balance: GaugeVec,
    pub endpoint_duration: HistogramVec,
    pub login_attempts: CounterVec,
    pub transfer_amount: Histogram,
    pub api_errors: CounterVec,
    pub database_connections: Gauge,
    families: [Family; 7],
}

impl BusinessMetrics {
    fn new(namespace: &str) -> Result<Self> {
        Ok(Self {
            transactions_by_type: CounterVec::default(),
            account_balance: GaugeVec::default(),
            endpoint_duration: HistogramVec::new(&DURATION_BUCKETS)?,
            login_attempts: CounterVec::default(),
            transfer_amount: Histogram::new(&TRANSFER_AMOUNT_BUCKETS)?,
            api_errors: CounterVec::default(),
            database_connections: Gauge::new(),
            families: [
                Family::new(
                    namespace,
                    "transactions_by_type_total",
                    "Total number of processed transactions by type and status",
                ),
                Family::new(
                    namespace,
                    "account_balance_total",
                    "Total account balance across all accounts",
                ),
                Family::new(
                    namespace,
                    "endpoint_request_duration_seconds",
                    "Time taken to process requests per endpoint",
                ),
                Family::new(namespace, "login_attempts_total", "Total number of login attempts"),
                Family::new(namespace, "transfer_amount", "Transfer amounts in EUR"),
                Family::new(namespace, "api_errors_total", "Total number of API errors"),
                Family::new(
                    namespace,
                    "database_connections",
                    "Current number of database connections",
                ),
            ],
        })
    }

    fn render(&self, out: &mut String) {
        let [by_type, balance, endpoint, logins, transfer, errors, db] = &self.families;
        self.transactions_by_type.render(&by_type.name, by_type.help, out);
        self.account_balance.render(&balance.name, balance.help, out);
        self.endpoint_duration.render(&endpoint.name, endpoint.help, out);
        self.login_attempts.render(&logins.name, logins.help, out);
        self.transfer_amount.render(&transfer.name, transfer.help, out);
        self.api_errors.render(&errors.name, errors.help, out);
        self.database_connections.render(&db.name, db.help, out);
    }
}

pub struct ExporterMetrics {
    transactions: Counter,
    active_sessions: Gauge,
    request_duration: Histogram,
    business: Option<BusinessMetrics>,
    families: [Family; 3],
}

impl ExporterMetrics {
    pub fn new(namespace: &str, profile: Profile) -> Result<Self> {
        let business = match profile {
            Profile::Basic => None,
            Profile::Extended => Some(BusinessMetrics::new(namespace)?),
        };
        Ok(Self {
            transactions: Counter::new(),
            active_sessions: Gauge::new(),
            request_duration: Histogram::new(&DURATION_BUCKETS)?,
            business,
            families: [
                Family::new(
                    namespace,
                    "transactions_processed_total",
                    "Total number of processed transactions",
                ),
                Family::new(namespace, "active_sessions", "Current number of active sessions"),
                Family::new(
                    namespace,
                    "request_duration_seconds",
                    "Time taken to process requests",
                ),
            ],
        })
    }

    /// Count one processed transaction.
    pub fn record_transaction(&self) {
        self.transactions.inc();
    }

    /// Overwrite the active sessions gauge.
    pub fn set_active_sessions(&self, n: u64) {
        self.active_sessions.set(n as f64);
    }

    /// Record one request duration.
    pub fn observe_duration(&self, d: Duration) {
        self.request_duration.observe(d.as_secs_f64());
    }

    pub fn transactions(&self) -> u64 {
        self.transactions.get()
    }

    pub fn active_sessions(&self) -> f64 {
        self.active_sessions.get()
    }

    pub fn request_duration(&self) -> HistogramSnapshot {
        self.request_duration.snapshot()
    }

    /// Extended families, present only for `Profile::Extended`.
    pub fn business(&self) -> Option<&BusinessMetrics> {
        self.business.as_ref()
    }

    /// Render all families in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let [transactions, sessions, duration] = &self.families;
        self.transactions.render(&transactions.name, transactions.help, &mut out);
        self.active_sessions.render(&sessions.name, sessions.help, &mut out);
        self.request_duration.render(&duration.name, duration.help, &mut out);
        if let Some(business) = &self.business {
            business.render(&mut out);
        }
        out
    }
}
