use std::ops::Range;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::SimulationSection;

pub const TRANSACTION_TYPES: [&str; 4] = ["transfer", "payment", "withdrawal", "deposit"];
pub const TRANSACTION_STATUSES: [(&str, u32); 3] =
    [("success", 85), ("failed", 10), ("pending", 5)];
pub const LOGIN_STATUSES: [(&str, u32); 2] = [("success", 95), ("failed", 5)];
pub const CURRENCIES: [&str; 3] = ["EUR", "USD", "GBP"];
pub const ENDPOINTS: [&str; 4] =
    ["/api/transfer", "/api/balance", "/api/transactions", "/api/login"];
pub const ERROR_TYPES: [&str; 4] = ["timeout", "validation", "authentication", "network"];

const API_ERROR_PROBABILITY: f64 = 0.05;

/// One tick's worth of extended-profile values.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessSample {
    pub transaction_type: &'static str,
    pub status: &'static str,
    /// `(currency, balance)` for every entry of `CURRENCIES`.
    pub balances: Vec<(&'static str, f64)>,
    pub endpoint: &'static str,
    pub endpoint_duration: f64,
    pub login_status: &'static str,
    /// Present only when `transaction_type` is `transfer`.
    pub transfer_amount: Option<f64>,
    pub api_error: Option<&'static str>,
    pub database_connections: u64,
}

/// Supplies the values a simulation tick records.
pub trait TelemetrySource: Send {
    fn active_sessions(&mut self) -> u64;
    fn request_delay(&mut self) -> Duration;
    fn business_sample(&mut self) -> BusinessSample;
}

/// Uniform draws from a `StdRng`.
pub struct RandomSource {
    rng: StdRng,
    sessions: Range<u64>,
    delay_ms: Range<u64>,
}

impl RandomSource {
    /// `sessions` and `delay_ms` are half-open and must be non-empty.
    pub fn new(rng: StdRng, sessions: Range<u64>, delay_ms: Range<u64>) -> Self {
        Self { rng, sessions, delay_ms }
    }

    pub fn from_config(cfg: &SimulationSection) -> Self {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(
            rng,
            cfg.sessions_min..cfg.sessions_max,
            cfg.delay_min_ms..cfg.delay_max_ms,
        )
    }

    fn weighted(&mut self, choices: &[(&'static str, u32)]) -> &'static str {
        let total: u32 = choices.iter().map(|(_, w)| w).sum();
        let mut roll = self.rng.gen_range(0..total);
        for (choice, w) in choices {
            if roll < *w {
                return *choice;
            }
            roll -= w;
        }
        choices.last().map(|(c, _)| *c).unwrap_or_default()
    }

    fn pick(&mut self, choices: &[&'static str]) -> &'static str {
        choices.choose(&mut self.rng).copied().unwrap_or_default()
    }
}

impl TelemetrySource for RandomSource {
    fn active_sessions(&mut self) -> u64 {
        self.rng.gen_range(self.sessions.clone())
    }

    fn request_delay(&mut self) -> Duration {
        Duration::from_millis(self.rng.gen_range(self.delay_ms.clone()))
    }

    fn business_sample(&mut self) -> BusinessSample {
        let transaction_type = self.pick(&TRANSACTION_TYPES);
        let status = self.weighted(&TRANSACTION_STATUSES);
        let balances = CURRENCIES
            .iter()
            .map(|c| (*c, self.rng.gen_range(100_000.0..5_000_000.0)))
            .collect();
        let endpoint = self.pick(&ENDPOINTS);
        let endpoint_duration = self.rng.gen_range(0.05..2.0);
        let login_status = self.weighted(&LOGIN_STATUSES);
        let transfer_amount =
            (transaction_type == "transfer").then(|| self.rng.gen_range(10.0..10_000.0));
        let api_error = if self.rng.gen_bool(API_ERROR_PROBABILITY) {
            Some(self.pick(&ERROR_TYPES))
        } else {
            None
        };
        let database_connections = self.rng.gen_range(10..=50);

        BusinessSample {
            transaction_type,
            status,
            balances,
            endpoint,
            endpoint_duration,
            login_status,
            transfer_amount,
            api_error,
            database_connections,
        }
    }
}
