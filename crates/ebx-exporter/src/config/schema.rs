use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;

use ebx_core::error::{ExporterError, Result};
use ebx_core::metrics::text::validate_name;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub exporter: ExporterSection,

    #[serde(default)]
    pub simulation: SimulationSection,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            version: 1,
            exporter: ExporterSection::default(),
            simulation: SimulationSection::default(),
        }
    }
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ExporterError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.exporter.validate()?;
        self.simulation.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Prefix joined to every metric name with `_`. Empty means no prefix.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            namespace: default_namespace(),
        }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !self.namespace.is_empty() {
            validate_name(&self.namespace).map_err(|_| {
                ExporterError::Config(format!(
                    "exporter.namespace must match [a-zA-Z_][a-zA-Z0-9_]*: {:?}",
                    self.namespace
                ))
            })?;
            if self.namespace.contains(':') {
                return Err(ExporterError::Config(
                    "exporter.namespace must not contain ':'".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            ExporterError::Config(format!(
                "exporter.listen must be a valid SocketAddr: {}",
                self.listen
            ))
        })
    }
}

/// Which metric set the simulator maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Transactions counter, active sessions gauge, request duration histogram.
    #[default]
    Basic,
    /// Basic plus labelled business metrics (balances, logins, transfers, errors).
    Extended,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Basic => "basic",
            Profile::Extended => "extended",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSection {
    #[serde(default)]
    pub profile: Profile,

    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default = "default_delay_min_ms")]
    pub delay_min_ms: u64,

    #[serde(default = "default_delay_max_ms")]
    pub delay_max_ms: u64,

    #[serde(default = "default_sessions_min")]
    pub sessions_min: u64,

    #[serde(default = "default_sessions_max")]
    pub sessions_max: u64,

    /// Fixed RNG seed; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            tick_interval_ms: default_tick_interval_ms(),
            delay_min_ms: default_delay_min_ms(),
            delay_max_ms: default_delay_max_ms(),
            sessions_min: default_sessions_min(),
            sessions_max: default_sessions_max(),
            seed: None,
        }
    }
}

impl SimulationSection {
    pub fn validate(&self) -> Result<()> {
        if !(10..=60000).contains(&self.tick_interval_ms) {
            return Err(ExporterError::Config(
                "simulation.tick_interval_ms must be between 10 and 60000".into(),
            ));
        }
        if self.delay_max_ms > 10000 {
            return Err(ExporterError::Config(
                "simulation.delay_max_ms must be at most 10000".into(),
            ));
        }
        if self.delay_min_ms >= self.delay_max_ms {
            return Err(ExporterError::Config(
                "simulation.delay_min_ms must be less than delay_max_ms".into(),
            ));
        }
        if self.sessions_min >= self.sessions_max {
            return Err(ExporterError::Config(
                "simulation.sessions_min must be less than sessions_max".into(),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

fn default_listen() -> String {
    "0.0.0.0:9200".into()
}
fn default_namespace() -> String {
    "ebanking".into()
}
fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_delay_min_ms() -> u64 {
    100
}
fn default_delay_max_ms() -> u64 {
    500
}
fn default_sessions_min() -> u64 {
    50
}
fn default_sessions_max() -> u64 {
    200
}
