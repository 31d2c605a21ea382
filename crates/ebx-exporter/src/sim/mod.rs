//! Synthetic telemetry: the background loop that feeds the metric registry.
//!
//! - `source`    : where per-tick values come from (random, or fixed in tests)
//! - `simulator` : the tick sequence and the perpetual loop

pub mod simulator;
pub mod source;

pub use simulator::Simulator;
pub use source::{BusinessSample, RandomSource, TelemetrySource};
