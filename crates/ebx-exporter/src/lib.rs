//! ebx exporter library entry.
//!
//! Wires config, the metric registry, the simulation loop, and the HTTP
//! surface. Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod server;
pub mod sim;
