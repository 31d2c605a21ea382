//! Exporter-side observability: the named metric registry served on `/metrics`.

pub mod metrics;
