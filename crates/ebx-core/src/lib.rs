//! ebx core: metric instruments, text exposition helpers, and the shared error type.
//!
//! This crate carries no runtime or transport dependencies. The exporter crate
//! builds its registry out of these instruments and serves the rendered text.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Instrument updates never fail; construction errors surface as
//! `ExporterError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metrics;

/// Shared result type.
pub use error::{ExporterError, Result};
