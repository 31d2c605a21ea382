//! Top-level facade crate for ebx.
//!
//! Re-exports core types and the exporter library so users can depend on a single crate.

pub mod core {
    pub use ebx_core::*;
}

pub mod exporter {
    pub use ebx_exporter::*;
}
