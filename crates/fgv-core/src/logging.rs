#![forbid(unsafe_code)]

//! Logging support.
//!
//! With the `tracing` feature enabled this module re-exports the `tracing`
//! macros so downstream code has a single import path; with `tracing-json`
//! it additionally offers a JSON subscriber initializer for production use.
//! Without the feature, call sites in this workspace are compiled out
//! entirely (they are individually `#[cfg(feature = "tracing")]`-gated).

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, trace, trace_span, warn};

/// Install a global JSON-formatted subscriber honoring `RUST_LOG`.
///
/// Returns `false` when a global subscriber was already set.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> bool {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .is_ok()
}
