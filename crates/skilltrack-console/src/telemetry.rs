//! Diagnostics for the console.
//!
//! Structured logging goes through the `tracing` ecosystem and is written to
//! stderr, so stdout carries only the output panel and the skills list.
//!
//! ## Behavior
//!
//! - Filtering rules come from `RUST_LOG`, defaulting to `info`.
//! - Events carry file and line metadata.
//! - Timestamps use local time (RFC 3339 format).

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global `tracing-subscriber`.
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init_tracing() {
    let _ = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_timer(fmt::time::ChronoLocal::rfc_3339())
        .try_init();
}
