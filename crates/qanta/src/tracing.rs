//! Logging setup shared by QANTA binaries.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing with a default filter.
///
/// Sets up tracing-subscriber with:
/// - Environment filter (RUST_LOG wins when set)
/// - Compact format suitable for terminal output
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false))
        .init();
}

/// Log segment prefixes.
pub mod prefix {
    /// Answer mapping
    pub const MAP: &str = "⇒";
    /// Reconciliation with manual annotations
    pub const RECONCILE: &str = "⇄";
    /// Reading and writing data files
    pub const IO: &str = "⊔";
}
