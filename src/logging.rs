//! Structured logging utilities for the debug-info core.
//!
//! Helper functions for consistent, structured logging across the crate
//! using the `tracing` crate.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber with an env-filter.
///
/// Host applications that install their own subscriber should skip this.
pub fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(fmt_layer)
        .try_init()
        .ok();
}

/// Log completion of a function-index pass over a module binary.
pub fn log_function_index_built(functions: usize, imported: usize) {
    tracing::debug!(functions, imported, "Function index built");
}

/// Log a disassembly render, including whether it was truncated.
pub fn log_disassembly_rendered(source_id: &str, lines: usize, truncated: bool) {
    tracing::debug!(source = source_id, lines, truncated, "Disassembly rendered");
}

/// Log a successful debug-info bundle load.
pub fn log_debug_info_loaded(source_id: &str, roots: usize) {
    tracing::info!(source = source_id, roots, "Debug info loaded");
}

/// Log a source id that carries no debug info (the miss is cached).
pub fn log_debug_info_missing(source_id: &str) {
    tracing::debug!(source = source_id, "No debug info for source; caching miss");
}

/// Log the outcome of a scope resolution at a given PC.
pub fn log_scopes_resolved(pc: u64, scopes: usize) {
    tracing::debug!(pc, scopes, "Scopes resolved");
}

/// Log an explicit cache clear on session teardown.
pub fn log_cache_cleared(cache: &str, entries: usize) {
    tracing::info!(cache, entries, "Cache cleared");
}
