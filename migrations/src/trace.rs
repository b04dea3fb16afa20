//! Tracing hooks for statement and transaction observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! The macros expand to nothing when the feature is disabled, so call sites
//! need no `#[cfg]` of their own.

/// Emit a debug-level event with the SQL text and bound parameter count.
///
/// ```ignore
/// snowdrift_trace_statement!(&sql, params.len());
/// ```
macro_rules! snowdrift_trace_statement {
    ($sql:expr, $param_count:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(sql = %$sql, params = $param_count, "snowdrift.statement");
    };
}

/// Emit an info-level event for a transaction step (begin, commit, rollback).
macro_rules! snowdrift_trace_tx {
    ($event:literal) => {
        #[cfg(feature = "tracing")]
        ::tracing::info!(event = $event, "snowdrift.transaction");
    };
}

/// Emit a debug-level event when SQL is written to the output sink instead of run.
macro_rules! snowdrift_trace_simulated {
    ($sql:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(sql = %$sql, "snowdrift.simulated");
    };
}

pub(crate) use {snowdrift_trace_simulated, snowdrift_trace_statement, snowdrift_trace_tx};
