//! Logging utilities for daubechies-sweep.
//!
//! Sweeps over large p and fine levels run for minutes; these helpers
//! leave a structured record of which grid was built for which p, how big
//! it was and how long it took.

use std::time::Instant;
use tracing::{debug, error, info, warn};

use uuid::Uuid;

use crate::error::SweepError;
use crate::real::Real;

/// Initialize the tracing subscriber with the given log level.
///
/// `RUST_LOG` wins over `log_level` when set.
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Log the start of a per-p stage of an experiment
pub fn log_operation_start(operation: &str, p: usize) {
    info!(operation = operation, p = p, "Starting operation");
}

/// Log the end of a per-p stage, with its wall time
pub fn log_operation_end(operation: &str, p: usize, start_time: Instant, success: bool) {
    let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    if success {
        info!(operation = operation, p = p, duration_ms = duration_ms, "Operation completed");
    } else {
        warn!(operation = operation, p = p, duration_ms = duration_ms, "Operation failed");
    }
}

/// Run `f`, which builds a grid for `p` at `level`, and log how long it took
pub fn log_timed_operation<F, R>(operation: &str, p: usize, level: u32, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();

    debug!(operation = operation, p = p, level = level, "Starting operation");

    let result = f();

    info!(
        operation = operation,
        p = p,
        level = level,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log the size of a dyadic grid of the `derivative`-th derivative of phi
/// held in precision `T`
pub fn log_grid_stats<T: Real>(p: usize, derivative: usize, level: u32, points: usize) {
    let bytes = points * std::mem::size_of::<T>();
    debug!(
        precision = T::NAME,
        p = p,
        derivative = derivative,
        level = level,
        dx = 1.0 / (1u64 << level) as f64,
        points = points,
        memory_kb = bytes / 1024,
        "Dyadic grid generated"
    );
}

/// Log an error with context
pub fn log_error(error: &SweepError, context: &str) {
    error!(error = %error, context = context, "Error occurred");
}

/// Generate a unique run ID
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}
