//! daubechies-sweep - find the best interpolator for Daubechies scaling functions
//!
//! This is the main entry point for the daubechies-sweep application.

use anyhow::Context;
use tracing::{error, info, warn};

use daubechies_sweep::config::{RefinementConfig, SweepConfig};
use daubechies_sweep::experiment::{choose_refinement, first_level_within, run_sweep};
use daubechies_sweep::{init_tracing, log_error, Command, Config, Precision, Real};

fn main() -> anyhow::Result<()> {
    // Load configuration
    let (config, command) = Config::load().context("Configuration error")?;

    init_tracing(&config.log_level);

    info!("Starting daubechies-sweep v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    match command {
        Command::Sweep(_) => match config.sweep.precision {
            Precision::F32 => sweep::<f32>(&config.sweep),
            Precision::F64 => sweep::<f64>(&config.sweep),
        },
        Command::Refinement(_) => match config.refinement.precision {
            Precision::F32 => refinement::<f32>(&config.refinement),
            Precision::F64 => refinement::<f64>(&config.refinement),
        },
    }
}

fn sweep<T: Real>(config: &SweepConfig) -> anyhow::Result<()> {
    let outcome = run_sweep::<T>(config).map_err(|e| {
        log_error(&e, "sweep");
        e
    })?;
    for path in &outcome.csv_files {
        info!("Wrote {}", path.display());
    }
    for table in &outcome.tables {
        match table.resolved_best() {
            Some(best) => info!(
                "p = {}: {} wins at r = {} with error {:e}",
                table.p(),
                best.method.display_name(),
                best.r,
                best.error.unwrap_or(f64::INFINITY)
            ),
            None => warn!(
                "p = {}: every level is at or below the roundoff floor {:e}",
                table.p(),
                table.roundoff_floor()
            ),
        }
    }
    info!(run_id = %outcome.run_id, "Sweep finished");
    Ok(())
}

fn refinement<T: Real>(config: &RefinementConfig) -> anyhow::Result<()> {
    let levels = choose_refinement::<T>(config)
        .map_err(|e| {
            log_error(&e, "refinement");
            e
        })
        .with_context(|| format!("Refinement study for p = {} failed", config.p))?;
    info!("Refinement study covered {} levels", levels.len());
    match first_level_within(&levels, T::one()) {
        Some(r) => info!("Hermite interpolant first comes within 1 ULP of phi at r = {}", r),
        None => info!("No level brings the Hermite interpolant within 1 ULP of phi"),
    }
    Ok(())
}
