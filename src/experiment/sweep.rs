//! The interpolator sweep.
//!
//! For each number of vanishing moments a dense reference grid of phi is
//! built once; then phi is resampled at every coarser level, every
//! applicable scheme is fitted to those samples, and its sup-norm error
//! against the reference is recorded in a CSV and a [`ConvergenceTable`].

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::SweepConfig;
use crate::error::{Result, SweepError};
use crate::experiment::metrics;
use crate::interpolation::{self, GridSamples, Method};
use crate::logging;
use crate::real::{cast, convert_slice, Real};
use crate::report::{ConvergenceCsv, ConvergenceTable, SweepSummary};
use crate::wavelet::DaubechiesScaling;

/// Everything a finished sweep produced.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    pub run_id: String,
    pub tables: Vec<ConvergenceTable>,
    pub csv_files: Vec<PathBuf>,
    pub summary_file: Option<PathBuf>,
}

/// Run the sweep over `config.p_min..=config.p_max` in precision `T`.
pub fn run_sweep<T: Real>(config: &SweepConfig) -> Result<SweepOutcome> {
    if config.p_min < 2 || config.p_min > config.p_max {
        return Err(SweepError::invalid(
            "p",
            format!("empty or invalid range {}..={}", config.p_min, config.p_max),
        ));
    }
    std::fs::create_dir_all(&config.output_dir)?;

    let run_id = logging::generate_run_id();
    info!(
        run_id = %run_id,
        precision = T::NAME,
        p_min = config.p_min,
        p_max = config.p_max,
        r_max = config.r_max,
        output_dir = %config.output_dir.display(),
        "Starting interpolator sweep"
    );

    let mut summary = SweepSummary::new(
        run_id.clone(),
        config.precision,
        config.p_min,
        config.p_max,
        config.r_max,
    );
    let mut tables = Vec::new();
    let mut csv_files = Vec::new();

    for p in config.p_min..=config.p_max {
        let start = Instant::now();
        logging::log_operation_start("find_best_interpolator", p);
        let result = find_best_interpolator::<T>(p, config.r_max, &config.output_dir);
        logging::log_operation_end("find_best_interpolator", p, start, result.is_ok());
        let (table, path) = result?;
        summary.push(&table);
        tables.push(table);
        csv_files.push(path);
    }

    let summary_file = if config.write_summary {
        let path = summary.write(&config.output_dir)?;
        info!(path = %path.display(), "Wrote sweep summary");
        Some(path)
    } else {
        None
    };

    Ok(SweepOutcome {
        run_id,
        tables,
        csv_files,
        summary_file,
    })
}

/// Compare every scheme applicable to `p` at levels `2..r_max-1` against a
/// reference at level `r_max`, writing `daubechies_<p>_scaling_convergence.csv`
/// into `output_dir`.
pub fn find_best_interpolator<T: Real>(
    p: usize,
    r_max: u32,
    output_dir: &Path,
) -> Result<(ConvergenceTable, PathBuf)> {
    if r_max < 4 {
        return Err(SweepError::invalid("r_max", format!("must be at least 4, got {}", r_max)));
    }
    let scaling = DaubechiesScaling::new(p)?;

    info!("Computing phi_dense for p = {} at level {}", p, r_max);
    let dense = logging::log_timed_operation("reference_grid", p, r_max, || scaling.sample(0, r_max))?;
    logging::log_grid_stats::<f64>(p, 0, r_max, dense.len());
    let phi_dense: Vec<T> = convert_slice(&dense);
    drop(dense);
    let dx_dense = cast::<T>(scaling.support_end() as f64) / cast::<T>((phi_dense.len() - 1) as f64);
    let floor = metrics::roundoff_floor(&phi_dense);
    debug!(p = p, floor = %floor, "Roundoff floor of the reference grid");

    let methods = Method::for_p(p);
    let levels: Vec<u32> = (2..r_max - 1).collect();
    let max_derivative = methods.iter().map(|m| m.derivatives_needed()).max().unwrap_or(0);

    let mut csv = ConvergenceCsv::create(output_dir, p, &methods)?;
    let mut table =
        ConvergenceTable::new(p, methods.clone(), levels.clone()).with_roundoff_floor(floor.to_f64_lossy());

    for &r in &levels {
        let samples = GridSamples::<T>::from_scaling(&scaling, r, max_derivative)?;
        logging::log_grid_stats::<T>(p, max_derivative, r, samples.len());
        info!("dx = 1/{} = {}", 1u64 << r, samples.spacing());

        let mut errors = Vec::with_capacity(methods.len());
        for &method in &methods {
            let interp = interpolation::build(method, &samples)?;
            let sup = metrics::sup_error(interp.as_ref(), &phi_dense, dx_dense);
            debug!(p = p, r = r, method = %method, sup = %sup, "Measured sup error");
            errors.push(sup);
        }

        csv.write_row(r, &errors)?;
        table.record(r, &errors)?;
        log_ranking(p, r, &methods, &errors, floor);
    }

    let path = csv.finish()?;
    info!(path = %path.display(), "Wrote convergence table");
    Ok((table, path))
}

fn log_ranking<T: Real>(p: usize, r: u32, methods: &[Method], errors: &[T], floor: T) {
    let pairs: Vec<(Method, T)> = methods.iter().copied().zip(errors.iter().copied()).collect();
    let ranked = metrics::rank(&pairs);
    let digits = T::DIGITS10 + 3;
    for (method, error) in &ranked {
        info!("{:.*} is error of {}", digits, error, method.display_name());
    }
    let best = ranked.first().map(|(m, _)| m.display_name()).unwrap_or("none");
    info!("The best method for p = {} is the {}", p, best);
    if let Some(&(_, error)) = ranked.first() {
        if error <= floor {
            warn!(
                "Best error {:e} at r = {} is below the roundoff floor {:e}; this ranking is rounding noise",
                error, r, floor
            );
        }
    }
}
