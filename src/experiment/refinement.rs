//! How finely must phi be tabulated before a Hermite interpolant is
//! accurate to working precision?
//!
//! The reference stays in f64. At each level the samples are rounded to the
//! working type `T`, a cubic (p < 6) or quintic (p >= 6) Hermite
//! interpolant is built, and the worst error is reported both absolutely
//! and in ULPs.

use std::time::Instant;

use tracing::info;

use crate::config::RefinementConfig;
use crate::error::{Result, SweepError};
use crate::experiment::metrics::{self, DistanceReport};
use crate::interpolation::hermite::CardinalHermite;
use crate::interpolation::GridSamples;
use crate::logging;
use crate::real::{cast, convert_slice, Real};
use crate::wavelet::DaubechiesScaling;

/// Below this many vanishing moments the cubic Hermite interpolant is used.
pub const QUINTIC_FROM_P: usize = 6;

/// Outcome at one sampling level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefinementLevel<T> {
    pub r: u32,
    pub dx: T,
    pub report: DistanceReport<T>,
}

/// Run the refinement study described by `config` in precision `T`.
pub fn choose_refinement<T: Real>(config: &RefinementConfig) -> Result<Vec<RefinementLevel<T>>> {
    let p = config.p;
    let r_max = config.r_max;
    if p < 3 {
        return Err(SweepError::invalid("p", format!("refinement needs p >= 3, got {}", p)));
    }
    if r_max < 4 {
        return Err(SweepError::invalid("r_max", format!("must be at least 4, got {}", r_max)));
    }

    info!(
        "Choosing refinement for {} precision Daubechies scaling function with {} vanishing moments.",
        T::NAME,
        p
    );
    let start = Instant::now();
    logging::log_operation_start("choose_refinement", p);
    let scaling = DaubechiesScaling::new(p)?;

    let dense = logging::log_timed_operation("reference_grid", p, r_max, || scaling.sample(0, r_max))?;
    logging::log_grid_stats::<f64>(p, 0, r_max, dense.len());
    let reference: Vec<T> = convert_slice(&dense);
    drop(dense);
    let dx_dense = cast::<T>(scaling.support_end() as f64) / cast::<T>((reference.len() - 1) as f64);
    let threshold = cast::<T>(100.0) * T::epsilon();

    let max_derivative = if p < QUINTIC_FROM_P { 1 } else { 2 };
    let mut levels = Vec::new();
    for r in 2..=r_max - 2 {
        let samples = GridSamples::<T>::from_scaling(&scaling, r, max_derivative)?;
        let dx = samples.spacing();
        info!("dx = 1/{} = {}", 1u64 << r, dx);

        let interp = hermite_for(samples)?;
        let report = metrics::distance_report(&interp, &reference, dx_dense, threshold);
        info!(
            "Float distance at r = {} is {}, sup distance = {}",
            r, report.max_distance, report.sup
        );
        info!(
            "Worst abscissa = {}, worst value = {}, computed = {}",
            report.worst_abscissa, report.worst_value, report.worst_computed
        );
        levels.push(RefinementLevel { r, dx, report });
    }

    logging::log_operation_end("choose_refinement", p, start, true);
    Ok(levels)
}

fn hermite_for<T: Real>(samples: GridSamples<T>) -> Result<CardinalHermite<T>> {
    let h = samples.spacing();
    let mut derivatives = samples.derivatives.into_iter();
    let d1 = derivatives.next().ok_or_else(|| SweepError::Interpolation {
        message: "refinement needs phi'".to_string(),
    })?;
    match derivatives.next() {
        Some(d2) => CardinalHermite::quintic(samples.values, d1, d2, T::zero(), h),
        None => CardinalHermite::cubic(samples.values, d1, T::zero(), h),
    }
}

/// Smallest level whose worst ULP distance is at most `ulps`.
pub fn first_level_within<T: Real>(levels: &[RefinementLevel<T>], ulps: T) -> Option<u32> {
    levels
        .iter()
        .find(|l| l.report.max_distance <= ulps)
        .map(|l| l.r)
}
