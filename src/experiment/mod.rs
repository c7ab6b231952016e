//! The two experiments: the interpolator sweep and the refinement study.

pub mod metrics;
pub mod refinement;
pub mod sweep;

pub use metrics::{distance_report, rank, roundoff_floor, sup_error, DistanceReport};
pub use refinement::{choose_refinement, first_level_within, RefinementLevel};
pub use sweep::{find_best_interpolator, run_sweep, SweepOutcome};
