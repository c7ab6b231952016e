//! # daubechies-sweep
//!
//! Which interpolation scheme best reconstructs a Daubechies scaling
//! function from samples on a dyadic grid?
//!
//! For each number of vanishing moments `p` the crate builds the scaling
//! filter, tabulates phi (and its derivatives) on a fine dyadic reference
//! grid, then fits a dozen interpolators to coarser samples and measures
//! their sup-norm error against the reference.
//!
//! ## Architecture
//!
//! - **wavelet**: filter construction and the dyadic grid cascade, always in `f64`
//! - **interpolation**: the schemes under comparison, generic over [`Real`]
//! - **experiment**: the sweep, the refinement study and error metrics
//! - **report**: convergence CSVs, the in-memory table and the JSON summary

pub mod config;
pub mod error;
pub mod experiment;
pub mod interpolation;
pub mod logging;
pub mod real;
pub mod report;
pub mod wavelet;

pub use config::{Command, Config, Precision};
pub use error::{Result, SweepError};
pub use interpolation::{Interpolator, Method};
pub use logging::{
    generate_run_id, init_tracing, log_error, log_grid_stats, log_operation_end,
    log_operation_start, log_timed_operation,
};
pub use real::Real;
pub use wavelet::DaubechiesScaling;
