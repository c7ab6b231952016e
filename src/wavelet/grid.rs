//! Scaling-function samples on integer and dyadic grids.
//!
//! The refinement equation `phi(x) = sum_k c_k phi(2x - k)` with
//! `c_k = sqrt(2) h_k` differentiates to
//!
//! ```text
//! phi^(m)(x) = 2^m sum_k c_k phi^(m)(2x - k)
//! ```
//!
//! Evaluated at the integers this is an eigenproblem whose eigenvector
//! gives `phi^(m)(0..=2p-1)`. Every further application doubles the
//! sampling density.

use nalgebra::{DMatrix, DVector};
use std::f64::consts::SQRT_2;
use tracing::debug;

use crate::error::{Result, SweepError};
use crate::wavelet::filter::daubechies_filter;

/// Values of `phi^(m)` at `0, 1, ..., 2p - 1` for the filter `h`.
///
/// The `2p - 2` interior values solve `(2^m A - I) v = 0` with
/// `A_ij = c_{2i - j}`; one row of that singular system is replaced by the
/// moment condition `sum_j (-j)^m phi^(m)(j) = m!`.
pub fn integer_grid(h: &[f64], derivative: usize) -> Result<Vec<f64>> {
    let taps = h.len();
    if taps < 4 || taps % 2 != 0 {
        return Err(SweepError::invalid(
            "filter",
            format!("expected an even number of at least 4 taps, got {}", taps),
        ));
    }
    let p = taps / 2;
    if derivative >= p {
        return Err(SweepError::invalid(
            "derivative",
            format!(
                "derivative order {} needs more than {} vanishing moments",
                derivative, p
            ),
        ));
    }

    let c: Vec<f64> = h.iter().map(|x| SQRT_2 * x).collect();
    let n = taps - 2;
    let scale = 2f64.powi(derivative as i32);

    let mut a = DMatrix::<f64>::zeros(n, n);
    for row in 0..n - 1 {
        let i = row + 1;
        for col in 0..n {
            let j = col + 1;
            let k = 2 * i as isize - j as isize;
            if k >= 0 && (k as usize) < taps {
                a[(row, col)] = scale * c[k as usize];
            }
        }
        a[(row, row)] -= 1.0;
    }

    let m = derivative as i32;
    for col in 0..n {
        let j = (col + 1) as f64;
        a[(n - 1, col)] = (-j).powi(m);
    }
    let mut b = DVector::<f64>::zeros(n);
    b[n - 1] = factorial(derivative);

    let interior = a.lu().solve(&b).ok_or_else(|| SweepError::Numerical {
        message: format!(
            "integer grid system is singular for p = {}, derivative = {}",
            p, derivative
        ),
    })?;

    let mut values = Vec::with_capacity(taps);
    values.push(0.0);
    values.extend(interior.iter().copied());
    values.push(0.0);
    Ok(values)
}

fn factorial(n: usize) -> f64 {
    (1..=n).map(|k| k as f64).product()
}

/// Samples of `phi^(m)` on `[0, 2p - 1]` at spacing `2^-level`.
#[derive(Debug, Clone)]
pub struct DyadicGrid {
    c: Vec<f64>,
    scale: f64,
    level: u32,
    values: Vec<f64>,
}

impl DyadicGrid {
    /// Start from the integer samples of the `derivative`-th derivative.
    pub fn new(h: &[f64], derivative: usize) -> Result<Self> {
        let values = integer_grid(h, derivative)?;
        Ok(Self {
            c: h.iter().map(|x| SQRT_2 * x).collect(),
            scale: 2f64.powi(derivative as i32),
            level: 0,
            values,
        })
    }

    /// Number of refinements applied so far.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Distance between adjacent samples.
    pub fn spacing(&self) -> f64 {
        1.0 / (1u64 << self.level) as f64
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Halve the sample spacing.
    pub fn refine(&mut self) {
        let prev = &self.values;
        let prev_len = prev.len();
        let half = 1usize << self.level;
        let len = 2 * (prev_len - 1) + 1;

        let mut next = vec![0.0; len];
        for (i, slot) in next.iter_mut().enumerate() {
            if i % 2 == 0 {
                *slot = prev[i / 2];
                continue;
            }
            // phi(i / 2^(level+1)) from phi at level-`level` index i - k * 2^level
            let mut acc = 0.0;
            for (k, &ck) in self.c.iter().enumerate() {
                let offset = k * half;
                if offset > i {
                    break;
                }
                let idx = i - offset;
                if idx < prev_len {
                    acc += ck * prev[idx];
                }
            }
            *slot = self.scale * acc;
        }

        self.values = next;
        self.level += 1;
    }

    /// Refine until `level` is reached.
    pub fn refine_to(&mut self, level: u32) {
        while self.level < level {
            self.refine();
        }
    }
}

/// Samples of `phi^(m)` for `p` vanishing moments at spacing `2^-levels`.
///
/// The result has `(2p - 1) * 2^levels + 1` entries.
pub fn dyadic_grid(p: usize, derivative: usize, levels: u32) -> Result<Vec<f64>> {
    let h = daubechies_filter(p)?;
    let mut grid = DyadicGrid::new(&h, derivative)?;
    grid.refine_to(levels);
    debug!(
        p = p,
        derivative = derivative,
        level = grid.level(),
        spacing = grid.spacing(),
        points = grid.values().len(),
        "Built dyadic grid"
    );
    Ok(grid.into_values())
}
