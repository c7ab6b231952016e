//! Daubechies scaling functions.
//!
//! This module builds the scaling filter for a given number of vanishing
//! moments and samples the scaling function (and its derivatives) on
//! dyadic grids over its support `[0, 2p - 1]`.

pub mod filter;
pub mod grid;

pub use filter::{daubechies_filter, MAX_VANISHING_MOMENTS};
pub use grid::{dyadic_grid, integer_grid, DyadicGrid};

use crate::error::Result;

/// The scaling function with `p` vanishing moments.
#[derive(Debug, Clone)]
pub struct DaubechiesScaling {
    p: usize,
    filter: Vec<f64>,
}

impl DaubechiesScaling {
    /// Construct the filter for `p` vanishing moments.
    pub fn new(p: usize) -> Result<Self> {
        let filter = daubechies_filter(p)?;
        Ok(Self { p, filter })
    }

    pub fn vanishing_moments(&self) -> usize {
        self.p
    }

    pub fn filter(&self) -> &[f64] {
        &self.filter
    }

    /// Right end of the support; the left end is 0.
    pub fn support_end(&self) -> usize {
        2 * self.p - 1
    }

    /// A grid of `phi^(derivative)` at level 0, ready to be refined.
    pub fn grid(&self, derivative: usize) -> Result<DyadicGrid> {
        DyadicGrid::new(&self.filter, derivative)
    }

    /// Samples of `phi^(derivative)` at spacing `2^-levels`.
    pub fn sample(&self, derivative: usize, levels: u32) -> Result<Vec<f64>> {
        let mut grid = self.grid(derivative)?;
        grid.refine_to(levels);
        Ok(grid.into_values())
    }

    /// Number of samples in a grid with `levels` refinements.
    pub fn grid_len(&self, levels: u32) -> usize {
        self.support_end() * (1usize << levels) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaling_support() {
        let phi = DaubechiesScaling::new(4).unwrap();
        assert_eq!(phi.vanishing_moments(), 4);
        assert_eq!(phi.filter().len(), 8);
        assert_eq!(phi.support_end(), 7);
        assert_eq!(phi.grid_len(3), 57);
        assert_eq!(phi.sample(0, 3).unwrap().len(), 57);
    }

    #[test]
    fn test_sample_matches_free_function() {
        let phi = DaubechiesScaling::new(3).unwrap();
        let a = phi.sample(1, 4).unwrap();
        let b = dyadic_grid(3, 1, 4).unwrap();
        assert_eq!(a, b);
    }
}
