//! PCHIP (Piecewise Cubic Hermite Interpolating Polynomial) interpolation.
//!
//! Slopes follow Fritsch-Carlson: at interior nodes a weighted harmonic mean
//! of the adjacent secants, or zero where the data turns. The endpoint slopes
//! are the one-sided secants.

use super::Interpolator;
use crate::error::Result;
use crate::interpolation::common::{self, HermitePoint};
use crate::real::{cast, Real};

/// Monotonicity-preserving cubic interpolator.
pub struct Pchip<T> {
    x: Vec<T>,
    y: Vec<T>,
    slopes: Vec<T>,
}

impl<T: Real> Pchip<T> {
    /// Build from strictly increasing abscissas `x` and ordinates `y`.
    pub fn new(x: Vec<T>, y: Vec<T>) -> Result<Self> {
        common::validate_abscissas(&x, &y, 4, "pchip")?;
        let slopes = Self::compute_slopes(&x, &y);
        Ok(Self { x, y, slopes })
    }

    fn compute_slopes(x: &[T], y: &[T]) -> Vec<T> {
        let n = x.len();
        let secants: Vec<T> = (0..n - 1)
            .map(|i| (y[i + 1] - y[i]) / (x[i + 1] - x[i]))
            .collect();

        let two = cast::<T>(2.0);
        let mut slopes = vec![T::zero(); n];
        slopes[0] = secants[0];
        slopes[n - 1] = secants[n - 2];

        for k in 1..n - 1 {
            let d0 = secants[k - 1];
            let d1 = secants[k];
            if d0 * d1 <= T::zero() {
                continue;
            }
            let h0 = x[k] - x[k - 1];
            let h1 = x[k + 1] - x[k];
            let w1 = two * h1 + h0;
            let w2 = h1 + two * h0;
            slopes[k] = (w1 + w2) / (w1 / d0 + w2 / d1);
        }
        slopes
    }

    pub fn slopes(&self) -> &[T] {
        &self.slopes
    }
}

impl<T: Real> Interpolator<T> for Pchip<T> {
    fn value(&self, xi: T) -> T {
        let i = common::find_interval(&self.x, xi);
        let point = HermitePoint {
            x0: self.x[i],
            x1: self.x[i + 1],
            y0: self.y[i],
            y1: self.y[i + 1],
            d0: self.slopes[i],
            d1: self.slopes[i + 1],
        };
        common::hermite_eval(&point, xi)
    }

    fn name(&self) -> &str {
        "pchip"
    }
}
