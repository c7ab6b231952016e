//! Modified Akima interpolation.
//!
//! Node slopes blend the neighbouring secants with weights
//!
//! ```text
//! w1 = |m_{i+1} - m_i| + |m_{i+1} + m_i| / 2
//! w2 = |m_{i-1} - m_{i-2}| + |m_{i-1} + m_{i-2}| / 2
//! s_i = (w1 m_{i-1} + w2 m_i) / (w1 + w2)
//! ```
//!
//! The extra `|m + m|` term suppresses the overshoot of the classic Akima
//! scheme on flat stretches. Two phantom secants are extrapolated
//! quadratically at each end.

use super::Interpolator;
use crate::error::Result;
use crate::interpolation::common::{self, HermitePoint};
use crate::real::{cast, Real};

pub struct Makima<T> {
    x: Vec<T>,
    y: Vec<T>,
    slopes: Vec<T>,
}

impl<T: Real> Makima<T> {
    pub fn new(x: Vec<T>, y: Vec<T>) -> Result<Self> {
        common::validate_abscissas(&x, &y, 4, "makima")?;
        let slopes = Self::compute_slopes(&x, &y);
        Ok(Self { x, y, slopes })
    }

    fn compute_slopes(x: &[T], y: &[T]) -> Vec<T> {
        let n = x.len();
        let two = cast::<T>(2.0);

        // ext[j] holds m_{j-2}.
        let mut ext = Vec::with_capacity(n + 3);
        ext.push(T::zero());
        ext.push(T::zero());
        ext.extend((0..n - 1).map(|i| (y[i + 1] - y[i]) / (x[i + 1] - x[i])));
        ext[1] = two * ext[2] - ext[3];
        ext[0] = two * ext[1] - ext[2];
        let last = ext.len() - 1;
        ext.push(two * ext[last] - ext[last - 1]);
        ext.push(two * ext[last + 1] - ext[last]);

        (0..n).map(|i| Self::blend(&ext[i..i + 4])).collect()
    }

    /// Slope from the secants `[m_{i-2}, m_{i-1}, m_i, m_{i+1}]`.
    fn blend(m: &[T]) -> T {
        let half = cast::<T>(0.5);
        let w1 = (m[3] - m[2]).abs() + (m[3] + m[2]).abs() * half;
        let w2 = (m[1] - m[0]).abs() + (m[1] + m[0]).abs() * half;
        let denom = w1 + w2;
        if denom == T::zero() {
            return T::zero();
        }
        (w1 * m[1] + w2 * m[2]) / denom
    }

    pub fn slopes(&self) -> &[T] {
        &self.slopes
    }
}

impl<T: Real> Interpolator<T> for Makima<T> {
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
        "makima"
    }
}
