//! Piecewise linear interpolation on a dyadic grid.
//!
//! This is the cheapest scheme and the baseline every other one is
//! measured against.

use super::Interpolator;
use crate::error::Result;
use crate::interpolation::common;
use crate::real::{cast, Real};

/// Linear interpolator over samples at `0, h, 2h, ...`
pub struct LinearInterpolator<T> {
    y: Vec<T>,
    inv_h: T,
    end: T,
}

impl<T: Real> LinearInterpolator<T> {
    pub fn new(y: Vec<T>, h: T) -> Result<Self> {
        common::validate_uniform(y.len(), h, 2, "linear")?;
        let end = h * cast::<T>((y.len() - 1) as f64);
        Ok(Self {
            y,
            inv_h: T::one() / h,
            end,
        })
    }
}

impl<T: Real> Interpolator<T> for LinearInterpolator<T> {
    fn value(&self, x: T) -> T {
        if x <= T::zero() || x >= self.end {
            return T::zero();
        }
        let (k, t) = common::locate(x * self.inv_h, self.y.len() - 1);
        (T::one() - t) * self.y[k] + t * self.y[k + 1]
    }

    fn name(&self) -> &str {
        "linear"
    }
}
