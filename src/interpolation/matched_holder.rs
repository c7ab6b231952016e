//! Interpolation matched to a Hölder-1/2 singularity.
//!
//! Low-order Daubechies scaling functions are not differentiable from the
//! right at dyadic rationals. On each cell this scheme fits
//!
//! ```text
//! f(t) = y_i + a t + b sqrt(t),   t in [0, 1]
//! ```
//!
//! through both end values and the (scaled) derivative at the right end,
//! which gives `b = 2 (Δ - d)` and `a = 2d - Δ` with `Δ = y_{i+1} - y_i`
//! and `d = h y'_{i+1}`.

use super::Interpolator;
use crate::error::Result;
use crate::interpolation::common;
use crate::real::{cast, Real};

/// Square-root-corrected interpolation using values and first derivatives.
pub struct MatchedHolder<T> {
    y: Vec<T>,
    dy: Vec<T>,
    x0: T,
    inv_h: T,
    end: T,
}

impl<T: Real> MatchedHolder<T> {
    /// `y` and `dydx` sampled at `x0 + i h`.
    pub fn new(y: Vec<T>, dydx: Vec<T>, x0: T, h: T) -> Result<Self> {
        common::validate_uniform(y.len(), h, 2, "matched_holder")?;
        common::validate_lengths(&y, &[dydx.as_slice()], "matched_holder")?;
        let dy = dydx.into_iter().map(|d| d * h).collect();
        let end = x0 + h * cast::<T>((y.len() - 1) as f64);
        Ok(Self {
            y,
            dy,
            x0,
            inv_h: T::one() / h,
            end,
        })
    }
}

impl<T: Real> Interpolator<T> for MatchedHolder<T> {
    fn value(&self, x: T) -> T {
        if x < self.x0 || x > self.end {
            return T::zero();
        }
        let (i, t) = common::locate((x - self.x0) * self.inv_h, self.y.len() - 1);
        let t = t.max(T::zero());
        let two = cast::<T>(2.0);
        let d = self.dy[i + 1];
        let diff = self.y[i + 1] - self.y[i];
        self.y[i] + (two * d - diff) * t + two * t.sqrt() * (diff - d)
    }

    fn name(&self) -> &str {
        "matched_holder"
    }
}
