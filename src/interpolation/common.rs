//! Common utilities for interpolation algorithms.
//!
//! Cell lookup on uniform and non-uniform grids, the centred cardinal
//! B-spline basis, the cubic Hermite cell and a banded linear solver
//! shared by the spline constructions.

use crate::error::{Result, SweepError};
use crate::real::{cast, Real};

/// Split a fractional grid coordinate into a cell index and the offset
/// inside that cell.
///
/// The index is clamped to `[0, cells - 1]`, so points a rounding error past
/// either end are evaluated on the boundary cell.
#[inline]
pub fn locate<T: Real>(s: T, cells: usize) -> (usize, T) {
    let last = cells.saturating_sub(1);
    let k = s.floor();
    let i = if k <= T::zero() {
        0
    } else {
        k.to_usize().unwrap_or(last).min(last)
    };
    (i, s - cast::<T>(i as f64))
}

/// Index `i` such that `x[i] <= xi < x[i + 1]`, clamped to the last interval.
#[inline]
pub fn find_interval<T: Real>(x: &[T], xi: T) -> usize {
    let upper = x.partition_point(|&v| v <= xi);
    upper.saturating_sub(1).min(x.len().saturating_sub(2))
}

/// Check that abscissas are strictly increasing and match `y` in length.
pub fn validate_abscissas<T: Real>(x: &[T], y: &[T], required: usize, context: &str) -> Result<()> {
    if x.len() != y.len() {
        return Err(SweepError::Interpolation {
            message: format!(
                "Shape mismatch in {}: {} abscissas but {} ordinates",
                context,
                x.len(),
                y.len()
            ),
        });
    }
    if x.len() < required {
        return Err(SweepError::Interpolation {
            message: format!(
                "Insufficient data for {}: need at least {}, got {}",
                context,
                required,
                x.len()
            ),
        });
    }
    if x.windows(2).any(|w| !(w[1] > w[0])) {
        return Err(SweepError::Interpolation {
            message: format!("Input x values must be strictly increasing in {}", context),
        });
    }
    Ok(())
}

/// Check a uniform grid: positive finite spacing and enough samples.
pub fn validate_uniform<T: Real>(len: usize, h: T, required: usize, context: &str) -> Result<()> {
    if !(h > T::zero()) || !h.is_finite() {
        return Err(SweepError::invalid(
            "h",
            format!("step size for {} must be positive and finite, got {}", context, h),
        ));
    }
    if len < required {
        return Err(SweepError::Interpolation {
            message: format!(
                "Insufficient data for {}: need at least {}, got {}",
                context, required, len
            ),
        });
    }
    Ok(())
}

/// Check that every derivative array has as many samples as the values.
pub fn validate_lengths<T>(values: &[T], derivatives: &[&[T]], context: &str) -> Result<()> {
    for (order, d) in derivatives.iter().enumerate() {
        if d.len() != values.len() {
            return Err(SweepError::Interpolation {
                message: format!(
                    "Shape mismatch in {}: derivative {} has {} samples, values have {}",
                    context,
                    order + 1,
                    d.len(),
                    values.len()
                ),
            });
        }
    }
    Ok(())
}

/// The centred cardinal B-spline of the given degree, supported on
/// `(-(degree+1)/2, (degree+1)/2)`.
///
/// ```text
/// B_n(x) = 1/n! sum_k (-1)^k C(n+1, k) ((n+1)/2 - k - |x|)_+^n
/// ```
#[inline]
pub fn cardinal_b_spline<T: Real>(degree: usize, x: T) -> T {
    let ax = x.abs();
    let half = cast::<T>((degree + 1) as f64 / 2.0);
    if ax >= half {
        return T::zero();
    }
    let mut sum = T::zero();
    let mut binomial = 1.0;
    for k in 0..=degree + 1 {
        let arg = half - cast::<T>(k as f64) - ax;
        if arg <= T::zero() {
            break;
        }
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        sum = sum + cast::<T>(sign * binomial) * arg.powi(degree as i32);
        binomial = binomial * (degree + 1 - k) as f64 / (k + 1) as f64;
    }
    let factorial: f64 = (1..=degree).map(|k| k as f64).product();
    sum / cast::<T>(factorial)
}

/// A cubic on `[x0, x1]` fixed by its end values and slopes.
pub struct HermitePoint<T> {
    pub x0: T,
    pub x1: T,
    pub y0: T,
    pub y1: T,
    pub d0: T,
    pub d1: T,
}

/// Evaluate the Hermite cubic of `point` at `xi`.
#[inline]
pub fn hermite_eval<T: Real>(point: &HermitePoint<T>, xi: T) -> T {
    let h = point.x1 - point.x0;
    let t = (xi - point.x0) / h;
    let t2 = t * t;
    let t3 = t2 * t;
    let two = cast::<T>(2.0);
    let three = cast::<T>(3.0);

    let h00 = two * t3 - three * t2 + T::one();
    let h10 = t3 - two * t2 + t;
    let h01 = three * t2 - two * t3;
    let h11 = t3 - t2;

    h00 * point.y0 + h10 * h * point.d0 + h01 * point.y1 + h11 * h * point.d1
}

/// A square banded matrix stored row by row.
///
/// Factorisation is Gaussian elimination without pivoting, which keeps the
/// fill-in inside the band; callers only hand it diagonally dominant
/// (or nearly so) spline systems.
#[derive(Debug, Clone)]
pub struct BandedMatrix<T> {
    n: usize,
    lower: usize,
    upper: usize,
    data: Vec<T>,
}

impl<T: Real> BandedMatrix<T> {
    pub fn new(n: usize, lower: usize, upper: usize) -> Self {
        Self {
            n,
            lower,
            upper,
            data: vec![T::zero(); n * (lower + upper + 1)],
        }
    }

    pub fn tridiagonal(n: usize) -> Self {
        Self::new(n, 1, 1)
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> Option<usize> {
        if i >= self.n || j >= self.n || j + self.lower < i || j > i + self.upper {
            return None;
        }
        Some(i * (self.lower + self.upper + 1) + (j + self.lower - i))
    }

    /// Entry `(i, j)`; zero outside the band.
    pub fn get(&self, i: usize, j: usize) -> T {
        self.index(i, j).map(|k| self.data[k]).unwrap_or_else(T::zero)
    }

    /// Set entry `(i, j)`; it must lie inside the band.
    pub fn set(&mut self, i: usize, j: usize, value: T) -> Result<()> {
        let k = self.index(i, j).ok_or_else(|| SweepError::Numerical {
            message: format!(
                "entry ({}, {}) lies outside a band of ({}, {})",
                i, j, self.lower, self.upper
            ),
        })?;
        self.data[k] = value;
        Ok(())
    }

    /// Solve `A x = rhs`, consuming the matrix.
    pub fn solve(mut self, mut rhs: Vec<T>) -> Result<Vec<T>> {
        let n = self.n;
        if rhs.len() != n {
            return Err(SweepError::Numerical {
                message: format!("right-hand side has {} entries, matrix has {} rows", rhs.len(), n),
            });
        }

        for k in 0..n {
            let pivot = self.get(k, k);
            if pivot == T::zero() || !pivot.is_finite() {
                return Err(SweepError::Numerical {
                    message: format!("zero pivot at row {} of a banded solve", k),
                });
            }
            let last_row = (k + self.lower).min(n - 1);
            let last_col = (k + self.upper).min(n - 1);
            for i in k + 1..=last_row {
                let factor = self.get(i, k) / pivot;
                if factor == T::zero() {
                    continue;
                }
                for j in k..=last_col {
                    let pivot_row = self.get(k, j);
                    if let Some(idx) = self.index(i, j) {
                        self.data[idx] = self.data[idx] - factor * pivot_row;
                    }
                }
                rhs[i] = rhs[i] - factor * rhs[k];
            }
        }

        for k in (0..n).rev() {
            let last_col = (k + self.upper).min(n - 1);
            let mut acc = rhs[k];
            for j in k + 1..=last_col {
                acc = acc - self.get(k, j) * rhs[j];
            }
            rhs[k] = acc / self.get(k, k);
        }
        Ok(rhs)
    }
}
