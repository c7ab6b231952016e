//! Cardinal B-spline interpolation of degree 2, 3 and 5.
//!
//! The interpolant is `s(x) = sum_k a_k B_n((x - x0)/h - k)` with `B_n` the
//! centred cardinal B-spline. Interpolating the `n` samples leaves `n - 1`
//! (odd degree) or one extra (quadratic) coefficient at each end free;
//! those are fixed by endpoint derivatives and eliminated before the banded
//! solve.

use super::Interpolator;
use crate::error::{Result, SweepError};
use crate::interpolation::common::{self, BandedMatrix};
use crate::real::{cast, Real};

/// A uniform B-spline interpolant of fixed degree.
#[derive(Debug, Clone)]
pub struct CardinalBSpline<T> {
    degree: usize,
    /// Coefficients `a_{-pad} .. a_{n-1+pad}`.
    alpha: Vec<T>,
    pad: usize,
    x0: T,
    inv_h: T,
    name: &'static str,
}

impl<T: Real> CardinalBSpline<T> {
    /// Quadratic spline with prescribed first derivatives at both ends.
    pub fn quadratic(y: &[T], x0: T, h: T, left_derivative: T, right_derivative: T) -> Result<Self> {
        common::validate_uniform(y.len(), h, 3, "quadratic_b_spline")?;
        let n = y.len();
        let quarter = cast::<T>(0.25);
        let three_quarters = cast::<T>(0.75);
        let eighth = cast::<T>(0.125);
        let two = cast::<T>(2.0);

        let mut a = BandedMatrix::tridiagonal(n);
        let mut rhs = y.to_vec();
        // a_{-1} = a_1 - 2 h y'(x0), a_n = a_{n-2} + 2 h y'(x_end)
        a.set(0, 0, three_quarters)?;
        a.set(0, 1, quarter)?;
        rhs[0] = y[0] + h * left_derivative * quarter;
        for i in 1..n - 1 {
            a.set(i, i - 1, eighth)?;
            a.set(i, i, three_quarters)?;
            a.set(i, i + 1, eighth)?;
        }
        a.set(n - 1, n - 2, quarter)?;
        a.set(n - 1, n - 1, three_quarters)?;
        rhs[n - 1] = y[n - 1] - h * right_derivative * quarter;

        let inner = a.solve(rhs)?;
        let mut alpha = Vec::with_capacity(n + 2);
        alpha.push(inner[1] - two * h * left_derivative);
        alpha.extend_from_slice(&inner);
        alpha.push(inner[n - 2] + two * h * right_derivative);

        Ok(Self::from_parts(2, alpha, 1, x0, h, "quadratic_b_spline"))
    }

    /// Cubic spline with prescribed first derivatives at both ends.
    pub fn cubic(y: &[T], x0: T, h: T, left_derivative: T, right_derivative: T) -> Result<Self> {
        common::validate_uniform(y.len(), h, 3, "cubic_b_spline")?;
        let n = y.len();
        let two = cast::<T>(2.0);
        let four = cast::<T>(4.0);
        let six = cast::<T>(6.0);

        let mut a = BandedMatrix::tridiagonal(n);
        let mut rhs: Vec<T> = y.iter().map(|&v| six * v).collect();
        // a_{-1} = a_1 - 2 h y'(x0), a_n = a_{n-2} + 2 h y'(x_end)
        a.set(0, 0, four)?;
        a.set(0, 1, two)?;
        rhs[0] = rhs[0] + two * h * left_derivative;
        for i in 1..n - 1 {
            a.set(i, i - 1, T::one())?;
            a.set(i, i, four)?;
            a.set(i, i + 1, T::one())?;
        }
        a.set(n - 1, n - 2, two)?;
        a.set(n - 1, n - 1, four)?;
        rhs[n - 1] = rhs[n - 1] - two * h * right_derivative;

        let inner = a.solve(rhs)?;
        let mut alpha = Vec::with_capacity(n + 2);
        alpha.push(inner[1] - two * h * left_derivative);
        alpha.extend_from_slice(&inner);
        alpha.push(inner[n - 2] + two * h * right_derivative);

        Ok(Self::from_parts(3, alpha, 1, x0, h, "cubic_b_spline"))
    }

    /// Quintic spline with prescribed first and second derivatives at both
    /// ends, given as `[y', y'']`.
    pub fn quintic(y: &[T], x0: T, h: T, left: [T; 2], right: [T; 2]) -> Result<Self> {
        common::validate_uniform(y.len(), h, 5, "quintic_b_spline")?;
        let n = y.len();
        let m = n - 1;
        let c = |v: f64| cast::<T>(v);

        // Scaled end derivatives h y' and h^2 y''.
        let l1 = h * left[0];
        let l2 = h * h * left[1];
        let r1 = h * right[0];
        let r2 = h * h * right[1];

        let mut a = BandedMatrix::new(n, 2, 2);
        let mut rhs: Vec<T> = y.iter().map(|&v| c(120.0) * v).collect();

        // Rows 0 and 1 after substituting a_{-2}, a_{-1}.
        a.set(0, 0, c(54.0))?;
        a.set(0, 1, c(60.0))?;
        a.set(0, 2, c(6.0))?;
        rhs[0] = rhs[0] + c(72.0) * l1 + c(12.0) * l2;

        a.set(1, 0, c(25.25))?;
        a.set(1, 1, c(67.5))?;
        a.set(1, 2, c(26.25))?;
        a.set(1, 3, T::one())?;
        rhs[1] = rhs[1] + c(3.0) * l1 + c(0.75) * l2;

        for i in 2..m - 1 {
            a.set(i, i - 2, T::one())?;
            a.set(i, i - 1, c(26.0))?;
            a.set(i, i, c(66.0))?;
            a.set(i, i + 1, c(26.0))?;
            a.set(i, i + 2, T::one())?;
        }

        // Mirror image at the right end.
        a.set(m - 1, m, c(25.25))?;
        a.set(m - 1, m - 1, c(67.5))?;
        a.set(m - 1, m - 2, c(26.25))?;
        a.set(m - 1, m - 3, T::one())?;
        rhs[m - 1] = rhs[m - 1] - c(3.0) * r1 + c(0.75) * r2;

        a.set(m, m, c(54.0))?;
        a.set(m, m - 1, c(60.0))?;
        a.set(m, m - 2, c(6.0))?;
        rhs[m] = rhs[m] - c(72.0) * r1 + c(12.0) * r2;

        let inner = a.solve(rhs)?;

        let b_left = -c(3.0) * l1 - c(0.75) * l2 - c(0.75) * inner[0] + c(1.5) * inner[1] + c(0.25) * inner[2];
        let a_left = c(6.0) * l1 + c(7.5) * l2 + c(7.5) * inner[0] - c(5.0) * inner[1] - c(1.5) * inner[2];
        let b_right = c(3.0) * r1 - c(0.75) * r2 - c(0.75) * inner[m] + c(1.5) * inner[m - 1] + c(0.25) * inner[m - 2];
        let a_right = -c(6.0) * r1 + c(7.5) * r2 + c(7.5) * inner[m] - c(5.0) * inner[m - 1] - c(1.5) * inner[m - 2];

        let mut alpha = Vec::with_capacity(n + 4);
        alpha.push(a_left);
        alpha.push(b_left);
        alpha.extend_from_slice(&inner);
        alpha.push(b_right);
        alpha.push(a_right);

        Ok(Self::from_parts(5, alpha, 2, x0, h, "quintic_b_spline"))
    }

    fn from_parts(degree: usize, alpha: Vec<T>, pad: usize, x0: T, h: T, name: &'static str) -> Self {
        Self {
            degree,
            alpha,
            pad,
            x0,
            inv_h: T::one() / h,
            name,
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The spline coefficients, including the padding at both ends.
    pub fn coefficients(&self) -> &[T] {
        &self.alpha
    }
}

impl<T: Real> Interpolator<T> for CardinalBSpline<T> {
    fn value(&self, x: T) -> T {
        let s = (x - self.x0) * self.inv_h;
        let half = cast::<T>((self.degree + 1) as f64 / 2.0);
        let (lo, hi) = match ((s - half).ceil().to_i64(), (s + half).floor().to_i64()) {
            (Some(lo), Some(hi)) => (lo, hi),
            _ => return T::nan(),
        };
        let pad = self.pad as i64;
        let last = self.alpha.len() as i64 - 1 - pad;
        let mut sum = T::zero();
        for k in lo.max(-pad)..=hi.min(last) {
            let coefficient = self.alpha[(k + pad) as usize];
            sum = sum + coefficient * common::cardinal_b_spline(self.degree, s - cast::<T>(k as f64));
        }
        sum
    }

    fn name(&self) -> &str {
        self.name
    }
}

impl<T: Real> CardinalBSpline<T> {
    /// Build any of the supported degrees from endpoint derivatives.
    ///
    /// `left` and `right` hold `[y', y'']`; the second entries are ignored
    /// below degree 5.
    pub fn with_degree(degree: usize, y: &[T], x0: T, h: T, left: [T; 2], right: [T; 2]) -> Result<Self> {
        match degree {
            2 => Self::quadratic(y, x0, h, left[0], right[0]),
            3 => Self::cubic(y, x0, h, left[0], right[0]),
            5 => Self::quintic(y, x0, h, left, right),
            _ => Err(SweepError::invalid(
                "degree",
                format!("cardinal B-splines are available in degree 2, 3 and 5, not {}", degree),
            )),
        }
    }
}
