//! Cardinal Hermite interpolation of odd degree.
//!
//! With values and the first `q` derivatives known at both ends of a cell,
//! the interpolant on that cell is the unique polynomial of degree `2q + 1`
//! matching them. In the cell variable `t = (x - x_i)/h` the low half of
//! the coefficients are the scaled left-end Taylor coefficients
//! `c_k = h^k y^(k)_i / k!`; the high half follow in closed form from the
//! residuals `r_j` of the right-end conditions.

use super::Interpolator;
use crate::error::Result;
use crate::interpolation::common;
use crate::real::{cast, Real};

/// Number of derivatives the interpolant matches at each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HermiteOrder {
    /// Values and first derivatives (degree 3).
    Cubic,
    /// Up to second derivatives (degree 5).
    Quintic,
    /// Up to third derivatives (degree 7).
    Septic,
}

impl HermiteOrder {
    pub fn derivatives(self) -> usize {
        match self {
            HermiteOrder::Cubic => 1,
            HermiteOrder::Quintic => 2,
            HermiteOrder::Septic => 3,
        }
    }

    fn name(self) -> &'static str {
        match self {
            HermiteOrder::Cubic => "cubic_hermite",
            HermiteOrder::Quintic => "quintic_hermite",
            HermiteOrder::Septic => "septic_hermite",
        }
    }
}

/// Hermite interpolant on a uniform grid `x0 + i h`.
#[derive(Debug, Clone)]
pub struct CardinalHermite<T> {
    order: HermiteOrder,
    y: Vec<T>,
    /// `scaled[k][i] = h^(k+1) y^(k+1)_i / (k+1)!`
    scaled: Vec<Vec<T>>,
    x0: T,
    inv_h: T,
}

impl<T: Real> CardinalHermite<T> {
    pub fn cubic(y: Vec<T>, dydx: Vec<T>, x0: T, h: T) -> Result<Self> {
        Self::build(HermiteOrder::Cubic, y, vec![dydx], x0, h)
    }

    pub fn quintic(y: Vec<T>, dydx: Vec<T>, d2ydx2: Vec<T>, x0: T, h: T) -> Result<Self> {
        Self::build(HermiteOrder::Quintic, y, vec![dydx, d2ydx2], x0, h)
    }

    pub fn septic(y: Vec<T>, dydx: Vec<T>, d2ydx2: Vec<T>, d3ydx3: Vec<T>, x0: T, h: T) -> Result<Self> {
        Self::build(HermiteOrder::Septic, y, vec![dydx, d2ydx2, d3ydx3], x0, h)
    }

    fn build(order: HermiteOrder, y: Vec<T>, derivatives: Vec<Vec<T>>, x0: T, h: T) -> Result<Self> {
        let name = order.name();
        common::validate_uniform(y.len(), h, 2, name)?;
        let views: Vec<&[T]> = derivatives.iter().map(|d| d.as_slice()).collect();
        common::validate_lengths(&y, &views, name)?;

        let mut factor = T::one();
        let scaled = derivatives
            .into_iter()
            .enumerate()
            .map(|(k, d)| {
                factor = factor * h / cast::<T>((k + 1) as f64);
                d.into_iter().map(|v| v * factor).collect()
            })
            .collect();

        Ok(Self {
            order,
            y,
            scaled,
            x0,
            inv_h: T::one() / h,
        })
    }

    pub fn order(&self) -> HermiteOrder {
        self.order
    }

    /// Right end of the interpolation domain.
    pub fn domain_end(&self) -> T {
        self.x0 + cast::<T>((self.y.len() - 1) as f64) / self.inv_h
    }
}

impl<T: Real> Interpolator<T> for CardinalHermite<T> {
    fn value(&self, x: T) -> T {
        let (i, t) = common::locate((x - self.x0) * self.inv_h, self.y.len() - 1);
        let c = |v: f64| cast::<T>(v);
        let c0 = self.y[i];
        let y1 = self.y[i + 1];

        match self.order {
            HermiteOrder::Cubic => {
                let c1 = self.scaled[0][i];
                let r0 = y1 - c0 - c1;
                let r1 = self.scaled[0][i + 1] - c1;
                let c2 = c(3.0) * r0 - r1;
                let c3 = r1 - c(2.0) * r0;
                c0 + t * (c1 + t * (c2 + t * c3))
            }
            HermiteOrder::Quintic => {
                let c1 = self.scaled[0][i];
                let c2 = self.scaled[1][i];
                let r0 = y1 - c0 - c1 - c2;
                let r1 = self.scaled[0][i + 1] - c1 - c(2.0) * c2;
                let r2 = c(2.0) * self.scaled[1][i + 1] - c(2.0) * c2;
                let c3 = c(10.0) * r0 - c(4.0) * r1 + c(0.5) * r2;
                let c4 = c(-15.0) * r0 + c(7.0) * r1 - r2;
                let c5 = c(6.0) * r0 - c(3.0) * r1 + c(0.5) * r2;
                c0 + t * (c1 + t * (c2 + t * (c3 + t * (c4 + t * c5))))
            }
            HermiteOrder::Septic => {
                let c1 = self.scaled[0][i];
                let c2 = self.scaled[1][i];
                let c3 = self.scaled[2][i];
                let r0 = y1 - c0 - c1 - c2 - c3;
                let r1 = self.scaled[0][i + 1] - c1 - c(2.0) * c2 - c(3.0) * c3;
                let r2 = c(2.0) * self.scaled[1][i + 1] - c(2.0) * c2 - c(6.0) * c3;
                let r3 = c(6.0) * self.scaled[2][i + 1] - c(6.0) * c3;
                let sixth = c(1.0 / 6.0);
                let c4 = c(35.0) * r0 - c(15.0) * r1 + c(2.5) * r2 - sixth * r3;
                let c5 = c(-84.0) * r0 + c(39.0) * r1 - c(7.0) * r2 + c(0.5) * r3;
                let c6 = c(70.0) * r0 - c(34.0) * r1 + c(6.5) * r2 - c(0.5) * r3;
                let c7 = c(-20.0) * r0 + c(10.0) * r1 - c(2.0) * r2 + sixth * r3;
                c0 + t * (c1 + t * (c2 + t * (c3 + t * (c4 + t * (c5 + t * (c6 + t * c7))))))
            }
        }
    }

    fn name(&self) -> &str {
        self.order.name()
    }
}
