//! Interpolation schemes compared against the dense reference grid.
//!
//! Every scheme is built from samples of the scaling function (and some of
//! its derivatives) at spacing `2^-r` on `[0, 2p-1]`, and is queried at
//! arbitrary abscissas through the [`Interpolator`] trait.

pub mod b_spline;
pub mod common;
pub mod hermite;
pub mod linear;
pub mod makima;
pub mod matched_holder;
pub mod pchip;
pub mod taylor;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SweepError};
use crate::real::{cast, convert_slice, Real};
use crate::wavelet::DaubechiesScaling;

/// Trait for interpolation methods
pub trait Interpolator<T> {
    /// Interpolated value at `x`
    fn value(&self, x: T) -> T;

    /// Get the name of this interpolation method
    fn name(&self) -> &str;
}

/// The schemes under comparison, in CSV column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    MatchedHolder,
    Linear,
    QuadraticBSpline,
    CubicBSpline,
    QuinticBSpline,
    CubicHermite,
    Pchip,
    Makima,
    FoTaylor,
    QuinticHermite,
    SecondOrderTaylor,
    ThirdOrderTaylor,
    SepticHermite,
}

impl Method {
    pub const ALL: [Method; 13] = [
        Method::MatchedHolder,
        Method::Linear,
        Method::QuadraticBSpline,
        Method::CubicBSpline,
        Method::QuinticBSpline,
        Method::CubicHermite,
        Method::Pchip,
        Method::Makima,
        Method::FoTaylor,
        Method::QuinticHermite,
        Method::SecondOrderTaylor,
        Method::ThirdOrderTaylor,
        Method::SepticHermite,
    ];

    /// Column name in the convergence CSV.
    pub fn column(self) -> &'static str {
        match self {
            Method::MatchedHolder => "matched_holder",
            Method::Linear => "linear",
            Method::QuadraticBSpline => "quadratic_b_spline",
            Method::CubicBSpline => "cubic_b_spline",
            Method::QuinticBSpline => "quintic_b_spline",
            Method::CubicHermite => "cubic_hermite",
            Method::Pchip => "pchip",
            Method::Makima => "makima",
            Method::FoTaylor => "fo_taylor",
            Method::QuinticHermite => "quintic_hermite",
            Method::SecondOrderTaylor => "second_order_taylor",
            Method::ThirdOrderTaylor => "third_order_taylor",
            Method::SepticHermite => "septic_hermite",
        }
    }

    /// Name used in the ranking log.
    pub fn display_name(self) -> &'static str {
        match self {
            Method::Linear => "linear interpolation",
            Method::CubicHermite => "cubic_hermite_spline",
            Method::QuinticHermite => "quintic_hermite_spline",
            Method::SepticHermite => "septic_hermite_spline",
            Method::FoTaylor => "First-order Taylor",
            Method::SecondOrderTaylor => "Second-order Taylor",
            Method::ThirdOrderTaylor => "Third-order Taylor",
            other => other.column(),
        }
    }

    /// Highest derivative of phi the method consumes.
    pub fn derivatives_needed(self) -> usize {
        match self {
            Method::Linear | Method::Pchip | Method::Makima | Method::QuinticBSpline => 0,
            Method::MatchedHolder
            | Method::QuadraticBSpline
            | Method::CubicBSpline
            | Method::CubicHermite
            | Method::FoTaylor => 1,
            Method::QuinticHermite | Method::SecondOrderTaylor => 2,
            Method::ThirdOrderTaylor | Method::SepticHermite => 3,
        }
    }

    /// Smallest number of vanishing moments for which the method applies.
    ///
    /// `phi^(m)` exists as a continuous function only for `m < p`.
    pub fn min_p(self) -> usize {
        self.derivatives_needed().max(1) + 1
    }

    /// Applicable methods for `p`, in column order.
    pub fn for_p(p: usize) -> Vec<Method> {
        Self::ALL.iter().copied().filter(|m| p >= m.min_p()).collect()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Method {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.column() == key || m.display_name().to_lowercase() == key)
            .ok_or_else(|| SweepError::invalid("method", format!("Unknown interpolation method: {}", s)))
    }
}

/// Samples of phi and its derivatives at one dyadic level.
#[derive(Debug, Clone)]
pub struct GridSamples<T> {
    pub p: usize,
    pub level: u32,
    pub values: Vec<T>,
    /// `derivatives[k]` samples `phi^(k+1)`.
    pub derivatives: Vec<Vec<T>>,
}

impl<T: Real> GridSamples<T> {
    /// Sample phi and its first `max_derivative` derivatives at spacing
    /// `2^-level`. Construction runs in f64; the result is rounded to `T`.
    pub fn from_scaling(scaling: &DaubechiesScaling, level: u32, max_derivative: usize) -> Result<Self> {
        let values = convert_slice(&scaling.sample(0, level)?);
        let derivatives = (1..=max_derivative)
            .map(|m| scaling.sample(m, level).map(|d| convert_slice(&d)))
            .collect::<Result<Vec<Vec<T>>>>()?;
        Ok(Self {
            p: scaling.vanishing_moments(),
            level,
            values,
            derivatives,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Grid spacing `(2p-1)/(n-1) = 2^-level`.
    pub fn spacing(&self) -> T {
        cast::<T>((2 * self.p - 1) as f64) / cast::<T>((self.len().max(2) - 1) as f64)
    }

    pub fn abscissas(&self) -> Vec<T> {
        let h = self.spacing();
        (0..self.len()).map(|i| cast::<T>(i as f64) * h).collect()
    }

    fn derivative(&self, order: usize, method: Method) -> Result<&[T]> {
        self.derivatives
            .get(order - 1)
            .map(|d| d.as_slice())
            .ok_or_else(|| SweepError::Interpolation {
                message: format!(
                    "{} needs derivative {} of phi but only {} were sampled",
                    method,
                    order,
                    self.derivatives.len()
                ),
            })
    }
}

/// Construct `method` from `samples`.
pub fn build<T: Real>(method: Method, samples: &GridSamples<T>) -> Result<Box<dyn Interpolator<T>>> {
    if samples.p < method.min_p() {
        return Err(SweepError::invalid(
            "p",
            format!("{} requires p >= {}, got {}", method, method.min_p(), samples.p),
        ));
    }
    let h = samples.spacing();
    let zero = T::zero();
    let y = &samples.values;

    let interpolator: Box<dyn Interpolator<T>> = match method {
        Method::MatchedHolder => {
            let d1 = samples.derivative(1, method)?;
            Box::new(matched_holder::MatchedHolder::new(y.clone(), d1.to_vec(), zero, h)?)
        }
        Method::Linear => Box::new(linear::LinearInterpolator::new(y.clone(), h)?),
        Method::QuadraticBSpline | Method::CubicBSpline => {
            let d1 = samples.derivative(1, method)?;
            let (front, back) = match (d1.first(), d1.last()) {
                (Some(&a), Some(&b)) => (a, b),
                _ => (zero, zero),
            };
            let degree = if method == Method::QuadraticBSpline { 2 } else { 3 };
            Box::new(b_spline::CardinalBSpline::with_degree(
                degree,
                y,
                zero,
                h,
                [front, zero],
                [back, zero],
            )?)
        }
        Method::QuinticBSpline => Box::new(b_spline::CardinalBSpline::quintic(
            y,
            zero,
            h,
            [zero, zero],
            [zero, zero],
        )?),
        Method::CubicHermite => {
            let d1 = samples.derivative(1, method)?;
            Box::new(hermite::CardinalHermite::cubic(y.clone(), d1.to_vec(), zero, h)?)
        }
        Method::QuinticHermite => {
            let d1 = samples.derivative(1, method)?;
            let d2 = samples.derivative(2, method)?;
            Box::new(hermite::CardinalHermite::quintic(
                y.clone(),
                d1.to_vec(),
                d2.to_vec(),
                zero,
                h,
            )?)
        }
        Method::SepticHermite => {
            let d1 = samples.derivative(1, method)?;
            let d2 = samples.derivative(2, method)?;
            let d3 = samples.derivative(3, method)?;
            Box::new(hermite::CardinalHermite::septic(
                y.clone(),
                d1.to_vec(),
                d2.to_vec(),
                d3.to_vec(),
                zero,
                h,
            )?)
        }
        Method::Pchip => Box::new(pchip::Pchip::new(samples.abscissas(), y.clone())?),
        Method::Makima => Box::new(makima::Makima::new(samples.abscissas(), y.clone())?),
        Method::FoTaylor | Method::SecondOrderTaylor | Method::ThirdOrderTaylor => {
            let order = method.derivatives_needed();
            let derivatives = (1..=order)
                .map(|k| samples.derivative(k, method).map(|d| d.to_vec()))
                .collect::<Result<Vec<_>>>()?;
            Box::new(taylor::Taylor::new(y.clone(), derivatives, h)?)
        }
    };
    Ok(interpolator)
}
