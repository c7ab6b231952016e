//! Daubechies low-pass filter construction.
//!
//! The filter with `p` vanishing moments is the minimum-phase spectral
//! factor of
//!
//! ```text
//! |m0(w)|^2 = cos^2p(w/2) P(sin^2(w/2)),   P(y) = sum_{k<p} C(p-1+k, k) y^k
//! ```
//!
//! Each root `y_k` of `P` gives a pair `z, 1/z` through
//! `z + 1/z = 2 - 4 y_k`; keeping the root inside the unit circle, the
//! filter is the coefficient list of `(1 + z)^p prod_k (1 - z_k z)`,
//! scaled so that the taps sum to `sqrt(2)`.

use num_complex::Complex64;
use std::f64::consts::SQRT_2;
use tracing::debug;

use crate::error::{Result, SweepError};

/// Largest number of vanishing moments the experiment supports.
pub const MAX_VANISHING_MOMENTS: usize = 15;

const MAX_ROOT_ITERATIONS: usize = 1000;
const ROOT_TOLERANCE: f64 = 1e-15;
const ORTHONORMALITY_TOLERANCE: f64 = 1e-9;

/// Compute the `2p` taps of the Daubechies scaling filter.
pub fn daubechies_filter(p: usize) -> Result<Vec<f64>> {
    if p == 0 || p > MAX_VANISHING_MOMENTS {
        return Err(SweepError::invalid(
            "p",
            format!(
                "vanishing moments must be in 1..={}, got {}",
                MAX_VANISHING_MOMENTS, p
            ),
        ));
    }

    let y_roots = polynomial_roots(&binomial_polynomial(p))?;

    // (1 + z)^p
    let mut poly = vec![Complex64::new(1.0, 0.0)];
    for _ in 0..p {
        poly = multiply_linear(&poly, Complex64::new(1.0, 0.0));
    }

    for y in y_roots {
        let z = inner_root(y);
        poly = multiply_linear(&poly, -z);
    }

    let mut h: Vec<f64> = poly.iter().map(|c| c.re).collect();
    let sum: f64 = h.iter().sum();
    if sum == 0.0 || !sum.is_finite() {
        return Err(SweepError::Wavelet {
            message: format!("degenerate filter for p = {}", p),
        });
    }
    let scale = SQRT_2 / sum;
    for tap in &mut h {
        *tap *= scale;
    }

    check_orthonormal(&h, p)?;
    debug!(p = p, taps = h.len(), "Constructed Daubechies filter");
    Ok(h)
}

/// Coefficients (ascending) of `P(y) = sum_{k<p} C(p-1+k, k) y^k`.
fn binomial_polynomial(p: usize) -> Vec<f64> {
    let mut coefficients = Vec::with_capacity(p);
    let mut c = 1.0;
    for k in 0..p {
        coefficients.push(c);
        // C(p+k, k+1) = C(p-1+k, k) * (p+k) / (k+1)
        c = c * (p + k) as f64 / (k + 1) as f64;
    }
    coefficients
}

/// Multiply an ascending polynomial by `(1 + a z)`.
fn multiply_linear(poly: &[Complex64], a: Complex64) -> Vec<Complex64> {
    let mut out = vec![Complex64::new(0.0, 0.0); poly.len() + 1];
    for (i, &c) in poly.iter().enumerate() {
        out[i] += c;
        out[i + 1] += c * a;
    }
    out
}

/// The solution of `z^2 - (2 - 4y) z + 1 = 0` with `|z| <= 1`.
fn inner_root(y: Complex64) -> Complex64 {
    let b = Complex64::new(1.0, 0.0) - y * 2.0;
    let disc = (b * b - 1.0).sqrt();
    let z1 = b - disc;
    let z2 = b + disc;
    if z1.norm() <= z2.norm() {
        z1
    } else {
        z2
    }
}

fn evaluate(coefficients: &[f64], z: Complex64) -> (Complex64, Complex64) {
    let mut value = Complex64::new(0.0, 0.0);
    let mut derivative = Complex64::new(0.0, 0.0);
    for &c in coefficients.iter().rev() {
        derivative = derivative * z + value;
        value = value * z + c;
    }
    (value, derivative)
}

/// All complex roots of a real polynomial given in ascending order.
///
/// Durand-Kerner simultaneous iteration followed by a Newton polish.
fn polynomial_roots(coefficients: &[f64]) -> Result<Vec<Complex64>> {
    let degree = coefficients.len().saturating_sub(1);
    if degree == 0 {
        return Ok(Vec::new());
    }
    let lead = coefficients[degree];
    if lead == 0.0 {
        return Err(SweepError::Numerical {
            message: "leading coefficient is zero".to_string(),
        });
    }
    if degree == 1 {
        return Ok(vec![Complex64::new(-coefficients[0] / lead, 0.0)]);
    }

    let monic: Vec<f64> = coefficients.iter().map(|c| c / lead).collect();
    let seed = Complex64::new(0.4, 0.9);
    let mut roots: Vec<Complex64> = (0..degree).map(|i| seed.powu(i as u32 + 1)).collect();

    let mut converged = false;
    for _ in 0..MAX_ROOT_ITERATIONS {
        let mut largest_step: f64 = 0.0;
        for i in 0..degree {
            let (value, _) = evaluate(&monic, roots[i]);
            let mut denominator = Complex64::new(1.0, 0.0);
            for j in 0..degree {
                if i != j {
                    denominator *= roots[i] - roots[j];
                }
            }
            let step = value / denominator;
            roots[i] -= step;
            largest_step = largest_step.max(step.norm() / roots[i].norm().max(1.0));
        }
        if largest_step < ROOT_TOLERANCE {
            converged = true;
            break;
        }
    }
    if !converged {
        debug!(degree = degree, "Durand-Kerner hit the iteration limit, polishing anyway");
    }

    for root in &mut roots {
        for _ in 0..4 {
            let (value, derivative) = evaluate(&monic, *root);
            if derivative.norm() == 0.0 {
                break;
            }
            *root -= value / derivative;
        }
    }

    for root in &roots {
        let (value, _) = evaluate(&monic, *root);
        if !value.norm().is_finite() || value.norm() > 1e-6 {
            return Err(SweepError::Numerical {
                message: format!(
                    "root finder did not converge for degree {} (residual {:e})",
                    degree,
                    value.norm()
                ),
            });
        }
    }
    Ok(roots)
}

fn check_orthonormal(h: &[f64], p: usize) -> Result<()> {
    let energy: f64 = h.iter().map(|x| x * x).sum();
    if (energy - 1.0).abs() > ORTHONORMALITY_TOLERANCE {
        return Err(SweepError::Wavelet {
            message: format!("filter for p = {} has energy {} instead of 1", p, energy),
        });
    }
    for shift in 1..p {
        let dot: f64 = (0..h.len() - 2 * shift)
            .map(|k| h[k] * h[k + 2 * shift])
            .sum();
        if dot.abs() > ORTHONORMALITY_TOLERANCE {
            return Err(SweepError::Wavelet {
                message: format!(
                    "filter for p = {} is not orthogonal to its shift by {} ({:e})",
                    p,
                    2 * shift,
                    dot
                ),
            });
        }
    }
    Ok(())
}
