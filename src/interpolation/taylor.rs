//! Truncated Taylor expansion about the nearest grid node.
//!
//! Given the scaling function and its first `q` derivatives on a dyadic
//! grid, the value at `x` is approximated by the degree-`q` Taylor
//! polynomial around whichever node is closer. Ties go to the right node.

use super::Interpolator;
use crate::error::{Result, SweepError};
use crate::interpolation::common;
use crate::real::{cast, Real};

pub struct Taylor<T> {
    y: Vec<T>,
    /// `derivatives[k]` holds the `(k+1)`-th derivative at every node.
    derivatives: Vec<Vec<T>>,
    h: T,
    inv_h: T,
    end: T,
}

impl<T: Real> Taylor<T> {
    /// Expansion of order `derivatives.len()` over samples at `0, h, 2h, ...`
    pub fn new(y: Vec<T>, derivatives: Vec<Vec<T>>, h: T) -> Result<Self> {
        if derivatives.is_empty() || derivatives.len() > 3 {
            return Err(SweepError::invalid(
                "order",
                format!("Taylor order must be 1, 2 or 3, got {}", derivatives.len()),
            ));
        }
        common::validate_uniform(y.len(), h, 2, "taylor")?;
        let views: Vec<&[T]> = derivatives.iter().map(|d| d.as_slice()).collect();
        common::validate_lengths(&y, &views, "taylor")?;
        let end = h * cast::<T>((y.len() - 1) as f64);
        Ok(Self {
            y,
            derivatives,
            h,
            inv_h: T::one() / h,
            end,
        })
    }

    pub fn order(&self) -> usize {
        self.derivatives.len()
    }

    fn expand(&self, node: usize, eps: T) -> T {
        let mut acc = T::zero();
        for (k, d) in self.derivatives.iter().enumerate().rev() {
            acc = eps * (d[node] + acc) / cast::<T>((k + 1) as f64);
        }
        self.y[node] + acc
    }
}

impl<T: Real> Interpolator<T> for Taylor<T> {
    fn value(&self, x: T) -> T {
        if x <= T::zero() || x >= self.end {
            return T::zero();
        }
        let s = x * self.inv_h;
        let (k, t) = common::locate(s, self.y.len() - 1);
        if t < T::one() - t {
            self.expand(k, t * self.h)
        } else {
            self.expand(k + 1, (t - T::one()) * self.h)
        }
    }

    fn name(&self) -> &str {
        match self.order() {
            1 => "fo_taylor",
            2 => "second_order_taylor",
            _ => "third_order_taylor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubic_samples(n: usize, h: f64) -> (Vec<f64>, Vec<Vec<f64>>) {
        // f(x) = x^3 - 2x^2 + x
        let xs: Vec<f64> = (0..n).map(|i| i as f64 * h).collect();
        let y = xs.iter().map(|&x| x * x * x - 2.0 * x * x + x).collect();
        let d1 = xs.iter().map(|&x| 3.0 * x * x - 4.0 * x + 1.0).collect();
        let d2 = xs.iter().map(|&x| 6.0 * x - 4.0).collect();
        let d3: Vec<f64> = vec![6.0; n];
        (y, vec![d1, d2, d3])
    }

    #[test]
    fn test_third_order_taylor_is_exact_for_cubics() {
        let (y, derivatives) = cubic_samples(9, 0.25);
        let taylor = Taylor::new(y, derivatives, 0.25).unwrap();
        assert_eq!(taylor.name(), "third_order_taylor");
        for i in 1..200 {
            let x = i as f64 * 0.01;
            let expected = x * x * x - 2.0 * x * x + x;
            assert!((taylor.value(x) - expected).abs() < 1e-13, "x = {}", x);
        }
    }

    #[test]
    fn test_third_derivative_taken_at_expansion_node() {
        // f(x) = x^4, whose third derivative differs from node to node.
        let xs: Vec<f64> = (0..5).map(|i| i as f64).collect();
        let y: Vec<f64> = xs.iter().map(|&x| x.powi(4)).collect();
        let d1: Vec<f64> = xs.iter().map(|&x| 4.0 * x.powi(3)).collect();
        let d2: Vec<f64> = xs.iter().map(|&x| 12.0 * x * x).collect();
        let d3: Vec<f64> = xs.iter().map(|&x| 24.0 * x).collect();
        let taylor = Taylor::new(y, vec![d1, d2, d3], 1.0).unwrap();

        // Left of the midpoint: about node 1, where f''' = 24.
        let left: f64 = 1.0 + 4.0 * 0.25 + 12.0 / 2.0 * 0.0625 + 24.0 / 6.0 * 0.015625;
        assert!((taylor.value(1.25) - left).abs() < 1e-14);
        // Right of the midpoint: about node 2, where f''' = 48.
        let right: f64 = 16.0 - 32.0 * 0.25 + 48.0 / 2.0 * 0.0625 - 48.0 / 6.0 * 0.015625;
        assert!((taylor.value(1.75) - right).abs() < 1e-14);
        // Node 1's third derivative would give 9.4375 here.
        assert!((taylor.value(1.75) - 9.4375).abs() > 1e-2);
    }

    #[test]
    fn test_first_order_uses_nearest_node() {
        let y: Vec<f64> = vec![0.0, 1.0, 4.0];
        let d1: Vec<f64> = vec![0.0, 2.0, 4.0];
        let taylor = Taylor::new(y, vec![d1], 1.0f64).unwrap();
        assert_eq!(taylor.name(), "fo_taylor");
        // Nearer to node 1 from the left.
        assert!((taylor.value(0.75) - (1.0 - 0.25 * 2.0)).abs() < 1e-15);
        // Nearer to node 1 from the right.
        assert!((taylor.value(1.25) - (1.0 + 0.25 * 2.0)).abs() < 1e-15);
        // Midpoint goes right.
        assert!((taylor.value(1.5) - (4.0 - 0.5 * 4.0)).abs() < 1e-15);
    }

    #[test]
    fn test_second_order_is_exact_for_quadratics() {
        let xs: Vec<f64> = (0..5).map(|i| i as f64 * 0.5).collect();
        let y = xs.iter().map(|&x| 2.0 * x * x - x).collect();
        let d1 = xs.iter().map(|&x| 4.0 * x - 1.0).collect();
        let d2: Vec<f64> = vec![4.0; 5];
        let taylor = Taylor::new(y, vec![d1, d2], 0.5).unwrap();
        assert_eq!(taylor.name(), "second_order_taylor");
        for &x in &[0.1f64, 0.3, 0.8, 1.6, 1.9] {
            assert!((taylor.value(x) - (2.0 * x * x - x)).abs() < 1e-14);
        }
    }

    #[test]
    fn test_taylor_outside_support() {
        let (y, derivatives) = cubic_samples(5, 0.5);
        let taylor = Taylor::new(y, derivatives, 0.5).unwrap();
        assert_eq!(taylor.value(0.0), 0.0);
        assert_eq!(taylor.value(-1.0), 0.0);
        assert_eq!(taylor.value(2.0), 0.0);
    }

    #[test]
    fn test_taylor_rejects_bad_order() {
        assert!(Taylor::new(vec![0.0, 1.0], vec![], 1.0f64).is_err());
        let four = vec![vec![0.0, 0.0]; 4];
        assert!(Taylor::new(vec![0.0, 1.0], four, 1.0f64).is_err());
    }
}
