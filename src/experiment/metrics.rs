//! Error measures used to compare interpolators against the reference grid.

use std::cmp::Ordering;

use crate::interpolation::{Interpolator, Method};
use crate::real::{cast, Real};

/// Largest absolute deviation of `interp` from `reference[i]` at `x_i = i dx`.
///
/// A NaN anywhere makes the result infinite so that a broken scheme can
/// never rank first.
pub fn sup_error<T: Real>(interp: &dyn Interpolator<T>, reference: &[T], dx: T) -> T {
    let mut sup = T::zero();
    for (i, &expected) in reference.iter().enumerate() {
        let x = cast::<T>(i as f64) * dx;
        let diff = (expected - interp.value(x)).abs();
        if diff.is_nan() {
            return T::infinity();
        }
        if diff > sup {
            sup = diff;
        }
    }
    sup
}

/// Rounding noise in the reference grid, in units of `eps * max|phi|`.
pub const ROUNDOFF_ULPS: f64 = 512.0;

/// Sup errors at or below this cannot be told apart from rounding in
/// `reference`, so they say nothing about the interpolator.
pub fn roundoff_floor<T: Real>(reference: &[T]) -> T {
    let peak = reference.iter().fold(T::zero(), |m, &v| m.max(v.abs()));
    cast::<T>(ROUNDOFF_ULPS) * T::epsilon() * peak
}

/// Where and by how much an interpolator is worst, measured both in
/// absolute terms and in units in the last place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceReport<T> {
    pub max_distance: T,
    pub sup: T,
    pub worst_abscissa: T,
    pub worst_value: T,
    pub worst_computed: T,
    /// Reference points that passed the magnitude cut.
    pub compared: usize,
}

impl<T: Real> Default for DistanceReport<T> {
    fn default() -> Self {
        Self {
            max_distance: T::zero(),
            sup: T::zero(),
            worst_abscissa: T::zero(),
            worst_value: T::zero(),
            worst_computed: T::zero(),
            compared: 0,
        }
    }
}

/// Compare `interp` against `reference`, skipping points whose magnitude is
/// below `threshold` (ULP distance is meaningless near zero).
pub fn distance_report<T: Real>(
    interp: &dyn Interpolator<T>,
    reference: &[T],
    dx: T,
    threshold: T,
) -> DistanceReport<T> {
    let mut report = DistanceReport::default();
    for (i, &expected) in reference.iter().enumerate() {
        if expected.abs() < threshold {
            continue;
        }
        let t = cast::<T>(i as f64) * dx;
        let computed = interp.value(t);
        let diff = (computed - expected).abs();
        let distance = computed.float_distance(expected).abs();
        report.compared += 1;
        if distance > report.max_distance {
            report.max_distance = distance;
            report.worst_abscissa = t;
            report.worst_value = expected;
            report.worst_computed = computed;
        }
        if diff > report.sup {
            report.sup = diff;
        }
    }
    report
}

/// Sort `(method, error)` pairs by ascending error.
///
/// The sort is stable, so equal errors keep column order and every method
/// survives.
pub fn rank<T: Real>(errors: &[(Method, T)]) -> Vec<(Method, T)> {
    let mut ranked = errors.to_vec();
    ranked.sort_by(|a, b| compare_errors(a.1, b.1));
    ranked
}

fn compare_errors<T: Real>(a: T, b: T) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f64);

    impl Interpolator<f64> for Constant {
        fn value(&self, _x: f64) -> f64 {
            self.0
        }

        fn name(&self) -> &str {
            "constant"
        }
    }

    struct Identity;

    impl Interpolator<f64> for Identity {
        fn value(&self, x: f64) -> f64 {
            x
        }

        fn name(&self) -> &str {
            "identity"
        }
    }

    #[test]
    fn test_sup_error() {
        let reference = vec![0.0, 0.5, 1.0, 0.25];
        let sup = sup_error(&Constant(0.5), &reference, 0.5);
        assert_eq!(sup, 0.5);
        assert_eq!(sup_error(&Identity, &[0.0, 0.5, 1.0], 0.5), 0.0);
    }

    #[test]
    fn test_roundoff_floor_scales_with_peak() {
        let floor = roundoff_floor(&[0.0f64, -2.0, 1.0]);
        assert_eq!(floor, 2.0 * ROUNDOFF_ULPS * f64::EPSILON);
        let floor32 = roundoff_floor(&[0.5f32]);
        assert_eq!(floor32, 0.5 * ROUNDOFF_ULPS as f32 * f32::EPSILON);
        assert_eq!(roundoff_floor::<f64>(&[]), 0.0);
    }

    #[test]
    fn test_sup_error_nan_is_infinite() {
        let sup = sup_error(&Constant(f64::NAN), &[0.0, 1.0], 1.0);
        assert!(sup.is_infinite());
    }

    #[test]
    fn test_rank_keeps_ties() {
        let errors = vec![
            (Method::Linear, 1e-3),
            (Method::Pchip, 1e-5),
            (Method::Makima, 1e-5),
            (Method::CubicHermite, f64::INFINITY),
            (Method::FoTaylor, 1e-4),
        ];
        let ranked = rank(&errors);
        let methods: Vec<Method> = ranked.iter().map(|(m, _)| *m).collect();
        assert_eq!(
            methods,
            vec![
                Method::Pchip,
                Method::Makima,
                Method::FoTaylor,
                Method::Linear,
                Method::CubicHermite
            ]
        );
    }

    #[test]
    fn test_rank_nan_last() {
        let ranked = rank(&[(Method::Linear, f64::NAN), (Method::Pchip, 1.0)]);
        assert_eq!(ranked[0].0, Method::Pchip);
    }

    #[test]
    fn test_distance_report_skips_small_values() {
        let reference = vec![0.0, 1e-20, 1.0, 2.0];
        let report = distance_report(&Identity, &reference, 1.0, 1e-10);
        assert_eq!(report.compared, 2);
        assert_eq!(report.worst_abscissa, 2.0);
        assert_eq!(report.worst_value, 1.0);
        assert_eq!(report.worst_computed, 2.0);
        assert_eq!(report.sup, 1.0);
        assert!(report.max_distance > 0.0);
    }
}
