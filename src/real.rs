//! Floating-point precision abstraction.
//!
//! Grids are always constructed in `f64`; the interpolators and the error
//! measurement run in whichever [`Real`] the experiment is instantiated with.

use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display, LowerExp};

/// A floating-point type the experiments can be run in.
pub trait Real: Float + FromPrimitive + Display + LowerExp + Debug + Default + Send + Sync + 'static {
    /// Human-readable type name used in log output.
    const NAME: &'static str;

    /// Number of decimal digits that survive a round trip through the type.
    const DIGITS10: usize;

    /// Signed number of representable values between `self` and `other`.
    fn float_distance(self, other: Self) -> Self;

    /// Convert from `f64`, rounding to nearest.
    fn from_f64_lossy(x: f64) -> Self {
        Self::from_f64(x).unwrap_or_else(Self::nan)
    }

    /// Widen to `f64` for storage in result tables.
    fn to_f64_lossy(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl Real for f64 {
    const NAME: &'static str = "f64";
    const DIGITS10: usize = f64::DIGITS as usize;

    fn float_distance(self, other: Self) -> Self {
        (ordered_bits_f64(other) - ordered_bits_f64(self)) as f64
    }
}

impl Real for f32 {
    const NAME: &'static str = "f32";
    const DIGITS10: usize = f32::DIGITS as usize;

    fn float_distance(self, other: Self) -> Self {
        (ordered_bits_f32(other) - ordered_bits_f32(self)) as f32
    }
}

/// Map the bit pattern of an `f64` onto a monotone integer line.
fn ordered_bits_f64(x: f64) -> i128 {
    let bits = x.to_bits() as i64;
    if bits < 0 {
        i64::MIN as i128 - bits as i128
    } else {
        bits as i128
    }
}

fn ordered_bits_f32(x: f32) -> i64 {
    let bits = x.to_bits() as i32;
    if bits < 0 {
        i32::MIN as i64 - bits as i64
    } else {
        bits as i64
    }
}

/// Shorthand for [`Real::from_f64_lossy`], used for numeric literals.
#[inline]
pub fn cast<T: Real>(x: f64) -> T {
    T::from_f64_lossy(x)
}

/// Convert a whole slice from `f64`.
pub fn convert_slice<T: Real>(values: &[f64]) -> Vec<T> {
    values.iter().map(|&v| T::from_f64_lossy(v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_distance_adjacent() {
        let x = 1.0f64;
        let next = f64::from_bits(x.to_bits() + 1);
        assert_eq!(x.float_distance(next), 1.0);
        assert_eq!(next.float_distance(x), -1.0);

        let y = 1.0f32;
        let next = f32::from_bits(y.to_bits() + 3);
        assert_eq!(y.float_distance(next), 3.0);
    }

    #[test]
    fn test_float_distance_across_zero() {
        let tiny = f64::from_bits(1);
        assert_eq!((-tiny).float_distance(tiny), 2.0);
        assert_eq!(0.0f64.float_distance(-0.0), 0.0);
    }

    #[test]
    fn test_convert_slice() {
        let v: Vec<f32> = convert_slice(&[0.5, -1.25, 3.0]);
        assert_eq!(v, vec![0.5f32, -1.25, 3.0]);
        assert_eq!(<f32 as Real>::DIGITS10, 6);
        assert_eq!(<f64 as Real>::DIGITS10, 15);
    }
}
