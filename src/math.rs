//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::Vector3;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for three-dimensional real vectors.
pub type R3 = Vector3<Scalar>;

/// Returns `numerator / denominator`, or exactly `0.0` when the denominator is zero.
///
/// On the dipole axis some transverse field components vanish identically. The
/// closed-form expressions carry those zeros as a coordinate ratio, so an
/// exactly zero denominator selects the zero branch instead of dividing.
#[inline]
#[must_use]
pub fn ratio_or_zero(numerator: Scalar, denominator: Scalar) -> Scalar {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Sign convention used for receiver heights: `+1` on the `z = 0` plane, otherwise `signum(z)`.
#[inline]
#[must_use]
pub fn sign_or_positive(value: Scalar) -> Scalar {
    if value == 0.0 {
        1.0
    } else {
        value.signum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_or_zero_takes_zero_branch() {
        assert_eq!(ratio_or_zero(5.0, 0.0), 0.0);
        assert_eq!(ratio_or_zero(5.0, -0.0), 0.0);
        assert_eq!(ratio_or_zero(3.0, 2.0), 1.5);
    }

    #[test]
    fn ratio_or_zero_does_not_mask_nan() {
        assert!(ratio_or_zero(Scalar::NAN, 1.0).is_nan());
    }

    #[test]
    fn sign_or_positive_treats_zero_as_positive() {
        assert_eq!(sign_or_positive(0.0), 1.0);
        assert_eq!(sign_or_positive(-0.0), 1.0);
        assert_eq!(sign_or_positive(-2.5), -1.0);
        assert_eq!(sign_or_positive(0.3), 1.0);
    }
}
