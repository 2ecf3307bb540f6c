//! Free-space constants used by the analytical reference.
//!
//! ## Accuracy
//!
//! The speed of light is exact by SI definition (2019 revision). ε₀ is the
//! CODATA 2018 value with 11 significant figures, which is well below the
//! discretisation error of any FDTD run the reference is compared against.
//!
//! ## References
//!
//! - NIST Reference on Constants, Units, and Uncertainty:
//!   <https://physics.nist.gov/cuu/Constants/>
//! - Mohr, P. J., Newell, D. B., Taylor, B. N., & Tiesinga, E. (2019).
//!   CODATA Recommended Values of the Fundamental Physical Constants: 2018.

/// Vacuum permittivity ε₀ in farads per meter (F/m).
/// Approximate value: 8.8541878128 × 10⁻¹² F/m (11 significant figures).
pub const VACUUM_PERMITTIVITY: f64 = 8.854_187_812_8e-12;
/// Speed of light in vacuum _c_ in meters per second (m/s).
/// Exact value by SI definition (2019): 299,792,458 m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Free-space propagation delay in seconds over `distance` meters.
#[inline]
#[must_use]
pub fn propagation_delay(distance: f64) -> f64 {
    distance / SPEED_OF_LIGHT
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn coulomb_coefficient_matches_codata() {
        let k = 1.0 / (4.0 * PI * VACUUM_PERMITTIVITY);
        assert_relative_eq!(k, 8.987_551_792_3e9, max_relative = 1.0e-9);
    }

    #[test]
    fn one_meter_takes_about_three_nanoseconds() {
        assert_relative_eq!(propagation_delay(1.0), 3.335_640_951_98e-9, max_relative = 1.0e-9);
    }

    #[test]
    fn zero_distance_has_no_delay() {
        assert_eq!(propagation_delay(0.0), 0.0);
    }
}
