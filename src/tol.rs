//! Tolerance-based scalar comparisons and clipping primitives.
//!
//! Two parallel comparison families share one shape and differ only in their
//! default slack:
//!
//! - `about_*` uses the type-dependent [`Tolerance::TOLERANCE`] (tighter for
//!   more precise element types);
//! - `near_*` uses the type-independent geometric [`Tolerance::EPSILON`].
//!
//! All functions here are pure and total; there are no error conditions.

use crate::traits::{Number, Tolerance};

fn abs<T: Number + PartialOrd>(value: T) -> T {
    if value < T::ZERO {
        -value
    } else {
        value
    }
}

/// Returns `true` if `|value| <= tolerance`.
pub fn about_zero_tol<T: Number + PartialOrd>(value: T, tolerance: T) -> bool {
    abs(value) <= tolerance
}

/// Returns `true` if `value` is zero within the type-dependent default
/// tolerance.
///
/// # Examples
///
/// ```
/// # use xform_linalg::tol::about_zero;
/// assert!(about_zero(1e-6_f32));
/// assert!(!about_zero(1e-3_f32));
/// ```
pub fn about_zero<T: Number + PartialOrd + Tolerance>(value: T) -> bool {
    about_zero_tol(value, T::TOLERANCE)
}

/// Returns `true` if `|a - b| <= tolerance`.
pub fn about_equal_tol<T: Number + PartialOrd>(a: T, b: T, tolerance: T) -> bool {
    about_zero_tol(a - b, tolerance)
}

/// Returns `true` if `a` and `b` are equal within the type-dependent default
/// tolerance.
pub fn about_equal<T: Number + PartialOrd + Tolerance>(a: T, b: T) -> bool {
    about_zero(a - b)
}

/// Returns `true` if `value` is zero within the fixed geometric epsilon,
/// regardless of the element type.
///
/// # Examples
///
/// ```
/// # use xform_linalg::tol::near_zero;
/// assert!(near_zero(5e-5_f64));
/// assert!(!near_zero(5e-4_f64));
/// ```
pub fn near_zero<T: Number + PartialOrd + Tolerance>(value: T) -> bool {
    about_zero_tol(value, T::EPSILON)
}

/// Returns `true` if `a` and `b` are equal within the fixed geometric epsilon.
pub fn near_equal<T: Number + PartialOrd + Tolerance>(a: T, b: T) -> bool {
    near_zero(a - b)
}

/// Returns the sign of `value` as `-1`, `0` or `+1`, treating `tolerance` as a
/// dead zone around zero.
pub fn sign_tol<T: Number + PartialOrd>(value: T, tolerance: T) -> i32 {
    if about_zero_tol(value, tolerance) {
        0
    } else if value < T::ZERO {
        -1
    } else {
        1
    }
}

/// Sign of `value` with the type-dependent default tolerance as the dead zone.
pub fn sign_about<T: Number + PartialOrd + Tolerance>(value: T) -> i32 {
    sign_tol(value, T::TOLERANCE)
}

/// Sign of `value` with the fixed geometric epsilon as the dead zone.
pub fn sign_near<T: Number + PartialOrd + Tolerance>(value: T) -> i32 {
    sign_tol(value, T::EPSILON)
}

/// Clamps `value` into `[min, max]` in place.
///
/// Returns `true` if clamping occurred.
pub fn clip<T: PartialOrd + Copy>(value: &mut T, min: T, max: T) -> bool {
    clip_lower(value, min) | clip_upper(value, max)
}

/// Raises `value` to `min` in place if it is below. Returns `true` if
/// clamping occurred.
pub fn clip_lower<T: PartialOrd + Copy>(value: &mut T, min: T) -> bool {
    if *value < min {
        *value = min;
        true
    } else {
        false
    }
}

/// Lowers `value` to `max` in place if it is above. Returns `true` if
/// clamping occurred.
pub fn clip_upper<T: PartialOrd + Copy>(value: &mut T, max: T) -> bool {
    if *value > max {
        *value = max;
        true
    } else {
        false
    }
}

/// Returns `value` clamped into `[min, max]`.
///
/// # Examples
///
/// ```
/// # use xform_linalg::tol::val_to_range;
/// assert_eq!(val_to_range(5, 0, 3), 3);
/// assert_eq!(val_to_range(-1, 0, 3), 0);
/// assert_eq!(val_to_range(2, 0, 3), 2);
/// ```
pub fn val_to_range<T: PartialOrd + Copy>(value: T, min: T, max: T) -> T {
    let mut value = value;
    clip(&mut value, min, max);
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn about_family() {
        assert!(about_zero(0.0_f32));
        assert!(about_zero(9e-6_f32));
        assert!(about_zero(-9e-6_f32));
        assert!(!about_zero(2e-5_f32));

        // The f64 table is tighter.
        assert!(!about_zero(9e-6_f64));
        assert!(about_zero(9e-11_f64));

        assert!(about_equal(1.0_f32, 1.0 + 5e-6));
        assert!(!about_equal(1.0_f32, 1.0 + 5e-5));
    }

    #[test]
    fn near_family_is_type_independent() {
        assert!(near_zero(5e-5_f32));
        assert!(near_zero(5e-5_f64));
        assert!(!near_zero(2e-4_f32));
        assert!(!near_zero(2e-4_f64));

        assert!(near_equal(3.0_f64, 3.0 + 9e-5));
    }

    #[test]
    fn signs() {
        assert_eq!(sign_about(1.0_f32), 1);
        assert_eq!(sign_about(-1.0_f32), -1);
        assert_eq!(sign_about(5e-6_f32), 0);
        assert_eq!(sign_near(5e-5_f64), 0);
        assert_eq!(sign_near(-1e-3_f64), -1);
        assert_eq!(sign_tol(0.4, 0.5), 0);
        assert_eq!(sign_tol(0.6, 0.5), 1);
    }

    #[test]
    fn clipping() {
        let mut v = 1.5_f32;
        assert!(!clip(&mut v, 0.0, 2.0));
        assert_eq!(v, 1.5);

        assert!(clip(&mut v, 2.0, 3.0));
        assert_eq!(v, 2.0);

        assert!(clip_upper(&mut v, 1.0));
        assert_eq!(v, 1.0);
        assert!(!clip_lower(&mut v, 0.5));

        assert_eq!(val_to_range(7.0, 0.0, 4.0), 4.0);
    }
}
