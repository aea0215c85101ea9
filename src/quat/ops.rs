use std::ops::{Add, Deref, DerefMut, Mul, Neg};

use crate::approx::ApproxEq;
use crate::traits::Real;
use crate::vector::view::XYZW;
use crate::Quat;

impl<T> Deref for Quat<T> {
    type Target = XYZW<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.vec
    }
}

impl<T> DerefMut for Quat<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.vec
    }
}

impl<T: PartialEq> PartialEq for Quat<T> {
    fn eq(&self, other: &Self) -> bool {
        self.vec == other.vec
    }
}

impl<T: ApproxEq> ApproxEq for Quat<T> {
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &Self, abs_tolerance: Self::Tolerance) -> bool {
        self.vec.abs_diff_eq(&other.vec, abs_tolerance)
    }

    fn rel_diff_eq(&self, other: &Self, rel_tolerance: Self::Tolerance) -> bool {
        self.vec.rel_diff_eq(&other.vec, rel_tolerance)
    }
}

/// Composes two rotations; `p * q` applies `p` first, then `q`.
///
/// This is the Hamilton product with the operands swapped, so that
/// composition reads in application order like the matrix product does.
impl<T: Real> Mul for Quat<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let (p, q) = (self, rhs);
        let pv = crate::vec3(p.x, p.y, p.z);
        let qv = crate::vec3(q.x, q.y, q.z);
        let vec = pv * q.w + qv * p.w + qv.cross(pv);
        Self {
            vec: vec.extend(q.w * p.w - qv.dot(pv)),
        }
    }
}

/// Component-wise sum, used by the interpolation blends.
impl<T: Real> Add for Quat<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            vec: self.vec + rhs.vec,
        }
    }
}

/// Scales every component.
impl<T: Real> Mul<T> for Quat<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        Self {
            vec: self.vec * rhs,
        }
    }
}

/// Negates every component; `-q` represents the same rotation as `q`.
impl<T: Real> Neg for Quat<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self { vec: -self.vec }
    }
}
