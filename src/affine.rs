//! Affine transforms in 3D, stored as a 3x3 linear part plus a translation.

use std::ops::Mul;

use serde::{Deserialize, Serialize};

use crate::approx::ApproxEq;
use crate::tol::about_zero;
use crate::traits::Real;
use crate::{Mat3, Vec3};

/// An affine transform of 3D space: a linear part `m` followed by a
/// translation `v`.
///
/// A point `p` is transformed as `p * m + v` (row-vector convention). Like
/// matrices, transforms compose in application order: `a * b` applies `a`
/// first, then `b`.
///
/// # Examples
///
/// ```
/// # use xform_linalg::*;
/// let t = Affine3::from_translation(vec3(1.0f32, 0.0, 0.0));
/// assert_eq!(t.transform_point(Vec3f::ZERO), vec3(1.0, 0.0, 0.0));
/// // Direction vectors ignore the translation.
/// assert_eq!(t.transform_vector(Vec3f::Y), Vec3f::Y);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Affine3<T> {
    /// The linear part (rotation, scale, shear).
    pub m: Mat3<T>,
    /// The translation, applied after the linear part.
    pub v: Vec3<T>,
}

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Affine3<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Affine3<T> {}

/// A coarse classification of an [`Affine3`], used to pick fast paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformKind {
    /// The transform leaves every point where it is.
    Identity,
    /// The linear part is the identity; only the translation acts.
    Translation,
    /// The linear part is diagonal; a per-axis scale plus a translation.
    ScaleTranslation,
    /// Anything else (rotation, shear, or a combination).
    General,
}

/// An [`Affine3`] decomposed into translation, Z-Y-Z Euler angles, and a
/// per-axis scale, the way transforms are edited and persisted.
///
/// The equivalent transform is "scale, then rotate, then translate"; see
/// [`EulerTransform::to_affine`]. The rotation uses the light-object Euler
/// convention of [`Mat3::euler_rotation_for_light`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EulerTransform<T> {
    pub translation: Vec3<T>,
    pub azimuth: T,
    pub tilt: T,
    pub roll: T,
    pub scale: Vec3<T>,
}

impl<T: Real> Affine3<T> {
    /// The transform that leaves every point unchanged.
    pub const IDENTITY: Self = Self {
        m: Mat3::IDENTITY,
        v: Vec3::ZERO,
    };

    /// Creates a pure translation by `v`.
    pub fn from_translation(v: Vec3<T>) -> Self {
        Self {
            m: Mat3::IDENTITY,
            v,
        }
    }

    /// Creates a per-axis scale around the origin.
    pub fn from_scale(scale: Vec3<T>) -> Self {
        Self {
            m: Mat3::from_diagonal(scale),
            v: Vec3::ZERO,
        }
    }

    /// Creates a transform with linear part `m` and no translation.
    pub fn from_linear(m: Mat3<T>) -> Self {
        Self { m, v: Vec3::ZERO }
    }

    /// Transforms a point: applies the linear part, then the translation.
    #[inline]
    pub fn transform_point(&self, p: Vec3<T>) -> Vec3<T> {
        p * self.m + self.v
    }

    /// Transforms a direction vector: applies only the linear part.
    #[inline]
    pub fn transform_vector(&self, u: Vec3<T>) -> Vec3<T> {
        u * self.m
    }

    /// Inverts this transform.
    ///
    /// # Panics
    ///
    /// Panics if the linear part is singular.
    pub fn invert(&self) -> Self {
        let m = self.m.invert();
        Self {
            m,
            v: -(self.v * m),
        }
    }

    /// Inverts this transform assuming the linear part is a rotation matrix,
    /// using the transpose instead of a full inversion.
    ///
    /// If the linear part is not orthonormal the result is silently wrong;
    /// use [`Affine3::invert`] in that case.
    pub fn invert_rotation(&self) -> Self {
        let m = self.m.transpose();
        Self {
            m,
            v: -(self.v * m),
        }
    }

    /// Returns `true` if this transform equals [`Affine3::IDENTITY`] exactly.
    ///
    /// Used for default-value elision when serializing; exact, not
    /// tolerance-based.
    pub fn is_identity(&self) -> bool {
        self.m.is_identity() && self.v.is_zero()
    }

    /// Classifies this transform into one of the [`TransformKind`] buckets,
    /// using the default tolerance for "is this component zero" tests.
    pub fn classify(&self) -> TransformKind {
        let mut diagonal = true;
        let mut identity = true;
        for row in 0..3 {
            for col in 0..3 {
                let elem = self.m[(row, col)];
                if row == col {
                    if !about_zero(elem - T::ONE) {
                        identity = false;
                    }
                } else if !about_zero(elem) {
                    diagonal = false;
                }
            }
        }

        if diagonal && identity {
            if self.v.length2() < T::TOLERANCE * T::TOLERANCE {
                TransformKind::Identity
            } else {
                TransformKind::Translation
            }
        } else if diagonal {
            TransformKind::ScaleTranslation
        } else {
            TransformKind::General
        }
    }

    /// Decomposes this transform into an [`EulerTransform`].
    ///
    /// The linear part must be a rotation combined with per-axis scale (no
    /// shear). Scale factors come from the row lengths; a mirroring transform
    /// (negative determinant) is represented by negating the Z scale, so the
    /// remaining rows form a proper rotation.
    pub fn to_euler_transform(&self) -> EulerTransform<T> {
        let mut scale = self.m.scale();
        if self.m.determinant() < T::ZERO {
            scale = crate::vec3(scale.x, scale.y, -scale.z);
        }

        let mut rotation = self.m;
        for i in 0..3 {
            rotation.set_row(i, rotation.row(i) / scale[i]);
        }
        let (azimuth, tilt, roll) = rotation.to_euler_for_light();

        EulerTransform {
            translation: self.v,
            azimuth,
            tilt,
            roll,
            scale,
        }
    }
}

impl<T: Real> EulerTransform<T> {
    /// The decomposition of the identity transform.
    ///
    /// The angles are not all zero: the light-offset Euler convention bakes a
    /// quarter-turn about X into [`Mat3::euler_rotation_for_light`], so the
    /// identity decomposes to the angles that cancel it, matching what
    /// `Affine3::IDENTITY.to_euler_transform()` returns.
    pub fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            azimuth: T::FRAC_PI_2,
            tilt: T::FRAC_PI_2,
            roll: -T::FRAC_PI_2,
            scale: Vec3::splat(T::ONE),
        }
    }

    /// Recomposes the equivalent [`Affine3`]: scale, then rotate, then
    /// translate.
    pub fn to_affine(&self) -> Affine3<T> {
        Affine3 {
            m: Mat3::from_diagonal(self.scale)
                * Mat3::euler_rotation_for_light(self.azimuth, self.tilt, self.roll),
            v: self.translation,
        }
    }
}

impl<T: Real> Default for Affine3<T> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Composes two transforms; `a * b` applies `a` first, then `b`.
impl<T: Real> Mul for Affine3<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            m: self.m * rhs.m,
            v: self.v * rhs.m + rhs.v,
        }
    }
}

impl<T: ApproxEq> ApproxEq for Affine3<T> {
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &Self, abs_tolerance: Self::Tolerance) -> bool {
        self.m.abs_diff_eq(&other.m, abs_tolerance) && self.v.abs_diff_eq(&other.v, abs_tolerance)
    }

    fn rel_diff_eq(&self, other: &Self, rel_tolerance: Self::Tolerance) -> bool {
        self.m.rel_diff_eq(&other.m, rel_tolerance) && self.v.rel_diff_eq(&other.v, rel_tolerance)
    }
}

#[cfg(test)]
mod tests {
    use crate::{assert_approx_eq, vec3};

    use super::*;

    type Affine3d = Affine3<f64>;

    fn sample() -> Affine3d {
        Affine3d::from_scale(vec3(2.0, 0.5, 1.5))
            * Affine3d::from_linear(Mat3::rotation_xyz(vec3(0.3, -1.1, 2.0)))
            * Affine3d::from_translation(vec3(4.0, -2.0, 0.25))
    }

    #[test]
    fn composition_matches_application_order() {
        let a = Affine3d::from_translation(vec3(1.0, 0.0, 0.0));
        let b = Affine3d::from_linear(Mat3::rotation_z(std::f64::consts::FRAC_PI_2));

        // Translate then rotate: the translation gets rotated too.
        let p = (a * b).transform_point(Vec3::ZERO);
        assert_approx_eq!(p, vec3(0.0, 1.0, 0.0));

        // Rotate then translate.
        let p = (b * a).transform_point(Vec3::ZERO);
        assert_approx_eq!(p, vec3(1.0, 0.0, 0.0));
    }

    #[test]
    fn invert() {
        let t = sample();
        assert_approx_eq!(t * t.invert(), Affine3d::IDENTITY);
        assert_approx_eq!(t.invert() * t, Affine3d::IDENTITY);

        let p = vec3(3.0, -1.0, 7.5);
        assert_approx_eq!(t.invert().transform_point(t.transform_point(p)), p);
    }

    #[test]
    fn invert_rotation() {
        let t = Affine3d::from_linear(Mat3::rotation_xyz(vec3(0.4, 1.0, -2.2)))
            * Affine3d::from_translation(vec3(1.0, 2.0, 3.0));
        assert_approx_eq!(t.invert_rotation(), t.invert());
    }

    #[test]
    fn classify() {
        assert_eq!(Affine3d::IDENTITY.classify(), TransformKind::Identity);
        assert_eq!(
            Affine3d::from_translation(vec3(0.0, 1.0, 0.0)).classify(),
            TransformKind::Translation
        );
        assert_eq!(
            Affine3d::from_scale(vec3(2.0, 2.0, 2.0)).classify(),
            TransformKind::ScaleTranslation
        );
        assert_eq!(
            (Affine3d::from_scale(vec3(2.0, 1.0, 1.0))
                * Affine3d::from_translation(vec3(5.0, 0.0, 0.0)))
            .classify(),
            TransformKind::ScaleTranslation
        );
        assert_eq!(
            Affine3d::from_linear(Mat3::rotation_z(0.5)).classify(),
            TransformKind::General
        );

        // Near-identity noise below tolerance still classifies as identity.
        let mut t = Affine3d::IDENTITY;
        t.m[(0, 1)] = 1e-12;
        assert_eq!(t.classify(), TransformKind::Identity);
    }

    #[test]
    fn euler_transform_round_trip() {
        let t = sample();
        let euler = t.to_euler_transform();
        assert_approx_eq!(euler.to_affine(), t).abs(1e-9);
    }

    #[test]
    fn euler_transform_mirror() {
        // A mirroring transform keeps row lengths positive, so the flip must
        // land in the Z scale for the rotation part to stay proper.
        let t = Affine3d::from_scale(vec3(1.0, 1.0, -2.0))
            * Affine3d::from_linear(Mat3::rotation_xyz(vec3(0.2, 0.8, -0.5)));
        assert!(t.m.determinant() < 0.0);

        let euler = t.to_euler_transform();
        assert!(euler.scale.z < 0.0);
        assert!(euler.scale.x > 0.0 && euler.scale.y > 0.0);
        assert_approx_eq!(euler.to_affine(), t).abs(1e-9);
    }

    #[test]
    fn identity_euler_transform() {
        let euler = Affine3d::IDENTITY.to_euler_transform();
        assert_approx_eq!(euler.to_affine(), Affine3d::IDENTITY);

        // The canned identity decomposition recomposes to the identity and
        // agrees with what the identity transform actually decomposes to.
        let canned = EulerTransform::<f64>::identity();
        assert_approx_eq!(canned.to_affine(), Affine3d::IDENTITY);
        assert_approx_eq!(canned.azimuth, euler.azimuth);
        assert_approx_eq!(canned.tilt, euler.tilt);
        assert_approx_eq!(canned.roll, euler.roll);
        assert_approx_eq!(canned.scale, euler.scale);
    }
}
