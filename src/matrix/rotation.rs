//! Rotation construction and decomposition for 3x3 matrices.
//!
//! All constructors here produce *rotation matrices* (orthonormal rows,
//! determinant +1) in the row-vector convention: `v * m` rotates `v`, and
//! `a * b` applies `a` first, then `b`.
//!
//! The decompositions are closed-form and carry deterministic tie-breaks at
//! their singularities (gimbal lock, zero/half-turn rotations, antiparallel
//! directions). The tie-breaks are part of the contract: callers may depend on
//! which representative is returned, so they must not be changed.

use crate::tol::{about_zero, val_to_range};
use crate::traits::Real;
use crate::{vec3, Matrix, Vec3};

impl<T: Real> Matrix<T, 3, 3> {
    /// Creates a rotation by `angle` radians around the X axis (right-handed).
    pub fn rotation_x(angle: T) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_rows([
            [T::ONE, T::ZERO, T::ZERO],
            [T::ZERO, cos, sin],
            [T::ZERO, -sin, cos],
        ])
    }

    /// Creates a rotation by `angle` radians around the Y axis (right-handed).
    pub fn rotation_y(angle: T) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_rows([
            [cos, T::ZERO, -sin],
            [T::ZERO, T::ONE, T::ZERO],
            [sin, T::ZERO, cos],
        ])
    }

    /// Creates a rotation by `angle` radians around the Z axis (right-handed).
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform_linalg::*;
    /// use std::f32::consts::FRAC_PI_2;
    ///
    /// let m = Mat3f::rotation_z(FRAC_PI_2);
    /// assert_approx_eq!(Vec3f::X * m, Vec3f::Y);
    /// ```
    pub fn rotation_z(angle: T) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_rows([
            [cos, sin, T::ZERO],
            [-sin, cos, T::ZERO],
            [T::ZERO, T::ZERO, T::ONE],
        ])
    }

    /// Creates a rotation composed of successive rotations around the X, then
    /// Y, then Z axis.
    ///
    /// The inverse operation is [`Mat3::to_xyz_angles`].
    ///
    /// [`Mat3::to_xyz_angles`]: Self::to_xyz_angles
    pub fn rotation_xyz(angles: Vec3<T>) -> Self {
        Self::rotation_x(angles.x) * Self::rotation_y(angles.y) * Self::rotation_z(angles.z)
    }

    /// Decomposes this rotation matrix into successive X, Y, Z rotation
    /// angles, such that `Mat3::rotation_xyz(m.to_xyz_angles())`
    /// reproduces `m`.
    ///
    /// `self` must be a rotation matrix (orthonormal rows, determinant +1).
    ///
    /// At gimbal lock (Y rotation near ±90°, where the X and Z axes align)
    /// only the sum or difference of the X and Z angles is determined by the
    /// matrix. The ambiguity is resolved by returning an X angle of zero and
    /// assigning the whole rotation to Z. The decomposition is therefore not
    /// unique at the singularity, but it is deterministic.
    pub fn to_xyz_angles(&self) -> Vec3<T> {
        let sin_y = val_to_range(-self[(0, 2)], -T::ONE, T::ONE);
        let y = sin_y.asin();
        if about_zero(y.cos()) {
            // Lock: only Z±X is determined; force X to zero.
            let z = (-self[(1, 0)]).atan2(self[(1, 1)]);
            vec3(T::ZERO, y, z)
        } else {
            let x = self[(1, 2)].atan2(self[(2, 2)]);
            let z = self[(0, 1)].atan2(self[(0, 0)]);
            vec3(x, y, z)
        }
    }

    /// Creates a rotation of `angle` radians around `axis` (Rodrigues'
    /// rotation formula).
    ///
    /// `axis` must be a unit vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform_linalg::*;
    /// use std::f32::consts::PI;
    ///
    /// let m = Mat3f::rotation_axis(Vec3f::Z, PI);
    /// assert_approx_eq!(Vec3f::X * m, -Vec3f::X).abs(1e-6);
    /// ```
    pub fn rotation_axis(axis: Vec3<T>, angle: T) -> Self {
        let (sin, cos) = angle.sin_cos();
        let t = T::ONE - cos;
        let [x, y, z] = axis.into_array();
        Self::from_rows([
            [
                t * x * x + cos,
                t * x * y + sin * z,
                t * x * z - sin * y,
            ],
            [
                t * x * y - sin * z,
                t * y * y + cos,
                t * y * z + sin * x,
            ],
            [
                t * x * z + sin * y,
                t * y * z - sin * x,
                t * z * z + cos,
            ],
        ])
    }

    /// Extracts the rotation angle and axis of this rotation matrix.
    ///
    /// The angle is in `[0, π]`. When `sin(angle)` vanishes (the identity and
    /// exact half-turns) the axis cannot be recovered from the antisymmetric
    /// part of the matrix and [`None`] is returned in its place.
    ///
    /// `self` must be a rotation matrix.
    pub fn to_axis_angle(&self) -> (T, Option<Vec3<T>>) {
        let half = T::ONE / (T::ONE + T::ONE);
        let doubled = vec3(
            self[(1, 2)] - self[(2, 1)],
            self[(2, 0)] - self[(0, 2)],
            self[(0, 1)] - self[(1, 0)],
        );

        // The antisymmetric part gives sin(angle) directly; recovering the
        // angle from atan2 stays well-conditioned near 0 and π, where
        // acos((trace - 1) / 2) loses most of its precision.
        let sin = doubled.length() * half;
        let cos = (self.trace() - T::ONE) * half;
        let angle = sin.atan2(cos);
        if about_zero(sin) {
            return (angle, None);
        }

        (angle, Some(doubled / (sin + sin)))
    }

    /// Creates the rotation taking the unit vector `src` to the unit vector
    /// `trg` around their mutual perpendicular.
    ///
    /// When `src` and `trg` are antiparallel the rotation axis is not
    /// determined by the inputs; the half-turn is then performed around
    /// `fallback` (which must be a unit vector orthogonal to `src`), or
    /// around [`Vector::any_orthogonal`] of `src` if no fallback is given.
    ///
    /// [`Vector::any_orthogonal`]: crate::Vector::any_orthogonal
    pub fn rotation_between(src: Vec3<T>, trg: Vec3<T>, fallback: Option<Vec3<T>>) -> Self {
        let cross = src.cross(trg);
        let sin = cross.length();
        let cos = src.dot(trg);
        if !about_zero(sin) {
            Self::rotation_axis(cross / sin, sin.atan2(cos))
        } else if cos > T::ZERO {
            // Parallel; nothing to do.
            Self::IDENTITY
        } else {
            let axis = fallback.unwrap_or_else(|| src.any_orthogonal());
            Self::rotation_axis(axis, T::PI)
        }
    }

    /// Creates a rotation from Z-Y-Z Euler angles: a roll around Z, a tilt
    /// around Y, then an azimuth around Z.
    ///
    /// The inverse operation is [`Mat3::to_euler`].
    ///
    /// [`Mat3::to_euler`]: Self::to_euler
    pub fn euler_rotation(azimuth: T, tilt: T, roll: T) -> Self {
        Self::rotation_z(roll) * Self::rotation_y(tilt) * Self::rotation_z(azimuth)
    }

    /// Decomposes this rotation matrix into `(azimuth, tilt, roll)` Z-Y-Z
    /// Euler angles, such that
    /// `Mat3::euler_rotation(azimuth, tilt, roll)` reproduces `self`.
    ///
    /// The tilt is in `[0, π]`. When it is near `0` or `π` the two Z
    /// rotations share an axis and only their sum (respectively difference)
    /// is determined; the roll is then forced to zero and the whole Z
    /// rotation assigned to the azimuth. Deterministic, not unique.
    ///
    /// `self` must be a rotation matrix.
    pub fn to_euler(&self) -> (T, T, T) {
        let cos_tilt = val_to_range(self[(2, 2)], -T::ONE, T::ONE);
        let tilt = cos_tilt.acos();
        if about_zero(tilt.sin()) {
            let azimuth = if cos_tilt > T::ZERO {
                self[(0, 1)].atan2(self[(0, 0)])
            } else {
                (-self[(0, 1)]).atan2(-self[(0, 0)])
            };
            (azimuth, tilt, T::ZERO)
        } else {
            let azimuth = self[(2, 1)].atan2(self[(2, 0)]);
            let roll = self[(1, 2)].atan2(-self[(0, 2)]);
            (azimuth, tilt, roll)
        }
    }

    // Fixed offsets mapping each object's local axis convention onto the
    // generic Euler frame. A camera looks down -Z with its up axis a
    // quarter-turn off; a light looks down -Z.
    fn camera_offset() -> Self {
        Self::rotation_x(T::FRAC_PI_2) * Self::rotation_z(T::FRAC_PI_2)
    }

    fn light_offset() -> Self {
        Self::rotation_x(T::FRAC_PI_2)
    }

    /// [`Mat3::euler_rotation`] for camera objects: pre-rotates by the
    /// camera's fixed axis-convention offset before applying the Euler
    /// rotation.
    ///
    /// [`Mat3::euler_rotation`]: Self::euler_rotation
    pub fn euler_rotation_for_camera(azimuth: T, tilt: T, roll: T) -> Self {
        Self::camera_offset() * Self::euler_rotation(azimuth, tilt, roll)
    }

    /// Inverse of [`Mat3::euler_rotation_for_camera`]; same tie-breaks as
    /// [`Mat3::to_euler`].
    ///
    /// [`Mat3::euler_rotation_for_camera`]: Self::euler_rotation_for_camera
    /// [`Mat3::to_euler`]: Self::to_euler
    pub fn to_euler_for_camera(&self) -> (T, T, T) {
        (Self::camera_offset().transpose() * *self).to_euler()
    }

    /// [`Mat3::euler_rotation`] for light objects: pre-rotates by the light's
    /// fixed axis-convention offset before applying the Euler rotation.
    ///
    /// [`Mat3::euler_rotation`]: Self::euler_rotation
    pub fn euler_rotation_for_light(azimuth: T, tilt: T, roll: T) -> Self {
        Self::light_offset() * Self::euler_rotation(azimuth, tilt, roll)
    }

    /// Inverse of [`Mat3::euler_rotation_for_light`]; same tie-breaks as
    /// [`Mat3::to_euler`].
    ///
    /// [`Mat3::euler_rotation_for_light`]: Self::euler_rotation_for_light
    /// [`Mat3::to_euler`]: Self::to_euler
    pub fn to_euler_for_light(&self) -> (T, T, T) {
        (Self::light_offset().transpose() * *self).to_euler()
    }

    /// Creates a rotation taking the unit direction `src` to the unit
    /// direction `dst`, followed by a twist of `twist` radians around `dst`.
    ///
    /// The src-to-dst leg is the minimal rotation (see
    /// [`Mat3::rotation_between`]), which canonicalizes the alignment of the
    /// planes perpendicular to the two directions and makes
    /// [`Mat3::to_dir_twist`] the exact inverse.
    ///
    /// [`Mat3::rotation_between`]: Self::rotation_between
    /// [`Mat3::to_dir_twist`]: Self::to_dir_twist
    pub fn dir_twist_rotation(src: Vec3<T>, dst: Vec3<T>, twist: T) -> Self {
        Self::rotation_between(src, dst, None) * Self::rotation_axis(dst, twist)
    }

    /// Recovers the destination direction and twist angle of a rotation built
    /// like [`Mat3::dir_twist_rotation`], given the source direction it was
    /// built for.
    ///
    /// The twist leg is isolated by un-rotating `self` with the transpose of
    /// the minimal src-to-dst rotation; its angle comes from axis-angle
    /// extraction, with the sign resolved by the dot product between the
    /// recovered axis and the destination direction.
    ///
    /// `self` must be a rotation matrix and `src` a unit vector.
    ///
    /// [`Mat3::dir_twist_rotation`]: Self::dir_twist_rotation
    pub fn to_dir_twist(&self, src: Vec3<T>) -> (Vec3<T>, T) {
        let dst = (src * *self).normalize();
        let swing = Self::rotation_between(src, dst, None);
        let twist_mat = swing.transpose() * *self;
        let (angle, axis) = twist_mat.to_axis_angle();
        let twist = match axis {
            Some(axis) if axis.dot(dst) < T::ZERO => -angle,
            Some(_) => angle,
            None => {
                // Identity twist, or an exact half-turn whose sign is
                // genuinely ambiguous; report the magnitude.
                angle
            }
        };
        (dst, twist)
    }

    /// Returns the lengths of the three rows.
    ///
    /// For a matrix composed of per-axis scales and a rotation (no shear),
    /// these are the scale factors. This is the "lazy" row-length
    /// decomposition, not a polar one: shear ends up misattributed.
    pub fn scale(&self) -> Vec3<T> {
        vec3(
            self.row(0).length(),
            self.row(1).length(),
            self.row(2).length(),
        )
    }

    /// Rescales each row to the corresponding length in `scale`.
    ///
    /// Rows must be non-zero.
    pub fn set_scale(&mut self, scale: Vec3<T>) {
        for i in 0..3 {
            let row = self.row(i);
            self.set_row(i, row.normalize() * scale[i]);
        }
    }

    /// Normalizes each row to unit length, removing row-length scale.
    ///
    /// Zero rows are left unchanged.
    pub fn normalize_rows(&mut self) {
        for i in 0..3 {
            let mut row = self.row(i);
            row.normalize_mod();
            self.set_row(i, row);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use crate::{assert_approx_eq, Mat3, Mat3f, Vec3f};

    use super::*;

    type Mat3d = Mat3<f64>;
    type Vec3d = Vec3<f64>;

    const ANGLES: [f64; 7] = [-2.9, -1.7, -0.8, 0.0, 0.3, 1.2, 2.5];

    fn sample_rotations() -> Vec<Mat3d> {
        let mut out = Vec::new();
        for x in ANGLES {
            for y in ANGLES {
                for z in ANGLES {
                    out.push(Mat3d::rotation_xyz(vec3(x, y, z)));
                }
            }
        }
        out
    }

    #[test]
    fn axis_rotations() {
        let m = Mat3f::rotation_z(FRAC_PI_2 as f32);
        assert_approx_eq!(Vec3f::X * m, Vec3f::Y).abs(1e-6);
        assert_approx_eq!(Vec3f::Y * m, -Vec3f::X).abs(1e-6);

        let m = Mat3f::rotation_x(FRAC_PI_2 as f32);
        assert_approx_eq!(Vec3f::Y * m, Vec3f::Z).abs(1e-6);

        let m = Mat3f::rotation_y(FRAC_PI_2 as f32);
        assert_approx_eq!(Vec3f::X * m, -Vec3f::Z).abs(1e-6);

        // Rotation matrices are orthonormal with determinant +1.
        for angle in [-2.0, -0.5, 0.0, 1.0, 3.0] {
            let m = Mat3d::rotation_y(angle);
            assert_approx_eq!(m.determinant(), 1.0);
            assert_approx_eq!(m * m.transpose(), Mat3d::IDENTITY);
        }
    }

    #[test]
    fn composition_order_is_application_order() {
        // `a * b` transforms by `a`, then by `b`.
        let a = Mat3d::rotation_x(0.7);
        let b = Mat3d::rotation_z(-1.1);
        let v = vec3(0.2, -3.0, 1.5);
        assert_approx_eq!(v * (a * b), (v * a) * b);
    }

    #[test]
    fn xyz_angles_round_trip() {
        for m in sample_rotations() {
            let angles = m.to_xyz_angles();
            assert_approx_eq!(Mat3d::rotation_xyz(angles), m, "angles {angles:?}").abs(1e-9);
        }
    }

    #[test]
    fn xyz_angles_gimbal_lock() {
        for y in [FRAC_PI_2, -FRAC_PI_2] {
            let m = Mat3d::rotation_xyz(vec3(0.4, y, -0.9));
            let angles = m.to_xyz_angles();
            // The ambiguous component is assigned to Z; X is forced to zero.
            assert_eq!(angles.x, 0.0);
            assert_approx_eq!(Mat3d::rotation_xyz(angles), m).abs(1e-9);
        }
    }

    #[test]
    fn axis_angle_round_trip() {
        for (axis, angle) in [
            (Vec3d::Z, 1.0),
            (Vec3d::X, 2.9),
            (vec3(1.0, -2.0, 0.5).normalize(), 0.001),
            // Tiny angles must survive the round trip; the extraction has to
            // avoid the inverse-cosine precision cliff at angle 0.
            (Vec3d::Y, 1e-7),
            (vec3(-1.0, -1.0, -1.0).normalize(), 3.0),
        ] {
            let m = Mat3d::rotation_axis(axis, angle);
            let (out_angle, out_axis) = m.to_axis_angle();
            assert_approx_eq!(out_angle, angle).abs(1e-9);
            assert_approx_eq!(out_axis.unwrap(), axis).abs(1e-9);
        }
    }

    #[test]
    fn axis_angle_degenerate() {
        let (angle, axis) = Mat3d::IDENTITY.to_axis_angle();
        assert_eq!(angle, 0.0);
        assert!(axis.is_none());

        // Half turns have no antisymmetric part either.
        let (angle, axis) = Mat3d::rotation_axis(Vec3d::Y, PI).to_axis_angle();
        assert_approx_eq!(angle, PI);
        assert!(axis.is_none());
    }

    #[test]
    fn rotation_between() {
        let src = vec3(1.0, 2.0, -0.5).normalize();
        let trg = vec3(-0.3, 0.4, 2.0).normalize();
        let m = Mat3d::rotation_between(src, trg, None);
        assert_approx_eq!(src * m, trg);

        // Parallel inputs produce the identity.
        assert_eq!(Mat3d::rotation_between(src, src, None), Mat3d::IDENTITY);
    }

    #[test]
    fn rotation_between_antiparallel() {
        let src = Vec3d::X;

        // Without a fallback the axis comes from `any_orthogonal`.
        let m = Mat3d::rotation_between(src, -src, None);
        assert_approx_eq!(src * m, -src);

        // A caller-supplied fallback axis is honored.
        let m = Mat3d::rotation_between(src, -src, Some(Vec3d::Z));
        assert_approx_eq!(src * m, -src);
        assert_approx_eq!(m, Mat3d::rotation_axis(Vec3d::Z, PI));
    }

    #[test]
    fn euler_round_trip() {
        for az in ANGLES {
            for tilt in [0.1, 0.9, 1.8, 2.9] {
                for roll in ANGLES {
                    let m = Mat3d::euler_rotation(az, tilt, roll);
                    let (a, t, r) = m.to_euler();
                    assert_approx_eq!(Mat3d::euler_rotation(a, t, r), m).abs(1e-9);
                }
            }
        }
    }

    #[test]
    fn euler_lock() {
        // Zero tilt: both Z rotations collapse; roll is forced to zero.
        let m = Mat3d::euler_rotation(0.5, 0.0, 0.25);
        let (a, t, r) = m.to_euler();
        assert_eq!(r, 0.0);
        assert_approx_eq!(t, 0.0);
        assert_approx_eq!(a, 0.75);
        assert_approx_eq!(Mat3d::euler_rotation(a, t, r), m);

        // Tilt of pi: only the difference is determined.
        let m = Mat3d::euler_rotation(0.5, PI, 0.25);
        let (a, t, r) = m.to_euler();
        assert_eq!(r, 0.0);
        assert_approx_eq!(Mat3d::euler_rotation(a, t, r), m);
    }

    #[test]
    fn euler_camera_light_round_trip() {
        for (az, tilt, roll) in [(0.3, 1.0, -0.7), (-2.0, 2.5, 0.1), (1.5, 0.4, 3.0)] {
            let m = Mat3d::euler_rotation_for_camera(az, tilt, roll);
            let (a, t, r) = m.to_euler_for_camera();
            assert_approx_eq!(Mat3d::euler_rotation_for_camera(a, t, r), m).abs(1e-9);

            let m = Mat3d::euler_rotation_for_light(az, tilt, roll);
            let (a, t, r) = m.to_euler_for_light();
            assert_approx_eq!(Mat3d::euler_rotation_for_light(a, t, r), m).abs(1e-9);
        }
    }

    #[test]
    fn dir_twist_round_trip() {
        let src = vec3(0.0, 0.0, 1.0);
        for dst in [
            vec3(1.0, 1.0, 0.2).normalize(),
            vec3(-0.5, 0.25, -1.0).normalize(),
            Vec3d::Z,
        ] {
            for twist in [-2.0, -0.5, 0.0, 0.7, 2.9] {
                let m = Mat3d::dir_twist_rotation(src, dst, twist);
                let (out_dst, out_twist) = m.to_dir_twist(src);
                assert_approx_eq!(out_dst, dst).abs(1e-9);
                assert_approx_eq!(out_twist, twist, "dst {dst:?} twist {twist}").abs(1e-9);
                assert_approx_eq!(Mat3d::dir_twist_rotation(src, out_dst, out_twist), m).abs(1e-9);
            }
        }
    }

    #[test]
    fn row_scale() {
        let mut m = Mat3d::rotation_xyz(vec3(0.2, -0.4, 1.0));
        assert_approx_eq!(m.scale(), vec3(1.0, 1.0, 1.0));

        m.set_scale(vec3(2.0, 3.0, 0.5));
        assert_approx_eq!(m.scale(), vec3(2.0, 3.0, 0.5));

        m.normalize_rows();
        assert_approx_eq!(m.scale(), vec3(1.0, 1.0, 1.0));
    }
}
