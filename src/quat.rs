//! Unit quaternions for representing and interpolating rotations.

use crate::tol::{about_zero, val_to_range};
use crate::traits::Real;
use crate::{vec3, vec4, Mat3, Vec3, Vec4, Vector};

mod ops;

/// A quaternion with components `x`, `y`, `z` (imaginary) and `w` (real).
///
/// Rotation quaternions follow the same composition convention as matrices:
/// `p * q` applies `p` first, then `q`, and
/// `(p * q).to_rotation() == p.to_rotation() * q.to_rotation()`.
///
/// A quaternion must be normalized to represent a rotation; the conversion
/// methods assume this and do not renormalize.
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct Quat<T> {
    pub(crate) vec: Vector<T, 4>,
}

/// A quaternion with [`f32`] components.
pub type Quatf = Quat<f32>;

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Quat<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Quat<T> {}

impl<T: Real> Quat<T> {
    /// The identity rotation: `(0, 0, 0, 1)`.
    pub const IDENTITY: Self = Self {
        vec: Vector::<T, 4>::W,
    };

    /// Creates a quaternion from its four components.
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Self {
            vec: vec4(x, y, z, w),
        }
    }

    /// Creates a rotation of `angle` radians around `axis`.
    ///
    /// `axis` must be a unit vector.
    pub fn from_axis_angle(axis: Vec3<T>, angle: T) -> Self {
        let half = T::ONE / (T::ONE + T::ONE);
        let (sin, cos) = (angle * half).sin_cos();
        Self {
            vec: (axis * sin).extend(cos),
        }
    }

    /// Creates a rotation of `angle` radians around the X axis.
    pub fn rotation_x(angle: T) -> Self {
        Self::from_axis_angle(Vec3::X, angle)
    }

    /// Creates a rotation of `angle` radians around the Y axis.
    pub fn rotation_y(angle: T) -> Self {
        Self::from_axis_angle(Vec3::Y, angle)
    }

    /// Creates a rotation of `angle` radians around the Z axis.
    pub fn rotation_z(angle: T) -> Self {
        Self::from_axis_angle(Vec3::Z, angle)
    }

    /// Converts a rotation matrix to the equivalent unit quaternion
    /// (Shepperd's method: branch on the largest of the trace and the
    /// diagonal elements for numerical stability).
    ///
    /// `m` must be a rotation matrix. The result is determined up to sign;
    /// the branch taken picks the representative.
    pub fn from_rotation(m: Mat3<T>) -> Self {
        let one = T::ONE;
        let two = one + one;
        let four = two + two;
        let [[m00, m01, m02], [m10, m11, m12], [m20, m21, m22]] = m.into_rows();

        let trace = m00 + m11 + m22;
        if trace > T::ZERO {
            let w = (one + trace).sqrt() / two;
            let inv = one / (four * w);
            Self::new(
                (m12 - m21) * inv,
                (m20 - m02) * inv,
                (m01 - m10) * inv,
                w,
            )
        } else if m00 > m11 && m00 > m22 {
            let s = (one + m00 - m11 - m22).sqrt() * two;
            Self::new(
                s / four,
                (m01 + m10) / s,
                (m02 + m20) / s,
                (m12 - m21) / s,
            )
        } else if m11 > m22 {
            let s = (one + m11 - m00 - m22).sqrt() * two;
            Self::new(
                (m01 + m10) / s,
                s / four,
                (m12 + m21) / s,
                (m20 - m02) / s,
            )
        } else {
            let s = (one + m22 - m00 - m11).sqrt() * two;
            Self::new(
                (m02 + m20) / s,
                (m12 + m21) / s,
                s / four,
                (m01 - m10) / s,
            )
        }
    }

    /// Converts this unit quaternion to the equivalent rotation matrix.
    ///
    /// `q` and `-q` produce the same matrix.
    pub fn to_rotation(self) -> Mat3<T> {
        let one = T::ONE;
        let two = one + one;
        let [x, y, z, w] = self.vec.into_array();

        Mat3::from_rows([
            [
                one - two * (y * y + z * z),
                two * (x * y + z * w),
                two * (x * z - y * w),
            ],
            [
                two * (x * y - z * w),
                one - two * (x * x + z * z),
                two * (y * z + x * w),
            ],
            [
                two * (x * z + y * w),
                two * (y * z - x * w),
                one - two * (x * x + y * y),
            ],
        ])
    }

    /// Extracts the rotation angle and axis.
    ///
    /// The angle is in `[0, 2π]`. For rotations with no imaginary part (the
    /// identity and its negation) the axis is undefined and [`None`] is
    /// returned in its place.
    pub fn to_axis_angle(self) -> (T, Option<Vec3<T>>) {
        let two = T::ONE + T::ONE;
        let w = val_to_range(self.w, -T::ONE, T::ONE);
        let angle = two * w.acos();
        let sin = (T::ONE - w * w).sqrt();
        if about_zero(sin) {
            (angle, None)
        } else {
            (angle, Some(vec3(self.x, self.y, self.z) / sin))
        }
    }

    /// Returns the four-dimensional dot product of the component vectors.
    pub fn dot(self, other: Self) -> T {
        self.vec.dot(other.vec)
    }

    /// Returns the squared magnitude of this quaternion.
    pub fn length2(self) -> T {
        self.vec.length2()
    }

    /// Returns the magnitude of this quaternion (1 for rotations).
    pub fn length(self) -> T {
        self.vec.length()
    }

    /// Normalizes this quaternion to unit length.
    ///
    /// The zero quaternion has no direction to preserve; it normalizes to
    /// [`Quat::IDENTITY`].
    pub fn normalize(self) -> Self {
        let len = self.length();
        if about_zero(len) {
            Self::IDENTITY
        } else {
            Self {
                vec: self.vec / len,
            }
        }
    }

    /// Returns the conjugate, which for a unit quaternion is the inverse
    /// rotation.
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Returns `true` if this quaternion equals [`Quat::IDENTITY`] exactly.
    ///
    /// Used for default-value elision when serializing; exact, not
    /// tolerance-based.
    pub fn is_identity(&self) -> bool {
        self.vec == Vector::<T, 4>::W
    }

    /// Spherically interpolates between `self` (at `t == 0`) and `other` (at
    /// `t == 1`) along the shorter great-circle arc.
    ///
    /// Nearly identical endpoints fall back to linear interpolation. For
    /// antipodal endpoints (`dot ≈ -1`) the arc is not unique; a fixed
    /// perpendicular representative of `-other` is interpolated towards
    /// instead, which keeps the result continuous in `t` but picks an
    /// arbitrary plane. Callers that care should flip one endpoint's sign
    /// beforehand.
    pub fn slerp(self, other: Self, t: T) -> Self {
        let cos = self.dot(other);
        if T::ONE + cos > T::TOLERANCE {
            let (scale0, scale1) = if T::ONE - cos > T::TOLERANCE {
                let omega = cos.acos();
                let sin = omega.sin();
                (
                    (((T::ONE - t) * omega).sin()) / sin,
                    ((t * omega).sin()) / sin,
                )
            } else {
                (T::ONE - t, t)
            };
            Self {
                vec: self.vec * scale0 + other.vec * scale1,
            }
        } else {
            let dest = vec4(-self.y, self.x, -self.w, self.z);
            let scale0 = ((T::ONE - t) * T::FRAC_PI_2).sin();
            let scale1 = (t * T::FRAC_PI_2).sin();
            Self {
                vec: self.vec * scale0 + dest * scale1,
            }
        }
    }

    /// Spherical cubic interpolation between `self` and `q`, with inner
    /// control points `a` and `b` shaping the curve.
    ///
    /// `t == 0` yields `self` and `t == 1` yields `q`; the control points are
    /// only approached, in the manner of a Bézier curve.
    pub fn squad(self, a: Self, b: Self, q: Self, t: T) -> Self {
        let two = T::ONE + T::ONE;
        let outer = self.slerp(q, t);
        let inner = a.slerp(b, t);
        outer.slerp(inner, two * t * (T::ONE - t))
    }

    /// [`Quat::squad`] for rotations of more than a full turn.
    ///
    /// Quaternions only represent angles up to `2π`, so the whole turns of
    /// `angle` (around `axis`) are stripped off and re-applied as an extra
    /// spin on top of the squad curve through `p`, `a`, `b`, `q`.
    #[allow(clippy::too_many_arguments)]
    pub fn squad_rev(angle: T, axis: Vec3<T>, p: Self, a: Self, b: Self, q: Self, t: T) -> Self {
        let turns = if angle > T::TAU {
            // An exact multiple keeps its last turn in the curve rather than
            // the spin, like stripping by repeated subtraction would.
            let ratio = angle / T::TAU;
            let whole = ratio.floor();
            if whole == ratio {
                whole - T::ONE
            } else {
                whole
            }
        } else {
            T::ZERO
        };

        let curve = p.squad(a, b, q, t);
        if turns == T::ZERO {
            return curve;
        }
        let spin = Self::from_axis_angle(axis, t * turns * T::TAU);
        curve * spin
    }
}

impl<T: Real> Default for Quat<T> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<T> From<Vec4<T>> for Quat<T> {
    fn from(vec: Vec4<T>) -> Self {
        Self { vec }
    }
}

impl<T> From<Quat<T>> for Vec4<T> {
    fn from(quat: Quat<T>) -> Self {
        quat.vec
    }
}
