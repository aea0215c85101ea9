//! Axis-aligned bounding boxes.

use serde::{Deserialize, Serialize};

use crate::tol::about_zero;
use crate::traits::Real;
use crate::{Affine3, Vector};

/// An axis-aligned bounding box in `N` dimensions, stored as its minimum and
/// maximum corners.
///
/// Containment and overlap tests are *inclusive*: a point on a face is inside,
/// and two boxes sharing only a face intersect.
///
/// The empty box is represented by inverted bounds (`min > max`, see
/// [`BBox::empty`]); including a point into it yields the degenerate box
/// around that point.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct BBox<T, const N: usize> {
    pub min: Vector<T, N>,
    pub max: Vector<T, N>,
}

#[rustfmt::skip]
unsafe impl<T: bytemuck::Zeroable, const N: usize> bytemuck::Zeroable for BBox<T, N> {}
unsafe impl<T: bytemuck::Pod, const N: usize> bytemuck::Pod for BBox<T, N> {}

/// A 1-dimensional bounding box (an interval).
pub type BBox1<T> = BBox<T, 1>;
/// A 2-dimensional bounding box (a rectangle).
pub type BBox2<T> = BBox<T, 2>;
/// A 3-dimensional bounding box.
pub type BBox3<T> = BBox<T, 3>;
/// A 2-dimensional bounding box with [`f32`] coordinates.
pub type BBox2f = BBox2<f32>;
/// A 3-dimensional bounding box with [`f32`] coordinates.
pub type BBox3f = BBox3<f32>;

/// Which face category a ray hit: entering or leaving the box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The ray origin was outside and the hit is where it enters the box.
    Enter,
    /// The ray origin was inside and the hit is where it leaves the box.
    Exit,
}

impl<T: Real, const N: usize> BBox<T, N> {
    /// Creates a bounding box from its corners.
    ///
    /// `min` must be component-wise less than or equal to `max`, unless the
    /// box is meant to be empty.
    pub fn new(min: Vector<T, N>, max: Vector<T, N>) -> Self {
        Self { min, max }
    }

    /// Creates the empty box, with inverted infinite-like bounds.
    ///
    /// Including any point into it yields the degenerate box around that
    /// point, which makes it the identity for incremental bound building.
    pub fn empty() -> Self {
        Self {
            min: Vector::splat(T::MAX),
            max: Vector::splat(T::MIN),
        }
    }

    /// Creates the smallest box containing every point of `points`.
    ///
    /// Returns [`BBox::empty`] for an empty iterator.
    pub fn containing<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vector<T, N>>,
    {
        let mut bbox = Self::empty();
        for point in points {
            bbox.include(point);
        }
        bbox
    }

    /// Returns `true` if this box contains no points (any `min` component
    /// exceeds the corresponding `max`).
    pub fn is_empty(&self) -> bool {
        (0..N).any(|i| self.min[i] > self.max[i])
    }

    /// Returns `true` if this box contains at least one point.
    pub fn not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Grows this box (in place) to contain `point`.
    pub fn include(&mut self, point: Vector<T, N>) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Grows this box (in place) to contain all of `other`.
    ///
    /// An empty `other` leaves `self` unchanged.
    pub fn include_box(&mut self, other: &Self) {
        if other.not_empty() {
            self.include(other.min);
            self.include(other.max);
        }
    }

    /// Shrinks this box (in place) to its intersection with `other`.
    ///
    /// Disjoint boxes produce an empty result.
    pub fn intersect(&mut self, other: &Self) {
        self.min = self.min.max(other.min);
        self.max = self.max.min(other.max);
    }

    /// Returns `true` if `point` lies inside this box (faces included).
    pub fn includes(&self, point: Vector<T, N>) -> bool {
        (0..N).all(|i| self.min[i] <= point[i] && point[i] <= self.max[i])
    }

    /// Returns `true` if this box and `other` overlap (shared faces count).
    pub fn intersects(&self, other: &Self) -> bool {
        (0..N).all(|i| self.min[i] <= other.max[i] && other.min[i] <= self.max[i])
    }

    /// Returns the center of this box.
    pub fn center(&self) -> Vector<T, N> {
        let half = T::ONE / (T::ONE + T::ONE);
        (self.min + self.max) * half
    }

    /// Returns the extent of this box along each axis.
    pub fn size(&self) -> Vector<T, N> {
        self.max - self.min
    }

    /// Intersects the ray `origin + t * dir` with this box (slab test).
    ///
    /// Returns the distance `t` of the nearest hit within
    /// `[0, max_distance]`, along with whether the ray enters the box there
    /// or (for an origin inside the box) exits it. Returns [`None`] for a
    /// miss, an empty box, or hits beyond `max_distance`.
    ///
    /// `dir` does not need to be normalized; `t` is in units of its length.
    pub fn ray_intersection(
        &self,
        origin: Vector<T, N>,
        dir: Vector<T, N>,
        max_distance: T,
    ) -> Option<(T, Side)> {
        let mut t_enter = T::MIN;
        let mut t_exit = T::MAX;
        for i in 0..N {
            if about_zero(dir[i]) {
                // Parallel to this slab: the origin must already be inside it.
                if origin[i] < self.min[i] || origin[i] > self.max[i] {
                    return None;
                }
            } else {
                let inv = T::ONE / dir[i];
                let t0 = (self.min[i] - origin[i]) * inv;
                let t1 = (self.max[i] - origin[i]) * inv;
                let (near, far) = if t0 < t1 { (t0, t1) } else { (t1, t0) };
                t_enter = t_enter.max(near);
                t_exit = t_exit.min(far);
                if t_enter > t_exit {
                    return None;
                }
            }
        }

        if t_enter >= T::ZERO && t_enter <= max_distance {
            Some((t_enter, Side::Enter))
        } else if t_exit >= T::ZERO && t_exit <= max_distance {
            // Entering behind the origin means we started inside the box.
            Some((t_exit, Side::Exit))
        } else {
            None
        }
    }
}

impl<T: Real> BBox<T, 3> {
    /// Returns the axis-aligned box containing this box's eight corners after
    /// transforming them by `transform`.
    ///
    /// An empty box stays empty.
    pub fn transformed(&self, transform: &Affine3<T>) -> Self {
        if self.is_empty() {
            return Self::empty();
        }

        let mut out = Self::empty();
        for bits in 0..8u32 {
            let corner = Vector::from_fn(|i| {
                if bits & (1 << i) == 0 {
                    self.min[i]
                } else {
                    self.max[i]
                }
            });
            out.include(transform.transform_point(corner));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::{assert_approx_eq, vec2, vec3, Affine3, Mat3};

    use super::*;

    type BBox2d = BBox2<f64>;
    type BBox3d = BBox3<f64>;

    #[test]
    fn empty() {
        let empty = BBox3d::empty();
        assert!(empty.is_empty());
        assert!(!empty.not_empty());
        assert!(!empty.includes(vec3(0.0, 0.0, 0.0)));

        let mut bbox = empty;
        bbox.include(vec3(1.0, 2.0, 3.0));
        assert!(bbox.not_empty());
        assert_eq!(bbox.min, bbox.max);
        assert_eq!(bbox.center(), vec3(1.0, 2.0, 3.0));
    }

    #[test]
    fn include() {
        let mut bbox = BBox2d::empty();
        bbox.include(vec2(1.0, -1.0));
        bbox.include(vec2(-2.0, 3.0));
        assert_eq!(bbox.min, vec2(-2.0, -1.0));
        assert_eq!(bbox.max, vec2(1.0, 3.0));
        assert_eq!(bbox.size(), vec2(3.0, 4.0));

        // Including a contained point changes nothing.
        let before = bbox;
        bbox.include(vec2(0.0, 0.0));
        assert_eq!(bbox, before);

        bbox.include_box(&BBox2d::empty());
        assert_eq!(bbox, before);
    }

    #[test]
    fn containing() {
        let bbox = BBox2d::containing([vec2(0.0, 5.0), vec2(2.0, 1.0), vec2(-1.0, 2.0)]);
        assert_eq!(bbox.min, vec2(-1.0, 1.0));
        assert_eq!(bbox.max, vec2(2.0, 5.0));

        assert!(BBox2d::containing([]).is_empty());
    }

    #[test]
    fn inclusive_containment() {
        let bbox = BBox2d::new(vec2(0.0, 0.0), vec2(1.0, 1.0));
        assert!(bbox.includes(vec2(0.5, 0.5)));
        // Points on faces and corners are inside.
        assert!(bbox.includes(vec2(0.0, 0.5)));
        assert!(bbox.includes(vec2(1.0, 1.0)));
        assert!(!bbox.includes(vec2(1.1, 0.5)));
    }

    #[test]
    fn intersection() {
        let a = BBox2d::new(vec2(0.0, 0.0), vec2(2.0, 2.0));
        let b = BBox2d::new(vec2(1.0, 1.0), vec2(3.0, 3.0));
        assert!(a.intersects(&b));

        let mut i = a;
        i.intersect(&b);
        assert_eq!(i, BBox2d::new(vec2(1.0, 1.0), vec2(2.0, 2.0)));

        // Intersecting again is idempotent.
        i.intersect(&b);
        assert_eq!(i, BBox2d::new(vec2(1.0, 1.0), vec2(2.0, 2.0)));

        // Boxes sharing only a face still intersect.
        let c = BBox2d::new(vec2(2.0, 0.0), vec2(4.0, 2.0));
        assert!(a.intersects(&c));

        // Disjoint boxes intersect to the empty box.
        let d = BBox2d::new(vec2(5.0, 5.0), vec2(6.0, 6.0));
        assert!(!a.intersects(&d));
        let mut i = a;
        i.intersect(&d);
        assert!(i.is_empty());
    }

    #[test]
    fn ray_enter() {
        let bbox = BBox3d::new(vec3(-1.0, -1.0, -1.0), vec3(1.0, 1.0, 1.0));
        let (t, side) = bbox
            .ray_intersection(vec3(-5.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), 100.0)
            .unwrap();
        assert_eq!(side, Side::Enter);
        assert_approx_eq!(t, 4.0);

        // Out of range.
        assert_eq!(
            bbox.ray_intersection(vec3(-5.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), 3.0),
            None
        );
        // Pointing away.
        assert_eq!(
            bbox.ray_intersection(vec3(-5.0, 0.0, 0.0), vec3(-1.0, 0.0, 0.0), 100.0),
            None
        );
        // Parallel to a slab, outside of it.
        assert_eq!(
            bbox.ray_intersection(vec3(-5.0, 2.0, 0.0), vec3(1.0, 0.0, 0.0), 100.0),
            None
        );
    }

    #[test]
    fn ray_exit() {
        let bbox = BBox3d::new(vec3(-1.0, -1.0, -1.0), vec3(1.0, 1.0, 1.0));
        let (t, side) = bbox
            .ray_intersection(vec3(0.0, 0.5, 0.0), vec3(0.0, 1.0, 0.0), 100.0)
            .unwrap();
        assert_eq!(side, Side::Exit);
        assert_approx_eq!(t, 0.5);
    }

    #[test]
    fn ray_misses_empty() {
        assert_eq!(
            BBox3d::empty().ray_intersection(vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), 100.0),
            None
        );
    }

    #[test]
    fn transformed() {
        let bbox = BBox3d::new(vec3(0.0, 0.0, 0.0), vec3(2.0, 1.0, 1.0));
        let t = Affine3::from_linear(Mat3::rotation_z(std::f64::consts::FRAC_PI_2))
            * Affine3::from_translation(vec3(10.0, 0.0, 0.0));
        let out = bbox.transformed(&t);
        assert_approx_eq!(out.min, vec3(9.0, 0.0, 0.0));
        assert_approx_eq!(out.max, vec3(10.0, 2.0, 1.0));

        assert!(BBox3d::empty().transformed(&t).is_empty());
    }
}
