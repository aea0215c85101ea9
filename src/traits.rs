use std::ops;

/// Types that support the trigonometric functions.
pub trait Trig {
    /// Computes the sine of the angle `self` (in radians).
    fn sin(self) -> Self;
    /// Computes the cosine of the angle `self` (in radians).
    fn cos(self) -> Self;
    /// Computes the tangent of the angle `self` (in radians).
    fn tan(self) -> Self;
    fn asin(self) -> Self;
    fn acos(self) -> Self;
    fn atan(self) -> Self;
    fn atan2(self, other: Self) -> Self;

    /// Computes sine and cosine of `self` together.
    fn sin_cos(self) -> (Self, Self)
    where
        Self: Copy,
    {
        (self.sin(), self.cos())
    }
}

/// Types that support computing their square root.
pub trait Sqrt {
    fn sqrt(self) -> Self;
}

/// Types that support rounding towards negative infinity.
pub trait Floor {
    fn floor(self) -> Self;
}

/// Types that support a `min` and `max` operation.
///
/// [`f32`] and [`f64`] implement this trait in terms of the [`f32::min`] and [`f32::max`] functions
/// ([`f64::min`] and [`f64::max`] respectively). Built-in integer types implement it in terms of
/// [`Ord::min`] and [`Ord::max`].
pub trait MinMax: Sized {
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
    fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }
}
macro_rules! ord_min_max {
    ($($types:ty),+) => {
        $(
            impl MinMax for $types {
                fn min(self, other: Self) -> Self {
                    Ord::min(self, other)
                }

                fn max(self, other: Self) -> Self {
                    Ord::max(self, other)
                }
            }
        )+
    };
}
ord_min_max!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);
impl MinMax for f32 {
    fn min(self, other: Self) -> Self {
        self.min(other)
    }

    fn max(self, other: Self) -> Self {
        self.max(other)
    }
}
impl MinMax for f64 {
    fn min(self, other: Self) -> Self {
        self.min(other)
    }

    fn max(self, other: Self) -> Self {
        self.max(other)
    }
}

/// Types that have a "zero" value (an additive identity).
pub trait Zero {
    /// The *0* value of this type.
    const ZERO: Self;
}

/// Types that have a "one" value (a multiplicative identity).
pub trait One {
    /// The *1* value of this type.
    const ONE: Self;
}

/// Types with a smallest and largest finite value.
///
/// Used for "running extremum" seeds, most notably the empty bounding box
/// sentinel (`min = MAX`, `max = MIN`).
pub trait Bounded {
    /// The smallest finite value of this type.
    const MIN: Self;
    /// The largest finite value of this type.
    const MAX: Self;
}

/// The tolerance table: per-type comparison slack.
///
/// Two parallel comparison families are built on these constants (see
/// [`crate::tol`]):
///
/// - the "about" family uses [`TOLERANCE`][Self::TOLERANCE], which depends on
///   the precision of the type;
/// - the "near" family uses [`EPSILON`][Self::EPSILON], a fixed geometric
///   slack that is the same for every type.
pub trait Tolerance {
    /// Type-dependent default comparison tolerance.
    const TOLERANCE: Self;
    /// Type-independent geometric epsilon.
    const EPSILON: Self;
}

/// Common mathematical constants.
pub trait Consts {
    const PI: Self;
    const TAU: Self;
    const FRAC_PI_2: Self;
}

/// A trait for numeric types that support basic arithmetic operations.
pub trait Number:
    Zero
    + One
    + ops::Neg<Output = Self>
    + ops::Add<Output = Self>
    + ops::Sub<Output = Self>
    + ops::Mul<Output = Self>
    + ops::Div<Output = Self>
    + PartialEq
    + Copy
{
}
impl<T> Number for T where
    T: Zero
        + One
        + ops::Neg<Output = Self>
        + ops::Add<Output = Self>
        + ops::Sub<Output = Self>
        + ops::Mul<Output = Self>
        + ops::Div<Output = Self>
        + PartialEq
        + Copy
{
}

/// A trait for floating-point element types.
///
/// Everything the rotation and decomposition algebra needs: arithmetic,
/// trigonometry, square roots, ordering, and the tolerance table.
pub trait Real:
    Number + Trig + Sqrt + Floor + MinMax + Bounded + Tolerance + Consts + PartialOrd
{
}
impl<T> Real for T where
    T: Number + Trig + Sqrt + Floor + MinMax + Bounded + Tolerance + Consts + PartialOrd
{
}

macro_rules! zero_one {
    ($zero:expr, $one:expr; $($types:ty),+) => {
        $(
            impl Zero for $types {
                const ZERO: Self = $zero;
            }
            impl One for $types {
                const ONE: Self = $one;
            }
        )+
    };
}
zero_one!(0, 1; u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);
zero_one!(0.0, 1.0; f32, f64);

macro_rules! bounded {
    ($($types:ty),+) => {
        $(
            impl Bounded for $types {
                const MIN: Self = <$types>::MIN;
                const MAX: Self = <$types>::MAX;
            }
        )+
    };
}
bounded!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

impl Tolerance for f32 {
    const TOLERANCE: Self = 1e-5;
    const EPSILON: Self = 1e-4;
}
impl Tolerance for f64 {
    const TOLERANCE: Self = 1e-10;
    const EPSILON: Self = 1e-4;
}

impl Consts for f32 {
    const PI: Self = std::f32::consts::PI;
    const TAU: Self = std::f32::consts::TAU;
    const FRAC_PI_2: Self = std::f32::consts::FRAC_PI_2;
}
impl Consts for f64 {
    const PI: Self = std::f64::consts::PI;
    const TAU: Self = std::f64::consts::TAU;
    const FRAC_PI_2: Self = std::f64::consts::FRAC_PI_2;
}

impl Trig for f32 {
    fn sin(self) -> Self {
        self.sin()
    }

    fn cos(self) -> Self {
        self.cos()
    }

    fn tan(self) -> Self {
        self.tan()
    }

    fn asin(self) -> Self {
        self.asin()
    }

    fn acos(self) -> Self {
        self.acos()
    }

    fn atan(self) -> Self {
        self.atan()
    }

    fn atan2(self, other: Self) -> Self {
        self.atan2(other)
    }
}

impl Trig for f64 {
    fn sin(self) -> Self {
        self.sin()
    }

    fn cos(self) -> Self {
        self.cos()
    }

    fn tan(self) -> Self {
        self.tan()
    }

    fn asin(self) -> Self {
        self.asin()
    }

    fn acos(self) -> Self {
        self.acos()
    }

    fn atan(self) -> Self {
        self.atan()
    }

    fn atan2(self, other: Self) -> Self {
        self.atan2(other)
    }
}

impl Sqrt for f32 {
    fn sqrt(self) -> Self {
        self.sqrt()
    }
}
impl Sqrt for f64 {
    fn sqrt(self) -> Self {
        self.sqrt()
    }
}

impl Floor for f32 {
    fn floor(self) -> Self {
        self.floor()
    }
}
impl Floor for f64 {
    fn floor(self) -> Self {
        self.floor()
    }
}
