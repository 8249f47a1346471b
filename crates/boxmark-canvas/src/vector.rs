//! Two-dimensional vectors.
//!
//! [`Vector2Int`] holds image and canvas pixel positions; [`Vector2`] holds
//! real-valued positions such as the viewport offset. Both do component-wise
//! arithmetic. Ordering helpers (`all_lt`, `all_le`, ...) require the relation
//! to hold on both axes, so `a.all_lt(b)` and `b.all_lt(a)` may both be false.
//!
//! Integer scaling rounds half away from zero (`2.5 -> 3`, `-2.5 -> -3`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use boxmark_core::GeometryError;

/// Integer 2D vector, used for pixel positions and sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vector2Int {
    pub x: i32,
    pub y: i32,
}

/// Real-valued 2D vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2Int {
    pub const ZERO: Self = Self::new(0, 0);
    pub const ONE: Self = Self::new(1, 1);
    pub const RIGHT: Self = Self::new(1, 0);
    pub const LEFT: Self = Self::new(-1, 0);
    /// Screen coordinates grow downwards, so up is negative y.
    pub const UP: Self = Self::new(0, -1);
    pub const DOWN: Self = Self::new(0, 1);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn splat(v: i32) -> Self {
        Self { x: v, y: v }
    }

    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Euclidean norm.
    pub fn magnitude(self) -> f64 {
        self.to_real().magnitude()
    }

    /// Unit vector in the same direction, or zero for the zero vector.
    pub fn normalized(self) -> Vector2 {
        self.to_real().normalized()
    }

    /// `self / by`, rounded.
    pub fn scaled(self, by: f64) -> Self {
        self / by
    }

    /// In-place [`Self::scaled`].
    pub fn scale(&mut self, by: f64) {
        *self = self.scaled(by);
    }

    /// Clamp each component into `[min, max]`. When `min > max` on an axis
    /// the result is `max`.
    pub fn clip(&mut self, min: Self, max: Self) {
        *self = self.clipped(min, max);
    }

    pub fn clipped(self, min: Self, max: Self) -> Self {
        Self::new(self.x.max(min.x).min(max.x), self.y.max(min.y).min(max.y))
    }

    /// Component-wise minimum.
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    pub fn all_lt(self, other: Self) -> bool {
        self.x < other.x && self.y < other.y
    }

    pub fn all_gt(self, other: Self) -> bool {
        self.x > other.x && self.y > other.y
    }

    pub fn all_le(self, other: Self) -> bool {
        self.x <= other.x && self.y <= other.y
    }

    pub fn all_ge(self, other: Self) -> bool {
        self.x >= other.x && self.y >= other.y
    }

    pub fn distance(a: Self, b: Self) -> f64 {
        (a - b).magnitude()
    }

    /// Component-wise bounds of a point set.
    ///
    /// Each returned component is an extreme of the inputs on that axis, so
    /// `min`/`max` need not be points of the set themselves.
    pub fn get_min_max(points: &[Self]) -> Result<(Self, Self), GeometryError> {
        let (first, rest) = points.split_first().ok_or(GeometryError::EmptyPointSet)?;
        Ok(rest
            .iter()
            .fold((*first, *first), |(lo, hi), p| (lo.min(*p), hi.max(*p))))
    }

    pub fn to_real(self) -> Vector2 {
        Vector2::new(f64::from(self.x), f64::from(self.y))
    }
}

impl Vector2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, or zero for the zero vector.
    pub fn normalized(self) -> Self {
        let m = self.magnitude();
        if m == 0.0 {
            Self::ZERO
        } else {
            self / m
        }
    }

    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    pub fn scaled(self, by: f64) -> Self {
        self / by
    }

    pub fn scale(&mut self, by: f64) {
        *self = self.scaled(by);
    }

    pub fn clip(&mut self, min: Self, max: Self) {
        *self = self.clipped(min, max);
    }

    pub fn clipped(self, min: Self, max: Self) -> Self {
        Self::new(self.x.max(min.x).min(max.x), self.y.max(min.y).min(max.y))
    }

    pub fn all_lt(self, other: Self) -> bool {
        self.x < other.x && self.y < other.y
    }

    pub fn all_gt(self, other: Self) -> bool {
        self.x > other.x && self.y > other.y
    }

    pub fn all_le(self, other: Self) -> bool {
        self.x <= other.x && self.y <= other.y
    }

    pub fn all_ge(self, other: Self) -> bool {
        self.x >= other.x && self.y >= other.y
    }

    pub fn distance(a: Self, b: Self) -> f64 {
        (a - b).magnitude()
    }

    /// Round to the nearest integer vector (half away from zero).
    ///
    /// Non-finite components saturate; use [`Vector2Int::try_from`] to
    /// reject them instead.
    pub fn round(self) -> Vector2Int {
        Vector2Int::new(self.x.round() as i32, self.y.round() as i32)
    }
}

impl TryFrom<Vector2> for Vector2Int {
    type Error = GeometryError;

    fn try_from(v: Vector2) -> Result<Self, Self::Error> {
        if v.x.is_finite() && v.y.is_finite() {
            Ok(v.round())
        } else {
            Err(GeometryError::InvalidArgumentType {
                expected: "finite vector".to_string(),
                found: v.to_string(),
            })
        }
    }
}

impl From<Vector2Int> for Vector2 {
    fn from(v: Vector2Int) -> Self {
        v.to_real()
    }
}

impl From<(i32, i32)> for Vector2Int {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

macro_rules! vector_ops {
    ($t:ty) => {
        impl Add for $t {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self::new(self.x + rhs.x, self.y + rhs.y)
            }
        }

        impl Sub for $t {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self::new(self.x - rhs.x, self.y - rhs.y)
            }
        }

        impl AddAssign for $t {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl SubAssign for $t {
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl Neg for $t {
            type Output = Self;
            fn neg(self) -> Self {
                Self::new(-self.x, -self.y)
            }
        }

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "({}, {})", self.x, self.y)
            }
        }
    };
}

vector_ops!(Vector2Int);
vector_ops!(Vector2);

impl Mul<f64> for Vector2Int {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        (self.to_real() * rhs).round()
    }
}

impl Div<f64> for Vector2Int {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        (self.to_real() / rhs).round()
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}
