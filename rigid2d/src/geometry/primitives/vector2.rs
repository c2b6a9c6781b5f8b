use std::fmt::{Display, Formatter};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use float_cmp::{ApproxEq, F32Margin};
use serde::{Deserialize, Serialize};

use crate::geometry::primitives::Complex;
use crate::util::tolerance::NORMALIZATION_EPSILON;

/// Two dimensional vector, used both as a position and as a displacement
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2::new(0.0, 0.0);
    pub const ONE: Vector2 = Vector2::new(1.0, 1.0);
    pub const UNIT_X: Vector2 = Vector2::new(1.0, 0.0);
    pub const UNIT_Y: Vector2 = Vector2::new(0.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Vector2 { x, y }
    }

    pub const fn splat(v: f32) -> Self {
        Vector2 { x: v, y: v }
    }

    pub fn dot(self, other: Vector2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Magnitude of the 2D cross product, positive when `other` lies counterclockwise of `self`
    pub fn perp_dot(self, other: Vector2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// `self` rotated by 90 degrees counterclockwise
    pub fn perpendicular(self) -> Vector2 {
        Vector2::new(-self.y, self.x)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn distance_to(self, other: Vector2) -> f32 {
        (other - self).length()
    }

    pub fn distance_squared_to(self, other: Vector2) -> f32 {
        (other - self).length_squared()
    }

    /// Unit vector in the direction of `self`, or `fallback` if `self` is too short to be normalized
    pub fn normalized_or(self, fallback: Vector2) -> Vector2 {
        let length = self.length();
        if length < NORMALIZATION_EPSILON || !length.is_finite() {
            fallback
        } else {
            self / length
        }
    }

    /// Unit vector in the direction of `self`, or [`Vector2::ZERO`] if it cannot be normalized
    pub fn normalized(self) -> Vector2 {
        self.normalized_or(Vector2::ZERO)
    }

    pub fn rotated_by(self, rotation: Complex) -> Vector2 {
        Vector2::new(
            self.x * rotation.re - self.y * rotation.im,
            self.x * rotation.im + self.y * rotation.re,
        )
    }

    /// Angle in radians between the positive x-axis and `self`, in `(-PI, PI]`
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    pub fn abs(self) -> Vector2 {
        Vector2::new(self.x.abs(), self.y.abs())
    }

    pub fn min(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x.min(other.x), self.y.min(other.y))
    }

    pub fn max(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Component-wise clamp, `min` must not exceed `max`
    pub fn clamp(self, min: Vector2, max: Vector2) -> Vector2 {
        Vector2::new(self.x.clamp(min.x, max.x), self.y.clamp(min.y, max.y))
    }

    /// Component-wise sign, zero components map to `1.0`
    pub fn signum(self) -> Vector2 {
        Vector2::new(self.x.signum(), self.y.signum())
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn lerp(self, to: Vector2, by: f32) -> Vector2 {
        self + (to - self) * by
    }

    /// Interpolates direction along the shortest arc and magnitude linearly.
    /// Falls back to [`Vector2::lerp`] when either end is too short to have a direction.
    pub fn slerp(self, to: Vector2, by: f32) -> Vector2 {
        let from_length = self.length();
        let to_length = to.length();
        if from_length < NORMALIZATION_EPSILON || to_length < NORMALIZATION_EPSILON {
            return self.lerp(to, by);
        }
        let from_dir = self / from_length;
        let to_dir = to / to_length;
        let angle = from_dir.perp_dot(to_dir).atan2(from_dir.dot(to_dir));
        let length = from_length + (to_length - from_length) * by;

        from_dir.rotated_by(Complex::from_angle(angle * by)) * length
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f32) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vector2> for f32 {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Vector2 {
        rhs * self
    }
}

/// Component-wise multiplication
impl Mul<Vector2> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Div<f32> for Vector2 {
    type Output = Vector2;

    fn div(self, rhs: f32) -> Vector2 {
        Vector2::new(self.x / rhs, self.y / rhs)
    }
}

/// Component-wise division
impl Div<Vector2> for Vector2 {
    type Output = Vector2;

    fn div(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x / rhs.x, self.y / rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl MulAssign<f32> for Vector2 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl DivAssign<f32> for Vector2 {
    fn div_assign(&mut self, rhs: f32) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

impl From<(f32, f32)> for Vector2 {
    fn from((x, y): (f32, f32)) -> Self {
        Vector2::new(x, y)
    }
}

impl From<Vector2> for (f32, f32) {
    fn from(v: Vector2) -> Self {
        (v.x, v.y)
    }
}

impl Display for Vector2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

impl ApproxEq for Vector2 {
    type Margin = F32Margin;

    fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
        let margin = margin.into();
        self.x.approx_eq(other.x, margin) && self.y.approx_eq(other.y, margin)
    }
}
