use std::fmt::{Display, Formatter};
use std::ops::{Add, Mul, Neg, Sub};

use float_cmp::{ApproxEq, F32Margin};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::geometry::primitives::Vector2;
use crate::util::tolerance::{NORMALIZATION_EPSILON, UNIT_EPSILON};

/// Complex number used to represent rotations and orientations.
///
/// A normalized value `(cos a, sin a)` represents a rotation by `a` radians counterclockwise.
/// Multiplying two rotations composes them, the conjugate undoes a rotation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f32,
    pub im: f32,
}

impl Complex {
    /// The rotation by zero radians
    pub const IDENTITY: Complex = Complex::new(1.0, 0.0);
    /// Half a turn
    pub const HALF_TURN: Complex = Complex::new(-1.0, 0.0);
    pub const ZERO: Complex = Complex::new(0.0, 0.0);

    pub const fn new(re: f32, im: f32) -> Self {
        Complex { re, im }
    }

    /// Rotation by `angle` radians counterclockwise
    pub fn from_angle(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Complex::new(cos, sin)
    }

    pub fn from_degrees(degrees: f32) -> Self {
        Complex::from_angle(degrees.to_radians())
    }

    /// Orientation pointing along `direction`, identity if `direction` has no usable length
    pub fn from_direction(direction: Vector2) -> Self {
        let unit = direction.normalized_or(Vector2::UNIT_X);
        Complex::new(unit.x, unit.y)
    }

    /// Angle in radians, in `(-PI, PI]`
    pub fn angle(self) -> f32 {
        self.im.atan2(self.re)
    }

    pub fn magnitude(self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    pub fn magnitude_squared(self) -> f32 {
        self.re * self.re + self.im * self.im
    }

    /// The inverse rotation of a normalized value
    pub fn conjugate(self) -> Complex {
        Complex::new(self.re, -self.im)
    }

    pub fn is_normalized(self) -> bool {
        (self.magnitude() - 1.0).abs() <= UNIT_EPSILON
    }

    /// Unit magnitude version of `self`, or `default` if `self` is too small (or not finite) to be normalized
    pub fn normalized_or(self, default: Complex) -> Complex {
        let magnitude = self.magnitude();
        if magnitude < NORMALIZATION_EPSILON || !magnitude.is_finite() {
            trace!("could not normalize {self:?}, falling back to {default:?}");
            default
        } else {
            Complex::new(self.re / magnitude, self.im / magnitude)
        }
    }

    /// Unit magnitude version of `self`, or [`Complex::IDENTITY`] if it cannot be normalized
    pub fn normalized(self) -> Complex {
        self.normalized_or(Complex::IDENTITY)
    }

    /// The unit vector this orientation points to
    pub fn direction(self) -> Vector2 {
        Vector2::new(self.re, self.im)
    }

    /// Component-wise linear interpolation, the result is not normalized
    pub fn lerp(self, to: Complex, by: f32) -> Complex {
        Complex::new(
            self.re + (to.re - self.re) * by,
            self.im + (to.im - self.im) * by,
        )
    }

    /// Interpolates along the shortest arc between two orientations.
    /// The result is normalized, falling back to identity if either end is degenerate.
    pub fn slerp(self, to: Complex, by: f32) -> Complex {
        let from = self.normalized();
        let delta = from.conjugate() * to.normalized();
        (from * Complex::from_angle(delta.angle() * by)).normalized()
    }
}

impl Default for Complex {
    fn default() -> Self {
        Complex::IDENTITY
    }
}

/// Composition of rotations
impl Mul for Complex {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Mul<f32> for Complex {
    type Output = Complex;

    fn mul(self, rhs: f32) -> Complex {
        Complex::new(self.re * rhs, self.im * rhs)
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Neg for Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

impl From<Vector2> for Complex {
    fn from(v: Vector2) -> Self {
        Complex::new(v.x, v.y)
    }
}

impl From<Complex> for Vector2 {
    fn from(c: Complex) -> Self {
        Vector2::new(c.re, c.im)
    }
}

impl Display for Complex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}°", self.angle().to_degrees())
    }
}

impl ApproxEq for Complex {
    type Margin = F32Margin;

    fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
        let margin = margin.into();
        self.re.approx_eq(other.re, margin) && self.im.approx_eq(other.im, margin)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use float_cmp::approx_eq;
    use test_case::test_case;

    use super::*;

    #[test]
    fn multiplication_composes_rotations() {
        let r = Complex::from_angle(FRAC_PI_4) * Complex::from_angle(FRAC_PI_4);
        assert!(approx_eq!(Complex, r, Complex::from_angle(FRAC_PI_2), epsilon = 1e-6));

        let undone = Complex::from_degrees(33.0) * Complex::from_degrees(33.0).conjugate();
        assert!(approx_eq!(Complex, undone, Complex::IDENTITY, epsilon = 1e-6));
    }

    #[test_case(Complex::ZERO, Complex::IDENTITY; "zero falls back to identity")]
    #[test_case(Complex::new(f32::NAN, 0.0), Complex::IDENTITY; "nan falls back to identity")]
    #[test_case(Complex::new(0.0, 2.0), Complex::new(0.0, 1.0); "scaled quarter turn")]
    #[test_case(Complex::new(-3.0, 0.0), Complex::HALF_TURN; "scaled half turn")]
    fn normalization(input: Complex, expected: Complex) {
        let normalized = input.normalized();
        assert!(approx_eq!(Complex, normalized, expected, epsilon = 1e-6));
        assert!(normalized.is_normalized());
    }

    #[test]
    fn normalized_check_uses_absolute_tolerance() {
        assert!(Complex::new(1.00005, 0.0).is_normalized());
        assert!(!Complex::new(1.001, 0.0).is_normalized());
    }

    #[test]
    fn slerp_takes_shortest_arc() {
        let from = Complex::from_degrees(170.0);
        let to = Complex::from_degrees(-170.0);
        let mid = from.slerp(to, 0.5);
        assert!(approx_eq!(f32, mid.angle().abs(), PI, epsilon = 1e-5));

        let a = Complex::from_degrees(10.0);
        let b = Complex::from_degrees(70.0);
        assert!(approx_eq!(Complex, a.slerp(b, 0.0), a, epsilon = 1e-6));
        assert!(approx_eq!(Complex, a.slerp(b, 1.0), b, epsilon = 1e-6));
        assert!(approx_eq!(Complex, a.slerp(b, 0.5), Complex::from_degrees(40.0), epsilon = 1e-6));
    }
}
