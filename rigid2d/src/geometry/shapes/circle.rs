use std::f32::consts::PI;

use anyhow::Result;
use log::warn;

use crate::geometry::geo_traits::{CircleShape, Interpolate, Intersects, Shape, Transformable};
use crate::geometry::intersection;
use crate::geometry::primitives::{AaRect, Complex, Vector2};
use crate::geometry::shapes::{Ray, compose_orientation, validate_length};
use crate::util::tolerance::BOUNDARY_EPSILON;

/// Solid circle. The orientation has no influence on the outline, but is carried along through transforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    center: Vector2,
    orientation: Complex,
    radius: f32,
}

impl Circle {
    pub fn try_new(center: Vector2, radius: f32) -> Result<Self> {
        let radius = validate_length("radius", radius)?;
        Ok(Circle {
            center,
            orientation: Complex::IDENTITY,
            radius,
        })
    }

    /// For radii that are known to be valid
    pub(crate) fn from_parts(center: Vector2, orientation: Complex, radius: f32) -> Self {
        debug_assert!(radius >= 0.0, "negative radius: {radius}");
        Circle {
            center,
            orientation,
            radius,
        }
    }

    pub fn with_center(&self, center: Vector2) -> Self {
        Circle { center, ..*self }
    }

    pub fn with_orientation(&self, orientation: Complex) -> Self {
        Circle { orientation, ..*self }
    }

    pub fn with_radius(&self, radius: f32) -> Result<Self> {
        let radius = validate_length("radius", radius)?;
        Ok(Circle { radius, ..*self })
    }

    pub fn set(&mut self, center: Vector2, orientation: Complex, radius: f32) -> Result<&mut Self> {
        let radius = validate_length("radius", radius).inspect_err(|e| warn!("{e}"))?;
        *self = Circle::from_parts(center, orientation, radius);
        Ok(self)
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<&mut Self> {
        self.radius = validate_length("radius", radius).inspect_err(|e| warn!("{e}"))?;
        Ok(self)
    }
}

impl CircleShape for Circle {
    fn radius(&self) -> f32 {
        self.radius
    }
}

impl Transformable for Circle {
    fn center(&self) -> Vector2 {
        self.center
    }

    fn orientation(&self) -> Complex {
        self.orientation
    }

    fn transform_by(&mut self, displacement: Vector2, rotation: Complex, factor: f32) -> &mut Self {
        self.center += displacement;
        self.orientation = compose_orientation(self.orientation, rotation, factor);
        self.radius *= factor.abs();
        self
    }

    fn transform_to(&mut self, position: Vector2, orientation: Complex) -> &mut Self {
        self.center = position;
        self.orientation = orientation;
        self
    }
}

impl Shape for Circle {
    fn area(&self) -> f32 {
        PI * self.radius * self.radius
    }

    fn perimeter(&self) -> f32 {
        2.0 * PI * self.radius
    }

    fn bbox(&self) -> AaRect {
        AaRect::from_center(self.center, Vector2::splat(self.radius))
    }

    fn contains(&self, point: Vector2) -> bool {
        self.center.distance_to(point) <= self.radius + BOUNDARY_EPSILON
    }

    fn closest_point_to(&self, point: Vector2) -> Vector2 {
        if self.contains(point) {
            return point;
        }
        self.center + (point - self.center).normalized() * self.radius
    }
}

impl Interpolate for Circle {
    fn interpolated(&self, to: &Self, by: f32) -> Self {
        Circle {
            center: self.center.lerp(to.center, by),
            orientation: self.orientation.slerp(to.orientation, by),
            radius: (self.radius + (to.radius - self.radius) * by).max(0.0),
        }
    }
}

impl Intersects<Circle> for Circle {
    fn intersects(&self, other: &Circle) -> bool {
        let reach = self.radius + other.radius + BOUNDARY_EPSILON;
        self.center.distance_squared_to(other.center) <= reach * reach
    }
}

impl Intersects<Ray> for Circle {
    fn intersects(&self, ray: &Ray) -> bool {
        intersection::ray_intersects_circle(ray.origin(), ray.direction(), self.center, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closest_point_lies_on_the_outline() {
        let circle = Circle::try_new(Vector2::new(1.0, 1.0), 2.0).unwrap();
        assert_eq!(circle.closest_point_to(Vector2::new(5.0, 1.0)), Vector2::new(3.0, 1.0));
        assert_eq!(circle.closest_point_to(Vector2::new(1.5, 1.5)), Vector2::new(1.5, 1.5));
        assert_eq!(circle.diameter(), 4.0);
    }

    #[test]
    fn negative_dilation_reflects_the_center() {
        let mut circle = Circle::try_new(Vector2::new(2.0, 0.0), 1.0).unwrap();
        circle.dilate_by(Vector2::ZERO, -2.0);
        assert_eq!(circle.center(), Vector2::new(-4.0, 0.0));
        assert_eq!(circle.radius(), 2.0);
        assert_eq!(circle.orientation(), Complex::HALF_TURN);
    }

    #[test]
    fn touching_circles_intersect() {
        let a = Circle::try_new(Vector2::ZERO, 1.0).unwrap();
        let b = Circle::try_new(Vector2::new(2.0, 0.0), 1.0).unwrap();
        assert!(a.intersects(&b));
        assert!(!a.intersects(&b.with_center(Vector2::new(2.1, 0.0))));
    }

    #[test]
    fn set_replaces_every_parameter() {
        let mut circle = Circle::try_new(Vector2::ZERO, 1.0).unwrap();
        circle.set(Vector2::new(3.0, -1.0), Complex::from_degrees(90.0), 2.5).unwrap();
        assert_eq!(circle.center(), Vector2::new(3.0, -1.0));
        assert_eq!(circle.orientation(), Complex::from_degrees(90.0));
        assert_eq!(circle.radius(), 2.5);

        let before = circle;
        assert!(circle.set(Vector2::ZERO, Complex::IDENTITY, -1.0).is_err());
        assert!(circle.set(Vector2::ZERO, Complex::IDENTITY, f32::NAN).is_err());
        assert_eq!(circle, before);
    }
}
