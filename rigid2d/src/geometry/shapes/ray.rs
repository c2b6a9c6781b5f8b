use anyhow::Result;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::geometry::geo_traits::{Interpolate, Intersects, Transformable};
use crate::geometry::intersection;
use crate::geometry::primitives::{Complex, Vector2};
use crate::geometry::shapes::validate_position;
use crate::util::tolerance::BOUNDARY_EPSILON;

/// Half-line starting at `origin`, extending infinitely along its direction.
///
/// Rays have no area and no bounding box, so they are not a [`Shape`](crate::geometry::geo_traits::Shape),
/// but they can be transformed and tested for intersection against every shape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    origin: Vector2,
    /// Unit direction
    direction: Vector2,
}

impl Ray {
    /// Creates a ray from an origin and a direction of any length.
    /// A direction too short to be normalized defaults to the positive x-axis.
    pub fn new(origin: Vector2, direction: Vector2) -> Self {
        Ray {
            origin,
            direction: direction.normalized_or(Vector2::UNIT_X),
        }
    }

    /// Creates a ray pointing along `orientation`
    pub fn from_orientation(origin: Vector2, orientation: Complex) -> Self {
        Ray {
            origin,
            direction: orientation.normalized().direction(),
        }
    }

    pub fn origin(&self) -> Vector2 {
        self.origin
    }

    pub fn direction(&self) -> Vector2 {
        self.direction
    }

    pub fn with_origin(&self, origin: Vector2) -> Self {
        Ray { origin, ..*self }
    }

    pub fn with_direction(&self, direction: Vector2) -> Self {
        Ray::new(self.origin, direction)
    }

    /// Replaces origin and direction. Non-finite values are rejected and leave the ray untouched,
    /// a direction too short to be normalized defaults to the positive x-axis as in [`Ray::new`].
    pub fn set(&mut self, origin: Vector2, direction: Vector2) -> Result<&mut Self> {
        let origin = validate_position("origin", origin).inspect_err(|e| warn!("{e}"))?;
        let direction = validate_position("direction", direction).inspect_err(|e| warn!("{e}"))?;
        *self = Ray::new(origin, direction);
        Ok(self)
    }

    /// Point at distance `t` along the ray
    pub fn point_at(&self, t: f32) -> Vector2 {
        self.origin + self.direction * t
    }

    /// Closest point on the ray to `point`
    pub fn closest_point_to(&self, point: Vector2) -> Vector2 {
        let t = (point - self.origin).dot(self.direction).max(0.0);
        self.point_at(t)
    }

    pub fn contains(&self, point: Vector2) -> bool {
        self.closest_point_to(point).distance_to(point) <= BOUNDARY_EPSILON
    }
}

impl Transformable for Ray {
    fn center(&self) -> Vector2 {
        self.origin
    }

    fn orientation(&self) -> Complex {
        Complex::from(self.direction)
    }

    fn transform_by(&mut self, displacement: Vector2, rotation: Complex, factor: f32) -> &mut Self {
        let direction = self.direction.rotated_by(rotation).normalized_or(self.direction);
        self.origin += displacement;
        self.direction = match factor < 0.0 {
            true => -direction,
            false => direction,
        };
        self
    }

    fn transform_to(&mut self, position: Vector2, orientation: Complex) -> &mut Self {
        self.origin = position;
        self.direction = orientation.normalized().direction();
        self
    }
}

impl Interpolate for Ray {
    fn interpolated(&self, to: &Self, by: f32) -> Self {
        Ray::from_orientation(
            self.origin.lerp(to.origin, by),
            self.orientation().slerp(to.orientation(), by),
        )
    }
}

impl Intersects<Ray> for Ray {
    fn intersects(&self, other: &Ray) -> bool {
        intersection::ray_intersects_ray(self.origin, self.direction, other.origin, other.direction)
    }
}
