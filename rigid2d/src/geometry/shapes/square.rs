use anyhow::Result;
use log::warn;

use crate::geometry::geo_traits::{Interpolate, Intersects, Shape, Transformable};
use crate::geometry::intersection;
use crate::geometry::primitives::{AaRect, Complex, Vector2};
use crate::geometry::shapes::{Ray, compose_orientation, points_bbox, to_local, to_world, validate_length};
use crate::util::assertions;

/// Square with a side length, centered at `center` and rotated by `orientation`.
///
/// The four corners are cached counterclockwise, starting at the top right corner of the un-rotated square.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Square {
    center: Vector2,
    orientation: Complex,
    side_length: f32,
    points: [Vector2; 4],
}

impl Square {
    pub fn try_new(center: Vector2, orientation: Complex, side_length: f32) -> Result<Self> {
        let side_length = validate_length("side_length", side_length)?;
        let mut square = Square {
            center,
            orientation,
            side_length,
            points: [center; 4],
        };
        square.recompute();
        Ok(square)
    }

    fn recompute(&mut self) {
        let h = self.side_length / 2.0;
        let corners = [
            Vector2::new(h, h),
            Vector2::new(-h, h),
            Vector2::new(-h, -h),
            Vector2::new(h, -h),
        ];
        debug_assert!(assertions::points_are_counterclockwise(&corners));
        self.points = corners.map(|c| to_world(c, self.center, self.orientation));
    }

    pub fn side_length(&self) -> f32 {
        self.side_length
    }

    pub fn points(&self) -> &[Vector2; 4] {
        &self.points
    }

    pub fn diagonal(&self) -> f32 {
        self.side_length * std::f32::consts::SQRT_2
    }

    fn half_extents(&self) -> Vector2 {
        Vector2::splat(self.side_length / 2.0)
    }

    pub fn with_center(&self, center: Vector2) -> Self {
        let mut square = *self;
        square.transform_to(center, self.orientation);
        square
    }

    pub fn with_orientation(&self, orientation: Complex) -> Self {
        let mut square = *self;
        square.transform_to(self.center, orientation);
        square
    }

    pub fn with_side_length(&self, side_length: f32) -> Result<Self> {
        Square::try_new(self.center, self.orientation, side_length)
    }

    pub fn set(&mut self, center: Vector2, orientation: Complex, side_length: f32) -> Result<&mut Self> {
        *self = Square::try_new(center, orientation, side_length).inspect_err(|e| warn!("{e}"))?;
        Ok(self)
    }

    pub fn set_side_length(&mut self, side_length: f32) -> Result<&mut Self> {
        self.side_length = validate_length("side_length", side_length).inspect_err(|e| warn!("{e}"))?;
        self.recompute();
        Ok(self)
    }
}

impl Transformable for Square {
    fn center(&self) -> Vector2 {
        self.center
    }

    fn orientation(&self) -> Complex {
        self.orientation
    }

    fn transform_by(&mut self, displacement: Vector2, rotation: Complex, factor: f32) -> &mut Self {
        self.center += displacement;
        self.orientation = compose_orientation(self.orientation, rotation, factor);
        self.side_length *= factor.abs();
        self.recompute();
        self
    }

    fn transform_to(&mut self, position: Vector2, orientation: Complex) -> &mut Self {
        self.center = position;
        self.orientation = orientation;
        self.recompute();
        self
    }
}

impl Shape for Square {
    fn area(&self) -> f32 {
        self.side_length * self.side_length
    }

    fn perimeter(&self) -> f32 {
        4.0 * self.side_length
    }

    fn bbox(&self) -> AaRect {
        points_bbox(&self.points)
    }

    fn contains(&self, point: Vector2) -> bool {
        let local = to_local(point, self.center, self.orientation);
        intersection::aa_box_contains(local, self.half_extents())
    }

    fn closest_point_to(&self, point: Vector2) -> Vector2 {
        let local = to_local(point, self.center, self.orientation);
        if intersection::aa_box_contains(local, self.half_extents()) {
            return point;
        }
        let closest = intersection::aa_box_closest_point(local, self.half_extents());
        to_world(closest, self.center, self.orientation)
    }
}

impl Interpolate for Square {
    fn interpolated(&self, to: &Self, by: f32) -> Self {
        let mut square = Square {
            center: self.center.lerp(to.center, by),
            orientation: self.orientation.slerp(to.orientation, by),
            side_length: (self.side_length + (to.side_length - self.side_length) * by).max(0.0),
            points: self.points,
        };
        square.recompute();
        square
    }
}

impl Intersects<Ray> for Square {
    fn intersects(&self, ray: &Ray) -> bool {
        let origin = to_local(ray.origin(), self.center, self.orientation);
        let direction = ray.direction().rotated_by(self.orientation.conjugate());
        intersection::ray_intersects_aa_box(origin, direction, self.half_extents())
    }
}
