use anyhow::Result;
use log::warn;

use crate::geometry::geo_traits::{Interpolate, Intersects, Shape, Transformable};
use crate::geometry::intersection;
use crate::geometry::primitives::{AaRect, Complex, Vector2};
use crate::geometry::shapes::{Ray, compose_orientation, to_local, validate_length};
use crate::util::tolerance::BOUNDARY_EPSILON;

/// Line segment, described by its midpoint, the direction it extends in and its length.
/// Both end points are cached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    center: Vector2,
    orientation: Complex,
    length: f32,
    point_a: Vector2,
    point_b: Vector2,
}

impl LineSegment {
    pub fn try_new(center: Vector2, orientation: Complex, length: f32) -> Result<Self> {
        let length = validate_length("length", length)?;
        let mut segment = LineSegment {
            center,
            orientation,
            length,
            point_a: center,
            point_b: center,
        };
        segment.recompute();
        Ok(segment)
    }

    /// Segment running from `point_a` to `point_b`.
    /// Coinciding end points produce a zero length segment oriented along the x-axis.
    pub fn from_points(point_a: Vector2, point_b: Vector2) -> Self {
        let offset = point_b - point_a;
        LineSegment {
            center: (point_a + point_b) / 2.0,
            orientation: Complex::from_direction(offset),
            length: offset.length(),
            point_a,
            point_b,
        }
    }

    fn recompute(&mut self) {
        let half = self.orientation.direction() * (self.length / 2.0);
        self.point_a = self.center - half;
        self.point_b = self.center + half;
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn point_a(&self) -> Vector2 {
        self.point_a
    }

    pub fn point_b(&self) -> Vector2 {
        self.point_b
    }

    pub fn points(&self) -> [Vector2; 2] {
        [self.point_a, self.point_b]
    }

    /// Unit vector from `point_a` towards `point_b`
    pub fn direction(&self) -> Vector2 {
        self.orientation.normalized().direction()
    }

    pub fn with_center(&self, center: Vector2) -> Self {
        let mut segment = *self;
        segment.transform_to(center, self.orientation);
        segment
    }

    pub fn with_orientation(&self, orientation: Complex) -> Self {
        let mut segment = *self;
        segment.transform_to(self.center, orientation);
        segment
    }

    pub fn with_length(&self, length: f32) -> Result<Self> {
        LineSegment::try_new(self.center, self.orientation, length)
    }

    /// Replaces all canonical parameters at once, leaving `self` untouched if they are invalid
    pub fn set(&mut self, center: Vector2, orientation: Complex, length: f32) -> Result<&mut Self> {
        *self = LineSegment::try_new(center, orientation, length).inspect_err(|e| warn!("{e}"))?;
        Ok(self)
    }

    pub fn set_length(&mut self, length: f32) -> Result<&mut Self> {
        self.length = validate_length("length", length).inspect_err(|e| warn!("{e}"))?;
        self.recompute();
        Ok(self)
    }

    pub fn set_points(&mut self, point_a: Vector2, point_b: Vector2) -> &mut Self {
        *self = LineSegment::from_points(point_a, point_b);
        self
    }
}

impl Transformable for LineSegment {
    fn center(&self) -> Vector2 {
        self.center
    }

    fn orientation(&self) -> Complex {
        self.orientation
    }

    fn transform_by(&mut self, displacement: Vector2, rotation: Complex, factor: f32) -> &mut Self {
        self.center += displacement;
        self.orientation = compose_orientation(self.orientation, rotation, factor);
        self.length *= factor.abs();
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

impl Shape for LineSegment {
    fn area(&self) -> f32 {
        0.0
    }

    /// Walking around a segment covers it twice
    fn perimeter(&self) -> f32 {
        2.0 * self.length
    }

    fn bbox(&self) -> AaRect {
        AaRect {
            x_min: self.point_a.x.min(self.point_b.x),
            y_min: self.point_a.y.min(self.point_b.y),
            x_max: self.point_a.x.max(self.point_b.x),
            y_max: self.point_a.y.max(self.point_b.y),
        }
    }

    fn contains(&self, point: Vector2) -> bool {
        self.closest_point_to(point).distance_to(point) <= BOUNDARY_EPSILON
    }

    fn closest_point_to(&self, point: Vector2) -> Vector2 {
        //project onto the segment's own axis
        let half = self.length / 2.0;
        let along = to_local(point, self.center, self.orientation).x.clamp(-half, half);
        self.center + self.orientation.direction() * along
    }
}

impl Interpolate for LineSegment {
    fn interpolated(&self, to: &Self, by: f32) -> Self {
        let mut segment = LineSegment {
            center: self.center.lerp(to.center, by),
            orientation: self.orientation.slerp(to.orientation, by),
            length: (self.length + (to.length - self.length) * by).max(0.0),
            point_a: self.point_a,
            point_b: self.point_b,
        };
        segment.recompute();
        segment
    }
}

impl Intersects<LineSegment> for LineSegment {
    fn intersects(&self, other: &LineSegment) -> bool {
        intersection::segments_intersect(self.point_a, self.point_b, other.point_a, other.point_b)
    }
}

impl Intersects<Ray> for LineSegment {
    fn intersects(&self, ray: &Ray) -> bool {
        intersection::ray_intersects_segment(ray.origin(), ray.direction(), self.point_a, self.point_b)
    }
}
