use anyhow::Result;
use log::warn;

use crate::geometry::geo_traits::{Interpolate, Intersects, Shape, Transformable};
use crate::geometry::intersection;
use crate::geometry::primitives::{AaRect, Complex, Vector2};
use crate::geometry::shapes::{Ray, compose_orientation, points_bbox, to_local, to_world, validate_length};

/// Rectangle centered at `center`, `width` along the direction of `orientation` and `height` perpendicular to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    center: Vector2,
    orientation: Complex,
    width: f32,
    height: f32,
    points: [Vector2; 4],
}

impl Rectangle {
    pub fn try_new(center: Vector2, orientation: Complex, width: f32, height: f32) -> Result<Self> {
        let width = validate_length("width", width)?;
        let height = validate_length("height", height)?;
        let mut rect = Rectangle {
            center,
            orientation,
            width,
            height,
            points: [center; 4],
        };
        rect.recompute();
        Ok(rect)
    }

    /// Axis-aligned rectangle covering `bbox`
    pub fn from_aa_rect(bbox: AaRect) -> Self {
        let mut rect = Rectangle {
            center: bbox.centroid(),
            orientation: Complex::IDENTITY,
            width: bbox.width().max(0.0),
            height: bbox.height().max(0.0),
            points: [bbox.centroid(); 4],
        };
        rect.recompute();
        rect
    }

    fn recompute(&mut self) {
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);
        let corners = [
            Vector2::new(hw, hh),
            Vector2::new(-hw, hh),
            Vector2::new(-hw, -hh),
            Vector2::new(hw, -hh),
        ];
        self.points = corners.map(|c| to_world(c, self.center, self.orientation));
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Corners counterclockwise, starting at the top right corner of the un-rotated rectangle
    pub fn points(&self) -> &[Vector2; 4] {
        &self.points
    }

    fn half_extents(&self) -> Vector2 {
        Vector2::new(self.width, self.height) / 2.0
    }

    pub fn with_center(&self, center: Vector2) -> Self {
        let mut rect = *self;
        rect.transform_to(center, self.orientation);
        rect
    }

    pub fn with_orientation(&self, orientation: Complex) -> Self {
        let mut rect = *self;
        rect.transform_to(self.center, orientation);
        rect
    }

    pub fn with_width(&self, width: f32) -> Result<Self> {
        Rectangle::try_new(self.center, self.orientation, width, self.height)
    }

    pub fn with_height(&self, height: f32) -> Result<Self> {
        Rectangle::try_new(self.center, self.orientation, self.width, height)
    }

    pub fn set(&mut self, center: Vector2, orientation: Complex, width: f32, height: f32) -> Result<&mut Self> {
        *self = Rectangle::try_new(center, orientation, width, height).inspect_err(|e| warn!("{e}"))?;
        Ok(self)
    }

    pub fn set_size(&mut self, width: f32, height: f32) -> Result<&mut Self> {
        let (center, orientation) = (self.center, self.orientation);
        self.set(center, orientation, width, height)
    }
}

impl Transformable for Rectangle {
    fn center(&self) -> Vector2 {
        self.center
    }

    fn orientation(&self) -> Complex {
        self.orientation
    }

    fn transform_by(&mut self, displacement: Vector2, rotation: Complex, factor: f32) -> &mut Self {
        self.center += displacement;
        self.orientation = compose_orientation(self.orientation, rotation, factor);
        self.width *= factor.abs();
        self.height *= factor.abs();
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

impl Shape for Rectangle {
    fn area(&self) -> f32 {
        self.width * self.height
    }

    fn perimeter(&self) -> f32 {
        2.0 * (self.width + self.height)
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

impl Interpolate for Rectangle {
    fn interpolated(&self, to: &Self, by: f32) -> Self {
        let mut rect = Rectangle {
            center: self.center.lerp(to.center, by),
            orientation: self.orientation.slerp(to.orientation, by),
            width: (self.width + (to.width - self.width) * by).max(0.0),
            height: (self.height + (to.height - self.height) * by).max(0.0),
            points: self.points,
        };
        rect.recompute();
        rect
    }
}

impl Intersects<Ray> for Rectangle {
    fn intersects(&self, ray: &Ray) -> bool {
        let origin = to_local(ray.origin(), self.center, self.orientation);
        let direction = ray.direction().rotated_by(self.orientation.conjugate());
        intersection::ray_intersects_aa_box(origin, direction, self.half_extents())
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn width_follows_orientation() {
        let rect = Rectangle::try_new(Vector2::ZERO, Complex::from_angle(FRAC_PI_2), 4.0, 2.0).unwrap();
        let bbox = rect.bbox();
        assert!(approx_eq!(f32, bbox.width(), 2.0, epsilon = 1e-5));
        assert!(approx_eq!(f32, bbox.height(), 4.0, epsilon = 1e-5));
        assert!(rect.contains(Vector2::new(0.0, 1.9)));
        assert!(!rect.contains(Vector2::new(1.9, 0.0)));
    }

    #[test]
    fn closest_point_on_outline() {
        let rect = Rectangle::try_new(Vector2::ZERO, Complex::IDENTITY, 4.0, 2.0).unwrap();
        assert_eq!(rect.closest_point_to(Vector2::new(5.0, 5.0)), Vector2::new(2.0, 1.0));
        assert_eq!(rect.closest_point_to(Vector2::new(0.5, -3.0)), Vector2::new(0.5, -1.0));
        assert_eq!(rect.closest_point_to(Vector2::new(0.5, 0.5)), Vector2::new(0.5, 0.5));
    }

    #[test]
    fn rejected_update_leaves_rectangle_unchanged() {
        let mut rect = Rectangle::try_new(Vector2::ZERO, Complex::IDENTITY, 4.0, 2.0).unwrap();
        let before = rect;
        assert!(rect.set_size(1.0, -2.0).is_err());
        assert_eq!(rect, before);
        assert!(rect.with_width(-1.0).is_err());
        assert_eq!(rect.with_height(3.0).unwrap().area(), 12.0);
    }

    #[test]
    fn from_aa_rect_matches_bbox() {
        let bbox = AaRect::try_new(-1.0, 2.0, 3.0, 4.0).unwrap();
        let rect = Rectangle::from_aa_rect(bbox);
        assert_eq!(rect.bbox(), bbox);
        assert_eq!(rect.center(), Vector2::new(1.0, 3.0));
    }
}
