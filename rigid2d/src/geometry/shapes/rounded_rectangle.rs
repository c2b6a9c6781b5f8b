use std::f32::consts::PI;

use anyhow::{Result, ensure};
use log::warn;

use crate::geometry::geo_traits::{Interpolate, Intersects, Shape, Transformable};
use crate::geometry::intersection;
use crate::geometry::primitives::{AaRect, Complex, Vector2};
use crate::geometry::shapes::{Ray, compose_orientation, to_local, to_world, validate_length};
use crate::util::assertions;
use crate::util::tolerance::BOUNDARY_EPSILON;

/// Rectangle with circular arcs of `corner_radius` replacing its corners.
///
/// Caches the eight points where the straight edges meet the arcs, counterclockwise starting at the
/// right end of the top edge, and the centers of the four corner arcs:
/// A (top right), B (top left), C (bottom left) and D (bottom right).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundedRectangle {
    center: Vector2,
    orientation: Complex,
    width: f32,
    height: f32,
    corner_radius: f32,
    points: [Vector2; 8],
    corner_centers: [Vector2; 4],
}

impl RoundedRectangle {
    pub fn try_new(center: Vector2, orientation: Complex, width: f32, height: f32, corner_radius: f32) -> Result<Self> {
        let width = validate_length("width", width)?;
        let height = validate_length("height", height)?;
        let corner_radius = validate_length("corner_radius", corner_radius)?;
        ensure!(
            corner_radius <= width.min(height) / 2.0,
            "corner_radius must not exceed half of the shorter side ({}), got {corner_radius}",
            width.min(height) / 2.0
        );
        let mut rect = RoundedRectangle {
            center,
            orientation,
            width,
            height,
            corner_radius,
            points: [center; 8],
            corner_centers: [center; 4],
        };
        rect.recompute();
        Ok(rect)
    }

    fn recompute(&mut self) {
        let (hw, hh, rad) = (self.width / 2.0, self.height / 2.0, self.corner_radius);
        let (iw, ih) = (hw - rad, hh - rad);
        let points = [
            Vector2::new(iw, hh),
            Vector2::new(-iw, hh),
            Vector2::new(-hw, ih),
            Vector2::new(-hw, -ih),
            Vector2::new(-iw, -hh),
            Vector2::new(iw, -hh),
            Vector2::new(hw, -ih),
            Vector2::new(hw, ih),
        ];
        let corner_centers = [
            Vector2::new(iw, ih),
            Vector2::new(-iw, ih),
            Vector2::new(-iw, -ih),
            Vector2::new(iw, -ih),
        ];
        self.points = points.map(|p| to_world(p, self.center, self.orientation));
        self.corner_centers = corner_centers.map(|p| to_world(p, self.center, self.orientation));

        debug_assert!(assertions::rounded_rectangle_is_consistent(self));
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn points(&self) -> &[Vector2; 8] {
        &self.points
    }

    /// Centers of the corner arcs A, B, C, D
    pub fn corner_centers(&self) -> &[Vector2; 4] {
        &self.corner_centers
    }

    /// Half extents of the rectangle without its rounded corners
    fn inner_half_extents(&self) -> Vector2 {
        Vector2::new(self.width / 2.0, self.height / 2.0) - Vector2::splat(self.corner_radius)
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
        RoundedRectangle::try_new(self.center, self.orientation, width, self.height, self.corner_radius)
    }

    pub fn with_height(&self, height: f32) -> Result<Self> {
        RoundedRectangle::try_new(self.center, self.orientation, self.width, height, self.corner_radius)
    }

    pub fn with_corner_radius(&self, corner_radius: f32) -> Result<Self> {
        RoundedRectangle::try_new(self.center, self.orientation, self.width, self.height, corner_radius)
    }

    pub fn set(
        &mut self,
        center: Vector2,
        orientation: Complex,
        width: f32,
        height: f32,
        corner_radius: f32,
    ) -> Result<&mut Self> {
        *self = RoundedRectangle::try_new(center, orientation, width, height, corner_radius)
            .inspect_err(|e| warn!("{e}"))?;
        Ok(self)
    }

    pub fn set_size(&mut self, width: f32, height: f32, corner_radius: f32) -> Result<&mut Self> {
        let (center, orientation) = (self.center, self.orientation);
        self.set(center, orientation, width, height, corner_radius)
    }

    fn contains_local(&self, local: Vector2) -> bool {
        let a = local.abs();
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);
        let inner = self.inner_half_extents();

        if a.x > hw + BOUNDARY_EPSILON || a.y > hh + BOUNDARY_EPSILON {
            return false;
        }
        //inside one of the two crossing bands, or within the corner arc
        a.x <= inner.x || a.y <= inner.y || a.distance_to(inner) <= self.corner_radius + BOUNDARY_EPSILON
    }
}

impl Transformable for RoundedRectangle {
    fn center(&self) -> Vector2 {
        self.center
    }

    fn orientation(&self) -> Complex {
        self.orientation
    }

    fn transform_by(&mut self, displacement: Vector2, rotation: Complex, factor: f32) -> &mut Self {
        let scale = factor.abs();
        self.center += displacement;
        self.orientation = compose_orientation(self.orientation, rotation, factor);
        self.width *= scale;
        self.height *= scale;
        self.corner_radius *= scale;
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

impl Shape for RoundedRectangle {
    fn area(&self) -> f32 {
        let rad = self.corner_radius;
        self.width * self.height - (4.0 - PI) * rad * rad
    }

    fn perimeter(&self) -> f32 {
        let rad = self.corner_radius;
        2.0 * (self.width + self.height) - (8.0 - 2.0 * PI) * rad
    }

    fn bbox(&self) -> AaRect {
        //the arcs bulge past the cached points when rotated
        let rad = Vector2::splat(self.corner_radius);
        self.corner_centers
            .iter()
            .map(|c| AaRect::from_center(*c, rad))
            .reduce(AaRect::bounding_rect)
            .unwrap_or(AaRect::from_center(self.center, rad))
    }

    fn contains(&self, point: Vector2) -> bool {
        self.contains_local(to_local(point, self.center, self.orientation))
    }

    fn closest_point_to(&self, point: Vector2) -> Vector2 {
        let local = to_local(point, self.center, self.orientation);
        if self.contains_local(local) {
            return point;
        }
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);
        let inner = self.inner_half_extents();
        let a = local.abs();
        let sign = local.signum();

        let closest = if a.x <= inner.x {
            //facing the top or bottom edge
            Vector2::new(local.x, sign.y * hh)
        } else if a.y <= inner.y {
            //facing the left or right edge
            Vector2::new(sign.x * hw, local.y)
        } else {
            //facing a corner arc
            let corner_center = inner * sign;
            corner_center + (local - corner_center).normalized() * self.corner_radius
        };
        to_world(closest, self.center, self.orientation)
    }
}

impl Interpolate for RoundedRectangle {
    fn interpolated(&self, to: &Self, by: f32) -> Self {
        let lerp = |a: f32, b: f32| (a + (b - a) * by).max(0.0);
        let width = lerp(self.width, to.width);
        let height = lerp(self.height, to.height);
        let mut rect = RoundedRectangle {
            center: self.center.lerp(to.center, by),
            orientation: self.orientation.slerp(to.orientation, by),
            width,
            height,
            //blending never exceeds the bound in exact arithmetic, clamp away the round-off
            corner_radius: lerp(self.corner_radius, to.corner_radius).min(width.min(height) / 2.0),
            points: self.points,
            corner_centers: self.corner_centers,
        };
        rect.recompute();
        rect
    }
}

impl Intersects<Ray> for RoundedRectangle {
    fn intersects(&self, ray: &Ray) -> bool {
        let origin = to_local(ray.origin(), self.center, self.orientation);
        let direction = ray.direction().rotated_by(self.orientation.conjugate());
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);
        let inner = self.inner_half_extents();

        //the shape is the union of two crossing boxes and four corner discs
        intersection::ray_intersects_aa_box(origin, direction, Vector2::new(hw, inner.y))
            || intersection::ray_intersects_aa_box(origin, direction, Vector2::new(inner.x, hh))
            || [
                Vector2::new(inner.x, inner.y),
                Vector2::new(-inner.x, inner.y),
                Vector2::new(-inner.x, -inner.y),
                Vector2::new(inner.x, -inner.y),
            ]
            .iter()
            .any(|c| intersection::ray_intersects_circle(origin, direction, *c, self.corner_radius))
    }
}
