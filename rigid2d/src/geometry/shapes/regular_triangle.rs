use anyhow::Result;
use log::warn;
use ordered_float::OrderedFloat;

use crate::geometry::geo_traits::{Interpolate, Intersects, Shape, Transformable, TriangleShape};
use crate::geometry::intersection;
use crate::geometry::primitives::{AaRect, Complex, Vector2};
use crate::geometry::shapes::{Ray, compose_orientation, points_bbox, to_local, to_world, validate_length};
use crate::util::tolerance::BOUNDARY_EPSILON;

const SQRT_3: f32 = 1.732_050_8;

/// Equilateral triangle with its centroid at `center`.
///
/// Un-rotated, vertex A points straight up, followed by B (bottom left) and C (bottom right).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegularTriangle {
    center: Vector2,
    orientation: Complex,
    side_length: f32,
    points: [Vector2; 3],
}

impl RegularTriangle {
    pub fn try_new(center: Vector2, orientation: Complex, side_length: f32) -> Result<Self> {
        let side_length = validate_length("side_length", side_length)?;
        let mut triangle = RegularTriangle {
            center,
            orientation,
            side_length,
            points: [center; 3],
        };
        triangle.recompute();
        Ok(triangle)
    }

    fn recompute(&mut self) {
        let (s, r, big_r) = (self.side_length, self.inradius(), self.circumradius());
        let local = [
            Vector2::new(0.0, big_r),
            Vector2::new(-s / 2.0, -r),
            Vector2::new(s / 2.0, -r),
        ];
        self.points = local.map(|p| to_world(p, self.center, self.orientation));
    }

    pub fn side_length(&self) -> f32 {
        self.side_length
    }

    pub fn points(&self) -> &[Vector2; 3] {
        &self.points
    }

    /// Distance from the centroid to the middle of an edge
    pub fn inradius(&self) -> f32 {
        self.side_length / (2.0 * SQRT_3)
    }

    /// Distance from the centroid to a vertex
    pub fn circumradius(&self) -> f32 {
        self.side_length / SQRT_3
    }

    pub fn height(&self) -> f32 {
        self.side_length * SQRT_3 / 2.0
    }

    pub fn with_center(&self, center: Vector2) -> Self {
        let mut triangle = *self;
        triangle.transform_to(center, self.orientation);
        triangle
    }

    pub fn with_orientation(&self, orientation: Complex) -> Self {
        let mut triangle = *self;
        triangle.transform_to(self.center, orientation);
        triangle
    }

    pub fn with_side_length(&self, side_length: f32) -> Result<Self> {
        RegularTriangle::try_new(self.center, self.orientation, side_length)
    }

    pub fn set(&mut self, center: Vector2, orientation: Complex, side_length: f32) -> Result<&mut Self> {
        *self = RegularTriangle::try_new(center, orientation, side_length).inspect_err(|e| warn!("{e}"))?;
        Ok(self)
    }

    pub fn set_side_length(&mut self, side_length: f32) -> Result<&mut Self> {
        self.side_length = validate_length("side_length", side_length).inspect_err(|e| warn!("{e}"))?;
        self.recompute();
        Ok(self)
    }

    /// Whether a point in the local frame lies inside.
    /// The triangle is mirror symmetric about the y-axis, so only the right half is tested.
    fn contains_local(&self, local: Vector2) -> bool {
        let folded = Vector2::new(local.x.abs(), local.y);
        //outward normal of the right edge, at 30 degrees
        let right_normal = Vector2::new(SQRT_3 / 2.0, 0.5);
        let r = self.inradius();

        folded.y >= -r - BOUNDARY_EPSILON && folded.dot(right_normal) <= r + BOUNDARY_EPSILON
    }
}

impl Transformable for RegularTriangle {
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

impl Shape for RegularTriangle {
    fn area(&self) -> f32 {
        self.side_length * self.height() / 2.0
    }

    fn perimeter(&self) -> f32 {
        3.0 * self.side_length
    }

    fn bbox(&self) -> AaRect {
        points_bbox(&self.points)
    }

    fn contains(&self, point: Vector2) -> bool {
        self.contains_local(to_local(point, self.center, self.orientation))
    }

    fn closest_point_to(&self, point: Vector2) -> Vector2 {
        let local = to_local(point, self.center, self.orientation);
        if self.contains_local(local) {
            return point;
        }
        let (s, r, big_r) = (self.side_length, self.inradius(), self.circumradius());
        let folded = Vector2::new(local.x.abs(), local.y);

        //candidates on the right edge and the right half of the bottom edge
        let apex = Vector2::new(0.0, big_r);
        let corner = Vector2::new(s / 2.0, -r);
        let bottom_mid = Vector2::new(0.0, -r);
        let closest = [
            intersection::closest_point_on_segment(apex, corner, folded),
            intersection::closest_point_on_segment(bottom_mid, corner, folded),
        ]
        .into_iter()
        .min_by_key(|c| OrderedFloat(c.distance_squared_to(folded)))
        .unwrap_or(corner);

        let unfolded = Vector2::new(closest.x.copysign(local.x), closest.y);
        to_world(unfolded, self.center, self.orientation)
    }
}

impl TriangleShape for RegularTriangle {
    fn point_a(&self) -> Vector2 {
        self.points[0]
    }

    fn point_b(&self) -> Vector2 {
        self.points[1]
    }

    fn point_c(&self) -> Vector2 {
        self.points[2]
    }

    fn centroid(&self) -> Vector2 {
        self.center
    }
}

impl Interpolate for RegularTriangle {
    fn interpolated(&self, to: &Self, by: f32) -> Self {
        let mut triangle = RegularTriangle {
            center: self.center.lerp(to.center, by),
            orientation: self.orientation.slerp(to.orientation, by),
            side_length: (self.side_length + (to.side_length - self.side_length) * by).max(0.0),
            points: self.points,
        };
        triangle.recompute();
        triangle
    }
}

impl Intersects<Ray> for RegularTriangle {
    fn intersects(&self, ray: &Ray) -> bool {
        let [a, b, c] = self.points;
        self.contains(ray.origin())
            || intersection::ray_intersects_segment(ray.origin(), ray.direction(), a, b)
            || intersection::ray_intersects_segment(ray.origin(), ray.direction(), b, c)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn vertices_surround_the_centroid() {
        let triangle = RegularTriangle::try_new(Vector2::new(1.0, 2.0), Complex::IDENTITY, 3.0).unwrap();
        let [a, b, c] = triangle.vertices();
        assert!(approx_eq!(Vector2, (a + b + c) / 3.0, Vector2::new(1.0, 2.0), epsilon = 1e-5));
        for (start, end) in triangle.edges() {
            assert!(approx_eq!(f32, start.distance_to(end), 3.0, epsilon = 1e-5));
        }
        assert!(triangle.point_a().y > triangle.point_b().y);
        assert!(triangle.point_b().x < triangle.point_c().x);
    }

    #[test]
    fn closest_point_is_mirror_symmetric() {
        let triangle = RegularTriangle::try_new(Vector2::ZERO, Complex::IDENTITY, 2.0).unwrap();
        let right = triangle.closest_point_to(Vector2::new(3.0, 0.5));
        let left = triangle.closest_point_to(Vector2::new(-3.0, 0.5));
        assert!(approx_eq!(f32, right.x, -left.x, epsilon = 1e-6));
        assert!(approx_eq!(f32, right.y, left.y, epsilon = 1e-6));

        let below = triangle.closest_point_to(Vector2::new(0.25, -5.0));
        assert!(approx_eq!(Vector2, below, Vector2::new(0.25, -triangle.inradius()), epsilon = 1e-6));

        let past_corner = triangle.closest_point_to(Vector2::new(5.0, -5.0));
        assert!(approx_eq!(Vector2, past_corner, triangle.point_c(), epsilon = 1e-5));
    }
}
