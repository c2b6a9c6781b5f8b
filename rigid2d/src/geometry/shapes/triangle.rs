use anyhow::{Result, ensure};
use log::warn;

use crate::geometry::geo_traits::{Interpolate, Intersects, Shape, Transformable, TriangleShape};
use crate::geometry::intersection;
use crate::geometry::primitives::{AaRect, Complex, Vector2};
use crate::geometry::shapes::{Ray, compose_orientation, points_bbox, to_world, validate_position};
use crate::util::assertions;

/// Arbitrary triangle.
///
/// Stored as its centroid, an orientation and the three vertices relative to the centroid
/// before rotation (the origin points). The world space vertices are cached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    centroid: Vector2,
    orientation: Complex,
    origin_points: [Vector2; 3],
    points: [Vector2; 3],
}

impl Triangle {
    /// Creates a triangle from origin points relative to `centroid`.
    /// The origin points are shifted so that their own average is zero.
    pub fn try_new(centroid: Vector2, orientation: Complex, origin_points: [Vector2; 3]) -> Result<Self> {
        let centroid = validate_position("centroid", centroid)?;
        ensure!(
            origin_points.iter().all(|p| p.is_finite()),
            "origin points must be finite, got {origin_points:?}"
        );
        let (shift, origin_points) = recentered(origin_points);
        let mut triangle = Triangle {
            centroid: centroid + shift.rotated_by(orientation),
            orientation,
            origin_points,
            points: origin_points,
        };
        triangle.recompute();
        Ok(triangle)
    }

    /// Triangle with the given world space vertices and identity orientation
    pub fn from_points(point_a: Vector2, point_b: Vector2, point_c: Vector2) -> Self {
        let points = [point_a, point_b, point_c];
        let (centroid, origin_points) = recentered(points);
        Triangle {
            centroid,
            orientation: Complex::IDENTITY,
            origin_points,
            points,
        }
    }

    fn recompute(&mut self) {
        debug_assert!(assertions::points_are_centered(&self.origin_points));
        self.points = self
            .origin_points
            .map(|p| to_world(p, self.centroid, self.orientation));
    }

    pub fn points(&self) -> &[Vector2; 3] {
        &self.points
    }

    /// Vertices relative to the centroid, before rotation
    pub fn origin_points(&self) -> &[Vector2; 3] {
        &self.origin_points
    }

    /// Signed area, positive for counterclockwise vertices
    pub fn signed_area(&self) -> f32 {
        let [a, b, c] = self.points;
        (b - a).perp_dot(c - a) / 2.0
    }

    pub fn with_center(&self, centroid: Vector2) -> Self {
        let mut triangle = *self;
        triangle.transform_to(centroid, self.orientation);
        triangle
    }

    pub fn with_orientation(&self, orientation: Complex) -> Self {
        let mut triangle = *self;
        triangle.transform_to(self.centroid, orientation);
        triangle
    }

    pub fn with_origin_points(&self, origin_points: [Vector2; 3]) -> Result<Self> {
        Triangle::try_new(self.centroid, self.orientation, origin_points)
    }

    pub fn set(&mut self, centroid: Vector2, orientation: Complex, origin_points: [Vector2; 3]) -> Result<&mut Self> {
        *self = Triangle::try_new(centroid, orientation, origin_points).inspect_err(|e| warn!("{e}"))?;
        Ok(self)
    }

    pub fn set_points(&mut self, point_a: Vector2, point_b: Vector2, point_c: Vector2) -> &mut Self {
        *self = Triangle::from_points(point_a, point_b, point_c);
        self
    }
}

/// Splits points into their mean and the points relative to that mean.
/// A second pass removes the round-off the first subtraction leaves behind at large coordinates.
fn recentered(points: [Vector2; 3]) -> (Vector2, [Vector2; 3]) {
    let mean = |[a, b, c]: [Vector2; 3]| (a + b + c) / 3.0;
    let shift = mean(points);
    let points = points.map(|p| p - shift);
    let residual = mean(points);
    (shift + residual, points.map(|p| p - residual))
}

impl Transformable for Triangle {
    fn center(&self) -> Vector2 {
        self.centroid
    }

    fn orientation(&self) -> Complex {
        self.orientation
    }

    fn transform_by(&mut self, displacement: Vector2, rotation: Complex, factor: f32) -> &mut Self {
        self.centroid += displacement;
        self.orientation = compose_orientation(self.orientation, rotation, factor);
        let scale = factor.abs();
        self.origin_points = self.origin_points.map(|p| p * scale);
        self.recompute();
        self
    }

    fn transform_to(&mut self, position: Vector2, orientation: Complex) -> &mut Self {
        self.centroid = position;
        self.orientation = orientation;
        self.recompute();
        self
    }
}

impl Shape for Triangle {
    fn area(&self) -> f32 {
        self.signed_area().abs()
    }

    fn perimeter(&self) -> f32 {
        self.edges().iter().map(|(s, e)| s.distance_to(*e)).sum()
    }

    fn bbox(&self) -> AaRect {
        points_bbox(&self.points)
    }

    fn contains(&self, point: Vector2) -> bool {
        let [a, b, c] = self.points;
        intersection::triangle_contains(a, b, c, point)
    }

    fn closest_point_to(&self, point: Vector2) -> Vector2 {
        let [a, b, c] = self.points;
        match intersection::triangle_contains(a, b, c, point) {
            true => point,
            false => intersection::triangle_closest_point(a, b, c, point),
        }
    }
}

impl TriangleShape for Triangle {
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
        self.centroid
    }
}

impl Interpolate for Triangle {
    /// Blends the shape and the pose separately.
    ///
    /// Each end is expressed in a reference frame aligned with its own first vertex,
    /// so triangles differing only by a rotation blend through rotated copies instead of shrinking.
    fn interpolated(&self, to: &Self, by: f32) -> Self {
        let world_offsets = |t: &Triangle| t.points.map(|p| p - t.centroid);
        let (from_offsets, to_offsets) = (world_offsets(self), world_offsets(to));

        let from_ref = Complex::from_direction(from_offsets[0]);
        let to_ref = Complex::from_direction(to_offsets[0]);

        let from_local = from_offsets.map(|p| p.rotated_by(from_ref.conjugate()));
        let to_local = to_offsets.map(|p| p.rotated_by(to_ref.conjugate()));

        let reference = from_ref.slerp(to_ref, by);
        let orientation = self.orientation.slerp(to.orientation, by);
        let origin_rotation = (reference * orientation.conjugate()).normalized();

        let origin_points = [0, 1, 2].map(|i| from_local[i].lerp(to_local[i], by).rotated_by(origin_rotation));
        let (shift, origin_points) = recentered(origin_points);

        let mut triangle = Triangle {
            centroid: self.centroid.lerp(to.centroid, by) + shift.rotated_by(orientation),
            orientation,
            origin_points,
            points: self.points,
        };
        triangle.recompute();
        triangle
    }
}

impl Intersects<Ray> for Triangle {
    fn intersects(&self, ray: &Ray) -> bool {
        let [a, b, c] = self.points;
        intersection::ray_intersects_triangle(ray.origin(), ray.direction(), a, b, c)
    }
}
