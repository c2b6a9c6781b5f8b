use std::f32::consts::{FRAC_PI_2, PI, TAU};

use anyhow::Result;
use itertools::Itertools;
use log::warn;

use crate::geometry::geo_traits::{Interpolate, Intersects, Shape, Transformable};
use crate::geometry::intersection;
use crate::geometry::primitives::{AaRect, Complex, Vector2};
use crate::geometry::shapes::{
    Circle, Ray, RegularTriangle, Square, compose_orientation, points_bbox, to_local, to_world, validate_length,
    validate_side_count,
};
use crate::util::assertions;
use crate::util::tolerance::BOUNDARY_EPSILON;

/// Regular polygon with `side_count` edges of equal `side_length`, centered at `center`.
///
/// Un-rotated, the polygon is mirror symmetric about the y-axis: with an odd side count a vertex points
/// straight up, with an even side count the top edge is horizontal. Vertices are cached counterclockwise,
/// starting at the top vertex (odd) or the right end of the top edge (even).
///
/// Two sides collapse the polygon onto a segment along the x-axis of its local frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RegularPolygon {
    center: Vector2,
    orientation: Complex,
    side_length: f32,
    side_count: usize,
    inradius: f32,
    circumradius: f32,
    points: Vec<Vector2>,
}

impl RegularPolygon {
    pub fn try_new(center: Vector2, orientation: Complex, side_length: f32, side_count: usize) -> Result<Self> {
        let side_length = validate_length("side_length", side_length)?;
        let side_count = validate_side_count(side_count)?;
        let mut polygon = RegularPolygon {
            center,
            orientation,
            side_length,
            side_count,
            inradius: 0.0,
            circumradius: 0.0,
            points: Vec::with_capacity(side_count),
        };
        polygon.recompute();
        Ok(polygon)
    }

    fn recompute(&mut self) {
        let (n, half_side) = (self.side_count as f32, self.side_length / 2.0);
        (self.inradius, self.circumradius) = match self.side_count {
            2 => (0.0, half_side),
            _ => (half_side / (PI / n).tan(), half_side / (PI / n).sin()),
        };
        let local_points = self.local_points();
        self.points.clear();
        self.points
            .extend(local_points.iter().map(|p| to_world(*p, self.center, self.orientation)));

        debug_assert!(assertions::regular_polygon_is_consistent(self, &local_points));
        debug_assert!(assertions::points_are_counterclockwise(&local_points));
    }

    /// Vertices of the un-rotated polygon centered at the origin.
    ///
    /// Only the right half is generated by stepping clockwise from the top,
    /// the left half is its mirror image so that the symmetry holds exactly.
    fn local_points(&self) -> Vec<Vector2> {
        let n = self.side_count;
        let half_side = self.side_length / 2.0;
        if n == 2 {
            return vec![Vector2::new(-half_side, 0.0), Vector2::new(half_side, 0.0)];
        }
        let mirror = |p: Vector2| Vector2::new(-p.x, p.y);
        let step = Complex::from_angle(-self.exterior_angle());
        let (first, right_count) = match n % 2 {
            0 => (Vector2::new(half_side, self.inradius), n / 2),
            _ => (Vector2::new(0.0, self.circumradius), n / 2 + 1),
        };
        let right = std::iter::successors(Some(first), |p| Some(p.rotated_by(step)))
            .take(right_count)
            .collect_vec();

        (0..n)
            .map(|j| match n % 2 {
                0 if j == 0 => right[0],
                0 if j <= n / 2 => mirror(right[j - 1]),
                0 => right[n - j],
                _ if j <= n / 2 => mirror(right[j]),
                _ => right[n - j],
            })
            .collect_vec()
    }

    pub fn side_length(&self) -> f32 {
        self.side_length
    }

    pub fn side_count(&self) -> usize {
        self.side_count
    }

    /// Distance from the center to the middle of an edge
    pub fn inradius(&self) -> f32 {
        self.inradius
    }

    /// Distance from the center to a vertex
    pub fn circumradius(&self) -> f32 {
        self.circumradius
    }

    /// Angle between the normals of two consecutive edges
    pub fn exterior_angle(&self) -> f32 {
        TAU / self.side_count as f32
    }

    pub fn interior_angle(&self) -> f32 {
        PI - self.exterior_angle()
    }

    pub fn points(&self) -> &[Vector2] {
        &self.points
    }

    /// Edges between consecutive vertices, edge `k` runs from vertex `k` to vertex `k + 1`
    pub fn edges(&self) -> impl Iterator<Item = (Vector2, Vector2)> + '_ {
        self.points.iter().copied().circular_tuple_windows()
    }

    pub fn incircle(&self) -> Circle {
        Circle::from_parts(self.center, self.orientation, self.inradius)
    }

    pub fn circumcircle(&self) -> Circle {
        Circle::from_parts(self.center, self.orientation, self.circumradius)
    }

    pub fn with_center(&self, center: Vector2) -> Self {
        let mut polygon = self.clone();
        polygon.transform_to(center, self.orientation);
        polygon
    }

    pub fn with_orientation(&self, orientation: Complex) -> Self {
        let mut polygon = self.clone();
        polygon.transform_to(self.center, orientation);
        polygon
    }

    pub fn with_side_length(&self, side_length: f32) -> Result<Self> {
        RegularPolygon::try_new(self.center, self.orientation, side_length, self.side_count)
    }

    pub fn with_side_count(&self, side_count: usize) -> Result<Self> {
        RegularPolygon::try_new(self.center, self.orientation, self.side_length, side_count)
    }

    pub fn set(
        &mut self,
        center: Vector2,
        orientation: Complex,
        side_length: f32,
        side_count: usize,
    ) -> Result<&mut Self> {
        *self = RegularPolygon::try_new(center, orientation, side_length, side_count).inspect_err(|e| warn!("{e}"))?;
        Ok(self)
    }

    pub fn set_side_length(&mut self, side_length: f32) -> Result<&mut Self> {
        self.side_length = validate_length("side_length", side_length).inspect_err(|e| warn!("{e}"))?;
        self.recompute();
        Ok(self)
    }

    pub fn set_side_count(&mut self, side_count: usize) -> Result<&mut Self> {
        self.side_count = validate_side_count(side_count).inspect_err(|e| warn!("{e}"))?;
        self.recompute();
        Ok(self)
    }

    /// Angle of the outward normal of edge `k` in the local frame
    fn edge_normal_angle(&self, k: usize) -> f32 {
        let ext = self.exterior_angle();
        let offset = match self.side_count % 2 {
            0 => 0.0,
            _ => ext / 2.0,
        };
        FRAC_PI_2 + offset + k as f32 * ext
    }

    /// Index of the edge whose angular sector (as seen from the center) contains `local`
    fn sector_of(&self, local: Vector2) -> usize {
        let ext = self.exterior_angle();
        let start = self.edge_normal_angle(0) - ext / 2.0;
        let angle = (local.angle() - start).rem_euclid(TAU);
        ((angle / ext) as usize).min(self.side_count - 1)
    }

    /// Returns `local` in the frame of the edge facing it:
    /// x along the edge's outward normal, y along the edge.
    fn to_sector_frame(&self, local: Vector2) -> (Complex, Vector2) {
        let normal = Complex::from_angle(self.edge_normal_angle(self.sector_of(local)));
        (normal, local.rotated_by(normal.conjugate()))
    }

    fn contains_local(&self, local: Vector2) -> bool {
        if self.side_count == 2 {
            let half_side = self.side_length / 2.0;
            return local.x.abs() <= half_side + BOUNDARY_EPSILON && local.y.abs() <= BOUNDARY_EPSILON;
        }
        let (_, in_sector) = self.to_sector_frame(local);
        in_sector.x <= self.inradius + BOUNDARY_EPSILON
    }

    /// Edge `k` in world space
    fn edge(&self, k: usize) -> (Vector2, Vector2) {
        let n = self.side_count;
        (self.points[k % n], self.points[(k + 1) % n])
    }
}

impl Transformable for RegularPolygon {
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

impl Shape for RegularPolygon {
    fn area(&self) -> f32 {
        self.side_count as f32 * self.side_length * self.inradius / 2.0
    }

    fn perimeter(&self) -> f32 {
        self.side_count as f32 * self.side_length
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
        let half_side = self.side_length / 2.0;
        if self.side_count == 2 {
            let closest = Vector2::new(local.x.clamp(-half_side, half_side), 0.0);
            return to_world(closest, self.center, self.orientation);
        }
        //only the edge facing the point can hold its closest point
        let (normal, in_sector) = self.to_sector_frame(local);
        let on_edge = Vector2::new(self.inradius, in_sector.y.clamp(-half_side, half_side));
        to_world(on_edge.rotated_by(normal), self.center, self.orientation)
    }
}

impl Interpolate for RegularPolygon {
    /// The side count snaps from one end to the other halfway through.
    fn interpolated(&self, to: &Self, by: f32) -> Self {
        let side_count = match by < 0.5 {
            true => self.side_count,
            false => to.side_count,
        };
        let mut polygon = RegularPolygon {
            center: self.center.lerp(to.center, by),
            orientation: self.orientation.slerp(to.orientation, by),
            side_length: (self.side_length + (to.side_length - self.side_length) * by).max(0.0),
            side_count,
            inradius: 0.0,
            circumradius: 0.0,
            points: Vec::with_capacity(side_count),
        };
        polygon.recompute();
        polygon
    }
}

impl Intersects<Ray> for RegularPolygon {
    fn intersects(&self, ray: &Ray) -> bool {
        if self.side_count == 2 {
            let (a, b) = self.edge(0);
            return intersection::ray_intersects_segment(ray.origin(), ray.direction(), a, b);
        }
        let origin = to_local(ray.origin(), self.center, self.orientation);
        if self.contains_local(origin) {
            return true;
        }
        //closest approach of the ray to the center
        let direction = ray.direction().rotated_by(self.orientation.conjugate());
        let t = (-origin.dot(direction)).max(0.0);
        let nearest = origin + direction * t;
        let distance = nearest.length();

        if distance <= self.inradius {
            //passes through the incircle
            return true;
        }
        if distance > self.circumradius + BOUNDARY_EPSILON {
            //misses the circumcircle
            return false;
        }
        //in the band between both circles, a hit can only be on the edges around the closest approach
        let n = self.side_count;
        let k = self.sector_of(nearest);
        [k + n - 1, k, k + 1].into_iter().any(|i| {
            let (a, b) = self.edge(i);
            intersection::ray_intersects_segment(ray.origin(), ray.direction(), a, b)
        })
    }
}

impl From<RegularTriangle> for RegularPolygon {
    fn from(triangle: RegularTriangle) -> Self {
        let mut polygon = RegularPolygon {
            center: triangle.center(),
            orientation: triangle.orientation(),
            side_length: triangle.side_length(),
            side_count: 3,
            inradius: 0.0,
            circumradius: 0.0,
            points: Vec::with_capacity(3),
        };
        polygon.recompute();
        polygon
    }
}

impl From<Square> for RegularPolygon {
    fn from(square: Square) -> Self {
        let mut polygon = RegularPolygon {
            center: square.center(),
            orientation: square.orientation(),
            side_length: square.side_length(),
            side_count: 4,
            inradius: 0.0,
            circumradius: 0.0,
            points: Vec::with_capacity(4),
        };
        polygon.recompute();
        polygon
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use test_case::test_case;

    use super::*;
    use crate::geometry::geo_traits::CircleShape;

    #[test_case(3; "triangle")]
    #[test_case(4; "square")]
    #[test_case(5; "pentagon")]
    #[test_case(6; "hexagon")]
    #[test_case(11; "hendecagon")]
    fn vertices_are_equidistant_and_symmetric(side_count: usize) {
        let polygon = RegularPolygon::try_new(Vector2::ZERO, Complex::IDENTITY, 2.0, side_count).unwrap();
        assert_eq!(polygon.points().len(), side_count);
        for p in polygon.points() {
            assert!(approx_eq!(f32, p.length(), polygon.circumradius(), epsilon = 1e-5));
        }
        for (a, b) in polygon.edges() {
            assert!(approx_eq!(f32, a.distance_to(b), 2.0, epsilon = 1e-5));
            //counterclockwise winding
            assert!(a.perp_dot(b) > 0.0);
        }
        //every vertex has a mirror image
        for p in polygon.points() {
            let mirrored = Vector2::new(-p.x, p.y);
            assert!(polygon.points().iter().any(|q| approx_eq!(Vector2, *q, mirrored, epsilon = 1e-5)));
        }
    }

    #[test]
    fn even_polygons_have_a_flat_top() {
        let hexagon = RegularPolygon::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0, 6).unwrap();
        assert!(approx_eq!(Vector2, hexagon.points()[0], Vector2::new(0.5, hexagon.inradius()), epsilon = 1e-6));
        assert!(approx_eq!(Vector2, hexagon.points()[1], Vector2::new(-0.5, hexagon.inradius()), epsilon = 1e-6));

        let pentagon = RegularPolygon::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0, 5).unwrap();
        assert!(approx_eq!(Vector2, pentagon.points()[0], Vector2::new(0.0, pentagon.circumradius()), epsilon = 1e-6));
    }

    #[test]
    fn two_sided_polygon_is_a_segment() {
        let polygon = RegularPolygon::try_new(Vector2::new(1.0, 0.0), Complex::IDENTITY, 2.0, 2).unwrap();
        assert_eq!(polygon.points(), &[Vector2::new(0.0, 0.0), Vector2::new(2.0, 0.0)]);
        assert_eq!(polygon.inradius(), 0.0);
        assert_eq!(polygon.area(), 0.0);
        assert_eq!(polygon.perimeter(), 4.0);
        assert!(polygon.contains(Vector2::new(1.5, 0.0)));
        assert!(!polygon.contains(Vector2::new(1.5, 0.1)));
        assert_eq!(polygon.closest_point_to(Vector2::new(5.0, 3.0)), Vector2::new(2.0, 0.0));
        assert!(polygon.intersects(&Ray::new(Vector2::new(1.0, -1.0), Vector2::UNIT_Y)));
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert!(RegularPolygon::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0, 1).is_err());
        assert!(RegularPolygon::try_new(Vector2::ZERO, Complex::IDENTITY, -1.0, 5).is_err());

        let mut polygon = RegularPolygon::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0, 5).unwrap();
        let before = polygon.clone();
        assert!(polygon.set_side_count(0).is_err());
        assert!(polygon.set_side_length(f32::NAN).is_err());
        assert_eq!(polygon, before);

        //construction and the setter report the same message
        let from_new = RegularPolygon::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0, 1).unwrap_err();
        let from_set = polygon.set_side_count(1).unwrap_err();
        assert_eq!(from_new.to_string(), from_set.to_string());
        assert_eq!(from_set.to_string(), "side_count must be at least 2, got 1");
    }

    #[test]
    fn square_closest_point() {
        let square = RegularPolygon::try_new(Vector2::ZERO, Complex::IDENTITY, 2.0, 4).unwrap();
        assert!(square.contains(Vector2::ZERO));
        assert!(!square.contains(Vector2::new(1.5, 0.0)));
        let closest = square.closest_point_to(Vector2::new(2.0, 0.0));
        assert!(approx_eq!(Vector2, closest, Vector2::new(1.0, 0.0), epsilon = 1e-5));
        let corner = square.closest_point_to(Vector2::new(3.0, 3.0));
        assert!(approx_eq!(Vector2, corner, Vector2::new(1.0, 1.0), epsilon = 1e-5));
    }

    #[test]
    fn circles_bound_the_polygon() {
        let polygon = RegularPolygon::try_new(Vector2::new(3.0, -1.0), Complex::from_degrees(17.0), 1.5, 7).unwrap();
        assert_eq!(polygon.incircle().radius(), polygon.inradius());
        assert_eq!(polygon.circumcircle().center(), polygon.center());
        assert!(polygon.inradius() < polygon.circumradius());
    }
}
