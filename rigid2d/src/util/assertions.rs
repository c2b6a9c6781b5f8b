use itertools::Itertools;
use log::error;

use crate::geometry::Vector2;
use crate::geometry::shapes::{RegularPolygon, RoundedRectangle};
use crate::util::tolerance::{BOUNDARY_EPSILON, UNIT_EPSILON};

//Various checks to verify the cached state of shapes is consistent with their canonical parameters
//Used in debug_assert!() blocks. Points are expected in the local frame of the shape, not in world space.

/// Points wind counterclockwise (or are degenerate)
pub fn points_are_counterclockwise(points: &[Vector2]) -> bool {
    let double_area: f32 = points
        .iter()
        .circular_tuple_windows()
        .map(|(a, b)| a.perp_dot(*b))
        .sum();
    if double_area < -BOUNDARY_EPSILON {
        error!("points wind clockwise, double area: {double_area}");
        return false;
    }
    true
}

/// Origin points of a triangle average out to zero
pub fn points_are_centered(points: &[Vector2]) -> bool {
    if points.is_empty() {
        return true;
    }
    let sum = points.iter().fold(Vector2::ZERO, |acc, p| acc + *p);
    let mean = sum / points.len() as f32;
    let scale = points.iter().map(|p| p.length()).fold(1.0, f32::max);
    if mean.length() > UNIT_EPSILON * scale {
        error!("points are not centered, mean: {mean:?}");
        return false;
    }
    true
}

/// Every local vertex lies on the circumcircle and the vertex count matches the side count
pub fn regular_polygon_is_consistent(polygon: &RegularPolygon, local_points: &[Vector2]) -> bool {
    if polygon.points().len() != polygon.side_count() || local_points.len() != polygon.side_count() {
        error!(
            "polygon has {} points for {} sides",
            polygon.points().len(),
            polygon.side_count()
        );
        return false;
    }
    let expected = polygon.circumradius();
    let tolerance = UNIT_EPSILON * expected.max(1.0);
    let off_circle = local_points.iter().find(|p| (p.length() - expected).abs() > tolerance);
    if let Some(p) = off_circle {
        error!("vertex {p:?} is not on the circumcircle of radius {}", polygon.circumradius());
        return false;
    }
    true
}

/// Corner radius does not exceed half of the shorter side
pub fn rounded_rectangle_is_consistent(rect: &RoundedRectangle) -> bool {
    let limit = rect.width().min(rect.height()) / 2.0;
    if rect.corner_radius() > limit + BOUNDARY_EPSILON {
        error!("corner radius {} exceeds {limit}", rect.corner_radius());
        return false;
    }
    true
}
