mod any_shape;
mod circle;
mod line_segment;
mod ray;
mod rectangle;
mod regular_polygon;
mod regular_triangle;
mod rounded_rectangle;
mod square;
mod triangle;

#[doc(inline)]
pub use any_shape::AnyShape;
#[doc(inline)]
pub use circle::Circle;
#[doc(inline)]
pub use line_segment::LineSegment;
#[doc(inline)]
pub use ray::Ray;
#[doc(inline)]
pub use rectangle::Rectangle;
#[doc(inline)]
pub use regular_polygon::RegularPolygon;
#[doc(inline)]
pub use regular_triangle::RegularTriangle;
#[doc(inline)]
pub use rounded_rectangle::RoundedRectangle;
#[doc(inline)]
pub use square::Square;
#[doc(inline)]
pub use triangle::Triangle;

use anyhow::{Result, ensure};

use crate::geometry::geo_traits::Intersects;
use crate::geometry::primitives::{AaRect, Complex, Vector2};

/// Rejects negative and non-finite values for length-like parameters
pub(crate) fn validate_length(name: &str, value: f32) -> Result<f32> {
    ensure!(
        value.is_finite() && value >= 0.0,
        "{name} must be greater than or equal to zero, got {value}"
    );
    Ok(value)
}

/// Regular polygons need at least two sides, two of which collapse onto a segment
pub(crate) fn validate_side_count(value: usize) -> Result<usize> {
    ensure!(value >= 2, "side_count must be at least 2, got {value}");
    Ok(value)
}

pub(crate) fn validate_position(name: &str, value: Vector2) -> Result<Vector2> {
    ensure!(value.is_finite(), "{name} must be finite, got {value:?}");
    Ok(value)
}

/// New orientation after rotating by `rotation` and scaling by `factor`.
/// Renormalizes to bound drift, negative factors add half a turn.
pub(crate) fn compose_orientation(orientation: Complex, rotation: Complex, factor: f32) -> Complex {
    let composed = (orientation * rotation).normalized();
    match factor < 0.0 {
        true => -composed,
        false => composed,
    }
}

/// Expresses a world point in the un-rotated, un-translated frame of a shape
#[inline(always)]
pub(crate) fn to_local(point: Vector2, center: Vector2, orientation: Complex) -> Vector2 {
    (point - center).rotated_by(orientation.conjugate())
}

/// Inverse of [`to_local`]
#[inline(always)]
pub(crate) fn to_world(local: Vector2, center: Vector2, orientation: Complex) -> Vector2 {
    center + local.rotated_by(orientation)
}

/// Bounding box of a shape's cached boundary points
pub(crate) fn points_bbox(points: &[Vector2]) -> AaRect {
    let first = points.first().copied().unwrap_or(Vector2::ZERO);
    let (min, max) = points
        .iter()
        .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
    AaRect {
        x_min: min.x,
        y_min: min.y,
        x_max: max.x,
        y_max: max.y,
    }
}

/// Rays test against shapes by delegating to the shape's own ray test.
macro_rules! impl_ray_intersects {
    ($($shape:ty),*) => {
        $(
            impl Intersects<$shape> for Ray {
                fn intersects(&self, other: &$shape) -> bool {
                    other.intersects(self)
                }
            }
        )*
    };
}

impl_ray_intersects!(
    LineSegment,
    Triangle,
    RegularTriangle,
    Square,
    Rectangle,
    RoundedRectangle,
    RegularPolygon,
    Circle,
    AnyShape
);
