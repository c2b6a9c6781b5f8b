use crate::geometry::geo_traits::{Interpolate, Intersects, Shape, Transformable};
use crate::geometry::primitives::{AaRect, Complex, Vector2};
use crate::geometry::shapes::{
    Circle, LineSegment, Ray, Rectangle, RegularPolygon, RegularTriangle, RoundedRectangle, Square, Triangle,
};

/// Any of the shapes of this crate, for heterogeneous collections.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyShape {
    LineSegment(LineSegment),
    Triangle(Triangle),
    RegularTriangle(RegularTriangle),
    Square(Square),
    Rectangle(Rectangle),
    RoundedRectangle(RoundedRectangle),
    RegularPolygon(RegularPolygon),
    Circle(Circle),
}

/// Forwards an expression to the shape inside every variant
macro_rules! dispatch {
    ($self:expr, $shape:ident => $body:expr) => {
        match $self {
            AnyShape::LineSegment($shape) => $body,
            AnyShape::Triangle($shape) => $body,
            AnyShape::RegularTriangle($shape) => $body,
            AnyShape::Square($shape) => $body,
            AnyShape::Rectangle($shape) => $body,
            AnyShape::RoundedRectangle($shape) => $body,
            AnyShape::RegularPolygon($shape) => $body,
            AnyShape::Circle($shape) => $body,
        }
    };
}

impl AnyShape {
    /// Name of the variant, for logging and labelling
    pub fn kind(&self) -> &'static str {
        match self {
            AnyShape::LineSegment(_) => "line_segment",
            AnyShape::Triangle(_) => "triangle",
            AnyShape::RegularTriangle(_) => "regular_triangle",
            AnyShape::Square(_) => "square",
            AnyShape::Rectangle(_) => "rectangle",
            AnyShape::RoundedRectangle(_) => "rounded_rectangle",
            AnyShape::RegularPolygon(_) => "regular_polygon",
            AnyShape::Circle(_) => "circle",
        }
    }
}

impl Transformable for AnyShape {
    fn center(&self) -> Vector2 {
        dispatch!(self, s => s.center())
    }

    fn orientation(&self) -> Complex {
        dispatch!(self, s => s.orientation())
    }

    fn transform_by(&mut self, displacement: Vector2, rotation: Complex, factor: f32) -> &mut Self {
        dispatch!(self, s => {
            s.transform_by(displacement, rotation, factor);
        });
        self
    }

    fn transform_to(&mut self, position: Vector2, orientation: Complex) -> &mut Self {
        dispatch!(self, s => {
            s.transform_to(position, orientation);
        });
        self
    }
}

impl Shape for AnyShape {
    fn area(&self) -> f32 {
        dispatch!(self, s => s.area())
    }

    fn perimeter(&self) -> f32 {
        dispatch!(self, s => s.perimeter())
    }

    fn bbox(&self) -> AaRect {
        dispatch!(self, s => s.bbox())
    }

    fn contains(&self, point: Vector2) -> bool {
        dispatch!(self, s => s.contains(point))
    }

    fn closest_point_to(&self, point: Vector2) -> Vector2 {
        dispatch!(self, s => s.closest_point_to(point))
    }
}

impl Intersects<Ray> for AnyShape {
    fn intersects(&self, ray: &Ray) -> bool {
        dispatch!(self, s => s.intersects(ray))
    }
}

impl Interpolate for AnyShape {
    /// Shapes of different kinds cannot be blended, the result snaps from `self` to `to` halfway through.
    fn interpolated(&self, to: &Self, by: f32) -> Self {
        match (self, to) {
            (AnyShape::LineSegment(a), AnyShape::LineSegment(b)) => a.interpolated(b, by).into(),
            (AnyShape::Triangle(a), AnyShape::Triangle(b)) => a.interpolated(b, by).into(),
            (AnyShape::RegularTriangle(a), AnyShape::RegularTriangle(b)) => a.interpolated(b, by).into(),
            (AnyShape::Square(a), AnyShape::Square(b)) => a.interpolated(b, by).into(),
            (AnyShape::Rectangle(a), AnyShape::Rectangle(b)) => a.interpolated(b, by).into(),
            (AnyShape::RoundedRectangle(a), AnyShape::RoundedRectangle(b)) => a.interpolated(b, by).into(),
            (AnyShape::RegularPolygon(a), AnyShape::RegularPolygon(b)) => a.interpolated(b, by).into(),
            (AnyShape::Circle(a), AnyShape::Circle(b)) => a.interpolated(b, by).into(),
            _ if by < 0.5 => self.clone(),
            _ => to.clone(),
        }
    }
}

macro_rules! impl_from_shape {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for AnyShape {
                fn from(shape: $variant) -> Self {
                    AnyShape::$variant(shape)
                }
            }
        )*
    };
}

impl_from_shape!(
    LineSegment,
    Triangle,
    RegularTriangle,
    Square,
    Rectangle,
    RoundedRectangle,
    RegularPolygon,
    Circle
);
