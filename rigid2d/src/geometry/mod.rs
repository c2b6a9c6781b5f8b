pub mod geo_traits;
pub mod intersection;
pub mod primitives;
pub mod shapes;

#[doc(inline)]
pub use primitives::{AaRect, Complex, Vector2};
#[doc(inline)]
pub use shapes::{
    AnyShape, Circle, LineSegment, Ray, Rectangle, RegularPolygon, RegularTriangle,
    RoundedRectangle, Square, Triangle,
};
