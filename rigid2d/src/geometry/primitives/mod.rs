mod aa_rect;
mod complex;
mod vector2;

#[doc(inline)]
pub use aa_rect::AaRect;
#[doc(inline)]
pub use complex::Complex;
#[doc(inline)]
pub use vector2::Vector2;
