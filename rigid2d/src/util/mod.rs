/// Set of functions used throughout assure the correctness of the library.
pub mod assertions;

mod fpa;
pub mod tolerance;

#[doc(inline)]
pub use fpa::FPA;
