#![doc = document_features::document_features!()]
//! A 2D Euclidean geometry kernel of rigid shapes.
//!
//! Every shape keeps a minimal set of canonical parameters (center, orientation, size)
//! next to a cache of derived boundary points, so that transforms stay cheap and
//! geometric queries run in constant time.

/// Geometric primitives, shape traits, concrete shapes and intersection kernels
pub mod geometry;

/// Exporting shapes out of this library
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
