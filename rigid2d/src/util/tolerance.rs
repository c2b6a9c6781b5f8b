//! Absolute tolerances gating the degenerate branches of the geometric algorithms.

/// Vectors shorter than this cannot be normalized and fall back to a caller-supplied value.
pub const NORMALIZATION_EPSILON: f32 = 1e-5;

/// Maximum deviation of a magnitude from 1.0 for a [`Complex`](crate::geometry::Complex) to count as normalized.
pub const UNIT_EPSILON: f32 = 1e-4;

/// Below this distance between a shape's reference point and a pivot, pivot-relative
/// transforms degenerate into in-place ones.
pub const PIVOT_EPSILON: f32 = 1e-5;

/// Cross products below this value treat two directions as parallel.
pub const PARALLEL_EPSILON: f32 = 1e-5;

/// Points at most this far outside a shape's outline are still reported as contained.
pub const BOUNDARY_EPSILON: f32 = 1e-4;
