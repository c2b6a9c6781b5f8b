use log::debug;

use crate::geometry::primitives::{AaRect, Complex, Vector2};
use crate::util::tolerance::PIVOT_EPSILON;

/// Trait for types that can detect intersections between `Self` and `T`.
pub trait Intersects<T: ?Sized> {
    fn intersects(&self, other: &T) -> bool;
}

/// Trait for shared properties of (solid) geometric shapes.
pub trait Shape {
    /// Area of the interior of the shape
    fn area(&self) -> f32;

    /// Length of the closed boundary of the shape
    fn perimeter(&self) -> f32;

    /// Bounding box of the shape
    fn bbox(&self) -> AaRect;

    /// Whether `point` lies inside or on the boundary of the shape.
    /// Points up to [`BOUNDARY_EPSILON`](crate::util::tolerance::BOUNDARY_EPSILON) outside still count.
    fn contains(&self, point: Vector2) -> bool;

    /// The point of the shape closest to `point`, `point` itself if it is contained.
    fn closest_point_to(&self, point: Vector2) -> Vector2;
}

/// Trait for rigid bodies that can be moved, rotated and scaled.
///
/// Implementors supply the two fused operations [`transform_by`](Transformable::transform_by)
/// and [`transform_to`](Transformable::transform_to); all others are derived from them.
/// Every in-place operation has a pure counterpart returning a transformed clone.
pub trait Transformable: Clone {
    /// Reference point of the shape, about which it rotates and scales
    fn center(&self) -> Vector2;

    /// Rotational pose of the shape
    fn orientation(&self) -> Complex;

    /// Moves `self` by `displacement`, then rotates it about its own center by `rotation`
    /// and scales it about its own center by `factor`.
    /// A negative `factor` flips the orientation by half a turn and scales by `|factor|`.
    fn transform_by(&mut self, displacement: Vector2, rotation: Complex, factor: f32) -> &mut Self;

    /// Places the center of `self` at `position` and sets its orientation to `orientation`.
    fn transform_to(&mut self, position: Vector2, orientation: Complex) -> &mut Self;

    fn move_by(&mut self, displacement: Vector2) -> &mut Self {
        self.transform_by(displacement, Complex::IDENTITY, 1.0)
    }

    fn move_to(&mut self, position: Vector2) -> &mut Self {
        let orientation = self.orientation();
        self.transform_to(position, orientation)
    }

    fn rotate_by(&mut self, rotation: Complex) -> &mut Self {
        self.transform_by(Vector2::ZERO, rotation, 1.0)
    }

    fn rotate_to(&mut self, orientation: Complex) -> &mut Self {
        let center = self.center();
        self.transform_to(center, orientation)
    }

    /// Rotates `self` about `point` by `rotation`
    fn rotate_around_point_by(&mut self, point: Vector2, rotation: Complex) -> &mut Self {
        let center = self.center();
        let offset = center - point;
        if offset.length() < PIVOT_EPSILON {
            //pivot coincides with the center
            return self.rotate_by(rotation);
        }
        let target = point + offset.rotated_by(rotation);
        self.transform_by(target - center, rotation, 1.0)
    }

    /// Rotates `self` about `point` until its orientation equals `orientation`
    fn rotate_around_point_to(&mut self, point: Vector2, orientation: Complex) -> &mut Self {
        let center = self.center();
        let offset = center - point;
        if offset.length() < PIVOT_EPSILON {
            //pivot coincides with the center
            return self.rotate_to(orientation);
        }
        let delta = (self.orientation().conjugate() * orientation).normalized();
        self.transform_to(point + offset.rotated_by(delta), orientation)
    }

    /// Scales `self` about its own center
    fn scale_by(&mut self, factor: f32) -> &mut Self {
        self.transform_by(Vector2::ZERO, Complex::IDENTITY, factor)
    }

    /// Scales `self` about `point` (homothety)
    fn dilate_by(&mut self, point: Vector2, factor: f32) -> &mut Self {
        let center = self.center();
        let offset = center - point;
        if offset.length() < PIVOT_EPSILON {
            //pivot coincides with the center
            return self.scale_by(factor);
        }
        self.transform_by(offset * (factor - 1.0), Complex::IDENTITY, factor)
    }

    /// Renormalizes the orientation to counter drift accumulated over many chained transforms
    fn calibrate(&mut self) -> &mut Self {
        let (center, orientation) = (self.center(), self.orientation());
        if !orientation.is_normalized() {
            debug!(
                "calibrating drifted orientation, magnitude: {}",
                orientation.magnitude()
            );
        }
        self.transform_to(center, orientation.normalized())
    }

    fn moved_by(&self, displacement: Vector2) -> Self {
        let mut clone = self.clone();
        clone.move_by(displacement);
        clone
    }

    fn moved_to(&self, position: Vector2) -> Self {
        let mut clone = self.clone();
        clone.move_to(position);
        clone
    }

    fn rotated_by(&self, rotation: Complex) -> Self {
        let mut clone = self.clone();
        clone.rotate_by(rotation);
        clone
    }

    fn rotated_to(&self, orientation: Complex) -> Self {
        let mut clone = self.clone();
        clone.rotate_to(orientation);
        clone
    }

    fn rotated_around_point_by(&self, point: Vector2, rotation: Complex) -> Self {
        let mut clone = self.clone();
        clone.rotate_around_point_by(point, rotation);
        clone
    }

    fn rotated_around_point_to(&self, point: Vector2, orientation: Complex) -> Self {
        let mut clone = self.clone();
        clone.rotate_around_point_to(point, orientation);
        clone
    }

    fn scaled_by(&self, factor: f32) -> Self {
        let mut clone = self.clone();
        clone.scale_by(factor);
        clone
    }

    fn dilated_by(&self, point: Vector2, factor: f32) -> Self {
        let mut clone = self.clone();
        clone.dilate_by(point, factor);
        clone
    }

    fn transformed_by(&self, displacement: Vector2, rotation: Complex, factor: f32) -> Self {
        let mut clone = self.clone();
        clone.transform_by(displacement, rotation, factor);
        clone
    }

    fn transformed_to(&self, position: Vector2, orientation: Complex) -> Self {
        let mut clone = self.clone();
        clone.transform_to(position, orientation);
        clone
    }

    fn calibrated(&self) -> Self {
        let mut clone = self.clone();
        clone.calibrate();
        clone
    }
}

/// Trait for types that can be blended with another instance of the same type.
///
/// Positions and sizes are interpolated linearly, orientations along the shortest arc.
pub trait Interpolate: Sized {
    /// Returns the blend between `self` (`by = 0`) and `to` (`by = 1`)
    fn interpolated(&self, to: &Self, by: f32) -> Self;

    fn interpolate(&mut self, to: &Self, by: f32) -> &mut Self {
        *self = self.interpolated(to, by);
        self
    }
}

/// Shapes with three vertices
pub trait TriangleShape: Shape {
    fn point_a(&self) -> Vector2;

    fn point_b(&self) -> Vector2;

    fn point_c(&self) -> Vector2;

    fn vertices(&self) -> [Vector2; 3] {
        [self.point_a(), self.point_b(), self.point_c()]
    }

    /// Intersection of the three medians
    fn centroid(&self) -> Vector2 {
        (self.point_a() + self.point_b() + self.point_c()) / 3.0
    }

    /// Edges AB, BC and CA
    fn edges(&self) -> [(Vector2, Vector2); 3] {
        let [a, b, c] = self.vertices();
        [(a, b), (b, c), (c, a)]
    }
}

/// Shapes bounded by a single circle
pub trait CircleShape: Shape + Transformable {
    fn radius(&self) -> f32;

    fn diameter(&self) -> f32 {
        2.0 * self.radius()
    }
}
