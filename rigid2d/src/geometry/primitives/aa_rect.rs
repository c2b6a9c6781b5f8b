use anyhow::Result;
use anyhow::ensure;
use serde::{Deserialize, Serialize};

use crate::geometry::geo_traits::Intersects;
use crate::geometry::primitives::Vector2;
use crate::util::FPA;

///Axis-aligned rectangle, used as the bounding box of shapes.
///Degenerate (zero width or height) boxes are allowed, as line segments and rays have them.
#[derive(Clone, Debug, PartialEq, Copy, Serialize, Deserialize)]
pub struct AaRect {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl AaRect {
    pub fn try_new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Result<Self> {
        ensure!(
            x_min <= x_max && y_min <= y_max,
            "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
        );
        Ok(AaRect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Smallest rectangle containing all `points`, `None` if there are none
    pub fn from_points(points: impl IntoIterator<Item = Vector2>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(AaRect {
            x_min: min.x,
            y_min: min.y,
            x_max: max.x,
            y_max: max.y,
        })
    }

    /// Rectangle centered at `center` extending `half_extents` in each direction
    pub fn from_center(center: Vector2, half_extents: Vector2) -> Self {
        let half_extents = half_extents.abs();
        AaRect {
            x_min: center.x - half_extents.x,
            y_min: center.y - half_extents.y,
            x_max: center.x + half_extents.x,
            y_max: center.y + half_extents.y,
        }
    }

    /// Returns a new rectangle with the same centroid but scaled by `factor`.
    pub fn scale(self, factor: f32) -> Self {
        let half_extents = Vector2::new(self.width(), self.height()) * (0.5 * factor.abs());
        AaRect::from_center(self.centroid(), half_extents)
    }

    /// Returns the four corners of `self`, counterclockwise starting at the top right.
    pub fn corners(&self) -> [Vector2; 4] {
        [
            Vector2::new(self.x_max, self.y_max),
            Vector2::new(self.x_min, self.y_max),
            Vector2::new(self.x_min, self.y_min),
            Vector2::new(self.x_max, self.y_min),
        ]
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    /// Returns the largest rectangle that is contained in both `a` and `b`.
    pub fn intersection(a: AaRect, b: AaRect) -> Option<AaRect> {
        let x_min = f32::max(a.x_min, b.x_min);
        let y_min = f32::max(a.y_min, b.y_min);
        let x_max = f32::min(a.x_max, b.x_max);
        let y_max = f32::min(a.y_max, b.y_max);
        if x_min <= x_max && y_min <= y_max {
            Some(AaRect {
                x_min,
                y_min,
                x_max,
                y_max,
            })
        } else {
            None
        }
    }

    /// Returns the smallest rectangle that contains both `a` and `b`.
    pub fn bounding_rect(a: AaRect, b: AaRect) -> AaRect {
        AaRect {
            x_min: f32::min(a.x_min, b.x_min),
            y_min: f32::min(a.y_min, b.y_min),
            x_max: f32::max(a.x_max, b.x_max),
            y_max: f32::max(a.y_max, b.y_max),
        }
    }

    pub fn centroid(&self) -> Vector2 {
        Vector2::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn contains(&self, point: Vector2) -> bool {
        FPA(point.x) >= FPA(self.x_min)
            && FPA(point.x) <= FPA(self.x_max)
            && FPA(point.y) >= FPA(self.y_min)
            && FPA(point.y) <= FPA(self.y_max)
    }
}

impl Intersects<AaRect> for AaRect {
    #[inline(always)]
    fn intersects(&self, other: &AaRect) -> bool {
        f32::max(self.x_min, other.x_min) <= f32::min(self.x_max, other.x_max)
            && f32::max(self.y_min, other.y_min) <= f32::min(self.y_max, other.y_max)
    }
}
