use std::cmp::Ordering;
use std::fmt::{Debug, Display};

use float_cmp::F32Margin;

use crate::util::tolerance::BOUNDARY_EPSILON;

///Wrapper around the [`float_cmp::approx_eq!()`] macro for easy comparison of floats with a certain tolerance.
///Two FPAs are considered equal if they are within [`BOUNDARY_EPSILON`] (or a few ulps) of each other.
#[derive(Debug, Clone, Copy)]
pub struct FPA(pub f32);

impl FPA {
    pub const MARGIN: F32Margin = F32Margin {
        epsilon: BOUNDARY_EPSILON,
        ulps: 4,
    };
}

impl<T> From<T> for FPA
where
    T: Into<f32>,
{
    fn from(n: T) -> Self {
        FPA(n.into())
    }
}

impl PartialEq<Self> for FPA {
    fn eq(&self, other: &Self) -> bool {
        float_cmp::approx_eq!(f32, self.0, other.0, FPA::MARGIN)
    }
}

impl PartialOrd<Self> for FPA {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.eq(other) {
            true => Some(Ordering::Equal),
            false => self.0.partial_cmp(&other.0),
        }
    }
}

impl Display for FPA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
