use strum::VariantArray;

use crate::location::{Coord, Location};

/// An axis of the grid.
///
/// A line move shares one axis with the empty slot and shifts tiles along the
/// perpendicular one. Move dispatch tries axes in declaration order, so the x
/// axis is considered before the y axis.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug)]
pub enum Axis {
    /// The horizontal axis; coordinate `.0` of a [`Location`].
    X,
    /// The vertical axis; coordinate `.1` of a [`Location`].
    Y,
}

impl Axis {
    /// Project `location` onto this axis.
    pub fn coord_of(&self, location: Location) -> Coord {
        match self {
            Self::X => location.0,
            Self::Y => location.1,
        }
    }

    /// The other axis.
    pub fn perpendicular(&self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}
