//! Facing directions for agents in the hex world.

use crate::hex::{HexCoord, HexError, HexVector};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A linear direction in a hex world. This trait captures what every class of
/// direction has in common: a fixed clockwise ordering around the compass, and
/// a vector that each direction maps to.
pub trait HexDirection: 'static + Copy + Eq + Sized {
    /// A list of all directions in an implementation's class, in clockwise
    /// order around the compass, starting at North.
    const CLOCKWISE: &'static [Self];

    /// Get the index of the given direction within the clockwise ordering of
    /// this class
    fn clockwise_index(self) -> usize {
        // Every direction in a class is in its CLOCKWISE list
        Self::CLOCKWISE
            .iter()
            .position(|dir| self == *dir)
            .unwrap_or_default()
    }

    /// Get the direction `steps` notches clockwise from this one. Negative
    /// values rotate counterclockwise.
    fn rotate(self, steps: isize) -> Self {
        let len = Self::CLOCKWISE.len() as isize;
        let index = (self.clockwise_index() as isize + steps).rem_euclid(len);
        Self::CLOCKWISE[index as usize]
    }

    /// Get the direction that is directly opposite this one. Each direction
    /// in the class **must have its opposite present in the same class**.
    fn opposite(self) -> Self {
        self.rotate(Self::CLOCKWISE.len() as isize / 2)
    }

    /// Convert this direction into a vector in the hex coordinate system.
    fn to_vector(self) -> HexVector;
}

/// The six directions an agent can face, each pointing at the center of one
/// neighboring tile. Tiles are flat-topped, so North and South point through
/// the middle of the top and bottom sides. Adjacent headings are 60 degrees
/// apart, measured clockwise from North.
///
/// Iteration order (via [strum::IntoEnumIterator]) is the same as
/// [HexDirection::CLOCKWISE].
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Heading {
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
}

impl HexDirection for Heading {
    const CLOCKWISE: &'static [Self] = &[
        Self::North,
        Self::NorthEast,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::NorthWest,
    ];

    /// Get the vector offset that moves a tile one step in this direction
    fn to_vector(self) -> HexVector {
        match self {
            Self::North => HexVector::new_xy(0, 1),
            Self::NorthEast => HexVector::new_xy(1, 0),
            Self::SouthEast => HexVector::new_xy(1, -1),
            Self::South => HexVector::new_xy(0, -1),
            Self::SouthWest => HexVector::new_xy(-1, 0),
            Self::NorthWest => HexVector::new_xy(-1, 1),
        }
    }
}

impl Heading {
    /// Compass bearing of this heading, clockwise from North
    pub fn degrees(self) -> f64 {
        match self {
            Self::North => 0.0,
            Self::NorthEast => 60.0,
            Self::SouthEast => 120.0,
            Self::South => 180.0,
            Self::SouthWest => 240.0,
            Self::NorthWest => 300.0,
        }
    }

    /// The smallest angle between this heading and another, in degrees.
    /// Always in `[0, 180]`, and symmetric.
    pub fn angle_to(self, other: Heading) -> f64 {
        self.signed_angle_to(other).abs()
    }

    /// The rotation needed to turn from this heading to another, in degrees.
    /// Positive is clockwise. Always in `(-180, 180]`, so turning to the
    /// opposite heading is `180`.
    pub fn signed_angle_to(self, other: Heading) -> f64 {
        let diff = (other.degrees() - self.degrees()).rem_euclid(360.0);
        if diff > 180.0 {
            diff - 360.0
        } else {
            diff
        }
    }

    /// The heading one notch (60 degrees) clockwise from this one
    pub fn rotate_clockwise(self) -> Self {
        self.rotate(1)
    }

    /// The heading one notch (60 degrees) counterclockwise from this one
    pub fn rotate_counterclockwise(self) -> Self {
        self.rotate(-1)
    }

    /// Get the heading of a single move from one tile to an adjacent one. We
    /// find it by checking which cube axis stays fixed during the move, then
    /// which way the other two change. Returns
    /// [HexError::NonAdjacentCoordinates] if the two tiles aren't neighbors,
    /// including if they're the same tile.
    pub fn between(from: HexCoord, to: HexCoord) -> anyhow::Result<Self> {
        if from.distance_to(to) != 1 {
            return Err(HexError::NonAdjacentCoordinates { from, to }.into());
        }

        let heading = if from.x() == to.x() {
            if to.z() < from.z() {
                Self::North
            } else {
                Self::South
            }
        } else if from.y() == to.y() {
            if to.z() < from.z() {
                Self::NorthEast
            } else {
                Self::SouthWest
            }
        } else if to.x() < from.x() {
            // z is the fixed axis
            Self::NorthWest
        } else {
            Self::SouthEast
        };
        Ok(heading)
    }
}
