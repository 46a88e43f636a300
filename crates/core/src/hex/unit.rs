//! This sub-module contains the basic units of the hex coordinate system:
//! tile coordinates, vectors between them, and the 2D points they project to.
//! See the parent module documentation for more info on the coordinate system.

use crate::hex::{HexDirection, Heading};
use anyhow::anyhow;
use derive_more::{Add, AddAssign, Display, Mul, Sub};
use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};
use std::{error::Error, f64::consts::PI, fmt, str::FromStr};

/// √3, which shows up in every conversion between hex and 2D space
const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Internal-consistency failures in the hex coordinate system. These always
/// indicate a bug in whatever produced the coordinates (a caller, a grid
/// implementation, etc.), never a recoverable runtime state. They are
/// returned wrapped in an [anyhow::Error], so use
/// [downcast_ref](anyhow::Error::downcast_ref) to match on them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HexError {
    /// Tried to build a coordinate that isn't on the plane `x + y + z = 0`
    InvalidCoordinate { x: i32, y: i32, z: i32 },
    /// Tried to derive a heading between two coordinates that aren't
    /// neighbors (or are the same tile)
    NonAdjacentCoordinates { from: HexCoord, to: HexCoord },
}

impl fmt::Display for HexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinate { x, y, z } => write!(
                f,
                "Invalid hex coordinate ({}, {}, {}); must be on the plane \
                x+y+z=0",
                x, y, z
            ),
            Self::NonAdjacentCoordinates { from, to } if from == to => write!(
                f,
                "Cannot find the heading between {} and itself",
                from
            ),
            Self::NonAdjacentCoordinates { from, to } => write!(
                f,
                "Cannot find the heading between non-adjacent coordinates \
                {} and {}",
                from, to
            ),
        }
    }
}

impl Error for HexError {}

/// A tile in the hex world, addressed by its cube coordinates. See this page
/// for info on how the cube coordinate system works:
/// https://www.redblobgames.com/grids/hexagons/#coordinates-cube
///
/// **In this page's vernacular, we use "flat topped" tiles.**
///
/// Since `x + y + z = 0` for every tile, this struct only stores `x` and `y`
/// and derives `z` as needed. That makes it impossible to hold an invalid
/// coordinate: every constructor that accepts all three components validates
/// them, and every other constructor derives the third one.
///
/// ## Serialization
/// Coordinates are (de)serialized as all three components, `{x, y, z}`.
/// Deserialization rejects any input that's off the plane.
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
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {}, {})", "self.x()", "self.y()", "self.z()")]
#[serde(try_from = "UncheckedHexCoord", into = "UncheckedHexCoord")]
pub struct HexCoord {
    x: i32,
    y: i32,
}

impl HexCoord {
    pub const ORIGIN: Self = Self::new_xy(0, 0);

    /// Construct a new coordinate from all three components. Returns
    /// [HexError::InvalidCoordinate] if they don't sum to zero.
    pub fn new(x: i32, y: i32, z: i32) -> anyhow::Result<Self> {
        // Sum wide so that huge off-plane inputs can't wrap around to zero
        if i64::from(x) + i64::from(y) + i64::from(z) != 0 {
            Err(HexError::InvalidCoordinate { x, y, z }.into())
        } else {
            Ok(Self::new_xy(x, y))
        }
    }

    /// Construct a new coordinate with the given x and y. Since x+y+z=0 for
    /// all tiles, we can derive z from x & y.
    pub const fn new_xy(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Construct a new coordinate with the given x and z. Since x+y+z=0 for
    /// all tiles, we can derive y from x & z.
    pub const fn new_xz(x: i32, z: i32) -> Self {
        Self::new_xy(x, -x - z)
    }

    /// Construct a new coordinate with the given y and z. Since x+y+z=0 for
    /// all tiles, we can derive x from y & z.
    pub const fn new_yz(y: i32, z: i32) -> Self {
        Self::new_xy(-y - z, y)
    }

    pub fn x(self) -> i32 {
        self.x
    }

    pub fn y(self) -> i32 {
        self.y
    }

    pub fn z(self) -> i32 {
        -(self.x + self.y)
    }

    /// Get the coordinate of the tile one step away in the given direction
    pub fn neighbor(self, heading: Heading) -> Self {
        self + heading.to_vector()
    }

    /// Get an iterator of all the tiles directly adjacent to this one. The
    /// iterator will always contain exactly 6 values, in the same order as
    /// [Heading::CLOCKWISE].
    pub fn neighbors(self) -> impl Iterator<Item = HexCoord> {
        Heading::CLOCKWISE.iter().map(move |&dir| self.neighbor(dir))
    }

    /// Calculate the path distance between two tiles, meaning the number of
    /// hops it takes to get from one to the other. 0 if the tiles are equal,
    /// 1 if they're adjacent, 2 if there is 1 tile between them, etc.
    pub fn distance_to(self, other: HexCoord) -> usize {
        // https://www.redblobgames.com/grids/hexagons/#distances
        ((self.x() - other.x()).abs()
            + (self.y() - other.y()).abs()
            + (self.z() - other.z()).abs()) as usize
            // Two adjacent tile centers are always separated by two cube edges
            / 2
    }

    /// The largest absolute value among the three components, which is also
    /// this tile's distance from the origin. Used for bounds checks.
    pub fn abs_max_component(self) -> i32 {
        self.x().abs().max(self.y().abs()).max(self.z().abs())
    }

    /// Project this tile's center onto the 2D plane, for rendering. Tiles are
    /// flat-topped, and `tile_size` is the distance from a tile's center to
    /// any of its vertices.
    ///
    /// https://www.redblobgames.com/grids/hexagons/#hex-to-pixel
    pub fn to_cartesian(self, tile_size: f64) -> Point2 {
        let basis = Matrix2::new(1.5, 0.0, SQRT_3 / 2.0, SQRT_3);
        let cube = Vector2::new(f64::from(self.x()), f64::from(self.z()));
        nalgebra::Point2::from(basis * cube * tile_size).into()
    }

    /// Find the tile that contains a point on the 2D plane. This is the
    /// inverse of [Self::to_cartesian], so it's what you need to convert a
    /// cursor position into a tile.
    ///
    /// https://www.redblobgames.com/grids/hexagons/#pixel-to-hex
    pub fn from_cartesian(point: Point2, tile_size: f64) -> Self {
        let inverse =
            Matrix2::new(2.0 / 3.0, 0.0, -1.0 / 3.0, SQRT_3 / 3.0);
        let cube = inverse * Vector2::new(point.x, point.y) / tile_size;
        Self::round(cube.x, -cube.x - cube.y, cube.y)
    }

    /// Get the six vertices of this tile's hexagon on the 2D plane. Vertex
    /// `i` is at `60 * i` degrees from the center, so the first vertex is
    /// directly to the right of the center.
    pub fn corners(self, tile_size: f64) -> [Point2; 6] {
        let center = self.to_cartesian(tile_size);
        let mut corners = [center; 6];
        for (i, corner) in corners.iter_mut().enumerate() {
            let angle = PI / 3.0 * i as f64;
            corner.x += tile_size * angle.cos();
            corner.y += tile_size * angle.sin();
        }
        corners
    }

    /// Round fractional cube components to the nearest tile. Rounding each
    /// component on its own can leave us off the plane, so the component
    /// that moved the most gets recomputed from the other two.
    ///
    /// https://www.redblobgames.com/grids/hexagons/#rounding
    fn round(x: f64, y: f64, z: f64) -> Self {
        let (mut rx, mut ry, rz) = (x.round(), y.round(), z.round());
        let x_diff = (rx - x).abs();
        let y_diff = (ry - y).abs();
        let z_diff = (rz - z).abs();

        if x_diff > y_diff && x_diff > z_diff {
            rx = -ry - rz;
        } else if y_diff > z_diff {
            ry = -rx - rz;
        }
        // In the last case z is the one to fix, but it's derived anyway
        Self::new_xy(rx as i32, ry as i32)
    }
}

impl std::ops::Add<HexVector> for HexCoord {
    type Output = HexCoord;

    fn add(self, rhs: HexVector) -> Self::Output {
        // Vectors are always on the plane too, so the sum is as well
        Self::new_xy(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Parse a coordinate from `x,y,z`, optionally wrapped in parentheses (so the
/// [Display] output of a coordinate can be parsed back in).
impl FromStr for HexCoord {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let components = trimmed
            .split(',')
            .map(|component| component.trim().parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| anyhow!("Invalid hex coordinate {:?}: {}", s, err))?;
        match components.as_slice() {
            &[x, y, z] => Self::new(x, y, z),
            _ => Err(anyhow!(
                "Invalid hex coordinate {:?}; expected 3 components, got {}",
                s,
                components.len()
            )),
        }
    }
}

/// An unvalidated version of [HexCoord]. An instance of this struct could
/// represent a point that isn't on the plane `x + y + z = 0`. It only exists
/// as the serialized form of [HexCoord]; the `TryFrom` impl converts it back
/// to a validated coordinate.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
struct UncheckedHexCoord {
    x: i32,
    y: i32,
    z: i32,
}

impl TryFrom<UncheckedHexCoord> for HexCoord {
    type Error = anyhow::Error;

    fn try_from(value: UncheckedHexCoord) -> Result<Self, Self::Error> {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<HexCoord> for UncheckedHexCoord {
    fn from(other: HexCoord) -> Self {
        Self {
            x: other.x(),
            y: other.y(),
            z: other.z(),
        }
    }
}

/// A vector in the hex world. This is an `(x, y, z)` kind of vector, not a
/// list vector. A vector represents some positional translation within the hex
/// coordinate system. Like [HexCoord], `z` is derived from the other two, so
/// every vector keeps a translated coordinate on the plane.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, Add, Sub, AddAssign)]
#[display(fmt = "({}, {}, {})", "self.x", "self.y", "self.z()")]
pub struct HexVector {
    x: i32,
    y: i32,
}

impl HexVector {
    pub const ZERO: Self = Self::new_xy(0, 0);

    pub const fn new_xy(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> i32 {
        self.x
    }

    pub fn y(self) -> i32 {
        self.y
    }

    pub fn z(self) -> i32 {
        -(self.x + self.y)
    }
}

/// A 2D point on the rendering plane. `+x` is to the right of the origin
/// tile, `+y` is towards [Heading::South].
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    Add,
    Sub,
    Mul,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", "self.x", "self.y")]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<nalgebra::Point2<f64>> for Point2 {
    fn from(other: nalgebra::Point2<f64>) -> Self {
        Self {
            x: other.x,
            y: other.y,
        }
    }
}
