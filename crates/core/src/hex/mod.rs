//! This module holds basic types and data structures related to hexagon grids.
//!
//! ## Coordinate Systems
//!
//! Tack uses two different coordinate systems:
//!
//! ### Hex Coordinates
//!
//! Hex coordinates define space within the tile grid. The system we use is the
//! [cube coordinate system defined by Amit Patel](https://www.redblobgames.com/grids/hexagons/#coordinates-cube).
//!
//! Each coordinate has three components (`x`, `y`, and `z`). **For any tile
//! coordinate, all three components will be integers and `x + y + z = 0`.**
//! Even though the grid is two dimensional, three components make the math
//! around hexagonal grids much simpler: moving to a neighbor always changes
//! exactly two components by one, in opposite directions, and leaves the third
//! alone.
//!
//! Tiles are **flat topped**, so the six neighbors of a tile sit at the
//! compass headings North, NorthEast, SouthEast, South, SouthWest and
//! NorthWest. See [Heading].
//!
//! ### Screen Coordinates
//!
//! Screen coordinates are used strictly for rendering the grid into some
//! visual output. They depict the grid from the top down. In the following
//! diagram, `o` (the origin) represents the tile `(0, 0, 0)`.
//!
//! ```text
//! +-------------------+
//! |        -y         |
//! |       North       |
//! |         ^         |
//! | -x <----o----> +x |
//! |         v         |
//! |       South       |
//! |        +y         |
//! +-------------------+
//! ```
//!
//! Use [HexCoord::to_cartesian] to convert a tile to screen space, and
//! [HexCoord::from_cartesian] to go the other way (e.g. to find which tile is
//! under the cursor).

mod data_structure;
mod heading;
mod unit;

pub use self::{data_structure::*, heading::*, unit::*};
