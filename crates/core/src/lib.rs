//! Tack is a path planner for agents on a hex grid that can't turn on the
//! spot. Think of a boat or a car: every move has to roughly follow the
//! previous one, so getting somewhere behind you means swinging around in an
//! arc. This crate contains the coordinate system, the search, and the
//! mapping from paths to renderable tile markers. Drawing those markers is
//! left to whatever consumes this crate.
//!
//! ```
//! use tack::{GridBounds, HexCoord, HexCoordSet, Heading, Pathfinder};
//!
//! let grid = GridBounds::new(5);
//! let pathfinder = Pathfinder::new(
//!     HexCoord::ORIGIN,
//!     Heading::South,
//!     &grid,
//!     &HexCoordSet::default(),
//! )
//! .unwrap();
//! let path = pathfinder.to_coord(HexCoord::new_xy(0, 1)).unwrap();
//! println!("{}", path);
//! ```
//!
//! See [SearchConfig] for details on how the turning rules can be customized.

mod config;
mod grid;
mod hex;
mod overlay;
mod path;
mod util;

pub use crate::{
    config::{GridConfig, PlannerConfig, SearchConfig},
    grid::{GridBounds, NavigableGrid},
    hex::{
        HasHexPosition, Heading, HexCoord, HexCoordIndexMap, HexCoordMap,
        HexCoordSet, HexDirection, HexError, HexVector, Point2,
    },
    overlay::{Overlay, OverlayKind, OverlayMap},
    path::{Path, Pathfinder, Step},
    util::{grid_len, Color3},
};
