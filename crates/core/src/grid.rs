//! The boundary between the pathfinder and whatever owns the map. The
//! pathfinder never looks at tiles directly; it only asks a [NavigableGrid]
//! where it's allowed to go next.

use crate::{
    config::GridConfig,
    hex::{HexCoord, HexCoordSet},
    util,
};
use anyhow::Context;
use std::cmp;
use validator::Validate;

/// Anything that can tell the pathfinder which tiles an agent may move into.
pub trait NavigableGrid {
    /// Get every tile adjacent to `coord` that is in bounds and not in
    /// `blocked`. Every returned coordinate **must** be a neighbor of `coord`.
    /// Order is free, but it should be stable across calls.
    fn navigable_neighbors(
        &self,
        coord: HexCoord,
        blocked: &HexCoordSet,
    ) -> Vec<HexCoord>;
}

/// A hexagonal grid of tiles centered on the origin, in a super hexagon
/// pattern (the tiles make up the shape of a larger hexagon). For a grid of
/// radius `r`, the furthest tiles are all `r` steps from the center.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridBounds {
    /// Distance from the center of the grid to the edge. 0 means the grid is
    /// exactly 1 tile. 1 means 7 tiles, and so on.
    radius: u16,
}

impl GridBounds {
    pub const fn new(radius: u16) -> Self {
        Self { radius }
    }

    /// Create a grid from config. Returns an error if the config is invalid.
    pub fn from_config(config: &GridConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid grid config")?;
        Ok(Self::new(config.radius))
    }

    pub fn radius(&self) -> u16 {
        self.radius
    }

    /// Is the given tile inside this grid?
    pub fn contains(&self, coord: HexCoord) -> bool {
        coord.abs_max_component() <= i32::from(self.radius)
    }

    /// The number of tiles in this grid
    pub fn len(&self) -> usize {
        util::grid_len(self.radius)
    }

    /// A grid always has at least one tile
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over every tile in the grid
    pub fn coords(&self) -> impl Iterator<Item = HexCoord> {
        let r = i32::from(self.radius);
        (-r..=r).flat_map(move |x| {
            // If we just do [-r,r] for y as well, then we end up with a
            // diamond pattern instead of a super hexagon
            // https://www.redblobgames.com/grids/hexagons/#range
            let y_min = cmp::max(-r, -x - r);
            let y_max = cmp::min(r, -x + r);
            (y_min..=y_max).map(move |y| HexCoord::new_xy(x, y))
        })
    }
}

impl NavigableGrid for GridBounds {
    fn navigable_neighbors(
        &self,
        coord: HexCoord,
        blocked: &HexCoordSet,
    ) -> Vec<HexCoord> {
        coord
            .neighbors()
            .filter(|neighbor| {
                self.contains(*neighbor) && !blocked.contains(neighbor)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::Heading;
    use validator::ValidationErrors;

    #[test]
    fn test_len() {
        for radius in 0..6 {
            let grid = GridBounds::new(radius);
            assert_eq!(grid.coords().count(), grid.len());
            assert!(grid.coords().all(|coord| grid.contains(coord)));
        }
        assert_eq!(GridBounds::new(5).len(), 91);
    }

    #[test]
    fn test_contains() {
        let grid = GridBounds::new(2);
        assert!(grid.contains(HexCoord::ORIGIN));
        assert!(grid.contains(HexCoord::new_xy(2, -2)));
        assert!(grid.contains(HexCoord::new_xy(-1, -1)));
        assert!(!grid.contains(HexCoord::new_xy(2, 1)));
        assert!(!grid.contains(HexCoord::new_xy(-3, 0)));
    }

    #[test]
    fn test_navigable_neighbors() {
        let grid = GridBounds::new(1);
        let mut blocked = HexCoordSet::default();

        // Center tile can go anywhere
        assert_eq!(
            grid.navigable_neighbors(HexCoord::ORIGIN, &blocked).len(),
            6
        );

        // Edge tile can only go to the center and its two edge neighbors
        let north = HexCoord::ORIGIN.neighbor(Heading::North);
        let neighbors = grid.navigable_neighbors(north, &blocked);
        assert_eq!(neighbors.len(), 3);
        assert!(neighbors.contains(&HexCoord::ORIGIN));

        blocked.insert(HexCoord::ORIGIN);
        let neighbors = grid.navigable_neighbors(north, &blocked);
        assert_eq!(
            neighbors,
            vec![
                HexCoord::ORIGIN.neighbor(Heading::NorthEast),
                HexCoord::ORIGIN.neighbor(Heading::NorthWest)
            ]
        );
    }

    #[test]
    fn test_from_config() {
        let grid = GridBounds::from_config(&GridConfig {
            radius: 3,
            tile_size: 2.0,
        })
        .unwrap();
        assert_eq!(grid.radius(), 3);

        let err = GridBounds::from_config(&GridConfig {
            radius: 3,
            tile_size: 0.0,
        })
        .unwrap_err();
        let validation_errors = err.downcast::<ValidationErrors>().unwrap();
        assert!(validation_errors.errors().contains_key("tile_size"));
    }
}
