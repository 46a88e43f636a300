use serde::{Deserialize, Serialize};
use validator::Validate;

/// Top-level configuration for path planning. This is split into the
/// description of the grid being navigated and the rules of the search itself.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PlannerConfig {
    /// Config for the grid that agents navigate
    #[validate]
    pub grid: GridConfig,

    /// Config for the path search
    #[validate]
    pub search: SearchConfig,
}

/// Configuration that defines the shape and scale of a hex grid.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GridConfig {
    /// Distance from the center of the grid to the edge (in tiles). 0 means
    /// the grid is a single tile.
    #[validate(range(min = 0, max = 10000))]
    pub radius: u16,

    /// Distance between the center of a tile and any of its vertices, in
    /// screen space. This only matters when projecting tiles onto the 2D
    /// plane; it has no bearing on the search.
    #[validate(range(min = 0.001))]
    pub tile_size: f64,
}

/// Configuration for the turn-constrained path search. These rules model a
/// vehicle with a minimum turning radius.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SearchConfig {
    /// Every move's heading must differ from the previous move's heading by
    /// **strictly less** than this many degrees. The default of 90 allows
    /// veering 60 degrees per move but never anything sharper. Headings are
    /// 60 degrees apart, so anything at or below 60 forbids turning entirely
    /// and anything above 180 would be meaningless.
    #[validate(range(min = 0.0, max = 180.0))]
    pub turn_limit: f64,

    /// Can the agent turn before its first move? If false (the default), the
    /// first move must be in exactly the direction the agent is facing. If
    /// true, the first move follows the same turning rule as every other move.
    pub allow_initial_turn: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            radius: 5,
            tile_size: 1.0,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            turn_limit: 90.0,
            allow_initial_turn: false,
        }
    }
}
