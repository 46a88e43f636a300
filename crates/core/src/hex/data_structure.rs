use crate::hex::HexCoord;
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// A set of hex coordinates
pub type HexCoordSet = HashSet<HexCoord, FnvBuildHasher>;
/// A map of hex coordinates to some `T`
pub type HexCoordMap<T> = HashMap<HexCoord, T, FnvBuildHasher>;
/// An ORDERED map of hex coordinates to some `T`. This has some extra memory
/// overhead, so we should only use it when we actually need the ordering.
pub type HexCoordIndexMap<T> = IndexMap<HexCoord, T, FnvBuildHasher>;

/// A trait that denotes any data type that has a singular assigned position in
/// the hex world.
pub trait HasHexPosition: Sized {
    fn position(&self) -> HexCoord;
}
