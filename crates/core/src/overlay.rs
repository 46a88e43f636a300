//! Turns a [Path] into per-tile markers that a renderer can draw on top of
//! the grid. This module doesn't draw anything itself; it only decides which
//! marker goes on which tile and which way it points.

use crate::{
    hex::{HasHexPosition, HexCoord, HexCoordIndexMap, Heading},
    path::Path,
    util::{self, Color3},
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The different markers that can be drawn on a tile along a path
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OverlayKind {
    /// The tile the path leaves from
    Start,
    /// The tile the path ends on
    Terminus,
    /// An interior tile where the path carries on without turning
    Straight,
    /// An interior tile where the path veers to a new heading
    Turn,
}

/// A marker for a single tile along a path. The serialized form includes
/// the sprite rotation in degrees, so renderers don't have to derive it from
/// the orientation. It's ignored on deserialization and recomputed instead.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "OverlayFields")]
pub struct Overlay {
    position: HexCoord,
    kind: OverlayKind,
    /// The way the marker points
    orientation: Heading,
    /// Always the orientation's degrees
    rotation: f64,
    tint: Color3,
}

/// Everything needed to rebuild an [Overlay], minus the derived rotation
#[derive(Deserialize)]
struct OverlayFields {
    position: HexCoord,
    kind: OverlayKind,
    orientation: Heading,
    tint: Color3,
}

impl From<OverlayFields> for Overlay {
    fn from(fields: OverlayFields) -> Self {
        Self::new(
            fields.position,
            fields.kind,
            fields.orientation,
            fields.tint,
        )
    }
}

impl Overlay {
    pub fn new(
        position: HexCoord,
        kind: OverlayKind,
        orientation: Heading,
        tint: Color3,
    ) -> Self {
        Self {
            position,
            kind,
            orientation,
            rotation: orientation.degrees(),
            tint,
        }
    }

    pub fn kind(&self) -> OverlayKind {
        self.kind
    }

    pub fn orientation(&self) -> Heading {
        self.orientation
    }

    pub fn tint(&self) -> Color3 {
        self.tint
    }

    /// How far to rotate the marker's sprite, in degrees clockwise from North
    pub fn rotation(&self) -> f64 {
        self.rotation
    }
}

impl HasHexPosition for Overlay {
    fn position(&self) -> HexCoord {
        self.position
    }
}

/// All the markers for a path, keyed by tile. Iteration follows the path,
/// from start to finish.
///
/// Serializes as a flat list of overlays, since tile coordinates don't make
/// good map keys in most formats.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverlayMap {
    #[serde(with = "util::serde_hex_coord_map_to_vec")]
    overlays: HexCoordIndexMap<Overlay>,
}

impl OverlayMap {
    /// Get the overlay for a tile, if the path touches it
    pub fn get(&self, coord: HexCoord) -> Option<&Overlay> {
        self.overlays.get(&coord)
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Iterate over all overlays, in path order
    pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.values()
    }

    /// Serializes this overlay map into JSON, as a list of overlays
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> String {
        // Panic here indicates an internal bug in the data format
        serde_json::to_string(self).expect("error serializing overlays")
    }

    fn insert(&mut self, overlay: Overlay) {
        self.overlays.insert(overlay.position(), overlay);
    }
}

impl Path {
    /// Build a marker for every tile along this path, all with the same tint.
    /// The first tile gets a [OverlayKind::Start] and the last a
    /// [OverlayKind::Terminus], each pointing along the step that leaves or
    /// enters it. Interior tiles get [OverlayKind::Straight] or
    /// [OverlayKind::Turn] depending on whether the heading changes there.
    ///
    /// An empty path produces an empty map. If the path passes through a tile
    /// more than once, the tile keeps its first place in iteration order but
    /// gets the marker from its last visit, so the map can have fewer entries
    /// than the path has waypoints.
    pub fn to_overlays(&self, tint: Color3) -> OverlayMap {
        let mut overlays = OverlayMap::default();
        let steps = self.steps();
        let (first, last) = match (steps.first(), steps.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return overlays,
        };

        overlays.insert(Overlay::new(
            first.start,
            OverlayKind::Start,
            first.heading,
            tint,
        ));

        // Each interior tile is where one step finishes and the next starts
        for pair in steps.windows(2) {
            let incoming = pair[0].heading;
            let outgoing = pair[1].heading;
            let (kind, orientation) = if incoming == outgoing {
                (OverlayKind::Straight, incoming)
            } else {
                (OverlayKind::Turn, turn_orientation(incoming, outgoing))
            };
            overlays.insert(Overlay::new(
                pair[0].finish,
                kind,
                orientation,
                tint,
            ));
        }

        overlays.insert(Overlay::new(
            last.finish,
            OverlayKind::Terminus,
            last.heading,
            tint,
        ));
        overlays
    }
}

/// Which way a turn marker should point. Turn sprites are drawn as a curve
/// from the incoming heading, so they're rotated one notch in the direction
/// of the turn. Turns sharper than one notch can't come out of the
/// pathfinder with the default turn limit; for those we just point along the
/// incoming heading.
fn turn_orientation(incoming: Heading, outgoing: Heading) -> Heading {
    let delta = incoming.signed_angle_to(outgoing);
    if delta == 60.0 {
        incoming.rotate_clockwise()
    } else if delta == -60.0 {
        incoming.rotate_counterclockwise()
    } else {
        incoming
    }
}
