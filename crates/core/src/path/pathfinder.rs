use crate::{
    config::SearchConfig,
    grid::NavigableGrid,
    hex::{HexCoord, HexCoordSet, Heading},
    path::{Path, Step},
    timed,
};
use anyhow::Context;
use fnv::FnvBuildHasher;
use log::{debug, trace};
use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap, HashSet},
};
use strum::IntoEnumIterator;
use validator::Validate;

/// A vertex in the search graph: an agent standing on a tile, facing a
/// particular way. Two agents on the same tile facing different ways are in
/// different states, because they have different moves available.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Node {
    coord: HexCoord,
    heading: Heading,
}

/// Number of moves between two nodes. Every move costs the same.
type Distance = usize;

type NodeMap<T> = HashMap<Node, T, FnvBuildHasher>;
type NodeSet = HashSet<Node, FnvBuildHasher>;

/// Finds shortest paths for an agent that can't turn on the spot. The agent
/// starts on a tile facing some heading, and each move's heading can only
/// differ a little from the previous one (see [SearchConfig::turn_limit]), so
/// getting to a tile behind the agent means sweeping around in an arc.
///
/// A pathfinder explores every reachable state up front, when it's created.
/// After that, [Self::to_coord] can be called for any number of targets
/// without searching again. Pathfinders are cheap for small grids, and are
/// meant to be created for a single decision and thrown away: if the agent
/// moves or the blocked tiles change, create a new one.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    origin: HexCoord,
    heading: Heading,
    /// Shortest known distance from the origin to every reachable node
    distances: NodeMap<Distance>,
    /// For every reachable node other than the origin, the node we reach it
    /// from along its shortest path
    predecessors: NodeMap<Node>,
}

impl Pathfinder {
    /// Explore all paths from the given origin with the default
    /// [SearchConfig]. See [Self::with_config].
    pub fn new(
        origin: HexCoord,
        heading: Heading,
        grid: &impl NavigableGrid,
        blocked: &HexCoordSet,
    ) -> anyhow::Result<Self> {
        Self::with_config(
            &SearchConfig::default(),
            origin,
            heading,
            grid,
            blocked,
        )
    }

    /// Explore all paths from an agent at `origin` facing `heading`. The agent
    /// can't enter any tile in `blocked`, and can only go where `grid` says is
    /// navigable.
    ///
    /// Returns an error if the config is invalid, or if the grid reports a
    /// neighbor that isn't actually adjacent. The latter is a bug in the grid,
    /// so we'd rather fail loudly than hand back a bogus (or missing) path.
    pub fn with_config(
        config: &SearchConfig,
        origin: HexCoord,
        heading: Heading,
        grid: &impl NavigableGrid,
        blocked: &HexCoordSet,
    ) -> anyhow::Result<Self> {
        config.validate().context("invalid search config")?;

        let seed = Node {
            coord: origin,
            heading,
        };
        let (distances, predecessors) =
            timed!("Path search", Self::search(config, seed, grid, blocked))
                .with_context(|| {
                    format!(
                        "error searching for paths from {} facing {}",
                        origin, heading
                    )
                })?;

        let pathfinder = Self {
            origin,
            heading,
            distances,
            predecessors,
        };
        debug!(
            "Explored {} states from {} facing {}; {} tiles reachable",
            pathfinder.explored_states(),
            origin,
            heading,
            pathfinder.reachable().len()
        );
        Ok(pathfinder)
    }

    /// Dijkstra's algorithm over (tile, heading) states. Every move costs 1,
    /// and we run until the frontier is empty so that every reachable state
    /// gets a distance.
    fn search(
        config: &SearchConfig,
        seed: Node,
        grid: &impl NavigableGrid,
        blocked: &HexCoordSet,
    ) -> anyhow::Result<(NodeMap<Distance>, NodeMap<Node>)> {
        let mut distances = NodeMap::default();
        let mut predecessors = NodeMap::default();
        let mut visited = NodeSet::default();
        // BinaryHeap is a max-heap, so reverse the ordering to pop the nearest
        // node first. Ties fall back to the node ordering, which is arbitrary
        // but at least deterministic.
        let mut frontier = BinaryHeap::new();

        distances.insert(seed, 0);
        frontier.push(Reverse((0, seed)));

        while let Some(Reverse((distance, current))) = frontier.pop() {
            // A node can be queued multiple times if its distance improved
            // after it was first queued. The first pop is the shortest, so
            // everything after that is stale.
            if !visited.insert(current) {
                continue;
            }

            for coord in grid.navigable_neighbors(current.coord, blocked) {
                let heading = Heading::between(current.coord, coord)
                    .with_context(|| {
                        format!(
                            "grid reported {} as a neighbor of {}",
                            coord, current.coord
                        )
                    })?;
                let successor = Node { coord, heading };
                if visited.contains(&successor)
                    || !Self::is_valid_move(config, seed, current, successor)
                {
                    continue;
                }

                let tentative = distance + 1;
                let improved = distances
                    .get(&successor)
                    .map_or(true, |&known| tentative < known);
                if improved {
                    trace!(
                        "{:?} reachable in {} via {:?}",
                        successor,
                        tentative,
                        current
                    );
                    distances.insert(successor, tentative);
                    predecessors.insert(successor, current);
                    frontier.push(Reverse((tentative, successor)));
                }
            }
        }

        Ok((distances, predecessors))
    }

    /// Can the agent move from one state to the next without turning too
    /// sharply? On the very first move it can't turn at all (unless the
    /// config allows it), it has to move straight ahead.
    fn is_valid_move(
        config: &SearchConfig,
        seed: Node,
        current: Node,
        successor: Node,
    ) -> bool {
        if current == seed && !config.allow_initial_turn {
            successor.heading == seed.heading
        } else {
            current.heading.angle_to(successor.heading) < config.turn_limit
        }
    }

    /// The tile the agent starts on
    pub fn origin(&self) -> HexCoord {
        self.origin
    }

    /// The direction the agent faces before its first move
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Get the shortest path to the given tile, or `None` if it can't be
    /// reached. If the target is the origin, the path is empty.
    ///
    /// The agent may be able to arrive at the target facing several different
    /// ways. We pick whichever arrival is quickest. If several are equally
    /// quick, which one wins is unspecified; the only guarantee is that no
    /// shorter path exists.
    pub fn to_coord(&self, target: HexCoord) -> Option<Path> {
        let (node, _) = self.best_arrival(target)?;
        Some(self.reconstruct(node))
    }

    /// Get the number of moves in the shortest path to the given tile, or
    /// `None` if it can't be reached. Same as the length of
    /// [Self::to_coord], but without building the path.
    pub fn distance_to(&self, target: HexCoord) -> Option<usize> {
        self.best_arrival(target).map(|(_, distance)| distance)
    }

    /// Every tile that the agent can reach, including the one it's on
    pub fn reachable(&self) -> HexCoordSet {
        self.distances.keys().map(|node| node.coord).collect()
    }

    /// The number of distinct (tile, heading) states the search reached
    pub fn explored_states(&self) -> usize {
        self.distances.len()
    }

    /// Find the quickest way to arrive at the given tile, across all possible
    /// arrival headings. Ties go to whichever heading comes first in
    /// enumeration order.
    fn best_arrival(&self, target: HexCoord) -> Option<(Node, Distance)> {
        Heading::iter()
            .filter_map(|heading| {
                let node = Node {
                    coord: target,
                    heading,
                };
                self.distances.get(&node).map(|&distance| (node, distance))
            })
            .min_by_key(|&(_, distance)| distance)
    }

    /// Walk the predecessor links back from the given node to the origin, then
    /// flip the steps around so they go origin-first.
    fn reconstruct(&self, node: Node) -> Path {
        let mut steps = Vec::new();
        let mut finish = node;
        // The origin node is the only reachable node without a predecessor
        while let Some(&start) = self.predecessors.get(&finish) {
            steps.push(Step {
                start: start.coord,
                finish: finish.coord,
                heading: finish.heading,
            });
            finish = start;
        }
        steps.reverse();
        Path::new_unchecked(steps)
    }
}
