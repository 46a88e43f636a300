use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::collections::VecDeque;
use strum::IntoEnumIterator;
use tack::{
    GridBounds, Heading, HexCoord, HexCoordMap, HexCoordSet, NavigableGrid,
    Path, Pathfinder, SearchConfig,
};

const RADIUS: u16 = 5;

/// Check everything that must hold for any path the pathfinder hands back
fn assert_valid_path(
    config: &SearchConfig,
    heading: Heading,
    origin: HexCoord,
    target: HexCoord,
    blocked: &HexCoordSet,
    path: &Path,
) {
    // Re-validating makes sure every step is a real move and the steps chain
    let revalidated = Path::new(path.steps().to_vec()).unwrap();
    assert_eq!(&revalidated, path);

    if path.is_empty() {
        assert_eq!(origin, target);
        return;
    }
    assert_eq!(path.start(), Some(origin));
    assert_eq!(path.finish(), Some(target));
    if !config.allow_initial_turn {
        assert_eq!(path.steps()[0].heading, heading, "path: {}", path);
    }
    for pair in path.steps().windows(2) {
        let angle = pair[0].heading.angle_to(pair[1].heading);
        assert!(angle < config.turn_limit, "turned {} in {}", angle, path);
    }
    let grid = GridBounds::new(RADIUS);
    for step in path.steps() {
        assert!(grid.contains(step.finish));
        assert!(!blocked.contains(&step.finish));
    }
}

/// Brute-force breadth-first search over every (tile, heading) state. Every
/// move costs the same, so BFS gives exact distances to compare against.
fn reference_distances(
    config: &SearchConfig,
    origin: HexCoord,
    heading: Heading,
    blocked: &HexCoordSet,
) -> HexCoordMap<usize> {
    let grid = GridBounds::new(RADIUS);
    let mut seen = std::collections::HashSet::new();
    let mut best = HexCoordMap::default();
    let mut queue = VecDeque::new();
    seen.insert((origin, heading));
    queue.push_back((origin, heading, 0, true));

    while let Some((coord, facing, distance, first)) = queue.pop_front() {
        best.entry(coord).or_insert(distance);
        for next in Heading::iter() {
            let allowed = if first && !config.allow_initial_turn {
                next == facing
            } else {
                facing.angle_to(next) < config.turn_limit
            };
            let neighbor = coord.neighbor(next);
            if allowed
                && grid.contains(neighbor)
                && !blocked.contains(&neighbor)
                && seen.insert((neighbor, next))
            {
                queue.push_back((neighbor, next, distance + 1, false));
            }
        }
    }
    best
}

fn check_scenario(
    config: &SearchConfig,
    origin: HexCoord,
    heading: Heading,
    blocked: &HexCoordSet,
) {
    let grid = GridBounds::new(RADIUS);
    let pathfinder =
        Pathfinder::with_config(config, origin, heading, &grid, blocked)
            .unwrap();
    let expected = reference_distances(config, origin, heading, blocked);

    for target in grid.coords() {
        let path = pathfinder.to_coord(target);
        assert_eq!(
            path.as_ref().map(Path::len),
            expected.get(&target).copied(),
            "wrong distance from {} facing {} to {}",
            origin,
            heading,
            target
        );
        assert_eq!(
            pathfinder.distance_to(target),
            expected.get(&target).copied()
        );
        if let Some(path) = path {
            assert_valid_path(config, heading, origin, target, blocked, &path);
        }
    }
    assert_eq!(
        pathfinder.reachable(),
        expected.keys().copied().collect::<HexCoordSet>()
    );
}

#[test]
fn test_open_grid() {
    let grid = GridBounds::new(RADIUS);
    assert_eq!(grid.len(), 91);
    for heading in Heading::iter() {
        check_scenario(
            &SearchConfig::default(),
            HexCoord::ORIGIN,
            heading,
            &HexCoordSet::default(),
        );
    }
}

#[test]
fn test_origin_to_origin() {
    let pathfinder = Pathfinder::new(
        HexCoord::ORIGIN,
        Heading::South,
        &GridBounds::new(RADIUS),
        &HexCoordSet::default(),
    )
    .unwrap();
    assert_eq!(pathfinder.to_coord(HexCoord::ORIGIN), Some(Path::empty()));
}

#[test]
fn test_one_step_south() {
    let pathfinder = Pathfinder::new(
        HexCoord::ORIGIN,
        Heading::South,
        &GridBounds::new(RADIUS),
        &HexCoordSet::default(),
    )
    .unwrap();
    let target = HexCoord::ORIGIN.neighbor(Heading::South);
    let path = pathfinder.to_coord(target).unwrap();
    assert_eq!(path.len(), 1);
    assert_eq!(path.steps()[0].heading, Heading::South);
    assert_eq!(path.steps()[0].start, HexCoord::ORIGIN);
    assert_eq!(path.steps()[0].finish, target);
}

#[test]
fn test_all_neighbors_blocked() {
    let grid = GridBounds::new(RADIUS);
    let blocked: HexCoordSet = HexCoord::ORIGIN.neighbors().collect();
    for heading in Heading::iter() {
        let pathfinder =
            Pathfinder::new(HexCoord::ORIGIN, heading, &grid, &blocked)
                .unwrap();
        for target in grid.coords().filter(|c| *c != HexCoord::ORIGIN) {
            assert_eq!(pathfinder.to_coord(target), None);
        }
    }
}

#[test]
fn test_repeated_queries() {
    let grid = GridBounds::new(RADIUS);
    let blocked: HexCoordSet =
        vec![HexCoord::new_xy(1, 1), HexCoord::new_xy(-2, 0)]
            .into_iter()
            .collect();
    let target = HexCoord::new_xy(-3, 4);
    let lengths: Vec<Option<usize>> = (0..3)
        .map(|_| {
            Pathfinder::new(
                HexCoord::ORIGIN,
                Heading::SouthEast,
                &grid,
                &blocked,
            )
            .unwrap()
            .to_coord(target)
            .map(|path| path.len())
        })
        .collect();
    assert!(lengths[0].is_some());
    assert!(lengths.iter().all(|length| *length == lengths[0]));
}

#[test]
fn test_random_obstacles() {
    let mut rng = Pcg64::seed_from_u64(0x7ac4);
    let grid = GridBounds::new(RADIUS);
    let coords: Vec<HexCoord> = grid.coords().collect();
    let configs = [
        SearchConfig::default(),
        SearchConfig {
            allow_initial_turn: true,
            ..Default::default()
        },
        SearchConfig {
            turn_limit: 150.0,
            ..Default::default()
        },
    ];

    for _ in 0..20 {
        let origin = coords[rng.gen_range(0..coords.len())];
        let heading = Heading::iter()
            .nth(rng.gen_range(0..6))
            .unwrap_or(Heading::North);
        // Roughly a quarter of the grid is blocked, never the origin
        let blocked: HexCoordSet = coords
            .iter()
            .copied()
            .filter(|coord| *coord != origin && rng.gen_bool(0.25))
            .collect();
        for config in &configs {
            check_scenario(config, origin, heading, &blocked);
        }
    }
}

#[test]
fn test_random_walk_reachable() {
    // Any tile reached by a random walk that obeys the turning rules must be
    // reachable, in at most as many steps as the walk took
    let mut rng = Pcg64::seed_from_u64(1234);
    let grid = GridBounds::new(RADIUS);
    let pathfinder = Pathfinder::new(
        HexCoord::ORIGIN,
        Heading::North,
        &grid,
        &HexCoordSet::default(),
    )
    .unwrap();

    for _ in 0..50 {
        let mut coord = HexCoord::ORIGIN;
        let mut heading = Heading::North;
        // Cap the walk, since it could circle forever without leaving the grid
        for steps in 1..=100 {
            let next = coord.neighbor(heading);
            if !grid.contains(next) {
                break;
            }
            coord = next;
            let distance = pathfinder.distance_to(coord).unwrap();
            assert!(distance <= steps, "{} took {} steps", coord, steps);
            heading = match rng.gen_range(0..3) {
                0 => heading.rotate_counterclockwise(),
                1 => heading,
                _ => heading.rotate_clockwise(),
            };
        }
    }
}

/// A grid that treats the outer ring as walls, to check that the pathfinder
/// only goes where the grid allows
struct WalledGrid(GridBounds);

impl NavigableGrid for WalledGrid {
    fn navigable_neighbors(
        &self,
        coord: HexCoord,
        blocked: &HexCoordSet,
    ) -> Vec<HexCoord> {
        let interior = i32::from(self.0.radius()) - 1;
        self.0
            .navigable_neighbors(coord, blocked)
            .into_iter()
            .filter(|neighbor| neighbor.abs_max_component() <= interior)
            .collect()
    }
}

#[test]
fn test_custom_grid() {
    let grid = WalledGrid(GridBounds::new(RADIUS));
    let pathfinder = Pathfinder::new(
        HexCoord::ORIGIN,
        Heading::NorthWest,
        &grid,
        &HexCoordSet::default(),
    )
    .unwrap();
    let reachable = pathfinder.reachable();
    assert!(!reachable.is_empty());
    assert!(reachable
        .iter()
        .all(|coord| coord.abs_max_component() < i32::from(RADIUS)));
    assert_eq!(pathfinder.to_coord(HexCoord::new_xy(0, 5)), None);
}
