/// Fuzzes the search by checking for many random grids that a path is found exactly when the
/// goal is on the same connected component as the start, and that every path found is legal
/// and as short as a path can be. Lengths are compared against Dijkstra over the same moves.
/// Both connectivity rules are tested.
use grid_goal_memory::{
    find_shortest_path, is_valid_path, BfsSolver, Connectivity, PathFinder, PathingGrid,
};
use grid_util::grid::Grid;
use grid_util::point::Point;
use petgraph::algo::dijkstra;
use petgraph::graph::{DiGraph, NodeIndex};
use rand::prelude::*;

fn random_grid(w: usize, h: usize, rng: &mut StdRng, connectivity: Connectivity) -> PathingGrid {
    let mut pathing_grid = PathingGrid::new(w, h, false);
    pathing_grid.connectivity = connectivity;
    for x in 0..pathing_grid.width() {
        for y in 0..pathing_grid.height() {
            pathing_grid.set(x, y, rng.gen_bool(0.4))
        }
    }
    pathing_grid.generate_components();
    pathing_grid
}

fn random_point(w: usize, h: usize, rng: &mut StdRng) -> Point {
    Point::new(rng.gen_range(0..w) as i32, rng.gen_range(0..h) as i32)
}

fn node(grid: &PathingGrid, p: &Point) -> NodeIndex {
    NodeIndex::new(p.y as usize * grid.width() + p.x as usize)
}

/// Number of moves from `start` to `goal` found by Dijkstra on the graph of legal moves.
fn dijkstra_distance(grid: &PathingGrid, start: &Point, goal: &Point) -> Option<usize> {
    let mut graph = DiGraph::<(), ()>::with_capacity(grid.width() * grid.height(), 0);
    for _ in 0..grid.width() * grid.height() {
        graph.add_node(());
    }
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            if grid.is_blocked(&p) {
                continue;
            }
            for successor in grid.successors(&p) {
                graph.add_edge(node(grid, &p), node(grid, &successor), ());
            }
        }
    }
    let goal_ix = node(grid, goal);
    dijkstra(&graph, node(grid, start), Some(goal_ix), |_| 1usize)
        .get(&goal_ix)
        .copied()
}

fn visualize_grid(grid: &PathingGrid, start: &Point, end: &Point) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if grid.is_blocked(&p) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let solver = BfsSolver::new();
    for connectivity in [Connectivity::Four, Connectivity::Eight] {
        let start = Point::new(0, 0);
        let end = Point::new(N as i32 - 1, N as i32 - 1);
        for _ in 0..N_GRIDS {
            let mut random_grid = random_grid(N, N, &mut rng, connectivity);
            random_grid.set(0, 0, false);
            random_grid.set(N - 1, N - 1, false);
            random_grid.update();
            let reachable = random_grid.reachable(&start, &end);
            let path = solver.get_path_single_goal(&random_grid, start, end);
            // Show the grid if the search disagrees with the components
            if path.is_ok() != reachable {
                visualize_grid(&random_grid, &start, &end);
            }
            assert_eq!(path.is_ok(), reachable);
            if let Ok(path) = path {
                assert!(is_valid_path(&path, &start, &end, connectivity));
                assert!(path.iter().all(|p| !random_grid.is_blocked(p)));
                assert_eq!(
                    Some(path.len() - 1),
                    dijkstra_distance(&random_grid, &start, &end)
                );
            }
        }
    }
}

/// The search without a component check must agree with the one that has it.
#[test]
fn fuzz_without_components() {
    const N: usize = 8;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(1);
    for connectivity in [Connectivity::Four, Connectivity::Eight] {
        for _ in 0..N_GRIDS {
            let random_grid = random_grid(N, N, &mut rng, connectivity);
            let mut dirty_grid = random_grid.clone();
            dirty_grid.components_dirty = true;
            let start = random_point(N, N, &mut rng);
            let goal = random_point(N, N, &mut rng);
            let with_components = BfsSolver.get_path_single_goal(&random_grid, start, goal);
            let without_components = BfsSolver.get_path_single_goal(&dirty_grid, start, goal);
            assert_eq!(with_components, without_components);
        }
    }
}

/// On an open grid every shortest path takes exactly as many moves as the grid distance.
#[test]
fn open_grid_path_lengths() {
    const W: usize = 12;
    const H: usize = 7;
    let mut rng = StdRng::seed_from_u64(2);
    for connectivity in [Connectivity::Four, Connectivity::Eight] {
        for _ in 0..500 {
            let start = random_point(W, H, &mut rng);
            let goal = random_point(W, H, &mut rng);
            let path = find_shortest_path(W, H, start, goal, connectivity).unwrap();
            assert_eq!(
                path.len() as i32,
                connectivity.distance(&start, &goal) + 1,
                "{} from {} to {}",
                connectivity,
                start,
                goal
            );
            assert!(is_valid_path(&path, &start, &goal, connectivity));
        }
    }
}

#[test]
fn search_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(3);
    for connectivity in [Connectivity::Four, Connectivity::Eight] {
        let grid = random_grid(10, 10, &mut rng, connectivity);
        for _ in 0..200 {
            let start = random_point(10, 10, &mut rng);
            let goal = random_point(10, 10, &mut rng);
            let first = BfsSolver.get_path_single_goal(&grid, start, goal);
            let second = BfsSolver.get_path_single_goal(&grid, start, goal);
            assert_eq!(first, second);
        }
    }
}
