use crate::bfs::bfs;
use crate::pathing_grid::PathingGrid;
use crate::{Connectivity, PathError};
use grid_util::point::Point;
use log::{debug, info};

/// A shortest-path search on a [PathingGrid]. Paths include both the start and the goal.
pub trait PathFinder {
    fn get_path_single_goal(
        &self,
        grid: &PathingGrid,
        start: Point,
        goal: Point,
    ) -> Result<Vec<Point>, PathError>;
}

/// Breadth-first search. On a uniform-cost grid the first time the goal is dequeued it has
/// been reached by a shortest path. Neighbours are expanded up, down, left, right and then
/// diagonally, which fixes which of several shortest paths is returned.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsSolver;

impl BfsSolver {
    pub fn new() -> BfsSolver {
        BfsSolver
    }
}

impl PathFinder for BfsSolver {
    fn get_path_single_goal(
        &self,
        grid: &PathingGrid,
        start: Point,
        goal: Point,
    ) -> Result<Vec<Point>, PathError> {
        grid.check_bounds(&start)?;
        grid.check_bounds(&goal)?;
        let not_found = PathError::NotFound { start, goal };
        if grid.is_blocked(&start) || grid.is_blocked(&goal) {
            info!("{} or {} is blocked", start, goal);
            return Err(not_found);
        }
        if grid.components_dirty {
            debug!("Components are dirty, searching without reachability check");
        } else if grid.unreachable(&start, &goal) {
            // Start and goal are on different connected components
            info!("{} is not reachable from {}", goal, start);
            return Err(not_found);
        }
        bfs(&start, |node| grid.successors(node), |node| *node == goal).ok_or(not_found)
    }
}

/// Searches an obstacle-free `width` x `height` grid.
pub fn find_shortest_path(
    width: usize,
    height: usize,
    start: Point,
    goal: Point,
    connectivity: Connectivity,
) -> Result<Vec<Point>, PathError> {
    let grid = PathingGrid::open(width, height, connectivity);
    BfsSolver.get_path_single_goal(&grid, start, goal)
}
