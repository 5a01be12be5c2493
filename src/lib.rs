//! # grid_goal_memory
//!
//! Breadth-first shortest-path search on a uniform grid, combined with a
//! [GoalMemory](memory::GoalMemory) that remembers the path found for every goal so that a
//! repeated goal is served without searching again. A
//! [Simulation](simulation::Simulation) drives an agent towards randomly placed goals using
//! both, and is what the `grid_goal_memory` binary renders.
//!
//! Every move costs the same. Connected components are
//! precomputed with a [UnionFind](petgraph::unionfind::UnionFind) so that an unreachable goal
//! is rejected without flood-filling the grid.
pub mod bfs;
pub mod config;
pub mod error;
pub mod memory;
pub mod pathing_grid;
pub mod simulation;
pub mod solver;

pub use error::PathError;
pub use memory::GoalMemory;
pub use pathing_grid::PathingGrid;
pub use simulation::Simulation;
pub use solver::{find_shortest_path, BfsSolver, PathFinder};

use core::fmt;
use grid_util::point::Point;
use itertools::Itertools;

/// Whether a diagonal step may pass between two blocked orthogonal cells.
pub const ALLOW_CORNER_CUTTING: bool = false;

/// Inline capacity used for neighbourhoods, which never exceed 8 cells.
pub const N_SMALLVEC_SIZE: usize = 8;

/// Orthogonal offsets in expansion order: up, down, left, right.
pub(crate) const NEUMANN_OFFSETS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Diagonal offsets in expansion order: up-left, up-right, down-left, down-right.
pub(crate) const DIAGONAL_OFFSETS: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Neighbourhood rule of the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Connectivity {
    /// Up, down, left and right.
    #[default]
    Four,
    /// The four orthogonal neighbours followed by the four diagonal ones.
    Eight,
}

impl Connectivity {
    pub fn allows_diagonal(self) -> bool {
        matches!(self, Connectivity::Eight)
    }

    /// Number of moves between two cells on an open grid: the
    /// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) for
    /// [Connectivity::Four] and the
    /// [Chebyshev distance](https://en.wikipedia.org/wiki/Chebyshev_distance) for
    /// [Connectivity::Eight].
    pub fn distance(self, p1: &Point, p2: &Point) -> i32 {
        let delta_x = (p1.x - p2.x).abs();
        let delta_y = (p1.y - p2.y).abs();
        match self {
            Connectivity::Four => delta_x + delta_y,
            Connectivity::Eight => delta_x.max(delta_y),
        }
    }

    /// Checks whether two cells are neighbours under this rule.
    pub fn adjacent(self, p1: &Point, p2: &Point) -> bool {
        self.distance(p1, p2) == 1
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Connectivity::Four => write!(f, "4-grid"),
            Connectivity::Eight => write!(f, "8-grid"),
        }
    }
}

/// Checks that a path starts at `start`, ends at `goal`, only takes steps that are legal under
/// `connectivity` and never visits a cell twice.
pub fn is_valid_path(
    path: &[Point],
    start: &Point,
    goal: &Point,
    connectivity: Connectivity,
) -> bool {
    match (path.first(), path.last()) {
        (Some(first), Some(last)) if first == start && last == goal => {
            path.iter()
                .tuple_windows()
                .all(|(a, b)| connectivity.adjacent(a, b))
                && path.iter().all_unique()
        }
        _ => false,
    }
}
