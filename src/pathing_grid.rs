use crate::{
    Connectivity, PathError, ALLOW_CORNER_CUTTING, DIAGONAL_OFFSETS, NEUMANN_OFFSETS,
    N_SMALLVEC_SIZE,
};
use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// [PathingGrid] maintains information about components using a [UnionFind] structure in addition to the raw
/// [bool] grid values in the [BoolGrid] that determine whether a space is occupied ([true]) or
/// empty ([false]). Implements [Grid] by building on [BoolGrid].
#[derive(Clone, Debug)]
pub struct PathingGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    pub connectivity: Connectivity,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        PathingGrid {
            grid: BoolGrid::default(),
            components: UnionFind::new(0),
            components_dirty: false,
            connectivity: Connectivity::default(),
        }
    }
}

impl PathingGrid {
    /// An obstacle-free grid with its components already generated.
    pub fn open(width: usize, height: usize, connectivity: Connectivity) -> PathingGrid {
        let mut pathing_grid = PathingGrid::new(width, height, false);
        pathing_grid.connectivity = connectivity;
        pathing_grid.generate_components();
        pathing_grid
    }

    pub fn in_bounds(&self, point: &Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width()
            && (point.y as usize) < self.height()
    }

    /// Fails with [PathError::OutOfBounds] if the point is not on the grid.
    pub fn check_bounds(&self, point: &Point) -> Result<(), PathError> {
        if self.in_bounds(point) {
            Ok(())
        } else {
            Err(PathError::OutOfBounds {
                point: *point,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    /// Out-of-bounds points count as blocked.
    pub fn is_blocked(&self, point: &Point) -> bool {
        !self.in_bounds(point) || self.grid.get(point.x as usize, point.y as usize)
    }

    pub fn can_move_to_simple(&self, pos: &Point) -> bool {
        !self.is_blocked(pos)
    }

    /// Checks a single step from `start` to the neighbouring `pos`.
    pub fn can_move_to(&self, pos: &Point, start: &Point) -> bool {
        if ALLOW_CORNER_CUTTING || pos.x == start.x || pos.y == start.y {
            self.can_move_to_simple(pos)
        } else {
            debug_assert!((start.x - pos.x).abs() <= 1 && (start.y - pos.y).abs() <= 1);
            self.can_move_to_simple(pos)
                && !self.is_blocked(&Point::new(start.x, pos.y))
                && !self.is_blocked(&Point::new(pos.x, start.y))
        }
    }

    /// All neighbours of a point under the grid's connectivity, in expansion order, whether
    /// or not they are on the grid.
    pub fn neighborhood_points(&self, point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        let diagonals: &[(i32, i32)] = if self.connectivity.allows_diagonal() {
            &DIAGONAL_OFFSETS
        } else {
            &[]
        };
        NEUMANN_OFFSETS
            .iter()
            .chain(diagonals)
            .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .collect()
    }

    /// The neighbours that can be stepped to from `pos`.
    pub fn successors(&self, pos: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        self.neighborhood_points(pos)
            .into_iter()
            .filter(|p| self.can_move_to(p, pos))
            .collect()
    }

    fn get_ix_point(&self, point: &Point) -> usize {
        self.grid.get_ix(point.x as usize, point.y as usize)
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.get_ix_point(point))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Blocked and out-of-bounds
    /// points are unreachable.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.can_move_to_simple(start) && self.can_move_to_simple(goal) {
            let start_ix = self.get_ix_point(start);
            let goal_ix = self.get_ix_point(goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            debug!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up grid neighbours to the same components.
    /// Only right and downward neighbours are linked since links are symmetric.
    pub fn generate_components(&mut self) {
        let w = self.width();
        let h = self.height();
        info!("Generating connected components for {}x{} {}", w, h, self.connectivity);
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        let forward: &[(i32, i32)] = if self.connectivity.allows_diagonal() {
            &[(1, 0), (0, 1), (1, 1), (1, -1)]
        } else {
            &[(1, 0), (0, 1)]
        };
        for x in 0..w as i32 {
            for y in 0..h as i32 {
                let point = Point::new(x, y);
                if self.is_blocked(&point) {
                    continue;
                }
                let parent_ix = self.get_ix_point(&point);
                for (dx, dy) in forward {
                    let p = Point::new(x + dx, y + dy);
                    if self.can_move_to(&p, &point) {
                        let ix = self.get_ix_point(&p);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }

    /// Every cell that is not blocked, in row-major order.
    pub fn passable_points(&self) -> Vec<Point> {
        (0..self.height() as i32)
            .flat_map(|y| (0..self.width() as i32).map(move |x| Point::new(x, y)))
            .filter(|p| !self.is_blocked(p))
            .collect()
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() {
            let row = (0..self.width())
                .map(|x| if self.grid.get(x, y) { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

impl Grid<bool> for PathingGrid {
    fn new(width: usize, height: usize, default_value: bool) -> Self {
        PathingGrid {
            grid: BoolGrid::new(width, height, default_value),
            components: UnionFind::new(width * height),
            components_dirty: false,
            connectivity: Connectivity::default(),
        }
    }
    fn get(&self, x: usize, y: usize) -> bool {
        self.grid.get(x, y)
    }
    /// Updates a position on the grid. Joins newly connected components and flags the components
    /// as dirty if components are (potentially) broken apart into multiple.
    fn set(&mut self, x: usize, y: usize, blocked: bool) {
        let p = Point::new(x as i32, y as i32);
        if blocked {
            if !self.grid.get(x, y) {
                self.components_dirty = true;
            }
        } else {
            let p_ix = self.get_ix_point(&p);
            for n in self.neighborhood_points(&p) {
                if self.can_move_to(&n, &p) {
                    let n_ix = self.get_ix_point(&n);
                    self.components.union(p_ix, n_ix);
                }
            }
        }
        self.grid.set(x, y, blocked);
    }
    fn width(&self) -> usize {
        self.grid.width
    }
    fn height(&self) -> usize {
        self.grid.height
    }
}
