use grid_goal_memory::{BfsSolver, Connectivity, PathFinder, PathingGrid};
use grid_util::grid::Grid;
use grid_util::point::Point;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let mut pathing_grid = PathingGrid::new(3, 3, false);
    pathing_grid.connectivity = Connectivity::Four;
    pathing_grid.set(1, 1, true);
    pathing_grid.generate_components();
    println!("{}", pathing_grid);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    match BfsSolver.get_path_single_goal(&pathing_grid, start, end) {
        Ok(path) => {
            println!("Path:");
            for p in path {
                println!("{:?}", p);
            }
        }
        Err(err) => println!("{}", err),
    }
}
