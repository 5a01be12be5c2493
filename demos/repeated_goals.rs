use grid_goal_memory::{BfsSolver, Connectivity, GoalMemory, PathFinder, PathingGrid};
use grid_util::point::Point;

// In this example the same goals are requested several times from a fixed start.
// Only the first request for each goal runs a search; the rest are answered from
// the memory.

fn main() {
    let pathing_grid = PathingGrid::open(10, 10, Connectivity::Four);
    let mut memory = GoalMemory::new();
    let start = Point::new(0, 0);
    let requests = [
        Point::new(9, 9),
        Point::new(3, 4),
        Point::new(9, 9),
        Point::new(3, 4),
        Point::new(0, 7),
    ];
    for goal in requests {
        if let Some(path) = memory.lookup_from(&start, &goal) {
            println!("Reusing cached path for goal {} ({} cells)", goal, path.len());
            continue;
        }
        println!("Searching for goal {}...", goal);
        match BfsSolver.get_path_single_goal(&pathing_grid, start, goal) {
            Ok(path) => {
                if let Err(err) = memory.record(goal, path) {
                    println!("{}", err);
                }
            }
            Err(err) => println!("{}", err),
        }
    }
    println!("{:?}", memory.stats());
}
