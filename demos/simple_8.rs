use grid_goal_memory::{find_shortest_path, Connectivity};
use grid_util::point::Point;

// In this example a path is found across an open 10x10 grid where nodes have an
// 8-neighborhood. The path takes the diagonal, so it has as many cells as the
// Chebyshev distance plus one.

fn main() {
    let start = Point::new(0, 0);
    let end = Point::new(9, 5);
    let path = find_shortest_path(10, 10, start, end, Connectivity::Eight).unwrap();
    println!("Path of {} cells:", path.len());
    for p in path {
        println!("{:?}", p);
    }
}
