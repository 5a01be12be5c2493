use grid_goal_memory::config::SimulationConfig;
use grid_goal_memory::simulation::{seeded_rng, Simulation};

// Runs the driving loop without a window on a grid with random obstacles and
// prints how often the memory answered instead of a search.

fn main() {
    let config = SimulationConfig {
        obstacle_density: 0.2,
        seed: Some(0),
        ..SimulationConfig::default()
    };
    let rng = seeded_rng(config.seed);
    let mut simulation = Simulation::new(config, rng).unwrap();
    println!("{}", simulation.grid());
    let reached = simulation.run_episodes(50, 10_000);
    let stats = simulation.memory().stats();
    println!(
        "Reached {} goals; {} remembered, {} hits, {} misses",
        reached,
        simulation.memory().len(),
        stats.hits,
        stats.misses
    );
}
